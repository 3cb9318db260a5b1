pub struct PhoneNumber;

impl PhoneNumber {
    /// Digits-only international form without the leading `+`.
    ///
    /// Numbers that do not already start with `country_prefix` get it prepended
    /// after dropping a single trunk `0`. Returns `None` when no digit is left.
    pub fn normalize(
        raw: &str,
        country_prefix: &str,
    ) -> Option<String> {
        let digits = raw.chars().filter(char::is_ascii_digit).collect::<String>();

        if digits.is_empty() {
            return None;
        }

        if digits.starts_with(country_prefix) {
            return Some(digits);
        }

        let national = digits.strip_prefix('0').unwrap_or(&digits);

        Some(format!("{country_prefix}{national}"))
    }
}
