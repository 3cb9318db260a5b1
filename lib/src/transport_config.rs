use crate::environment::Environment;
use crate::retry_policy::RetryPolicy;
use std::fmt;
use std::time::Duration;
use tracing::log::info;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_FROM_ADDRESS: &str = "noreply@digitalclub.kiut.ac.tz";
pub const DEFAULT_SMS_API_BASE_URL: &str = "https://api.twilio.com";
pub const DEFAULT_COUNTRY_PREFIX: &str = "255";
pub const DEFAULT_BASE_URL: &str = "https://digitalclub.kiut.ac.tz";

#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub connect_timeout: Duration,
}

impl SmtpConfig {
    pub fn new(
        username: &str,
        password: &str,
    ) -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
            username: username.to_string(),
            password: password.to_string(),
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_host(
        self,
        host: &str,
        port: u16,
    ) -> Self {
        Self {
            host: host.to_string(),
            port,
            ..self
        }
    }

    pub fn with_from_address(
        self,
        from_address: &str,
    ) -> Self {
        Self {
            from_address: from_address.to_string(),
            ..self
        }
    }

    pub fn with_connect_timeout(
        self,
        connect_timeout: Duration,
    ) -> Self {
        Self { connect_timeout, ..self }
    }

    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("from_address", &self.from_address)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct SmsConfig {
    pub api_base_url: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub country_prefix: String,
    pub request_timeout: Duration,
}

impl SmsConfig {
    pub fn new(
        account_sid: &str,
        auth_token: &str,
        from_number: &str,
    ) -> Self {
        Self {
            api_base_url: DEFAULT_SMS_API_BASE_URL.to_string(),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from_number: from_number.to_string(),
            country_prefix: DEFAULT_COUNTRY_PREFIX.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_base_url(
        self,
        api_base_url: &str,
    ) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            ..self
        }
    }

    /// Accepts `+255`, `255` or `00255`; only the digits after the international prefix are kept.
    pub fn with_country_prefix(
        self,
        country_prefix: &str,
    ) -> Self {
        let digits = country_prefix.chars().filter(char::is_ascii_digit).collect::<String>();

        Self {
            country_prefix: digits.trim_start_matches('0').to_string(),
            ..self
        }
    }

    pub fn with_request_timeout(
        self,
        request_timeout: Duration,
    ) -> Self {
        Self { request_timeout, ..self }
    }

    pub fn messages_url(&self) -> String {
        format!("{}/2010-04-01/Accounts/{}/Messages.json", self.api_base_url, self.account_sid)
    }
}

impl fmt::Debug for SmsConfig {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("SmsConfig")
            .field("api_base_url", &self.api_base_url)
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"***")
            .field("from_number", &self.from_number)
            .field("country_prefix", &self.country_prefix)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Process-wide transport settings, resolved once at startup.
///
/// A channel whose credentials are missing stays `None` and every send on it
/// becomes a reported no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub smtp: Option<SmtpConfig>,
    pub sms: Option<SmsConfig>,
    pub base_url: String,
    pub retry_policy: RetryPolicy,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            smtp: None,
            sms: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let smtp = match (Environment::optional_string("SMTP_USERNAME"), Environment::optional_string("SMTP_PASSWORD")) {
            (Some(username), Some(password)) => Some(
                SmtpConfig::new(&username, &password)
                    .with_host(&Environment::string("SMTP_SERVER", DEFAULT_SMTP_HOST), Environment::u16("SMTP_PORT", DEFAULT_SMTP_PORT))
                    .with_from_address(&Environment::string("FROM_EMAIL", DEFAULT_FROM_ADDRESS))
                    .with_connect_timeout(Duration::from_secs(Environment::u64("SMTP_TIMEOUT_IN_SECONDS", 10))),
            ),
            _ => {
                info!("SMTP credentials not configured. Email channel disabled");
                None
            },
        };

        let sms = match (
            Environment::optional_string("TWILIO_ACCOUNT_SID"),
            Environment::optional_string("TWILIO_AUTH_TOKEN"),
            Environment::optional_string("TWILIO_PHONE_NUMBER"),
        ) {
            (Some(account_sid), Some(auth_token), Some(from_number)) => Some(
                SmsConfig::new(&account_sid, &auth_token, &from_number)
                    .with_api_base_url(&Environment::string("TWILIO_API_BASE_URL", DEFAULT_SMS_API_BASE_URL))
                    .with_country_prefix(&Environment::string("SMS_COUNTRY_PREFIX", DEFAULT_COUNTRY_PREFIX))
                    .with_request_timeout(Duration::from_secs(Environment::u64("SMS_TIMEOUT_IN_SECONDS", 10))),
            ),
            _ => {
                info!("Twilio credentials not configured. SMS channel disabled");
                None
            },
        };

        let retry_policy = RetryPolicy::from_seconds(Environment::u32("EMAIL_MAX_ATTEMPTS", 3), &Environment::u64_list("EMAIL_RETRY_DELAYS_IN_SECONDS", &[2, 4]));

        Self {
            smtp,
            sms,
            base_url: Environment::string("BASE_URL", DEFAULT_BASE_URL).trim_end_matches('/').to_string(),
            retry_policy,
        }
    }

    pub fn with_smtp(
        self,
        smtp: SmtpConfig,
    ) -> Self {
        Self { smtp: Some(smtp), ..self }
    }

    pub fn with_sms(
        self,
        sms: SmsConfig,
    ) -> Self {
        Self { sms: Some(sms), ..self }
    }

    pub fn with_base_url(
        self,
        base_url: &str,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..self
        }
    }

    pub fn with_retry_policy(
        self,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self { retry_policy, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_twilio_messages_url() {
        let sms = SmsConfig::new("AC123", "token", "+15005550006").with_api_base_url("http://localhost:4010/");

        assert_eq!("http://localhost:4010/2010-04-01/Accounts/AC123/Messages.json", sms.messages_url());
    }

    #[test]
    fn keeps_only_country_code_digits() {
        assert_eq!("255", SmsConfig::new("AC123", "token", "+1").with_country_prefix("+255").country_prefix);
        assert_eq!("44", SmsConfig::new("AC123", "token", "+1").with_country_prefix("0044").country_prefix);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let smtp = format!("{:?}", SmtpConfig::new("club@example.com", "app-password"));
        let sms = format!("{:?}", SmsConfig::new("AC123", "secret-token", "+1"));

        assert!(!smtp.contains("app-password"));
        assert!(!sms.contains("secret-token"));
    }
}
