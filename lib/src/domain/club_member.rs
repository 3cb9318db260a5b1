use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct ClubMember {
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl ClubMember {
    pub fn new(
        email: &str,
        full_name: Option<&str>,
    ) -> Self {
        Self {
            email: Some(email.to_string()),
            full_name: full_name.map(|name| name.to_string()),
        }
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|email| !email.is_empty())
    }

    /// Full name when known, otherwise the email address.
    pub fn display_name(&self) -> Option<&str> {
        self.full_name.as_deref().map(str::trim).filter(|name| !name.is_empty()).or(self.contact_email())
    }
}
