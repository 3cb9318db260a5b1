use crate::domain::delivery_result::DeliveryResult;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub title: String,
    pub event_date: NaiveDateTime,
    pub location: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Rsvp {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub acceptance_code: Option<String>,
    pub event: EventDetails,
}

impl Rsvp {
    pub fn contact_phone(&self) -> Option<&str> {
        self.phone.as_deref().map(str::trim).filter(|phone| !phone.is_empty())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RsvpDecision {
    Approved,
    Rejected,
}

impl fmt::Display for RsvpDecision {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            RsvpDecision::Approved => write!(f, "approved"),
            RsvpDecision::Rejected => write!(f, "rejected"),
        }
    }
}

/// Both channel outcomes of an RSVP decision, reported independently.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RsvpNotificationResult {
    pub email_result: DeliveryResult,
    pub sms_result: DeliveryResult,
    pub email_address: String,
    pub phone_number: Option<String>,
}
