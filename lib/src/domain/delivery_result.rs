use crate::domain::channel::Channel;
use crate::domain::delivery_failure::DeliveryFailure;
use serde::{Serialize, Serializer};

/// Outcome of one dispatch call. Nothing here is persisted.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DeliveryResult {
    pub channel: Channel,
    pub destination: String,
    pub succeeded: bool,
    pub attempts: u32,
    #[serde(serialize_with = "describe_failure")]
    pub last_error: Option<DeliveryFailure>,
}

impl DeliveryResult {
    pub fn delivered(
        channel: Channel,
        destination: &str,
        attempts: u32,
    ) -> Self {
        Self {
            channel,
            destination: destination.to_string(),
            succeeded: true,
            attempts,
            last_error: None,
        }
    }

    pub fn failed(
        channel: Channel,
        destination: &str,
        attempts: u32,
        failure: DeliveryFailure,
    ) -> Self {
        Self {
            channel,
            destination: destination.to_string(),
            succeeded: false,
            attempts,
            last_error: Some(failure),
        }
    }

    pub fn not_configured(
        channel: Channel,
        destination: &str,
    ) -> Self {
        Self::failed(channel, destination, 0, DeliveryFailure::ConfigurationMissing(channel))
    }

    /// The channel was skipped on purpose, e.g. no phone number on file.
    pub fn not_attempted(
        channel: Channel,
        destination: &str,
    ) -> Self {
        Self {
            channel,
            destination: destination.to_string(),
            succeeded: false,
            attempts: 0,
            last_error: None,
        }
    }

    pub fn last_error_description(&self) -> Option<String> {
        self.last_error.as_ref().map(|failure| failure.to_string())
    }
}

fn describe_failure<S>(
    failure: &Option<DeliveryFailure>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match failure {
        Some(failure) => serializer.serialize_some(&failure.to_string()),
        None => serializer.serialize_none(),
    }
}
