use crate::domain::channel::Channel;

/// A single notification ready to be handed to a transport.
///
/// Built once per notification event and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    channel: Channel,
    destination: String,
    subject: Option<String>,
    body: String,
    is_markup: bool,
}

impl OutboundMessage {
    pub fn email(
        destination: &str,
        subject: &str,
        body: &str,
        is_markup: bool,
    ) -> Self {
        Self {
            channel: Channel::Email,
            destination: destination.trim().to_string(),
            subject: Some(subject.to_string()),
            body: body.to_string(),
            is_markup,
        }
    }

    pub fn sms(
        destination: &str,
        body: &str,
    ) -> Self {
        Self {
            channel: Channel::Sms,
            destination: destination.trim().to_string(),
            subject: None,
            body: body.to_string(),
            is_markup: false,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_markup(&self) -> bool {
        self.is_markup
    }
}
