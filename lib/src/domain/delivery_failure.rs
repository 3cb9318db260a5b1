use crate::domain::channel::Channel;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure classes a transport can report back to the dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryFailure {
    #[error("{0} channel not configured")]
    ConfigurationMissing(Channel),

    #[error("{kind} on {endpoint} - {detail}")]
    Transient {
        kind: TransientKind,
        endpoint: String,
        detail: String,
    },

    #[error("authentication rejected by {endpoint} - {detail}")]
    Authentication {
        endpoint: String,
        detail: String,
    },

    #[error("provider rejected message with status {status} - {body}")]
    ProviderRejected {
        status: u16,
        body: String,
    },

    #[error("invalid message - {0}")]
    InvalidMessage(String),
}

impl DeliveryFailure {
    pub fn transient(
        kind: TransientKind,
        endpoint: &str,
        detail: &str,
    ) -> Self {
        Self::Transient {
            kind,
            endpoint: endpoint.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Only transient infrastructure failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransientKind {
    NameResolution,
    ConnectionTimeout,
    ConnectionRefused,
    Io,
    Protocol,
}

impl fmt::Display for TransientKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let label = match self {
            TransientKind::NameResolution => "DNS resolution error",
            TransientKind::ConnectionTimeout => "Connection timeout",
            TransientKind::ConnectionRefused => "Connection refused (port may be blocked)",
            TransientKind::Io => "Network/OS error",
            TransientKind::Protocol => "Protocol error",
        };
        write!(f, "{label}")
    }
}
