use thiserror::Error;

/// Raised while wiring the notifier together. Send operations never return it;
/// delivery problems are reported through
/// [`crate::domain::delivery_result::DeliveryResult`].
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("failed to build smtp transport for {endpoint}: {detail}")]
    SmtpTransport { endpoint: String, detail: String },
    #[error("failed to build sms gateway http client: {0}")]
    HttpClient(String),
}

impl NotifierError {
    /// Short machine-readable name of the failing component.
    pub fn component(&self) -> &'static str {
        match self {
            NotifierError::SmtpTransport { .. } => "smtp_transport",
            NotifierError::HttpClient(_) => "http_client",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_smtp_transport_failure_with_endpoint() {
        let error = NotifierError::SmtpTransport {
            endpoint: "smtp.example.com:587".to_string(),
            detail: "invalid domain".to_string(),
        };

        assert_eq!("failed to build smtp transport for smtp.example.com:587: invalid domain", error.to_string());
        assert_eq!("smtp_transport", error.component());
    }

    #[test]
    fn names_http_client_component() {
        assert_eq!("http_client", NotifierError::HttpClient("tls backend unavailable".to_string()).component());
    }
}
