use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use digital_club_notifier::error::NotifierError;
use serde_json::json;
use std::fmt;
use tracing::log::{error, info};

#[derive(Debug)]
pub struct AppError {
    pub status_code: StatusCode,
    pub cause: String,
    pub message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status_code.is_server_error() {
            error!("{}", self.cause);
        } else if self.status_code.is_client_error() {
            info!("{}", self.cause);
        }

        let body = Json(json!({
            "cause": self.cause,
            "message": self.message,
        }));

        (self.status_code, body).into_response()
    }
}

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.cause),
            None => write!(f, "{}", self.cause),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(inner: JsonRejection) -> Self {
        Self {
            status_code: inner.status(),
            cause: inner.to_string(),
            message: Some(inner.body_text()),
        }
    }
}

impl From<NotifierError> for AppError {
    fn from(inner: NotifierError) -> Self {
        Self {
            status_code: StatusCode::SERVICE_UNAVAILABLE,
            cause: inner.component().to_string(),
            message: Some(inner.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_notifier_error_to_service_unavailable() {
        let error = AppError::from(NotifierError::HttpClient("tls backend unavailable".to_string()));

        assert_eq!(StatusCode::SERVICE_UNAVAILABLE, error.status_code);
        assert_eq!("http_client", error.cause);
        assert_eq!("http_client: failed to build sms gateway http client: tls backend unavailable", error.to_string());
    }
}
