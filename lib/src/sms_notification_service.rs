use crate::domain::channel::Channel;
use crate::domain::delivery_failure::{DeliveryFailure, TransientKind};
use crate::domain::delivery_result::DeliveryResult;
use crate::domain::outbound_message::OutboundMessage;
use crate::http_gateway::HttpGateway;
use crate::phone_number::PhoneNumber;
use crate::transport_config::SmsConfig;
use reqwest::StatusCode;
use tracing::instrument;
use tracing::log::{error, info};

pub struct SmsNotificationService;

impl SmsNotificationService {
    /// Single POST to the Twilio-style messages endpoint. Only `201 Created` counts as sent.
    #[instrument(skip_all, name = "send_sms")]
    pub async fn send(
        http_gateway: &HttpGateway,
        config: &SmsConfig,
        message: &OutboundMessage,
    ) -> DeliveryResult {
        let destination = message.destination();

        let Some(phone_number) = PhoneNumber::normalize(destination, &config.country_prefix) else {
            let failure = DeliveryFailure::InvalidMessage(format!("phone number {destination:?} has no digits"));
            error!("Failed to send SMS to {destination}: {failure}");
            return DeliveryResult::failed(Channel::Sms, destination, 0, failure);
        };

        let to = format!("+{phone_number}");
        let form = [("From", config.from_number.as_str()), ("To", to.as_str()), ("Body", message.body())];

        let result = http_gateway
            .client
            .post(config.messages_url())
            .basic_auth(&config.account_sid, Some(&config.auth_token))
            .form(&form)
            .send()
            .await;

        match result {
            Ok(response) if response.status() == StatusCode::CREATED => {
                info!("SMS sent successfully to {phone_number}");
                DeliveryResult::delivered(Channel::Sms, destination, 1)
            },
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or("unknown".to_string());
                error!("Failed to send SMS to {phone_number} with status {status} and body {body}");
                DeliveryResult::failed(Channel::Sms, destination, 1, DeliveryFailure::ProviderRejected { status, body })
            },
            Err(error) => {
                let failure = classify_http_error(&config.api_base_url, &error);
                error!("Failed to send SMS to {phone_number}: {failure}");
                DeliveryResult::failed(Channel::Sms, destination, 1, failure)
            },
        }
    }
}

fn classify_http_error(
    endpoint: &str,
    error: &reqwest_middleware::Error,
) -> DeliveryFailure {
    let kind = match error {
        reqwest_middleware::Error::Reqwest(error) if error.is_timeout() => TransientKind::ConnectionTimeout,
        reqwest_middleware::Error::Reqwest(error) if error.is_connect() => TransientKind::ConnectionRefused,
        reqwest_middleware::Error::Reqwest(error) if error.is_request() || error.is_body() => TransientKind::Io,
        _ => TransientKind::Protocol,
    };

    DeliveryFailure::transient(kind, endpoint, &error.to_string())
}
