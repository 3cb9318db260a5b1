use crate::domain::channel::Channel;
use crate::domain::delivery_result::DeliveryResult;
use crate::domain::outbound_message::OutboundMessage;
use crate::mail_transport::{compose_email, MailTransport};
use crate::retry_policy::RetryPolicy;
use tracing::instrument;
use tracing::log::{debug, error, info, warn};

pub struct EmailNotificationService;

impl EmailNotificationService {
    /// Delivers one email, retrying transient failures per `retry_policy`.
    ///
    /// Authentication and malformed-message failures end the loop at once.
    /// Every outcome is reported in the returned [`DeliveryResult`].
    #[instrument(skip_all, name = "send_email")]
    pub async fn send(
        transport: &dyn MailTransport,
        from_address: &str,
        retry_policy: &RetryPolicy,
        message: &OutboundMessage,
    ) -> DeliveryResult {
        let destination = message.destination();

        let email = match compose_email(from_address, message) {
            Ok(email) => email,
            Err(failure) => {
                error!("Failed to send email to {destination}: {failure}");
                return DeliveryResult::failed(Channel::Email, destination, 0, failure);
            },
        };

        let endpoint = transport.endpoint();
        match transport.resolve().await {
            Ok(addresses) => debug!("Resolved {endpoint} to {addresses:?}"),
            Err(failure) => warn!("DNS resolution issue for {endpoint}, proceeding with hostname: {failure}"),
        }

        let max_attempts = retry_policy.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let failure = match transport.deliver(&email).await {
                Ok(()) => {
                    info!("Email sent successfully to {destination} on attempt {attempt}/{max_attempts}");
                    return DeliveryResult::delivered(Channel::Email, destination, attempt);
                },
                Err(failure) => failure,
            };

            if !failure.is_retryable() {
                error!("Failed to send email to {destination}: {failure}");
                return DeliveryResult::failed(Channel::Email, destination, attempt, failure);
            }

            if !retry_policy.has_attempts_left(attempt) {
                error!("Failed to send email to {destination} after {attempt} attempts. Last error: {failure}");
                return DeliveryResult::failed(Channel::Email, destination, attempt, failure);
            }

            let delay = retry_policy.delay_after(attempt);
            warn!("Email send attempt {attempt}/{max_attempts} failed: {failure}. Retrying in {}s...", delay.as_secs_f32());
            tokio::time::sleep(delay).await;
        }
    }
}
