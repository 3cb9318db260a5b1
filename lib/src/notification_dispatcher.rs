use crate::domain::channel::Channel;
use crate::domain::club_member::ClubMember;
use crate::domain::delivery_failure::DeliveryFailure;
use crate::domain::delivery_result::DeliveryResult;
use crate::domain::outbound_message::OutboundMessage;
use crate::domain::rsvp::{Rsvp, RsvpDecision, RsvpNotificationResult};
use crate::email_notification_service::EmailNotificationService;
use crate::error::NotifierError;
use crate::http_gateway::HttpGateway;
use crate::mail_transport::{MailTransport, SmtpMailTransport};
use crate::sms_notification_service::SmsNotificationService;
use crate::templates::{NotificationTemplates, RenderedEmail};
use crate::transport_config::TransportConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use tracing::log::{info, warn};

/// Entry point for every club notification.
///
/// Holds an immutable configuration snapshot. Cloning is cheap, so handlers can
/// each keep their own copy. None of the send operations fail: outcomes are
/// returned as [`DeliveryResult`] values.
#[derive(Clone)]
pub struct NotificationDispatcher {
    config: Arc<TransportConfig>,
    mail_transport: Option<Arc<dyn MailTransport>>,
    http_gateway: HttpGateway,
}

impl NotificationDispatcher {
    pub fn new(config: TransportConfig) -> Result<Self, NotifierError> {
        let mail_transport = match &config.smtp {
            Some(smtp) => Some(Arc::new(SmtpMailTransport::new(smtp)?) as Arc<dyn MailTransport>),
            None => None,
        };

        let request_timeout = config.sms.as_ref().map(|sms| sms.request_timeout).unwrap_or(Duration::from_secs(10));
        let http_gateway = HttpGateway::new(request_timeout)?;

        info!(
            "Notification dispatcher ready (email: {}, sms: {})",
            if config.smtp.is_some() { "enabled" } else { "disabled" },
            if config.sms.is_some() { "enabled" } else { "disabled" }
        );

        Ok(Self {
            config: Arc::new(config),
            mail_transport,
            http_gateway,
        })
    }

    /// Replaces the SMTP transport. The email channel still requires SMTP credentials in the config.
    pub fn with_mail_transport(
        self,
        mail_transport: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            config: self.config,
            mail_transport: Some(mail_transport),
            http_gateway: self.http_gateway,
        }
    }

    pub async fn send_email(
        &self,
        destination: &str,
        subject: &str,
        body: &str,
        is_markup: bool,
    ) -> DeliveryResult {
        self.send(&OutboundMessage::email(destination, subject, body, is_markup)).await
    }

    pub async fn send_sms(
        &self,
        destination: &str,
        body: &str,
    ) -> DeliveryResult {
        self.send(&OutboundMessage::sms(destination, body)).await
    }

    pub async fn send(
        &self,
        message: &OutboundMessage,
    ) -> DeliveryResult {
        match message.channel() {
            Channel::Email => {
                let (Some(smtp), Some(transport)) = (&self.config.smtp, &self.mail_transport) else {
                    warn!("SMTP credentials not configured. Email not sent.");
                    return DeliveryResult::not_configured(Channel::Email, message.destination());
                };

                EmailNotificationService::send(transport.as_ref(), &smtp.from_address, &self.config.retry_policy, message).await
            },
            Channel::Sms => {
                let Some(sms) = &self.config.sms else {
                    warn!("Twilio credentials not configured. SMS not sent.");
                    return DeliveryResult::not_configured(Channel::Sms, message.destination());
                };

                SmsNotificationService::send(&self.http_gateway, sms, message).await
            },
        }
    }

    /// Email always goes out; SMS only when the RSVP has a phone number.
    #[instrument(skip_all, name = "send_event_rsvp_notification", fields(decision = %decision))]
    pub async fn send_event_rsvp_notification(
        &self,
        rsvp: &Rsvp,
        decision: RsvpDecision,
    ) -> RsvpNotificationResult {
        let messages = NotificationTemplates::rsvp(rsvp, decision);

        let email_result = self.send_email(&rsvp.email, &messages.email.subject, &messages.email.body, false).await;

        let sms_result = match rsvp.contact_phone() {
            Some(phone) => self.send_sms(phone, &messages.sms_body).await,
            None => DeliveryResult::not_attempted(Channel::Sms, ""),
        };

        RsvpNotificationResult {
            email_result,
            sms_result,
            email_address: rsvp.email.clone(),
            phone_number: rsvp.contact_phone().map(str::to_string),
        }
    }

    pub async fn send_user_approval_email(
        &self,
        member: &ClubMember,
    ) -> DeliveryResult {
        let Some(email) = member.contact_email() else {
            return Self::missing_email("Approved user is missing email address");
        };

        let rendered = NotificationTemplates::user_approval(member, &self.config.base_url);
        self.send_rendered(email, rendered).await
    }

    pub async fn send_admin_promotion_email(
        &self,
        member: &ClubMember,
        promoted_by: Option<&ClubMember>,
    ) -> DeliveryResult {
        let Some(email) = member.contact_email() else {
            return Self::missing_email("Promoted user is missing email address");
        };

        let rendered = NotificationTemplates::admin_promotion(member, promoted_by, &self.config.base_url);
        self.send_rendered(email, rendered).await
    }

    async fn send_rendered(
        &self,
        destination: &str,
        rendered: RenderedEmail,
    ) -> DeliveryResult {
        self.send_email(destination, &rendered.subject, &rendered.body, false).await
    }

    fn missing_email(reason: &str) -> DeliveryResult {
        warn!("{reason}");
        DeliveryResult::failed(Channel::Email, "", 0, DeliveryFailure::InvalidMessage(reason.to_string()))
    }
}
