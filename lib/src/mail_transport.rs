use crate::domain::delivery_failure::{DeliveryFailure, TransientKind};
use crate::domain::outbound_message::OutboundMessage;
use crate::error::NotifierError;
use crate::transport_config::SmtpConfig;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::io;
use std::net::IpAddr;

/// SMTP reply codes meaning the server refused our credentials.
const AUTHENTICATION_REPLY_CODES: [&str; 3] = ["530", "534", "535"];

/// Seam between the email retry loop and the SMTP server.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// `host:port`, used in logs and failure descriptions.
    fn endpoint(&self) -> String;

    async fn resolve(&self) -> Result<Vec<IpAddr>, DeliveryFailure>;

    /// One full connect, STARTTLS, authenticate, transmit and quit cycle.
    async fn deliver(
        &self,
        email: &Message,
    ) -> Result<(), DeliveryFailure>;
}

pub struct SmtpMailTransport {
    host: String,
    port: u16,
    endpoint: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifierError> {
        let endpoint = config.endpoint();
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|error| NotifierError::SmtpTransport {
                endpoint: endpoint.clone(),
                detail: error.to_string(),
            })?
            .port(config.port)
            .credentials(Credentials::new(config.username.clone(), config.password.clone()))
            .timeout(Some(config.connect_timeout))
            .build();

        Ok(Self {
            host: config.host.clone(),
            port: config.port,
            endpoint,
            transport,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }

    async fn resolve(&self) -> Result<Vec<IpAddr>, DeliveryFailure> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map(|addresses| addresses.map(|address| address.ip()).collect())
            .map_err(|error| DeliveryFailure::transient(TransientKind::NameResolution, &self.endpoint, &error.to_string()))
    }

    async fn deliver(
        &self,
        email: &Message,
    ) -> Result<(), DeliveryFailure> {
        self.transport
            .send(email.clone())
            .await
            .map(|_| ())
            .map_err(|error| SmtpErrorFacts::from_error(&error).classify(&self.endpoint, &error.to_string()))
    }
}

/// Builds the MIME message: one text/plain or text/html part inside a multipart body.
pub fn compose_email(
    from_address: &str,
    message: &OutboundMessage,
) -> Result<Message, DeliveryFailure> {
    let from = from_address
        .parse::<Mailbox>()
        .map_err(|error| DeliveryFailure::InvalidMessage(format!("invalid sender address {from_address}: {error}")))?;
    let to = message
        .destination()
        .parse::<Mailbox>()
        .map_err(|error| DeliveryFailure::InvalidMessage(format!("invalid recipient address {}: {error}", message.destination())))?;

    let part = if message.is_markup() {
        SinglePart::html(message.body().to_string())
    } else {
        SinglePart::plain(message.body().to_string())
    };

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject().unwrap_or_default())
        .multipart(MultiPart::mixed().singlepart(part))
        .map_err(|error| DeliveryFailure::InvalidMessage(error.to_string()))
}

/// What a lettre SMTP error tells us about the failed attempt.
#[derive(Debug, Default, Clone, PartialEq)]
struct SmtpErrorFacts {
    permanent: bool,
    reply_code: Option<String>,
    io_kind: Option<io::ErrorKind>,
    lookup_failed: bool,
    timeout: bool,
}

impl SmtpErrorFacts {
    fn from_error(error: &lettre::transport::smtp::Error) -> Self {
        let io_error = io_source(error);

        Self {
            permanent: error.is_permanent(),
            reply_code: error.status().map(|code| code.to_string()),
            io_kind: io_error.map(io::Error::kind),
            lookup_failed: io_error.is_some_and(is_lookup_failure),
            timeout: error.is_timeout(),
        }
    }

    /// Only a permanent reply carrying an authentication code is fatal; everything else stays retryable.
    fn classify(
        &self,
        endpoint: &str,
        detail: &str,
    ) -> DeliveryFailure {
        if self.permanent && self.reply_code.as_deref().is_some_and(|code| AUTHENTICATION_REPLY_CODES.contains(&code)) {
            return DeliveryFailure::Authentication {
                endpoint: endpoint.to_string(),
                detail: detail.to_string(),
            };
        }

        let kind = match self.io_kind {
            Some(io::ErrorKind::ConnectionRefused) => TransientKind::ConnectionRefused,
            Some(io::ErrorKind::TimedOut) => TransientKind::ConnectionTimeout,
            Some(_) if self.lookup_failed => TransientKind::NameResolution,
            Some(_) => TransientKind::Io,
            None if self.timeout => TransientKind::ConnectionTimeout,
            None => TransientKind::Protocol,
        };

        DeliveryFailure::transient(kind, endpoint, detail)
    }
}

/// Resolver failures have no stable `io::ErrorKind`: `NotFound` covers some platforms,
/// the getaddrinfo message covers the rest.
fn is_lookup_failure(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::NotFound || error.to_string().contains("lookup address")
}

fn io_source<'a>(error: &'a (dyn std::error::Error + 'static)) -> Option<&'a io::Error> {
    let mut current = Some(error);

    while let Some(error) = current {
        if let Some(io_error) = error.downcast_ref::<io::Error>() {
            return Some(io_error);
        }
        current = error.source();
    }

    None
}
