use async_trait::async_trait;
use chrono::NaiveDate;
use digital_club_notifier::domain::delivery_failure::{DeliveryFailure, TransientKind};
use digital_club_notifier::domain::rsvp::{EventDetails, Rsvp};
use digital_club_notifier::mail_transport::MailTransport;
use digital_club_notifier::notification_dispatcher::NotificationDispatcher;
use digital_club_notifier::retry_policy::RetryPolicy;
use digital_club_notifier::transport_config::{SmsConfig, SmtpConfig, TransportConfig};
use lettre::Message;
use rand::Rng;
use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, TcpListener};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use test_context::AsyncTestContext;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCOUNT_SID: &str = "ACtest";
pub const AUTH_TOKEN: &str = "secret";
pub const FROM_NUMBER: &str = "+15005550006";
pub const BASIC_AUTHORIZATION: &str = "Basic QUN0ZXN0OnNlY3JldA==";
pub const FROM_ADDRESS: &str = "club@example.com";

#[allow(dead_code)]
pub struct TestContext {
    pub mock_server: MockServer,
    pub gateway_uri: String,
}

impl AsyncTestContext for TestContext {
    async fn setup() -> Self {
        let mock_server = Infrastructure::init_mock_server().await;
        let gateway_uri = mock_server.uri();

        Self { mock_server, gateway_uri }
    }
}

pub struct Infrastructure;

impl Infrastructure {
    async fn init_mock_server() -> MockServer {
        for _ in 1..10 {
            let port = rand::thread_rng().gen_range(51000..54000);
            let addr = SocketAddr::from(([127, 0, 0, 1], port));
            if let Ok(listener) = TcpListener::bind(addr) {
                return MockServer::builder().listener(listener).start().await;
            }
        }

        panic!("Failed to create mock server");
    }
}

/// Scripted SMTP stand-in: pops one outcome per delivery, then repeats `fallback`.
pub struct StubMailTransport {
    outcomes: Mutex<VecDeque<Result<(), DeliveryFailure>>>,
    fallback: Result<(), DeliveryFailure>,
    resolve_outcome: Result<Vec<IpAddr>, DeliveryFailure>,
    resolutions: AtomicU32,
    attempts: AtomicU32,
    delivered: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubMailTransport {
    pub fn succeeding() -> Arc<Self> {
        Self::scripted(vec![], Ok(()))
    }

    pub fn always_failing(failure: DeliveryFailure) -> Arc<Self> {
        Self::scripted(vec![], Err(failure))
    }

    pub fn scripted(
        outcomes: Vec<Result<(), DeliveryFailure>>,
        fallback: Result<(), DeliveryFailure>,
    ) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            fallback,
            resolve_outcome: Ok(vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]),
            resolutions: AtomicU32::new(0),
            attempts: AtomicU32::new(0),
            delivered: Mutex::new(vec![]),
        })
    }

    pub fn unresolvable() -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(VecDeque::new()),
            fallback: Ok(()),
            resolve_outcome: Err(StubFailures::transient(TransientKind::NameResolution)),
            resolutions: AtomicU32::new(0),
            attempts: AtomicU32::new(0),
            delivered: Mutex::new(vec![]),
        })
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn resolutions(&self) -> u32 {
        self.resolutions.load(Ordering::SeqCst)
    }

    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for StubMailTransport {
    fn endpoint(&self) -> String {
        "smtp.test:587".to_string()
    }

    async fn resolve(&self) -> Result<Vec<IpAddr>, DeliveryFailure> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        self.resolve_outcome.clone()
    }

    async fn deliver(
        &self,
        email: &Message,
    ) -> Result<(), DeliveryFailure> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        let outcome = self.outcomes.lock().unwrap().pop_front().unwrap_or(self.fallback.clone());
        if outcome.is_ok() {
            self.delivered.lock().unwrap().push(String::from_utf8_lossy(&email.formatted()).to_string());
        }

        outcome
    }
}

pub struct StubFailures;

#[allow(dead_code)]
impl StubFailures {
    pub fn transient(kind: TransientKind) -> DeliveryFailure {
        DeliveryFailure::transient(kind, "smtp.test:587", "stubbed failure")
    }

    pub fn authentication() -> DeliveryFailure {
        DeliveryFailure::Authentication {
            endpoint: "smtp.test:587".to_string(),
            detail: "535 5.7.8 Username and Password not accepted".to_string(),
        }
    }
}

pub struct DefaultData;

#[allow(dead_code)]
impl DefaultData {
    pub fn smtp_config() -> SmtpConfig {
        SmtpConfig::new(FROM_ADDRESS, "app-password").with_host("smtp.test", 587).with_from_address(FROM_ADDRESS)
    }

    pub fn sms_config(ctx: &TestContext) -> SmsConfig {
        SmsConfig::new(ACCOUNT_SID, AUTH_TOKEN, FROM_NUMBER).with_api_base_url(&ctx.gateway_uri)
    }

    pub fn email_dispatcher(transport: Arc<StubMailTransport>) -> NotificationDispatcher {
        let config = TransportConfig::new().with_smtp(Self::smtp_config()).with_base_url("https://club.example.com");

        NotificationDispatcher::new(config).unwrap().with_mail_transport(transport)
    }

    pub fn email_dispatcher_with_policy(
        transport: Arc<StubMailTransport>,
        retry_policy: RetryPolicy,
    ) -> NotificationDispatcher {
        let config = TransportConfig::new().with_smtp(Self::smtp_config()).with_retry_policy(retry_policy);

        NotificationDispatcher::new(config).unwrap().with_mail_transport(transport)
    }

    pub fn sms_dispatcher(ctx: &TestContext) -> NotificationDispatcher {
        NotificationDispatcher::new(TransportConfig::new().with_sms(Self::sms_config(ctx))).unwrap()
    }

    pub fn full_dispatcher(
        ctx: &TestContext,
        transport: Arc<StubMailTransport>,
    ) -> NotificationDispatcher {
        let config = TransportConfig::new().with_smtp(Self::smtp_config()).with_sms(Self::sms_config(ctx));

        NotificationDispatcher::new(config).unwrap().with_mail_transport(transport)
    }

    pub fn rsvp(phone: Option<&str>) -> Rsvp {
        Rsvp {
            full_name: "Asha Mwita".to_string(),
            email: "asha@example.com".to_string(),
            phone: phone.map(|phone| phone.to_string()),
            acceptance_code: Some("DC-4821".to_string()),
            event: EventDetails {
                title: "Rust Workshop".to_string(),
                event_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap().and_hms_opt(15, 30, 0).unwrap(),
                location: Some("ICT Lab 2".to_string()),
            },
        }
    }
}

pub struct SmsGatewayMock;

#[allow(dead_code)]
impl SmsGatewayMock {
    pub async fn created(
        ctx: &TestContext,
        to: &str,
    ) {
        Self::mock(ctx, to, ResponseTemplate::new(201).set_body_string(r#"{"sid":"SM123","status":"queued"}"#)).await;
    }

    pub async fn rejected(
        ctx: &TestContext,
        to: &str,
        status: u16,
        body: &str,
    ) {
        Self::mock(ctx, to, ResponseTemplate::new(status).set_body_string(body)).await;
    }

    async fn mock(
        ctx: &TestContext,
        to: &str,
        response: ResponseTemplate,
    ) {
        let encoded_to = to.replace('+', "%2B");

        Mock::given(method("POST"))
            .and(path(format!("/2010-04-01/Accounts/{ACCOUNT_SID}/Messages.json")))
            .and(header("authorization", BASIC_AUTHORIZATION))
            .and(body_string_contains(format!("To={encoded_to}")))
            .respond_with(response)
            .expect(1)
            .mount(&ctx.mock_server)
            .await;
    }

    pub async fn received_bodies(ctx: &TestContext) -> Vec<String> {
        ctx.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| String::from_utf8_lossy(&request.body).to_string())
            .collect()
    }
}
