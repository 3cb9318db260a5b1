pub mod domain {
    pub mod channel;
    pub mod club_member;
    pub mod delivery_failure;
    pub mod delivery_result;
    pub mod outbound_message;
    pub mod rsvp;
}

pub mod email_notification_service;
pub mod environment;
pub mod error;
pub mod http_gateway;
pub mod mail_transport;
pub mod notification_dispatcher;
pub mod phone_number;
pub mod retry_policy;
pub mod shutdown;
pub mod sms_notification_service;
pub mod templates;
pub mod transport_config;
