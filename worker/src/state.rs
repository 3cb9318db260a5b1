use crate::infra::error::AppError;
use digital_club_notifier::notification_dispatcher::NotificationDispatcher;
use digital_club_notifier::transport_config::TransportConfig;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: NotificationDispatcher,
}

impl AppState {
    pub fn new(config: TransportConfig) -> Result<Self, AppError> {
        let dispatcher = NotificationDispatcher::new(config)?;

        Ok(Self { dispatcher })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(TransportConfig::from_env())
    }
}
