use crate::infra::error::AppError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use digital_club_notifier::domain::delivery_result::DeliveryResult;
use digital_club_notifier::domain::rsvp::{Rsvp, RsvpDecision, RsvpNotificationResult};
use serde::Deserialize;
use tracing::log::info;

pub struct NotificationRoutes;

impl NotificationRoutes {
    pub fn routes(app_state: AppState) -> Router {
        Router::new()
            .route("/email", post(send_email))
            .route("/sms", post(send_sms))
            .route("/rsvp", post(send_rsvp))
            .with_state(app_state)
    }
}

#[derive(Deserialize, Debug)]
pub struct EmailRequest {
    pub destination: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub is_markup: bool,
}

#[derive(Deserialize, Debug)]
pub struct SmsRequest {
    pub destination: String,
    pub body: String,
}

#[derive(Deserialize, Debug)]
pub struct RsvpRequest {
    pub rsvp: Rsvp,
    pub decision: RsvpDecision,
}

async fn send_email(
    State(app_state): State<AppState>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<DeliveryResult>, AppError> {
    let Json(request) = payload?;
    let result = app_state.dispatcher.send_email(&request.destination, &request.subject, &request.body, request.is_markup).await;

    info!("Email to {} finished with succeeded={} after {} attempt(s)", result.destination, result.succeeded, result.attempts);

    Ok(Json(result))
}

async fn send_sms(
    State(app_state): State<AppState>,
    payload: Result<Json<SmsRequest>, JsonRejection>,
) -> Result<Json<DeliveryResult>, AppError> {
    let Json(request) = payload?;
    let result = app_state.dispatcher.send_sms(&request.destination, &request.body).await;

    info!("Sms to {} finished with succeeded={}", result.destination, result.succeeded);

    Ok(Json(result))
}

async fn send_rsvp(
    State(app_state): State<AppState>,
    payload: Result<Json<RsvpRequest>, JsonRejection>,
) -> Result<Json<RsvpNotificationResult>, AppError> {
    let Json(request) = payload?;
    let result = app_state.dispatcher.send_event_rsvp_notification(&request.rsvp, request.decision).await;

    Ok(Json(result))
}
