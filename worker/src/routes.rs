use crate::controller::health::routes::HealthRoutes;
use crate::controller::notification::routes::NotificationRoutes;
use crate::state::AppState;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;

pub struct Routes;

impl Routes {
    pub fn routes(app_state: &AppState) -> Router {
        Router::new()
            .nest("/health", HealthRoutes::routes())
            .nest("/notifications", NotificationRoutes::routes(app_state.clone()))
            .layer(CatchPanicLayer::new())
    }
}
