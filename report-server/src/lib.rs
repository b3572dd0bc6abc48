pub mod config;
pub mod error;
pub mod logo;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health_check))
        .route("/pdf/users-report", get(routes::users_report))
        .route("/pdf/invoice", get(routes::invoice))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
