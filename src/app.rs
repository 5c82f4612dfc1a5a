use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::routes::{health, insight, series};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .route("/", get(root))
        .nest("/health", health::router())
        .nest("/api/series", series::router())
        .nest("/api/insight", insight::router())
        // The browser frontend is served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "TickerPredict backend is running. Access /api/series/:symbol for data."
}
