use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use crate::models::{InsightRequest, InsightResponse};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(market_insight))
}

pub async fn market_insight(
    State(state): State<AppState>,
    Json(request): Json<InsightRequest>,
) -> Json<InsightResponse> {
    info!("POST /api/insight - Generating insight for {}", request.ticker);
    let response = services::insight_service::market_insight(&state.insight, &request).await;
    Json(response)
}
