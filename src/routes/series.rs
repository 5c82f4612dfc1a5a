use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::PricePoint;
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:symbol", get(get_series))
}

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    #[serde(default)]
    sync: bool,
}

pub async fn get_series(
    Path(symbol): Path<String>,
    Query(query): Query<SeriesQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<PricePoint>>, AppError> {
    info!("GET /api/series/{} sync={} - Getting price series", symbol, query.sync);
    let series = services::sync_service::get_series(
        &state.store,
        state.price_provider.as_ref(),
        &state.sync_locks,
        &symbol,
        query.sync,
    )
    .await
    .map_err(|e| {
        error!("Failed to get series for {}: {}", symbol, e);
        e
    })?;
    Ok(Json(series))
}
