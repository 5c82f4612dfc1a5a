use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::external::price_provider::{FetchWindow, PriceProvider, PriceProviderError};
use crate::models::PricePoint;
use crate::services::predictor;
use crate::store::{sanitize_symbol, SeriesSource, SeriesStore};

/// Per-symbol mutexes guarding the load-merge-predict-persist sequence.
/// Without this, two concurrent syncs for one symbol race on the series
/// file and the earlier writer's points are silently lost.
#[derive(Default)]
pub struct SymbolLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SymbolLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, symbol: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(sanitize_symbol(symbol))
            .or_default()
            .clone()
    }
}

/// Returns an up-to-date series for `symbol`, fetching from the provider
/// only when needed.
///
/// With local data present and `force_sync` false this is a pure read.
/// Otherwise new observations past the last known date are appended, the
/// walk-forward predictions are recomputed over the whole series, and the
/// result is persisted. A fetch failure is non-fatal whenever stale local
/// data exists.
pub async fn get_series(
    store: &SeriesStore,
    provider: &dyn PriceProvider,
    locks: &SymbolLocks,
    symbol: &str,
    force_sync: bool,
) -> Result<Vec<PricePoint>, AppError> {
    let lock = locks.lock_for(symbol);
    let _guard = lock.lock().await;

    let loaded = store.load(symbol);
    if loaded.source == SeriesSource::Recovered {
        warn!("Local series for {} was corrupt; starting over from empty", symbol);
    }
    let local = loaded.points;

    if !force_sync && !local.is_empty() {
        info!("Returning {} local points for {} without syncing", local.len(), symbol);
        return Ok(local);
    }

    let last_date = local.last().map(|p| p.date);
    let window = if local.is_empty() {
        FetchWindow::LastMonth
    } else {
        FetchWindow::LastWeek
    };

    let fetched = match provider.fetch_daily_history(symbol, window).await {
        Ok(points) => points,
        Err(e) if !local.is_empty() => {
            // Stale data beats no data.
            warn!("Fetch failed for {} ({}); falling back to {} local points", symbol, e, local.len());
            return Ok(local);
        }
        Err(PriceProviderError::RateLimited) => return Err(AppError::RateLimited),
        Err(e) => return Err(AppError::External(e.to_string())),
    };

    if fetched.is_empty() && local.is_empty() {
        return Err(AppError::NotFound(format!(
            "Symbol {} not found or no data available",
            symbol
        )));
    }

    // Only observations strictly past the last known date are new; the
    // provider is trusted to return date-unique ascending observations.
    let new_points: Vec<PricePoint> = fetched
        .into_iter()
        .filter(|p| last_date.map_or(true, |last| p.date > last))
        .map(|p| PricePoint::from_observation(p.date, p.close))
        .collect();

    if new_points.is_empty() {
        info!("No new observations for {}; keeping {} local points", symbol, local.len());
        return Ok(local);
    }

    info!("Fetched {} new observations for {}", new_points.len(), symbol);

    let mut merged = local;
    merged.extend(new_points);
    predictor::recompute_predictions(&mut merged);

    store.save(symbol, &merged)?;

    Ok(merged)
}
