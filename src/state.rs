use std::sync::Arc;

use crate::external::price_provider::PriceProvider;
use crate::services::insight_service::InsightHandle;
use crate::services::sync_service::SymbolLocks;
use crate::store::SeriesStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SeriesStore,
    pub price_provider: Arc<dyn PriceProvider>,
    pub sync_locks: Arc<SymbolLocks>,
    pub insight: Arc<InsightHandle>,
}
