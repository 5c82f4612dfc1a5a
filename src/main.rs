use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use tickerpredict_backend::external::yahoo::YahooProvider;
use tickerpredict_backend::services::insight_service::InsightHandle;
use tickerpredict_backend::services::sync_service::SymbolLocks;
use tickerpredict_backend::state::AppState;
use tickerpredict_backend::store::SeriesStore;
use tickerpredict_backend::{app, logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(logging::LoggingConfig::from_env());

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let store = SeriesStore::new(&data_dir)?;
    tracing::info!("📈 Persisting price series under {}/", data_dir);

    let state = AppState {
        store,
        price_provider: Arc::new(YahooProvider::new()),
        sync_locks: Arc::new(SymbolLocks::new()),
        insight: Arc::new(InsightHandle::new()),
    };
    let app = app::create_app(state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let addr: SocketAddr = bind_addr.parse()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 TickerPredict backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
