use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ExternalPricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// How far back a history fetch should reach. A cold start pulls a broad
/// window; a warm sync only needs the last few trading days, on the
/// assumption that syncs happen frequently enough to overlap the last
/// known date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchWindow {
    LastMonth,
    LastWeek,
}

#[derive(Debug, Error)]
pub enum PriceProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches `(date, close)` observations for `symbol` over the window,
    /// ordered ascending by date, one observation per calendar day.
    async fn fetch_daily_history(
        &self,
        symbol: &str,
        window: FetchWindow,
    ) -> Result<Vec<ExternalPricePoint>, PriceProviderError>;
}
