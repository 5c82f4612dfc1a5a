use crate::external::price_provider::{
    ExternalPricePoint, FetchWindow, PriceProvider, PriceProviderError,
};
use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use std::time::Duration;

pub struct YahooProvider {
    client: reqwest::Client,
}

impl YahooProvider {
    pub fn new() -> Self {
        // A hung provider call must surface as a fetch failure, not stall
        // the request forever.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Vec<Option<f64>>,
}

#[async_trait]
impl PriceProvider for YahooProvider {
    async fn fetch_daily_history(
        &self,
        symbol: &str,
        window: FetchWindow,
    ) -> Result<Vec<ExternalPricePoint>, PriceProviderError> {
        let range = match window {
            FetchWindow::LastMonth => "1mo",
            FetchWindow::LastWeek => "5d",
        };

        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{symbol}?range={range}&interval=1d"
        );

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PriceProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceProviderError::RateLimited);
        }

        let body = resp
            .json::<YahooChartResponse>()
            .await
            .map_err(|e| PriceProviderError::Parse(e.to_string()))?;

        let result = body
            .chart
            .result
            .and_then(|mut r| r.pop())
            .ok_or_else(|| PriceProviderError::BadResponse("missing result".into()))?;

        // An unknown symbol comes back with a result shell but no bars.
        let timestamps = result.timestamp.unwrap_or_default();

        // timestamp aligns with close list by index
        let closes = result
            .indicators
            .quote
            .first()
            .ok_or_else(|| PriceProviderError::BadResponse("missing quote".into()))?
            .close
            .clone();

        let mut out = Vec::new();

        for (i, ts) in timestamps.iter().enumerate() {
            // skip missing closes
            let Some(close) = closes.get(i).and_then(|v| *v) else {
                continue;
            };

            let dt = DateTime::from_timestamp(*ts, 0)
                .ok_or_else(|| PriceProviderError::Parse("bad timestamp".into()))?;

            out.push(ExternalPricePoint {
                date: dt.date_naive(),
                close,
            });
        }

        // Ascending and one bar per calendar day; the last daily bar can be
        // duplicated intraday.
        out.sort_by_key(|p| p.date);
        out.dedup_by_key(|p| p.date);

        Ok(out)
    }
}
