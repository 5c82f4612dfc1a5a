use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct StockDataPoint {
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightRequest {
    pub ticker: String,
    pub data: Vec<StockDataPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightResponse {
    pub analysis: String,
    pub sentiment: Sentiment,
    pub recommendation: String,
}
