mod insight;
mod price_point;

pub use insight::{InsightRequest, InsightResponse, Sentiment, StockDataPoint};
pub use price_point::PricePoint;
