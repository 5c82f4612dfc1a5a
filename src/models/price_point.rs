use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// One observation in a symbol's historical series. `prediction` is the
// walk-forward estimate for this date, absent for the first two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub id: String,
    pub date: NaiveDate,
    pub price: f64,
    pub prediction: Option<f64>,
}

impl PricePoint {
    /// Builds a fresh point from a provider observation. The id is the unix
    /// timestamp of the observation date at midnight UTC, so it is stable
    /// across re-fetches of the same calendar day.
    pub fn from_observation(date: NaiveDate, price: f64) -> Self {
        let id = date.and_time(NaiveTime::MIN).and_utc().timestamp().to_string();
        Self {
            id,
            date,
            price,
            prediction: None,
        }
    }
}
