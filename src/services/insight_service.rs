use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::info;

use crate::models::{InsightRequest, InsightResponse, Sentiment};

/// Seam for the text-generation collaborator. The production generator is
/// a local template model; a hosted model slots in behind the same trait.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> String;
}

/// Owns the generator and initializes it once, on first use. Handlers
/// borrow this from application state instead of reaching for a global.
#[derive(Default)]
pub struct InsightHandle {
    generator: OnceCell<Arc<dyn InsightGenerator>>,
}

impl InsightHandle {
    pub fn new() -> Self {
        Self::default()
    }

    async fn generator(&self) -> &Arc<dyn InsightGenerator> {
        self.generator
            .get_or_init(|| async {
                info!("Initializing insight generator");
                Arc::new(TemplateGenerator) as Arc<dyn InsightGenerator>
            })
            .await
    }
}

/// Continues the report prompt with a canned commentary keyed off the
/// trend direction embedded in the prompt.
struct TemplateGenerator;

#[async_trait]
impl InsightGenerator for TemplateGenerator {
    async fn generate(&self, prompt: &str) -> String {
        let commentary = if prompt.contains("trending UP") {
            "momentum remains constructive, with sustained buying interest \
             pointing to further growth if volume holds."
        } else {
            "selling pressure has dominated recent sessions, and a further \
             drop cannot be ruled out while the downtrend persists."
        };
        format!("{prompt} {commentary}")
    }
}

pub async fn market_insight(handle: &InsightHandle, request: &InsightRequest) -> InsightResponse {
    let prices: Vec<f64> = request.data.iter().map(|d| d.price).collect();

    let (Some(&start_price), Some(&current_price)) = (prices.first(), prices.last()) else {
        return InsightResponse {
            analysis: "No data.".to_string(),
            sentiment: Sentiment::Neutral,
            recommendation: "None".to_string(),
        };
    };

    let trend = if current_price - start_price > 0.0 { "UP" } else { "DOWN" };

    let prompt = format!(
        "Stock Market Report for {}.\n\
         The stock price is currently ${:.2}, trending {}.\n\
         Market analysis indicates that",
        request.ticker, current_price, trend
    );

    let analysis = handle.generator().await.generate(&prompt).await;
    let sentiment = classify_sentiment(&analysis);

    InsightResponse {
        analysis,
        sentiment,
        recommendation: "Based on the generated analysis, please trade with caution.".to_string(),
    }
}

/// Keyword heuristic over the generated text; the generator's wording, not
/// the price series, decides the label.
pub fn classify_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();

    const BULLISH: [&str; 5] = ["growth", "increase", "bull", "buy", "record"];
    const BEARISH: [&str; 5] = ["decrease", "drop", "bear", "sell", "loss"];

    if BULLISH.iter().any(|w| lower.contains(w)) {
        Sentiment::Bullish
    } else if BEARISH.iter().any(|w| lower.contains(w)) {
        Sentiment::Bearish
    } else {
        Sentiment::Neutral
    }
}
