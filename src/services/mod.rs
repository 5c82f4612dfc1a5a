pub mod insight_service;
pub mod predictor;
pub mod sync_service;
