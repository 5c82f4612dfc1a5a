mod series_store;

pub use series_store::{sanitize_symbol, LoadedSeries, SeriesSource, SeriesStore};
