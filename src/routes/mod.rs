pub(crate) mod health;
pub(crate) mod insight;
pub(crate) mod series;
