mod fetch_error;
mod fetcher;
mod models;

pub use fetch_error::FetchError;
pub use fetcher::{FilterConfig, ObservationFetcher, QualityGrade};
pub use models::Observation;
