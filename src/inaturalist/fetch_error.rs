#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no moth observations found")]
    NoObservationFound,

    #[error("iNaturalist unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("malformed iNaturalist response: {0}")]
    MalformedResponse(String),
}
