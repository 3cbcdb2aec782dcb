// errors.rs
use crate::config::ConfigError;
use crate::inaturalist::FetchError;
use crate::mailer::SendError;
use std::process::ExitCode;

/// Anything that stops a run before the email goes out.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to send email: {0}")]
    Send(#[from] SendError),
}

impl RunError {
    /// An empty page is routine upstream sparsity, not an outage.
    pub fn is_soft(&self) -> bool {
        matches!(self, RunError::Fetch(FetchError::NoObservationFound))
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_soft() {
            ExitCode::from(2)
        } else {
            ExitCode::FAILURE
        }
    }
}
