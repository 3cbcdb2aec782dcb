use crate::config::Config;
use crate::errors::RunError;
use crate::observability::{init_tracing, LogFormat};
use std::process::ExitCode;

mod config;
mod errors;
mod inaturalist;
mod mailer;
mod observability;
mod pipeline;
mod templates;

#[cfg(test)]
mod tests;

fn main() -> ExitCode {
    // A .env next to the binary is optional; real deployments set the vars directly.
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::from_env());

    tracing::info!("starting Moth Mailer");

    let result = Config::from_env()
        .map_err(RunError::from)
        .and_then(|config| pipeline::run(&config, &mut rand::thread_rng()));

    match result {
        Ok(receipt) => {
            tracing::info!(id = %receipt.id, "email sent successfully");
            ExitCode::SUCCESS
        }
        Err(err) if err.is_soft() => {
            tracing::warn!("{err}; no email sent, the next run will try again");
            err.exit_code()
        }
        Err(err) => {
            tracing::error!("{err}");
            err.exit_code()
        }
    }
}
