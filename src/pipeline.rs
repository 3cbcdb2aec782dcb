// pipeline.rs
use crate::config::Config;
use crate::errors::RunError;
use crate::inaturalist::ObservationFetcher;
use crate::mailer::{DeliveryReceipt, ResendMailer};
use crate::templates::render_email;
use rand::Rng;
use reqwest::blocking::Client;

const USER_AGENT: &str = "MothMailer/1.0 (hourly-moth-appreciation-project)";

/// Fetch one moth, render it, send it. Runs exactly once; no step is retried.
pub fn run<R: Rng>(config: &Config, rng: &mut R) -> Result<DeliveryReceipt, RunError> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;

    tracing::info!("fetching random moth from iNaturalist");
    let fetcher = ObservationFetcher::new(client.clone(), config.inaturalist_api.clone());
    let moth = fetcher.fetch_random_observation(&config.filter, rng)?;
    tracing::info!(
        id = %moth.identifier,
        common_name = moth.common_name.as_deref().unwrap_or("-"),
        scientific_name = %moth.scientific_name,
        "found observation"
    );

    let email = render_email(&moth);

    tracing::info!(recipient = %config.recipient_email, subject = %email.subject, "sending email");
    let mailer = ResendMailer::new(
        client,
        config.resend_api_key.clone(),
        config.resend_api.clone(),
    );
    let receipt = mailer.send_email(&config.sender_email, &config.recipient_email, &email)?;

    Ok(receipt)
}
