// src/mailer.rs

use crate::templates::RenderedEmail;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("request to Resend failed: {0}")]
    Request(String),

    #[error("Resend API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unreadable Resend receipt: {0}")]
    MalformedReceipt(String),
}

/// Proof that Resend accepted the message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
}

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ResendErrorBody {
    message: String,
}

pub struct ResendMailer {
    api_key: String,
    base_url: Url,
    client: Client,
}

impl ResendMailer {
    pub fn new(client: Client, api_key: String, base_url: Url) -> Self {
        Self {
            api_key,
            base_url,
            client,
        }
    }

    /// One POST, no retries. The next scheduled run is the retry.
    pub fn send_email(
        &self,
        sender_email: &str,
        recipient_email: &str,
        email: &RenderedEmail,
    ) -> Result<DeliveryReceipt, SendError> {
        let payload = ResendPayload {
            from: sender_email,
            to: [recipient_email],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let endpoint = format!("{}/emails", self.base_url.as_str().trim_end_matches('/'));

        let resp = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .map_err(|e| SendError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());

        if !status.is_success() {
            // Resend answers {"statusCode":422,"message":"...","name":"..."}; fall back to the raw body.
            let message = serde_json::from_str::<ResendErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(SendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| SendError::MalformedReceipt(e.to_string()))
    }
}
