// config.rs
use crate::inaturalist::{FilterConfig, QualityGrade};
use url::Url;

pub const DEFAULT_SENDER_EMAIL: &str = "moths@yourdomain.com";
pub const DEFAULT_INATURALIST_API: &str = "https://api.inaturalist.org/v1";
pub const DEFAULT_RESEND_API: &str = "https://api.resend.com";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Everything one invocation needs, resolved up front so the pipeline
/// never reads the environment itself.
#[derive(Debug, Clone)]
pub struct Config {
    pub resend_api_key: String,
    pub recipient_email: String,
    pub sender_email: String,
    pub inaturalist_api: Url,
    pub resend_api: Url,
    pub filter: FilterConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let resend_api_key = get("RESEND_API_KEY").ok_or(ConfigError::Missing("RESEND_API_KEY"))?;

        let recipient_email =
            get("RECIPIENT_EMAIL").ok_or(ConfigError::Missing("RECIPIENT_EMAIL"))?;
        check_address("RECIPIENT_EMAIL", &recipient_email)?;

        let sender_email = get("SENDER_EMAIL").unwrap_or_else(|| DEFAULT_SENDER_EMAIL.to_string());
        check_address("SENDER_EMAIL", &sender_email)?;

        let inaturalist_api = parse_url(
            "INATURALIST_API_URL",
            get("INATURALIST_API_URL").as_deref().unwrap_or(DEFAULT_INATURALIST_API),
        )?;
        let resend_api = parse_url(
            "RESEND_API_URL",
            get("RESEND_API_URL").as_deref().unwrap_or(DEFAULT_RESEND_API),
        )?;

        let mut filter = FilterConfig::default();
        if let Some(raw) = get("MOTH_PAGE_SIZE") {
            let size: u32 = raw.parse().map_err(|e| ConfigError::Invalid {
                var: "MOTH_PAGE_SIZE",
                reason: format!("{raw:?}: {e}"),
            })?;
            if size == 0 {
                return Err(ConfigError::Invalid {
                    var: "MOTH_PAGE_SIZE",
                    reason: "must be at least 1".into(),
                });
            }
            filter.page_size_hint = size;
        }
        if let Some(raw) = get("MOTH_QUALITY_GRADE") {
            filter.quality_grade =
                QualityGrade::parse(&raw).ok_or_else(|| ConfigError::Invalid {
                    var: "MOTH_QUALITY_GRADE",
                    reason: format!("{raw:?} is not one of research, needs_id, casual"),
                })?;
        }

        Ok(Self {
            resend_api_key,
            recipient_email,
            sender_email,
            inaturalist_api,
            resend_api,
            filter,
        })
    }
}

// Deliverability is the provider's problem; we only reject obvious typos.
fn check_address(var: &'static str, addr: &str) -> Result<(), ConfigError> {
    match addr.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ConfigError::Invalid {
            var,
            reason: format!("{addr:?} is not an email address"),
        }),
    }
}

fn parse_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Invalid {
        var,
        reason: format!("{raw:?}: {e}"),
    })
}
