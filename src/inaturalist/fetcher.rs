// fetcher.rs
use crate::inaturalist::models::{Observation, ObservationsPage};
use crate::inaturalist::FetchError;
use rand::Rng;
use reqwest::blocking::Client;
use url::Url;

/// Lepidoptera: moths and butterflies.
pub const MOTH_TAXON_ID: u64 = 47157;
/// Papilionoidea, excluded so only moths come back.
pub const BUTTERFLY_TAXON_ID: u64 = 47224;
/// iNaturalist refuses pages larger than this.
pub const MAX_PAGE_SIZE: u32 = 200;
/// Upstream error bodies are cut to this many chars before logging.
pub const MAX_ERROR_BODY_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityGrade {
    Research,
    NeedsId,
    Casual,
}

impl QualityGrade {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "research" => Some(QualityGrade::Research),
            "needs_id" => Some(QualityGrade::NeedsId),
            "casual" => Some(QualityGrade::Casual),
            _ => None,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            QualityGrade::Research => "research",
            QualityGrade::NeedsId => "needs_id",
            QualityGrade::Casual => "casual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub taxon_id: u64,
    pub exclude_taxon_id: Option<u64>,
    pub quality_grade: QualityGrade,
    pub require_photo: bool,
    pub licensed_photos_only: bool,
    pub page_size_hint: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            taxon_id: MOTH_TAXON_ID,
            exclude_taxon_id: Some(BUTTERFLY_TAXON_ID),
            quality_grade: QualityGrade::Research,
            require_photo: true,
            licensed_photos_only: true,
            page_size_hint: MAX_PAGE_SIZE,
        }
    }
}

impl FilterConfig {
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("taxon_id", self.taxon_id.to_string()),
            ("quality_grade", self.quality_grade.as_param().to_string()),
            ("per_page", self.page_size_hint.clamp(1, MAX_PAGE_SIZE).to_string()),
            ("order_by", "random".to_string()),
        ];
        if let Some(excluded) = self.exclude_taxon_id {
            params.push(("without_taxon_id", excluded.to_string()));
        }
        if self.require_photo {
            params.push(("photos", "true".to_string()));
        }
        if self.licensed_photos_only {
            params.push(("photo_licensed", "true".to_string()));
        }
        params
    }
}

pub struct ObservationFetcher {
    client: Client,
    base_url: Url,
}

impl ObservationFetcher {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn fetch_random_observation<R: Rng>(
        &self,
        filter: &FilterConfig,
        rng: &mut R,
    ) -> Result<Observation, FetchError> {
        let endpoint = format!("{}/observations", self.base_url.as_str().trim_end_matches('/'));
        tracing::debug!(%endpoint, "requesting observations");

        let resp = self
            .client
            .get(&endpoint)
            .query(&filter.query_params())
            .send()
            .map_err(|e| FetchError::UpstreamUnavailable(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| FetchError::UpstreamUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::UpstreamUnavailable(format!(
                "iNaturalist HTTP {status}: {}",
                body_excerpt(&text)
            )));
        }

        select_observation(&text, rng)
    }
}

/// First [`MAX_ERROR_BODY_CHARS`] chars of an error body, with an ellipsis when cut.
pub fn body_excerpt(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}

/// Parse one page of results and pick a candidate uniformly at random.
pub fn select_observation<R: Rng>(
    body: &str,
    rng: &mut R,
) -> Result<Observation, FetchError> {
    let page: ObservationsPage =
        serde_json::from_str(body).map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    if page.results.is_empty() {
        return Err(FetchError::NoObservationFound);
    }

    let total = page.results.len();
    let mut candidates: Vec<_> = page
        .results
        .into_iter()
        .filter(|r| r.is_candidate())
        .collect();
    tracing::debug!(total, candidates = candidates.len(), "observation page parsed");

    if candidates.is_empty() {
        return Err(FetchError::MalformedResponse(format!(
            "none of {total} results has a photo and a scientific name"
        )));
    }

    let idx = rng.gen_range(0..candidates.len());

    candidates
        .swap_remove(idx)
        .into_observation()
        .ok_or_else(|| FetchError::MalformedResponse("candidate lost its photo".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    fn record(id: u64, photo: Option<&str>) -> serde_json::Value {
        let photos = match photo {
            Some(url) => json!([{ "url": url }]),
            None => json!([]),
        };
        json!({
            "id": id,
            "taxon": { "name": format!("Species {id}") },
            "user": { "login": "jdoe" },
            "photos": photos
        })
    }

    #[test]
    fn default_filter_asks_for_research_grade_moths() {
        let params = FilterConfig::default().query_params();
        let get = |k: &str| params.iter().find(|(key, _)| *key == k).map(|(_, v)| v.as_str());

        assert_eq!(get("taxon_id"), Some("47157"));
        assert_eq!(get("without_taxon_id"), Some("47224"));
        assert_eq!(get("quality_grade"), Some("research"));
        assert_eq!(get("photos"), Some("true"));
        assert_eq!(get("photo_licensed"), Some("true"));
        assert_eq!(get("per_page"), Some("200"));
        assert_eq!(get("order_by"), Some("random"));
    }

    #[test]
    fn page_size_is_clamped() {
        let filter = FilterConfig {
            page_size_hint: 5000,
            ..FilterConfig::default()
        };
        assert!(filter.query_params().contains(&("per_page", "200".to_string())));
    }

    #[test]
    fn exclusion_is_optional() {
        let filter = FilterConfig {
            exclude_taxon_id: None,
            ..FilterConfig::default()
        };
        assert!(filter.query_params().iter().all(|(k, _)| *k != "without_taxon_id"));
    }

    #[test]
    fn empty_page_is_no_observation() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = select_observation(r#"{"total_results":0,"results":[]}"#, &mut rng).unwrap_err();
        assert!(matches!(err, FetchError::NoObservationFound));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = select_observation(r#"[{"id": 1}]"#, &mut rng).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));

        let err = select_observation("<html>oops</html>", &mut rng).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[test]
    fn photoless_page_is_malformed() {
        let mut rng = StdRng::seed_from_u64(1);
        let body = json!({ "results": [record(1, None), record(2, Some(""))] }).to_string();
        let err = select_observation(&body, &mut rng).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[test]
    fn null_photos_record_is_skipped_not_fatal() {
        let body = r#"{"results":[
            {"id":1,"taxon":{"name":"Actias luna"},"photos":null},
            {"id":2,"taxon":{"name":"Hyalophora cecropia"},"photos":[{"url":"https://x/p.jpg"}]}
        ]}"#;

        for seed in 0..10 {
            let obs = select_observation(body, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(obs.identifier, "2");
        }
    }

    #[test]
    fn error_body_excerpt_is_bounded() {
        let short = "Service Unavailable";
        assert_eq!(body_excerpt(short), short);

        let long = "é".repeat(MAX_ERROR_BODY_CHARS + 100);
        let cut = body_excerpt(&long);
        assert_eq!(cut.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn only_photographed_records_are_selected() {
        let body = json!({
            "results": [record(1, None), record(2, Some("https://x/photos/2/small.jpg")), record(3, None)]
        })
        .to_string();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let obs = select_observation(&body, &mut rng).unwrap();
            assert_eq!(obs.identifier, "2");
            assert!(!obs.photo_url.is_empty());
        }
    }

    #[test]
    fn selection_spreads_over_the_page() {
        let body = json!({
            "results": (1..=5).map(|i| record(i, Some("https://x/p.jpg"))).collect::<Vec<_>>()
        })
        .to_string();

        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(select_observation(&body, &mut rng).unwrap().identifier);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn same_seed_same_pick() {
        let body = json!({
            "results": (1..=10).map(|i| record(i, Some("https://x/p.jpg"))).collect::<Vec<_>>()
        })
        .to_string();

        let a = select_observation(&body, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = select_observation(&body, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }
}
