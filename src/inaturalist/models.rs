use serde::Deserialize;

// page
//  └── results[]
//       ├── id
//       ├── observed_on
//       ├── place_guess
//       ├── user
//       │    ├── login
//       │    └── name
//       ├── taxon
//       │    ├── name
//       │    └── preferred_common_name
//       └── photos[]
//            ├── url
//            └── attribution

pub const ANONYMOUS_OBSERVER: &str = "a community member";

// Size variants iNaturalist encodes as the photo file stem.
const SMALLER_PHOTO_SIZES: [&str; 4] = ["square", "thumb", "small", "medium"];

#[derive(Debug, Deserialize)]
pub struct ObservationsPage {
    pub results: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
pub struct RawObservation {
    pub id: u64,
    pub observed_on: Option<String>,
    pub place_guess: Option<String>,
    pub user: Option<User>,
    pub taxon: Option<Taxon>,
    // iNaturalist sends `null` as well as omitting the key.
    pub photos: Option<Vec<Photo>>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub login: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Taxon {
    pub name: Option<String>,
    pub preferred_common_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Photo {
    pub url: Option<String>,
    pub attribution: Option<String>,
}

/// A single sighting, normalized for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub identifier: String,
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub photo_url: String,
    pub photo_attribution: Option<String>,
    pub observer_name: String,
    pub observed_location: Option<String>,
    pub observed_date: Option<String>,
}

impl RawObservation {
    /// A record only qualifies with a usable photo and a scientific name.
    pub fn is_candidate(&self) -> bool {
        self.first_photo_url().is_some() && self.scientific_name().is_some()
    }

    /// Returns `None` for records that fail [`is_candidate`](Self::is_candidate).
    pub fn into_observation(self) -> Option<Observation> {
        let photo = self
            .photos()
            .iter()
            .find(|p| p.url.as_deref().and_then(non_blank).is_some())?;
        let photo_url = large_photo_url(photo.url.as_deref().and_then(non_blank)?);
        let photo_attribution = photo.attribution.as_deref().and_then(non_blank);

        let scientific_name = self.scientific_name()?;
        let common_name = self
            .taxon
            .as_ref()
            .and_then(|t| t.preferred_common_name.as_deref())
            .and_then(non_blank);

        let observer_name = self
            .user
            .as_ref()
            .and_then(|u| {
                u.login
                    .as_deref()
                    .and_then(non_blank)
                    .or_else(|| u.name.as_deref().and_then(non_blank))
            })
            .unwrap_or_else(|| ANONYMOUS_OBSERVER.to_string());

        Some(Observation {
            identifier: self.id.to_string(),
            scientific_name,
            common_name,
            photo_url,
            photo_attribution,
            observer_name,
            observed_location: self.place_guess.as_deref().and_then(non_blank),
            observed_date: self.observed_on.as_deref().and_then(non_blank),
        })
    }

    fn photos(&self) -> &[Photo] {
        self.photos.as_deref().unwrap_or_default()
    }

    fn first_photo_url(&self) -> Option<String> {
        self.photos()
            .iter()
            .find_map(|p| p.url.as_deref().and_then(non_blank))
    }

    fn scientific_name(&self) -> Option<String> {
        self.taxon
            .as_ref()
            .and_then(|t| t.name.as_deref())
            .and_then(non_blank)
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Swap iNaturalist's size stem (`.../photos/123/square.jpg`) for `large`.
/// URLs in any other shape are returned untouched.
pub fn large_photo_url(url: String) -> String {
    let Some((dir, file)) = url.rsplit_once('/') else {
        return url;
    };
    let (stem, rest) = match file.find(['.', '?']) {
        Some(i) => file.split_at(i),
        None => (file, ""),
    };

    if SMALLER_PHOTO_SIZES.contains(&stem) {
        format!("{dir}/large{rest}")
    } else {
        url
    }
}
