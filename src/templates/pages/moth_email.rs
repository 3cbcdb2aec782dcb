use crate::inaturalist::Observation;
use crate::templates::email_layout;
use maud::html;
use std::fmt::Write;

pub const OBSERVATION_PAGE_BASE: &str = "https://www.inaturalist.org/observations";

const IMAGE_STYLE: &str = "width: 100%; max-width: 550px; border-radius: 8px; margin: 20px auto;";
const COMMON_NAME_STYLE: &str = "font-size: 24px; margin: 10px 0 5px 0;";
const SCIENTIFIC_NAME_STYLE: &str = "font-style: italic; color: #666; margin: 0 0 15px 0;";
const DETAILS_STYLE: &str = "font-size: 14px; color: #555; line-height: 1.6;";
const LINK_STYLE: &str = "color: #6b705c;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub fn observation_url(obs: &Observation) -> String {
    format!("{OBSERVATION_PAGE_BASE}/{}", obs.identifier)
}

/// Common name when iNaturalist has one, otherwise the scientific name.
fn display_name(obs: &Observation) -> &str {
    obs.common_name.as_deref().unwrap_or(&obs.scientific_name)
}

/// Pure: the same observation always renders to the same bytes.
pub fn render_email(obs: &Observation) -> RenderedEmail {
    let name = display_name(obs);
    let subject = format!("🦋 {name} - Your Hourly Moth");

    RenderedEmail {
        html: render_html(obs, &subject),
        text: render_text(obs),
        subject,
    }
}

fn render_html(obs: &Observation, title: &str) -> String {
    let link = observation_url(obs);

    let content = html! {
        img src=(obs.photo_url) alt=(display_name(obs)) style=(IMAGE_STYLE);

        @if let Some(common) = &obs.common_name {
            h2 style=(COMMON_NAME_STYLE) { (common) }
        }
        p style=(SCIENTIFIC_NAME_STYLE) { (obs.scientific_name) }

        div style=(DETAILS_STYLE) {
            p { "Observed by " (obs.observer_name) }
            @if let Some(place) = &obs.observed_location {
                p { "📍 " (place) }
            }
            @if let Some(date) = &obs.observed_date {
                p { "📅 " (date) }
            }
            p { a href=(link) style=(LINK_STYLE) { "View on iNaturalist →" } }
        }
    };

    let footer = html! {
        @if let Some(attribution) = &obs.photo_attribution {
            p { "Photo: " (attribution) }
        }
    };

    email_layout(title, content, footer).into_string()
}

fn render_text(obs: &Observation) -> String {
    let mut out = String::from("Your Hourly Moth\n\n");

    // Writing into a String cannot fail.
    if let Some(common) = &obs.common_name {
        let _ = writeln!(out, "{common}");
    }
    let _ = writeln!(out, "{}", obs.scientific_name);
    let _ = writeln!(out);
    let _ = writeln!(out, "Observed by {}", obs.observer_name);
    if let Some(place) = &obs.observed_location {
        let _ = writeln!(out, "Location: {place}");
    }
    if let Some(date) = &obs.observed_date {
        let _ = writeln!(out, "Date: {date}");
    }
    let _ = writeln!(out, "Photo: {}", obs.photo_url);
    if let Some(attribution) = &obs.photo_attribution {
        let _ = writeln!(out, "Credit: {attribution}");
    }
    let _ = writeln!(out, "View on iNaturalist: {}", observation_url(obs));
    out.push_str("\nSent with love via the Moth Mailer\n");
    out
}
