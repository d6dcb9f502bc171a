use serde::{Deserialize, Serialize};

use crate::model::location::LocationKind;

/// Social profile links in nested form.
///
/// The same links are also exposed as top-level fields on [`Company`] for
/// consumers that predate the nested shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

/// One materialized business record of the directory.
///
/// `record_id` is the remote source's opaque row identifier: unique per
/// company and stable across renames. `slug` is derived from the display name
/// via [`crate::util::slug::normalize`] and is NOT guaranteed unique: two
/// companies with names that normalize identically collide, and a rename
/// leaves old slugs stale. Anything that must address a company reliably uses
/// `record_id`.
///
/// Numeric metrics are either a valid non-negative number or absent, never
/// NaN; a source value that fails coercion becomes `None`, not zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Remote source's opaque, stable row identifier.
    pub record_id: String,
    /// Slug derived from the display name; collisions possible.
    pub slug: String,
    /// Display name; always non-empty (nameless records are dropped).
    pub name: String,
    /// Logo URL, `/placeholder.svg` when absent.
    pub logo: String,
    /// Website URL, `#` when absent.
    pub website: String,
    /// Country display name as resolved from the reference table.
    pub country: String,
    /// State display name as resolved from the reference table.
    pub state: String,
    /// City display name as resolved from the reference table.
    pub city: String,
    /// One-line pitch.
    pub one_liner: Option<String>,
    /// Long-form narrative description.
    pub description: Option<String>,
    /// HTML blog body.
    pub blog: Option<String>,
    /// HTML "key features" block from the summary side table.
    pub key_features: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    /// Nested form of the social links above.
    pub social: SocialLinks,
    /// Validated image URLs, at most 5.
    pub images: Vec<String>,
    /// External listing profile URL.
    pub listing_url: Option<String>,
    pub employees: Option<u32>,
    pub year_founded: Option<u32>,
    /// Aggregate rating, 0 to 5.
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    /// Number of managed properties.
    pub property_count: Option<u32>,
    /// Other states the company operates in.
    pub other_states: Vec<String>,
    /// Other cities the company operates in.
    pub other_cities: Vec<String>,
    pub verified: bool,
    /// Free-text tag.
    pub tags: Option<String>,
}

impl Company {
    /// Raw display string of the requested location field.
    pub fn location_name(&self, kind: LocationKind) -> &str {
        match kind {
            LocationKind::Country => &self.country,
            LocationKind::State => &self.state,
            LocationKind::City => &self.city,
        }
    }
}
