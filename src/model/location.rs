use serde::{Deserialize, Serialize};

use crate::model::company::Company;

/// The three location reference tables of the remote source.
///
/// Each kind maps to one remote table holding an opaque record id, a display
/// name, and a free-form bio. Company records link to these tables by record
/// id rather than embedding the display string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    Country,
    State,
    City,
}

impl LocationKind {
    /// Name of the remote reference table.
    pub fn table(&self) -> &'static str {
        match self {
            LocationKind::Country => "Countries",
            LocationKind::State => "States",
            LocationKind::City => "Cities",
        }
    }

    /// Field holding the display name in the reference table.
    pub fn name_field(&self) -> &'static str {
        match self {
            LocationKind::Country => "Country Name",
            LocationKind::State => "State Name",
            LocationKind::City => "City Name",
        }
    }

    /// Field holding the free-form descriptive bio in the reference table.
    pub fn bio_field(&self) -> &'static str {
        match self {
            LocationKind::Country => "Country Bio",
            LocationKind::State => "State Bio",
            LocationKind::City => "City Bio",
        }
    }

    /// Linked-record column on the company table referencing this kind.
    pub fn link_field(&self) -> &'static str {
        match self {
            LocationKind::Country => "HQ Country",
            LocationKind::State => "HQ State",
            LocationKind::City => "HQ City",
        }
    }

    /// Singular label, used for placeholder names.
    pub fn singular(&self) -> &'static str {
        match self {
            LocationKind::Country => "Country",
            LocationKind::State => "State",
            LocationKind::City => "City",
        }
    }

    /// Deterministic placeholder for an unresolvable reference id.
    pub fn unknown_label(&self) -> String {
        format!("Unknown {}", self.singular())
    }
}

/// Companies sharing one normalized location name.
///
/// Built fresh per request from the current collection, never persisted. The
/// display name is the raw field value of the first company observed for the
/// normalized key; group order follows first observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationGroup {
    /// Canonical slug of the location name, shared by every member.
    pub normalized_name: String,
    /// First-seen raw spelling, used for display.
    pub display_name: String,
    /// Members in input order.
    pub companies: Vec<Company>,
}

/// Contents of one nested listing page: the companies scoped to a location
/// plus that location's bio.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationPage {
    pub companies: Vec<Company>,
    pub bio: Option<String>,
}
