use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` bound on a numeric metric.
///
/// A company with an absent metric is evaluated as 0, so any range with a
/// positive lower bound excludes companies missing that metric.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` falls within the inclusive bound.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Criteria accepted by the query engine.
///
/// Filter groups AND together; within the free-text group, the query matches
/// if ANY of name, city, state, country, or description contains it. Location
/// scoping is hierarchical: a caller narrowing by city supplies the state and
/// country above it as well.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFilter {
    /// Case-insensitive substring query.
    pub query: Option<String>,
    /// Aggregate rating bound.
    pub rating: Option<MetricRange>,
    /// Managed property count bound.
    pub property_count: Option<MetricRange>,
    /// Review count bound.
    pub review_count: Option<MetricRange>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl CompanyFilter {
    /// Whether no criteria are set (matches everything).
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.rating.is_none()
            && self.property_count.is_none()
            && self.review_count.is_none()
            && self.country.is_none()
            && self.state.is_none()
            && self.city.is_none()
    }
}

/// Sort order applied after filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Aggregate rating, descending; absent treated as 0.
    Rating,
    /// Display name, lexicographic ascending.
    NameAsc,
    /// Display name, lexicographic descending.
    NameDesc,
    /// Managed property count, descending; absent treated as 0.
    Properties,
    /// Stable no-op: preserves input order.
    #[default]
    Relevance,
}
