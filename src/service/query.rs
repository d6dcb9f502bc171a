//! Local filtering and ordering over a materialized company collection, plus
//! the translation of the same criteria into the remote source's predicate
//! language.
//!
//! A company passes a filter iff every supplied criteria group holds: the
//! free-text group ORs across name/city/state/country/description, location
//! scoping compares each supplied level case-insensitively, and numeric
//! ranges are inclusive with absent metrics evaluated as 0.

use std::cmp::Ordering;

use crate::airtable::{formula, schema};
use crate::model::company::Company;
use crate::model::filter::{CompanyFilter, SortKey};

/// Applies `filter` to a collection, preserving input order.
pub fn filter_companies(companies: &[Company], filter: &CompanyFilter) -> Vec<Company> {
    companies
        .iter()
        .filter(|company| matches_filter(company, filter))
        .cloned()
        .collect()
}

/// Whether one company passes every supplied criteria group.
pub fn matches_filter(company: &Company, filter: &CompanyFilter) -> bool {
    if let Some(query) = filter.query.as_deref() {
        if !matches_query(company, query) {
            return false;
        }
    }

    if let Some(country) = filter.country.as_deref() {
        if !eq_ignore_case(&company.country, country) {
            return false;
        }
    }
    if let Some(state) = filter.state.as_deref() {
        if !eq_ignore_case(&company.state, state) {
            return false;
        }
    }
    if let Some(city) = filter.city.as_deref() {
        if !eq_ignore_case(&company.city, city) {
            return false;
        }
    }

    if let Some(range) = &filter.rating {
        if !range.contains(company.rating.unwrap_or(0.0)) {
            return false;
        }
    }
    if let Some(range) = &filter.property_count {
        if !range.contains(company.property_count.unwrap_or(0) as f64) {
            return false;
        }
    }
    if let Some(range) = &filter.review_count {
        if !range.contains(company.review_count.unwrap_or(0) as f64) {
            return false;
        }
    }

    true
}

// Full Unicode case fold, so accented location names still match.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn matches_query(company: &Company, query: &str) -> bool {
    let needle = query.to_lowercase();
    let haystacks = [
        &company.name,
        &company.city,
        &company.state,
        &company.country,
    ];

    haystacks
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
        || company
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(&needle))
}

/// Sorts in place. All sorts are stable, so ties keep input order;
/// [`SortKey::Relevance`] is a no-op.
pub fn sort_companies(companies: &mut [Company], key: SortKey) {
    match key {
        SortKey::Rating => companies.sort_by(|a, b| desc(a.rating, b.rating)),
        SortKey::NameAsc => companies.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::NameDesc => companies.sort_by(|a, b| b.name.cmp(&a.name)),
        SortKey::Properties => companies.sort_by(|a, b| {
            desc(
                a.property_count.map(f64::from),
                b.property_count.map(f64::from),
            )
        }),
        SortKey::Relevance => {}
    }
}

fn desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    b.unwrap_or(0.0)
        .partial_cmp(&a.unwrap_or(0.0))
        .unwrap_or(Ordering::Equal)
}

/// Translates filter criteria into the remote source's predicate language.
///
/// Semantics match the local filter (inclusive ranges, substring
/// containment) with one relaxation: the remote language holds one active
/// location scope at a time, so the most specific supplied level wins and is
/// matched by per-field containment rather than OR-across-all-fields.
/// Returns `None` when no criteria translate (fetch everything).
pub fn remote_formula(filter: &CompanyFilter) -> Option<String> {
    let mut conditions = Vec::new();

    if let Some(city) = filter.city.as_deref() {
        conditions.push(formula::contains(city, schema::HQ_CITY));
    } else if let Some(state) = filter.state.as_deref() {
        conditions.push(formula::contains(state, schema::HQ_STATE));
    } else if let Some(country) = filter.country.as_deref() {
        conditions.push(formula::contains(country, schema::HQ_COUNTRY));
    }

    if let Some(range) = &filter.rating {
        conditions.push(formula::in_range(schema::RATING, range));
    }
    if let Some(range) = &filter.property_count {
        conditions.push(formula::in_range(schema::PROPERTY_COUNT, range));
    }
    if let Some(range) = &filter.review_count {
        conditions.push(formula::in_range(schema::REVIEW_COUNT, range));
    }

    if conditions.is_empty() {
        None
    } else {
        Some(formula::and(&conditions))
    }
}
