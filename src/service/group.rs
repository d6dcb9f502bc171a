//! Location grouping for nested listing pages.

use std::collections::HashMap;

use crate::model::company::Company;
use crate::model::location::{LocationGroup, LocationKind};
use crate::util::slug;

/// Deduplicates and groups companies by normalized location name.
///
/// Iterates in input order; the first company observed for a normalized key
/// fixes that group's display name, and later companies join the group
/// regardless of spelling or casing differences in their raw field value.
/// Group order follows first observation; callers sort explicitly if they
/// need another order.
pub fn group_by_location(companies: &[Company], kind: LocationKind) -> Vec<LocationGroup> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<LocationGroup> = Vec::new();

    for company in companies {
        let raw = company.location_name(kind);
        let key = slug::normalize(raw);

        let position = *positions.entry(key.clone()).or_insert_with(|| {
            groups.push(LocationGroup {
                normalized_name: key.clone(),
                display_name: raw.to_string(),
                companies: Vec::new(),
            });
            groups.len() - 1
        });

        groups[position].companies.push(company.clone());
    }

    groups
}
