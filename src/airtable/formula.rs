//! Filter formula construction for the remote source's predicate language.
//!
//! Every interpolated value passes through [`quote`]; raw user input never
//! reaches the formula text directly.

use crate::model::filter::MetricRange;

/// Quotes a string value for interpolation, escaping backslashes and single
/// quotes.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Wraps a field name in the source's `{Field Name}` reference syntax.
pub fn field(name: &str) -> String {
    format!("{{{name}}}")
}

/// `{field} = 'value'` equality term.
pub fn eq(field_name: &str, value: &str) -> String {
    format!("{} = {}", field(field_name), quote(value))
}

/// `RECORD_ID() != 'id'` exclusion term.
pub fn record_id_is_not(record_id: &str) -> String {
    format!("RECORD_ID() != {}", quote(record_id))
}

/// Case-insensitive substring containment against one field.
pub fn contains(needle: &str, field_name: &str) -> String {
    format!(
        "SEARCH({}, LOWER({}))",
        quote(&needle.to_lowercase()),
        field(field_name)
    )
}

/// Inclusive `[min, max]` bound on a numeric field.
pub fn in_range(field_name: &str, range: &MetricRange) -> String {
    let f = field(field_name);
    format!("AND({f} >= {}, {f} <= {})", range.min, range.max)
}

/// Conjunction of terms; a single term passes through unwrapped.
pub fn and(terms: &[String]) -> String {
    combine("AND", terms)
}

/// Disjunction of terms; a single term passes through unwrapped.
pub fn or(terms: &[String]) -> String {
    combine("OR", terms)
}

fn combine(operator: &str, terms: &[String]) -> String {
    match terms {
        [] => String::new(),
        [term] => term.clone(),
        terms => format!("{}({})", operator, terms.join(", ")),
    }
}
