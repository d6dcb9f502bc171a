//! Location name normalization.
//!
//! `normalize` maps arbitrary location display strings to canonical URL-safe
//! slugs. Two raw strings refer to the same location iff their normalized
//! forms are byte-equal; callers must never compare raw display strings
//! directly, since casing, diacritics, and punctuation vary across data
//! entries for the same real-world place.
//!
//! `display_name_from_slug` walks the other direction when querying the
//! remote source by name: it percent-decodes, restores spaces, and
//! title-cases each word. The reconstruction is mechanical; callers that can
//! reach the remote source should prefer the authoritative stored spelling
//! via [`LocationService::canonical_display_name`].
//!
//! [`LocationService::canonical_display_name`]: crate::service::location::LocationService::canonical_display_name

use unicode_normalization::UnicodeNormalization;

/// Location names that keep their internal hyphens when reconstructing a
/// display name from a URL slug (compound region names that would otherwise
/// be split into separate words).
const PRESERVE_HYPHENS: &[&str] = &["emilia-romagna"];

/// Normalizes a location display string into a canonical URL-safe slug.
///
/// Total and deterministic: lowercases, trims, strips diacritics via Unicode
/// NFKD decomposition, converts apostrophes to hyphens, removes all other
/// characters outside `[a-z0-9\s-]`, collapses whitespace and hyphen runs to
/// a single hyphen, and strips leading/trailing hyphens.
///
/// # Example
/// ```
/// use staydex::util::slug::normalize;
///
/// assert_eq!(normalize("São Paulo"), "sao-paulo");
/// assert_eq!(normalize("Coeur d'Alene"), "coeur-d-alene");
/// ```
pub fn normalize(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.trim().to_lowercase().nfkd() {
        let c = match c {
            '\'' | '\u{2018}' | '\u{2019}' => '-',
            c => c,
        };

        if c.is_whitespace() || c == '-' {
            // Collapse runs of separators; drop them entirely at the start.
            pending_hyphen = !slug.is_empty();
            continue;
        }

        // Skips combining marks left behind by the NFKD decomposition along
        // with every other character outside [a-z0-9].
        if !c.is_ascii_alphanumeric() {
            continue;
        }

        if pending_hyphen {
            slug.push('-');
            pending_hyphen = false;
        }
        slug.push(c);
    }

    slug
}

/// Percent-decodes a URL slug segment and lowercases it.
pub fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
        .to_lowercase()
}

/// Whether a decoded slug must keep its internal hyphens when reconstructed
/// into a display name.
pub fn preserves_hyphens(decoded: &str) -> bool {
    PRESERVE_HYPHENS.contains(&decoded)
}

/// Mechanically reconstructs a display name from a URL slug segment.
///
/// Decodes percent-encoding, replaces hyphens with spaces, and title-cases
/// each word, keeping internal hyphens for names in the override set.
///
/// # Example
/// ```
/// use staydex::util::slug::display_name_from_slug;
///
/// assert_eq!(display_name_from_slug("new-york"), "New York");
/// assert_eq!(display_name_from_slug("emilia-romagna"), "Emilia-Romagna");
/// ```
pub fn display_name_from_slug(segment: &str) -> String {
    let decoded = decode_segment(segment);

    if preserves_hyphens(&decoded) {
        return decoded
            .split('-')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join("-");
    }

    let spaced = decoded
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace('-', " ");

    title_case(&spaced)
}

/// Title-cases each space-separated word, capitalizing after apostrophes as
/// well so names like "O'Brien" and "Coeur d'Alene" come out right.
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            if word.contains('\'') {
                word.split('\'')
                    .map(capitalize)
                    .collect::<Vec<_>>()
                    .join("'")
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
