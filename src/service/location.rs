//! Location reference resolution.
//!
//! Company records link to the three location reference tables by opaque
//! record id. This service resolves those ids to display names through a
//! process-wide cache, either one id at a time or by loading a whole
//! reference table in one call ahead of a batch transform.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use crate::airtable::{formula, Client, SelectOptions};
use crate::error::Error;
use crate::model::location::LocationKind;
use crate::service::retry::RetryPolicy;
use crate::util::slug;

/// Process-wide cache of resolved location names, keyed by (kind, record id).
///
/// Entries are never evicted; location tables are assumed immutable for the
/// process lifetime. A per-kind flag records whether the full table has been
/// bulk-loaded, making prefetch idempotent.
#[derive(Debug, Default)]
pub struct LocationNameCache {
    names: RwLock<HashMap<(LocationKind, String), String>>,
    loaded: RwLock<HashSet<LocationKind>>,
}

impl LocationNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, kind: LocationKind, record_id: &str) -> Option<String> {
        let names = self.names.read().await;
        names.get(&(kind, record_id.to_string())).cloned()
    }

    pub async fn insert(&self, kind: LocationKind, record_id: String, name: String) {
        let mut names = self.names.write().await;
        names.insert((kind, record_id), name);
    }

    pub async fn is_loaded(&self, kind: LocationKind) -> bool {
        let loaded = self.loaded.read().await;
        loaded.contains(&kind)
    }

    pub async fn mark_loaded(&self, kind: LocationKind) {
        let mut loaded = self.loaded.write().await;
        loaded.insert(kind);
    }
}

/// Resolves location reference ids to display names.
pub struct LocationService<'a> {
    client: &'a Client,
    cache: &'a LocationNameCache,
    retry: RetryPolicy,
}

impl<'a> LocationService<'a> {
    /// Creates a new instance of [`LocationService`]
    pub fn new(client: &'a Client, cache: &'a LocationNameCache, retry: RetryPolicy) -> Self {
        Self {
            client,
            cache,
            retry,
        }
    }

    /// Resolves a single reference id to its display name.
    ///
    /// Checks the name cache first; on miss, issues one retry-wrapped fetch
    /// for that record and caches the extracted name. Unresolvable ids
    /// (record missing, name field absent, retries exhausted) yield the
    /// deterministic `"Unknown <Kind>"` placeholder, never an error.
    pub async fn resolve_name(&self, kind: LocationKind, record_id: &str) -> String {
        if let Some(name) = self.cache.get(kind, record_id).await {
            return name;
        }

        let description = format!("{} record {}", kind.table(), record_id);
        let client = self.client;
        let result = self
            .retry
            .run(&description, move || async move {
                client.find(kind.table(), record_id).await
            })
            .await;

        match result {
            Ok(Some(record)) => {
                let name = record
                    .string_field(kind.name_field())
                    .unwrap_or_else(|| kind.unknown_label());
                self.cache
                    .insert(kind, record_id.to_string(), name.clone())
                    .await;
                name
            }
            Ok(None) => kind.unknown_label(),
            Err(e) => {
                tracing::error!("Failed to fetch {}: {:?}", description, e);
                kind.unknown_label()
            }
        }
    }

    /// Resolves a reference id purely from the cache; placeholder on miss.
    ///
    /// Batch transforms call [`Self::prefetch_all`] first, then use this for
    /// every record with zero further remote calls.
    pub async fn resolve_cached(&self, kind: LocationKind, record_id: Option<&str>) -> String {
        match record_id {
            Some(id) => self
                .cache
                .get(kind, id)
                .await
                .unwrap_or_else(|| kind.unknown_label()),
            None => kind.unknown_label(),
        }
    }

    /// Loads an entire reference table into the name cache in one call.
    ///
    /// Idempotent: returns immediately if the table was already bulk-loaded
    /// this process lifetime. Must run before any batch transformation that
    /// will need many lookups, to avoid N sequential round trips.
    pub async fn prefetch_all(&self, kind: LocationKind) -> Result<(), Error> {
        if self.cache.is_loaded(kind).await {
            return Ok(());
        }

        let options = SelectOptions::default().with_fields(vec![kind.name_field()]);
        let client = self.client;
        let options = &options;
        let records = self
            .retry
            .run(&format!("{} table", kind.table()), move || async move {
                client.select(kind.table(), options).await
            })
            .await?;

        for record in records {
            let name = record
                .string_field(kind.name_field())
                .unwrap_or_else(|| kind.unknown_label());
            self.cache.insert(kind, record.id, name).await;
        }
        self.cache.mark_loaded(kind).await;

        Ok(())
    }

    /// Exact-match existence check against the remote source.
    ///
    /// Returns the canonical stored spelling if a record with this name
    /// exists, else `None`. Lookup failures degrade to `None`, and the caller
    /// falls back to mechanical reconstruction.
    pub async fn check_exists(&self, kind: LocationKind, name: &str) -> Option<String> {
        let options = SelectOptions::default()
            .with_formula(formula::eq(kind.name_field(), name))
            .with_fields(vec![kind.name_field()]);

        let client = self.client;
        let options = &options;
        let result = self
            .retry
            .run(&format!("{} name lookup", kind.table()), move || async move {
                client.select(kind.table(), options).await
            })
            .await;

        match result {
            Ok(records) => records
                .first()
                .and_then(|record| record.string_field(kind.name_field())),
            Err(e) => {
                tracing::error!("Error checking {} name: {:?}", kind.table(), e);
                None
            }
        }
    }

    /// Resolves a URL slug segment to the canonical display name.
    ///
    /// Prefers the authoritative stored spelling from the source over a
    /// mechanically reconstructed one; falls back to title-casing when no
    /// exact match is found.
    pub async fn canonical_display_name(&self, kind: LocationKind, segment: &str) -> String {
        let decoded = slug::decode_segment(segment);

        if slug::preserves_hyphens(&decoded) {
            return slug::display_name_from_slug(segment);
        }

        let spaced = decoded
            .replace(['\u{2018}', '\u{2019}'], "'")
            .replace('-', " ");

        if let Some(canonical) = self.check_exists(kind, &spaced).await {
            return canonical;
        }

        slug::title_case(&spaced)
    }
}
