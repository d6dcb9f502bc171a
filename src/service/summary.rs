//! Precomputed per-record summary side table.
//!
//! An offline step generates an HTML "key features" block per company and
//! stores it as a JSON array of `{ id, summary }` objects keyed by the
//! record's reference id. The store is loaded once at startup and consumed at
//! transform time; the [`backfill_summaries`] job writes the same blocks back
//! into the company table for consumers that read the base directly.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::airtable::{schema, Client, RecordUpdate, SelectOptions, UPDATE_BATCH_LIMIT};
use crate::error::Error;
use crate::service::retry::fetch_with_retry;

/// One entry of the side table file.
#[derive(Clone, Debug, Deserialize)]
pub struct SummaryEntry {
    pub id: String,
    pub summary: String,
}

/// Static id -> summary mapping.
#[derive(Debug, Default)]
pub struct SummaryStore {
    summaries: HashMap<String, String>,
}

impl SummaryStore {
    /// A store with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the side table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<SummaryEntry> = serde_json::from_str(&raw)?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: Vec<SummaryEntry>) -> Self {
        Self {
            summaries: entries
                .into_iter()
                .map(|entry| (entry.id, entry.summary))
                .collect(),
        }
    }

    /// Summary for a record's reference id, if one was precomputed.
    pub fn get(&self, record_id: &str) -> Option<&str> {
        self.summaries.get(record_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// Writes precomputed summaries back into the company table.
///
/// Reads every company record, pairs each with its side-table summary, and
/// PATCHes the summary field in batches of [`UPDATE_BATCH_LIMIT`] (the remote
/// source's write limit). Records without a precomputed summary are left
/// untouched. Returns the number of records updated.
pub async fn backfill_summaries(client: &Client, store: &SummaryStore) -> Result<usize, Error> {
    let options = SelectOptions::default().with_fields(vec![schema::COMPANY_NAME]);
    let options = &options;
    let records = fetch_with_retry("company table", move || async move {
        client.select(schema::COMPANIES_TABLE, options).await
    })
    .await?;

    let updates: Vec<RecordUpdate> = records
        .iter()
        .filter_map(|record| {
            store.get(&record.id).map(|summary| {
                let mut fields = serde_json::Map::new();
                fields.insert(
                    schema::KEY_FEATURES.to_string(),
                    serde_json::Value::String(summary.to_string()),
                );
                RecordUpdate {
                    id: record.id.clone(),
                    fields,
                }
            })
        })
        .collect();

    for batch in updates.chunks(UPDATE_BATCH_LIMIT) {
        client.update(schema::COMPANIES_TABLE, batch).await?;
        tracing::info!("Updated summaries for {} companies", batch.len());
    }

    Ok(updates.len())
}
