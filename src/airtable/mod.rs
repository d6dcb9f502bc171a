//! Client for the remote tabular source (an Airtable-style REST API).
//!
//! This is the sole point of contact with the remote source. The crate only
//! needs three verbs: list a table (with optional filter formula, field
//! projection, and record cap, following pagination offsets), find one record
//! by id, and, for the offline backfill job only, batch-update records.
//!
//! The client performs no retries itself; callers wrap round trips in
//! [`crate::service::retry::RetryPolicy`].

pub mod formula;
pub mod record;
pub mod schema;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;
pub use record::Record;

/// Root URL of the hosted API.
pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// The remote source's maximum number of records per write request.
pub const UPDATE_BATCH_LIMIT: usize = 10;

/// HTTP client bound to one base of the remote source.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    base_id: String,
}

/// Options for a table listing request.
#[derive(Clone, Debug, Default)]
pub struct SelectOptions {
    /// Filter formula in the source's predicate language; build it with
    /// [`formula`] so values are escaped.
    pub filter_by_formula: Option<String>,
    /// Fields to project; empty means all fields.
    pub fields: Vec<&'static str>,
    /// Cap on the number of returned records.
    pub max_records: Option<usize>,
}

impl SelectOptions {
    pub fn with_formula(mut self, formula: String) -> Self {
        self.filter_by_formula = Some(formula);
        self
    }

    pub fn with_fields(mut self, fields: Vec<&'static str>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }
}

/// One page of a listing response.
#[derive(Debug, Deserialize)]
struct RecordPage {
    records: Vec<Record>,
    offset: Option<String>,
}

/// One record's worth of a batch update request.
#[derive(Debug, Serialize)]
pub struct RecordUpdate {
    pub id: String,
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Client {
    /// Creates a new client bound to `base_id` behind `api_url`.
    pub fn new(api_url: &str, api_key: &str, base_id: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            base_id: base_id.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_url,
            self.base_id,
            urlencoding::encode(table)
        )
    }

    /// Lists records of a table, following pagination offsets until the
    /// source is exhausted or `max_records` is reached.
    pub async fn select(&self, table: &str, options: &SelectOptions) -> Result<Vec<Record>, Error> {
        let url = self.table_url(table);
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(formula) = &options.filter_by_formula {
                query.push(("filterByFormula", formula.clone()));
            }
            for field in &options.fields {
                query.push(("fields[]", (*field).to_string()));
            }
            if let Some(max_records) = options.max_records {
                query.push(("maxRecords", max_records.to_string()));
            }
            if let Some(offset) = &offset {
                query.push(("offset", offset.clone()));
            }

            let response = self
                .http
                .get(&url)
                .bearer_auth(&self.api_key)
                .query(&query)
                .send()
                .await?;
            let page: RecordPage = Self::parse(response).await?;

            records.extend(page.records);

            if let Some(max_records) = options.max_records {
                if records.len() >= max_records {
                    records.truncate(max_records);
                    break;
                }
            }

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(records)
    }

    /// Fetches a single record by its opaque id. Returns `None` when the
    /// source reports the record does not exist.
    pub async fn find(&self, table: &str, record_id: &str) -> Result<Option<Record>, Error> {
        let url = format!("{}/{}", self.table_url(table), record_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(Self::parse(response).await?))
    }

    /// Applies one batch of field updates, at most [`UPDATE_BATCH_LIMIT`]
    /// records per call. Write path for the offline backfill job only.
    pub async fn update(&self, table: &str, updates: &[RecordUpdate]) -> Result<(), Error> {
        if updates.len() > UPDATE_BATCH_LIMIT {
            return Err(Error::InternalError(format!(
                "update batch of {} exceeds the remote limit of {}",
                updates.len(),
                UPDATE_BATCH_LIMIT
            )));
        }

        let body = serde_json::json!({ "records": updates });

        let response = self
            .http
            .patch(self.table_url(table))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(Error::ApiError {
            status: status.as_u16(),
            message,
        })
    }
}
