//! Directory facade: the read path consumed by rendering collaborators.
//!
//! [`Directory`] owns the remote client, the snapshot cache, the location
//! name cache, and the summary side table, and exposes the operations the
//! listing/detail pages consume. Collection-level reads go through the
//! snapshot cache with stale fallback; single-record reads hit the source
//! directly (retry-wrapped) since there is no per-record cache to fall back
//! on.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::airtable::{formula, schema, Client, SelectOptions};
use crate::config::Config;
use crate::error::Error;
use crate::model::company::Company;
use crate::model::filter::CompanyFilter;
use crate::model::location::{LocationKind, LocationPage};
use crate::service::cache::{CacheOutcome, CompanyCache};
use crate::service::location::{LocationNameCache, LocationService};
use crate::service::query;
use crate::service::retry::RetryPolicy;
use crate::service::summary::SummaryStore;
use crate::service::transform::Transformer;

/// Entry point into the directory data layer.
pub struct Directory {
    client: Client,
    companies: CompanyCache,
    locations: LocationNameCache,
    summaries: SummaryStore,
    retry: RetryPolicy,
}

impl Directory {
    /// Related-companies responses are capped at this many entries.
    pub const RELATED_LIMIT: usize = 5;

    /// Creates a new instance of [`Directory`]
    pub fn new(client: Client, cache_ttl: Duration, summaries: SummaryStore) -> Self {
        Self {
            client,
            companies: CompanyCache::new(cache_ttl),
            locations: LocationNameCache::new(),
            summaries,
            retry: RetryPolicy::default(),
        }
    }

    /// Overrides the retry policy applied to every remote round trip.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Builds a directory from environment configuration.
    ///
    /// A missing summary side table file degrades to an empty store with a
    /// warning; a present-but-malformed file is an error.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let client = Client::new(&config.api_url, &config.api_key, &config.base_id);

        let summaries_path = Path::new(&config.summaries_path);
        let summaries = if summaries_path.exists() {
            SummaryStore::load(summaries_path)?
        } else {
            tracing::warn!(
                "Summary side table not found at {}, key features will be absent",
                config.summaries_path
            );
            SummaryStore::empty()
        };

        Ok(Self::new(
            client,
            Duration::from_secs(config.cache_ttl_secs),
            summaries,
        ))
    }

    fn location_service(&self) -> LocationService<'_> {
        LocationService::new(&self.client, &self.locations, self.retry)
    }

    fn transformer(&self) -> Transformer<'_> {
        Transformer::new(&self.client, &self.locations, &self.summaries, self.retry)
    }

    /// Full company collection, possibly stale.
    ///
    /// Serving stale data over serving an error is policy; only the
    /// never-populated case errors. Callers that need to distinguish fresh
    /// from stale use [`Self::get_all_outcome`].
    pub async fn get_all(&self) -> Result<Arc<Vec<Company>>, Error> {
        self.get_all_outcome().await.into_result()
    }

    /// Full company collection with explicit freshness.
    ///
    /// A fresh snapshot is returned as-is. On a miss, concurrent callers
    /// coalesce on a single refresh: the three location tables and the
    /// company table are fetched in parallel, every record is
    /// batch-transformed, and the snapshot is swapped atomically. On refresh
    /// failure the previous snapshot (if any) is served as
    /// [`CacheOutcome::Stale`].
    pub async fn get_all_outcome(&self) -> CacheOutcome {
        if let Some(companies) = self.companies.fresh().await {
            tracing::debug!("Serving company snapshot from cache");
            return CacheOutcome::Fresh(companies);
        }

        let _guard = self.companies.refresh_guard().await;

        // Another caller may have refreshed while we waited for the guard.
        if let Some(companies) = self.companies.fresh().await {
            return CacheOutcome::Fresh(companies);
        }

        match self.refresh().await {
            Ok(companies) => CacheOutcome::Fresh(companies),
            Err(e) => match self.companies.any().await {
                Some(stale) => {
                    tracing::warn!("Serving stale company snapshot after refresh failure: {:?}", e);
                    CacheOutcome::Stale(stale, e)
                }
                None => CacheOutcome::Unavailable(e),
            },
        }
    }

    async fn refresh(&self) -> Result<Arc<Vec<Company>>, Error> {
        let locations = self.location_service();
        let options = SelectOptions::default();

        let client = &self.client;
        let options = &options;
        let (records, _, _, _) = futures::try_join!(
            self.retry.run("company table", move || async move {
                client.select(schema::COMPANIES_TABLE, options).await
            }),
            locations.prefetch_all(LocationKind::Country),
            locations.prefetch_all(LocationKind::State),
            locations.prefetch_all(LocationKind::City),
        )?;

        let companies = self.transformer().transform_batch(&records).await?;
        tracing::debug!("Refreshed company snapshot with {} entries", companies.len());

        Ok(self.companies.store(companies).await)
    }

    /// Drops the current snapshot; the next read refetches.
    pub async fn invalidate(&self) {
        self.companies.invalidate().await;
    }

    /// One company by its remote reference id, or `None` when the source
    /// has no such record (or the record has no display name).
    pub async fn get_company(&self, record_id: &str) -> Result<Option<Company>, Error> {
        let description = format!("company record {record_id}");
        let client = &self.client;
        let record = self
            .retry
            .run(&description, move || async move {
                client.find(schema::COMPANIES_TABLE, record_id).await
            })
            .await?;

        match record {
            Some(record) => Ok(self.transformer().transform_one(&record).await),
            None => Ok(None),
        }
    }

    /// Companies in the same state or city, excluding the company itself,
    /// capped at [`Self::RELATED_LIMIT`].
    pub async fn get_related(&self, record_id: &str) -> Result<Vec<Company>, Error> {
        let description = format!("company record {record_id}");
        let client = &self.client;
        let Some(record) = self
            .retry
            .run(&description, move || async move {
                client.find(schema::COMPANIES_TABLE, record_id).await
            })
            .await?
        else {
            return Ok(Vec::new());
        };

        let state_id = record.linked_id(schema::HQ_STATE);
        let city_id = record.linked_id(schema::HQ_CITY);
        if state_id.is_none() && city_id.is_none() {
            return Ok(Vec::new());
        }

        let mut scope = Vec::new();
        if let Some(id) = &state_id {
            scope.push(formula::eq(schema::HQ_STATE, id));
        }
        if let Some(id) = &city_id {
            scope.push(formula::eq(schema::HQ_CITY, id));
        }

        let options = SelectOptions::default()
            .with_formula(formula::and(&[
                formula::record_id_is_not(record_id),
                formula::or(&scope),
            ]))
            .with_max_records(Self::RELATED_LIMIT);

        let options = &options;
        let records = self
            .retry
            .run("related companies", move || async move {
                client.select(schema::COMPANIES_TABLE, options).await
            })
            .await?;

        self.transformer().transform_batch(&records).await
    }

    /// Free-form descriptive bio of a location, by display name.
    pub async fn get_bio(&self, kind: LocationKind, name: &str) -> Result<Option<String>, Error> {
        let options = SelectOptions::default()
            .with_formula(formula::eq(kind.name_field(), name))
            .with_fields(vec![kind.bio_field()]);

        let client = &self.client;
        let options = &options;
        let records = self
            .retry
            .run(&format!("{} bio", kind.table()), move || async move {
                client.select(kind.table(), options).await
            })
            .await?;

        Ok(records
            .first()
            .and_then(|record| record.string_field(kind.bio_field())))
    }

    /// Contents of a nested listing page addressed by URL slugs.
    ///
    /// Resolves each slug to its canonical display name (preferring the
    /// source's authoritative spelling), then fetches the most specific
    /// location's bio and the scoped company list in parallel.
    pub async fn location_page(
        &self,
        country: &str,
        state: Option<&str>,
        city: Option<&str>,
    ) -> Result<LocationPage, Error> {
        let locations = self.location_service();

        let country_name = locations
            .canonical_display_name(LocationKind::Country, country)
            .await;
        let state_name = match state {
            Some(segment) => Some(
                locations
                    .canonical_display_name(LocationKind::State, segment)
                    .await,
            ),
            None => None,
        };
        let city_name = match city {
            Some(segment) => Some(
                locations
                    .canonical_display_name(LocationKind::City, segment)
                    .await,
            ),
            None => None,
        };

        let mut scope = vec![formula::eq(schema::HQ_COUNTRY, &country_name)];
        if let Some(name) = &state_name {
            scope.push(formula::eq(schema::HQ_STATE, name));
        }
        if let Some(name) = &city_name {
            scope.push(formula::eq(schema::HQ_CITY, name));
        }

        let (bio_kind, bio_name) = match (&city_name, &state_name) {
            (Some(name), _) => (LocationKind::City, name.as_str()),
            (None, Some(name)) => (LocationKind::State, name.as_str()),
            (None, None) => (LocationKind::Country, country_name.as_str()),
        };

        let options = SelectOptions::default()
            .with_formula(formula::and(&scope))
            .with_fields(schema::LISTING_FIELDS.to_vec());

        let client = &self.client;
        let options = &options;
        let (records, bio) = futures::try_join!(
            self.retry.run("scoped company list", move || async move {
                client.select(schema::COMPANIES_TABLE, options).await
            }),
            self.get_bio(bio_kind, bio_name),
        )?;

        let companies = self.transformer().transform_batch(&records).await?;

        Ok(LocationPage { companies, bio })
    }

    /// Applies filter criteria against the cached snapshot.
    pub async fn search(&self, filter: &CompanyFilter) -> Result<Vec<Company>, Error> {
        let companies = self.get_all().await?;
        Ok(query::filter_companies(&companies, filter))
    }

    /// Delegates filter criteria to the remote source's predicate language
    /// and transforms whatever comes back.
    pub async fn search_remote(&self, filter: &CompanyFilter) -> Result<Vec<Company>, Error> {
        let mut options = SelectOptions::default();
        if let Some(formula_text) = query::remote_formula(filter) {
            options = options.with_formula(formula_text);
        }

        let client = &self.client;
        let options = &options;
        let records = self
            .retry
            .run("filtered company list", move || async move {
                client.select(schema::COMPANIES_TABLE, options).await
            })
            .await?;

        self.transformer().transform_batch(&records).await
    }
}
