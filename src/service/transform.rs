//! Raw record to [`Company`] transformation.
//!
//! The transformer turns rows of the company table into materialized
//! [`Company`] values: it drops records without a display name, resolves the
//! three location references through [`LocationService`], coerces each
//! numeric field independently, validates image URLs, and attaches the
//! precomputed "key features" block from the summary side table.
//!
//! Field-level problems never abort a batch: a malformed value becomes an
//! absent one, and only the missing-name case drops a record.

use crate::airtable::{schema, Client, Record};
use crate::error::Error;
use crate::model::company::{Company, SocialLinks};
use crate::model::location::LocationKind;
use crate::service::location::{LocationNameCache, LocationService};
use crate::service::retry::RetryPolicy;
use crate::service::summary::SummaryStore;
use crate::util::slug;

/// Transforms raw company records into [`Company`] values.
pub struct Transformer<'a> {
    locations: LocationService<'a>,
    summaries: &'a SummaryStore,
}

impl<'a> Transformer<'a> {
    /// Creates a new instance of [`Transformer`]
    pub fn new(
        client: &'a Client,
        cache: &'a LocationNameCache,
        summaries: &'a SummaryStore,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            locations: LocationService::new(client, cache, retry),
            summaries,
        }
    }

    /// Transforms a single record, resolving its three location references
    /// with individual lookups issued concurrently.
    ///
    /// Returns `None` when the record has no display name.
    pub async fn transform_one(&self, record: &Record) -> Option<Company> {
        let name = record.string_field(schema::COMPANY_NAME)?;

        let (country, state, city) = futures::join!(
            self.resolve_link(LocationKind::Country, record),
            self.resolve_link(LocationKind::State, record),
            self.resolve_link(LocationKind::City, record),
        );

        Some(self.build(record, name, country, state, city))
    }

    /// Transforms a batch of records.
    ///
    /// Bulk-prefetches each location table exactly once (concurrently), then
    /// resolves every record's locations purely from the in-memory cache,
    /// with zero further remote calls regardless of batch size. Nameless records
    /// are dropped; the batch continues.
    pub async fn transform_batch(&self, records: &[Record]) -> Result<Vec<Company>, Error> {
        futures::try_join!(
            self.locations.prefetch_all(LocationKind::Country),
            self.locations.prefetch_all(LocationKind::State),
            self.locations.prefetch_all(LocationKind::City),
        )?;

        let mut companies = Vec::with_capacity(records.len());
        for record in records {
            let Some(name) = record.string_field(schema::COMPANY_NAME) else {
                continue;
            };

            let country = self
                .locations
                .resolve_cached(
                    LocationKind::Country,
                    record.linked_id(schema::HQ_COUNTRY).as_deref(),
                )
                .await;
            let state = self
                .locations
                .resolve_cached(
                    LocationKind::State,
                    record.linked_id(schema::HQ_STATE).as_deref(),
                )
                .await;
            let city = self
                .locations
                .resolve_cached(
                    LocationKind::City,
                    record.linked_id(schema::HQ_CITY).as_deref(),
                )
                .await;

            companies.push(self.build(record, name, country, state, city));
        }

        Ok(companies)
    }

    async fn resolve_link(&self, kind: LocationKind, record: &Record) -> String {
        match record.linked_id(kind.link_field()) {
            Some(id) => self.locations.resolve_name(kind, &id).await,
            None => kind.unknown_label(),
        }
    }

    fn build(
        &self,
        record: &Record,
        name: String,
        country: String,
        state: String,
        city: String,
    ) -> Company {
        let facebook = record.string_field(schema::FACEBOOK);
        let linkedin = record.string_field(schema::LINKEDIN);
        let twitter = record.string_field(schema::TWITTER);

        let images = schema::IMAGE_FIELDS
            .iter()
            .filter_map(|field| record.string_field(field))
            .filter(|url| url.starts_with("http") || url.starts_with('/'))
            .collect();

        Company {
            record_id: record.id.clone(),
            slug: slug::normalize(&name),
            logo: record
                .attachment_url(schema::COMPANY_LOGO)
                .unwrap_or_else(|| "/placeholder.svg".to_string()),
            website: record
                .string_field(schema::COMPANY_WEBSITE)
                .unwrap_or_else(|| "#".to_string()),
            one_liner: record.string_field(schema::ONE_LINER),
            description: record.string_field(schema::INTRO),
            blog: record.string_field(schema::BLOG),
            key_features: self.summaries.get(&record.id).map(str::to_string),
            social: SocialLinks {
                facebook: facebook.clone(),
                linkedin: linkedin.clone(),
                twitter: twitter.clone(),
            },
            facebook,
            linkedin,
            twitter,
            images,
            listing_url: record.string_field(schema::LISTING_URL),
            employees: record.count_field(schema::EMPLOYEES),
            year_founded: record.count_field(schema::YEAR_FOUNDED),
            rating: record.number_field(schema::RATING).filter(|v| *v >= 0.0),
            review_count: record.count_field(schema::REVIEW_COUNT),
            property_count: record.count_field(schema::PROPERTY_COUNT),
            other_states: record.list_field(schema::OTHER_STATES),
            other_cities: record.list_field(schema::OTHER_CITIES),
            verified: record.bool_field(schema::VERIFIED),
            tags: record.string_field(schema::TAGS),
            name,
            country,
            state,
            city,
        }
    }
}
