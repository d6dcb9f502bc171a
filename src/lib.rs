//! Data access and normalization layer for a location-hierarchical company
//! directory backed by a remote tabular source.
//!
//! The crate centers on [`Directory`], which owns the remote client and the
//! caches and exposes the reads a rendering layer consumes: the full company
//! collection, single-company lookups, related companies, location pages,
//! and filtered searches. Supporting modules handle URL slug normalization
//! ([`util::slug`]), linked-record name resolution, retry-wrapped fetching,
//! and first-seen-spelling grouping of companies by location.

pub mod airtable;
pub mod config;
pub mod error;
pub mod model;
pub mod service;
pub mod util;

pub use config::Config;
pub use error::Error;
pub use model::company::{Company, SocialLinks};
pub use model::filter::{CompanyFilter, MetricRange, SortKey};
pub use model::location::{LocationGroup, LocationKind, LocationPage};
pub use service::cache::CacheOutcome;
pub use service::company::Directory;
