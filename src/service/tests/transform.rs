//! Tests for batch record transformation.

use std::time::Duration;

use serde_json::json;
use staydex_test_utils::fixtures::{company_record_in, location_record};
use staydex_test_utils::TestSetup;

use super::test_client;
use crate::airtable::Record;
use crate::service::location::LocationNameCache;
use crate::service::retry::RetryPolicy;
use crate::service::summary::{SummaryEntry, SummaryStore};
use crate::service::transform::Transformer;

fn records(values: Vec<serde_json::Value>) -> Vec<Record> {
    values
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap())
        .collect()
}

/// Expect one fetch per location table regardless of batch size, with every
/// record resolved from the bulk-loaded cache
#[tokio::test]
async fn batch_transform_prefetches_each_location_table_once() {
    let mut test = TestSetup::new().await;
    let mock = test.with_table_endpoint(
        "Countries",
        vec![location_record("recC1", "Country Name", "France")],
        1,
    );
    test.mocks.push(mock);
    let mock = test.with_table_endpoint("States", vec![], 1);
    test.mocks.push(mock);
    let mock = test.with_table_endpoint("Cities", vec![], 1);
    test.mocks.push(mock);

    let client = test_client(&test);
    let cache = LocationNameCache::new();
    let summaries = SummaryStore::empty();
    let transformer = Transformer::new(
        &client,
        &cache,
        &summaries,
        RetryPolicy::new(3, Duration::ZERO),
    );

    let batch = records(vec![
        company_record_in("rec1", "Alpha Stays", "recC1", None, None),
        company_record_in("rec2", "Beta Rentals", "recC1", None, None),
        company_record_in("rec3", "Gamma Homes", "recC1", None, None),
    ]);
    let companies = transformer.transform_batch(&batch).await.unwrap();

    assert_eq!(companies.len(), 3);
    assert!(companies.iter().all(|company| company.country == "France"));
    test.assert_expectations();
}

/// Expect the image gallery to keep only non-empty http or root-relative
/// entries, in column order
#[tokio::test]
async fn batch_transform_validates_image_urls() {
    let mut test = TestSetup::new().await;
    let mock = test.with_table_endpoint(
        "Countries",
        vec![location_record("recC1", "Country Name", "France")],
        1,
    );
    test.mocks.push(mock);
    let mock = test.with_table_endpoint("States", vec![], 1);
    test.mocks.push(mock);
    let mock = test.with_table_endpoint("Cities", vec![], 1);
    test.mocks.push(mock);

    let client = test_client(&test);
    let cache = LocationNameCache::new();
    let summaries = SummaryStore::empty();
    let transformer = Transformer::new(
        &client,
        &cache,
        &summaries,
        RetryPolicy::new(3, Duration::ZERO),
    );

    let mut record = company_record_in("rec1", "Alpha Stays", "recC1", None, None);
    let fields = record["fields"].as_object_mut().unwrap();
    fields.insert("Image 1".to_string(), json!("https://cdn.example.com/1.jpg"));
    fields.insert("Image 2".to_string(), json!(""));
    fields.insert("Image 3".to_string(), json!("ftp://cdn.example.com/3.jpg"));
    fields.insert("Image 4".to_string(), json!("/gallery/4.jpg"));

    let batch = records(vec![record]);
    let companies = transformer.transform_batch(&batch).await.unwrap();

    assert_eq!(
        companies[0].images,
        vec!["https://cdn.example.com/1.jpg", "/gallery/4.jpg"]
    );
    test.assert_expectations();
}

/// Expect records without a display name dropped while the batch continues
#[tokio::test]
async fn batch_transform_drops_nameless_records() {
    let mut test = TestSetup::new().await;
    test.with_table_endpoint("Countries", vec![], 1);
    test.with_table_endpoint("States", vec![], 1);
    test.with_table_endpoint("Cities", vec![], 1);

    let client = test_client(&test);
    let cache = LocationNameCache::new();
    let summaries = SummaryStore::empty();
    let transformer = Transformer::new(
        &client,
        &cache,
        &summaries,
        RetryPolicy::new(3, Duration::ZERO),
    );

    let batch = records(vec![
        company_record_in("rec1", "Alpha Stays", "recC1", None, None),
        json!({ "id": "rec2", "fields": { "Rating": 4.2 } }),
        json!({ "id": "rec3", "fields": { "Name": "" } }),
    ]);
    let companies = transformer.transform_batch(&batch).await.unwrap();

    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].name, "Alpha Stays");
}

/// Expect key features attached from the summary side table by record id
#[tokio::test]
async fn batch_transform_attaches_summaries() {
    let mut test = TestSetup::new().await;
    test.with_table_endpoint("Countries", vec![], 1);
    test.with_table_endpoint("States", vec![], 1);
    test.with_table_endpoint("Cities", vec![], 1);

    let client = test_client(&test);
    let cache = LocationNameCache::new();
    let summaries = SummaryStore::from_entries(vec![SummaryEntry {
        id: "rec1".to_string(),
        summary: "Full-service management across three markets.".to_string(),
    }]);
    let transformer = Transformer::new(
        &client,
        &cache,
        &summaries,
        RetryPolicy::new(3, Duration::ZERO),
    );

    let batch = records(vec![
        company_record_in("rec1", "Alpha Stays", "recC1", None, None),
        company_record_in("rec2", "Beta Rentals", "recC1", None, None),
    ]);
    let companies = transformer.transform_batch(&batch).await.unwrap();

    assert_eq!(
        companies[0].key_features.as_deref(),
        Some("Full-service management across three markets.")
    );
    assert!(companies[1].key_features.is_none());
}
