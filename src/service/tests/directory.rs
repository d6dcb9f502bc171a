//! Tests for the [`Directory`] read operations against a mock remote
//! source, covering snapshot caching, stale fallback, single-record
//! lookups, related companies, location pages, and filtered searches.

use std::sync::Arc;
use std::time::Duration;

use staydex_test_utils::fixtures::{
    company_record_in, location_record, location_record_with_bio,
};
use staydex_test_utils::TestSetup;

use super::test_directory;
use crate::model::filter::{CompanyFilter, MetricRange};
use crate::model::location::LocationKind;
use crate::service::cache::CacheOutcome;

const ONE_HOUR: Duration = Duration::from_secs(3600);

/// Expect one fetch of each table, with the second read served from the
/// cached snapshot (same allocation, no further requests)
#[tokio::test]
async fn serves_cached_snapshot_without_refetching() {
    let mut test = TestSetup::new().await;

    let mock = test.with_table_endpoint(
        "Companies",
        vec![company_record_in("rec1", "Alpha Stays", "recC1", None, None)],
        1,
    );
    test.mocks.push(mock);
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

    let directory = test_directory(&test, ONE_HOUR);

    let first = directory.get_all().await.unwrap();
    let second = directory.get_all().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].name, "Alpha Stays");
    assert_eq!(first[0].slug, "alpha-stays");
    assert_eq!(first[0].country, "France");
    assert_eq!(first[0].state, "Unknown State");
    test.assert_expectations();
}

/// Expect concurrent cold reads to coalesce on one refresh, with both
/// callers handed the same snapshot allocation
#[tokio::test]
async fn coalesces_concurrent_cold_reads() {
    let mut test = TestSetup::new().await;

    let mock = test.with_table_endpoint(
        "Companies",
        vec![company_record_in("rec1", "Alpha Stays", "recC1", None, None)],
        1,
    );
    test.mocks.push(mock);
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

    let directory = Arc::new(test_directory(&test, ONE_HOUR));

    let first = tokio::spawn({
        let directory = Arc::clone(&directory);
        async move { directory.get_all().await }
    });
    let second = tokio::spawn({
        let directory = Arc::clone(&directory);
        async move { directory.get_all().await }
    });

    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    test.assert_expectations();
}

/// Expect a second company fetch once the freshness window has elapsed,
/// while the location tables stay bulk-loaded from the first refresh
#[tokio::test]
async fn refetches_companies_after_ttl_expiry() {
    let mut test = TestSetup::new().await;

    let mock = test.with_table_endpoint(
        "Companies",
        vec![company_record_in("rec1", "Alpha Stays", "recC1", None, None)],
        2,
    );
    test.mocks.push(mock);
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

    let directory = test_directory(&test, Duration::ZERO);

    let first = directory.get_all().await.unwrap();
    let second = directory.get_all().await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second[0].country, "France");
    test.assert_expectations();
}

/// Expect the previous snapshot served as Stale when a refresh fails after
/// the freshness window has elapsed
#[tokio::test]
async fn serves_stale_snapshot_when_refresh_fails() {
    let mut test = TestSetup::new().await;

    let companies_mock = test.with_table_endpoint(
        "Companies",
        vec![company_record_in("rec1", "Alpha Stays", "recC1", None, None)],
        1,
    );
    test.with_table_endpoint(
        "Countries",
        vec![location_record("recC1", "Country Name", "France")],
        1,
    );
    test.with_table_endpoint("States", vec![], 1);
    test.with_table_endpoint("Cities", vec![], 1);

    let directory = test_directory(&test, Duration::ZERO);
    let first = directory.get_all().await.unwrap();

    companies_mock.remove_async().await;
    let failing_mock = test.with_failing_table_endpoint("Companies", 3);

    let outcome = directory.get_all_outcome().await;

    assert!(matches!(outcome, CacheOutcome::Stale(..)));
    let stale = outcome.companies().unwrap();
    assert!(Arc::ptr_eq(&first, stale));
    failing_mock.assert_async().await;
}

/// Expect Unavailable (and an error from get_all) when the company table
/// cannot be fetched and no snapshot was ever captured
#[tokio::test]
async fn reports_unavailable_when_never_populated() {
    let mut test = TestSetup::new().await;

    let failing_mock = test.with_failing_table_endpoint("Companies", 3);
    test.with_table_endpoint("Countries", vec![], 1);
    test.with_table_endpoint("States", vec![], 1);
    test.with_table_endpoint("Cities", vec![], 1);

    let directory = test_directory(&test, ONE_HOUR);

    let outcome = directory.get_all_outcome().await;

    assert!(matches!(outcome, CacheOutcome::Unavailable(_)));
    failing_mock.assert_async().await;
}

/// Expect a refetch on the next read after explicit invalidation
#[tokio::test]
async fn invalidate_drops_the_snapshot() {
    let mut test = TestSetup::new().await;

    let mock = test.with_table_endpoint(
        "Companies",
        vec![company_record_in("rec1", "Alpha Stays", "recC1", None, None)],
        2,
    );
    test.mocks.push(mock);
    test.with_table_endpoint("Countries", vec![], 1);
    test.with_table_endpoint("States", vec![], 1);
    test.with_table_endpoint("Cities", vec![], 1);

    let directory = test_directory(&test, ONE_HOUR);

    let first = directory.get_all().await.unwrap();
    directory.invalidate().await;
    let second = directory.get_all().await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    test.assert_expectations();
}

/// Expect a fully resolved company from a single-record lookup, with each
/// linked location fetched individually
#[tokio::test]
async fn fetches_a_single_company_by_record_id() {
    let mut test = TestSetup::new().await;

    let mock = test.with_record_endpoint(
        "Companies",
        "rec1",
        company_record_in("rec1", "Alpha Stays", "recC1", Some("recS1"), None),
        1,
    );
    test.mocks.push(mock);
    let mock = test.with_record_endpoint(
        "Countries",
        "recC1",
        location_record("recC1", "Country Name", "France"),
        1,
    );
    test.mocks.push(mock);
    let mock = test.with_record_endpoint(
        "States",
        "recS1",
        location_record("recS1", "State Name", "Provence"),
        1,
    );
    test.mocks.push(mock);

    let directory = test_directory(&test, ONE_HOUR);

    let company = directory.get_company("rec1").await.unwrap().unwrap();

    assert_eq!(company.name, "Alpha Stays");
    assert_eq!(company.country, "France");
    assert_eq!(company.state, "Provence");
    assert_eq!(company.city, "Unknown City");
    assert_eq!(company.rating, Some(4.5));
    test.assert_expectations();
}

/// Expect None when the source reports the record does not exist
#[tokio::test]
async fn returns_none_for_a_missing_company() {
    let mut test = TestSetup::new().await;

    let mock = test.with_missing_record_endpoint("Companies", "recGone", 1);
    test.mocks.push(mock);

    let directory = test_directory(&test, ONE_HOUR);

    let company = directory.get_company("recGone").await.unwrap();

    assert!(company.is_none());
    test.assert_expectations();
}

/// Expect related companies scoped to the same state or city, excluding the
/// company itself
#[tokio::test]
async fn finds_related_companies_in_the_same_state_or_city() {
    let mut test = TestSetup::new().await;

    // Warm the location cache through one full refresh, then retire the
    // unfiltered company mock so the scoped request has its own.
    let companies_mock = test.with_table_endpoint("Companies", vec![], 1);
    test.with_table_endpoint(
        "Countries",
        vec![location_record("recC1", "Country Name", "United States")],
        1,
    );
    test.with_table_endpoint(
        "States",
        vec![location_record("recS1", "State Name", "Texas")],
        1,
    );
    test.with_table_endpoint(
        "Cities",
        vec![location_record("recT1", "City Name", "Austin")],
        1,
    );

    let directory = test_directory(&test, ONE_HOUR);
    directory.get_all().await.unwrap();
    companies_mock.remove_async().await;

    let mock = test.with_record_endpoint(
        "Companies",
        "rec1",
        company_record_in("rec1", "Alpha Stays", "recC1", Some("recS1"), Some("recT1")),
        1,
    );
    test.mocks.push(mock);
    let mock = test.with_filtered_table_endpoint(
        "Companies",
        "AND(RECORD_ID() != 'rec1', OR({HQ State} = 'recS1', {HQ City} = 'recT1'))",
        vec![
            company_record_in("rec2", "Beta Rentals", "recC1", Some("recS1"), None),
            company_record_in("rec3", "Gamma Homes", "recC1", None, Some("recT1")),
        ],
        1,
    );
    test.mocks.push(mock);

    let related = directory.get_related("rec1").await.unwrap();

    assert_eq!(related.len(), 2);
    assert_eq!(related[0].name, "Beta Rentals");
    assert_eq!(related[0].state, "Texas");
    assert_eq!(related[1].name, "Gamma Homes");
    assert_eq!(related[1].city, "Austin");
    test.assert_expectations();
}

/// Expect the location's bio from its reference table
#[tokio::test]
async fn fetches_a_location_bio() {
    let mut test = TestSetup::new().await;

    let mock = test.with_filtered_table_endpoint(
        "Cities",
        "{City Name} = 'Austin'",
        vec![location_record_with_bio(
            "recT1",
            "City Name",
            "Austin",
            "City Bio",
            "Live music capital of the world.",
        )],
        1,
    );
    test.mocks.push(mock);

    let directory = test_directory(&test, ONE_HOUR);

    let bio = directory.get_bio(LocationKind::City, "Austin").await.unwrap();

    assert_eq!(bio.as_deref(), Some("Live music capital of the world."));
    test.assert_expectations();
}

/// Expect a location page with slugs resolved to canonical spellings, the
/// scoped company list, and the most specific location's bio
#[tokio::test]
async fn builds_a_nested_location_page() {
    let mut test = TestSetup::new().await;

    // Warm the location cache, then retire the unfiltered mocks so every
    // remaining request must carry a filter formula.
    let companies_mock = test.with_table_endpoint("Companies", vec![], 1);
    let countries_mock = test.with_table_endpoint(
        "Countries",
        vec![location_record("recC1", "Country Name", "United States")],
        1,
    );
    let states_mock = test.with_table_endpoint(
        "States",
        vec![location_record("recS1", "State Name", "Texas")],
        1,
    );
    let cities_mock = test.with_table_endpoint(
        "Cities",
        vec![location_record("recT1", "City Name", "Austin")],
        1,
    );

    let directory = test_directory(&test, ONE_HOUR);
    directory.get_all().await.unwrap();
    companies_mock.remove_async().await;
    countries_mock.remove_async().await;
    states_mock.remove_async().await;
    cities_mock.remove_async().await;

    let mock = test.with_filtered_table_endpoint(
        "Countries",
        "{Country Name} = 'united states'",
        vec![location_record("recC1", "Country Name", "United States")],
        1,
    );
    test.mocks.push(mock);
    let mock = test.with_filtered_table_endpoint(
        "States",
        "{State Name} = 'texas'",
        vec![location_record("recS1", "State Name", "Texas")],
        1,
    );
    test.mocks.push(mock);
    let mock = test.with_filtered_table_endpoint(
        "Cities",
        "{City Name} = 'austin'",
        vec![location_record("recT1", "City Name", "Austin")],
        1,
    );
    test.mocks.push(mock);
    let mock = test.with_filtered_table_endpoint(
        "Cities",
        "{City Name} = 'Austin'",
        vec![location_record_with_bio(
            "recT1",
            "City Name",
            "Austin",
            "City Bio",
            "Live music capital of the world.",
        )],
        1,
    );
    test.mocks.push(mock);
    let mock = test.with_filtered_table_endpoint(
        "Companies",
        "AND({HQ Country} = 'United States', {HQ State} = 'Texas', {HQ City} = 'Austin')",
        vec![company_record_in(
            "rec1",
            "Alpha Stays",
            "recC1",
            Some("recS1"),
            Some("recT1"),
        )],
        1,
    );
    test.mocks.push(mock);

    let page = directory
        .location_page("united-states", Some("texas"), Some("austin"))
        .await
        .unwrap();

    assert_eq!(page.companies.len(), 1);
    assert_eq!(page.companies[0].name, "Alpha Stays");
    assert_eq!(page.companies[0].city, "Austin");
    assert_eq!(page.bio.as_deref(), Some("Live music capital of the world."));
    test.assert_expectations();
}

/// Expect local search to filter the cached snapshot without further
/// requests
#[tokio::test]
async fn searches_the_cached_snapshot_locally() {
    let mut test = TestSetup::new().await;

    let mock = test.with_table_endpoint(
        "Companies",
        vec![
            company_record_in("rec1", "Alpha Stays", "recC1", Some("recS1"), Some("recT1")),
            company_record_in("rec2", "Beta Rentals", "recC1", None, None),
        ],
        1,
    );
    test.mocks.push(mock);
    test.with_table_endpoint(
        "Countries",
        vec![location_record("recC1", "Country Name", "United States")],
        1,
    );
    test.with_table_endpoint(
        "States",
        vec![location_record("recS1", "State Name", "Texas")],
        1,
    );
    test.with_table_endpoint(
        "Cities",
        vec![location_record("recT1", "City Name", "Austin")],
        1,
    );

    let directory = test_directory(&test, ONE_HOUR);

    let filter = CompanyFilter {
        city: Some("austin".to_string()),
        ..Default::default()
    };
    let results = directory.search(&filter).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Alpha Stays");
    test.assert_expectations();
}

/// Expect remote search to delegate the criteria as a filter formula
#[tokio::test]
async fn delegates_search_criteria_to_the_source() {
    let mut test = TestSetup::new().await;

    test.with_table_endpoint("Countries", vec![], 1);
    test.with_table_endpoint("States", vec![], 1);
    test.with_table_endpoint(
        "Cities",
        vec![location_record("recT1", "City Name", "Austin")],
        1,
    );
    let mock = test.with_filtered_table_endpoint(
        "Companies",
        "AND(SEARCH('austin', LOWER({HQ City})), AND({Rating} >= 4, {Rating} <= 5))",
        vec![company_record_in("rec1", "Alpha Stays", "recC1", None, Some("recT1"))],
        1,
    );
    test.mocks.push(mock);

    let directory = test_directory(&test, ONE_HOUR);

    let filter = CompanyFilter {
        city: Some("Austin".to_string()),
        rating: Some(MetricRange::new(4.0, 5.0)),
        ..Default::default()
    };
    let results = directory.search_remote(&filter).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].city, "Austin");
    test.assert_expectations();
}
