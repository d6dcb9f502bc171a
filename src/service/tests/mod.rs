//! Service tests against a mock remote source.

mod directory;
mod transform;

use std::time::Duration;

use staydex_test_utils::constant::{TEST_API_KEY, TEST_BASE_ID};
use staydex_test_utils::TestSetup;

use crate::airtable::Client;
use crate::service::company::Directory;
use crate::service::retry::RetryPolicy;
use crate::service::summary::SummaryStore;

fn test_client(setup: &TestSetup) -> Client {
    Client::new(&setup.api_url(), TEST_API_KEY, TEST_BASE_ID)
}

/// Directory wired to the mock server, retrying without delay.
fn test_directory(setup: &TestSetup, ttl: Duration) -> Directory {
    Directory::new(test_client(setup), ttl, SummaryStore::empty())
        .with_retry(RetryPolicy::new(3, Duration::ZERO))
}
