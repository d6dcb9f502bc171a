//! Mock endpoint installers for the remote source's REST surface.

use mockito::{Matcher, Mock};
use serde_json::Value;

use crate::constant::TEST_BASE_ID;
use crate::fixtures::record_page;
use crate::TestSetup;

impl TestSetup {
    /// Listing endpoint for a table, answering every query-string variant
    /// with a single page of `records`.
    pub fn with_table_endpoint(
        &mut self,
        table: &str,
        records: Vec<Value>,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/{TEST_BASE_ID}/{table}");

        self.server
            .mock("GET", path.as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(record_page(records).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Listing endpoint that only matches requests carrying exactly this
    /// filter formula.
    pub fn with_filtered_table_endpoint(
        &mut self,
        table: &str,
        formula: &str,
        records: Vec<Value>,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/{TEST_BASE_ID}/{table}");

        self.server
            .mock("GET", path.as_str())
            .match_query(Matcher::UrlEncoded(
                "filterByFormula".into(),
                formula.into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(record_page(records).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Single-record endpoint returning `record`.
    pub fn with_record_endpoint(
        &mut self,
        table: &str,
        record_id: &str,
        record: Value,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/{TEST_BASE_ID}/{table}/{record_id}");

        self.server
            .mock("GET", path.as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(record.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Single-record endpoint reporting the record does not exist.
    pub fn with_missing_record_endpoint(
        &mut self,
        table: &str,
        record_id: &str,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/{TEST_BASE_ID}/{table}/{record_id}");

        self.server
            .mock("GET", path.as_str())
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"type": "NOT_FOUND"}}"#)
            .expect(expected_requests)
            .create()
    }

    /// Listing endpoint that fails every request with a server error.
    pub fn with_failing_table_endpoint(&mut self, table: &str, expected_requests: usize) -> Mock {
        let path = format!("/{TEST_BASE_ID}/{table}");

        self.server
            .mock("GET", path.as_str())
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error": {"type": "SERVER_ERROR"}}"#)
            .expect(expected_requests)
            .create()
    }

    /// Batch-update endpoint for a table.
    pub fn with_update_endpoint(&mut self, table: &str, expected_requests: usize) -> Mock {
        let path = format!("/{TEST_BASE_ID}/{table}");

        self.server
            .mock("PATCH", path.as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"records": []}"#)
            .expect(expected_requests)
            .create()
    }
}
