use mockito::{Mock, Server, ServerGuard};

/// Mock remote source for service tests.
///
/// Deliberately does not depend on the main crate; tests construct their own
/// client against [`TestSetup::api_url`]. This keeps the dependency graph
/// acyclic while the main crate's dev-dependencies pull this one in.
pub struct TestSetup {
    pub server: ServerGuard,
    pub mocks: Vec<Mock>,
}

impl TestSetup {
    pub async fn new() -> Self {
        TestSetup {
            server: Server::new_async().await,
            mocks: Vec::new(),
        }
    }

    /// Base URL the client under test should be pointed at.
    pub fn api_url(&self) -> String {
        self.server.url()
    }

    /// Assert all mock endpoints were called as expected.
    pub fn assert_expectations(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
