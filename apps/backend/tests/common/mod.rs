//! Common test utilities and fixtures for integration tests.
//!
//! Every context gets its own in-memory SQLite store and a clock pinned to
//! [`test_date`], so tests need no external services and never share state.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use chrono::NaiveDate;

use advanced_memory_backend::db::{FixedClock, KeyValueStore, SqliteKvStore};
use advanced_memory_backend::services::CollectionStore;
use advanced_memory_backend::{router, AppState};

/// Date reported as "today" by the test clock.
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
}

/// Test context holding a router over a fresh store.
pub struct TestContext {
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let storage = SqliteKvStore::open_in_memory().expect("Failed to open in-memory store");
        Self::with_storage(Box::new(storage))
    }

    /// Context over a caller-supplied store, e.g. one that fails.
    pub fn with_storage(storage: Box<dyn KeyValueStore>) -> Self {
        let collection = CollectionStore::with_clock(storage, Box::new(FixedClock(test_date())));

        Self {
            app: router(AppState::new(collection)),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }
}
