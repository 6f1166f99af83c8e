//! Implements a struct that holds the state of the REST server.

use std::{sync::Arc, time::Duration};

use crate::{pagination::PaginationConfig, seed::SeedProvider, store::RecordStore};

/// How long each part of a combined request may take by default.
pub const DEFAULT_COMBINED_TIMEOUT: Duration = Duration::from_secs(10);

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loads and saves the record collection.
    pub store: Arc<dyn RecordStore>,

    /// Provides the records for re-initializing the store.
    pub seed_provider: Arc<dyn SeedProvider>,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,

    /// How long each part of a combined request may take before the whole
    /// request fails.
    pub combined_timeout: Duration,
}

impl AppState {
    /// Create a new [AppState] with the default pagination and timeout settings.
    pub fn new(store: impl RecordStore + 'static, seed_provider: impl SeedProvider + 'static) -> Self {
        Self {
            store: Arc::new(store),
            seed_provider: Arc::new(seed_provider),
            pagination_config: PaginationConfig::default(),
            combined_timeout: DEFAULT_COMBINED_TIMEOUT,
        }
    }

    /// Use `pagination_config` for requests that do not specify a page.
    pub fn with_pagination_config(mut self, pagination_config: PaginationConfig) -> Self {
        self.pagination_config = pagination_config;
        self
    }

    /// Fail combined requests whose parts take longer than `timeout`.
    pub fn with_combined_timeout(mut self, timeout: Duration) -> Self {
        self.combined_timeout = timeout;
        self
    }
}
