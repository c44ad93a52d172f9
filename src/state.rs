//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::config::Config;
use crate::db::repositories::RoadblockStore;
use crate::selection::Calendar;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Roadblock banner storage
    roadblocks: Arc<dyn RoadblockStore>,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(roadblocks: Arc<dyn RoadblockStore>, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner { roadblocks, config }),
        }
    }

    /// Get the roadblock store
    pub fn roadblocks(&self) -> &dyn RoadblockStore {
        self.inner.roadblocks.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Calendar used for recurrence and dismissal comparisons
    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.inner.config.calendar.offset)
    }
}
