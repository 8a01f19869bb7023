//! Application state for the tax engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, TaxSchedule};

/// Shared application state.
///
/// Holds the validated tax schedule. It is immutable after startup, so
/// handlers read it through the `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded statutory schedule.
    schedule: Arc<TaxSchedule>,
}

impl AppState {
    /// Creates a new application state from a loaded schedule.
    pub fn new(schedule: TaxSchedule) -> Self {
        Self {
            schedule: Arc::new(schedule),
        }
    }

    /// Returns a reference to the tax schedule.
    pub fn schedule(&self) -> &TaxSchedule {
        &self.schedule
    }
}

impl From<ConfigLoader> for AppState {
    fn from(config: ConfigLoader) -> Self {
        Self::new(config.into_schedule())
    }
}
