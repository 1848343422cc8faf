//! Application state for the Compliance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{CompliancePolicy, ConfigLoader};

/// Shared application state.
///
/// Holds the loaded compliance policy. The engine itself is stateless, so
/// this is all handlers share.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the active compliance policy.
    pub fn policy(&self) -> &CompliancePolicy {
        self.config.policy()
    }
}
