//! Configuration loading and management for the Compliance Engine.
//!
//! This module provides functionality to load the compliance policy
//! (alert thresholds and onboarding phases) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use compliance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Tenure threshold: {} days", config.policy().tenure_threshold_days);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, POLICY_FILE};
pub use types::{
    CompliancePolicy, DEFAULT_TENURE_THRESHOLD_DAYS, DETAIL_VIEW_ANNUAL_ALERT_DAYS,
    FIRST_EVALUATION_DUE_DAY, LIST_VIEW_ANNUAL_ALERT_DAYS, PhaseConfig,
};
