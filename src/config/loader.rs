//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading compliance
//! policies from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::CompliancePolicy;

/// Name of the policy file inside a configuration directory.
pub const POLICY_FILE: &str = "policy.yaml";

/// Loads and provides access to the compliance policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── policy.yaml   # Thresholds and onboarding phases
/// ```
///
/// # Example
///
/// ```no_run
/// use compliance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Annual alert threshold: {} days", loader.policy().annual_alert_days);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: CompliancePolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `policy.yaml` is missing
    /// - the file contains invalid YAML or misses a required field
    /// - the policy fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policy_path = path.as_ref().join(POLICY_FILE);
        let policy = Self::load_yaml::<CompliancePolicy>(&policy_path)?;
        Self::from_policy(policy)
    }

    /// Wraps an in-memory policy after validating it.
    pub fn from_policy(policy: CompliancePolicy) -> EngineResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }
}
