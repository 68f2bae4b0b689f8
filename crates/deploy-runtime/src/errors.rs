//! # Error Types

use la_03_logic_manager::{ConfigurationError, ManagerError};
use la_05_account_creator::CreatorError;
use thiserror::Error;

/// Invalid or unreadable deployment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Deployer address is zero.
    #[error("deployer address must not be zero")]
    ZeroDeployer,

    /// Threshold outside `1..=6`.
    #[error("confirmation threshold {threshold} must be between 1 and {modules}")]
    InvalidThreshold {
        /// Configured threshold.
        threshold: usize,
        /// Number of logic modules deployed.
        modules: usize,
    },

    /// Explicit governor list too short for the threshold.
    #[error("{governors} governors cannot reach threshold {threshold}")]
    InsufficientGovernors {
        /// Governors listed in the config.
        governors: usize,
        /// Configured threshold.
        threshold: usize,
    },

    /// Config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path taken from `LA_CONFIG`.
        path: String,
        /// Underlying read failure.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`crate::DeployConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that abort a deployment.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Configuration rejected before anything was deployed.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The chain refused a contract deployment.
    #[error("deployment of {contract} failed: {reason}")]
    Deployment {
        /// Name of the contract being deployed.
        contract: String,
        /// Reason reported by the chain.
        reason: String,
    },

    /// Logic manager construction failed.
    #[error("logic manager: {0}")]
    Manager(#[from] ManagerError),

    /// Governor installation failed.
    #[error("logic manager governors: {0}")]
    Governors(#[from] ConfigurationError),

    /// Account creator construction failed.
    #[error("account creator: {0}")]
    Creator(#[from] CreatorError),
}
