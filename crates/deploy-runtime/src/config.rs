//! # Deployment Configuration
//!
//! Layered like the node configuration it grew out of: compiled defaults,
//! then an optional JSON file named by `LA_CONFIG`, then individual
//! environment overrides.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LA_CONFIG` | path of a JSON file with any subset of fields |
//! | `LA_DEPLOYER` | `deployer` |
//! | `LA_CONFIRMATION_THRESHOLD` | `confirmation_threshold` |
//! | `LA_DEPLOY_FIXTURES` | `deploy_test_fixtures` |

use crate::errors::ConfigError;
use la_02_logic_modules::ModuleKind;
use la_03_logic_manager::{default_governors, DEFAULT_MUTATION_TTL_SECS};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::path::Path;
use tracing::{info, warn};

/// Deployer used when none is configured.
pub const DEFAULT_DEPLOYER: Address = Address::new([0x11; 20]);

/// Confirmation threshold the suite is deployed with.
pub const DEFAULT_CONFIRMATION_THRESHOLD: usize = 4;

/// Complete deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Account sending the deployments.
    pub deployer: Address,
    /// Governor confirmations the logic manager requires.
    pub confirmation_threshold: usize,
    /// Manager governors; derived from the deployer when empty.
    pub governors: Vec<Address>,
    /// How long a registry mutation stays open.
    pub mutation_ttl_secs: u64,
    /// Deploy the token and NFT fixtures after wiring.
    pub deploy_test_fixtures: bool,
    /// Fixture metadata.
    pub fixtures: FixtureConfig,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            deployer: DEFAULT_DEPLOYER,
            confirmation_threshold: DEFAULT_CONFIRMATION_THRESHOLD,
            governors: Vec::new(),
            mutation_ttl_secs: DEFAULT_MUTATION_TTL_SECS,
            deploy_test_fixtures: true,
            fixtures: FixtureConfig::default(),
        }
    }
}

/// Test fixture metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Fungible token name.
    pub token_name: String,
    /// Fungible token symbol.
    pub token_symbol: String,
    /// Fungible token decimals.
    pub token_decimals: u8,
    /// NFT contract name.
    pub nft_name: String,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            token_name: "MyToken".to_string(),
            token_symbol: "MTK".to_string(),
            token_decimals: 4,
            nft_name: "MyNft".to_string(),
        }
    }
}

impl DeployConfig {
    /// Defaults, then `LA_CONFIG`, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("LA_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads a JSON config file; missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_str(&raw)?;
        info!(path = %path.display(), "Loaded deployment config file");
        Ok(config)
    }

    /// Applies `LA_*` overrides read through `lookup`. Unparseable values
    /// are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("LA_DEPLOYER") {
            match raw.parse() {
                Ok(deployer) => {
                    self.deployer = deployer;
                    info!(deployer = ?self.deployer, "Deployer set from environment");
                }
                Err(e) => warn!(value = %raw, error = %e, "LA_DEPLOYER is not a valid address"),
            }
        }
        if let Some(raw) = lookup("LA_CONFIRMATION_THRESHOLD") {
            match raw.parse() {
                Ok(threshold) => self.confirmation_threshold = threshold,
                Err(_) => warn!(value = %raw, "LA_CONFIRMATION_THRESHOLD must be an integer"),
            }
        }
        if let Some(raw) = lookup("LA_DEPLOY_FIXTURES") {
            match raw.parse() {
                Ok(enabled) => self.deploy_test_fixtures = enabled,
                Err(_) => warn!(value = %raw, "LA_DEPLOY_FIXTURES must be true or false"),
            }
        }
    }

    /// Rejects configurations the deployment would fail on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deployer.is_zero() {
            return Err(ConfigError::ZeroDeployer);
        }
        let modules = ModuleKind::ALL.len();
        if self.confirmation_threshold == 0 || self.confirmation_threshold > modules {
            return Err(ConfigError::InvalidThreshold {
                threshold: self.confirmation_threshold,
                modules,
            });
        }
        if !self.governors.is_empty() && self.governors.len() < self.confirmation_threshold {
            return Err(ConfigError::InsufficientGovernors {
                governors: self.governors.len(),
                threshold: self.confirmation_threshold,
            });
        }
        Ok(())
    }

    /// Configured governors, or `threshold` governors derived from the
    /// deployer.
    #[must_use]
    pub fn effective_governors(&self) -> Vec<Address> {
        if self.governors.is_empty() {
            default_governors(self.deployer, self.confirmation_threshold)
        } else {
            self.governors.clone()
        }
    }
}
