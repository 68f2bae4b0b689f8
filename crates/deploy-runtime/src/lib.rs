//! # Deploy Runtime
//!
//! Deploys a complete account suite and wires its pieces together.
//!
//! ## Deployment Sequence
//!
//! | Step | Contract | Constructor arguments |
//! |------|----------|-----------------------|
//! | 1 | `AccountStorage` | none |
//! | 2-7 | six logic modules | storage address |
//! | 8 | `Account` | none |
//! | 9 | `LogicManager` | six logic addresses, confirmation threshold |
//! | 10 | `AccountCreator` | manager, storage, template |
//! | 11 | `MyToken` | name, symbol, decimals |
//! | 12 | `MyNft` | none |
//!
//! Steps 11 and 12 only run when `deploy_test_fixtures` is set. Each step
//! waits for the previous one; the first failure aborts the rest.
//!
//! ## Modules
//!
//! - `config` - layered [`DeployConfig`]
//! - `ports` - the [`ContractDeployer`] outbound port
//! - `adapters` - [`InMemoryChain`]
//! - `deploy` - [`deploy_system`]
//! - `fixtures` - token and NFT fixtures

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod config;
pub mod deploy;
pub mod errors;
pub mod fixtures;
pub mod ports;

pub use adapters::{DeploymentRecord, InMemoryChain};
pub use config::{DeployConfig, FixtureConfig, DEFAULT_CONFIRMATION_THRESHOLD, DEFAULT_DEPLOYER};
pub use deploy::{deploy_system, DeployedSystem, DeploymentSummary};
pub use errors::{ConfigError, DeployError};
pub use fixtures::{deploy_fixtures, Fixtures, NftFixture, TokenFixture};
pub use ports::ContractDeployer;
