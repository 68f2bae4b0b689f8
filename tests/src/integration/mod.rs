//! # Cross-Crate Integration
//!
//! Every test deploys a full suite through [`deploy_runtime::deploy_system`]
//! and drives accounts only through their selectors.

#[cfg(test)]
pub(crate) mod harness;

pub mod account_flows;
pub mod deployment;
pub mod governance;
