//! # LA-03 Logic Manager - Selector Registry
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Holds the authoritative mapping from operation selectors to logic
//! modules. Every account in a deployment shares one manager and forwards
//! each call through [`LogicManager::dispatch`].
//!
//! ## Registry Rules
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | A selector maps to at most one module | `SelectorRegistry::build` rejects overlaps |
//! | `1 <= threshold <= module count` | checked at construction and on every mutation |
//! | One storage per registry | modules bound elsewhere are rejected |
//! | Resolution stable between executed mutations | registry replaced only by `confirm` |
//!
//! ## Governance
//!
//! The threshold is the number of governor confirmations a registry
//! mutation needs before it executes. Mutations expire after a TTL
//! (seven days by default).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod domain;
pub mod errors;
pub mod service;

pub use domain::{
    ManagerEvent, MutationId, MutationStatus, PendingMutation, RegistryMutation, SelectorRegistry,
    DEFAULT_MUTATION_TTL_SECS,
};
pub use errors::{ConfigurationError, ManagerError};
pub use service::{default_governors, LogicManager};

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 3;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Logic Manager";
