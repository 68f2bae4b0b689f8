//! # LA-04 Account - Template and Instances
//!
//! **Subsystem ID:** 4
//!
//! ## Purpose
//!
//! An account is a thin proxy: it owns an address and forwards every call
//! to the logic manager of its suite, which picks the module. Account state
//! lives in the shared storage, keyed by the account address.
//!
//! The [`AccountTemplate`] is deployed once per suite; the account creator
//! derives new account addresses from it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod account;
pub mod errors;

pub use account::{AccountInstance, AccountTemplate};
pub use errors::AccountError;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 4;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Account";
