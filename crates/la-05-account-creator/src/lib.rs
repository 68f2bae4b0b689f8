//! # LA-05 Account Creator - Account Factory
//!
//! **Subsystem ID:** 5
//!
//! ## Purpose
//!
//! Produces new accounts wired to the suite the creator was deployed with:
//! its logic manager, its shared storage and its account template. The
//! triple is fixed for the lifetime of the creator.
//!
//! ## Creation Steps
//!
//! 1. Validate the admin, asset and adding keys.
//! 2. Derive the account address (CREATE2 over the template init code).
//! 3. Initialise the account record in shared storage.
//! 4. Return an [`la_04_account::AccountInstance`] bound to the suite.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod creator;
pub mod errors;

pub use creator::{account_salt, AccountCreator};
pub use errors::CreatorError;

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 5;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Account Creator";
