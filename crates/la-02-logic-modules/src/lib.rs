//! # LA-02 Logic Modules - Stateless Account Behaviour
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Implements the six logic modules of an account suite. A module holds no
//! account state of its own: it is bound at construction to the shared
//! [`la_01_account_storage::StorageHandle`] and reads or writes the calling
//! account's record on every operation.
//!
//! ## Dispatch Contract
//!
//! Each module declares a fixed selector set through [`LogicModule::selectors`].
//! The logic manager routes a selector to the one module claiming it and
//! passes the [`shared_types::CallContext`] through unchanged; the module
//! authorises `ctx.caller` against the keys stored for `ctx.account`.
//!
//! ## Module Overview
//!
//! | Module | Required key |
//! |--------|--------------|
//! | [`AccountLogic`] | admin / adding |
//! | [`TransferLogic`] | asset |
//! | [`DualsigsLogic`] | asset + active backup |
//! | [`DappLogic`] | admin / operation |
//! | [`CommonStaticLogic`] | none (read-only) |
//! | [`ProposalLogic`] | active backups |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod errors;
pub mod modules;
pub mod ports;

pub use errors::LogicError;
pub use modules::{
    AccountLogic, CommonStaticLogic, DappLogic, DualsigsLogic, ModuleKind, ProposalLogic,
    TransferLogic,
};
pub use ports::{LogicModule, OperationTable};

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Logic Modules";
