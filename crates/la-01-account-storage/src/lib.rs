//! # LA-01 Account Storage - Shared State Container
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Holds every piece of per-account state of a deployed suite: keys, frozen
//! flag, backups, balances, pending dual-signature transfers, recovery
//! proposals and dapp approvals. It owns no behaviour; logic modules read and
//! write these slots through a shared [`StorageHandle`].
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | One storage per deployment | every module and account holds a clone of the same `StorageHandle` |
//! | Accounts initialised once | `AccountStorage::init_account` |
//! | No negative balances | `AccountRecord::debit` |
//! | No lock held past an operation | closure-scoped `read` / `update` / `transact` |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod domain;
pub mod errors;
pub mod storage;

pub use domain::{
    AccountKeys, AccountRecord, BackupAccount, DappCall, DualOperation, Proposal, MAX_BACKUPS,
    MAX_OPERATION_KEYS, NATIVE_ASSET,
};
pub use errors::StorageError;
pub use storage::{AccountBook, AccountStorage, StorageHandle};

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Account Storage";
