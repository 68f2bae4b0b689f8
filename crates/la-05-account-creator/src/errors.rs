//! # Error Types

use la_01_account_storage::StorageError;
use shared_types::Address;
use thiserror::Error;

/// Errors raised by the account creator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreatorError {
    /// Manager modules are bound to a different storage instance.
    #[error("manager uses storage {manager_storage:?}, creator was given another instance at {storage:?}")]
    StorageMismatch {
        /// Storage the manager's modules are bound to.
        manager_storage: Address,
        /// Storage handed to the creator.
        storage: Address,
    },

    /// A required key is the zero address.
    #[error("invalid keys: {0} key is zero")]
    InvalidKeys(&'static str),

    /// Address was not produced by this creator.
    #[error("unknown account: {0:?}")]
    UnknownAccount(Address),

    /// Storage initialisation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
