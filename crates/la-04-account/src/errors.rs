//! # Error Types

use la_01_account_storage::StorageError;
use la_03_logic_manager::ManagerError;
use shared_types::Selector;
use thiserror::Error;

/// Errors returned by an account instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Resolution or module execution failed.
    #[error(transparent)]
    Manager(#[from] ManagerError),

    /// Direct storage access failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Static call targeted a module that may write state.
    #[error("selector {0} is not handled by a static module")]
    NotStatic(Selector),
}
