//! # Error Types
//!
//! Errors raised by the shared account storage.

use shared_types::{Address, Hash, U256};
use thiserror::Error;

/// Errors from account storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No record exists for the account.
    #[error("account not found: {0:?}")]
    AccountNotFound(Address),

    /// The account record was already initialised.
    #[error("account already initialized: {0:?}")]
    AlreadyInitialized(Address),

    /// Balance too low for a debit.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount the debit needs.
        required: U256,
        /// Current balance.
        available: U256,
    },

    /// Operation key list is full.
    #[error("operation key limit reached: {max}")]
    OperationKeyLimit {
        /// Maximum number of operation keys.
        max: usize,
    },

    /// Key is already registered on the account.
    #[error("duplicate key: {0:?}")]
    DuplicateKey(Address),

    /// Backup is already registered on the account.
    #[error("duplicate backup: {0:?}")]
    DuplicateBackup(Address),

    /// Backup is not registered on the account.
    #[error("backup not found: {0:?}")]
    BackupNotFound(Address),

    /// Backup list is full.
    #[error("backup limit reached: {max}")]
    BackupLimit {
        /// Maximum number of backups.
        max: usize,
    },

    /// No pending dual-signature operation with this hash.
    #[error("dual operation not found: {0:?}")]
    DualOperationNotFound(Hash),

    /// No open proposal from this proposer.
    #[error("proposal not found for proposer {0:?}")]
    ProposalNotFound(Address),

    /// The proposer already has an open proposal.
    #[error("proposal already open for proposer {0:?}")]
    ProposalExists(Address),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::InsufficientBalance {
            required: U256::from(10),
            available: U256::from(3),
        };
        assert_eq!(err.to_string(), "insufficient balance: required 10, available 3");

        let err = StorageError::OperationKeyLimit { max: 8 };
        assert!(err.to_string().contains('8'));
    }
}
