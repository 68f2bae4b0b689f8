//! # Error Types
//!
//! Errors a logic module returns when it refuses or fails an operation.
//! The manager wraps these unchanged in its dispatch failure.

use la_01_account_storage::StorageError;
use shared_types::{Address, ArgError, Selector};
use thiserror::Error;

/// Errors raised by logic modules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicError {
    /// Caller does not hold the key the operation requires.
    #[error("unauthorized caller {caller:?}: requires {required}")]
    Unauthorized {
        /// Address that made the call.
        caller: Address,
        /// Key role the operation requires.
        required: &'static str,
    },

    /// Account is frozen.
    #[error("account frozen: {0:?}")]
    AccountFrozen(Address),

    /// The module does not implement this selector.
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(Selector),

    /// Argument decoding failed.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgError),

    /// Storage rejected the change.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Address argument must not be zero.
    #[error("zero address not allowed for {0}")]
    ZeroAddress(&'static str),

    /// Dapp has not been approved by the admin.
    #[error("dapp not approved: {0:?}")]
    DappNotApproved(Address),

    /// The account has no backup able to co-sign.
    #[error("no active backup on account {0:?}")]
    NoActiveBackup(Address),

    /// Backup already approved this proposal.
    #[error("already approved by {0:?}")]
    AlreadyApproved(Address),

    /// Proposal lacks the backup majority.
    #[error("proposal not ready: {approvals} approvals, {required} required")]
    ProposalNotReady {
        /// Approvals from currently active backups.
        approvals: usize,
        /// Majority of active backups.
        required: usize,
    },
}
