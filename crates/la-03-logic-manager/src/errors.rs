//! # Error Types
//!
//! Configuration errors raised while building or mutating the selector
//! registry, and the manager-level errors wrapping them.

use crate::domain::{MutationId, MutationStatus};
use la_02_logic_modules::LogicError;
use shared_types::{Address, Selector};
use thiserror::Error;

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

/// A registry that would violate its construction rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Threshold outside `1..=limit`.
    #[error("invalid threshold {threshold}: must be between 1 and {limit}")]
    InvalidThreshold {
        /// Requested threshold.
        threshold: usize,
        /// Upper bound, the module count.
        limit: usize,
    },

    /// Two modules claim the same selector.
    #[error("selector {selector} claimed by both {first:?} and {second:?}")]
    OverlappingSelector {
        /// Contested selector.
        selector: Selector,
        /// Module already holding the selector.
        first: Address,
        /// Module claiming it again.
        second: Address,
    },

    /// Module address registered twice.
    #[error("duplicate module: {0:?}")]
    DuplicateModule(Address),

    /// Module is bound to a different storage than the rest of the registry.
    #[error("module {module:?} bound to storage {actual:?}, registry uses {expected:?}")]
    StorageMismatch {
        /// Offending module.
        module: Address,
        /// Storage the registry is bound to.
        expected: Address,
        /// Storage the module is bound to.
        actual: Address,
    },

    /// Module address is not registered.
    #[error("module not registered: {0:?}")]
    ModuleNotFound(Address),

    /// Fewer governors than confirmations required.
    #[error("{governors} governors cannot reach threshold {threshold}")]
    InsufficientGovernors {
        /// Governors installed.
        governors: usize,
        /// Confirmations required.
        threshold: usize,
    },

    /// Governor listed twice.
    #[error("duplicate governor: {0:?}")]
    DuplicateGovernor(Address),

    /// Governor address is zero.
    #[error("zero address cannot govern")]
    ZeroGovernor,
}

// =============================================================================
// MANAGER ERRORS
// =============================================================================

/// Errors returned by the logic manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    /// Registry construction or mutation rule violated.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// No module claims the selector.
    #[error("unknown selector: {0}")]
    UnknownSelector(Selector),

    /// The resolved module failed; its error is passed through unchanged.
    #[error("dispatch to {name} ({module:?}) failed")]
    DispatchFailure {
        /// Module that handled the call.
        module: Address,
        /// Module name.
        name: &'static str,
        /// Error returned by the module.
        #[source]
        source: LogicError,
    },

    /// Caller is not a governor.
    #[error("not authorized: {0:?} is not a governor")]
    NotAuthorized(Address),

    /// No mutation with this id.
    #[error("mutation not found: {0}")]
    MutationNotFound(MutationId),

    /// Governor already voted on the mutation.
    #[error("governor {governor:?} already voted on mutation {id}")]
    AlreadyVoted {
        /// Mutation voted on.
        id: MutationId,
        /// Governor voting twice.
        governor: Address,
    },

    /// Mutation deadline passed.
    #[error("mutation expired: {0}")]
    MutationExpired(MutationId),

    /// Mutation already reached a terminal state.
    #[error("mutation {id} is closed ({status:?})")]
    MutationClosed {
        /// Closed mutation.
        id: MutationId,
        /// Terminal status it reached.
        status: MutationStatus,
    },
}

impl ManagerError {
    /// The module error behind a dispatch failure.
    #[must_use]
    pub fn logic_error(&self) -> Option<&LogicError> {
        match self {
            ManagerError::DispatchFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}
