//! # Manager Events
//!
//! Audit trail of registry changes and mutation lifecycle transitions.

use super::mutation::MutationId;
use serde::Serialize;
use shared_types::{Address, Selector};

/// Something that happened inside the manager.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ManagerEvent {
    /// A module was added to the registry.
    ModuleRegistered {
        /// Module address.
        module: Address,
        /// Module name.
        name: &'static str,
        /// Selectors it claims.
        selectors: Vec<Selector>,
    },
    /// A module left the registry.
    ModuleRemoved {
        /// Module address.
        module: Address,
    },
    /// Confirmation threshold changed.
    ThresholdChanged {
        /// Previous threshold.
        old: usize,
        /// New threshold.
        new: usize,
    },
    /// A governor opened a mutation.
    MutationProposed {
        /// Mutation id.
        id: MutationId,
        /// Proposing governor.
        proposer: Address,
        /// Deadline.
        deadline: u64,
    },
    /// A governor confirmed a mutation.
    MutationConfirmed {
        /// Mutation id.
        id: MutationId,
        /// Confirming governor.
        governor: Address,
        /// Confirmations so far.
        confirmations: usize,
    },
    /// A mutation was applied to the registry.
    MutationExecuted {
        /// Mutation id.
        id: MutationId,
    },
    /// A mutation can no longer pass or failed validation.
    MutationRejected {
        /// Mutation id.
        id: MutationId,
    },
    /// A mutation passed its deadline.
    MutationExpired {
        /// Mutation id.
        id: MutationId,
    },
}
