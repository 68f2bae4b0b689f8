//! # Registry Mutations
//!
//! Changes to a live registry go through a confirmation state machine:
//!
//! ```text
//! [Proposed] ──confirm──→ [PartiallyConfirmed(n)] ──confirm (n+1 == threshold)──→ apply
//!     │                           │                                                  │
//!     │                           │                                  valid ──→ [Executed]
//!     │                           │                                invalid ──→ [Rejected]
//!     ├──reject (threshold unreachable)──────────────────────────────────────→ [Rejected]
//!     └──any input after deadline──────────────────────────────────────────→ [Expired]
//! ```
//!
//! `Executed`, `Rejected` and `Expired` are terminal.

use super::registry::SelectorRegistry;
use crate::errors::{ConfigurationError, ManagerError};
use la_02_logic_modules::LogicModule;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Default time a mutation stays open: seven days.
pub const DEFAULT_MUTATION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Sequential mutation identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MutationId(pub u64);

impl fmt::Display for MutationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationStatus {
    /// Opened, no confirmations yet.
    Proposed,
    /// Some confirmations, below threshold.
    PartiallyConfirmed(usize),
    /// Applied to the registry.
    Executed,
    /// Failed validation or can no longer reach the threshold.
    Rejected,
    /// Deadline passed before execution.
    Expired,
}

impl MutationStatus {
    /// True while the mutation accepts votes.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, MutationStatus::Proposed | MutationStatus::PartiallyConfirmed(_))
    }
}

/// A change to the selector registry.
#[derive(Clone, Debug)]
pub enum RegistryMutation {
    /// Register an additional module.
    AddModule(Arc<dyn LogicModule>),
    /// Drop the module at this address and its selectors.
    RemoveModule(Address),
    /// Change the confirmation threshold.
    SetThreshold(usize),
}

impl RegistryMutation {
    /// Registry that results from applying this mutation to `registry`.
    pub fn apply(&self, registry: &SelectorRegistry) -> Result<SelectorRegistry, ConfigurationError> {
        match self {
            RegistryMutation::AddModule(module) => registry.with_module(Arc::clone(module)),
            RegistryMutation::RemoveModule(address) => registry.without_module(*address),
            RegistryMutation::SetThreshold(threshold) => registry.with_threshold(*threshold),
        }
    }
}

impl fmt::Display for RegistryMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryMutation::AddModule(module) => write!(f, "add {} at {:?}", module.name(), module.address()),
            RegistryMutation::RemoveModule(address) => write!(f, "remove {address:?}"),
            RegistryMutation::SetThreshold(threshold) => write!(f, "set threshold {threshold}"),
        }
    }
}

/// An open or closed mutation with its votes.
#[derive(Clone, Debug)]
pub struct PendingMutation {
    /// Identifier.
    pub id: MutationId,
    /// Requested change.
    pub mutation: RegistryMutation,
    /// Governor that opened it.
    pub proposer: Address,
    /// Opening time.
    pub created_at: u64,
    /// Last second at which votes are accepted.
    pub deadline: u64,
    confirmations: BTreeSet<Address>,
    rejections: BTreeSet<Address>,
    status: MutationStatus,
}

impl PendingMutation {
    /// Opens a mutation at `now` that stays open for `ttl` seconds.
    #[must_use]
    pub fn new(id: MutationId, mutation: RegistryMutation, proposer: Address, now: u64, ttl: u64) -> Self {
        Self {
            id,
            mutation,
            proposer,
            created_at: now,
            deadline: now.saturating_add(ttl),
            confirmations: BTreeSet::new(),
            rejections: BTreeSet::new(),
            status: MutationStatus::Proposed,
        }
    }

    /// Current state.
    #[must_use]
    pub fn status(&self) -> MutationStatus {
        self.status
    }

    /// Number of confirmations.
    #[must_use]
    pub fn confirmations(&self) -> usize {
        self.confirmations.len()
    }

    /// Number of rejections.
    #[must_use]
    pub fn rejections(&self) -> usize {
        self.rejections.len()
    }

    /// Fails unless the mutation still accepts votes at `now`.
    ///
    /// A mutation found past its deadline is moved to `Expired` before the
    /// error is returned.
    pub fn ensure_open(&mut self, now: u64) -> Result<(), ManagerError> {
        if !self.status.is_open() {
            return Err(ManagerError::MutationClosed {
                id: self.id,
                status: self.status,
            });
        }
        if now > self.deadline {
            self.status = MutationStatus::Expired;
            return Err(ManagerError::MutationExpired(self.id));
        }
        Ok(())
    }

    /// Moves an open mutation past its deadline to `Expired`.
    ///
    /// Returns true if the status changed.
    pub fn expire_if_stale(&mut self, now: u64) -> bool {
        if self.status.is_open() && now > self.deadline {
            self.status = MutationStatus::Expired;
            true
        } else {
            false
        }
    }

    fn check_not_voted(&self, governor: Address) -> Result<(), ManagerError> {
        if self.confirmations.contains(&governor) || self.rejections.contains(&governor) {
            Err(ManagerError::AlreadyVoted { id: self.id, governor })
        } else {
            Ok(())
        }
    }

    /// Records a confirmation. Returns true once `threshold` is reached;
    /// the caller then applies the mutation and calls [`Self::finish`].
    pub fn record_confirmation(&mut self, governor: Address, threshold: usize) -> Result<bool, ManagerError> {
        self.check_not_voted(governor)?;
        self.confirmations.insert(governor);
        let confirmations = self.confirmations.len();
        if confirmations >= threshold {
            return Ok(true);
        }
        self.status = MutationStatus::PartiallyConfirmed(confirmations);
        Ok(false)
    }

    /// Records a rejection. Returns true if the mutation became `Rejected`
    /// because the remaining `governors` can no longer reach `threshold`.
    pub fn record_rejection(
        &mut self,
        governor: Address,
        governors: usize,
        threshold: usize,
    ) -> Result<bool, ManagerError> {
        self.check_not_voted(governor)?;
        self.rejections.insert(governor);
        if governors.saturating_sub(self.rejections.len()) < threshold {
            self.status = MutationStatus::Rejected;
            return Ok(true);
        }
        Ok(false)
    }

    /// Closes the mutation after an execution attempt.
    pub fn finish(&mut self, executed: bool) {
        self.status = if executed {
            MutationStatus::Executed
        } else {
            MutationStatus::Rejected
        };
    }
}
