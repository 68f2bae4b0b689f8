//! # Logic Manager Service
//!
//! Owns the live [`SelectorRegistry`], the governor set and the open
//! registry mutations. Shared between accounts behind an `Arc`; all state
//! sits behind one `parking_lot::RwLock`.
//!
//! Dispatch clones the resolved module handle out of the lock before
//! executing, so a slow module never blocks registry reads.

use crate::domain::{
    ManagerEvent, MutationId, MutationStatus, PendingMutation, RegistryMutation, SelectorRegistry,
    DEFAULT_MUTATION_TTL_SECS,
};
use crate::errors::{ConfigurationError, ManagerError};
use la_01_account_storage::StorageHandle;
use la_02_logic_modules::LogicModule;
use parking_lot::RwLock;
use shared_types::{keccak256_concat, Address, CallArgs, CallContext, CallOutput, Selector};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Governors derived from `seed`, one per index.
#[must_use]
pub fn default_governors(seed: Address, count: usize) -> Vec<Address> {
    (0..count as u64)
        .map(|i| {
            let hash = keccak256_concat(&[seed.as_bytes(), b"governor", &i.to_be_bytes()]);
            Address::from_slice(&hash.as_bytes()[12..]).unwrap_or(Address::ZERO)
        })
        .collect()
}

#[derive(Debug)]
struct ManagerState {
    registry: SelectorRegistry,
    governors: BTreeSet<Address>,
    mutations: BTreeMap<MutationId, PendingMutation>,
    next_id: u64,
    events: Vec<ManagerEvent>,
}

impl ManagerState {
    fn require_governor(&self, who: Address) -> Result<(), ManagerError> {
        if self.governors.contains(&who) {
            Ok(())
        } else {
            Err(ManagerError::NotAuthorized(who))
        }
    }

    /// Applies `mutation` if the result keeps the threshold reachable by
    /// the governors.
    fn validate(&self, mutation: &RegistryMutation) -> Result<SelectorRegistry, ConfigurationError> {
        let next = mutation.apply(&self.registry)?;
        if next.threshold() > self.governors.len() {
            return Err(ConfigurationError::InsufficientGovernors {
                governors: self.governors.len(),
                threshold: next.threshold(),
            });
        }
        Ok(next)
    }

    fn install(&mut self, next: SelectorRegistry) {
        let before: BTreeSet<Address> = self.registry.module_addresses().into_iter().collect();
        let after: BTreeSet<Address> = next.module_addresses().into_iter().collect();

        for removed in before.difference(&after) {
            self.events.push(ManagerEvent::ModuleRemoved { module: *removed });
        }
        for added in after.difference(&before) {
            if let Some(module) = next.module(added) {
                self.events.push(registered(module));
            }
        }
        if next.threshold() != self.registry.threshold() {
            self.events.push(ManagerEvent::ThresholdChanged {
                old: self.registry.threshold(),
                new: next.threshold(),
            });
        }
        self.registry = next;
    }

    /// Re-validates and applies `mutation`, closing `id` either way.
    fn execute(&mut self, id: MutationId, mutation: &RegistryMutation) -> Result<(), ConfigurationError> {
        let validated = self.validate(mutation);
        if let Some(pending) = self.mutations.get_mut(&id) {
            pending.finish(validated.is_ok());
        }
        match validated {
            Ok(next) => {
                self.install(next);
                self.events.push(ManagerEvent::MutationExecuted { id });
                info!(%id, mutation = %mutation, "Registry mutation executed");
                Ok(())
            }
            Err(err) => {
                self.events.push(ManagerEvent::MutationRejected { id });
                warn!(%id, error = %err, "Registry mutation no longer valid");
                Err(err)
            }
        }
    }

    /// Executes open mutations whose confirmations already meet the
    /// current threshold, oldest first, until none are left.
    fn execute_ready(&mut self, now: u64) {
        loop {
            let threshold = self.registry.threshold();
            let ready = self
                .mutations
                .values()
                .find(|m| m.status().is_open() && now <= m.deadline && m.confirmations() >= threshold)
                .map(|m| (m.id, m.mutation.clone()));
            let Some((id, mutation)) = ready else {
                break;
            };
            debug!(%id, threshold, "Mutation meets lowered threshold");
            // Failures are logged and close the mutation
            let _ = self.execute(id, &mutation);
        }
    }

    fn mutation_mut(&mut self, id: MutationId) -> Result<&mut PendingMutation, ManagerError> {
        self.mutations.get_mut(&id).ok_or(ManagerError::MutationNotFound(id))
    }
}

fn registered(module: &Arc<dyn LogicModule>) -> ManagerEvent {
    ManagerEvent::ModuleRegistered {
        module: module.address(),
        name: module.name(),
        selectors: module.selectors(),
    }
}

/// Routes selectors to logic modules and governs registry changes.
#[derive(Debug)]
pub struct LogicManager {
    address: Address,
    mutation_ttl: u64,
    state: RwLock<ManagerState>,
}

impl LogicManager {
    /// Contract name.
    pub const NAME: &'static str = "LogicManager";

    /// Builds the registry from `modules` in order.
    ///
    /// Fails if `threshold` is zero or exceeds the module count, if two
    /// modules claim the same selector, if a module address repeats or if
    /// the modules are bound to different storages.
    ///
    /// The manager starts with `threshold` governors derived from its own
    /// address; replace them with [`LogicManager::with_governors`].
    pub fn new(
        address: Address,
        modules: Vec<Arc<dyn LogicModule>>,
        threshold: usize,
    ) -> Result<Self, ManagerError> {
        let registry = SelectorRegistry::build(modules, threshold)?;
        let events = registry
            .module_addresses()
            .iter()
            .filter_map(|a| registry.module(a))
            .map(registered)
            .collect();

        info!(
            manager = ?address,
            modules = registry.module_count(),
            selectors = registry.selector_count(),
            threshold,
            storage = ?registry.storage_address(),
            "Logic manager registry built"
        );

        Ok(Self {
            address,
            mutation_ttl: DEFAULT_MUTATION_TTL_SECS,
            state: RwLock::new(ManagerState {
                registry,
                governors: default_governors(address, threshold).into_iter().collect(),
                mutations: BTreeMap::new(),
                next_id: 0,
                events,
            }),
        })
    }

    /// Replaces the governor set.
    pub fn with_governors(self, governors: Vec<Address>) -> Result<Self, ConfigurationError> {
        let mut set = BTreeSet::new();
        for governor in governors {
            if governor.is_zero() {
                return Err(ConfigurationError::ZeroGovernor);
            }
            if !set.insert(governor) {
                return Err(ConfigurationError::DuplicateGovernor(governor));
            }
        }
        {
            let mut state = self.state.write();
            let threshold = state.registry.threshold();
            if set.len() < threshold {
                return Err(ConfigurationError::InsufficientGovernors {
                    governors: set.len(),
                    threshold,
                });
            }
            state.governors = set;
        }
        Ok(self)
    }

    /// Sets how long new mutations stay open.
    #[must_use]
    pub fn with_mutation_ttl(mut self, ttl_secs: u64) -> Self {
        self.mutation_ttl = ttl_secs;
        self
    }

    // =========================================================================
    // REGISTRY QUERIES
    // =========================================================================

    /// Deployed address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Storage every registered module is bound to.
    #[must_use]
    pub fn storage(&self) -> StorageHandle {
        self.state.read().registry.storage().clone()
    }

    /// Address of [`LogicManager::storage`].
    #[must_use]
    pub fn storage_address(&self) -> Address {
        self.state.read().registry.storage_address()
    }

    /// Current confirmation threshold.
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.state.read().registry.threshold()
    }

    /// Registered module addresses in registration order.
    #[must_use]
    pub fn module_addresses(&self) -> Vec<Address> {
        self.state.read().registry.module_addresses()
    }

    /// Current governors.
    #[must_use]
    pub fn governors(&self) -> Vec<Address> {
        self.state.read().governors.iter().copied().collect()
    }

    /// Module address that handles `selector`.
    pub fn resolve(&self, selector: Selector) -> Result<Address, ManagerError> {
        self.state
            .read()
            .registry
            .resolve(&selector)
            .ok_or(ManagerError::UnknownSelector(selector))
    }

    /// Module that handles `selector`.
    pub fn module_for(&self, selector: Selector) -> Result<Arc<dyn LogicModule>, ManagerError> {
        self.state
            .read()
            .registry
            .module_for(&selector)
            .cloned()
            .ok_or(ManagerError::UnknownSelector(selector))
    }

    /// True if the module handling `selector` is static.
    pub fn is_static(&self, selector: Selector) -> Result<bool, ManagerError> {
        Ok(self.module_for(selector)?.is_static())
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Resolves `selector` and runs it on the owning module.
    ///
    /// Module errors come back unchanged inside `DispatchFailure`.
    #[instrument(skip(self, ctx, args), fields(selector = %selector, account = ?ctx.account))]
    pub fn dispatch(
        &self,
        selector: Selector,
        ctx: &CallContext,
        args: &CallArgs,
    ) -> Result<CallOutput, ManagerError> {
        let module = self.module_for(selector)?;
        debug!(module = module.name(), caller = ?ctx.caller, "Dispatching");
        module
            .execute(selector, ctx, args)
            .map_err(|source| ManagerError::DispatchFailure {
                module: module.address(),
                name: module.name(),
                source,
            })
    }

    // =========================================================================
    // GOVERNED MUTATIONS
    // =========================================================================

    /// Opens a registry mutation.
    ///
    /// The mutation is validated against the current registry up front and
    /// again when the threshold is reached.
    pub fn propose(
        &self,
        proposer: Address,
        mutation: RegistryMutation,
        now: u64,
    ) -> Result<MutationId, ManagerError> {
        let mut state = self.state.write();
        state.require_governor(proposer)?;
        state.validate(&mutation)?;

        let id = MutationId(state.next_id);
        state.next_id += 1;
        let pending = PendingMutation::new(id, mutation, proposer, now, self.mutation_ttl);
        info!(%id, proposer = ?proposer, mutation = %pending.mutation, deadline = pending.deadline, "Registry mutation proposed");
        state.events.push(ManagerEvent::MutationProposed {
            id,
            proposer,
            deadline: pending.deadline,
        });
        state.mutations.insert(id, pending);
        Ok(id)
    }

    /// Confirms a mutation; executes it once the threshold is reached.
    ///
    /// After an execution, other open mutations that already hold enough
    /// confirmations for the new threshold execute too.
    pub fn confirm(&self, id: MutationId, governor: Address, now: u64) -> Result<MutationStatus, ManagerError> {
        let mut state = self.state.write();
        state.require_governor(governor)?;
        let threshold = state.registry.threshold();

        let pending = state.mutation_mut(id)?;
        let opened = pending.ensure_open(now);
        if let Err(err) = opened {
            if matches!(err, ManagerError::MutationExpired(_)) {
                state.events.push(ManagerEvent::MutationExpired { id });
            }
            return Err(err);
        }
        let reached = pending.record_confirmation(governor, threshold)?;
        let confirmations = pending.confirmations();
        let mutation = pending.mutation.clone();
        state.events.push(ManagerEvent::MutationConfirmed {
            id,
            governor,
            confirmations,
        });
        debug!(%id, governor = ?governor, confirmations, threshold, "Mutation confirmed");

        if !reached {
            return Ok(MutationStatus::PartiallyConfirmed(confirmations));
        }

        state.execute(id, &mutation)?;
        state.execute_ready(now);
        Ok(MutationStatus::Executed)
    }

    /// Votes against a mutation.
    pub fn reject(&self, id: MutationId, governor: Address, now: u64) -> Result<MutationStatus, ManagerError> {
        let mut state = self.state.write();
        state.require_governor(governor)?;
        let threshold = state.registry.threshold();
        let governors = state.governors.len();

        let pending = state.mutation_mut(id)?;
        if let Err(err) = pending.ensure_open(now) {
            if matches!(err, ManagerError::MutationExpired(_)) {
                state.events.push(ManagerEvent::MutationExpired { id });
            }
            return Err(err);
        }
        let rejected = pending.record_rejection(governor, governors, threshold)?;
        let status = pending.status();
        if rejected {
            state.events.push(ManagerEvent::MutationRejected { id });
            info!(%id, governor = ?governor, "Registry mutation rejected");
        }
        Ok(status)
    }

    /// Expires every open mutation past its deadline. Returns the expired ids.
    pub fn expire_stale(&self, now: u64) -> Vec<MutationId> {
        let mut state = self.state.write();
        let expired: Vec<MutationId> = state
            .mutations
            .values_mut()
            .filter_map(|m| m.expire_if_stale(now).then_some(m.id))
            .collect();
        for id in &expired {
            state.events.push(ManagerEvent::MutationExpired { id: *id });
        }
        if !expired.is_empty() {
            info!(count = expired.len(), "Expired stale registry mutations");
        }
        expired
    }

    /// Status of a mutation.
    #[must_use]
    pub fn mutation_status(&self, id: MutationId) -> Option<MutationStatus> {
        self.state.read().mutations.get(&id).map(PendingMutation::status)
    }

    /// Drains recorded events.
    pub fn take_events(&self) -> Vec<ManagerEvent> {
        std::mem::take(&mut self.state.write().events)
    }
}
