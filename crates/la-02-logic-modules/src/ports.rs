//! # Logic Module Port
//!
//! The interface every logic module exposes to the logic manager, plus the
//! selector table modules use to declare their capability set.

use crate::errors::LogicError;
use la_01_account_storage::StorageHandle;
use shared_types::{Address, CallArgs, CallContext, CallOutput, Selector};
use std::collections::BTreeMap;
use std::fmt;

/// A stateless unit of account behaviour bound to the shared storage.
///
/// The manager introspects [`LogicModule::selectors`] once at registration;
/// the set must not change over the module's lifetime.
pub trait LogicModule: Send + Sync + fmt::Debug {
    /// Human-readable module name, e.g. `"TransferLogic"`.
    fn name(&self) -> &'static str;

    /// Deployed address of the module.
    fn address(&self) -> Address;

    /// Storage the module was bound to at construction.
    fn storage(&self) -> &StorageHandle;

    /// Address of [`LogicModule::storage`].
    fn storage_address(&self) -> Address {
        self.storage().address()
    }

    /// Selectors this module claims.
    fn selectors(&self) -> Vec<Selector>;

    /// True if every operation is read-only.
    fn is_static(&self) -> bool {
        false
    }

    /// Executes the operation behind `selector`.
    fn execute(
        &self,
        selector: Selector,
        ctx: &CallContext,
        args: &CallArgs,
    ) -> Result<CallOutput, LogicError>;
}

/// Maps a module's selectors onto its operation enum.
#[derive(Clone, Debug)]
pub struct OperationTable<Op> {
    operations: BTreeMap<Selector, (&'static str, Op)>,
}

impl<Op: Copy> OperationTable<Op> {
    /// Builds the table from canonical signatures.
    #[must_use]
    pub fn new(signatures: &[(&'static str, Op)]) -> Self {
        let operations = signatures
            .iter()
            .map(|&(signature, op)| (Selector::from_signature(signature), (signature, op)))
            .collect();
        Self { operations }
    }

    /// Declared selectors in ascending order.
    #[must_use]
    pub fn selectors(&self) -> Vec<Selector> {
        self.operations.keys().copied().collect()
    }

    /// Operation behind `selector`.
    pub fn lookup(&self, selector: Selector) -> Result<Op, LogicError> {
        self.operations
            .get(&selector)
            .map(|&(_, op)| op)
            .ok_or(LogicError::UnsupportedSelector(selector))
    }

    /// Canonical signature behind `selector`, for logging.
    #[must_use]
    pub fn signature(&self, selector: Selector) -> Option<&'static str> {
        self.operations.get(&selector).map(|&(sig, _)| sig)
    }
}
