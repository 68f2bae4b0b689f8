//! Test doubles for manager tests.

use la_01_account_storage::{AccountStorage, StorageHandle};
use la_02_logic_modules::{LogicError, LogicModule};
use shared_types::{AbiValue, Address, CallArgs, CallContext, CallOutput, Selector};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// Address of the storage every mock binds to unless overridden.
pub const MOCK_STORAGE: Address = Address::from_low_u8(0xee);

/// The one storage instance shared by default mocks.
pub fn mock_storage() -> StorageHandle {
    static STORAGE: OnceLock<StorageHandle> = OnceLock::new();
    STORAGE
        .get_or_init(|| StorageHandle::new(AccountStorage::new(MOCK_STORAGE)))
        .clone()
}

/// A separate storage instance at `address`.
pub fn foreign_storage(address: u8) -> StorageHandle {
    StorageHandle::new(AccountStorage::new(Address::from_low_u8(address)))
}

/// Module that answers with its own address, or fails for `fail*` signatures.
#[derive(Debug)]
pub struct MockModule {
    address: Address,
    storage: StorageHandle,
    signatures: BTreeMap<Selector, String>,
    is_static: bool,
}

impl MockModule {
    pub fn new(address: u8, signatures: &[&str]) -> Self {
        Self {
            address: Address::from_low_u8(address),
            storage: mock_storage(),
            signatures: signatures
                .iter()
                .map(|sig| (Selector::from_signature(sig), (*sig).to_string()))
                .collect(),
            is_static: false,
        }
    }

    pub fn arc(address: u8, signatures: &[&str]) -> Arc<dyn LogicModule> {
        Arc::new(Self::new(address, signatures))
    }

    pub fn with_storage(mut self, storage: StorageHandle) -> Self {
        self.storage = storage;
        self
    }

    pub fn static_module(mut self) -> Self {
        self.is_static = true;
        self
    }
}

impl LogicModule for MockModule {
    fn name(&self) -> &'static str {
        "MockModule"
    }

    fn address(&self) -> Address {
        self.address
    }

    fn storage(&self) -> &StorageHandle {
        &self.storage
    }

    fn selectors(&self) -> Vec<Selector> {
        self.signatures.keys().copied().collect()
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn execute(&self, selector: Selector, ctx: &CallContext, _args: &CallArgs) -> Result<CallOutput, LogicError> {
        match self.signatures.get(&selector) {
            Some(sig) if sig.starts_with("fail") => Err(LogicError::AccountFrozen(ctx.account)),
            Some(_) => Ok(vec![AbiValue::Address(self.address)]),
            None => Err(LogicError::UnsupportedSelector(selector)),
        }
    }
}
