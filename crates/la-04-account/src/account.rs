//! # Account Template and Instances
//!
//! The template is deployed once and only contributes its address to the
//! creation of new accounts. Each [`AccountInstance`] holds no behaviour of
//! its own: every call goes through the shared logic manager with the
//! account's own address as `ctx.account`.

use crate::errors::AccountError;
use la_01_account_storage::StorageHandle;
use la_03_logic_manager::LogicManager;
use shared_types::{Address, CallArgs, CallContext, CallOutput, Selector, U256};
use std::sync::Arc;
use tracing::{debug, instrument};

/// The deployed account template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountTemplate {
    address: Address,
}

impl AccountTemplate {
    /// Contract name.
    pub const NAME: &'static str = "Account";

    /// Template deployed at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Deployed address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Init code new accounts are derived from.
    #[must_use]
    pub fn init_code(&self) -> Vec<u8> {
        self.address.as_bytes().to_vec()
    }
}

/// A live account bound to one manager and one storage.
#[derive(Clone, Debug)]
pub struct AccountInstance {
    address: Address,
    template: Address,
    storage: StorageHandle,
    manager: Arc<LogicManager>,
}

impl AccountInstance {
    /// Binds `address` to the given suite. The storage record must already
    /// exist for calls to succeed.
    #[must_use]
    pub fn new(
        address: Address,
        template: &AccountTemplate,
        storage: StorageHandle,
        manager: Arc<LogicManager>,
    ) -> Self {
        Self {
            address,
            template: template.address(),
            storage,
            manager,
        }
    }

    /// Account address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Template the account was created from.
    #[must_use]
    pub fn template(&self) -> Address {
        self.template
    }

    /// Manager every call goes through.
    #[must_use]
    pub fn manager(&self) -> &Arc<LogicManager> {
        &self.manager
    }

    /// Shared storage holding the account record.
    #[must_use]
    pub fn storage(&self) -> &StorageHandle {
        &self.storage
    }

    /// Forwards `selector` on behalf of `caller`.
    #[instrument(skip(self, args), fields(account = ?self.address, selector = %selector))]
    pub fn invoke(
        &self,
        selector: Selector,
        caller: Address,
        args: &CallArgs,
        now: u64,
    ) -> Result<CallOutput, AccountError> {
        let ctx = CallContext::new(self.address, caller, now);
        Ok(self.manager.dispatch(selector, &ctx, args)?)
    }

    /// [`AccountInstance::invoke`] by canonical signature.
    pub fn invoke_signature(
        &self,
        signature: &str,
        caller: Address,
        args: &CallArgs,
        now: u64,
    ) -> Result<CallOutput, AccountError> {
        self.invoke(Selector::from_signature(signature), caller, args, now)
    }

    /// Read-only call; only reaches static modules.
    pub fn static_call(&self, selector: Selector, args: &CallArgs, now: u64) -> Result<CallOutput, AccountError> {
        if !self.manager.is_static(selector)? {
            return Err(AccountError::NotStatic(selector));
        }
        let ctx = CallContext::read_only(self.address, now);
        Ok(self.manager.dispatch(selector, &ctx, args)?)
    }

    /// Credits an incoming transfer.
    pub fn deposit(&self, asset: Address, amount: U256) -> Result<(), AccountError> {
        debug!(account = ?self.address, asset = ?asset, %amount, "Account received funds");
        Ok(self.storage.deposit(&self.address, asset, amount)?)
    }

    /// Current balance of `asset`.
    pub fn balance(&self, asset: Address) -> Result<U256, AccountError> {
        Ok(self.storage.balance(&self.address, &asset)?)
    }
}
