//! # Account Creator
//!
//! Factory capturing one (manager, storage, template) triple at
//! construction. Every account it creates is bound to exactly that triple.
//!
//! Account addresses follow the CREATE2 rule with the creator as deployer,
//! `keccak(admin ‖ sequence)` as salt and the template's init code, so the
//! address of the next account is known before it exists.

use crate::errors::CreatorError;
use la_01_account_storage::{AccountKeys, BackupAccount, StorageHandle};
use la_03_logic_manager::LogicManager;
use la_04_account::{AccountInstance, AccountTemplate};
use parking_lot::RwLock;
use shared_types::{compute_contract_address_create2, keccak256_concat, Address, Hash};
use std::sync::Arc;
use tracing::info;

/// Salt for the `sequence`-th account created for `admin`.
#[must_use]
pub fn account_salt(admin: Address, sequence: u64) -> Hash {
    keccak256_concat(&[admin.as_bytes(), &sequence.to_be_bytes()])
}

fn check_keys(keys: &AccountKeys) -> Result<(), CreatorError> {
    let required = [("admin", keys.admin), ("asset", keys.asset), ("adding", keys.adding)];
    match required.into_iter().find(|(_, key)| key.is_zero()) {
        Some((role, _)) => Err(CreatorError::InvalidKeys(role)),
        None => Ok(()),
    }
}

/// Creates accounts bound to one suite.
#[derive(Debug)]
pub struct AccountCreator {
    address: Address,
    manager: Arc<LogicManager>,
    storage: StorageHandle,
    template: AccountTemplate,
    accounts: RwLock<Vec<Address>>,
}

impl AccountCreator {
    /// Contract name.
    pub const NAME: &'static str = "AccountCreator";

    /// Captures the suite. Fails unless `storage` is the very instance the
    /// manager's modules are bound to.
    pub fn new(
        address: Address,
        manager: Arc<LogicManager>,
        storage: StorageHandle,
        template: AccountTemplate,
    ) -> Result<Self, CreatorError> {
        if !manager.storage().same_instance(&storage) {
            return Err(CreatorError::StorageMismatch {
                manager_storage: manager.storage_address(),
                storage: storage.address(),
            });
        }
        Ok(Self {
            address,
            manager,
            storage,
            template,
            accounts: RwLock::new(Vec::new()),
        })
    }

    /// Deployed address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Manager captured at construction.
    #[must_use]
    pub fn manager(&self) -> &Arc<LogicManager> {
        &self.manager
    }

    /// Storage captured at construction.
    #[must_use]
    pub fn storage(&self) -> &StorageHandle {
        &self.storage
    }

    /// Template captured at construction.
    #[must_use]
    pub fn template(&self) -> AccountTemplate {
        self.template
    }

    /// Address the account for `admin` would get at `sequence`.
    #[must_use]
    pub fn predict_address(&self, admin: Address, sequence: u64) -> Address {
        compute_contract_address_create2(
            self.address,
            account_salt(admin, sequence),
            &self.template.init_code(),
        )
    }

    /// Creates, initialises and returns a new account.
    pub fn create_account(
        &self,
        keys: AccountKeys,
        backups: Vec<BackupAccount>,
        now: u64,
    ) -> Result<AccountInstance, CreatorError> {
        check_keys(&keys)?;

        let mut accounts = self.accounts.write();
        let sequence = accounts.len() as u64;
        let address = self.predict_address(keys.admin, sequence);
        let admin = keys.admin;
        self.storage.init_account(address, keys, backups, now)?;
        accounts.push(address);

        info!(
            account = ?address,
            admin = ?admin,
            sequence,
            creator = ?self.address,
            "Account created"
        );
        Ok(self.bind(address))
    }

    /// Addresses of every account created so far, oldest first.
    #[must_use]
    pub fn accounts(&self) -> Vec<Address> {
        self.accounts.read().clone()
    }

    /// Instance for an account this creator produced.
    pub fn account(&self, address: Address) -> Result<AccountInstance, CreatorError> {
        if self.accounts.read().contains(&address) {
            Ok(self.bind(address))
        } else {
            Err(CreatorError::UnknownAccount(address))
        }
    }

    fn bind(&self, address: Address) -> AccountInstance {
        AccountInstance::new(
            address,
            &self.template,
            self.storage.clone(),
            Arc::clone(&self.manager),
        )
    }
}
