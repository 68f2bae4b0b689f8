//! # Account Storage
//!
//! The single shared state container of a deployed suite. Every logic module
//! and every account instance holds a [`StorageHandle`] to the same
//! [`AccountStorage`].
//!
//! Access is closure-scoped so no lock outlives the operation that took it:
//! - [`AccountStorage::read`] / [`AccountStorage::update`] for one account
//! - [`AccountStorage::transact`] for operations touching several accounts

use crate::domain::{AccountKeys, AccountRecord, BackupAccount};
use crate::errors::StorageError;
use parking_lot::RwLock;
use shared_types::{Address, U256};
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, info};

// =============================================================================
// ACCOUNT BOOK
// =============================================================================

/// All account records, keyed by account address.
#[derive(Debug, Default)]
pub struct AccountBook {
    records: HashMap<Address, AccountRecord>,
}

impl AccountBook {
    /// True if `account` has a record.
    #[must_use]
    pub fn contains(&self, account: &Address) -> bool {
        self.records.contains_key(account)
    }

    /// Record of `account`.
    pub fn record(&self, account: &Address) -> Result<&AccountRecord, StorageError> {
        self.records
            .get(account)
            .ok_or(StorageError::AccountNotFound(*account))
    }

    /// Mutable record of `account`.
    pub fn record_mut(&mut self, account: &Address) -> Result<&mut AccountRecord, StorageError> {
        self.records
            .get_mut(account)
            .ok_or(StorageError::AccountNotFound(*account))
    }

    /// Moves `amount` of `asset` out of `from`.
    ///
    /// The recipient is credited when it is a known account; otherwise the
    /// value leaves the suite.
    pub fn transfer(
        &mut self,
        from: &Address,
        asset: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), StorageError> {
        self.record_mut(from)?.debit(asset, amount)?;
        if let Some(recipient) = self.records.get_mut(&to) {
            recipient.credit(asset, amount);
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

// =============================================================================
// ACCOUNT STORAGE
// =============================================================================

/// Shared persistent state for all accounts of a deployment.
#[derive(Debug)]
pub struct AccountStorage {
    /// Deployed address of this storage contract.
    address: Address,
    book: RwLock<AccountBook>,
}

impl AccountStorage {
    /// Contract name.
    pub const NAME: &'static str = "AccountStorage";

    /// Creates an empty storage deployed at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            book: RwLock::new(AccountBook::default()),
        }
    }

    /// Deployed address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Creates the record of a new account.
    pub fn init_account(
        &self,
        account: Address,
        keys: AccountKeys,
        backups: Vec<BackupAccount>,
        now: u64,
    ) -> Result<(), StorageError> {
        let mut book = self.book.write();
        if book.contains(&account) {
            return Err(StorageError::AlreadyInitialized(account));
        }
        info!(account = ?account, backups = backups.len(), "Initializing account record");
        book.records
            .insert(account, AccountRecord::new(keys, backups, now));
        Ok(())
    }

    /// True if `account` has been initialised.
    #[must_use]
    pub fn is_initialized(&self, account: &Address) -> bool {
        self.book.read().contains(account)
    }

    /// Number of initialised accounts.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.book.read().len()
    }

    /// Runs `f` against a read-only view of `account`.
    pub fn read<R>(
        &self,
        account: &Address,
        f: impl FnOnce(&AccountRecord) -> R,
    ) -> Result<R, StorageError> {
        let book = self.book.read();
        Ok(f(book.record(account)?))
    }

    /// Runs `f` against a mutable view of `account`.
    pub fn update<R, E>(
        &self,
        account: &Address,
        f: impl FnOnce(&mut AccountRecord) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<StorageError>,
    {
        let mut book = self.book.write();
        f(book.record_mut(account)?)
    }

    /// Runs `f` with exclusive access to every record.
    pub fn transact<R, E>(&self, f: impl FnOnce(&mut AccountBook) -> Result<R, E>) -> Result<R, E> {
        let mut book = self.book.write();
        f(&mut book)
    }

    /// Clone of the full record of `account`.
    pub fn snapshot(&self, account: &Address) -> Result<AccountRecord, StorageError> {
        self.read(account, Clone::clone)
    }

    /// Balance of `asset` held by `account`.
    pub fn balance(&self, account: &Address, asset: &Address) -> Result<U256, StorageError> {
        self.read(account, |rec| rec.balance(asset))
    }

    /// Credits an incoming deposit.
    pub fn deposit(&self, account: &Address, asset: Address, amount: U256) -> Result<(), StorageError> {
        debug!(account = ?account, asset = ?asset, %amount, "Deposit");
        self.update(account, |rec| {
            rec.credit(asset, amount);
            Ok::<_, StorageError>(())
        })
    }
}

// =============================================================================
// STORAGE HANDLE
// =============================================================================

/// Shared reference to the one [`AccountStorage`] of a deployment.
#[derive(Clone, Debug)]
pub struct StorageHandle(Arc<AccountStorage>);

impl StorageHandle {
    /// Wraps a freshly deployed storage.
    #[must_use]
    pub fn new(storage: AccountStorage) -> Self {
        Self(Arc::new(storage))
    }

    /// True if both handles point at the same storage instance.
    #[must_use]
    pub fn same_instance(&self, other: &StorageHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for StorageHandle {
    type Target = AccountStorage;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
