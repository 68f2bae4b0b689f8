//! # Account Records
//!
//! Per-account data slots held by the shared storage. Records own no
//! behaviour beyond bookkeeping; authorization lives in the logic modules.

use crate::errors::StorageError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, U256};
use std::collections::{BTreeMap, BTreeSet};

/// Asset identifier of the chain's native currency.
pub const NATIVE_ASSET: Address = Address::ZERO;

/// Maximum number of operation keys per account.
pub const MAX_OPERATION_KEYS: usize = 8;

/// Maximum number of backups per account.
pub const MAX_BACKUPS: usize = 6;

// =============================================================================
// KEYS
// =============================================================================

/// The keys controlling an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKeys {
    /// Administers keys, backups, freezing and dapp approvals.
    pub admin: Address,
    /// Moves assets.
    pub asset: Address,
    /// Adds operation keys.
    pub adding: Address,
    /// Day-to-day keys allowed to interact with approved dapps.
    pub operations: Vec<Address>,
}

impl AccountKeys {
    /// Creates a key set with no operation keys.
    #[must_use]
    pub fn new(admin: Address, asset: Address, adding: Address) -> Self {
        Self {
            admin,
            asset,
            adding,
            operations: Vec::new(),
        }
    }

    /// Adds an operation key, builder style.
    #[must_use]
    pub fn with_operation_key(mut self, key: Address) -> Self {
        self.operations.push(key);
        self
    }

    /// True if `key` is any of the account's keys.
    #[must_use]
    pub fn contains(&self, key: &Address) -> bool {
        self.admin == *key
            || self.asset == *key
            || self.adding == *key
            || self.operations.contains(key)
    }

    /// True if `key` may act on dapps (operation or asset key).
    #[must_use]
    pub fn can_operate(&self, key: &Address) -> bool {
        self.asset == *key || self.operations.contains(key)
    }
}

// =============================================================================
// BACKUPS
// =============================================================================

/// A backup account allowed to co-sign and to drive recovery proposals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupAccount {
    /// Backup identity.
    pub backup: Address,
    /// First second at which the backup is active.
    pub effective_at: u64,
    /// Second after which the backup is no longer active.
    pub expires_at: u64,
}

impl BackupAccount {
    /// Backup active from `now` for `lifetime` seconds.
    #[must_use]
    pub fn immediate(backup: Address, now: u64, lifetime: u64) -> Self {
        Self {
            backup,
            effective_at: now,
            expires_at: now.saturating_add(lifetime),
        }
    }

    /// True if the backup is active at `now`.
    #[must_use]
    pub fn is_active(&self, now: u64) -> bool {
        self.effective_at <= now && now <= self.expires_at
    }
}

// =============================================================================
// PENDING OPERATIONS
// =============================================================================

/// A transfer waiting for a backup's co-signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualOperation {
    /// Operation hash.
    pub hash: Hash,
    /// Asset to move.
    pub asset: Address,
    /// Recipient.
    pub to: Address,
    /// Amount.
    pub amount: U256,
    /// Key that submitted the operation.
    pub initiator: Address,
    /// Submission time.
    pub created_at: u64,
}

/// A backup-driven proposal to replace the admin key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Backup that opened the proposal.
    pub proposer: Address,
    /// Proposal hash.
    pub hash: Hash,
    /// Admin key to install on execution.
    pub new_admin: Address,
    /// Backups that approved, proposer included.
    pub approvals: BTreeSet<Address>,
    /// Opening time.
    pub created_at: u64,
}

/// A recorded call from the account into an approved dapp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DappCall {
    /// Per-account call sequence number.
    pub nonce: u64,
    /// Target dapp.
    pub dapp: Address,
    /// Native value forwarded.
    pub value: U256,
    /// Calldata forwarded.
    pub data: Vec<u8>,
    /// Key that made the call.
    pub caller: Address,
    /// Call time.
    pub timestamp: u64,
}

// =============================================================================
// ACCOUNT RECORD
// =============================================================================

/// All storage slots of one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Controlling keys.
    pub keys: AccountKeys,
    /// Frozen accounts reject asset movement and dapp calls.
    pub frozen: bool,
    /// Registered backups.
    pub backups: Vec<BackupAccount>,
    /// Balance per asset; [`NATIVE_ASSET`] is the native currency.
    pub balances: BTreeMap<Address, U256>,
    /// Transfers waiting for a co-signature, by hash.
    pub dual_operations: BTreeMap<Hash, DualOperation>,
    /// Open proposals, by proposer.
    pub proposals: BTreeMap<Address, Proposal>,
    /// Dapps the account may call.
    pub approved_dapps: BTreeSet<Address>,
    /// Dapp call history.
    pub dapp_calls: Vec<DappCall>,
    /// Sequence number mixed into operation hashes.
    pub nonce: u64,
    /// Initialisation time.
    pub created_at: u64,
}

impl AccountRecord {
    /// Fresh record with the given keys and backups.
    #[must_use]
    pub fn new(keys: AccountKeys, backups: Vec<BackupAccount>, created_at: u64) -> Self {
        Self {
            keys,
            frozen: false,
            backups,
            balances: BTreeMap::new(),
            dual_operations: BTreeMap::new(),
            proposals: BTreeMap::new(),
            approved_dapps: BTreeSet::new(),
            dapp_calls: Vec::new(),
            nonce: 0,
            created_at,
        }
    }

    /// Balance of `asset`, zero if never credited.
    #[must_use]
    pub fn balance(&self, asset: &Address) -> U256 {
        self.balances.get(asset).copied().unwrap_or_default()
    }

    /// Adds `amount` of `asset`, saturating at `U256::MAX`.
    pub fn credit(&mut self, asset: Address, amount: U256) {
        let entry = self.balances.entry(asset).or_default();
        *entry = entry.saturating_add(amount);
    }

    /// Removes `amount` of `asset`.
    pub fn debit(&mut self, asset: Address, amount: U256) -> Result<(), StorageError> {
        let available = self.balance(&asset);
        if available < amount {
            return Err(StorageError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        self.balances.insert(asset, available - amount);
        Ok(())
    }

    /// Adds an operation key.
    pub fn add_operation_key(&mut self, key: Address) -> Result<(), StorageError> {
        if self.keys.contains(&key) {
            return Err(StorageError::DuplicateKey(key));
        }
        if self.keys.operations.len() >= MAX_OPERATION_KEYS {
            return Err(StorageError::OperationKeyLimit {
                max: MAX_OPERATION_KEYS,
            });
        }
        self.keys.operations.push(key);
        Ok(())
    }

    /// Registers a backup.
    pub fn add_backup(&mut self, backup: BackupAccount) -> Result<(), StorageError> {
        if self.backups.iter().any(|b| b.backup == backup.backup) {
            return Err(StorageError::DuplicateBackup(backup.backup));
        }
        if self.backups.len() >= MAX_BACKUPS {
            return Err(StorageError::BackupLimit { max: MAX_BACKUPS });
        }
        self.backups.push(backup);
        Ok(())
    }

    /// Removes a backup and any proposal it opened.
    pub fn remove_backup(&mut self, backup: &Address) -> Result<BackupAccount, StorageError> {
        let index = self
            .backups
            .iter()
            .position(|b| b.backup == *backup)
            .ok_or(StorageError::BackupNotFound(*backup))?;
        self.proposals.remove(backup);
        Ok(self.backups.remove(index))
    }

    /// Backups active at `now`.
    pub fn active_backups(&self, now: u64) -> impl Iterator<Item = &BackupAccount> {
        self.backups.iter().filter(move |b| b.is_active(now))
    }

    /// True if `who` is a backup active at `now`.
    #[must_use]
    pub fn is_active_backup(&self, who: &Address, now: u64) -> bool {
        self.active_backups(now).any(|b| b.backup == *who)
    }

    /// Returns the current nonce and advances it.
    pub fn next_nonce(&mut self) -> u64 {
        let nonce = self.nonce;
        self.nonce += 1;
        nonce
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AccountRecord {
        let keys = AccountKeys::new(
            Address::from_low_u8(1),
            Address::from_low_u8(2),
            Address::from_low_u8(3),
        );
        AccountRecord::new(keys, Vec::new(), 100)
    }

    #[test]
    fn test_credit_and_debit() {
        let mut rec = record();
        rec.credit(NATIVE_ASSET, U256::from(50));
        rec.debit(NATIVE_ASSET, U256::from(20)).unwrap();
        assert_eq!(rec.balance(&NATIVE_ASSET), U256::from(30));

        let err = rec.debit(NATIVE_ASSET, U256::from(31)).unwrap_err();
        assert_eq!(
            err,
            StorageError::InsufficientBalance {
                required: U256::from(31),
                available: U256::from(30),
            }
        );
        // Failed debit leaves the balance untouched
        assert_eq!(rec.balance(&NATIVE_ASSET), U256::from(30));
    }

    #[test]
    fn test_operation_key_limits() {
        let mut rec = record();
        assert_eq!(
            rec.add_operation_key(Address::from_low_u8(1)),
            Err(StorageError::DuplicateKey(Address::from_low_u8(1)))
        );
        for i in 0..MAX_OPERATION_KEYS {
            rec.add_operation_key(Address::from_low_u8(10 + i as u8)).unwrap();
        }
        assert_eq!(
            rec.add_operation_key(Address::from_low_u8(99)),
            Err(StorageError::OperationKeyLimit {
                max: MAX_OPERATION_KEYS
            })
        );
    }

    #[test]
    fn test_backup_activity_window() {
        let backup = BackupAccount {
            backup: Address::from_low_u8(7),
            effective_at: 10,
            expires_at: 20,
        };
        assert!(!backup.is_active(9));
        assert!(backup.is_active(10));
        assert!(backup.is_active(20));
        assert!(!backup.is_active(21));
    }

    #[test]
    fn test_remove_backup_drops_its_proposal() {
        let mut rec = record();
        let backup = Address::from_low_u8(7);
        rec.add_backup(BackupAccount::immediate(backup, 0, 1000)).unwrap();
        rec.proposals.insert(
            backup,
            Proposal {
                proposer: backup,
                hash: Hash::ZERO,
                new_admin: Address::from_low_u8(8),
                approvals: BTreeSet::from([backup]),
                created_at: 0,
            },
        );

        rec.remove_backup(&backup).unwrap();
        assert!(rec.backups.is_empty());
        assert!(rec.proposals.is_empty());
        assert_eq!(
            rec.remove_backup(&backup),
            Err(StorageError::BackupNotFound(backup))
        );
    }

    #[test]
    fn test_nonce_advances() {
        let mut rec = record();
        assert_eq!(rec.next_nonce(), 0);
        assert_eq!(rec.next_nonce(), 1);
        assert_eq!(rec.nonce, 2);
    }
}
