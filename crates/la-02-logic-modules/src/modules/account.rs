//! # AccountLogic
//!
//! Basic account administration: admin key rotation, operation keys,
//! backups and freezing.

use super::{require_key, require_non_zero, require_not_frozen};
use crate::errors::LogicError;
use crate::ports::{LogicModule, OperationTable};
use la_01_account_storage::{BackupAccount, StorageError, StorageHandle};
use shared_types::{Address, CallArgs, CallContext, CallOutput, Selector};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    ChangeAdminKey,
    AddOperationKey,
    AddBackup,
    RemoveBackup,
    Freeze,
    Unfreeze,
}

const SIGNATURES: &[(&str, Op)] = &[
    ("changeAdminKey(address)", Op::ChangeAdminKey),
    ("addOperationKey(address)", Op::AddOperationKey),
    ("addBackup(address,uint256,uint256)", Op::AddBackup),
    ("removeBackup(address)", Op::RemoveBackup),
    ("freeze()", Op::Freeze),
    ("unfreeze()", Op::Unfreeze),
];

/// Key, backup and freeze management.
#[derive(Debug)]
pub struct AccountLogic {
    address: Address,
    storage: StorageHandle,
    table: OperationTable<Op>,
}

impl AccountLogic {
    /// Module name.
    pub const NAME: &'static str = "AccountLogic";

    /// Binds the module deployed at `address` to `storage`.
    #[must_use]
    pub fn new(address: Address, storage: StorageHandle) -> Self {
        Self {
            address,
            storage,
            table: OperationTable::new(SIGNATURES),
        }
    }

    fn change_admin_key(&self, ctx: &CallContext, args: &CallArgs) -> Result<CallOutput, LogicError> {
        let new_admin = args.address(0)?;
        require_non_zero(new_admin, "admin key")?;
        self.storage.update(&ctx.account, |rec| {
            require_key(ctx.caller, rec.keys.admin, "admin key")?;
            require_not_frozen(rec, ctx.account)?;
            if rec.keys.contains(&new_admin) {
                return Err(StorageError::DuplicateKey(new_admin).into());
            }
            rec.keys.admin = new_admin;
            Ok::<_, LogicError>(())
        })?;
        info!(account = ?ctx.account, new_admin = ?new_admin, "Admin key changed");
        Ok(Vec::new())
    }

    fn add_operation_key(&self, ctx: &CallContext, args: &CallArgs) -> Result<CallOutput, LogicError> {
        let key = args.address(0)?;
        require_non_zero(key, "operation key")?;
        self.storage.update(&ctx.account, |rec| {
            require_key(ctx.caller, rec.keys.adding, "adding key")?;
            require_not_frozen(rec, ctx.account)?;
            rec.add_operation_key(key)?;
            Ok::<_, LogicError>(())
        })?;
        Ok(Vec::new())
    }

    fn add_backup(&self, ctx: &CallContext, args: &CallArgs) -> Result<CallOutput, LogicError> {
        let backup = args.address(0)?;
        let delay = args.uint_u64(1)?;
        let lifetime = args.uint_u64(2)?;
        require_non_zero(backup, "backup")?;

        let effective_at = ctx.timestamp.saturating_add(delay);
        let entry = BackupAccount {
            backup,
            effective_at,
            expires_at: effective_at.saturating_add(lifetime),
        };
        self.storage.update(&ctx.account, |rec| {
            require_key(ctx.caller, rec.keys.admin, "admin key")?;
            require_not_frozen(rec, ctx.account)?;
            if rec.keys.contains(&backup) {
                return Err(StorageError::DuplicateKey(backup).into());
            }
            rec.add_backup(entry)?;
            Ok::<_, LogicError>(())
        })?;
        info!(account = ?ctx.account, backup = ?backup, effective_at, "Backup added");
        Ok(Vec::new())
    }

    fn remove_backup(&self, ctx: &CallContext, args: &CallArgs) -> Result<CallOutput, LogicError> {
        let backup = args.address(0)?;
        self.storage.update(&ctx.account, |rec| {
            require_key(ctx.caller, rec.keys.admin, "admin key")?;
            require_not_frozen(rec, ctx.account)?;
            rec.remove_backup(&backup)?;
            Ok::<_, LogicError>(())
        })?;
        Ok(Vec::new())
    }

    fn set_frozen(&self, ctx: &CallContext, frozen: bool) -> Result<CallOutput, LogicError> {
        self.storage.update(&ctx.account, |rec| {
            require_key(ctx.caller, rec.keys.admin, "admin key")?;
            if frozen {
                require_not_frozen(rec, ctx.account)?;
            }
            rec.frozen = frozen;
            Ok::<_, LogicError>(())
        })?;
        info!(account = ?ctx.account, frozen, "Freeze state changed");
        Ok(Vec::new())
    }
}

impl LogicModule for AccountLogic {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn address(&self) -> Address {
        self.address
    }

    fn storage(&self) -> &StorageHandle {
        &self.storage
    }

    fn selectors(&self) -> Vec<Selector> {
        self.table.selectors()
    }

    fn execute(
        &self,
        selector: Selector,
        ctx: &CallContext,
        args: &CallArgs,
    ) -> Result<CallOutput, LogicError> {
        match self.table.lookup(selector)? {
            Op::ChangeAdminKey => self.change_admin_key(ctx, args),
            Op::AddOperationKey => self.add_operation_key(ctx, args),
            Op::AddBackup => self.add_backup(ctx, args),
            Op::RemoveBackup => self.remove_backup(ctx, args),
            Op::Freeze => self.set_frozen(ctx, true),
            Op::Unfreeze => self.set_frozen(ctx, false),
        }
    }
}
