//! # CommonStaticLogic
//!
//! Read-only queries over an account record. Every operation is static, so
//! accounts may reach this module through a static call.

use crate::errors::LogicError;
use crate::ports::{LogicModule, OperationTable};
use la_01_account_storage::{AccountRecord, StorageHandle};
use shared_types::{AbiValue, Address, CallArgs, CallContext, CallOutput, Selector};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    AdminKey,
    AssetKey,
    AddingKey,
    OperationKeys,
    Balance,
    Frozen,
    Backups,
    ActiveBackups,
    DappApproved,
    Nonce,
}

const SIGNATURES: &[(&str, Op)] = &[
    ("getAdminKey()", Op::AdminKey),
    ("getAssetKey()", Op::AssetKey),
    ("getAddingKey()", Op::AddingKey),
    ("getOperationKeys()", Op::OperationKeys),
    ("getBalance(address)", Op::Balance),
    ("isFrozen()", Op::Frozen),
    ("getBackups()", Op::Backups),
    ("getActiveBackups()", Op::ActiveBackups),
    ("isDappApproved(address)", Op::DappApproved),
    ("getNonce()", Op::Nonce),
];

/// Account queries.
#[derive(Debug)]
pub struct CommonStaticLogic {
    address: Address,
    storage: StorageHandle,
    table: OperationTable<Op>,
}

impl CommonStaticLogic {
    /// Module name.
    pub const NAME: &'static str = "CommonStaticLogic";

    /// Binds the module deployed at `address` to `storage`.
    #[must_use]
    pub fn new(address: Address, storage: StorageHandle) -> Self {
        Self {
            address,
            storage,
            table: OperationTable::new(SIGNATURES),
        }
    }
}

fn query(op: Op, rec: &AccountRecord, ctx: &CallContext, args: &CallArgs) -> Result<AbiValue, LogicError> {
    let value: AbiValue = match op {
        Op::AdminKey => rec.keys.admin.into(),
        Op::AssetKey => rec.keys.asset.into(),
        Op::AddingKey => rec.keys.adding.into(),
        Op::OperationKeys => rec.keys.operations.clone().into(),
        Op::Balance => rec.balance(&args.address(0)?).into(),
        Op::Frozen => rec.frozen.into(),
        Op::Backups => AbiValue::AddressList(rec.backups.iter().map(|b| b.backup).collect()),
        Op::ActiveBackups => {
            AbiValue::AddressList(rec.active_backups(ctx.timestamp).map(|b| b.backup).collect())
        }
        Op::DappApproved => rec.approved_dapps.contains(&args.address(0)?).into(),
        Op::Nonce => rec.nonce.into(),
    };
    Ok(value)
}

impl LogicModule for CommonStaticLogic {
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

    fn is_static(&self) -> bool {
        true
    }

    fn execute(
        &self,
        selector: Selector,
        ctx: &CallContext,
        args: &CallArgs,
    ) -> Result<CallOutput, LogicError> {
        let op = self.table.lookup(selector)?;
        let value = self
            .storage
            .read(&ctx.account, |rec| query(op, rec, ctx, args))??;
        Ok(vec![value])
    }
}
