//! # DualsigsLogic
//!
//! Two-party transfers: the asset key submits, an active backup confirms.
//! Nothing moves until the confirmation arrives.

use super::{require_key, require_non_zero, require_not_frozen};
use crate::errors::LogicError;
use crate::ports::{LogicModule, OperationTable};
use la_01_account_storage::{DualOperation, StorageError, StorageHandle};
use shared_types::{
    keccak256_concat, AbiValue, Address, CallArgs, CallContext, CallOutput, Hash, Selector, U256,
};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Submit,
    Confirm,
    Cancel,
}

const SIGNATURES: &[(&str, Op)] = &[
    ("submitDualTransfer(address,address,uint256)", Op::Submit),
    ("confirmDualTransfer(bytes32)", Op::Confirm),
    ("cancelDualTransfer(bytes32)", Op::Cancel),
];

/// Hash identifying a pending dual-signature transfer.
#[must_use]
pub fn dual_operation_hash(account: Address, asset: Address, to: Address, amount: U256, nonce: u64) -> Hash {
    let mut amount_bytes = [0u8; 32];
    amount.to_big_endian(&mut amount_bytes);
    keccak256_concat(&[
        account.as_bytes(),
        asset.as_bytes(),
        to.as_bytes(),
        &amount_bytes,
        &nonce.to_be_bytes(),
    ])
}

/// Backup co-signed transfers.
#[derive(Debug)]
pub struct DualsigsLogic {
    address: Address,
    storage: StorageHandle,
    table: OperationTable<Op>,
}

impl DualsigsLogic {
    /// Module name.
    pub const NAME: &'static str = "DualsigsLogic";

    /// Binds the module deployed at `address` to `storage`.
    #[must_use]
    pub fn new(address: Address, storage: StorageHandle) -> Self {
        Self {
            address,
            storage,
            table: OperationTable::new(SIGNATURES),
        }
    }

    fn submit(&self, ctx: &CallContext, args: &CallArgs) -> Result<CallOutput, LogicError> {
        let asset = args.address(0)?;
        let to = args.address(1)?;
        let amount = args.uint(2)?;
        require_non_zero(to, "recipient")?;

        let hash = self.storage.update(&ctx.account, |rec| {
            require_key(ctx.caller, rec.keys.asset, "asset key")?;
            require_not_frozen(rec, ctx.account)?;
            if rec.active_backups(ctx.timestamp).next().is_none() {
                return Err(LogicError::NoActiveBackup(ctx.account));
            }
            let available = rec.balance(&asset);
            if available < amount {
                return Err(StorageError::InsufficientBalance {
                    required: amount,
                    available,
                }
                .into());
            }
            let nonce = rec.next_nonce();
            let hash = dual_operation_hash(ctx.account, asset, to, amount, nonce);
            rec.dual_operations.insert(
                hash,
                DualOperation {
                    hash,
                    asset,
                    to,
                    amount,
                    initiator: ctx.caller,
                    created_at: ctx.timestamp,
                },
            );
            Ok::<_, LogicError>(hash)
        })?;
        info!(account = ?ctx.account, hash = ?hash, %amount, "Dual transfer submitted");
        Ok(vec![AbiValue::FixedBytes(hash)])
    }

    fn confirm(&self, ctx: &CallContext, args: &CallArgs) -> Result<CallOutput, LogicError> {
        let hash = args.fixed_bytes(0)?;
        let remaining = self.storage.transact(|book| {
            let rec = book.record(&ctx.account)?;
            if !rec.is_active_backup(&ctx.caller, ctx.timestamp) {
                return Err(LogicError::Unauthorized {
                    caller: ctx.caller,
                    required: "active backup",
                });
            }
            require_not_frozen(rec, ctx.account)?;
            let op = rec
                .dual_operations
                .get(&hash)
                .cloned()
                .ok_or(StorageError::DualOperationNotFound(hash))?;

            book.transfer(&ctx.account, op.asset, op.to, op.amount)?;
            let rec = book.record_mut(&ctx.account)?;
            rec.dual_operations.remove(&hash);
            Ok::<_, LogicError>(rec.balance(&op.asset))
        })?;
        info!(account = ?ctx.account, hash = ?hash, backup = ?ctx.caller, "Dual transfer confirmed");
        Ok(vec![AbiValue::Uint(remaining)])
    }

    fn cancel(&self, ctx: &CallContext, args: &CallArgs) -> Result<CallOutput, LogicError> {
        let hash = args.fixed_bytes(0)?;
        self.storage.update(&ctx.account, |rec| {
            let op = rec
                .dual_operations
                .get(&hash)
                .ok_or(StorageError::DualOperationNotFound(hash))?;
            if ctx.caller != op.initiator {
                require_key(ctx.caller, rec.keys.admin, "initiator or admin key")?;
            }
            require_not_frozen(rec, ctx.account)?;
            rec.dual_operations.remove(&hash);
            Ok::<_, LogicError>(())
        })?;
        info!(account = ?ctx.account, hash = ?hash, "Dual transfer cancelled");
        Ok(Vec::new())
    }
}

impl LogicModule for DualsigsLogic {
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
            Op::Submit => self.submit(ctx, args),
            Op::Confirm => self.confirm(ctx, args),
            Op::Cancel => self.cancel(ctx, args),
        }
    }
}
