//! # TransferLogic
//!
//! Single-signature asset transfers authorised by the asset key.

use super::{require_key, require_non_zero, require_not_frozen};
use crate::errors::LogicError;
use crate::ports::{LogicModule, OperationTable};
use la_01_account_storage::{StorageHandle, NATIVE_ASSET};
use shared_types::{AbiValue, Address, CallArgs, CallContext, CallOutput, Selector, U256};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    TransferNative,
    TransferToken,
}

const SIGNATURES: &[(&str, Op)] = &[
    ("transferNative(address,uint256)", Op::TransferNative),
    ("transferToken(address,address,uint256)", Op::TransferToken),
];

/// Asset transfers out of the account.
#[derive(Debug)]
pub struct TransferLogic {
    address: Address,
    storage: StorageHandle,
    table: OperationTable<Op>,
}

impl TransferLogic {
    /// Module name.
    pub const NAME: &'static str = "TransferLogic";

    /// Binds the module deployed at `address` to `storage`.
    #[must_use]
    pub fn new(address: Address, storage: StorageHandle) -> Self {
        Self {
            address,
            storage,
            table: OperationTable::new(SIGNATURES),
        }
    }

    /// Moves `amount` of `asset` to `to`; returns the remaining balance.
    fn transfer(
        &self,
        ctx: &CallContext,
        asset: Address,
        to: Address,
        amount: U256,
    ) -> Result<CallOutput, LogicError> {
        require_non_zero(to, "recipient")?;
        let remaining = self.storage.transact(|book| {
            let rec = book.record(&ctx.account)?;
            require_key(ctx.caller, rec.keys.asset, "asset key")?;
            require_not_frozen(rec, ctx.account)?;
            book.transfer(&ctx.account, asset, to, amount)?;
            Ok::<_, LogicError>(book.record(&ctx.account)?.balance(&asset))
        })?;
        debug!(account = ?ctx.account, asset = ?asset, to = ?to, %amount, "Transfer executed");
        Ok(vec![AbiValue::Uint(remaining)])
    }
}

impl LogicModule for TransferLogic {
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
            Op::TransferNative => self.transfer(ctx, NATIVE_ASSET, args.address(0)?, args.uint(1)?),
            Op::TransferToken => {
                let token = args.address(0)?;
                require_non_zero(token, "token")?;
                self.transfer(ctx, token, args.address(1)?, args.uint(2)?)
            }
        }
    }
}
