//! # DappLogic
//!
//! Admin-curated allow-list of third-party apps and the calls operation
//! keys make into them.

use super::{require_key, require_non_zero, require_not_frozen};
use crate::errors::LogicError;
use crate::ports::{LogicModule, OperationTable};
use la_01_account_storage::{DappCall, StorageHandle, NATIVE_ASSET};
use shared_types::{AbiValue, Address, CallArgs, CallContext, CallOutput, Selector};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Approve,
    Revoke,
    Call,
}

const SIGNATURES: &[(&str, Op)] = &[
    ("approveDapp(address)", Op::Approve),
    ("revokeDapp(address)", Op::Revoke),
    ("callDapp(address,uint256,bytes)", Op::Call),
];

/// Dapp approval and invocation.
#[derive(Debug)]
pub struct DappLogic {
    address: Address,
    storage: StorageHandle,
    table: OperationTable<Op>,
}

impl DappLogic {
    /// Module name.
    pub const NAME: &'static str = "DappLogic";

    /// Binds the module deployed at `address` to `storage`.
    #[must_use]
    pub fn new(address: Address, storage: StorageHandle) -> Self {
        Self {
            address,
            storage,
            table: OperationTable::new(SIGNATURES),
        }
    }

    fn set_approval(&self, ctx: &CallContext, args: &CallArgs, approved: bool) -> Result<CallOutput, LogicError> {
        let dapp = args.address(0)?;
        require_non_zero(dapp, "dapp")?;
        self.storage.update(&ctx.account, |rec| {
            require_key(ctx.caller, rec.keys.admin, "admin key")?;
            require_not_frozen(rec, ctx.account)?;
            if approved {
                rec.approved_dapps.insert(dapp);
            } else if !rec.approved_dapps.remove(&dapp) {
                return Err(LogicError::DappNotApproved(dapp));
            }
            Ok::<_, LogicError>(())
        })?;
        info!(account = ?ctx.account, dapp = ?dapp, approved, "Dapp approval changed");
        Ok(Vec::new())
    }

    fn call_dapp(&self, ctx: &CallContext, args: &CallArgs) -> Result<CallOutput, LogicError> {
        let dapp = args.address(0)?;
        let value = args.uint(1)?;
        let data = args.bytes(2)?;

        let nonce = self.storage.transact(|book| {
            let rec = book.record(&ctx.account)?;
            if !rec.keys.can_operate(&ctx.caller) {
                return Err(LogicError::Unauthorized {
                    caller: ctx.caller,
                    required: "operation or asset key",
                });
            }
            require_not_frozen(rec, ctx.account)?;
            if !rec.approved_dapps.contains(&dapp) {
                return Err(LogicError::DappNotApproved(dapp));
            }
            if !value.is_zero() {
                book.transfer(&ctx.account, NATIVE_ASSET, dapp, value)?;
            }
            let rec = book.record_mut(&ctx.account)?;
            let nonce = rec.next_nonce();
            rec.dapp_calls.push(DappCall {
                nonce,
                dapp,
                value,
                data,
                caller: ctx.caller,
                timestamp: ctx.timestamp,
            });
            Ok::<_, LogicError>(nonce)
        })?;
        debug!(account = ?ctx.account, dapp = ?dapp, nonce, %value, "Dapp called");
        Ok(vec![AbiValue::from(nonce)])
    }
}

impl LogicModule for DappLogic {
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
            Op::Approve => self.set_approval(ctx, args, true),
            Op::Revoke => self.set_approval(ctx, args, false),
            Op::Call => self.call_dapp(ctx, args),
        }
    }
}
