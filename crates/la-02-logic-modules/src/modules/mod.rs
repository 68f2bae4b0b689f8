//! # Logic Modules
//!
//! The six modules of an account suite. Each claims a disjoint selector set:
//!
//! | Module | Slice of behaviour |
//! |--------|--------------------|
//! | `AccountLogic` | keys, backups, freezing |
//! | `TransferLogic` | single-key asset transfers |
//! | `DualsigsLogic` | transfers co-signed by a backup |
//! | `DappLogic` | approved third-party app calls |
//! | `CommonStaticLogic` | read-only queries |
//! | `ProposalLogic` | backup-majority admin recovery |

pub mod account;
pub mod common_static;
pub mod dapp;
pub mod dualsigs;
pub mod proposal;
pub mod transfer;

pub use account::AccountLogic;
pub use common_static::CommonStaticLogic;
pub use dapp::DappLogic;
pub use dualsigs::DualsigsLogic;
pub use proposal::ProposalLogic;
pub use transfer::TransferLogic;

use crate::errors::LogicError;
use crate::ports::LogicModule;
use la_01_account_storage::{AccountRecord, StorageHandle};
use shared_types::Address;
use std::sync::Arc;

/// The six module kinds, in deployment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// [`AccountLogic`]
    Account,
    /// [`TransferLogic`]
    Transfer,
    /// [`DualsigsLogic`]
    Dualsigs,
    /// [`DappLogic`]
    Dapp,
    /// [`CommonStaticLogic`]
    CommonStatic,
    /// [`ProposalLogic`]
    Proposal,
}

impl ModuleKind {
    /// Every kind, in the order the manager expects them.
    pub const ALL: [ModuleKind; 6] = [
        ModuleKind::Account,
        ModuleKind::Transfer,
        ModuleKind::Dualsigs,
        ModuleKind::Dapp,
        ModuleKind::CommonStatic,
        ModuleKind::Proposal,
    ];

    /// Contract name of the module.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ModuleKind::Account => AccountLogic::NAME,
            ModuleKind::Transfer => TransferLogic::NAME,
            ModuleKind::Dualsigs => DualsigsLogic::NAME,
            ModuleKind::Dapp => DappLogic::NAME,
            ModuleKind::CommonStatic => CommonStaticLogic::NAME,
            ModuleKind::Proposal => ProposalLogic::NAME,
        }
    }

    /// Constructs the module at `address` bound to `storage`.
    #[must_use]
    pub fn build(self, address: Address, storage: StorageHandle) -> Arc<dyn LogicModule> {
        match self {
            ModuleKind::Account => Arc::new(AccountLogic::new(address, storage)),
            ModuleKind::Transfer => Arc::new(TransferLogic::new(address, storage)),
            ModuleKind::Dualsigs => Arc::new(DualsigsLogic::new(address, storage)),
            ModuleKind::Dapp => Arc::new(DappLogic::new(address, storage)),
            ModuleKind::CommonStatic => Arc::new(CommonStaticLogic::new(address, storage)),
            ModuleKind::Proposal => Arc::new(ProposalLogic::new(address, storage)),
        }
    }
}

/// Fails unless `caller` equals the `expected` key.
fn require_key(caller: Address, expected: Address, required: &'static str) -> Result<(), LogicError> {
    if caller == expected {
        Ok(())
    } else {
        Err(LogicError::Unauthorized { caller, required })
    }
}

fn require_not_frozen(record: &AccountRecord, account: Address) -> Result<(), LogicError> {
    if record.frozen {
        Err(LogicError::AccountFrozen(account))
    } else {
        Ok(())
    }
}

fn require_non_zero(address: Address, what: &'static str) -> Result<(), LogicError> {
    if address.is_zero() {
        Err(LogicError::ZeroAddress(what))
    } else {
        Ok(())
    }
}
