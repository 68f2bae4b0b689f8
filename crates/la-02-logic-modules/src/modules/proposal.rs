//! # ProposalLogic
//!
//! Admin-key recovery driven by backups. A backup proposes a new admin key,
//! other backups approve, and once a strict majority of the currently active
//! backups agrees anyone may execute the proposal.
//!
//! Recovery must work on a frozen account, so no operation here checks the
//! freeze flag. Execution unfreezes the account.

use super::require_non_zero;
use crate::errors::LogicError;
use crate::ports::{LogicModule, OperationTable};
use la_01_account_storage::{AccountRecord, Proposal, StorageError, StorageHandle};
use shared_types::{keccak256_concat, AbiValue, Address, CallArgs, CallContext, CallOutput, Hash, Selector};
use std::collections::BTreeSet;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Propose,
    Approve,
    Execute,
    Cancel,
}

const SIGNATURES: &[(&str, Op)] = &[
    ("proposeAdminChange(address)", Op::Propose),
    ("approveProposal(address)", Op::Approve),
    ("executeProposal(address)", Op::Execute),
    ("cancelProposal()", Op::Cancel),
];

/// Approvals needed out of `active` backups.
#[must_use]
pub const fn required_approvals(active: usize) -> usize {
    active / 2 + 1
}

fn require_active_backup(rec: &AccountRecord, caller: Address, now: u64) -> Result<(), LogicError> {
    if rec.is_active_backup(&caller, now) {
        Ok(())
    } else {
        Err(LogicError::Unauthorized {
            caller,
            required: "active backup",
        })
    }
}

/// Backup-majority admin recovery.
#[derive(Debug)]
pub struct ProposalLogic {
    address: Address,
    storage: StorageHandle,
    table: OperationTable<Op>,
}

impl ProposalLogic {
    /// Module name.
    pub const NAME: &'static str = "ProposalLogic";

    /// Binds the module deployed at `address` to `storage`.
    #[must_use]
    pub fn new(address: Address, storage: StorageHandle) -> Self {
        Self {
            address,
            storage,
            table: OperationTable::new(SIGNATURES),
        }
    }

    fn propose(&self, ctx: &CallContext, args: &CallArgs) -> Result<CallOutput, LogicError> {
        let new_admin = args.address(0)?;
        require_non_zero(new_admin, "admin key")?;
        let hash = self.storage.update(&ctx.account, |rec| {
            require_active_backup(rec, ctx.caller, ctx.timestamp)?;
            if rec.proposals.contains_key(&ctx.caller) {
                return Err(StorageError::ProposalExists(ctx.caller).into());
            }
            let nonce = rec.next_nonce();
            let hash: Hash = keccak256_concat(&[
                ctx.account.as_bytes(),
                ctx.caller.as_bytes(),
                new_admin.as_bytes(),
                &nonce.to_be_bytes(),
            ]);
            rec.proposals.insert(
                ctx.caller,
                Proposal {
                    proposer: ctx.caller,
                    hash,
                    new_admin,
                    approvals: BTreeSet::from([ctx.caller]),
                    created_at: ctx.timestamp,
                },
            );
            Ok::<_, LogicError>(hash)
        })?;
        info!(account = ?ctx.account, proposer = ?ctx.caller, new_admin = ?new_admin, "Admin change proposed");
        Ok(vec![AbiValue::FixedBytes(hash)])
    }

    fn approve(&self, ctx: &CallContext, args: &CallArgs) -> Result<CallOutput, LogicError> {
        let proposer = args.address(0)?;
        let approvals = self.storage.update(&ctx.account, |rec| {
            require_active_backup(rec, ctx.caller, ctx.timestamp)?;
            let proposal = rec
                .proposals
                .get_mut(&proposer)
                .ok_or(StorageError::ProposalNotFound(proposer))?;
            if !proposal.approvals.insert(ctx.caller) {
                return Err(LogicError::AlreadyApproved(ctx.caller));
            }
            Ok::<_, LogicError>(proposal.approvals.len())
        })?;
        info!(account = ?ctx.account, proposer = ?proposer, backup = ?ctx.caller, approvals, "Proposal approved");
        Ok(vec![AbiValue::from(approvals as u64)])
    }

    fn execute_proposal(&self, ctx: &CallContext, args: &CallArgs) -> Result<CallOutput, LogicError> {
        let proposer = args.address(0)?;
        let new_admin = self.storage.update(&ctx.account, |rec| {
            let proposal = rec
                .proposals
                .get(&proposer)
                .ok_or(StorageError::ProposalNotFound(proposer))?;
            let active: BTreeSet<Address> = rec.active_backups(ctx.timestamp).map(|b| b.backup).collect();
            let approvals = proposal.approvals.intersection(&active).count();
            let required = required_approvals(active.len());
            if active.is_empty() || approvals < required {
                return Err(LogicError::ProposalNotReady { approvals, required });
            }
            let new_admin = proposal.new_admin;
            if rec.keys.contains(&new_admin) && rec.keys.admin != new_admin {
                return Err(StorageError::DuplicateKey(new_admin).into());
            }

            rec.keys.admin = new_admin;
            rec.frozen = false;
            rec.proposals.remove(&proposer);
            Ok::<_, LogicError>(new_admin)
        })?;
        warn!(account = ?ctx.account, proposer = ?proposer, new_admin = ?new_admin, "Admin key replaced by backup proposal");
        Ok(Vec::new())
    }

    fn cancel(&self, ctx: &CallContext) -> Result<CallOutput, LogicError> {
        self.storage.update(&ctx.account, |rec| {
            rec.proposals
                .remove(&ctx.caller)
                .map(|_| ())
                .ok_or(StorageError::ProposalNotFound(ctx.caller))
        })?;
        info!(account = ?ctx.account, proposer = ?ctx.caller, "Proposal cancelled");
        Ok(Vec::new())
    }
}

impl LogicModule for ProposalLogic {
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
            Op::Propose => self.propose(ctx, args),
            Op::Approve => self.approve(ctx, args),
            Op::Execute => self.execute_proposal(ctx, args),
            Op::Cancel => self.cancel(ctx),
        }
    }
}
