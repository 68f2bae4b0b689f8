//! # Account Flows
//!
//! Multi-step account scenarios across several logic modules sharing one
//! storage:
//!
//! 1. **Recovery**: admin key lost, backups rotate it by majority even while frozen.
//! 2. **Dual signatures**: asset key submits, a backup co-signs.
//! 3. **Dapps**: admin approves, operation key calls, admin revokes.
//! 4. **Freeze**: admin freezes, asset movement stops, static reads continue.

#[cfg(test)]
mod tests {
    use crate::integration::harness::*;
    use la_01_account_storage::{StorageError, NATIVE_ASSET};
    use la_02_logic_modules::LogicError;
    use la_04_account::AccountError;
    use shared_types::{AbiValue, CallArgs, Selector, U256};

    fn read(account: &la_04_account::AccountInstance, signature: &str) -> Vec<AbiValue> {
        account
            .static_call(Selector::from_signature(signature), &CallArgs::new(), NOW)
            .unwrap()
    }

    // =========================================================================
    // RECOVERY
    // =========================================================================

    #[tokio::test]
    async fn test_backups_recover_admin_by_majority() {
        let system = deployed().await;
        let account = funded_account(&system);

        // Admin freezes after losing the key, then backups take over
        account.invoke_signature("freeze()", ADMIN, &CallArgs::new(), NOW).unwrap();

        let hash = account
            .invoke_signature("proposeAdminChange(address)", BACKUP_A, &CallArgs::new().with(NEW_ADMIN), NOW)
            .unwrap();
        assert!(matches!(hash[0], AbiValue::FixedBytes(_)));

        // One of three is not a majority
        let err = account
            .invoke_signature("executeProposal(address)", RECIPIENT, &CallArgs::new().with(BACKUP_A), NOW)
            .unwrap_err();
        assert_eq!(
            logic_error(&err),
            &LogicError::ProposalNotReady { approvals: 1, required: 2 }
        );

        let approvals = account
            .invoke_signature("approveProposal(address)", BACKUP_B, &CallArgs::new().with(BACKUP_A), NOW)
            .unwrap();
        assert_eq!(approvals, vec![AbiValue::Uint(U256::from(2))]);

        account
            .invoke_signature("executeProposal(address)", RECIPIENT, &CallArgs::new().with(BACKUP_A), NOW)
            .unwrap();

        assert_eq!(read(&account, "getAdminKey()"), vec![AbiValue::Address(NEW_ADMIN)]);
        assert_eq!(read(&account, "isFrozen()"), vec![AbiValue::Bool(false)]);

        // Old admin is locked out, new admin is in
        let err = account.invoke_signature("freeze()", ADMIN, &CallArgs::new(), NOW).unwrap_err();
        assert!(matches!(logic_error(&err), LogicError::Unauthorized { .. }));
        account.invoke_signature("freeze()", NEW_ADMIN, &CallArgs::new(), NOW).unwrap();
    }

    #[tokio::test]
    async fn test_expired_backup_cannot_propose() {
        let system = deployed().await;
        let account = funded_account(&system);
        let later = NOW + BACKUP_LIFETIME + 1;

        let err = account
            .invoke_signature("proposeAdminChange(address)", BACKUP_A, &CallArgs::new().with(NEW_ADMIN), later)
            .unwrap_err();
        assert!(matches!(logic_error(&err), LogicError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_added_backup_waits_for_delay() {
        let system = deployed().await;
        let account = funded_account(&system);
        let extra = shared_types::Address::from_low_u8(0xb4);

        let args = CallArgs::new().with(extra).with(100u64).with(BACKUP_LIFETIME);
        account.invoke_signature("addBackup(address,uint256,uint256)", ADMIN, &args, NOW).unwrap();

        let active = account
            .static_call(Selector::from_signature("getActiveBackups()"), &CallArgs::new(), NOW)
            .unwrap();
        assert_eq!(active, vec![AbiValue::AddressList(vec![BACKUP_A, BACKUP_B, BACKUP_C])]);

        let active_later = account
            .static_call(Selector::from_signature("getActiveBackups()"), &CallArgs::new(), NOW + 100)
            .unwrap();
        assert_eq!(
            active_later,
            vec![AbiValue::AddressList(vec![BACKUP_A, BACKUP_B, BACKUP_C, extra])]
        );
    }

    // =========================================================================
    // DUAL SIGNATURES
    // =========================================================================

    #[tokio::test]
    async fn test_dual_transfer_needs_backup_cosignature() {
        let system = deployed().await;
        let account = funded_account(&system);

        let args = CallArgs::new().with(NATIVE_ASSET).with(RECIPIENT).with(U256::from(400));
        let out = account
            .invoke_signature("submitDualTransfer(address,address,uint256)", ASSET, &args, NOW)
            .unwrap();
        let AbiValue::FixedBytes(hash) = out[0].clone() else {
            panic!("expected an operation hash, got {out:?}");
        };

        // Nothing moves until a backup confirms
        assert_eq!(account.balance(NATIVE_ASSET).unwrap(), U256::from(FUNDING));

        let err = account
            .invoke_signature("confirmDualTransfer(bytes32)", RECIPIENT, &CallArgs::new().with(hash), NOW)
            .unwrap_err();
        assert!(matches!(logic_error(&err), LogicError::Unauthorized { .. }));

        account
            .invoke_signature("confirmDualTransfer(bytes32)", BACKUP_C, &CallArgs::new().with(hash), NOW)
            .unwrap();
        assert_eq!(account.balance(NATIVE_ASSET).unwrap(), U256::from(FUNDING - 400));

        // Consumed
        let err = account
            .invoke_signature("confirmDualTransfer(bytes32)", BACKUP_A, &CallArgs::new().with(hash), NOW)
            .unwrap_err();
        assert_eq!(
            logic_error(&err),
            &LogicError::Storage(StorageError::DualOperationNotFound(hash))
        );
    }

    #[tokio::test]
    async fn test_dual_transfer_cancelled_by_admin() {
        let system = deployed().await;
        let account = funded_account(&system);

        let args = CallArgs::new().with(NATIVE_ASSET).with(RECIPIENT).with(U256::from(10));
        let out = account
            .invoke_signature("submitDualTransfer(address,address,uint256)", ASSET, &args, NOW)
            .unwrap();
        let AbiValue::FixedBytes(hash) = out[0].clone() else {
            panic!("expected an operation hash, got {out:?}");
        };
        account
            .invoke_signature("cancelDualTransfer(bytes32)", ADMIN, &CallArgs::new().with(hash), NOW)
            .unwrap();

        let err = account
            .invoke_signature("confirmDualTransfer(bytes32)", BACKUP_A, &CallArgs::new().with(hash), NOW)
            .unwrap_err();
        assert!(matches!(
            logic_error(&err),
            LogicError::Storage(StorageError::DualOperationNotFound(_))
        ));
    }

    // =========================================================================
    // DAPPS
    // =========================================================================

    #[tokio::test]
    async fn test_dapp_lifecycle() {
        let system = deployed().await;
        let account = funded_account(&system);
        account
            .invoke_signature("addOperationKey(address)", ADDING, &CallArgs::new().with(OPERATOR), NOW)
            .unwrap();

        let call = CallArgs::new()
            .with(DAPP)
            .with(U256::from(25))
            .with(AbiValue::Bytes(vec![0xde, 0xad]));

        let err = account
            .invoke_signature("callDapp(address,uint256,bytes)", OPERATOR, &call, NOW)
            .unwrap_err();
        assert_eq!(logic_error(&err), &LogicError::DappNotApproved(DAPP));

        account
            .invoke_signature("approveDapp(address)", ADMIN, &CallArgs::new().with(DAPP), NOW)
            .unwrap();
        account
            .invoke_signature("callDapp(address,uint256,bytes)", OPERATOR, &call, NOW)
            .unwrap();
        assert_eq!(account.balance(NATIVE_ASSET).unwrap(), U256::from(FUNDING - 25));

        let approved = account
            .static_call(
                Selector::from_signature("isDappApproved(address)"),
                &CallArgs::new().with(DAPP),
                NOW,
            )
            .unwrap();
        assert_eq!(approved, vec![AbiValue::Bool(true)]);

        account
            .invoke_signature("revokeDapp(address)", ADMIN, &CallArgs::new().with(DAPP), NOW)
            .unwrap();
        let err = account
            .invoke_signature("callDapp(address,uint256,bytes)", OPERATOR, &call, NOW)
            .unwrap_err();
        assert_eq!(logic_error(&err), &LogicError::DappNotApproved(DAPP));
    }

    // =========================================================================
    // FREEZE
    // =========================================================================

    #[tokio::test]
    async fn test_frozen_account_keeps_static_reads() {
        let system = deployed().await;
        let account = funded_account(&system);
        account.invoke_signature("freeze()", ADMIN, &CallArgs::new(), NOW).unwrap();

        let args = CallArgs::new().with(RECIPIENT).with(U256::from(1));
        let err = account
            .invoke_signature("transferNative(address,uint256)", ASSET, &args, NOW)
            .unwrap_err();
        assert_eq!(logic_error(&err), &LogicError::AccountFrozen(account.address()));

        assert_eq!(read(&account, "isFrozen()"), vec![AbiValue::Bool(true)]);
        assert_eq!(
            account
                .static_call(
                    Selector::from_signature("getBalance(address)"),
                    &CallArgs::new().with(NATIVE_ASSET),
                    NOW
                )
                .unwrap(),
            vec![AbiValue::Uint(U256::from(FUNDING))]
        );

        account.invoke_signature("unfreeze()", ADMIN, &CallArgs::new(), NOW).unwrap();
        account
            .invoke_signature("transferNative(address,uint256)", ASSET, &args, NOW)
            .unwrap();
    }

    #[tokio::test]
    async fn test_static_call_rejects_mutating_selector() {
        let system = deployed().await;
        let account = funded_account(&system);
        let selector = Selector::from_signature("freeze()");
        assert_eq!(
            account.static_call(selector, &CallArgs::new(), NOW).unwrap_err(),
            AccountError::NotStatic(selector)
        );
    }

    #[tokio::test]
    async fn test_accounts_share_storage_but_not_state() {
        let system = deployed().await;
        let first = funded_account(&system);
        let second = funded_account(&system);

        first.invoke_signature("freeze()", ADMIN, &CallArgs::new(), NOW).unwrap();
        assert_eq!(read(&first, "isFrozen()"), vec![AbiValue::Bool(true)]);
        assert_eq!(read(&second, "isFrozen()"), vec![AbiValue::Bool(false)]);
        assert_eq!(system.storage.account_count(), 2);
    }
}
