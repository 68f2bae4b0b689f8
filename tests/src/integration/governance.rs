//! # Registry Governance
//!
//! Changes to the deployed logic manager's selector registry through
//! governor-confirmed mutations, observed from live accounts.

#[cfg(test)]
mod tests {
    use crate::integration::harness::*;
    use la_02_logic_modules::ModuleKind;
    use la_03_logic_manager::{
        ConfigurationError, ManagerError, ManagerEvent, MutationStatus, RegistryMutation,
        DEFAULT_MUTATION_TTL_SECS,
    };
    use shared_types::{Address, CallArgs, Selector};

    const REPLACEMENT_DAPP_LOGIC: Address = Address::from_low_u8(0x6d);

    fn dapp_logic_address(system: &deploy_runtime::DeployedSystem) -> Address {
        system
            .logic_modules
            .iter()
            .find(|(name, _)| *name == ModuleKind::Dapp.name())
            .map(|(_, address)| *address)
            .unwrap()
    }

    #[tokio::test]
    async fn test_module_swap_preserves_account_state() {
        let system = deployed().await;
        let account = funded_account(&system);
        let governors = system.manager.governors();
        assert_eq!(governors.len(), 4);

        account
            .invoke_signature("approveDapp(address)", ADMIN, &CallArgs::new().with(DAPP), NOW)
            .unwrap();

        // Remove the dapp module: four confirmations needed
        let old = dapp_logic_address(&system);
        let id = system
            .manager
            .propose(governors[0], RegistryMutation::RemoveModule(old), NOW)
            .unwrap();
        for (i, governor) in governors.iter().enumerate().take(3) {
            assert_eq!(
                system.manager.confirm(id, *governor, NOW).unwrap(),
                MutationStatus::PartiallyConfirmed(i + 1)
            );
        }
        assert_eq!(system.manager.confirm(id, governors[3], NOW).unwrap(), MutationStatus::Executed);

        let selector = Selector::from_signature("approveDapp(address)");
        let err = account.invoke(selector, ADMIN, &CallArgs::new().with(DAPP), NOW).unwrap_err();
        assert_eq!(
            err,
            la_04_account::AccountError::Manager(ManagerError::UnknownSelector(selector))
        );

        // Install a fresh deployment of the same logic over the same storage
        let replacement = ModuleKind::Dapp.build(REPLACEMENT_DAPP_LOGIC, system.storage.clone());
        let id = system
            .manager
            .propose(governors[1], RegistryMutation::AddModule(replacement), NOW)
            .unwrap();
        for governor in &governors {
            system.manager.confirm(id, *governor, NOW).unwrap();
        }
        assert_eq!(system.manager.resolve(selector).unwrap(), REPLACEMENT_DAPP_LOGIC);

        // Approval made before the swap is still in storage
        let approved = account
            .static_call(
                Selector::from_signature("isDappApproved(address)"),
                &CallArgs::new().with(DAPP),
                NOW,
            )
            .unwrap();
        assert_eq!(approved, vec![shared_types::AbiValue::Bool(true)]);
    }

    #[tokio::test]
    async fn test_module_over_twin_storage_rejected_at_proposal() {
        let system = deployed().await;
        let governors = system.manager.governors();
        // Same address as the deployed storage, different instance
        let foreign = la_01_account_storage::StorageHandle::new(la_01_account_storage::AccountStorage::new(
            system.storage.address(),
        ));
        let module = ModuleKind::Dapp.build(REPLACEMENT_DAPP_LOGIC, foreign);

        let err = system
            .manager
            .propose(governors[0], RegistryMutation::AddModule(module), NOW)
            .unwrap_err();
        assert!(matches!(
            err,
            ManagerError::Configuration(ConfigurationError::StorageMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_outsider_cannot_govern() {
        let system = deployed().await;
        let err = system
            .manager
            .propose(ADMIN, RegistryMutation::SetThreshold(3), NOW)
            .unwrap_err();
        assert_eq!(err, ManagerError::NotAuthorized(ADMIN));
    }

    #[tokio::test]
    async fn test_stale_mutation_expires() {
        let system = deployed().await;
        let governors = system.manager.governors();
        let id = system
            .manager
            .propose(governors[0], RegistryMutation::SetThreshold(3), NOW)
            .unwrap();
        system.manager.confirm(id, governors[0], NOW).unwrap();

        let late = NOW + DEFAULT_MUTATION_TTL_SECS + 1;
        assert_eq!(system.manager.expire_stale(late), vec![id]);
        assert_eq!(system.manager.mutation_status(id), Some(MutationStatus::Expired));
        assert_eq!(system.manager.threshold(), 4);

        let events = system.manager.take_events();
        assert!(events.contains(&ManagerEvent::MutationExpired { id }));
    }
}
