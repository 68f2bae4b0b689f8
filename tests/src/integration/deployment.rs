//! # Deployment
//!
//! Full deployment through the runtime crate, checked from the outside.

#[cfg(test)]
mod tests {
    use deploy_runtime::{deploy_system, DeployConfig, DeployError, InMemoryChain};
    use la_02_logic_modules::ModuleKind;
    use shared_types::{compute_contract_address, AbiValue, Address, Selector};

    #[tokio::test]
    async fn test_every_selector_routes_to_its_module() {
        let config = DeployConfig::default();
        let chain = InMemoryChain::new(config.deployer);
        let system = deploy_system(&config, &chain).await.unwrap();

        for (kind, (name, address)) in ModuleKind::ALL.iter().zip(&system.logic_modules) {
            assert_eq!(kind.name(), *name);
            assert!(
                system.manager.module_addresses().contains(address),
                "{name} not registered"
            );
        }
        assert_eq!(
            system.manager.resolve(Selector::from_signature("getNonce()")).unwrap(),
            system.logic_modules[4].1
        );
    }

    #[tokio::test]
    async fn test_addresses_follow_deployer_nonce() {
        let deployer = Address::from_low_u8(0x42);
        let config = DeployConfig {
            deployer,
            ..DeployConfig::default()
        };
        let chain = InMemoryChain::new(deployer);
        let system = deploy_system(&config, &chain).await.unwrap();

        assert_eq!(system.storage.address(), compute_contract_address(deployer, 0));
        assert_eq!(system.manager.address(), compute_contract_address(deployer, 8));
        assert_eq!(system.creator.address(), compute_contract_address(deployer, 9));
        assert_eq!(chain.nonce(), 12);
    }

    #[tokio::test]
    async fn test_custom_threshold_and_governors() {
        let governors: Vec<Address> = (0x20..0x26).map(Address::from_low_u8).collect();
        let config = DeployConfig {
            confirmation_threshold: 6,
            governors: governors.clone(),
            deploy_test_fixtures: false,
            ..DeployConfig::default()
        };
        let chain = InMemoryChain::new(config.deployer);
        let system = deploy_system(&config, &chain).await.unwrap();

        assert_eq!(system.manager.threshold(), 6);
        assert_eq!(system.manager.governors(), governors);
        assert_eq!(chain.records()[8].args[1], AbiValue::from(6u64));
    }

    #[tokio::test]
    async fn test_zero_threshold_deploys_nothing() {
        let config = DeployConfig {
            confirmation_threshold: 0,
            ..DeployConfig::default()
        };
        let chain = InMemoryChain::new(config.deployer);
        assert!(matches!(
            deploy_system(&config, &chain).await,
            Err(DeployError::Config(_))
        ));
        assert_eq!(chain.nonce(), 0);
    }
}
