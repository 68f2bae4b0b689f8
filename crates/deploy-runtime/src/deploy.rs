//! # Suite Deployment
//!
//! Deploys one complete account suite as a strictly sequential chain. Each
//! step waits for the previous deployment and uses the addresses it
//! produced:
//!
//! ```text
//! AccountStorage
//!     └─→ AccountLogic, TransferLogic, DualsigsLogic,
//!         DappLogic, CommonStaticLogic, ProposalLogic   (storage address)
//! Account                                               (template)
//! LogicManager                                          (six logic addresses, threshold)
//! AccountCreator                                        (manager, storage, template)
//! MyToken, MyNft                                        (optional fixtures)
//! ```
//!
//! Any failure aborts the remaining steps.

use crate::config::DeployConfig;
use crate::errors::DeployError;
use crate::fixtures::{deploy_fixtures, Fixtures};
use crate::ports::ContractDeployer;
use la_01_account_storage::{AccountStorage, StorageHandle};
use la_02_logic_modules::ModuleKind;
use la_03_logic_manager::LogicManager;
use la_04_account::AccountTemplate;
use la_05_account_creator::AccountCreator;
use serde::Serialize;
use shared_types::{AbiValue, Address};
use std::sync::Arc;
use tracing::{info, instrument};

/// Live objects of a deployed suite.
#[derive(Debug)]
pub struct DeployedSystem {
    /// Shared account storage.
    pub storage: StorageHandle,
    /// Logic module addresses in deployment order.
    pub logic_modules: Vec<(&'static str, Address)>,
    /// Account template.
    pub template: AccountTemplate,
    /// Logic manager shared by every account.
    pub manager: Arc<LogicManager>,
    /// Account factory.
    pub creator: Arc<AccountCreator>,
    /// Test fixtures, when enabled.
    pub fixtures: Option<Fixtures>,
}

/// Named addresses of a deployed suite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeploymentSummary {
    /// Account storage.
    pub account_storage: Address,
    /// Logic modules by name, in deployment order.
    pub logic_modules: Vec<(String, Address)>,
    /// Account template.
    pub account: Address,
    /// Logic manager.
    pub logic_manager: Address,
    /// Confirmation threshold.
    pub confirmation_threshold: usize,
    /// Account creator.
    pub account_creator: Address,
    /// Fixtures, when deployed.
    pub fixtures: Option<Fixtures>,
}

impl DeployedSystem {
    /// Named addresses.
    #[must_use]
    pub fn summary(&self) -> DeploymentSummary {
        DeploymentSummary {
            account_storage: self.storage.address(),
            logic_modules: self
                .logic_modules
                .iter()
                .map(|(name, address)| ((*name).to_string(), *address))
                .collect(),
            account: self.template.address(),
            logic_manager: self.manager.address(),
            confirmation_threshold: self.manager.threshold(),
            account_creator: self.creator.address(),
            fixtures: self.fixtures.clone(),
        }
    }

    /// Logs every deployed address.
    pub fn log_summary(&self) {
        info!("===========================================");
        info!("  Account suite deployed");
        info!("===========================================");
        info!(address = ?self.storage.address(), "{}", AccountStorage::NAME);
        for (name, address) in &self.logic_modules {
            info!(address = ?address, "{name}");
        }
        info!(address = ?self.template.address(), "{}", AccountTemplate::NAME);
        info!(
            address = ?self.manager.address(),
            threshold = self.manager.threshold(),
            "{}",
            LogicManager::NAME
        );
        info!(address = ?self.creator.address(), "{}", AccountCreator::NAME);
        if let Some(fixtures) = &self.fixtures {
            info!(address = ?fixtures.token.address, symbol = %fixtures.token.symbol, "{}", fixtures.token.name);
            info!(address = ?fixtures.nft.address, "{}", fixtures.nft.name);
        }
    }
}

/// Deploys and wires a complete suite through `deployer`.
#[instrument(skip_all, fields(deployer = ?deployer.deployer(), threshold = config.confirmation_threshold))]
pub async fn deploy_system<D>(config: &DeployConfig, deployer: &D) -> Result<DeployedSystem, DeployError>
where
    D: ContractDeployer + ?Sized,
{
    config.validate()?;
    let threshold = config.confirmation_threshold;

    // Storage first: every module is constructed against its address
    let storage_address = deployer.deploy(AccountStorage::NAME, Vec::new()).await?;
    let storage = StorageHandle::new(AccountStorage::new(storage_address));

    let mut modules = Vec::with_capacity(ModuleKind::ALL.len());
    let mut logic_modules = Vec::with_capacity(ModuleKind::ALL.len());
    for kind in ModuleKind::ALL {
        let address = deployer
            .deploy(kind.name(), vec![AbiValue::Address(storage_address)])
            .await?;
        modules.push(kind.build(address, storage.clone()));
        logic_modules.push((kind.name(), address));
    }

    let template = AccountTemplate::new(deployer.deploy(AccountTemplate::NAME, Vec::new()).await?);

    let logic_addresses: Vec<Address> = logic_modules.iter().map(|(_, address)| *address).collect();
    let manager_address = deployer
        .deploy(
            LogicManager::NAME,
            vec![AbiValue::AddressList(logic_addresses), AbiValue::from(threshold as u64)],
        )
        .await?;
    let manager = Arc::new(
        LogicManager::new(manager_address, modules, threshold)?
            .with_governors(config.effective_governors())?
            .with_mutation_ttl(config.mutation_ttl_secs),
    );

    let creator_address = deployer
        .deploy(
            AccountCreator::NAME,
            vec![
                AbiValue::Address(manager_address),
                AbiValue::Address(storage_address),
                AbiValue::Address(template.address()),
            ],
        )
        .await?;
    let creator = Arc::new(AccountCreator::new(
        creator_address,
        Arc::clone(&manager),
        storage.clone(),
        template,
    )?);

    let fixtures = if config.deploy_test_fixtures {
        Some(deploy_fixtures(&config.fixtures, deployer).await?)
    } else {
        None
    };

    let system = DeployedSystem {
        storage,
        logic_modules,
        template,
        manager,
        creator,
        fixtures,
    };
    system.log_summary();
    Ok(system)
}
