//! Shared fixtures for the integration tests.

use deploy_runtime::{deploy_system, DeployConfig, DeployedSystem, InMemoryChain};
use la_01_account_storage::{AccountKeys, BackupAccount, NATIVE_ASSET};
use la_02_logic_modules::LogicError;
use la_04_account::{AccountError, AccountInstance};
use shared_types::{Address, U256};

pub const ADMIN: Address = Address::from_low_u8(1);
pub const ASSET: Address = Address::from_low_u8(2);
pub const ADDING: Address = Address::from_low_u8(3);
pub const OPERATOR: Address = Address::from_low_u8(4);
pub const BACKUP_A: Address = Address::from_low_u8(0xb1);
pub const BACKUP_B: Address = Address::from_low_u8(0xb2);
pub const BACKUP_C: Address = Address::from_low_u8(0xb3);
pub const RECIPIENT: Address = Address::from_low_u8(0x55);
pub const DAPP: Address = Address::from_low_u8(0xda);
pub const NEW_ADMIN: Address = Address::from_low_u8(0x99);

pub const NOW: u64 = 10_000;
pub const BACKUP_LIFETIME: u64 = 365 * 24 * 60 * 60;
pub const FUNDING: u64 = 1_000;

/// Suite deployed with the default configuration.
pub async fn deployed() -> DeployedSystem {
    let config = DeployConfig::default();
    let chain = InMemoryChain::new(config.deployer);
    deploy_system(&config, &chain).await.unwrap()
}

/// Funded account with three active backups.
pub fn funded_account(system: &DeployedSystem) -> AccountInstance {
    let backups = [BACKUP_A, BACKUP_B, BACKUP_C]
        .into_iter()
        .map(|b| BackupAccount::immediate(b, NOW, BACKUP_LIFETIME))
        .collect();
    let account = system
        .creator
        .create_account(AccountKeys::new(ADMIN, ASSET, ADDING), backups, NOW)
        .unwrap();
    account.deposit(NATIVE_ASSET, U256::from(FUNDING)).unwrap();
    account
}

/// Logic error carried by a failed account call.
pub fn logic_error(err: &AccountError) -> &LogicError {
    match err {
        AccountError::Manager(manager) => manager.logic_error().unwrap(),
        other => panic!("expected a dispatch failure, got {other:?}"),
    }
}
