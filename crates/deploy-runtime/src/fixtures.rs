//! # Test Fixtures
//!
//! A fungible token and an NFT deployed after the suite so accounts have
//! third-party assets to hold and dapps to call.

use crate::config::FixtureConfig;
use crate::errors::DeployError;
use crate::ports::ContractDeployer;
use serde::Serialize;
use shared_types::{AbiValue, Address, U256};
use tracing::info;

/// Deployed fungible token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenFixture {
    /// Contract address.
    pub address: Address,
    /// Token name.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Decimal places.
    pub decimals: u8,
}

/// Deployed NFT contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NftFixture {
    /// Contract address.
    pub address: Address,
    /// Contract name.
    pub name: String,
}

/// Both fixtures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fixtures {
    /// Fungible token.
    pub token: TokenFixture,
    /// NFT.
    pub nft: NftFixture,
}

/// Deploys the token then the NFT.
pub async fn deploy_fixtures<D>(config: &FixtureConfig, deployer: &D) -> Result<Fixtures, DeployError>
where
    D: ContractDeployer + ?Sized,
{
    let token_args = vec![
        AbiValue::Str(config.token_name.clone()),
        AbiValue::Str(config.token_symbol.clone()),
        AbiValue::Uint(U256::from(config.token_decimals)),
    ];
    let token = TokenFixture {
        address: deployer.deploy(&config.token_name, token_args).await?,
        name: config.token_name.clone(),
        symbol: config.token_symbol.clone(),
        decimals: config.token_decimals,
    };
    let nft = NftFixture {
        address: deployer.deploy(&config.nft_name, Vec::new()).await?,
        name: config.nft_name.clone(),
    };
    info!(token = ?token.address, nft = ?nft.address, "Test fixtures deployed");
    Ok(Fixtures { token, nft })
}
