//! # In-Memory Chain
//!
//! [`ContractDeployer`] that assigns CREATE addresses from the deployer and
//! its nonce, and keeps a log of every deployment.

use crate::errors::DeployError;
use crate::ports::ContractDeployer;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use shared_types::{compute_contract_address, AbiValue, Address};
use tracing::debug;

/// One deployment as seen by the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeploymentRecord {
    /// Zero-based position in the deployment sequence.
    pub step: usize,
    /// Contract name.
    pub name: String,
    /// Assigned address.
    pub address: Address,
    /// Constructor arguments.
    pub args: Vec<AbiValue>,
}

#[derive(Debug, Default)]
struct ChainState {
    nonce: u64,
    records: Vec<DeploymentRecord>,
}

/// Local chain for deployments and tests.
#[derive(Debug)]
pub struct InMemoryChain {
    deployer: Address,
    state: RwLock<ChainState>,
}

impl InMemoryChain {
    /// Chain whose deployments are sent from `deployer` starting at nonce 0.
    #[must_use]
    pub fn new(deployer: Address) -> Self {
        Self {
            deployer,
            state: RwLock::new(ChainState::default()),
        }
    }

    /// Every deployment so far, in order.
    #[must_use]
    pub fn records(&self) -> Vec<DeploymentRecord> {
        self.state.read().records.clone()
    }

    /// Deployer nonce.
    #[must_use]
    pub fn nonce(&self) -> u64 {
        self.state.read().nonce
    }
}

#[async_trait]
impl ContractDeployer for InMemoryChain {
    fn deployer(&self) -> Address {
        self.deployer
    }

    async fn deploy(&self, name: &str, args: Vec<AbiValue>) -> Result<Address, DeployError> {
        let mut state = self.state.write();
        let address = compute_contract_address(self.deployer, state.nonce);
        state.nonce += 1;
        let step = state.records.len();
        debug!(step, contract = name, address = ?address, "Contract deployed");
        state.records.push(DeploymentRecord {
            step,
            name: name.to_string(),
            address,
            args,
        });
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_addresses_follow_deployer_nonce() {
        let deployer = Address::from_low_u8(0x11);
        let chain = InMemoryChain::new(deployer);

        let first = chain.deploy("A", Vec::new()).await.unwrap();
        let second = chain.deploy("B", vec![AbiValue::Address(first)]).await.unwrap();

        assert_eq!(first, compute_contract_address(deployer, 0));
        assert_eq!(second, compute_contract_address(deployer, 1));
        assert_ne!(first, second);
        assert_eq!(chain.nonce(), 2);

        let records = chain.records();
        assert_eq!(records[1].step, 1);
        assert_eq!(records[1].name, "B");
        assert_eq!(records[1].args, vec![AbiValue::Address(first)]);
    }
}
