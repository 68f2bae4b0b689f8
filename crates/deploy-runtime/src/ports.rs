//! # Outbound Ports

use crate::errors::DeployError;
use async_trait::async_trait;
use shared_types::{AbiValue, Address};

/// Sends contract deployments to a chain.
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Account the deployments are sent from.
    fn deployer(&self) -> Address;

    /// Deploys contract `name` with positional constructor arguments and
    /// returns its address once the deployment is final.
    async fn deploy(&self, name: &str, args: Vec<AbiValue>) -> Result<Address, DeployError>;
}
