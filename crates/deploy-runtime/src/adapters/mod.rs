//! # Adapters

pub mod in_memory_chain;

pub use in_memory_chain::{DeploymentRecord, InMemoryChain};
