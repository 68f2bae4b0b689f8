//! # Shared Types Crate
//!
//! Value objects and call primitives shared by the account-suite crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, selectors and call values used by
//!   storage, logic modules, the manager and the factory are defined here.
//! - **Caller Identity**: a [`CallContext`] carries the authenticated caller;
//!   modules never trust identities passed inside the arguments.

pub mod abi;
pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use abi::{AbiValue, CallArgs, CallOutput};
pub use entities::CallContext;
pub use errors::{ArgError, ParseError};
pub use services::{
    compute_contract_address, compute_contract_address_create2, keccak256, keccak256_concat,
};
pub use value_objects::{Address, Hash, Selector, U256};
