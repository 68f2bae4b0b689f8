//! # Domain Layer
//!
//! Pure registry and mutation logic. No locking, no logging.

pub mod events;
pub mod mutation;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use events::ManagerEvent;
pub use mutation::{
    MutationId, MutationStatus, PendingMutation, RegistryMutation, DEFAULT_MUTATION_TTL_SECS,
};
pub use registry::SelectorRegistry;
