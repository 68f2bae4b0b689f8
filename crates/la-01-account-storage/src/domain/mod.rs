//! # Domain Layer
//!
//! Account records and their bookkeeping rules.
//! NO I/O, NO locking.

pub mod entities;

pub use entities::*;
