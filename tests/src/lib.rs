//! # Account Suite Test Suite
//!
//! Unified test crate for behaviour that spans several crates.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── dispatch_benchmarks.rs   # selector resolution and dispatch
//! └── src/integration/
//!     ├── account_flows.rs         # recovery, dual signatures, dapps, freeze
//!     ├── governance.rs            # registry mutations on a live suite
//!     └── deployment.rs            # deployment wiring from the outside
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p la-tests
//!
//! # By category
//! cargo test -p la-tests integration::account_flows::
//! cargo test -p la-tests integration::governance::
//!
//! # Benchmarks
//! cargo bench -p la-tests
//! ```

pub mod integration;
