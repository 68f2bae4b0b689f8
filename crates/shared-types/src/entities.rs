//! # Core Entities
//!
//! The call context threaded from an account through the manager into a
//! logic module.

use crate::value_objects::Address;
use serde::{Deserialize, Serialize};

/// Context of a single account operation.
///
/// `caller` is the already-authenticated identity that submitted the call;
/// modules authorize it against the keys stored for `account`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Account the operation acts on.
    pub account: Address,
    /// Identity submitting the operation.
    pub caller: Address,
    /// Unix timestamp (seconds) at which the call executes.
    pub timestamp: u64,
}

impl CallContext {
    /// Creates a new call context.
    #[must_use]
    pub const fn new(account: Address, caller: Address, timestamp: u64) -> Self {
        Self {
            account,
            caller,
            timestamp,
        }
    }

    /// Context for a read-only query at `timestamp`; no caller identity is
    /// attached.
    #[must_use]
    pub const fn read_only(account: Address, timestamp: u64) -> Self {
        Self {
            account,
            caller: Address::ZERO,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_only_has_no_caller() {
        let ctx = CallContext::read_only(Address::from_low_u8(0xa1), 42);
        assert!(ctx.caller.is_zero());
        assert_eq!(ctx.timestamp, 42);
        assert_eq!(ctx, CallContext::new(Address::from_low_u8(0xa1), Address::ZERO, 42));
    }
}
