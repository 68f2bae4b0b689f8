//! # Call Values
//!
//! ABI-style values passed to and returned from account operations.
//! Operations read their arguments positionally through [`CallArgs`].

use crate::errors::ArgError;
use crate::value_objects::{Address, Hash, U256};
use serde::{Deserialize, Serialize};

/// A single typed call argument or return value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbiValue {
    /// `address`
    Address(Address),
    /// `uint256`
    Uint(U256),
    /// `bool`
    Bool(bool),
    /// `bytes32`
    FixedBytes(Hash),
    /// `bytes`
    Bytes(Vec<u8>),
    /// `address[]`
    AddressList(Vec<Address>),
    /// `string`
    Str(String),
}

impl AbiValue {
    /// Canonical Solidity type name, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Uint(_) => "uint256",
            Self::Bool(_) => "bool",
            Self::FixedBytes(_) => "bytes32",
            Self::Bytes(_) => "bytes",
            Self::AddressList(_) => "address[]",
            Self::Str(_) => "string",
        }
    }
}

impl From<Address> for AbiValue {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<u64> for AbiValue {
    fn from(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<bool> for AbiValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Hash> for AbiValue {
    fn from(value: Hash) -> Self {
        Self::FixedBytes(value)
    }
}

impl From<Vec<Address>> for AbiValue {
    fn from(value: Vec<Address>) -> Self {
        Self::AddressList(value)
    }
}

/// Ordered list of call arguments with typed accessors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallArgs(pub Vec<AbiValue>);

/// Values returned by an operation, in declaration order.
pub type CallOutput = Vec<AbiValue>;

macro_rules! typed_accessor {
    ($name:ident, $variant:ident, $ty:ty, $label:literal) => {
        #[doc = concat!("Reads argument `index` as `", $label, "`.")]
        pub fn $name(&self, index: usize) -> Result<$ty, ArgError> {
            match self.get(index)? {
                AbiValue::$variant(value) => Ok(value.clone()),
                other => Err(ArgError::TypeMismatch {
                    index,
                    expected: $label,
                    actual: other.type_name(),
                }),
            }
        }
    };
}

impl CallArgs {
    /// Empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a value, builder style.
    #[must_use]
    pub fn with(mut self, value: impl Into<AbiValue>) -> Self {
        self.0.push(value.into());
        self
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no arguments were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw access to argument `index`.
    pub fn get(&self, index: usize) -> Result<&AbiValue, ArgError> {
        self.0.get(index).ok_or(ArgError::Missing { index })
    }

    typed_accessor!(address, Address, Address, "address");
    typed_accessor!(uint, Uint, U256, "uint256");
    typed_accessor!(fixed_bytes, FixedBytes, Hash, "bytes32");
    typed_accessor!(bytes, Bytes, Vec<u8>, "bytes");

    /// Reads argument `index` as a `uint256` that must fit in a `u64`.
    pub fn uint_u64(&self, index: usize) -> Result<u64, ArgError> {
        let value = self.uint(index)?;
        if value > U256::from(u64::MAX) {
            return Err(ArgError::TypeMismatch {
                index,
                expected: "uint64",
                actual: "uint256",
            });
        }
        Ok(value.low_u64())
    }
}

impl From<Vec<AbiValue>> for CallArgs {
    fn from(values: Vec<AbiValue>) -> Self {
        Self(values)
    }
}
