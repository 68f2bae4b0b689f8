//! # Hashing and Address Derivation
//!
//! Keccak-256 helpers and the CREATE / CREATE2 address rules used to place
//! deployed contracts and factory-created accounts.

use crate::value_objects::{Address, Hash};
use sha3::{Digest, Keccak256};

/// Keccak-256 of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Hash::new(bytes)
}

/// Keccak-256 over the concatenation of `parts`.
#[must_use]
pub fn keccak256_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hasher.finalize());
    Hash::new(bytes)
}

/// Address of a contract deployed by `deployer` with `nonce` (CREATE rule).
///
/// `keccak256(rlp([deployer, nonce]))[12..]`
#[must_use]
pub fn compute_contract_address(deployer: Address, nonce: u64) -> Address {
    let mut content = Vec::with_capacity(32);

    // 20-byte string: 0x80 + 20
    content.push(0x94);
    content.extend_from_slice(deployer.as_bytes());

    if nonce == 0 {
        content.push(0x80);
    } else if nonce < 128 {
        content.push(nonce as u8);
    } else {
        let nonce_bytes = trimmed_be_bytes(nonce);
        content.push(0x80 + nonce_bytes.len() as u8);
        content.extend_from_slice(&nonce_bytes);
    }

    // content is at most 1 + 20 + 9 bytes, always a short list
    let mut rlp = Vec::with_capacity(content.len() + 1);
    rlp.push(0xc0 + content.len() as u8);
    rlp.extend_from_slice(&content);

    address_from_hash(&keccak256(&rlp))
}

/// Address of a contract created by `deployer` with `salt` (CREATE2 rule).
///
/// `keccak256(0xff ++ deployer ++ salt ++ keccak256(init_code))[12..]`
#[must_use]
pub fn compute_contract_address_create2(deployer: Address, salt: Hash, init_code: &[u8]) -> Address {
    let code_hash = keccak256(init_code);
    let hash = keccak256_concat(&[&[0xff], deployer.as_bytes(), salt.as_bytes(), code_hash.as_bytes()]);
    address_from_hash(&hash)
}

fn address_from_hash(hash: &Hash) -> Address {
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash.as_bytes()[12..32]);
    Address::new(addr)
}

fn trimmed_be_bytes(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(7);
    bytes[start..].to_vec()
}
