//! Textbook Diffie-Hellman over a toy group (`P = 23`, `G = 5`).
//!
//! Demonstration only; the group is small enough to brute-force by hand.

use rand::Rng;
use serde::Serialize;

pub const P: u64 = 23;
pub const G: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublicParameters {
    #[serde(rename = "P")]
    pub p: u64,
    #[serde(rename = "G")]
    pub g: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub private_key: u64,
    pub public_key: u64,
}

pub fn public_parameters() -> PublicParameters {
    PublicParameters { p: P, g: G }
}

/// `base^exp mod modulus` by square-and-multiply.
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }

    let modulus = u128::from(modulus);
    let mut base = u128::from(base) % modulus;
    let mut result: u128 = 1;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        exp >>= 1;
        base = base * base % modulus;
    }
    result as u64
}

/// Private key drawn uniformly from `2..=P-1`.
pub fn generate_key_pair() -> KeyPair {
    let private_key = rand::thread_rng().gen_range(2..P);
    KeyPair {
        private_key,
        public_key: mod_pow(G, private_key, P),
    }
}

pub fn compute_shared_secret(private_key: u64, other_public_key: u64) -> u64 {
    mod_pow(other_public_key, private_key, P)
}
