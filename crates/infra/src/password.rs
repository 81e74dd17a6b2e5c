//! Password hashing with PBKDF2-HMAC-SHA256.
//!
//! Stored form: `pbkdf2-sha256$<rounds>$<salt-hex>$<digest-hex>`. The round
//! count travels with the hash, so raising [`ROUNDS`] keeps old hashes valid.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

/// Rounds used for new hashes.
pub const ROUNDS: u32 = 100_000;

pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    hash_with(password, &salt, ROUNDS)
}

/// Recompute and compare against a stored hash. Unparseable hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(rounds), Some(salt_hex), Some(digest_hex), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    let Some(rounds) = rounds.parse::<u32>().ok().filter(|&r| r > 0) else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
        return false;
    };

    let actual = derive(password, &salt, rounds);
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn hash_with(password: &str, salt: &[u8], rounds: u32) -> String {
    format!(
        "{SCHEME}${rounds}${}${}",
        hex::encode(salt),
        hex::encode(derive(password, salt, rounds))
    )
}

fn derive(password: &str, salt: &[u8], rounds: u32) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut out);
    out
}
