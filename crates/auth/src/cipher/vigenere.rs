//! Vigenère cipher over a fixed 71-symbol alphabet (payload segment).
//!
//! Only characters present in [`ALPHABET`] are shifted, and only they
//! advance the key position. Everything else (JSON quotes and braces,
//! non-ASCII text) passes through untouched.

use core::str::FromStr;

use crate::error::KeyError;

/// Shift alphabet. A symbol's position is its numeric value.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 .,;:!?-_";

pub const DEFAULT_KEY: &str = "SECRETKEY";

fn index_of(c: char) -> Option<usize> {
    if !c.is_ascii() {
        return None;
    }
    ALPHABET.iter().position(|&b| b == c as u8)
}

/// Parsed Vigenère key: the shift of every key character.
///
/// Key characters are uppercased before lookup, so `secretkey` and
/// `SECRETKEY` are the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VigenereKey {
    shifts: Vec<usize>,
}

impl VigenereKey {
    pub fn new(key: &str) -> Result<Self, KeyError> {
        if key.is_empty() {
            return Err(KeyError::EmptyVigenereKey);
        }

        let shifts = key
            .chars()
            .map(|c| index_of(c.to_ascii_uppercase()).ok_or(KeyError::UnsupportedVigenereChar(c)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { shifts })
    }

    fn shift_at(&self, position: usize) -> usize {
        self.shifts[position % self.shifts.len()]
    }
}

impl Default for VigenereKey {
    fn default() -> Self {
        Self {
            shifts: DEFAULT_KEY
                .bytes()
                .filter_map(|b| index_of(b as char))
                .collect(),
        }
    }
}

impl FromStr for VigenereKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

fn apply(text: &str, key: &VigenereKey, shift: impl Fn(usize, usize) -> usize) -> String {
    let mut position = 0;
    text.chars()
        .map(|c| match index_of(c) {
            Some(index) => {
                let shifted = shift(index, key.shift_at(position));
                position += 1;
                ALPHABET[shifted] as char
            }
            None => c,
        })
        .collect()
}

pub fn encrypt(plaintext: &str, key: &VigenereKey) -> String {
    let n = ALPHABET.len();
    apply(plaintext, key, |c, k| (c + k) % n)
}

pub fn decrypt(ciphertext: &str, key: &VigenereKey) -> String {
    let n = ALPHABET.len();
    apply(ciphertext, key, |c, k| (c + n - k) % n)
}
