//! Keyed columnar transposition (signature segment).
//!
//! Text is written row-major into a grid as wide as the key, short rows are
//! filled with [`PADDING`], and columns are read in ascending order of their
//! key digit.

use core::str::FromStr;

use crate::error::KeyError;

pub const PADDING: char = 'X';

pub const DEFAULT_KEY: &str = "34152";

/// Column key: one digit per grid column.
///
/// Equal digits are read left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnKey {
    digits: Vec<u8>,
}

impl ColumnKey {
    pub fn new(key: &str) -> Result<Self, KeyError> {
        if key.is_empty() {
            return Err(KeyError::EmptyColumnKey);
        }

        let digits = key
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or(KeyError::NonDigitColumnKey(c))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { digits })
    }

    pub fn columns(&self) -> usize {
        self.digits.len()
    }

    /// Column indices in reading order.
    fn read_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.digits.len()).collect();
        // `sort_by_key` is stable, which gives the left-to-right tie-break.
        order.sort_by_key(|&column| self.digits[column]);
        order
    }
}

impl Default for ColumnKey {
    fn default() -> Self {
        Self {
            digits: vec![3, 4, 1, 5, 2],
        }
    }
}

impl FromStr for ColumnKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

pub fn encrypt(plaintext: &str, key: &ColumnKey) -> String {
    let chars: Vec<char> = plaintext.chars().collect();
    let columns = key.columns();
    let rows = chars.len().div_ceil(columns);

    let mut out = String::with_capacity(rows * columns);
    for column in key.read_order() {
        for row in 0..rows {
            out.push(chars.get(row * columns + column).copied().unwrap_or(PADDING));
        }
    }
    out
}

/// Reverse [`encrypt`] and strip the trailing run of padding.
///
/// A plaintext that itself ends in `X` cannot be told apart from padding and
/// loses those characters.
pub fn decrypt(ciphertext: &str, key: &ColumnKey) -> String {
    let chars: Vec<char> = ciphertext.chars().collect();
    let columns = key.columns();
    let rows = chars.len().div_ceil(columns);

    let mut grid: Vec<Option<char>> = vec![None; rows * columns];
    let mut source = chars.into_iter();
    'fill: for column in key.read_order() {
        for row in 0..rows {
            let Some(c) = source.next() else {
                break 'fill;
            };
            grid[row * columns + column] = Some(c);
        }
    }

    let text: String = grid.into_iter().flatten().collect();
    text.trim_end_matches(PADDING).to_string()
}
