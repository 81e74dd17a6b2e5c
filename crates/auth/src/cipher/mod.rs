//! The three classical ciphers behind the token segments.
//!
//! - header: [`group_substitution`]
//! - payload: [`vigenere`]
//! - signature: [`transposition`]
//!
//! All functions are total: unsupported input degrades (passes through or
//! falls back) instead of failing.

pub mod group_substitution;
pub mod transposition;
pub mod vigenere;

pub use transposition::ColumnKey;
pub use vigenere::VigenereKey;
