//! `tierpass-core`: domain primitives shared by the token, store and API crates.
//!
//! This crate contains **pure domain** types (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod tier;

pub use error::DomainError;
pub use id::UserId;
pub use tier::Tier;
