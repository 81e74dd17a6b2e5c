//! Infrastructure layer: user persistence and credential hashing.

pub mod password;
pub mod user_store;

pub use user_store::{
    InMemoryUserStore, JsonFileUserStore, NewUser, StoreError, UserRecord, UserStore, UserUpdate,
};
