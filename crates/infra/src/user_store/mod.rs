mod in_memory;
mod json_file;
mod r#trait;

pub use in_memory::InMemoryUserStore;
pub use json_file::JsonFileUserStore;
pub use r#trait::{NewUser, StoreError, UserRecord, UserStore, UserUpdate};
