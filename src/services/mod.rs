// Service exports
pub mod memory;
pub mod password;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use password::{PasswordError, PasswordHasher};
pub use postgres::PostgresClient;
pub use store::{StoreError, UserStore};
