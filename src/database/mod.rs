pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryPostStore, MemoryStoreProvider};
pub use models::{NewPost, Post, PostChanges};
pub use postgres::PgPostStore;
pub use store::{PostStore, StoreClient, StoreProvider, UpdateOutcome};
