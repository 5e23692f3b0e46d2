pub mod collections;
pub mod connection;
pub mod games;
pub mod models;
pub mod reviews;
pub mod setup;
pub mod store;

pub use connection::{DbConn, DbPool, create_pool, get_connection};
pub use models::*;
pub use store::SqliteStore;
