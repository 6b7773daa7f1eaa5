//! # edilhub-database
//!
//! The [`NotificationStore`] port and its implementations: a PostgreSQL
//! repository and an in-process store. Also provides the key-value
//! adapters behind the UI preference store.

pub mod connection;
pub mod kv;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use kv::{FileKeyValueStore, MemoryKeyValueStore};
pub use memory::MemoryNotificationStore;
pub use repositories::NotificationRepository;
pub use store::NotificationStore;
