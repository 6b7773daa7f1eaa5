//! Key-value persistence trait for small client-side settings.

use async_trait::async_trait;

use crate::result::AppResult;

/// Durable string key-value store.
///
/// Values are opaque strings, usually JSON. Implementations must make a
/// `set` visible to every later `get` on the same store.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key was never written.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}
