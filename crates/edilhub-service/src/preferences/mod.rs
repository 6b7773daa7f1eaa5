//! UI configuration store.

pub mod store;

pub use store::PreferenceStore;
