//! Core traits shared across crates.

pub mod persistence;

pub use persistence::KeyValueStore;
