//! HTTP-level integration tests over the in-memory stores.

mod assistant_test;
mod helpers;
mod notification_test;
mod preferences_test;
