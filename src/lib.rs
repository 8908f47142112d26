//! intercom-lite: a minimal Intercom contacts API helper.
//!
//! Resolves credentials, builds requests, and maps every response to a
//! uniform [`api::ApiResult`]. One HTTP call per operation; no retries.

pub mod api;
pub mod config;
pub mod contact;
pub mod transport;
