//! Request execution against the Intercom REST API.
//!
//! This module provides:
//! - The client ([`Intercom`]) owning stored settings, transport and environment
//! - Generic request options ([`RequestOptions`])
//! - The uniform result of every network-issuing call ([`ApiResult`])
//! - Contact operations (`create_contact`, `update_contact`, `search_contacts`)
//! - A connectivity smoke test ([`SelfTest`])
//!
//! # Failure model
//!
//! Local validation failures and non-2xx responses are values
//! ([`ApiResult::Failure`]). Transport failures are `Err(HttpError)` and are
//! passed through untouched. [`Intercom::self_test`] is the one exception:
//! it turns a failure result into [`SelfTestError::Failed`].

mod client;
mod contacts;
mod error;
mod outcome;
mod request;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod test_fixtures;

pub use client::{Intercom, SelfTest};
pub use error::{RequestError, SelfTestError};
pub use outcome::ApiResult;
pub use request::{RequestOptions, bearer};
