//! HTTP transport layer.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The transport abstraction ([`HttpClient`])
//! - The production transport backed by reqwest ([`ReqwestClient`])
//!
//! The transport performs exactly one round trip per call. It does not
//! retry, and it does not interpret status codes; classification happens
//! in [`crate::api`].

mod client;
mod error;
mod http;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
