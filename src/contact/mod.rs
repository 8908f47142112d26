//! Contact payloads for the Intercom contacts API.
//!
//! This module provides:
//! - Caller-side contact fields ([`ContactFields`])
//! - The wire payload built from them ([`ContactPayload`])
//! - Date coercion to epoch seconds ([`DateInput`], [`to_epoch_seconds`])

mod payload;
mod timestamp;


pub use payload::{ContactFields, ContactPayload};
pub use timestamp::{DateInput, to_epoch_seconds};
