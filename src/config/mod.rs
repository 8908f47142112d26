//! Configuration layer for intercom-lite.
//!
//! This module provides:
//! - Stored client settings and credential resolution ([`Settings`])
//! - The environment store fallback ([`Environment`])
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration for the binary ([`ValidatedConfig`])
//! - Default values and well-known keys ([`defaults`])
//!
//! # Priority
//!
//! Values reaching [`Settings`] are merged with the following priority
//! (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - `--token`, `--base-url`, `--api-version`
//! 2. **TOML config file** - the `[intercom]` section
//!
//! At request time the resolver then falls back to the environment store
//! and finally to the built-in defaults (base URL and version only).
//!
//! # Config File Location
//!
//! `--config` names the file explicitly; a missing explicit file is an
//! error. Without it, `<config_dir>/intercom-lite/config.toml` is read if
//! it exists.

mod cli;
pub mod defaults;
mod env;
mod error;
mod settings;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, ContactArgs, RequestArgs};
pub use env::{Environment, MapEnvironment, ProcessEnvironment, variable_name};
pub use error::ConfigError;
pub use settings::{ConfigureOptions, Settings};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{Operation, ValidatedConfig, write_default_config};
