//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid base URL provided.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// API version that cannot be sent as a header value.
    #[error("Invalid API version '{0}'")]
    InvalidVersion(String),

    /// An argument expected to hold JSON did not parse.
    #[error("Invalid JSON for {field}: {reason}")]
    InvalidJson {
        /// Name of the argument
        field: &'static str,
        /// Parser message
        reason: String,
    },

    /// An argument expected in `KEY=VALUE` form.
    #[error("Invalid {field} '{value}': expected 'KEY=VALUE'")]
    InvalidPair {
        /// Name of the argument
        field: &'static str,
        /// The invalid value provided
        value: String,
    },

    /// Invalid header format.
    #[error("Invalid header format '{value}': expected 'Key=Value' or 'Key: Value'")]
    InvalidHeader {
        /// The invalid header string
        value: String,
    },

    /// The command does not call the API (e.g. `init`).
    #[error("Command '{0}' does not call the API")]
    NotAnOperation(&'static str),
}

/// Well-known field names used in error messages.
pub mod field {
    /// `--attr` values.
    pub const ATTRIBUTE: &str = "attribute";
    /// `--query` of the request command.
    pub const QUERY: &str = "query";
    /// `--body` of the request command.
    pub const BODY: &str = "body";
    /// `--query` of the search command.
    pub const SEARCH_QUERY: &str = "search query";
}
