//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API credentials and endpoint
    #[serde(default)]
    pub intercom: IntercomSection,

    /// Logging configuration
    #[serde(default)]
    pub log: LogSection,
}

/// API credentials and endpoint section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntercomSection {
    /// Access token
    pub access_token: Option<String>,

    /// API base URL (default: `https://api.intercom.io`)
    pub base_url: Option<String>,

    /// `Intercom-Version` header value (default: 2.9)
    pub version: Option<String>,
}

/// Logging configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// Enable debug-level logging
    #[serde(default)]
    pub verbose: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# intercom-lite configuration file
#
# Resolution order for each value:
#   CLI flag > this file > environment variable > built-in default

[intercom]
# Access token. Falls back to INTERCOM_ACCESS_TOKEN, then INTERCOM_TOKEN.
# access_token = "your-token-here"

# API base URL (default: https://api.intercom.io). Falls back to INTERCOM_BASE_URL.
# base_url = "https://api.eu.intercom.io"

# Intercom-Version header (default: 2.9). Falls back to INTERCOM_VERSION.
# version = "2.9"

[log]
# Enable debug-level logging
# verbose = false
"#
    .to_string()
}
