//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the binary. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use http::HeaderValue;
use serde_json::Value;
use url::Url;

use crate::api::RequestOptions;
use crate::contact::{ContactFields, DateInput};

use super::cli::{Cli, Command, ContactArgs, RequestArgs};
use super::defaults;
use super::error::{ConfigError, field};
use super::settings::ConfigureOptions;
use super::toml::TomlConfig;

/// The API call selected on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// `GET /me` smoke test
    SelfTest,
    /// `POST /contacts`
    CreateContact(ContactFields),
    /// `PUT /contacts/{id}`
    UpdateContact {
        /// Contact id
        id: String,
        /// Fields to change
        fields: ContactFields,
    },
    /// `POST /contacts/search`
    Search(Value),
    /// Arbitrary request
    Request(RequestOptions),
}

impl Operation {
    /// Short name used in log lines.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SelfTest => "self-test",
            Self::CreateContact(_) => "create-contact",
            Self::UpdateContact { .. } => "update-contact",
            Self::Search(_) => "search",
            Self::Request(_) => "request",
        }
    }
}

/// Fully validated configuration ready for use by the binary.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Settings to apply to the client before the call
    pub settings: ConfigureOptions,

    /// The API call to make
    pub operation: Operation,

    /// Config file that was loaded, if any
    pub config_file: Option<PathBuf>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config_file = self
            .config_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());
        let token = if self.settings.access_token.is_some() {
            "set"
        } else {
            "unset"
        };

        write!(
            f,
            "Config {{ operation: {}, base_url: {}, version: {}, token: {}, config_file: {} }}",
            self.operation.name(),
            self.settings.base_url.as_deref().unwrap_or("default"),
            self.settings.version.as_deref().unwrap_or("default"),
            token,
            config_file,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The command is `init`
    /// - The base URL is invalid
    /// - The version cannot be sent as a header
    /// - A JSON or `KEY=VALUE` argument is malformed
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let settings = Self::resolve_settings(cli, toml)?;
        let operation = Self::resolve_operation(&cli.command)?;
        let verbose = cli.verbose || toml.is_some_and(|t| t.log.verbose);

        Ok(Self {
            settings,
            operation,
            config_file: None,
            verbose,
        })
    }

    /// Loads and merges configuration from CLI and the config file.
    ///
    /// Reads `cli.config` if set, otherwise the default config path when
    /// that file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::config_path().filter(|p| p.is_file()));

        let toml = match &path {
            Some(path) => Some(TomlConfig::load(path)?),
            None => None,
        };

        let mut config = Self::from_raw(cli, toml.as_ref())?;
        config.config_file = path;
        Ok(config)
    }

    fn resolve_settings(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<ConfigureOptions, ConfigError> {
        let section = toml.map(|t| &t.intercom);

        // Priority: CLI explicit > TOML
        let access_token = cli
            .token
            .clone()
            .or_else(|| section.and_then(|s| s.access_token.clone()));
        let base_url = cli
            .base_url
            .clone()
            .or_else(|| section.and_then(|s| s.base_url.clone()));
        let version = cli
            .api_version
            .clone()
            .or_else(|| section.and_then(|s| s.version.clone()));

        if let Some(url) = base_url.as_deref().filter(|u| !u.is_empty()) {
            Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        }
        if let Some(version) = version.as_deref() {
            HeaderValue::from_str(version.trim())
                .map_err(|_| ConfigError::InvalidVersion(version.to_string()))?;
        }

        Ok(ConfigureOptions {
            access_token,
            base_url,
            version,
        })
    }

    fn resolve_operation(command: &Command) -> Result<Operation, ConfigError> {
        match command {
            Command::Init { .. } => Err(ConfigError::NotAnOperation("init")),
            Command::SelfTest => Ok(Operation::SelfTest),
            Command::CreateContact(args) => Ok(Operation::CreateContact(contact_fields(args)?)),
            Command::UpdateContact { id, contact } => Ok(Operation::UpdateContact {
                id: id.clone(),
                fields: contact_fields(contact)?,
            }),
            Command::Search { query } => Ok(Operation::Search(parse_json(
                field::SEARCH_QUERY,
                query,
            )?)),
            Command::Request(args) => Ok(Operation::Request(request_options(args)?)),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn contact_fields(args: &ContactArgs) -> Result<ContactFields, ConfigError> {
    let mut fields = ContactFields {
        email: args.email.clone(),
        phone: args.phone.clone(),
        name: args.name.clone(),
        external_id: args.external_id.clone(),
        owner_id: args.owner_id.clone(),
        custom_attributes: None,
        signed_up_at: args.signed_up_at.as_deref().map(parse_date_input),
        last_seen_at: args.last_seen_at.as_deref().map(parse_date_input),
    };

    for attribute in &args.attributes {
        let (key, value) = parse_pair(field::ATTRIBUTE, attribute)?;
        fields = fields.with_attribute(key, parse_attribute_value(&value));
    }

    Ok(fields)
}

fn request_options(args: &RequestArgs) -> Result<RequestOptions, ConfigError> {
    let mut options = RequestOptions::new(args.path.clone()).with_debug(args.debug);
    options.method.clone_from(&args.method);

    for param in &args.query {
        let (name, value) = parse_pair(field::QUERY, param)?;
        options = options.with_query_param(name, value);
    }

    if let Some(body) = &args.body {
        options = options.with_body(parse_json(field::BODY, body)?);
    }

    for header in &args.headers {
        let (name, value) = parse_header_string(header)?;
        options = options.with_header(name, value);
    }

    Ok(options)
}

/// Numbers are epoch seconds; anything else is parsed as a date later.
fn parse_date_input(s: &str) -> DateInput {
    s.trim()
        .parse::<f64>()
        .map_or_else(|_| DateInput::Text(s.to_string()), DateInput::Seconds)
}

/// JSON values are taken as-is; anything else becomes a string.
fn parse_attribute_value(s: &str) -> Value {
    serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string()))
}

fn parse_json(field: &'static str, s: &str) -> Result<Value, ConfigError> {
    serde_json::from_str(s).map_err(|e| ConfigError::InvalidJson {
        field,
        reason: e.to_string(),
    })
}

fn parse_pair(field: &'static str, s: &str) -> Result<(String, String), ConfigError> {
    s.split_once('=')
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| ConfigError::InvalidPair {
            field,
            value: s.to_string(),
        })
}

/// Splits at the first `=` or `:`, so values may contain the other separator.
fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    let (name, value) = s
        .find(['=', ':'])
        .map(|at| (&s[..at], &s[at + 1..]))
        .ok_or_else(|| ConfigError::InvalidHeader {
            value: s.to_string(),
        })?;

    Ok((name.trim().to_string(), value.trim().to_string()))
}
