//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// intercom-lite: minimal Intercom contacts client
///
/// Issues one Intercom API call per invocation and prints the
/// result as JSON.
#[derive(Debug, Parser)]
#[command(name = "intercom-lite")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Access token (overrides config file and environment)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Value of the Intercom-Version header
    #[arg(long = "api-version", global = true)]
    pub api_version: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for intercom-lite
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "intercom-lite.toml")]
        output: PathBuf,
    },

    /// Check connectivity with GET /me
    SelfTest,

    /// Create a contact (requires --email, --phone or --external-id)
    CreateContact(ContactArgs),

    /// Update a contact by id
    UpdateContact {
        /// Contact id
        #[arg(long)]
        id: String,

        #[command(flatten)]
        contact: ContactArgs,
    },

    /// Search contacts with a JSON filter object
    Search {
        /// Filter, e.g. '{"field":"email","operator":"=","value":"a@b.com"}'
        #[arg(long)]
        query: String,
    },

    /// Issue an arbitrary API request
    Request(RequestArgs),
}

/// Contact fields shared by create and update.
#[derive(Debug, Clone, Default, Args)]
pub struct ContactArgs {
    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Identifier in your own system
    #[arg(long = "external-id")]
    pub external_id: Option<String>,

    /// Owning admin id
    #[arg(long = "owner-id")]
    pub owner_id: Option<String>,

    /// Sign-up date: epoch seconds or a date string
    #[arg(long = "signed-up-at")]
    pub signed_up_at: Option<String>,

    /// Last-seen date: epoch seconds or a date string
    #[arg(long = "last-seen-at")]
    pub last_seen_at: Option<String>,

    /// Custom attribute as KEY=VALUE; JSON values are parsed (can be specified multiple times)
    #[arg(long = "attr", value_name = "K=V")]
    pub attributes: Vec<String>,
}

/// Arguments of the generic request command.
#[derive(Debug, Clone, Default, Args)]
pub struct RequestArgs {
    /// Path relative to the base URL
    #[arg(long)]
    pub path: String,

    /// HTTP method (default: POST with a body, GET without)
    #[arg(long)]
    pub method: Option<String>,

    /// Query parameter as KEY=VALUE (can be specified multiple times)
    #[arg(long = "query", value_name = "K=V")]
    pub query: Vec<String>,

    /// JSON request body
    #[arg(long)]
    pub body: Option<String>,

    /// HTTP header in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V")]
    pub headers: Vec<String>,

    /// Log method and path of the request at debug level
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
