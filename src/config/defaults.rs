//! Default values and well-known keys.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Default API endpoint.
pub const BASE_URL: &str = "https://api.intercom.io";

/// Default value of the `Intercom-Version` header.
pub const VERSION: &str = "2.9";

/// Name of the protocol-version request header (lowercase, as `http` stores it).
pub const VERSION_HEADER: &str = "intercom-version";

/// Default config file name, looked up under the user config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Application directory under the user config directory.
pub const CONFIG_DIR: &str = "intercom-lite";

/// Environment store keys.
pub mod env_key {
    /// Primary access token key.
    pub const ACCESS_TOKEN: &str = "intercom.accessToken";
    /// Fallback access token key.
    pub const TOKEN: &str = "intercom.token";
    /// Base URL key.
    pub const BASE_URL: &str = "intercom.baseUrl";
    /// API version key.
    pub const VERSION: &str = "intercom.version";
}

/// Returns the default config file path (`<config_dir>/intercom-lite/config.toml`).
///
/// `None` when the platform has no user config directory.
#[must_use]
pub fn config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}
