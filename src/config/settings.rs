//! Stored client settings and credential resolution.
//!
//! Every value the request executor needs is resolved with the following
//! priority (highest to lowest):
//!
//! 1. **Call-time override** (token only)
//! 2. **Stored settings** - values applied through [`Settings::configure`]
//! 3. **Environment store** - see [`Environment`]
//! 4. **Built-in defaults** (base URL and version only)
//!
//! Empty strings count as absent at every level.

use super::defaults::{self, env_key};
use super::env::Environment;

/// Partial settings update.
///
/// Absent or empty fields leave the stored value untouched, so an
/// all-default value is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigureOptions {
    /// Access token
    pub access_token: Option<String>,
    /// API base URL
    pub base_url: Option<String>,
    /// Value of the `Intercom-Version` header
    pub version: Option<String>,
}

impl ConfigureOptions {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Returns true if applying this update would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.access_token, &self.base_url, &self.version]
            .iter()
            .all(|v| non_empty(v.as_deref()).is_none())
    }
}

/// Settings stored by the client, all absent until configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    access_token: Option<String>,
    base_url: Option<String>,
    version: Option<String>,
}

impl Settings {
    /// Creates settings with every field absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a partial update into the stored settings.
    ///
    /// Tokens and versions are trimmed; one trailing slash is stripped from
    /// the base URL. Absent or empty incoming values never reset a stored one.
    pub fn configure(&mut self, options: &ConfigureOptions) {
        if let Some(token) = non_empty(options.access_token.as_deref()) {
            self.access_token = Some(token.trim().to_string());
        }
        if let Some(url) = non_empty(options.base_url.as_deref()) {
            self.base_url = Some(strip_trailing_slash(url).to_string());
        }
        if let Some(version) = non_empty(options.version.as_deref()) {
            self.version = Some(version.trim().to_string());
        }
    }

    /// Stored access token.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Stored base URL.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Stored API version.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Resolves the effective access token.
    ///
    /// Order: trimmed `override_token`, stored token, environment
    /// `intercom.accessToken`, environment `intercom.token`.
    #[must_use]
    pub fn resolve_token<E: Environment>(
        &self,
        override_token: Option<&str>,
        env: &E,
    ) -> Option<String> {
        if let Some(token) = non_empty(override_token.map(str::trim)) {
            return Some(token.to_string());
        }
        if let Some(token) = non_empty(self.access_token()) {
            return Some(token.to_string());
        }
        [env_key::ACCESS_TOKEN, env_key::TOKEN]
            .into_iter()
            .find_map(|key| env.lookup(key).filter(|v| !v.is_empty()))
    }

    /// Resolves the effective base URL, without a trailing slash.
    #[must_use]
    pub fn resolve_base_url<E: Environment>(&self, env: &E) -> String {
        let url = non_empty(self.base_url()).map_or_else(
            || {
                env.lookup(env_key::BASE_URL)
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| defaults::BASE_URL.to_string())
            },
            ToString::to_string,
        );
        strip_trailing_slash(&url).to_string()
    }

    /// Resolves the effective `Intercom-Version` header value.
    #[must_use]
    pub fn resolve_version<E: Environment>(&self, env: &E) -> String {
        non_empty(self.version()).map_or_else(
            || {
                env.lookup(env_key::VERSION)
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| defaults::VERSION.to_string())
            },
            ToString::to_string,
        )
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}
