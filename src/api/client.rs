//! The Intercom client: stored settings plus one round trip per call.

use std::fmt;

use super::request::{self, RequestOptions};
use super::{ApiResult, SelfTestError};
use crate::config::{ConfigureOptions, Environment, ProcessEnvironment, Settings};
use crate::transport::{HttpClient, HttpError};

/// Reason reported when the smoke test has no credential to use.
const SKIP_MISSING_TOKEN: &str = "missing accessToken";

/// Outcome of a successful [`Intercom::self_test`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfTest {
    /// `GET /me` succeeded.
    Ok,
    /// The test was not run.
    Skipped(&'static str),
}

impl fmt::Display for SelfTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Skipped(reason) => write!(f, "skipped: {reason}"),
        }
    }
}

/// Client for the Intercom REST API.
///
/// Owns the stored [`Settings`], the transport and the environment store.
/// Settings start empty and change only through [`Intercom::configure`];
/// every call reads them to resolve token, base URL and version.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `E`: The environment store (defaults to [`ProcessEnvironment`])
///
/// # Example
///
/// ```no_run
/// use intercom_lite::api::{Intercom, RequestOptions};
/// use intercom_lite::config::ConfigureOptions;
/// use intercom_lite::transport::ReqwestClient;
///
/// # async fn example() -> Result<(), intercom_lite::transport::HttpError> {
/// let mut intercom = Intercom::new(ReqwestClient::new());
/// intercom.configure(&ConfigureOptions::new().with_access_token("secret"));
///
/// let result = intercom.request(RequestOptions::new("/me")).await?;
/// if result.is_ok() {
///     println!("{:?}", result.data());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Intercom<H, E = ProcessEnvironment> {
    client: H,
    env: E,
    settings: Settings,
}

impl<H> Intercom<H, ProcessEnvironment> {
    /// Creates a client reading fallbacks from the process environment.
    #[must_use]
    pub fn new(client: H) -> Self {
        Self {
            client,
            env: ProcessEnvironment,
            settings: Settings::new(),
        }
    }
}

impl<H, E> Intercom<H, E> {
    /// Replaces the environment store.
    #[must_use]
    pub fn with_environment<E2>(self, env: E2) -> Intercom<H, E2> {
        Intercom {
            client: self.client,
            env,
            settings: self.settings,
        }
    }

    /// Merges a partial settings update; see [`Settings::configure`].
    pub fn configure(&mut self, options: &ConfigureOptions) {
        self.settings.configure(options);
    }

    /// Returns the stored settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the transport.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }
}

impl<H: HttpClient, E: Environment> Intercom<H, E> {
    /// Issues a single API call and classifies the response.
    ///
    /// Local validation failures return a failure result without touching
    /// the network.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the transport fails to produce a response.
    /// Non-2xx statuses are not errors; they yield [`ApiResult::Failure`].
    pub async fn request(&self, options: RequestOptions) -> Result<ApiResult, HttpError> {
        let prepared = match request::prepare(&options, &self.settings, &self.env) {
            Ok(prepared) => prepared,
            Err(e) => return Ok(ApiResult::rejected(&e)),
        };

        if options.debug {
            tracing::debug!(
                method = %prepared.request.method,
                path = %prepared.path,
                "request"
            );
        }

        let response = self.client.request(prepared.request).await?;
        Ok(ApiResult::from_response(&response, &prepared.path))
    }

    /// Checks connectivity with `GET /me`.
    ///
    /// Skips (without failing) when no token can be resolved.
    ///
    /// # Errors
    ///
    /// Unlike the other operations, a failure result is an error here:
    /// [`SelfTestError::Failed`] for a non-success result and
    /// [`SelfTestError::Transport`] when no response was received.
    pub async fn self_test(&self) -> Result<SelfTest, SelfTestError> {
        if self.settings.resolve_token(None, &self.env).is_none() {
            return Ok(SelfTest::Skipped(SKIP_MISSING_TOKEN));
        }

        let result = self
            .request(RequestOptions::new("/me").with_method("GET"))
            .await?;

        match result {
            ApiResult::Success { .. } => Ok(SelfTest::Ok),
            ApiResult::Failure { error, status, .. } => {
                Err(SelfTestError::Failed { status, error })
            }
        }
    }
}
