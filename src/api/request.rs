//! Generic request options and HTTP request assembly.

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::Method;
use serde_json::Value;
use url::Url;

use super::RequestError;
use crate::config::defaults;
use crate::config::{Environment, Settings};
use crate::transport::HttpRequest;

const APPLICATION_JSON: &str = "application/json";

/// Arguments of a single API call.
///
/// Only `path` is required. A body, when present, is sent as JSON; an
/// empty object still counts as a body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Path relative to the base URL; a leading `/` is added if missing
    pub path: String,
    /// Explicit HTTP method; inferred from the body when absent
    pub method: Option<String>,
    /// Query parameters; an empty list adds nothing to the URL
    pub query: Option<Vec<(String, String)>>,
    /// JSON request body
    pub body: Option<Value>,
    /// Token override, taking precedence over settings and environment
    pub token: Option<String>,
    /// Extra headers; `None` values are skipped, others replace computed headers
    pub headers: Vec<(String, Option<String>)>,
    /// Emit a debug event with method and path
    pub debug: bool,
}

impl RequestOptions {
    /// Creates options for the given path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets or clears the token override.
    #[must_use]
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token.map(ToString::to_string);
        self
    }

    /// Adds a caller header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), Some(value.into())));
        self
    }

    /// Adds a caller header whose value may be absent.
    #[must_use]
    pub fn with_optional_header(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.headers.push((name.into(), value));
        self
    }

    /// Enables or disables the debug event.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// An assembled request plus the normalized path used for logging.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    pub request: HttpRequest,
    pub path: String,
}

/// Builds the `Authorization: Bearer` header value.
///
/// Returns `None` when the token cannot be carried in a header.
#[must_use]
pub fn bearer(token: &str) -> Option<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}")).ok()?;
    value.set_sensitive(true);
    Some(value)
}

/// Turns options into an HTTP request, or rejects them locally.
///
/// The token is checked before anything else so a missing credential is
/// reported even when the path is invalid too.
pub(crate) fn prepare<E: Environment>(
    options: &RequestOptions,
    settings: &Settings,
    env: &E,
) -> Result<PreparedRequest, RequestError> {
    let token = settings
        .resolve_token(options.token.as_deref(), env)
        .ok_or(RequestError::MissingToken)?;
    let path = normalize_path(&options.path).ok_or(RequestError::MissingPath)?;

    let url = compose_url(
        &settings.resolve_base_url(env),
        &path,
        options.query.as_deref(),
    )?;
    let method = resolve_method(options.method.as_deref(), options.has_body())?;
    let headers = build_headers(
        &token,
        &settings.resolve_version(env),
        &options.headers,
        options.has_body(),
    )?;

    let mut request = HttpRequest::new(method, url);
    request.headers = headers;
    if let Some(body) = &options.body {
        let bytes =
            serde_json::to_vec(body).map_err(|e| RequestError::InvalidBody(e.to_string()))?;
        request.body = Some(bytes);
    }

    Ok(PreparedRequest { request, path })
}

/// Trims the path and makes it start with exactly one `/`.
///
/// Returns `None` for an empty path.
pub(crate) fn normalize_path(path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    Some(format!("/{}", path.trim_start_matches('/')))
}

/// Appends the encoded query to `base + path`.
///
/// The separator is `&` when the path already carries a query string.
pub(crate) fn compose_url(
    base_url: &str,
    path: &str,
    query: Option<&[(String, String)]>,
) -> Result<Url, RequestError> {
    let mut url = format!("{base_url}{path}");

    if let Some(query) = query {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query)
            .finish();
        if !encoded.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&encoded);
        }
    }

    Url::parse(&url).map_err(|e| RequestError::InvalidUrl {
        url,
        reason: e.to_string(),
    })
}

/// Explicit method (uppercased), else `POST` with a body and `GET` without.
pub(crate) fn resolve_method(method: Option<&str>, has_body: bool) -> Result<Method, RequestError> {
    match method.map(str::trim).filter(|m| !m.is_empty()) {
        Some(explicit) => explicit
            .to_uppercase()
            .parse::<Method>()
            .map_err(|_| RequestError::InvalidMethod(explicit.to_string())),
        None if has_body => Ok(Method::POST),
        None => Ok(Method::GET),
    }
}

/// Computes default headers and overlays the caller's.
pub(crate) fn build_headers(
    token: &str,
    version: &str,
    extra: &[(String, Option<String>)],
    has_body: bool,
) -> Result<HeaderMap, RequestError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

    if !version.is_empty() {
        headers.insert(
            HeaderName::from_static(defaults::VERSION_HEADER),
            parse_header_value(defaults::VERSION_HEADER, version)?,
        );
    }
    if let Some(authorization) = bearer(token) {
        headers.insert(AUTHORIZATION, authorization);
    }
    if has_body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    }

    for (name, value) in extra {
        let Some(value) = value else {
            continue;
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| RequestError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        headers.insert(header_name, parse_header_value(name, value)?);
    }

    Ok(headers)
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, RequestError> {
    HeaderValue::from_str(value).map_err(|e| RequestError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
