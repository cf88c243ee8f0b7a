use crate::config::ResolvedConfig;
use crate::error::{CliError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;

/// Sent as `X-USER-TOKEN`; header names are case-insensitive on the wire.
pub const USER_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-user-token");

/// A fully formed request, ready for [`crate::client::PixelaClient::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Build a request that carries no user token.
    pub fn unauthenticated<P: Serialize>(
        config: &ResolvedConfig,
        method: Method,
        path: &str,
        params: Option<&P>,
    ) -> Result<Self> {
        let body = params.map(serde_json::to_vec).transpose()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(ApiRequest {
            method,
            url: config.url(path),
            headers,
            body,
        })
    }

    /// Build a request authenticated with the configured user token.
    pub fn authenticated<P: Serialize>(
        config: &ResolvedConfig,
        method: Method,
        path: &str,
        params: Option<&P>,
    ) -> Result<Self> {
        let mut req = Self::unauthenticated(config, method, path, params)?;
        let token = config.require_token()?;
        let value = HeaderValue::from_str(token).map_err(|e| {
            CliError::InvalidInput(format!("token is not a valid header value: {e}"))
        })?;
        req.headers.insert(USER_TOKEN_HEADER, value);
        Ok(req)
    }

    #[cfg(test)]
    pub fn token(&self) -> Option<&str> {
        self.headers
            .get(&USER_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
    }

    pub fn body_str(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|b| std::str::from_utf8(b).ok())
    }
}

/// Stand-in parameter type for requests without a body.
#[derive(Serialize)]
pub struct NoBody;

/// Append `key=value` to a query string being built, `?` first then `&`.
pub fn push_query(url: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        let sep = if url.contains('?') { '&' } else { '?' };
        url.push(sep);
        url.push_str(key);
        url.push('=');
        url.push_str(value);
    }
}
