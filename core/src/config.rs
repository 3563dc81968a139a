//! Connection settings for one Pipedrive tenant.
//!
//! A `ClientConfig` is built once and never changes: the base URL and the
//! `api_token=...` query fragment are computed at construction and reused by
//! every request.

use std::fmt;

use crate::error::ApiError;
use crate::http::REDACTED;

/// A Pipedrive API token. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: &str) -> Result<Self, ApiError> {
        if token.is_empty() {
            return Err(ApiError::Config("API token is empty".to_string()));
        }
        // The token goes into the query string verbatim.
        if let Some(pos) = token
            .chars()
            .position(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        {
            return Err(ApiError::Config(format!(
                "API token has a character outside [A-Za-z0-9_-] at position {pos}"
            )));
        }
        Ok(Self(token.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken({REDACTED})")
    }
}

#[derive(Clone)]
pub struct ClientConfig {
    company_domain: Option<String>,
    base_url: String,
    token: ApiToken,
    token_query: String,
}

impl ClientConfig {
    /// Settings for `https://{company_domain}.pipedrive.com/api/v1/`.
    ///
    /// The domain must be a single DNS label: ASCII letters, digits and `-`,
    /// not starting or ending with `-`.
    pub fn new(company_domain: &str, api_token: &str) -> Result<Self, ApiError> {
        validate_domain(company_domain)?;
        let base_url = format!("https://{company_domain}.pipedrive.com/api/v1/");
        let mut config = Self::with_base_url(&base_url, api_token)?;
        config.company_domain = Some(company_domain.to_string());
        Ok(config)
    }

    /// Settings for an arbitrary base URL, e.g. a local mock or a proxy.
    /// A trailing `/` is added when missing.
    pub fn with_base_url(base_url: &str, api_token: &str) -> Result<Self, ApiError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "base URL must start with http:// or https://: {base_url}"
            )));
        }
        let token = ApiToken::new(api_token)?;
        let base_url = format!("{}/", base_url.trim_end_matches('/'));
        let token_query = format!("api_token={}", token.expose());
        Ok(Self {
            company_domain: None,
            base_url,
            token,
            token_query,
        })
    }

    /// The tenant subdomain, when built with [`ClientConfig::new`].
    pub fn company_domain(&self) -> Option<&str> {
        self.company_domain.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &ApiToken {
        &self.token
    }

    /// `api_token={token}`, ready to append to a query string.
    pub(crate) fn token_query(&self) -> &str {
        &self.token_query
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("company_domain", &self.company_domain)
            .field("base_url", &self.base_url)
            .field("token", &self.token)
            .finish()
    }
}

fn validate_domain(domain: &str) -> Result<(), ApiError> {
    if domain.is_empty() {
        return Err(ApiError::Config("company domain is empty".to_string()));
    }
    let valid_chars = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid_chars || domain.starts_with('-') || domain.ends_with('-') {
        return Err(ApiError::Config(format!(
            "company domain is not a valid subdomain: {domain}"
        )));
    }
    Ok(())
}
