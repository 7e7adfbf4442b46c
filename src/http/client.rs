//! # API client
//!
//! Thin wrapper over a `reqwest::Client` that knows the catalog base URL and the current
//! auth token. Endpoint paths are joined onto the base URL, so the base must be a
//! directory URL; a missing trailing slash is added.

use super::token::SessionToken;
use crate::framework::GatewayError;
use crate::model::QueryParams;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Shared HTTP access to the catalog backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: SessionToken,
}

impl ApiClient {
    /// Creates a client for `base_url`, sending `token` when it is set.
    pub fn new(
        base_url: &str,
        token: SessionToken,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::from_client(builder.build()?, base_url, token)?)
    }

    /// Creates a client from an existing [`reqwest::Client`].
    pub fn from_client(
        http: reqwest::Client,
        base_url: &str,
        token: SessionToken,
    ) -> Result<Self, url::ParseError> {
        let base = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        Ok(Self { http, base, token })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Resolves `path` (e.g. `"movie/7/"`) against the base URL and appends `params`.
    pub fn endpoint(&self, path: &str, params: &QueryParams) -> Result<Url, GatewayError> {
        let mut url = self.base.join(path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// Sends a request and decodes the JSON answer.
    pub async fn request<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.execute(method, url, body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Sends a request and returns the raw body of a successful answer.
    ///
    /// Non-2xx answers become [`GatewayError::Status`] carrying the body.
    #[instrument(level = "debug", skip_all, fields(%method, %url))]
    pub async fn execute<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<String, GatewayError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method, url);
        if let Some(token) = self.token.get() {
            request = request.header(AUTHORIZATION, format!("Token {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(%status, "Backend rejected request");
            return Err(GatewayError::Status { status, body: text });
        }
        debug!(%status, bytes = text.len(), "Backend answered");
        Ok(text)
    }
}
