//! HTTP client for the taskdeck backend auth endpoints.
//!
//! Every call resolves to either an [`ApiResponse`] (a status was received, ok
//! or not) or an [`ApiError`] (no usable response at all).

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::{Config, Endpoints};
use crate::forms::{LoginInput, RegisterInput};

/// Failure to obtain a usable response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed response body: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(err)
        }
    }
}

/// A received HTTP response with its JSON body, if it had one.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Parsed JSON body; `None` when empty or not JSON.
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Returns true for a 2xx status.
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// Returns a top-level string field of the body.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.body.as_ref()?.get(name)?.as_str()
    }

    /// Deserializes the body into `T`.
    ///
    /// # Errors
    /// Returns [`ApiError::Malformed`] when the body is missing or doesn't match `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let body = self
            .body
            .clone()
            .ok_or_else(|| ApiError::Malformed("empty or non-JSON body".to_string()))?;
        serde_json::from_value(body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

/// Backend API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl ApiClient {
    /// Creates a client for the given endpoints.
    ///
    /// A `timeout` of `None` lets requests wait indefinitely.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { http, endpoints })
    }

    /// Creates a client from configuration (endpoints + timeout).
    ///
    /// # Errors
    /// Returns an error if an endpoint is invalid or the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api.endpoints()?, config.request_timeout())
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// POSTs `{email, password}` to the login endpoint.
    ///
    /// # Errors
    /// Returns an error if no response could be obtained.
    pub async fn login(&self, input: &LoginInput) -> Result<ApiResponse, ApiError> {
        self.post(&self.endpoints.login, Some(input), None).await
    }

    /// POSTs `{username, email, password}` to the registration endpoint.
    ///
    /// # Errors
    /// Returns an error if no response could be obtained.
    pub async fn register(&self, input: &RegisterInput) -> Result<ApiResponse, ApiError> {
        self.post(&self.endpoints.register, Some(input), None).await
    }

    /// POSTs to the logout endpoint with the access token as bearer credential.
    ///
    /// # Errors
    /// Returns an error if no response could be obtained.
    pub async fn logout(&self, access_token: &str) -> Result<ApiResponse, ApiError> {
        self.post::<()>(&self.endpoints.logout, None, Some(access_token))
            .await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        url: &Url,
        body: Option<&B>,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let mut request = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%url, "sending request");
        let response = request.send().await.map_err(|err| {
            tracing::warn!(%url, error = %err, "request failed");
            ApiError::from(err)
        })?;

        let status = response.status();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };
        tracing::debug!(%url, %status, has_body = body.is_some(), "response received");

        Ok(ApiResponse { status, body })
    }
}
