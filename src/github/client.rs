//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - A redirect-following client for pages and archives
//! - A redirect-less client for reading `Location` headers
//! - Status code mapping to NetworkError
//!
//! Requests are never retried; a failure surfaces to the caller for the
//! current reference only.

use crate::error::NetworkError;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("ccup/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    /// Client following redirects
    client: Client,
    /// Client returning redirects as-is
    no_redirect: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, NetworkError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, NetworkError> {
        let build = |policy: Policy| {
            Client::builder()
                .timeout(timeout)
                .user_agent(user_agent)
                .redirect(policy)
                .build()
                .map_err(|e| {
                    NetworkError::request(
                        "HTTP client",
                        format!("failed to create HTTP client: {}", e),
                    )
                })
        };

        Ok(Self {
            client: build(Policy::default())?,
            no_redirect: build(Policy::none())?,
        })
    }

    /// Perform a GET without following redirects and return the `Location` header
    pub async fn get_location(&self, url: &str) -> Result<Option<String>, NetworkError> {
        let response = self
            .no_redirect
            .get(url)
            .send()
            .await
            .map_err(|e| Self::send_error(url, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(NetworkError::not_found(url));
        }

        Ok(response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string))
    }

    /// Perform a GET and return the body as text
    pub async fn get_text(&self, url: &str) -> Result<String, NetworkError> {
        let response = self.get(url).await?;
        response
            .text()
            .await
            .map_err(|e| NetworkError::request(url, format!("failed to read body: {}", e)))
    }

    /// Perform a GET and return the body as text, or `None` on 404
    pub async fn get_text_optional(&self, url: &str) -> Result<Option<String>, NetworkError> {
        match self.get_text(url).await {
            Ok(text) => Ok(Some(text)),
            Err(NetworkError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Perform a GET and return the body as bytes
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, NetworkError> {
        let response = self.get(url).await?;
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| NetworkError::request(url, format!("failed to read body: {}", e)))
    }

    /// Perform a GET following redirects, mapping error statuses
    async fn get(&self, url: &str) -> Result<Response, NetworkError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::send_error(url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(NetworkError::not_found(url));
        }
        if !status.is_success() {
            return Err(NetworkError::status(url, status.as_u16()));
        }

        Ok(response)
    }

    fn send_error(url: &str, e: reqwest::Error) -> NetworkError {
        if e.is_timeout() {
            NetworkError::timeout(url)
        } else {
            NetworkError::request(url, e.to_string())
        }
    }
}
