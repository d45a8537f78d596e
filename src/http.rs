//! HTTP client for the public trivia, word and dictionary APIs.
//!
//! This module provides a wrapper around `reqwest::Client` that adds:
//! * Consistent timeouts and headers
//! * Status checking, so that error pages are not rendered as content
//! * Request logging
//!
//! Requests are never retried: callers substitute a fixed message on error.

use std::time::Duration;

use reqwest::{
    header::{HeaderValue, ACCEPT_LANGUAGE},
    Method, Url,
};
use serde::de::DeserializeOwned;

use crate::{config::Config, error::Result};

/// HTTP client with consistent configuration for all outbound calls.
#[derive(Clone, Debug)]
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    /// Duration to keep idle connections alive.
    ///
    /// Prevents frequent reconnection overhead for subsequent requests.
    const KEEPALIVE_TIMEOUT: Duration = Duration::from_secs(60);

    /// Duration to wait for individual network reads.
    const READ_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created, for example when
    /// no TLS backend could be initialized.
    pub fn new(config: &Config) -> Result<Self> {
        // Not having `Accept-Language` set is non-fatal.
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(lang) = HeaderValue::from_str(&config.app_lang) {
            headers.insert(ACCEPT_LANGUAGE, lang);
        }

        let inner = reqwest::Client::builder()
            .tcp_keepalive(Self::KEEPALIVE_TIMEOUT)
            .read_timeout(Self::READ_TIMEOUT)
            .timeout(config.request_timeout)
            .default_headers(headers)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { inner })
    }

    /// Builds a GET request.
    pub fn get(&self, url: Url) -> reqwest::Request {
        reqwest::Request::new(Method::GET, url)
    }

    /// Executes a request and fails on non-success status codes.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// * A network error occurs
    /// * The request times out
    /// * The server answers with a 4xx or 5xx status
    pub async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        debug!("{} {}", request.method(), request.url());

        let response = self.inner.execute(request).await?;
        trace!("{} {}", response.status(), response.url());

        response.error_for_status().map_err(Into::into)
    }

    /// Fetches `url` and returns its body as text.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute); additionally fails if the body cannot
    /// be read.
    pub async fn text(&self, url: Url) -> Result<String> {
        let response = self.execute(self.get(url)).await?;
        let body = response.text().await?;
        trace!("{body}");
        Ok(body)
    }

    /// Fetches `url` and parses its body as JSON.
    ///
    /// # Errors
    ///
    /// See [`text`](Self::text); additionally fails if the body is not JSON
    /// of type `T`.
    pub async fn json<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.text(url).await?;
        serde_json::from_str(&body).map_err(Into::into)
    }
}
