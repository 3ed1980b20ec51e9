// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gateway backend client.
//!
//! [`AdminClient`] maps typed calls onto the backend REST API. Every
//! method performs exactly one HTTP round trip and returns the decoded
//! body or an [`ApiError`]; there is no retry, caching or batching.
//! Endpoint groups live in the submodules as separate `impl` blocks.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::config::{parse_base_url, ConsoleConfig};
use crate::error::{extract_detail, ApiError};

pub mod companies;
pub mod geo;
pub mod health;
pub mod payments;
pub mod wallets;

/// Header the payment endpoints use to resolve the calling company.
pub const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug, Clone)]
pub struct AdminClient {
    base_url: Url,
    api_key: Option<String>,
    http: Client,
}

impl AdminClient {
    pub fn new(config: &ConsoleConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            http,
        })
    }

    /// Client for `base_url` with default settings.
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let config = ConsoleConfig {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(5),
            ..ConsoleConfig::default()
        };
        Self::new(&config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Default company key for the payment endpoints.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Absolute URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.get(self.endpoint(path));
        self.send_json("GET", path, request).await
    }

    pub(crate) async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.endpoint(path)).query(query);
        self.send_json("GET", path, request).await
    }

    pub(crate) async fn post_json<T, B>(
        &self,
        path: &str,
        body: &B,
        api_key: Option<&str>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.http.post(self.endpoint(path)).json(body);
        if let Some(key) = api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        self.send_json("POST", path, request).await
    }

    /// POST without a body, used by the toggle and generate endpoints.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.post(self.endpoint(path));
        self.send_json("POST", path, request).await
    }

    pub(crate) async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.put(self.endpoint(path)).json(body);
        self.send_json("PUT", path, request).await
    }

    /// Send a request and return the response once its status is 2xx.
    pub(crate) async fn send(
        &self,
        method_name: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        debug!(method = method_name, path = %path, "admin api request");

        let response = request.send().await.map_err(|source| {
            warn!(method = method_name, path = %path, error = %source, "admin api request failed");
            ApiError::Transport {
                method: method_name,
                path: path.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(&body);
            warn!(
                method = method_name,
                path = %path,
                status = status.as_u16(),
                detail = detail.as_deref().unwrap_or(""),
                "admin api returned an error status"
            );
            return Err(ApiError::Status {
                method: method_name,
                path: path.to_string(),
                status,
                detail,
            });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method_name: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(method_name, path, request).await?;
        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            method: method_name,
            path: path.to_string(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidResponse {
            method: method_name,
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// Encode a value for use as a single path segment.
pub(crate) fn path_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
