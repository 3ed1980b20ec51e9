// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! by the console. Configuration is loaded from the environment (and an
//! optional `.env` file) at startup; command line flags override it.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ADMIN_API_BASE_URL` | Origin of the gateway backend | `http://localhost:8000` |
//! | `ADMIN_API_TIMEOUT_SECS` | Per-request timeout in seconds | `15` |
//! | `ADMIN_API_KEY` | Company/channel key sent as `X-API-Key` on payment calls | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `warn` |

use std::time::Duration;

use url::Url;

use crate::error::ApiError;

/// Environment variable name for the backend origin.
pub const BASE_URL_ENV: &str = "ADMIN_API_BASE_URL";

/// Environment variable name for the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "ADMIN_API_TIMEOUT_SECS";

/// Environment variable name for the default `X-API-Key` value.
///
/// Only the payment check/confirm endpoints resolve the calling company
/// from this header; admin endpoints ignore it.
pub const API_KEY_ENV: &str = "ADMIN_API_KEY";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Backend origin used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Request timeout used when nothing is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Resolved console configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub api_key: Option<String>,
    pub log_format: LogFormat,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            api_key: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first when present;
    /// variables already set in the environment win.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let base_url = parse_base_url(&env_or_default(BASE_URL_ENV, DEFAULT_BASE_URL))?;

        let timeout = match env_optional(TIMEOUT_ENV) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ApiError::Config(format!("{TIMEOUT_ENV} must be a whole number of seconds"))
                })?;
                Duration::from_secs(secs.max(1))
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            base_url,
            timeout,
            api_key: env_optional(API_KEY_ENV),
            log_format: LogFormat::parse(&env_or_default(LOG_FORMAT_ENV, "pretty")),
        })
    }

    /// Replace the backend origin.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ApiError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }

    /// Replace the default `X-API-Key` value. Blank keys are ignored.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }
}

/// Parse and normalise a backend origin.
///
/// Only `http` and `https` are accepted. A trailing slash is stripped so
/// endpoint paths can be appended verbatim.
pub fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| ApiError::Config(format!("invalid backend URL {trimmed:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::Config(format!(
            "backend URL must use http or https, got {other}"
        ))),
    }
}

fn env_optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}
