// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Errors returned by the admin API client.
//!
//! Views never interpret these beyond [`ApiError::user_message`]: the
//! backend `detail` string is shown verbatim when there is one, otherwise
//! the view's own generic message is used.

use reqwest::StatusCode;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network failure or timeout before any response arrived.
    #[error("{method} {path} failed: {source}")]
    Transport {
        method: &'static str,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("{method} {path} returned {status}{}", detail_suffix(.detail))]
    Status {
        method: &'static str,
        path: String,
        status: StatusCode,
        detail: Option<String>,
    },

    /// A 2xx response whose body could not be decoded.
    #[error("{method} {path} returned an invalid body: {message}")]
    InvalidResponse {
        method: &'static str,
        path: String,
        message: String,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

impl ApiError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend-supplied error detail, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }

    /// Message shown to the operator: the backend detail when present,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Pull a human-readable detail out of an error body.
///
/// The backend answers `{"detail": "..."}` for handled errors and
/// `{"detail": [...]}` for request validation failures; the latter is
/// passed through as compact JSON. `{"error": "..."}` is accepted too.
/// A non-JSON body counts only when it is a short single line of plain
/// text; proxy error pages and the like yield `None`.
pub fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => {
            let detail = value.get("detail").or_else(|| value.get("error"))?;
            match detail {
                Value::Null => None,
                Value::String(s) if s.trim().is_empty() => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }
        }
        Err(_) => plain_text_detail(trimmed),
    }
}

const MAX_PLAIN_DETAIL_LEN: usize = 200;

fn plain_text_detail(body: &str) -> Option<String> {
    let single_line = !body.contains(['\n', '\r']);
    let markup = body.starts_with('<');
    (single_line && !markup && body.chars().count() <= MAX_PLAIN_DETAIL_LEN)
        .then(|| body.to_string())
}
