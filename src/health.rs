// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Backend liveness probe shown in the shell header.
//!
//! One probe per mount and one per manual retry. There is no polling
//! interval and no backoff.

use tracing::{error, info};

use crate::api::AdminClient;

pub const HEALTH_ERROR_MESSAGE: &str = "Backend health check failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Idle,
    Loading,
    Ok,
    Error,
}

#[derive(Debug, Default)]
pub struct HealthProbe {
    status: HealthStatus,
    error: Option<String>,
}

impl HealthProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Probe once if this probe has never run.
    pub async fn mount(&mut self, client: &AdminClient) -> HealthStatus {
        if self.status == HealthStatus::Idle {
            self.run(client).await
        } else {
            self.status
        }
    }

    /// Manual retry.
    pub async fn reload(&mut self, client: &AdminClient) -> HealthStatus {
        self.run(client).await
    }

    async fn run(&mut self, client: &AdminClient) -> HealthStatus {
        self.status = HealthStatus::Loading;
        self.error = None;

        match client.check_health().await {
            Ok(()) => {
                info!(base_url = %client.base_url(), "backend healthy");
                self.status = HealthStatus::Ok;
            }
            Err(e) => {
                error!(base_url = %client.base_url(), error = %e, "health check failed");
                self.status = HealthStatus::Error;
                self.error = Some(HEALTH_ERROR_MESSAGE.to_string());
            }
        }
        self.status
    }

    pub fn badge(&self) -> &'static str {
        match self.status {
            HealthStatus::Ok => "API: OK",
            HealthStatus::Error => "API: DOWN",
            HealthStatus::Idle | HealthStatus::Loading => "API: Checking...",
        }
    }
}
