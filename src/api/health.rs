// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Backend liveness endpoint.

use super::AdminClient;
use crate::error::ApiError;

impl AdminClient {
    /// Probe `GET /health`. Any 2xx answer counts as healthy; the body is
    /// not inspected.
    pub async fn check_health(&self) -> Result<(), ApiError> {
        let request = self.http.get(self.endpoint("/health"));
        self.send("GET", "/health", request).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::AdminClient;
    use crate::test_support::FakeBackend;

    #[tokio::test]
    async fn healthy_backend_answers_ok() {
        let backend = FakeBackend::spawn().await;
        assert!(backend.client().check_health().await.is_ok());
    }

    #[tokio::test]
    async fn unhealthy_backend_is_an_error() {
        let backend = FakeBackend::spawn().await;
        backend.set_healthy(false);
        assert!(backend.client().check_health().await.is_err());

        let unreachable = AdminClient::with_base_url("http://127.0.0.1:9").unwrap();
        assert!(unreachable.check_health().await.is_err());
    }
}
