// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Company administration endpoints.

use super::AdminClient;
use crate::error::ApiError;
use crate::models::{Company, CompanyPayload, CompanySummary, OnboardingDocument};

impl AdminClient {
    pub async fn list_companies(&self) -> Result<Vec<CompanySummary>, ApiError> {
        self.get_json("/admin/companies/").await
    }

    /// Create a company; the backend issues its API key and one channel
    /// per provider code.
    pub async fn create_company(&self, payload: &CompanyPayload) -> Result<Company, ApiError> {
        self.post_json("/admin/companies/", payload, None).await
    }

    pub async fn get_company(&self, id: i64) -> Result<Company, ApiError> {
        self.get_json(&format!("/admin/companies/{id}")).await
    }

    pub async fn update_company(&self, id: i64, payload: &CompanyPayload) -> Result<Company, ApiError> {
        self.put_json(&format!("/admin/companies/{id}"), payload).await
    }

    /// Flip the company's active flag.
    pub async fn toggle_company(&self, id: i64) -> Result<Company, ApiError> {
        self.post_empty(&format!("/admin/companies/{id}/toggle")).await
    }

    /// Generate the merchant onboarding document for an active company.
    pub async fn generate_onboarding(&self, id: i64) -> Result<OnboardingDocument, ApiError> {
        self.post_empty(&format!("/admin/companies/{id}/onboarding-pdf"))
            .await
    }
}
