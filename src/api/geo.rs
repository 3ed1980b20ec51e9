// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Countries and payment providers.

use super::{path_segment, AdminClient};
use crate::error::ApiError;
use crate::models::{
    Country, CountryCreate, CountryWithProviders, PaymentProvider, PaymentProviderCreate,
};

impl AdminClient {
    pub async fn list_countries(&self) -> Result<Vec<Country>, ApiError> {
        self.get_json("/admin/geo/countries").await
    }

    pub async fn create_country(&self, payload: &CountryCreate) -> Result<Country, ApiError> {
        self.post_json("/admin/geo/countries", payload, None).await
    }

    /// A country and the providers scoped to it.
    pub async fn country_with_providers(&self, code: &str) -> Result<CountryWithProviders, ApiError> {
        self.get_json(&format!("/admin/geo/countries/{}/providers", path_segment(code)))
            .await
    }

    pub async fn list_payment_providers(&self) -> Result<Vec<PaymentProvider>, ApiError> {
        self.get_json("/admin/payment-providers").await
    }

    pub async fn create_payment_provider(
        &self,
        payload: &PaymentProviderCreate,
    ) -> Result<PaymentProvider, ApiError> {
        self.post_json("/admin/payment-providers", payload, None).await
    }
}
