// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payment check/confirm handshake and admin payment search.

use super::AdminClient;
use crate::error::ApiError;
use crate::models::{
    PaymentCheckRequest, PaymentCheckResponse, PaymentConfirmRequest, PaymentConfirmResponse,
    PaymentPage, PaymentSearch,
};

impl AdminClient {
    /// Ask the backend whether a payment matching the order exists.
    ///
    /// `api_key` identifies the company/channel; when `None` the client's
    /// configured default is used, and when neither is set the header is
    /// omitted and the backend decides.
    pub async fn check_payment(
        &self,
        api_key: Option<&str>,
        payload: &PaymentCheckRequest,
    ) -> Result<PaymentCheckResponse, ApiError> {
        let key = api_key.or(self.api_key.as_deref());
        self.post_json("/payments/check", payload, key).await
    }

    /// Consume a confirm token. The token is sent exactly as issued.
    pub async fn confirm_payment(
        &self,
        api_key: Option<&str>,
        payload: &PaymentConfirmRequest,
    ) -> Result<PaymentConfirmResponse, ApiError> {
        let key = api_key.or(self.api_key.as_deref());
        self.post_json("/payments/confirm", payload, key).await
    }

    /// Server-side filtered, paginated payment search.
    pub async fn search_payments(&self, query: &PaymentSearch) -> Result<PaymentPage, ApiError> {
        self.get_json_with_query("/admin/payments/", query).await
    }
}
