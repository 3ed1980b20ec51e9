// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Company wallet endpoints.

use super::AdminClient;
use crate::error::ApiError;
use crate::models::{Wallet, WalletCreate, WalletUpdate};

impl AdminClient {
    pub async fn list_company_wallets(&self, company_id: i64) -> Result<Vec<Wallet>, ApiError> {
        self.get_json(&format!("/admin/companies/{company_id}/wallets"))
            .await
    }

    pub async fn create_company_wallet(
        &self,
        company_id: i64,
        payload: &WalletCreate,
    ) -> Result<Wallet, ApiError> {
        self.post_json(&format!("/admin/companies/{company_id}/wallets"), payload, None)
            .await
    }

    pub async fn update_wallet(&self, wallet_id: i64, payload: &WalletUpdate) -> Result<Wallet, ApiError> {
        self.put_json(&format!("/admin/wallets/{wallet_id}"), payload)
            .await
    }

    pub async fn toggle_wallet(&self, wallet_id: i64) -> Result<Wallet, ApiError> {
        self.post_empty(&format!("/admin/wallets/{wallet_id}/toggle"))
            .await
    }
}
