// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallets of one company.

use tracing::{info, warn};

use super::table::Table;
use super::{or_dash, render_header, replace_by_id, FieldErrors, View, DASH, FORM_FIELD};
use crate::api::AdminClient;
use crate::models::{Channel, Wallet, WalletCreate, WalletUpdate};

pub const LABEL_FIELD: &str = "wallet_label";
pub const IDENTIFIER_FIELD: &str = "wallet_identifier";
pub const LIMIT_FIELD: &str = "daily_limit";
pub const CHANNEL_FIELD: &str = "channel_id";

const LIMIT_MESSAGE: &str = "Daily limit must be greater than zero";

#[derive(Debug, Clone)]
pub struct WalletForm {
    pub wallet_label: String,
    pub wallet_identifier: String,
    pub daily_limit: Option<f64>,
    pub channel_id: Option<i64>,
    pub is_active: bool,
}

impl Default for WalletForm {
    fn default() -> Self {
        Self {
            wallet_label: String::new(),
            wallet_identifier: String::new(),
            daily_limit: None,
            channel_id: None,
            is_active: true,
        }
    }
}

impl WalletForm {
    pub fn validate(&self, channels: &[Channel]) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.wallet_label.trim().is_empty() {
            errors.insert(LABEL_FIELD, "Wallet label is required");
        }
        if self.wallet_identifier.trim().is_empty() {
            errors.insert(IDENTIFIER_FIELD, "Wallet identifier is required");
        }
        if !self.daily_limit.is_some_and(is_positive_limit) {
            errors.insert(LIMIT_FIELD, LIMIT_MESSAGE);
        }
        match self.channel_id {
            None => errors.insert(CHANNEL_FIELD, "Select a channel"),
            Some(id) if !channels.is_empty() && !channels.iter().any(|ch| ch.id == id) => {
                errors.insert(CHANNEL_FIELD, "Channel does not belong to this company")
            }
            Some(_) => {}
        }
        errors
    }
}

/// NaN and infinities serialize as JSON `null`, so they never count as a limit.
fn is_positive_limit(limit: f64) -> bool {
    limit.is_finite() && limit > 0.0
}

/// Validate a partial wallet update.
pub fn validate_update(update: &WalletUpdate) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if update.is_empty() {
        errors.insert(FORM_FIELD, "Nothing to update");
    }
    if update
        .wallet_label
        .as_deref()
        .is_some_and(|l| l.trim().is_empty())
    {
        errors.insert(LABEL_FIELD, "Wallet label is required");
    }
    if update
        .wallet_identifier
        .as_deref()
        .is_some_and(|i| i.trim().is_empty())
    {
        errors.insert(IDENTIFIER_FIELD, "Wallet identifier is required");
    }
    if update.daily_limit.is_some_and(|limit| !is_positive_limit(limit)) {
        errors.insert(LIMIT_FIELD, LIMIT_MESSAGE);
    }
    errors
}

#[derive(Debug)]
pub struct CompanyWalletsView {
    pub company_id: i64,
    pub wallets: Vec<Wallet>,
    /// Options for the create form; empty when the company lookup failed.
    pub channels: Vec<Channel>,
    pub form: WalletForm,
    pub field_errors: FieldErrors,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl CompanyWalletsView {
    pub fn new(company_id: i64) -> Self {
        Self {
            company_id,
            wallets: Vec::new(),
            channels: Vec::new(),
            form: WalletForm::default(),
            field_errors: FieldErrors::new(),
            loading: false,
            error: None,
            notice: None,
        }
    }

    fn valid_id(&mut self) -> bool {
        if self.company_id <= 0 {
            self.error = Some("Invalid company id".to_string());
            return false;
        }
        true
    }

    /// Load wallets and the company's channels. A failed channel lookup
    /// leaves the channel picker empty without raising an error.
    pub async fn mount(&mut self, client: &AdminClient) {
        if !self.valid_id() {
            return;
        }
        self.loading = true;

        match client.list_company_wallets(self.company_id).await {
            Ok(wallets) => {
                self.wallets = wallets;
                self.error = None;
            }
            Err(e) => {
                warn!(company_id = self.company_id, error = %e, "failed to load wallets");
                self.error = Some("Failed to load wallets".to_string());
            }
        }

        match client.get_company(self.company_id).await {
            Ok(company) => {
                if company.channels.is_empty() {
                    info!(company_id = self.company_id, "company has no channels");
                }
                self.channels = company.channels;
            }
            Err(e) => {
                warn!(company_id = self.company_id, error = %e, "failed to load company channels");
                self.channels.clear();
            }
        }

        self.loading = false;
    }

    /// Create a wallet from the form and append it. The form is reset on
    /// success.
    pub async fn create(&mut self, client: &AdminClient) -> Option<Wallet> {
        if !self.valid_id() {
            return None;
        }
        self.error = None;
        self.notice = None;
        self.field_errors = self.form.validate(&self.channels);
        if !self.field_errors.is_empty() {
            return None;
        }
        let (Some(channel_id), Some(daily_limit)) = (self.form.channel_id, self.form.daily_limit)
        else {
            return None;
        };

        let payload = WalletCreate {
            channel_id,
            wallet_label: self.form.wallet_label.trim().to_string(),
            wallet_identifier: self.form.wallet_identifier.trim().to_string(),
            daily_limit: Some(daily_limit),
            is_active: Some(self.form.is_active),
        };

        match client.create_company_wallet(self.company_id, &payload).await {
            Ok(wallet) => {
                info!(company_id = self.company_id, wallet_id = wallet.id, "wallet created");
                self.wallets.push(wallet.clone());
                self.form = WalletForm::default();
                self.notice = Some("Wallet created".to_string());
                Some(wallet)
            }
            Err(e) => {
                warn!(company_id = self.company_id, error = %e, "failed to create wallet");
                self.error = Some(e.user_message("Failed to create wallet"));
                None
            }
        }
    }

    pub async fn update(
        &mut self,
        client: &AdminClient,
        wallet_id: i64,
        update: WalletUpdate,
    ) -> Option<Wallet> {
        self.error = None;
        self.notice = None;
        self.field_errors = validate_update(&update);
        if !self.field_errors.is_empty() {
            return None;
        }

        match client.update_wallet(wallet_id, &update).await {
            Ok(wallet) => {
                if !replace_by_id(&mut self.wallets, wallet.clone()) {
                    self.wallets.push(wallet.clone());
                }
                self.notice = Some("Wallet updated".to_string());
                Some(wallet)
            }
            Err(e) => {
                warn!(wallet_id, error = %e, "failed to update wallet");
                self.error = Some(e.user_message("Failed to update wallet"));
                None
            }
        }
    }

    /// Toggle a wallet and replace its row from the response.
    pub async fn toggle(&mut self, client: &AdminClient, wallet_id: i64) -> bool {
        self.error = None;
        match client.toggle_wallet(wallet_id).await {
            Ok(wallet) => {
                replace_by_id(&mut self.wallets, wallet);
                true
            }
            Err(e) => {
                warn!(wallet_id, error = %e, "failed to toggle wallet");
                self.error = Some(e.user_message("Failed to toggle wallet"));
                false
            }
        }
    }
}

fn format_amount(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| DASH.to_string())
}

impl View for CompanyWalletsView {
    fn title(&self) -> &'static str {
        "Company Wallets"
    }

    fn render(&self) -> String {
        let mut out = String::new();
        render_header(
            &mut out,
            self.title(),
            self.loading,
            self.error.as_deref(),
            self.notice.as_deref(),
            &self.field_errors,
        );
        if self.company_id <= 0 {
            return out;
        }
        out.push_str(&format!("Company: {}\n", self.company_id));

        if !self.channels.is_empty() {
            let labels: Vec<String> = self
                .channels
                .iter()
                .map(|ch| format!("{} = {}", ch.id, ch.display_label()))
                .collect();
            out.push_str(&format!("Channels: {}\n", labels.join(", ")));
        }
        out.push('\n');

        let mut table = Table::new(&[
            "ID",
            "Label",
            "Identifier",
            "Provider",
            "Daily limit",
            "Used today",
            "Active",
        ]);
        for wallet in &self.wallets {
            table.push_row(vec![
                wallet.id.to_string(),
                wallet.wallet_label.clone(),
                wallet.wallet_identifier.clone(),
                or_dash(
                    wallet
                        .provider_name
                        .as_deref()
                        .or(wallet.provider_code.as_deref()),
                )
                .to_string(),
                format_amount(wallet.daily_limit),
                format_amount(wallet.used_today),
                if wallet.is_active { "Yes" } else { "No" }.to_string(),
            ]);
        }
        out.push_str(&table.render("No wallets found."));
        out
    }

    fn error(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.field_errors.iter().next().map(|(_, m)| m))
    }
}
