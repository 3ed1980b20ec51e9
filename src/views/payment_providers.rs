// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payment provider list and create form.

use tracing::warn;

use super::table::Table;
use super::{non_blank, or_dash, render_header, FieldErrors, View, FORM_FIELD};
use crate::api::AdminClient;
use crate::models::{Country, PaymentProvider, PaymentProviderCreate};

#[derive(Debug, Clone, Default)]
pub struct ProviderForm {
    pub code: String,
    pub name: String,
    pub description: String,
    /// Empty means not scoped to a country.
    pub country_code: String,
}

#[derive(Debug, Default)]
pub struct PaymentProvidersView {
    pub providers: Vec<PaymentProvider>,
    /// Options for the country picker.
    pub countries: Vec<Country>,
    pub form: ProviderForm,
    pub field_errors: FieldErrors,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl PaymentProvidersView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load providers and the country lookup. A failed lookup only leaves
    /// the picker empty.
    pub async fn mount(&mut self, client: &AdminClient) {
        match client.list_countries().await {
            Ok(countries) => self.countries = countries,
            Err(e) => {
                warn!(error = %e, "failed to load countries for provider form");
                self.countries.clear();
            }
        }
        self.reload(client).await;
    }

    pub async fn reload(&mut self, client: &AdminClient) {
        self.loading = true;
        match client.list_payment_providers().await {
            Ok(providers) => {
                self.providers = providers;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to load payment providers");
                self.error = Some(e.user_message("Failed to load providers"));
            }
        }
        self.loading = false;
    }

    pub async fn create(&mut self, client: &AdminClient) -> Option<PaymentProvider> {
        self.error = None;
        self.notice = None;
        self.field_errors.clear();

        let (Some(code), Some(name)) = (non_blank(&self.form.code), non_blank(&self.form.name))
        else {
            self.field_errors.insert(FORM_FIELD, "Code and name are required");
            return None;
        };

        let payload = PaymentProviderCreate {
            code,
            name,
            description: non_blank(&self.form.description),
            country_code: non_blank(&self.form.country_code),
        };

        match client.create_payment_provider(&payload).await {
            Ok(provider) => {
                self.form = ProviderForm::default();
                self.reload(client).await;
                self.notice = Some("Provider created".to_string());
                Some(provider)
            }
            Err(e) => {
                warn!(error = %e, code = %payload.code, "failed to create payment provider");
                self.error = Some(e.user_message("Create provider failed"));
                None
            }
        }
    }
}

impl View for PaymentProvidersView {
    fn title(&self) -> &'static str {
        "Payment Providers"
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
        let mut table = Table::new(&["ID", "Code", "Name", "Country", "Description"]);
        for provider in &self.providers {
            table.push_row(vec![
                provider.id.to_string(),
                provider.code.clone(),
                provider.name.clone(),
                or_dash(provider.country_code.as_deref()).to_string(),
                or_dash(provider.description.as_deref()).to_string(),
            ]);
        }
        out.push_str(&table.render("No providers yet."));
        out
    }

    fn error(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.field_errors.get(FORM_FIELD))
    }
}
