// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Company create / edit form.
//!
//! The provider checklist depends on the selected country: choosing a
//! country loads that country's providers and clears the selection, and
//! editing a company loads its country's providers and then preselects the
//! provider codes of the company's existing channels. Provider lookups
//! carry a [`Ticket`]; only the response to the most recent lookup is
//! applied.

use tracing::{debug, info, warn};

use super::{non_blank, or_dash, render_header, FieldErrors, LatestRequest, Ticket, View, DASH};
use crate::api::AdminClient;
use crate::error::ApiError;
use crate::models::{Company, CompanyPayload, Country, CountryWithProviders, PaymentProvider};

pub const NAME_FIELD: &str = "name";
pub const PROVIDERS_FIELD: &str = "providers";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// A provider lookup that has been issued but not yet applied.
#[derive(Debug)]
pub struct ProviderFetch {
    ticket: Ticket,
    country_code: String,
    preselect: Vec<String>,
    failure_message: &'static str,
}

/// The outcome of a [`ProviderFetch`], ready to be applied.
#[derive(Debug)]
pub struct ProviderFetched {
    ticket: Ticket,
    country_code: String,
    preselect: Vec<String>,
    failure_message: &'static str,
    result: Result<CountryWithProviders, ApiError>,
}

impl ProviderFetch {
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub async fn run(self, client: &AdminClient) -> ProviderFetched {
        let result = client.country_with_providers(&self.country_code).await;
        ProviderFetched {
            ticket: self.ticket,
            country_code: self.country_code,
            preselect: self.preselect,
            failure_message: self.failure_message,
            result,
        }
    }
}

#[derive(Debug)]
pub struct CompanyFormView {
    pub mode: FormMode,
    pub name: String,
    pub country_code: Option<String>,
    pub telegram_bot_token: String,
    pub telegram_default_group_id: String,
    pub countries: Vec<Country>,
    /// Checklist options, always the providers of `country_code`.
    pub providers: Vec<PaymentProvider>,
    /// Checked provider codes, in the order they were checked.
    pub selected: Vec<String>,
    pub field_errors: FieldErrors,
    pub loading: bool,
    pub providers_loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    /// The loaded company in edit mode, then the saved result.
    pub company: Option<Company>,
    /// Example `/payments/check` call for the saved company.
    pub snippet: Option<String>,
    provider_requests: LatestRequest,
}

impl CompanyFormView {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            name: String::new(),
            country_code: None,
            telegram_bot_token: String::new(),
            telegram_default_group_id: String::new(),
            countries: Vec::new(),
            providers: Vec::new(),
            selected: Vec::new(),
            field_errors: FieldErrors::new(),
            loading: false,
            providers_loading: false,
            submitting: false,
            error: None,
            notice: None,
            company: None,
            snippet: None,
            provider_requests: LatestRequest::default(),
        }
    }

    pub async fn mount(&mut self, client: &AdminClient) {
        self.loading = true;

        match client.list_countries().await {
            Ok(countries) => self.countries = countries,
            Err(e) => {
                warn!(error = %e, "failed to load countries");
                self.error = Some("Failed to load countries".to_string());
            }
        }

        if let FormMode::Edit(id) = self.mode {
            match client.get_company(id).await {
                Ok(company) => {
                    if let Some(fetch) = self.load_company(company) {
                        let fetched = fetch.run(client).await;
                        self.apply_providers(fetched);
                    }
                }
                Err(e) => {
                    warn!(company_id = id, error = %e, "failed to load company");
                    self.error = Some("Failed to load company".to_string());
                }
            }
        }

        self.loading = false;
    }

    /// Fill the form from a loaded company. Returns the provider lookup
    /// for the company's country; without a country the channel provider
    /// codes are preselected directly.
    pub fn load_company(&mut self, company: Company) -> Option<ProviderFetch> {
        self.name = company.name.clone();
        self.country_code = company.country_code.clone().filter(|c| !c.is_empty());
        self.telegram_bot_token = company.telegram_bot_token.clone().unwrap_or_default();
        self.telegram_default_group_id = company
            .telegram_default_group_id
            .clone()
            .unwrap_or_default();
        let existing = company.channel_provider_codes();
        self.company = Some(company);

        match self.country_code.clone() {
            Some(code) => Some(self.issue_fetch(
                code,
                existing,
                "Failed to load payment providers for company country",
            )),
            None => {
                if !existing.is_empty() {
                    self.selected = existing;
                }
                None
            }
        }
    }

    /// Change the selected country. The selection is cleared; clearing the
    /// country also empties the provider list and returns no lookup.
    pub fn select_country(&mut self, code: Option<&str>) -> Option<ProviderFetch> {
        self.country_code = code.and_then(non_blank);
        self.selected.clear();

        match self.country_code.clone() {
            Some(code) => Some(self.issue_fetch(
                code,
                Vec::new(),
                "Failed to load payment providers for country",
            )),
            None => {
                self.providers.clear();
                self.providers_loading = false;
                self.provider_requests.invalidate();
                None
            }
        }
    }

    /// Select a country and load its providers.
    pub async fn change_country(&mut self, client: &AdminClient, code: Option<&str>) {
        if let Some(fetch) = self.select_country(code) {
            let fetched = fetch.run(client).await;
            self.apply_providers(fetched);
        }
    }

    fn issue_fetch(
        &mut self,
        country_code: String,
        preselect: Vec<String>,
        failure_message: &'static str,
    ) -> ProviderFetch {
        self.providers_loading = true;
        ProviderFetch {
            ticket: self.provider_requests.issue(),
            country_code,
            preselect,
            failure_message,
        }
    }

    /// Apply a provider lookup. Responses to superseded lookups are
    /// dropped and `false` is returned.
    pub fn apply_providers(&mut self, fetched: ProviderFetched) -> bool {
        if !self.provider_requests.is_current(fetched.ticket) {
            debug!(country = %fetched.country_code, "discarding stale provider response");
            return false;
        }
        self.providers_loading = false;

        match fetched.result {
            Ok(found) => {
                self.providers = found.providers;
                self.selected = fetched.preselect;
                true
            }
            Err(e) => {
                warn!(country = %fetched.country_code, error = %e, "failed to load providers");
                self.error = Some(fetched.failure_message.to_string());
                true
            }
        }
    }

    pub fn toggle_provider(&mut self, code: &str) {
        self.field_errors.remove(PROVIDERS_FIELD);
        if let Some(pos) = self.selected.iter().position(|c| c == code) {
            self.selected.remove(pos);
        } else {
            self.selected.push(code.to_string());
        }
    }

    pub fn select_all_providers(&mut self) {
        self.field_errors.remove(PROVIDERS_FIELD);
        self.selected = self.providers.iter().map(|p| p.code.clone()).collect();
    }

    pub fn clear_all_providers(&mut self) {
        self.field_errors.remove(PROVIDERS_FIELD);
        self.selected.clear();
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.insert(NAME_FIELD, "Company name is required");
        }
        if self.selected.is_empty() {
            errors.insert(PROVIDERS_FIELD, "Select at least one provider");
        }
        errors
    }

    fn payload(&self) -> CompanyPayload {
        CompanyPayload {
            name: self.name.trim().to_string(),
            country_code: self.country_code.clone(),
            telegram_bot_token: non_blank(&self.telegram_bot_token),
            telegram_default_group_id: non_blank(&self.telegram_default_group_id),
            provider_codes: self.selected.clone(),
        }
    }

    /// Validate, then create or update. Nothing is sent when validation
    /// fails.
    pub async fn submit(&mut self, client: &AdminClient) -> Option<Company> {
        self.error = None;
        self.notice = None;
        self.field_errors = self.validate();
        if !self.field_errors.is_empty() {
            return None;
        }

        self.submitting = true;
        let payload = self.payload();
        let result = match self.mode {
            FormMode::Create => client.create_company(&payload).await,
            FormMode::Edit(id) => client.update_company(id, &payload).await,
        };
        self.submitting = false;

        match result {
            Ok(company) => {
                info!(company_id = company.id, providers = ?payload.provider_codes, "company saved");
                self.snippet = Some(integration_snippet(client, company.api_key.as_deref()));
                self.company = Some(company.clone());
                self.notice = Some("Company saved".to_string());
                Some(company)
            }
            Err(e) => {
                warn!(error = %e, "failed to save company");
                self.error = Some(e.user_message("Failed to save company"));
                None
            }
        }
    }
}

fn integration_snippet(client: &AdminClient, api_key: Option<&str>) -> String {
    format!(
        "curl -X POST {} \\\n  -H 'Content-Type: application/json' \\\n  -H 'X-API-Key: {}' \\\n  -d '{{\"txn_id\": \"TXN123\", \"expected_amount\": 100}}'",
        client.endpoint("/payments/check"),
        api_key.unwrap_or_default()
    )
}

impl View for CompanyFormView {
    fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create Company",
            FormMode::Edit(_) => "Edit Company",
        }
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

        let country = self
            .country_code
            .as_deref()
            .map(|code| match self.countries.iter().find(|c| c.code == code) {
                Some(c) => format!("{} ({})", c.name, c.code),
                None => code.to_string(),
            })
            .unwrap_or_else(|| DASH.to_string());
        out.push_str(&format!("Name: {}\n", or_dash(Some(self.name.trim()))));
        out.push_str(&format!("Country: {country}\n"));
        out.push_str(&format!(
            "Telegram default group: {}\n",
            or_dash(Some(self.telegram_default_group_id.trim()))
        ));

        out.push_str("Supported payment providers:\n");
        if self.providers_loading {
            out.push_str("  Loading providers...\n");
        } else if self.providers.is_empty() {
            out.push_str("  No payment providers available.\n");
        }
        for provider in &self.providers {
            let mark = if self.selected.contains(&provider.code) { "x" } else { " " };
            out.push_str(&format!("  [{mark}] {} ({})\n", provider.name, provider.code));
        }
        for code in self
            .selected
            .iter()
            .filter(|code| !self.providers.iter().any(|p| &p.code == *code))
        {
            out.push_str(&format!("  [x] {code}\n"));
        }

        if let Some(company) = &self.company {
            out.push_str("\nResult\n");
            out.push_str(&format!("API key: {}\n", or_dash(company.api_key.as_deref())));
            if let Some(channel) = company.channels.first() {
                out.push_str(&format!(
                    "Channel API key: {}\n",
                    or_dash(channel.channel_api_key.as_deref())
                ));
            }
            if let Some(wallet) = company.wallets.first() {
                out.push_str(&format!("Default wallet: {}\n", wallet.wallet_identifier));
            }
            if let Some(snippet) = &self.snippet {
                out.push_str("\nQuick integration snippet:\n");
                out.push_str(snippet);
                out.push('\n');
            }
        }
        out
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref().or_else(|| {
            self.field_errors
                .get(NAME_FIELD)
                .or_else(|| self.field_errors.get(PROVIDERS_FIELD))
        })
    }
}
