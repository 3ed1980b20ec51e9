// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Company list: search, toggle, key lookup and onboarding documents.

use tracing::{info, warn};

use super::table::Table;
use super::{mask_key, or_dash, render_header, FieldErrors, View};
use crate::api::AdminClient;
use crate::models::{CompanySummary, OnboardingDocument};

#[derive(Debug, Default)]
pub struct CompaniesListView {
    pub companies: Vec<CompanySummary>,
    /// Case-insensitive filter over name, country and API key.
    pub search: String,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    /// Absolute link of the last generated onboarding document.
    pub onboarding_link: Option<String>,
}

impl CompaniesListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mount(&mut self, client: &AdminClient) {
        self.loading = true;
        match client.list_companies().await {
            Ok(companies) => {
                self.companies = companies;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to load companies");
                self.error = Some(e.user_message("Failed to load companies"));
            }
        }
        self.loading = false;
    }

    /// Rows matching the current search.
    pub fn visible(&self) -> Vec<&CompanySummary> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return self.companies.iter().collect();
        }
        self.companies
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.country_code
                        .as_deref()
                        .is_some_and(|cc| cc.to_lowercase().contains(&needle))
                    || c.api_key
                        .as_deref()
                        .is_some_and(|k| k.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Flip a company's active flag. Only `is_active` of the matching row
    /// is touched.
    pub async fn toggle(&mut self, client: &AdminClient, id: i64) -> bool {
        self.error = None;
        match client.toggle_company(id).await {
            Ok(company) => {
                if let Some(row) = self.companies.iter_mut().find(|c| c.id == company.id) {
                    row.is_active = company.is_active;
                }
                info!(company_id = id, is_active = company.is_active, "company toggled");
                true
            }
            Err(e) => {
                warn!(company_id = id, error = %e, "failed to toggle company");
                self.error = Some(e.user_message("Toggle failed"));
                false
            }
        }
    }

    /// The unmasked API key, for copying. Falls back to the company detail
    /// when the list row does not carry the key.
    pub async fn full_key(&mut self, client: &AdminClient, id: i64) -> Option<String> {
        self.error = None;
        let listed = self
            .companies
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.api_key.clone());
        if listed.is_some() {
            return listed;
        }

        match client.get_company(id).await {
            Ok(company) => {
                if company.api_key.is_none() {
                    self.error = Some("Company has no API key".to_string());
                }
                company.api_key
            }
            Err(e) => {
                warn!(company_id = id, error = %e, "failed to load company key");
                self.error = Some(e.user_message("Failed to load company"));
                None
            }
        }
    }

    pub async fn generate_onboarding(
        &mut self,
        client: &AdminClient,
        id: i64,
    ) -> Option<OnboardingDocument> {
        self.error = None;
        self.notice = None;
        match client.generate_onboarding(id).await {
            Ok(doc) => {
                self.onboarding_link = doc.download_url().map(|url| absolute_link(client, url));
                self.notice = Some(match (&self.onboarding_link, doc.html_fallback) {
                    (Some(link), false) => format!("Onboarding document ready: {link}"),
                    (Some(link), true) => format!("PDF unavailable, HTML version ready: {link}"),
                    (None, _) => "Onboarding document generated".to_string(),
                });
                Some(doc)
            }
            Err(e) => {
                warn!(company_id = id, error = %e, "failed to generate onboarding document");
                self.error = Some(e.user_message("Failed to generate onboarding document"));
                None
            }
        }
    }
}

/// Resolve a backend-relative link against the client's base URL.
pub(crate) fn absolute_link(client: &AdminClient, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if url.starts_with('/') {
        client.endpoint(url)
    } else {
        client.endpoint(&format!("/{url}"))
    }
}

impl View for CompaniesListView {
    fn title(&self) -> &'static str {
        "Companies"
    }

    fn render(&self) -> String {
        let mut out = String::new();
        render_header(
            &mut out,
            self.title(),
            self.loading,
            self.error.as_deref(),
            self.notice.as_deref(),
            &FieldErrors::default(),
        );
        if !self.search.trim().is_empty() {
            out.push_str(&format!("Search: {}\n", self.search.trim()));
        }
        let mut table = Table::new(&["ID", "Name", "Country", "API key", "Status"]);
        for company in self.visible() {
            table.push_row(vec![
                company.id.to_string(),
                company.name.clone(),
                or_dash(company.country_code.as_deref()).to_string(),
                mask_key(company.api_key.as_deref()),
                if company.is_active { "Active" } else { "Inactive" }.to_string(),
            ]);
        }
        out.push_str(&table.render("No companies found."));
        out
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
