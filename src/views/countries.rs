// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Country list and create form.

use tracing::warn;

use super::table::Table;
use super::{non_blank, render_header, FieldErrors, View, FORM_FIELD};
use crate::api::AdminClient;
use crate::models::{Country, CountryCreate};

#[derive(Debug, Clone, Default)]
pub struct CountryForm {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct CountriesView {
    pub countries: Vec<Country>,
    pub form: CountryForm,
    pub field_errors: FieldErrors,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl CountriesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn mount(&mut self, client: &AdminClient) {
        self.reload(client).await;
    }

    pub async fn reload(&mut self, client: &AdminClient) {
        self.loading = true;
        match client.list_countries().await {
            Ok(countries) => {
                self.countries = countries;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to load countries");
                self.error = Some(e.user_message("Failed to load countries"));
            }
        }
        self.loading = false;
    }

    /// Create the country in the form, then reload the list.
    ///
    /// Returns the created country. Nothing is sent when code or name is
    /// blank.
    pub async fn create(&mut self, client: &AdminClient) -> Option<Country> {
        self.error = None;
        self.notice = None;
        self.field_errors.clear();

        let (Some(code), Some(name)) = (non_blank(&self.form.code), non_blank(&self.form.name))
        else {
            self.field_errors
                .insert(FORM_FIELD, "Both code and name are required");
            return None;
        };

        match client.create_country(&CountryCreate { code, name }).await {
            Ok(country) => {
                self.form = CountryForm::default();
                self.reload(client).await;
                self.notice = Some("Country created".to_string());
                Some(country)
            }
            Err(e) => {
                warn!(error = %e, "failed to create country");
                self.error = Some(e.user_message("Failed to create country"));
                None
            }
        }
    }
}

impl View for CountriesView {
    fn title(&self) -> &'static str {
        "Countries"
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
        let mut table = Table::new(&["ID", "Code", "Name"]);
        for country in &self.countries {
            table.push_row(vec![
                country.id.to_string(),
                country.code.clone(),
                country.name.clone(),
            ]);
        }
        out.push_str(&table.render("No countries yet."));
        out
    }

    fn error(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.field_errors.get(FORM_FIELD))
    }
}
