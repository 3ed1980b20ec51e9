// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Console paths to views.

use std::fmt;

/// Navigation entries shown by the shell, as (label, path).
pub const NAV_ITEMS: &[(&str, &str)] = &[
    ("Companies", "/companies"),
    ("Create Company", "/companies/new"),
    ("Company Wallets", "/companies/1/wallets"),
    ("Payment Providers", "/payment-providers"),
    ("Payments history", "/payments/history"),
    ("Payments (check & verify)", "/payments/check"),
    ("Countries", "/countries"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Companies,
    CompanyNew,
    CompanyEdit(i64),
    CompanyWallets(i64),
    Countries,
    PaymentProviders,
    PaymentsCheck,
    PaymentsHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("page not found: {0}")]
    NotFound(String),

    #[error("invalid company id: {0}")]
    InvalidCompanyId(String),
}

impl Route {
    /// Resolve a console path. Query strings, fragments and trailing
    /// slashes are ignored; `/` redirects to the company list.
    pub fn parse(raw: &str) -> Result<Route, RouteError> {
        let path = raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["companies"] => Ok(Route::Companies),
            ["companies", "new"] => Ok(Route::CompanyNew),
            ["companies", id] => parse_company_id(id).map(Route::CompanyEdit),
            ["companies", id, "wallets"] => parse_company_id(id).map(Route::CompanyWallets),
            ["countries"] => Ok(Route::Countries),
            ["payment-providers"] => Ok(Route::PaymentProviders),
            ["payments", "check"] => Ok(Route::PaymentsCheck),
            ["payments", "history"] => Ok(Route::PaymentsHistory),
            _ => Err(RouteError::NotFound(raw.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Companies => "/companies".to_string(),
            Route::CompanyNew => "/companies/new".to_string(),
            Route::CompanyEdit(id) => format!("/companies/{id}"),
            Route::CompanyWallets(id) => format!("/companies/{id}/wallets"),
            Route::Countries => "/countries".to_string(),
            Route::PaymentProviders => "/payment-providers".to_string(),
            Route::PaymentsCheck => "/payments/check".to_string(),
            Route::PaymentsHistory => "/payments/history".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

fn parse_company_id(raw: &str) -> Result<i64, RouteError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(RouteError::InvalidCompanyId(raw.to_string())),
    }
}
