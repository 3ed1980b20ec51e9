// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Resource views.
//!
//! Each view owns the list it displays, its form state and its field
//! errors, and calls [`AdminClient`](crate::api::AdminClient) directly.
//! They all follow the same shape:
//!
//! 1. `mount` fetches the list and any dependent lookups, with `loading`
//!    set for the duration.
//! 2. Local validation fills [`FieldErrors`] and aborts before any request
//!    is made.
//! 3. Successful writes are merged into the list (append, or replace by
//!    id) instead of refetching it.
//! 4. Backend failures become a single message: the backend `detail`
//!    verbatim when present, otherwise the view's generic message.
//!
//! Views render to plain text through [`View::render`].

use crate::models::{CompanySummary, Country, PaymentProvider, Wallet};

pub mod companies;
pub mod company_form;
pub mod company_wallets;
pub mod countries;
pub mod payment_providers;
pub mod payments_check;
pub mod payments_history;
pub mod table;

pub use companies::CompaniesListView;
pub use company_form::{CompanyFormView, FormMode};
pub use company_wallets::CompanyWalletsView;
pub use countries::CountriesView;
pub use payment_providers::PaymentProvidersView;
pub use payments_check::PaymentsCheckView;
pub use payments_history::PaymentsHistoryView;

/// Placeholder shown for missing values.
pub const DASH: &str = "—";

/// Key under which form-wide validation messages are stored.
pub const FORM_FIELD: &str = "form";

/// A renderable screen.
pub trait View {
    fn title(&self) -> &'static str;

    /// Plain-text rendering of the current state.
    fn render(&self) -> String;

    /// The message the view currently shows as its error, if any.
    fn error(&self) -> Option<&str>;
}

// =============================================================================
// Field Errors
// =============================================================================

/// Field-level validation messages, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((field, message)),
        }
    }

    pub fn remove(&mut self, field: &str) {
        self.entries.retain(|(f, _)| *f != field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

// =============================================================================
// Row Merging
// =============================================================================

/// Rows identified by a numeric id.
pub trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for Country {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for PaymentProvider {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for CompanySummary {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Wallet {
    fn key(&self) -> i64 {
        self.id
    }
}

/// Replace the row with the same id. Returns false when there is none.
pub fn replace_by_id<T: Keyed>(rows: &mut [T], item: T) -> bool {
    match rows.iter_mut().find(|row| row.key() == item.key()) {
        Some(row) => {
            *row = item;
            true
        }
        None => false,
    }
}

/// Replace the row with the same id, or append it.
pub fn upsert_by_id<T: Keyed>(rows: &mut Vec<T>, item: T) {
    if let Some(row) = rows.iter_mut().find(|row| row.key() == item.key()) {
        *row = item;
    } else {
        rows.push(item);
    }
}

// =============================================================================
// Latest Request Tracking
// =============================================================================

/// Issues tickets for in-flight requests so only the newest response is
/// applied.
#[derive(Debug, Default)]
pub struct LatestRequest {
    latest: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl LatestRequest {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Invalidate every outstanding ticket.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

// =============================================================================
// Rendering Helpers
// =============================================================================

/// `abcd***wxyz`; short keys are shown as is, missing keys as a dash.
pub fn mask_key(key: Option<&str>) -> String {
    let Some(key) = key.filter(|k| !k.is_empty()) else {
        return DASH.to_string();
    };
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return key.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}***{tail}")
}

pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(DASH)
}

/// Title, then loading, error, notice and field error lines.
pub(crate) fn render_header(
    out: &mut String,
    title: &str,
    loading: bool,
    error: Option<&str>,
    notice: Option<&str>,
    field_errors: &FieldErrors,
) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push('\n');
    if loading {
        out.push_str("Loading...\n");
    }
    if let Some(error) = error {
        out.push_str(&format!("Error: {error}\n"));
    }
    if let Some(notice) = notice {
        out.push_str(&format!("{notice}\n"));
    }
    for (field, message) in field_errors.iter() {
        if field == FORM_FIELD {
            out.push_str(&format!("! {message}\n"));
        } else {
            out.push_str(&format!("! {field}: {message}\n"));
        }
    }
}

/// Trimmed input, or `None` when blank.
pub(crate) fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
