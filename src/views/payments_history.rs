// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Server-side filtered, paginated payment history.
//!
//! The view holds only the current page and the total count. Every search
//! takes a [`Ticket`]; a response is applied only while its ticket is the
//! latest, so a slow answer to an earlier filter cannot overwrite a newer
//! one.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::table::Table;
use super::{non_blank, or_dash, render_header, FieldErrors, LatestRequest, Ticket, View, DASH};
use crate::api::AdminClient;
use crate::error::ApiError;
use crate::models::{PaymentPage, PaymentRecord, PaymentSearch};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 200;

/// Status filter value meaning "no filter".
pub const ANY_STATUS: &str = "any";

pub const AMOUNT_FIELD: &str = "amount";
pub const DATE_FIELD: &str = "created";
pub const PAGE_FIELD: &str = "page";
pub const PAGE_SIZE_FIELD: &str = "page_size";

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryFilter {
    pub txn_id: String,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    /// A payment status, or [`ANY_STATUS`].
    pub status: String,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub company_id: Option<i64>,
    pub channel_id: Option<i64>,
    pub wallet_id: Option<i64>,
}

impl Default for HistoryFilter {
    fn default() -> Self {
        Self {
            txn_id: String::new(),
            min_amount: None,
            max_amount: None,
            status: ANY_STATUS.to_string(),
            created_from: None,
            created_to: None,
            company_id: None,
            channel_id: None,
            wallet_id: None,
        }
    }
}

impl HistoryFilter {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let bounds = [self.min_amount, self.max_amount];
        if bounds.iter().flatten().any(|v| !v.is_finite()) {
            errors.insert(AMOUNT_FIELD, "Amounts must be finite numbers");
        } else if bounds.iter().flatten().any(|v| *v < 0.0) {
            errors.insert(AMOUNT_FIELD, "Amounts cannot be negative");
        } else if let (Some(min), Some(max)) = (self.min_amount, self.max_amount) {
            if min > max {
                errors.insert(AMOUNT_FIELD, "Minimum amount cannot exceed maximum amount");
            }
        }
        if let (Some(from), Some(to)) = (self.created_from, self.created_to) {
            if from > to {
                errors.insert(DATE_FIELD, "Start date must be before end date");
            }
        }
        errors
    }

    /// Query for one page of this filter.
    pub fn to_search(&self, page: u32, page_size: u32) -> PaymentSearch {
        let status = non_blank(&self.status).filter(|s| !s.eq_ignore_ascii_case(ANY_STATUS));
        PaymentSearch {
            txn_id: non_blank(&self.txn_id),
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            status,
            created_from: self.created_from,
            created_to: self.created_to,
            company_id: self.company_id,
            channel_id: self.channel_id,
            wallet_id: self.wallet_id,
            page,
            page_size,
        }
    }
}

/// A search that has been issued but not yet applied.
#[derive(Debug)]
pub struct SearchRequest {
    ticket: Ticket,
    query: PaymentSearch,
}

#[derive(Debug)]
pub struct SearchResponse {
    ticket: Ticket,
    query: PaymentSearch,
    result: Result<PaymentPage, ApiError>,
}

impl SearchRequest {
    pub fn query(&self) -> &PaymentSearch {
        &self.query
    }

    pub async fn run(self, client: &AdminClient) -> SearchResponse {
        let result = client.search_payments(&self.query).await;
        SearchResponse {
            ticket: self.ticket,
            query: self.query,
            result,
        }
    }
}

#[derive(Debug)]
pub struct PaymentsHistoryView {
    pub filter: HistoryFilter,
    pub page: u32,
    pub page_size: u32,
    /// Rows of the current page only.
    pub items: Vec<PaymentRecord>,
    pub total: u64,
    /// True once a search result has been applied.
    pub searched: bool,
    pub field_errors: FieldErrors,
    pub loading: bool,
    pub error: Option<String>,
    requests: LatestRequest,
}

impl Default for PaymentsHistoryView {
    fn default() -> Self {
        Self {
            filter: HistoryFilter::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            items: Vec::new(),
            total: 0,
            searched: false,
            field_errors: FieldErrors::new(),
            loading: false,
            error: None,
            requests: LatestRequest::default(),
        }
    }
}

impl PaymentsHistoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// `ceil(total / page_size)`, at least 1.
    pub fn page_count(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        let pages = self.total.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    fn validate(&self) -> FieldErrors {
        let mut errors = self.filter.validate();
        if self.page < 1 {
            errors.insert(PAGE_FIELD, "Page must be at least 1");
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            errors.insert(
                PAGE_SIZE_FIELD,
                format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
            );
        }
        errors
    }

    /// Validate and issue a search for the current filter and page.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        self.error = None;
        self.field_errors = self.validate();
        if !self.field_errors.is_empty() {
            return None;
        }
        self.loading = true;
        Some(SearchRequest {
            ticket: self.requests.issue(),
            query: self.filter.to_search(self.page, self.page_size),
        })
    }

    /// Apply a search response unless a newer search has been issued.
    pub fn apply(&mut self, response: SearchResponse) -> bool {
        if !self.requests.is_current(response.ticket) {
            debug!(page = response.query.page, "discarding stale payment search response");
            return false;
        }
        self.loading = false;

        match response.result {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.page = page.page.max(1);
                self.searched = true;
            }
            Err(e) => {
                warn!(error = %e, "payment search failed");
                self.error = Some(e.user_message("Failed to load payments"));
            }
        }
        true
    }

    pub async fn search(&mut self, client: &AdminClient) -> bool {
        match self.begin_search() {
            Some(request) => {
                let response = request.run(client).await;
                self.apply(response) && self.error.is_none()
            }
            None => false,
        }
    }

    /// Replace the filter and search from page 1.
    pub async fn apply_filter(&mut self, client: &AdminClient, filter: HistoryFilter) -> bool {
        self.filter = filter;
        self.page = 1;
        self.search(client).await
    }

    pub async fn set_page_size(&mut self, client: &AdminClient, page_size: u32) -> bool {
        self.page_size = page_size;
        self.page = 1;
        self.search(client).await
    }

    /// Jump to `page`; pages outside `1..=page_count` are refused without a
    /// request.
    pub async fn goto_page(&mut self, client: &AdminClient, page: u32) -> bool {
        let count = self.page_count();
        if page < 1 || page > count {
            self.field_errors = FieldErrors::new();
            self.field_errors
                .insert(PAGE_FIELD, format!("Page must be between 1 and {count}"));
            return false;
        }
        self.page = page;
        self.search(client).await
    }

    pub async fn next_page(&mut self, client: &AdminClient) -> bool {
        if self.page >= self.page_count() {
            return false;
        }
        self.goto_page(client, self.page + 1).await
    }

    pub async fn previous_page(&mut self, client: &AdminClient) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.goto_page(client, self.page - 1).await
    }

    /// Clear filter and results. Any search still in flight is ignored.
    pub fn reset(&mut self) {
        let page_size = self.page_size;
        self.requests.invalidate();
        *self = Self {
            page_size,
            requests: std::mem::take(&mut self.requests),
            ..Self::default()
        };
    }
}

impl View for PaymentsHistoryView {
    fn title(&self) -> &'static str {
        "Payments history"
    }

    fn render(&self) -> String {
        let mut out = String::new();
        render_header(
            &mut out,
            self.title(),
            self.loading,
            self.error.as_deref(),
            None,
            &self.field_errors,
        );

        let query = self.filter.to_search(self.page, self.page_size);
        let mut filters = Vec::new();
        if let Some(txn) = &query.txn_id {
            filters.push(format!("txn={txn}"));
        }
        if let Some(status) = &query.status {
            filters.push(format!("status={status}"));
        }
        if let Some(min) = query.min_amount {
            filters.push(format!("min={min}"));
        }
        if let Some(max) = query.max_amount {
            filters.push(format!("max={max}"));
        }
        if let Some(from) = query.created_from {
            filters.push(format!("from={}", from.to_rfc3339()));
        }
        if let Some(to) = query.created_to {
            filters.push(format!("to={}", to.to_rfc3339()));
        }
        if !filters.is_empty() {
            out.push_str(&format!("Filter: {}\n", filters.join(" ")));
        }

        if !self.searched {
            out.push_str("No search yet.\n");
            return out;
        }

        let mut table = Table::new(&[
            "ID", "Txn", "Amount", "Currency", "Status", "Company", "Created", "Used",
        ]);
        for record in &self.items {
            table.push_row(vec![
                record.payment_id.to_string(),
                or_dash(record.txn_id.as_deref()).to_string(),
                record.amount.to_string(),
                record.currency.clone(),
                record.status.clone(),
                or_dash(record.company_name.as_deref()).to_string(),
                record.created_at.format("%Y-%m-%d %H:%M").to_string(),
                record
                    .used_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| DASH.to_string()),
            ]);
        }
        out.push_str(&table.render("No payments found."));
        out.push_str(&format!(
            "Page {} of {} ({} total)\n",
            self.page,
            self.page_count(),
            self.total
        ));
        out
    }

    fn error(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.field_errors.iter().next().map(|(_, m)| m))
    }
}
