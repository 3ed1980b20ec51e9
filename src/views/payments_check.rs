// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ad-hoc payment check and confirm.
//!
//! `check` asks the backend for a payment matching an order; on a match it
//! issues a one-time [`ConfirmToken`]. `confirm` sends that token back
//! unchanged to consume the payment. The handshake state lives in the
//! backend; a rejected confirm is always surfaced as an error.

use tracing::{info, warn};
use uuid::Uuid;

use super::{non_blank, or_dash, render_header, FieldErrors, View};
use crate::api::AdminClient;
use crate::error::ApiError;
use crate::models::{
    ConfirmToken, PaymentCheckRequest, PaymentCheckResponse, PaymentConfirmRequest,
    PaymentConfirmResponse,
};

pub const AMOUNT_FIELD: &str = "expected_amount";

#[derive(Debug, Clone)]
pub struct CheckForm {
    /// Generated as `admin-check-<uuid>` when blank.
    pub order_id: String,
    pub expected_amount: i64,
    pub txn_id: String,
    pub payer_phone: String,
    /// Overrides the client's default key when set.
    pub api_key: String,
    pub max_age_minutes: Option<u32>,
}

impl Default for CheckForm {
    fn default() -> Self {
        Self {
            order_id: String::new(),
            expected_amount: 10,
            txn_id: String::new(),
            payer_phone: String::new(),
            api_key: String::new(),
            max_age_minutes: None,
        }
    }
}

/// A matched payment waiting to be confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub payment_id: i64,
    pub confirm_token: ConfirmToken,
    api_key: Option<String>,
}

#[derive(Debug, Default)]
pub struct PaymentsCheckView {
    pub form: CheckForm,
    pub field_errors: FieldErrors,
    pub checking: bool,
    pub confirming: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub last_order_id: Option<String>,
    pub last_check: Option<PaymentCheckResponse>,
    pub pending: Option<PendingConfirmation>,
    pub last_confirm: Option<PaymentConfirmResponse>,
}

pub fn generate_order_id() -> String {
    format!("admin-check-{}", Uuid::new_v4())
}

/// `Status <code>: <detail>` for rejected requests, `fallback` otherwise.
fn request_error(e: &ApiError, fallback: &str) -> String {
    match e.status() {
        Some(status) => {
            let detail = e
                .detail()
                .map(str::to_string)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            format!("Status {}: {detail}", status.as_u16())
        }
        None => fallback.to_string(),
    }
}

impl PaymentsCheckView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn check(&mut self, client: &AdminClient) -> Option<PaymentCheckResponse> {
        self.error = None;
        self.notice = None;
        self.last_check = None;
        self.last_confirm = None;
        self.pending = None;
        self.field_errors.clear();

        if self.form.expected_amount <= 0 {
            self.field_errors
                .insert(AMOUNT_FIELD, "Expected amount must be greater than zero");
            return None;
        }

        let order_id = non_blank(&self.form.order_id).unwrap_or_else(generate_order_id);
        let api_key = non_blank(&self.form.api_key);
        let payload = PaymentCheckRequest {
            order_id: order_id.clone(),
            expected_amount: self.form.expected_amount,
            txn_id: non_blank(&self.form.txn_id),
            payer_phone: non_blank(&self.form.payer_phone),
            max_age_minutes: self.form.max_age_minutes,
        };
        self.last_order_id = Some(order_id.clone());

        self.checking = true;
        let result = client.check_payment(api_key.as_deref(), &payload).await;
        self.checking = false;

        match result {
            Ok(verdict) => {
                info!(
                    order_id = %order_id,
                    found = verdict.found,
                    matched = verdict.matched,
                    "payment check completed"
                );
                self.pending = match (&verdict.confirm_token, &verdict.payment) {
                    (Some(token), Some(payment)) if verdict.found && verdict.matched => {
                        Some(PendingConfirmation {
                            payment_id: payment.payment_id,
                            confirm_token: token.clone(),
                            api_key: api_key.clone(),
                        })
                    }
                    _ => None,
                };
                self.notice = Some(if self.pending.is_some() {
                    "Payment matched; confirm token issued".to_string()
                } else if verdict.found {
                    format!(
                        "Payment found but not matched ({})",
                        or_dash(verdict.reason.as_deref())
                    )
                } else {
                    "No matching payment found".to_string()
                });
                self.last_check = Some(verdict.clone());
                Some(verdict)
            }
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "payment check failed");
                self.error = Some(request_error(&e, "Failed to check payment"));
                None
            }
        }
    }

    /// Confirm the pending match from the last check.
    pub async fn confirm(&mut self, client: &AdminClient) -> Option<PaymentConfirmResponse> {
        let Some(pending) = self.pending.clone() else {
            self.error = Some("No matched payment to confirm; run a check first".to_string());
            return None;
        };
        self.confirm_token(
            client,
            pending.api_key.as_deref(),
            pending.payment_id,
            pending.confirm_token,
        )
        .await
    }

    /// Confirm an explicit payment id and token.
    pub async fn confirm_token(
        &mut self,
        client: &AdminClient,
        api_key: Option<&str>,
        payment_id: i64,
        confirm_token: ConfirmToken,
    ) -> Option<PaymentConfirmResponse> {
        self.error = None;
        self.notice = None;
        self.last_confirm = None;

        let payload = PaymentConfirmRequest {
            payment_id,
            confirm_token,
        };
        self.confirming = true;
        let result = client.confirm_payment(api_key, &payload).await;
        self.confirming = false;

        match result {
            Ok(response) => {
                if response.success && !response.already_used {
                    info!(payment_id, "payment confirmed");
                    self.notice = Some(format!("Payment {payment_id} confirmed"));
                } else if response.already_used {
                    warn!(payment_id, "confirm token already used");
                    self.error = Some("Confirm rejected: token already used".to_string());
                } else {
                    warn!(payment_id, "confirm rejected");
                    self.error = Some("Confirm rejected by backend".to_string());
                }
                self.last_confirm = Some(response.clone());
                Some(response)
            }
            Err(e) => {
                warn!(payment_id, error = %e, "payment confirm failed");
                self.error = Some(request_error(&e, "Failed to confirm payment"));
                None
            }
        }
    }
}

impl View for PaymentsCheckView {
    fn title(&self) -> &'static str {
        "Payments (check & verify)"
    }

    fn render(&self) -> String {
        let mut out = String::new();
        render_header(
            &mut out,
            self.title(),
            self.checking || self.confirming,
            self.error.as_deref(),
            self.notice.as_deref(),
            &self.field_errors,
        );

        if let Some(order_id) = &self.last_order_id {
            out.push_str(&format!("Order: {order_id}\n"));
        }
        out.push_str(&format!("Expected amount: {}\n", self.form.expected_amount));
        if let Some(txn) = non_blank(&self.form.txn_id) {
            out.push_str(&format!("Txn ID: {txn}\n"));
        }

        if let Some(verdict) = &self.last_check {
            out.push_str(&format!(
                "\nFound: {}\nMatch: {}\nReason: {}\n",
                verdict.found,
                verdict.matched,
                or_dash(verdict.reason.as_deref())
            ));
            if let Some(payment) = &verdict.payment {
                out.push_str(&format!(
                    "Payment: #{} {} {} (txn {}) at {}\n",
                    payment.payment_id,
                    payment.amount,
                    payment.currency,
                    or_dash(payment.txn_id.as_deref()),
                    payment.created_at.format("%Y-%m-%d %H:%M:%S")
                ));
            }
        }
        if let Some(pending) = &self.pending {
            out.push_str(&format!(
                "Confirm token: {} (payment {})\n",
                pending.confirm_token, pending.payment_id
            ));
        }
        if let Some(confirm) = &self.last_confirm {
            out.push_str(&format!(
                "\nConfirm: success={} already_used={} status={}\n",
                confirm.success,
                confirm.already_used,
                or_dash(confirm.status.as_deref())
            ));
        }
        out
    }

    fn error(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.field_errors.get(AMOUNT_FIELD))
    }
}
