// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response shapes exchanged with the gateway backend. These
//! are pass-through mirrors of backend resources; the console adds no
//! derived state to them.
//!
//! ## Confirm Token Type
//!
//! The [`ConfirmToken`] newtype wraps the one-time value the backend issues
//! when a payment check matches. It is opaque to the console and must be
//! sent back exactly as received.
//!
//! ## Model Categories
//!
//! - **Geography**: countries and payment providers
//! - **Companies**: companies and their channels
//! - **Wallets**: receiving wallets attached to channels
//! - **Payments**: check/confirm handshake and history search

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Confirm Token Type
// =============================================================================

/// One-time confirmation token issued by `/payments/check`.
///
/// # Example
///
/// ```rust,ignore
/// let token = ConfirmToken::from("Zk3...");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ConfirmToken(pub String);

impl ConfirmToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConfirmToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ConfirmToken {
    fn from(value: String) -> Self {
        ConfirmToken(value)
    }
}

impl From<&str> for ConfirmToken {
    fn from(value: &str) -> Self {
        ConfirmToken(value.to_string())
    }
}

// =============================================================================
// Geography Models
// =============================================================================

/// A country known to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub id: i64,
    /// Natural key (e.g. `AE`), referenced by providers and companies.
    pub code: String,
    pub name: String,
}

/// Request to create a country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryCreate {
    pub code: String,
    pub name: String,
}

/// A payment provider, optionally scoped to one country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentProvider {
    pub id: i64,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Request to create a payment provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentProviderCreate {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// A country together with the providers available in it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryWithProviders {
    pub country: Country,
    #[serde(default)]
    pub providers: Vec<PaymentProvider>,
}

// =============================================================================
// Company Models
// =============================================================================

/// A company's integration with one payment provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub provider_code: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub channel_api_key: Option<String>,
    #[serde(default)]
    pub telegram_group_id: Option<String>,
    pub is_active: bool,
}

impl Channel {
    /// Label used in channel pickers: provider name, then provider code,
    /// then `Channel <id>`.
    pub fn display_label(&self) -> String {
        self.provider_name
            .clone()
            .or_else(|| self.provider_code.clone())
            .unwrap_or_else(|| format!("Channel {}", self.id))
    }
}

/// Row of the company list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanySummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub country_code: Option<String>,
    /// Only some backend versions include the key in list rows.
    #[serde(default)]
    pub api_key: Option<String>,
    pub is_active: bool,
}

/// Full company record returned by detail, create, update and toggle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub telegram_bot_token: Option<String>,
    #[serde(default)]
    pub telegram_default_group_id: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub wallets: Vec<Wallet>,
}

impl Company {
    /// Provider codes of the company's existing channels, in channel order.
    pub fn channel_provider_codes(&self) -> Vec<String> {
        self.channels
            .iter()
            .filter_map(|ch| ch.provider_code.clone())
            .filter(|code| !code.is_empty())
            .collect()
    }
}

/// Request body for both company create and company update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_bot_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_default_group_id: Option<String>,
    pub provider_codes: Vec<String>,
}

/// Result of onboarding document generation.
///
/// When PDF rendering is unavailable the backend still produces the HTML
/// version and sets `html_fallback`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OnboardingDocument {
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub html_fallback: bool,
}

impl OnboardingDocument {
    /// The link an operator should open: the PDF when there is one.
    pub fn download_url(&self) -> Option<&str> {
        self.pdf_url.as_deref().or(self.html_url.as_deref())
    }
}

// =============================================================================
// Wallet Models
// =============================================================================

/// A receiving wallet attached to a company channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wallet {
    pub id: i64,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub channel_id: Option<i64>,
    pub wallet_label: String,
    pub wallet_identifier: String,
    #[serde(default)]
    pub daily_limit: Option<f64>,
    #[serde(default)]
    pub used_today: Option<f64>,
    pub is_active: bool,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub provider_code: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
}

/// Request to create a wallet for a company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletCreate {
    pub channel_id: i64,
    pub wallet_label: String,
    pub wallet_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Partial wallet update; absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WalletUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl WalletUpdate {
    pub fn is_empty(&self) -> bool {
        self == &WalletUpdate::default()
    }
}

// =============================================================================
// Payment Models
// =============================================================================

/// Body of `POST /payments/check`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentCheckRequest {
    pub order_id: String,
    pub expected_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txn_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_minutes: Option<u32>,
}

/// Payment details attached to a check verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentMatch {
    pub payment_id: i64,
    #[serde(default)]
    pub txn_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Verdict of `POST /payments/check`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentCheckResponse {
    pub found: bool,
    #[serde(rename = "match")]
    pub matched: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub confirm_token: Option<ConfirmToken>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub payment: Option<PaymentMatch>,
}

/// Body of `POST /payments/confirm`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentConfirmRequest {
    pub payment_id: i64,
    pub confirm_token: ConfirmToken,
}

/// Result of `POST /payments/confirm`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentConfirmResponse {
    pub success: bool,
    #[serde(default)]
    pub already_used: bool,
    #[serde(default)]
    pub payment_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One row of the payment history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRecord {
    pub payment_id: i64,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub channel_id: Option<i64>,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub wallet_id: Option<i64>,
    #[serde(default)]
    pub txn_id: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub payer_phone: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub used_at: Option<DateTime<Utc>>,
}

/// One page of the payment history search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentPage {
    #[serde(default)]
    pub items: Vec<PaymentRecord>,
    pub total: u64,
    pub page: u32,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Query parameters of the admin payment search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PaymentSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txn_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<i64>,
    pub page: u32,
    pub page_size: u32,
}

// =============================================================================
// Timestamps
// =============================================================================

/// Backend timestamps are ISO-8601, with or without an offset. Values
/// without an offset are UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de::Error, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}"))),
                None => Ok(None),
            }
        }
    }
}
