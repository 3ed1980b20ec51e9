// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process fake of the gateway backend for tests.
//!
//! Serves the admin and payment endpoints the console consumes from an
//! `axum` router bound to an ephemeral loopback port, keeps its data in
//! memory, and records every request so tests can assert that local
//! validation never reached the network.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::AdminClient;
use crate::models::{
    Channel, Company, CompanyPayload, CompanySummary, ConfirmToken, Country, CountryCreate,
    CountryWithProviders, OnboardingDocument, PaymentCheckRequest, PaymentCheckResponse,
    PaymentConfirmRequest, PaymentConfirmResponse, PaymentMatch, PaymentPage, PaymentProvider,
    PaymentProviderCreate, PaymentRecord, Wallet, WalletCreate, WalletUpdate,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredPayment {
    record: PaymentRecord,
    confirm_token: Option<String>,
}

#[derive(Debug)]
struct FakeState {
    healthy: bool,
    /// Answer a reused confirm token with 409 instead of `already_used`.
    reject_reused_confirm: bool,
    next_id: i64,
    countries: Vec<Country>,
    providers: Vec<PaymentProvider>,
    companies: Vec<Company>,
    wallets: Vec<Wallet>,
    payments: Vec<StoredPayment>,
    requests: Vec<RecordedRequest>,
}

impl FakeState {
    fn new() -> Self {
        Self {
            healthy: true,
            reject_reused_confirm: false,
            next_id: 1,
            countries: Vec::new(),
            providers: Vec::new(),
            companies: Vec::new(),
            wallets: Vec::new(),
            payments: Vec::new(),
            requests: Vec::new(),
        }
    }

    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn company_out(&self, company: &Company) -> Company {
        let mut out = company.clone();
        out.wallets = self
            .wallets
            .iter()
            .filter(|w| w.company_id == Some(company.id))
            .cloned()
            .collect();
        out
    }

    fn company_index(&self, id: i64) -> Result<usize, Rejection> {
        self.companies
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Company not found"))
    }

    fn build_channels(
        &mut self,
        company_name: &str,
        existing: &[Channel],
        codes: &[String],
    ) -> Result<Vec<Channel>, Rejection> {
        let mut channels = Vec::new();
        for code in codes {
            if let Some(kept) = existing
                .iter()
                .find(|ch| ch.provider_code.as_deref() == Some(code.as_str()))
            {
                channels.push(kept.clone());
                continue;
            }
            let provider = self
                .providers
                .iter()
                .find(|p| &p.code == code)
                .cloned()
                .ok_or_else(|| {
                    reject(StatusCode::BAD_REQUEST, &format!("Unknown provider code: {code}"))
                })?;
            let id = self.next_id();
            channels.push(Channel {
                id,
                name: format!("{company_name} - {}", provider.name),
                provider_code: Some(provider.code.clone()),
                provider_name: Some(provider.name.clone()),
                channel_api_key: Some(format!("ck_{}", Uuid::new_v4().simple())),
                telegram_group_id: None,
                is_active: true,
            });
        }
        Ok(channels)
    }

    fn company_for_key(&self, headers: &HeaderMap) -> Result<i64, Rejection> {
        let key = headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid or missing API key"))?;
        self.companies
            .iter()
            .find(|c| {
                c.api_key.as_deref() == Some(key)
                    || c.channels
                        .iter()
                        .any(|ch| ch.channel_api_key.as_deref() == Some(key))
            })
            .map(|c| c.id)
            .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Invalid or missing API key"))
    }
}

type Shared = Arc<Mutex<FakeState>>;
type Rejection = (StatusCode, Json<Value>);

fn reject(status: StatusCode, detail: &str) -> Rejection {
    (status, Json(json!({ "detail": detail })))
}

fn lock(state: &Shared) -> MutexGuard<'_, FakeState> {
    state.lock().expect("fake backend state poisoned")
}

/// Handle to a running fake backend.
#[derive(Clone)]
pub struct FakeBackend {
    addr: SocketAddr,
    state: Shared,
}

impl FakeBackend {
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState::new()));
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("fake backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend server");
        });
        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> AdminClient {
        AdminClient::with_base_url(&self.base_url()).expect("fake backend client")
    }

    pub fn set_healthy(&self, healthy: bool) {
        lock(&self.state).healthy = healthy;
    }

    pub fn set_reject_reused_confirm(&self, reject: bool) {
        lock(&self.state).reject_reused_confirm = reject;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.state).requests.len()
    }

    /// Requests whose method and path match exactly.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn seed_country(&self, code: &str, name: &str) -> Country {
        let mut state = lock(&self.state);
        let country = Country {
            id: state.next_id(),
            code: code.to_string(),
            name: name.to_string(),
        };
        state.countries.push(country.clone());
        country
    }

    pub fn seed_provider(&self, code: &str, name: &str, country_code: Option<&str>) -> PaymentProvider {
        let mut state = lock(&self.state);
        let provider = PaymentProvider {
            id: state.next_id(),
            code: code.to_string(),
            name: name.to_string(),
            description: None,
            country_code: country_code.map(str::to_string),
        };
        state.providers.push(provider.clone());
        provider
    }

    /// Seed a company, creating any missing providers on the way.
    pub fn seed_company(&self, name: &str, country_code: Option<&str>, provider_codes: &[&str]) -> Company {
        for code in provider_codes {
            let known = lock(&self.state).providers.iter().any(|p| p.code == *code);
            if !known {
                self.seed_provider(code, &code.to_uppercase(), country_code);
            }
        }
        let mut state = lock(&self.state);
        let codes: Vec<String> = provider_codes.iter().map(|c| c.to_string()).collect();
        let channels = state
            .build_channels(name, &[], &codes)
            .expect("seeded providers exist");
        let company = Company {
            id: state.next_id(),
            name: name.to_string(),
            api_key: Some(format!("ak_{}", Uuid::new_v4().simple())),
            country_code: country_code.map(str::to_string),
            telegram_bot_token: None,
            telegram_default_group_id: None,
            is_active: true,
            channels,
            wallets: Vec::new(),
        };
        state.companies.push(company.clone());
        company
    }

    pub fn seed_wallet(&self, company_id: i64, channel_id: i64, label: &str, daily_limit: f64) -> Wallet {
        let mut state = lock(&self.state);
        let wallet = Wallet {
            id: state.next_id(),
            company_id: Some(company_id),
            channel_id: Some(channel_id),
            wallet_label: label.to_string(),
            wallet_identifier: format!("{label}-id"),
            daily_limit: Some(daily_limit),
            used_today: Some(0.0),
            is_active: true,
            channel_name: None,
            provider_code: None,
            provider_name: None,
        };
        state.wallets.push(wallet.clone());
        wallet
    }

    /// Seed a payment created one minute ago; returns its id.
    pub fn seed_payment(&self, company_id: i64, txn_id: Option<&str>, amount: i64, status: &str) -> i64 {
        let mut state = lock(&self.state);
        let id = state.next_id();
        let company_name = state
            .companies
            .iter()
            .find(|c| c.id == company_id)
            .map(|c| c.name.clone());
        state.payments.push(StoredPayment {
            record: PaymentRecord {
                payment_id: id,
                company_id: Some(company_id),
                company_name,
                channel_id: None,
                channel_name: None,
                wallet_id: None,
                txn_id: txn_id.map(str::to_string),
                amount,
                currency: "AED".to_string(),
                status: status.to_string(),
                payer_phone: None,
                created_at: Utc::now() - Duration::minutes(1) + Duration::milliseconds(id),
                used_at: None,
            },
            confirm_token: None,
        });
        id
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/admin/geo/countries", get(list_countries).post(create_country))
        .route("/admin/geo/countries/{code}/providers", get(country_providers))
        .route(
            "/admin/payment-providers",
            get(list_providers).post(create_provider),
        )
        .route("/admin/companies/", get(list_companies).post(create_company))
        .route("/admin/companies/{id}", get(get_company).put(update_company))
        .route("/admin/companies/{id}/toggle", post(toggle_company))
        .route("/admin/companies/{id}/onboarding-pdf", post(onboarding))
        .route(
            "/admin/companies/{id}/wallets",
            get(list_wallets).post(create_wallet),
        )
        .route("/admin/wallets/{id}", put(update_wallet))
        .route("/admin/wallets/{id}/toggle", post(toggle_wallet))
        .route("/payments/check", post(check_payment))
        .route("/payments/confirm", post(confirm_payment))
        .route("/admin/payments/", get(search_payments))
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .with_state(state)
}

async fn record_request(State(state): State<Shared>, request: Request, next: Next) -> Response {
    {
        let recorded = RecordedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            api_key: request
                .headers()
                .get("x-api-key")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        };
        lock(&state).requests.push(recorded);
    }
    next.run(request).await
}

async fn health(State(state): State<Shared>) -> Response {
    if lock(&state).healthy {
        Json(json!({ "status": "ok" })).into_response()
    } else {
        reject(StatusCode::SERVICE_UNAVAILABLE, "Service unavailable").into_response()
    }
}

async fn list_countries(State(state): State<Shared>) -> Json<Vec<Country>> {
    Json(lock(&state).countries.clone())
}

async fn create_country(
    State(state): State<Shared>,
    Json(body): Json<CountryCreate>,
) -> Result<(StatusCode, Json<Country>), Rejection> {
    let mut state = lock(&state);
    if body.code.trim().is_empty() || body.name.trim().is_empty() {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "code and name are required"));
    }
    if state.countries.iter().any(|c| c.code == body.code) {
        return Err(reject(StatusCode::BAD_REQUEST, "Country already exists"));
    }
    let country = Country {
        id: state.next_id(),
        code: body.code,
        name: body.name,
    };
    state.countries.push(country.clone());
    Ok((StatusCode::CREATED, Json(country)))
}

async fn country_providers(
    State(state): State<Shared>,
    Path(code): Path<String>,
) -> Result<Json<CountryWithProviders>, Rejection> {
    let state = lock(&state);
    let country = state
        .countries
        .iter()
        .find(|c| c.code == code)
        .cloned()
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Country not found"))?;
    let providers = state
        .providers
        .iter()
        .filter(|p| p.country_code.as_deref() == Some(code.as_str()))
        .cloned()
        .collect();
    Ok(Json(CountryWithProviders { country, providers }))
}

async fn list_providers(State(state): State<Shared>) -> Json<Vec<PaymentProvider>> {
    Json(lock(&state).providers.clone())
}

async fn create_provider(
    State(state): State<Shared>,
    Json(body): Json<PaymentProviderCreate>,
) -> Result<(StatusCode, Json<PaymentProvider>), Rejection> {
    let mut state = lock(&state);
    if state.providers.iter().any(|p| p.code == body.code) {
        return Err(reject(StatusCode::BAD_REQUEST, "Payment provider already exists"));
    }
    if let Some(code) = &body.country_code {
        if !state.countries.iter().any(|c| &c.code == code) {
            return Err(reject(StatusCode::BAD_REQUEST, "Country not found"));
        }
    }
    let provider = PaymentProvider {
        id: state.next_id(),
        code: body.code,
        name: body.name,
        description: body.description,
        country_code: body.country_code,
    };
    state.providers.push(provider.clone());
    Ok((StatusCode::CREATED, Json(provider)))
}

async fn list_companies(State(state): State<Shared>) -> Json<Vec<CompanySummary>> {
    let state = lock(&state);
    Json(
        state
            .companies
            .iter()
            .map(|c| CompanySummary {
                id: c.id,
                name: c.name.clone(),
                country_code: c.country_code.clone(),
                api_key: c.api_key.clone(),
                is_active: c.is_active,
            })
            .collect(),
    )
}

async fn create_company(
    State(state): State<Shared>,
    Json(body): Json<CompanyPayload>,
) -> Result<(StatusCode, Json<Company>), Rejection> {
    let mut state = lock(&state);
    if body.name.trim().is_empty() {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "name is required"));
    }
    let channels = state.build_channels(&body.name, &[], &body.provider_codes)?;
    let company = Company {
        id: state.next_id(),
        name: body.name,
        api_key: Some(format!("ak_{}", Uuid::new_v4().simple())),
        country_code: body.country_code,
        telegram_bot_token: body.telegram_bot_token,
        telegram_default_group_id: body.telegram_default_group_id,
        is_active: true,
        channels,
        wallets: Vec::new(),
    };
    state.companies.push(company.clone());
    Ok((StatusCode::CREATED, Json(company)))
}

async fn get_company(
    State(state): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<Company>, Rejection> {
    let state = lock(&state);
    let idx = state.company_index(id)?;
    Ok(Json(state.company_out(&state.companies[idx])))
}

async fn update_company(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<CompanyPayload>,
) -> Result<Json<Company>, Rejection> {
    let mut state = lock(&state);
    let idx = state.company_index(id)?;
    let existing = state.companies[idx].channels.clone();
    let channels = state.build_channels(&body.name, &existing, &body.provider_codes)?;
    let company = &mut state.companies[idx];
    company.name = body.name;
    company.country_code = body.country_code;
    company.telegram_bot_token = body.telegram_bot_token;
    company.telegram_default_group_id = body.telegram_default_group_id;
    company.channels = channels;
    let company = company.clone();
    Ok(Json(state.company_out(&company)))
}

async fn toggle_company(
    State(state): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<Company>, Rejection> {
    let mut state = lock(&state);
    let idx = state.company_index(id)?;
    state.companies[idx].is_active = !state.companies[idx].is_active;
    let company = state.companies[idx].clone();
    Ok(Json(state.company_out(&company)))
}

async fn onboarding(
    State(state): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<OnboardingDocument>, Rejection> {
    let state = lock(&state);
    let idx = state.company_index(id)?;
    if !state.companies[idx].is_active {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Company must be active to generate onboarding",
        ));
    }
    Ok(Json(OnboardingDocument {
        pdf_url: Some(format!("/onboarding/company-{id}.pdf")),
        html_url: Some(format!("/onboarding/company-{id}.html")),
        html_fallback: false,
    }))
}

async fn list_wallets(
    State(state): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Wallet>>, Rejection> {
    let state = lock(&state);
    state.company_index(id)?;
    Ok(Json(
        state
            .wallets
            .iter()
            .filter(|w| w.company_id == Some(id))
            .cloned()
            .collect(),
    ))
}

async fn create_wallet(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<WalletCreate>,
) -> Result<(StatusCode, Json<Wallet>), Rejection> {
    let mut state = lock(&state);
    let idx = state.company_index(id)?;
    let channel = state.companies[idx]
        .channels
        .iter()
        .find(|ch| ch.id == body.channel_id)
        .cloned()
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Channel does not belong to company"))?;
    if body.daily_limit.is_some_and(|limit| limit <= 0.0) {
        return Err(reject(
            StatusCode::UNPROCESSABLE_ENTITY,
            "daily_limit must be greater than zero",
        ));
    }
    let wallet = Wallet {
        id: state.next_id(),
        company_id: Some(id),
        channel_id: Some(channel.id),
        wallet_label: body.wallet_label,
        wallet_identifier: body.wallet_identifier,
        daily_limit: body.daily_limit,
        used_today: Some(0.0),
        is_active: body.is_active.unwrap_or(true),
        channel_name: Some(channel.name),
        provider_code: channel.provider_code,
        provider_name: channel.provider_name,
    };
    state.wallets.push(wallet.clone());
    Ok((StatusCode::CREATED, Json(wallet)))
}

fn wallet_index(state: &FakeState, id: i64) -> Result<usize, Rejection> {
    state
        .wallets
        .iter()
        .position(|w| w.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Wallet not found"))
}

async fn update_wallet(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<WalletUpdate>,
) -> Result<Json<Wallet>, Rejection> {
    let mut state = lock(&state);
    let idx = wallet_index(&state, id)?;
    let wallet = &mut state.wallets[idx];
    if let Some(label) = body.wallet_label {
        wallet.wallet_label = label;
    }
    if let Some(identifier) = body.wallet_identifier {
        wallet.wallet_identifier = identifier;
    }
    if let Some(limit) = body.daily_limit {
        wallet.daily_limit = Some(limit);
    }
    if let Some(active) = body.is_active {
        wallet.is_active = active;
    }
    Ok(Json(wallet.clone()))
}

async fn toggle_wallet(
    State(state): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<Wallet>, Rejection> {
    let mut state = lock(&state);
    let idx = wallet_index(&state, id)?;
    state.wallets[idx].is_active = !state.wallets[idx].is_active;
    Ok(Json(state.wallets[idx].clone()))
}

async fn check_payment(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<PaymentCheckRequest>,
) -> Result<Json<PaymentCheckResponse>, Rejection> {
    let mut state = lock(&state);
    let company_id = state.company_for_key(&headers)?;
    let cutoff = Utc::now() - Duration::minutes(i64::from(body.max_age_minutes.unwrap_or(30)));

    let candidate = state
        .payments
        .iter_mut()
        .filter(|p| p.record.company_id == Some(company_id))
        .filter(|p| p.record.status != "used" && p.record.created_at >= cutoff)
        .filter(|p| body.txn_id.is_none() || p.record.txn_id == body.txn_id)
        .max_by_key(|p| p.record.created_at);

    let Some(payment) = candidate else {
        return Ok(Json(PaymentCheckResponse {
            found: false,
            matched: false,
            reason: None,
            confirm_token: None,
            order_id: Some(body.order_id),
            payment: None,
        }));
    };

    let info = PaymentMatch {
        payment_id: payment.record.payment_id,
        txn_id: payment.record.txn_id.clone(),
        amount: payment.record.amount,
        currency: payment.record.currency.clone(),
        created_at: payment.record.created_at,
    };

    if payment.record.amount != body.expected_amount {
        return Ok(Json(PaymentCheckResponse {
            found: true,
            matched: false,
            reason: Some("amount_mismatch".to_string()),
            confirm_token: None,
            order_id: Some(body.order_id),
            payment: Some(info),
        }));
    }

    let token = Uuid::new_v4().simple().to_string();
    payment.record.status = "pending_confirmation".to_string();
    payment.confirm_token = Some(token.clone());

    Ok(Json(PaymentCheckResponse {
        found: true,
        matched: true,
        reason: None,
        confirm_token: Some(ConfirmToken::from(token)),
        order_id: Some(body.order_id),
        payment: Some(info),
    }))
}

async fn confirm_payment(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<PaymentConfirmRequest>,
) -> Result<Json<PaymentConfirmResponse>, Rejection> {
    let mut state = lock(&state);
    let company_id = state.company_for_key(&headers)?;
    let reject_reused = state.reject_reused_confirm;
    let payment = state
        .payments
        .iter_mut()
        .find(|p| p.record.payment_id == body.payment_id && p.record.company_id == Some(company_id))
        .filter(|p| p.confirm_token.as_deref() == Some(body.confirm_token.as_str()))
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Invalid payment_id or confirm_token"))?;

    if payment.record.status == "used" {
        if reject_reused {
            return Err(reject(StatusCode::CONFLICT, "Confirm token already used"));
        }
        return Ok(Json(PaymentConfirmResponse {
            success: true,
            already_used: true,
            payment_id: Some(payment.record.payment_id),
            status: Some(payment.record.status.clone()),
        }));
    }

    payment.record.status = "used".to_string();
    payment.record.used_at = Some(Utc::now());
    Ok(Json(PaymentConfirmResponse {
        success: true,
        already_used: false,
        payment_id: Some(payment.record.payment_id),
        status: Some(payment.record.status.clone()),
    }))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    page: Option<u32>,
    page_size: Option<u32>,
    status: Option<String>,
    min_amount: Option<f64>,
    max_amount: Option<f64>,
    created_from: Option<DateTime<Utc>>,
    created_to: Option<DateTime<Utc>>,
    company_id: Option<i64>,
    channel_id: Option<i64>,
    wallet_id: Option<i64>,
    txn_id: Option<String>,
}

async fn search_payments(
    State(state): State<Shared>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<PaymentPage>, Rejection> {
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(50);
    if page < 1 || !(1..=200).contains(&page_size) {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "invalid pagination"));
    }

    let state = lock(&state);
    let mut matching: Vec<PaymentRecord> = state
        .payments
        .iter()
        .map(|p| &p.record)
        .filter(|r| query.status.as_ref().is_none_or(|s| &r.status == s))
        .filter(|r| query.min_amount.is_none_or(|min| r.amount as f64 >= min))
        .filter(|r| query.max_amount.is_none_or(|max| r.amount as f64 <= max))
        .filter(|r| query.created_from.is_none_or(|from| r.created_at >= from))
        .filter(|r| query.created_to.is_none_or(|to| r.created_at <= to))
        .filter(|r| query.company_id.is_none_or(|id| r.company_id == Some(id)))
        .filter(|r| query.channel_id.is_none_or(|id| r.channel_id == Some(id)))
        .filter(|r| query.wallet_id.is_none_or(|id| r.wallet_id == Some(id)))
        .filter(|r| query.txn_id.as_ref().is_none_or(|t| r.txn_id.as_ref() == Some(t)))
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = matching.len() as u64;
    let start = ((page - 1) as usize).saturating_mul(page_size as usize);
    let items = matching
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    Ok(Json(PaymentPage {
        items,
        total,
        page,
        page_size: Some(page_size),
    }))
}
