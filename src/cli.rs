// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Command line surface.
//!
//! Every command drives a view, so validation and error messages are the
//! same as in the routed console. A command whose view ends in an error
//! state reports failure through [`Outcome::ok`].

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};

use crate::api::AdminClient;
use crate::health::HealthStatus;
use crate::models::{timestamp, ConfirmToken, WalletUpdate};
use crate::router::RouteError;
use crate::shell::Shell;
use crate::views::company_wallets::WalletForm;
use crate::views::payments_history::{HistoryFilter, ANY_STATUS, DEFAULT_PAGE_SIZE};
use crate::views::{
    CompaniesListView, CompanyFormView, CompanyWalletsView, CountriesView, FormMode,
    PaymentProvidersView, PaymentsCheckView, PaymentsHistoryView, View,
};

#[derive(Debug, Parser)]
#[command(name = "gateway-admin")]
#[command(about = "Payment Gateway Admin - back office console", long_about = None)]
pub struct Cli {
    /// Backend origin, overrides ADMIN_API_BASE_URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Company or channel key sent as X-API-Key, overrides ADMIN_API_KEY
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a console path, e.g. /companies/3/wallets
    Open {
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Probe backend health
    Health,

    /// Country management
    #[command(subcommand)]
    Countries(CountryCommands),

    /// Payment provider management
    #[command(subcommand)]
    Providers(ProviderCommands),

    /// Company management
    #[command(subcommand)]
    Companies(CompanyCommands),

    /// Company wallet management
    #[command(subcommand)]
    Wallets(WalletCommands),

    /// Payment check/confirm and history
    #[command(subcommand)]
    Payments(PaymentCommands),
}

#[derive(Debug, Subcommand)]
pub enum CountryCommands {
    /// List countries
    List,

    /// Create a country
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProviderCommands {
    /// List payment providers
    List,

    /// Create a payment provider
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Country code the provider is limited to
        #[arg(long)]
        country: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompanyFields {
    #[arg(long)]
    pub name: Option<String>,

    /// Country code; loads that country's providers
    #[arg(long)]
    pub country: Option<String>,

    /// Provider code to enable, repeatable
    #[arg(long = "provider", value_name = "CODE")]
    pub providers: Vec<String>,

    /// Enable every provider available in the country
    #[arg(long)]
    pub all_providers: bool,

    #[arg(long)]
    pub telegram_bot_token: Option<String>,

    #[arg(long)]
    pub telegram_group: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CompanyCommands {
    /// List companies
    List {
        /// Filter by name, country or API key
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a company in the edit form
    Show {
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Create a company
    Create(CompanyFields),

    /// Update a company
    Update {
        #[arg(value_name = "ID")]
        id: i64,
        #[command(flatten)]
        fields: CompanyFields,
    },

    /// Toggle a company's active flag
    Toggle {
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Print a company's full API key
    Key {
        #[arg(value_name = "ID")]
        id: i64,
    },

    /// Generate the onboarding document
    Onboarding {
        #[arg(value_name = "ID")]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum WalletCommands {
    /// List a company's wallets
    List {
        #[arg(value_name = "COMPANY_ID")]
        company_id: i64,
    },

    /// Create a wallet
    Create {
        #[arg(value_name = "COMPANY_ID")]
        company_id: i64,
        #[arg(long = "channel", value_name = "CHANNEL_ID")]
        channel_id: Option<i64>,
        #[arg(long)]
        label: String,
        #[arg(long)]
        identifier: String,
        #[arg(long)]
        daily_limit: Option<f64>,
        /// Create the wallet disabled
        #[arg(long)]
        inactive: bool,
    },

    /// Update a wallet
    Update {
        #[arg(value_name = "COMPANY_ID")]
        company_id: i64,
        #[arg(value_name = "WALLET_ID")]
        wallet_id: i64,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        identifier: Option<String>,
        #[arg(long)]
        daily_limit: Option<f64>,
        #[arg(long)]
        active: Option<bool>,
    },

    /// Toggle a wallet's active flag
    Toggle {
        #[arg(value_name = "COMPANY_ID")]
        company_id: i64,
        #[arg(value_name = "WALLET_ID")]
        wallet_id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum PaymentCommands {
    /// Check for a payment matching an order
    Check {
        #[arg(long)]
        amount: i64,
        /// Generated when omitted
        #[arg(long)]
        order_id: Option<String>,
        #[arg(long)]
        txn_id: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        max_age_minutes: Option<u32>,
        /// Confirm immediately when the check matches
        #[arg(long)]
        confirm: bool,
    },

    /// Consume a confirm token
    Confirm {
        #[arg(long)]
        payment_id: i64,
        #[arg(long)]
        token: String,
    },

    /// Search payment history
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[arg(long)]
    pub txn_id: Option<String>,
    #[arg(long)]
    pub min_amount: Option<f64>,
    #[arg(long)]
    pub max_amount: Option<f64>,
    #[arg(long, default_value = ANY_STATUS)]
    pub status: String,
    /// Start of the creation range (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_from)]
    pub from: Option<DateTime<Utc>>,
    /// End of the creation range (RFC 3339 or YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_to)]
    pub to: Option<DateTime<Utc>>,
    #[arg(long)]
    pub company: Option<i64>,
    #[arg(long)]
    pub channel: Option<i64>,
    #[arg(long)]
    pub wallet: Option<i64>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
}

fn parse_date_bound(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>, String> {
    if let Some(ts) = timestamp::parse(raw) {
        return Ok(ts);
    }
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("expected RFC 3339 timestamp or YYYY-MM-DD, got {raw:?}"))?;
    let time = if end_of_day {
        date.and_hms_milli_opt(23, 59, 59, 999)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    time.map(|t| t.and_utc())
        .ok_or_else(|| format!("invalid date {raw:?}"))
}

fn parse_from(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_date_bound(raw, false)
}

fn parse_to(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_date_bound(raw, true)
}

/// Result of one command: text for stdout and whether it succeeded.
#[derive(Debug)]
pub struct Outcome {
    pub output: String,
    pub ok: bool,
}

impl Outcome {
    fn framed(shell: &Shell, view: &dyn View) -> Self {
        Self {
            output: shell.render_view(view),
            ok: view.error().is_none(),
        }
    }
}

pub async fn execute(client: &AdminClient, command: Commands) -> Result<Outcome, RouteError> {
    let mut shell = Shell::new();

    let outcome = match command {
        Commands::Open { path } => {
            let view = shell.open(client, &path).await?;
            Outcome::framed(&shell, view.as_view())
        }
        Commands::Health => {
            let status = shell.retry_health(client).await;
            let body = match status {
                HealthStatus::Ok => format!("Backend reachable at {}", client.base_url()),
                _ => format!("Backend unreachable at {}", client.base_url()),
            };
            Outcome {
                output: shell.render(&body),
                ok: status == HealthStatus::Ok,
            }
        }
        Commands::Countries(cmd) => {
            shell.mount(client).await;
            countries(&shell, client, cmd).await
        }
        Commands::Providers(cmd) => {
            shell.mount(client).await;
            providers(&shell, client, cmd).await
        }
        Commands::Companies(cmd) => {
            // The bare key is printed without the shell so it can be piped.
            if !matches!(cmd, CompanyCommands::Key { .. }) {
                shell.mount(client).await;
            }
            companies(&shell, client, cmd).await
        }
        Commands::Wallets(cmd) => {
            shell.mount(client).await;
            wallets(&shell, client, cmd).await
        }
        Commands::Payments(cmd) => {
            shell.mount(client).await;
            payments(&shell, client, cmd).await
        }
    };
    Ok(outcome)
}

async fn countries(shell: &Shell, client: &AdminClient, cmd: CountryCommands) -> Outcome {
    let mut view = CountriesView::new();
    match cmd {
        CountryCommands::List => view.mount(client).await,
        CountryCommands::Create { code, name } => {
            view.form.code = code;
            view.form.name = name;
            view.create(client).await;
        }
    }
    Outcome::framed(shell, &view)
}

async fn providers(shell: &Shell, client: &AdminClient, cmd: ProviderCommands) -> Outcome {
    let mut view = PaymentProvidersView::new();
    view.mount(client).await;
    if let ProviderCommands::Create {
        code,
        name,
        description,
        country,
    } = cmd
    {
        view.form.code = code;
        view.form.name = name;
        view.form.description = description.unwrap_or_default();
        view.form.country_code = country.unwrap_or_default();
        view.create(client).await;
    }
    Outcome::framed(shell, &view)
}

/// Apply command line fields on top of a mounted company form.
async fn fill_company_form(view: &mut CompanyFormView, client: &AdminClient, fields: CompanyFields) {
    if let Some(name) = fields.name {
        view.name = name;
    }
    if let Some(country) = fields.country {
        view.change_country(client, Some(country.as_str())).await;
    }
    if fields.all_providers {
        view.select_all_providers();
    } else if !fields.providers.is_empty() {
        view.clear_all_providers();
        for code in &fields.providers {
            view.toggle_provider(code);
        }
    }
    if let Some(token) = fields.telegram_bot_token {
        view.telegram_bot_token = token;
    }
    if let Some(group) = fields.telegram_group {
        view.telegram_default_group_id = group;
    }
}

async fn companies(shell: &Shell, client: &AdminClient, cmd: CompanyCommands) -> Outcome {
    match cmd {
        CompanyCommands::List { search } => {
            let mut view = CompaniesListView::new();
            view.search = search.unwrap_or_default();
            view.mount(client).await;
            Outcome::framed(shell, &view)
        }
        CompanyCommands::Show { id } => {
            let mut view = CompanyFormView::new(FormMode::Edit(id));
            view.mount(client).await;
            Outcome::framed(shell, &view)
        }
        CompanyCommands::Create(fields) => {
            let mut view = CompanyFormView::new(FormMode::Create);
            view.mount(client).await;
            fill_company_form(&mut view, client, fields).await;
            view.submit(client).await;
            Outcome::framed(shell, &view)
        }
        CompanyCommands::Update { id, fields } => {
            let mut view = CompanyFormView::new(FormMode::Edit(id));
            view.mount(client).await;
            if view.company.is_some() {
                fill_company_form(&mut view, client, fields).await;
                view.submit(client).await;
            }
            Outcome::framed(shell, &view)
        }
        CompanyCommands::Toggle { id } => {
            let mut view = CompaniesListView::new();
            view.mount(client).await;
            view.toggle(client, id).await;
            Outcome::framed(shell, &view)
        }
        CompanyCommands::Onboarding { id } => {
            let mut view = CompaniesListView::new();
            view.mount(client).await;
            view.generate_onboarding(client, id).await;
            Outcome::framed(shell, &view)
        }
        CompanyCommands::Key { id } => {
            let mut view = CompaniesListView::new();
            match view.full_key(client, id).await {
                Some(key) => Outcome {
                    output: format!("{key}\n"),
                    ok: true,
                },
                None => Outcome {
                    output: format!("Error: {}\n", view.error().unwrap_or("No API key")),
                    ok: false,
                },
            }
        }
    }
}

async fn wallets(shell: &Shell, client: &AdminClient, cmd: WalletCommands) -> Outcome {
    let company_id = match &cmd {
        WalletCommands::List { company_id }
        | WalletCommands::Create { company_id, .. }
        | WalletCommands::Update { company_id, .. }
        | WalletCommands::Toggle { company_id, .. } => *company_id,
    };
    let mut view = CompanyWalletsView::new(company_id);
    view.mount(client).await;
    if view.company_id <= 0 {
        return Outcome::framed(shell, &view);
    }

    match cmd {
        WalletCommands::List { .. } => {}
        WalletCommands::Create {
            channel_id,
            label,
            identifier,
            daily_limit,
            inactive,
            ..
        } => {
            view.form = WalletForm {
                wallet_label: label,
                wallet_identifier: identifier,
                daily_limit,
                channel_id,
                is_active: !inactive,
            };
            view.create(client).await;
        }
        WalletCommands::Update {
            wallet_id,
            label,
            identifier,
            daily_limit,
            active,
            ..
        } => {
            let update = WalletUpdate {
                wallet_label: label,
                wallet_identifier: identifier,
                daily_limit,
                is_active: active,
            };
            view.update(client, wallet_id, update).await;
        }
        WalletCommands::Toggle { wallet_id, .. } => {
            view.toggle(client, wallet_id).await;
        }
    }
    Outcome::framed(shell, &view)
}

async fn payments(shell: &Shell, client: &AdminClient, cmd: PaymentCommands) -> Outcome {
    match cmd {
        PaymentCommands::Check {
            amount,
            order_id,
            txn_id,
            phone,
            max_age_minutes,
            confirm,
        } => {
            let mut view = PaymentsCheckView::new();
            view.form.expected_amount = amount;
            view.form.order_id = order_id.unwrap_or_default();
            view.form.txn_id = txn_id.unwrap_or_default();
            view.form.payer_phone = phone.unwrap_or_default();
            view.form.max_age_minutes = max_age_minutes;
            view.check(client).await;
            if confirm && view.pending.is_some() {
                view.confirm(client).await;
            }
            Outcome::framed(shell, &view)
        }
        PaymentCommands::Confirm { payment_id, token } => {
            let mut view = PaymentsCheckView::new();
            view.confirm_token(client, None, payment_id, ConfirmToken::from(token))
                .await;
            Outcome::framed(shell, &view)
        }
        PaymentCommands::History(args) => {
            let mut view = PaymentsHistoryView::new();
            view.filter = HistoryFilter {
                txn_id: args.txn_id.unwrap_or_default(),
                min_amount: args.min_amount,
                max_amount: args.max_amount,
                status: args.status,
                created_from: args.from,
                created_to: args.to,
                company_id: args.company,
                channel_id: args.channel,
                wallet_id: args.wallet,
            };
            view.page = args.page;
            view.page_size = args.page_size;
            view.search(client).await;
            Outcome::framed(shell, &view)
        }
    }
}
