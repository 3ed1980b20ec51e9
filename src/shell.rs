// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Header, navigation and health badge around the routed view.

use tracing::info;

use crate::api::AdminClient;
use crate::health::{HealthProbe, HealthStatus};
use crate::router::{Route, RouteError, NAV_ITEMS};
use crate::views::{
    CompaniesListView, CompanyFormView, CompanyWalletsView, CountriesView, FormMode,
    PaymentProvidersView, PaymentsCheckView, PaymentsHistoryView, View,
};

pub const CONSOLE_TITLE: &str = "Payment Gateway Admin";

/// The view selected by a [`Route`].
#[derive(Debug)]
pub enum ActiveView {
    Companies(CompaniesListView),
    CompanyForm(CompanyFormView),
    CompanyWallets(CompanyWalletsView),
    Countries(CountriesView),
    PaymentProviders(PaymentProvidersView),
    PaymentsCheck(PaymentsCheckView),
    PaymentsHistory(PaymentsHistoryView),
}

impl ActiveView {
    pub fn for_route(route: Route) -> Self {
        match route {
            Route::Companies => ActiveView::Companies(CompaniesListView::new()),
            Route::CompanyNew => ActiveView::CompanyForm(CompanyFormView::new(FormMode::Create)),
            Route::CompanyEdit(id) => ActiveView::CompanyForm(CompanyFormView::new(FormMode::Edit(id))),
            Route::CompanyWallets(id) => ActiveView::CompanyWallets(CompanyWalletsView::new(id)),
            Route::Countries => ActiveView::Countries(CountriesView::new()),
            Route::PaymentProviders => ActiveView::PaymentProviders(PaymentProvidersView::new()),
            Route::PaymentsCheck => ActiveView::PaymentsCheck(PaymentsCheckView::new()),
            Route::PaymentsHistory => ActiveView::PaymentsHistory(PaymentsHistoryView::new()),
        }
    }

    /// Initial fetches. The check form has nothing to load; history shows
    /// the first unfiltered page.
    pub async fn mount(&mut self, client: &AdminClient) {
        match self {
            ActiveView::Companies(view) => view.mount(client).await,
            ActiveView::CompanyForm(view) => view.mount(client).await,
            ActiveView::CompanyWallets(view) => view.mount(client).await,
            ActiveView::Countries(view) => view.mount(client).await,
            ActiveView::PaymentProviders(view) => view.mount(client).await,
            ActiveView::PaymentsCheck(_) => {}
            ActiveView::PaymentsHistory(view) => {
                view.search(client).await;
            }
        }
    }

    pub fn as_view(&self) -> &dyn View {
        match self {
            ActiveView::Companies(view) => view,
            ActiveView::CompanyForm(view) => view,
            ActiveView::CompanyWallets(view) => view,
            ActiveView::Countries(view) => view,
            ActiveView::PaymentProviders(view) => view,
            ActiveView::PaymentsCheck(view) => view,
            ActiveView::PaymentsHistory(view) => view,
        }
    }
}

#[derive(Debug, Default)]
pub struct Shell {
    health: HealthProbe,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn health(&self) -> &HealthProbe {
        &self.health
    }

    /// Probe backend health on first use only.
    pub async fn mount(&mut self, client: &AdminClient) -> HealthStatus {
        self.health.mount(client).await
    }

    pub async fn retry_health(&mut self, client: &AdminClient) -> HealthStatus {
        self.health.reload(client).await
    }

    /// Route `path`, mount the shell and the selected view.
    pub async fn open(&mut self, client: &AdminClient, path: &str) -> Result<ActiveView, RouteError> {
        let route = Route::parse(path)?;
        info!(route = %route, "opening view");
        self.mount(client).await;
        let mut view = ActiveView::for_route(route);
        view.mount(client).await;
        Ok(view)
    }

    /// Header, badge and navigation followed by `body`.
    pub fn render(&self, body: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("{CONSOLE_TITLE} | Developer UI    [{}]\n", self.health.badge()));
        if let Some(message) = self.health.error_message() {
            out.push_str(&format!("{message} (retry with `gateway-admin health`)\n"));
        }
        let nav: Vec<String> = NAV_ITEMS
            .iter()
            .map(|(label, path)| format!("{label} {path}"))
            .collect();
        out.push_str(&format!("Navigation: {}\n", nav.join(" | ")));
        out.push_str(&"-".repeat(72));
        out.push('\n');
        out.push_str(body);
        if !body.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    pub fn render_view(&self, view: &dyn View) -> String {
        self.render(&view.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeBackend;

    #[tokio::test]
    async fn open_routes_and_probes_health_once() {
        let backend = FakeBackend::spawn().await;
        backend.seed_country("AE", "United Arab Emirates");
        let client = backend.client();
        let mut shell = Shell::new();

        let view = shell.open(&client, "/countries").await.unwrap();
        assert!(matches!(view, ActiveView::Countries(_)));
        let rendered = shell.render_view(view.as_view());
        assert!(rendered.contains("API: OK"));
        assert!(rendered.contains("United Arab Emirates"));
        assert!(rendered.contains("Payments (check & verify) /payments/check"));

        shell.open(&client, "/payment-providers").await.unwrap();
        assert_eq!(backend.requests_to("GET", "/health").len(), 1);

        shell.retry_health(&client).await;
        assert_eq!(backend.requests_to("GET", "/health").len(), 2);
    }

    #[tokio::test]
    async fn health_failure_does_not_block_views() {
        let backend = FakeBackend::spawn().await;
        backend.set_healthy(false);
        backend.seed_company("Acme", None, &["stripe"]);
        let client = backend.client();
        let mut shell = Shell::new();

        let view = shell.open(&client, "/").await.unwrap();
        let rendered = shell.render_view(view.as_view());
        assert!(rendered.contains("API: DOWN"));
        assert!(rendered.contains("Backend health check failed"));
        assert!(rendered.contains("Acme"));
        assert!(view.as_view().error().is_none());
    }

    #[tokio::test]
    async fn bad_path_makes_no_request() {
        let backend = FakeBackend::spawn().await;
        let client = backend.client();
        let mut shell = Shell::new();

        let err = shell.open(&client, "/companies/zero/wallets").await.unwrap_err();
        assert!(matches!(err, RouteError::InvalidCompanyId(_)));
        assert_eq!(backend.request_count(), 0);
    }

    #[tokio::test]
    async fn history_route_loads_first_page() {
        let backend = FakeBackend::spawn().await;
        let company = backend.seed_company("Acme", None, &["stripe"]);
        backend.seed_payment(company.id, Some("TXN1"), 100, "new");
        let client = backend.client();
        let mut shell = Shell::new();

        let view = shell.open(&client, "/payments/history").await.unwrap();
        let ActiveView::PaymentsHistory(history) = &view else {
            panic!("expected history view");
        };
        assert_eq!(history.total, 1);
        assert!(view.as_view().render().contains("TXN1"));
    }
}
