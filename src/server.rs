//! Dashboard server: serves the rendered dashboard over HTTP.
//!
//! - `/dashboard`                       : full dashboard; `?q=` and `?category=` preset the
//!                                        filters, `?notice=deleted` shows the delete notice
//! - `/dashboard/medicines/{id}/delete` : POST target of a row's delete button; redirects back
//! - `/health`                          : server health check
//!
//! The inventory client is blocking, so every page build runs on the
//! blocking pool.

use std::cell::RefCell;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State as AxumState};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::client::InventoryApi;
use crate::config::{self, DashboardConfig};
use crate::dashboard::{InventoryDashboard, Prompt};
use crate::page::PageLayout;
use crate::render::{HtmlRenderer, PageRenderer};
use crate::views::DELETE_NOTICE;

pub const DASHBOARD_PATH: &str = "/dashboard";

/// `?notice=` value carried from a delete to the next page load.
const NOTICE_DELETED: &str = "deleted";

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind dashboard server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Dashboard server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct ServerState {
    api: Arc<dyn InventoryApi>,
    config: DashboardConfig,
}

impl ServerState {
    pub fn new(api: Arc<dyn InventoryApi>, config: DashboardConfig) -> Self {
        Self { api, config }
    }

    fn dashboard(&self, layout: PageLayout) -> InventoryDashboard<Arc<dyn InventoryApi>> {
        InventoryDashboard::new(self.api.clone(), self.config.clone(), layout)
    }

    fn renderer(&self) -> HtmlRenderer {
        HtmlRenderer::new(&self.config.update_page, DASHBOARD_PATH)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    q: Option<String>,
    category: Option<String>,
    notice: Option<String>,
}

/// The browser's confirm() already asked; the notice is kept for the redirect.
#[derive(Default)]
struct BrowserPrompt {
    notice: RefCell<Option<String>>,
}

impl Prompt for BrowserPrompt {
    fn confirm(&self, _message: &str) -> bool {
        true
    }

    fn notify(&self, message: &str) {
        *self.notice.borrow_mut() = Some(message.to_string());
    }
}

/// Build the dashboard router (extracted for testability).
pub fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to(DASHBOARD_PATH) }))
        .route(DASHBOARD_PATH, get(handle_dashboard))
        .route("/dashboard/medicines/:id/delete", post(handle_delete))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: ServerState) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local = listener.local_addr()?;

    tracing::info!(
        addr = %local,
        api = %state.config.api_base,
        "Dashboard server started at http://{local}{DASHBOARD_PATH}"
    );

    let app = build_router(Arc::new(state));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Dashboard server shutting down");
        })
        .await?;
    Ok(())
}

// ═══════════════════════════════════════════════════════════
// Handlers
// ═══════════════════════════════════════════════════════════

/// GET /dashboard: render list, alerts and summary, then preset filters.
async fn handle_dashboard(
    AxumState(state): AxumState<Arc<ServerState>>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let result = tokio::task::spawn_blocking(move || {
        let mut dashboard = state.dashboard(PageLayout::full());
        dashboard.init();
        if query.notice.as_deref() == Some(NOTICE_DELETED) {
            dashboard.show_notice(DELETE_NOTICE);
        }
        if let Some(text) = query.q.as_deref() {
            dashboard.search(text);
        }
        if let Some(category) = query.category.as_deref() {
            dashboard.filter_by_category(category);
        }
        state.renderer().render(dashboard.page())
    })
    .await;

    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Dashboard render task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Dashboard unavailable").into_response()
        }
    }
}

/// POST /dashboard/medicines/{id}/delete: the browser already confirmed.
///
/// The list refresh is the redirected GET, so the delete runs against an
/// empty page and fetches nothing else.
async fn handle_delete(
    AxumState(state): AxumState<Arc<ServerState>>,
    Path(medicine_id): Path<i64>,
) -> Response {
    let result = tokio::task::spawn_blocking(move || {
        let mut dashboard = state.dashboard(PageLayout::empty());
        let prompt = BrowserPrompt::default();
        dashboard.delete_medicine(medicine_id, &prompt);
        prompt.notice.into_inner().is_some()
    })
    .await;

    match result {
        Ok(true) => {
            Redirect::to(&format!("{DASHBOARD_PATH}?notice={NOTICE_DELETED}")).into_response()
        }
        Ok(false) => Redirect::to(DASHBOARD_PATH).into_response(),
        Err(e) => {
            tracing::error!(medicine_id, error = %e, "Delete task failed");
            Redirect::to(DASHBOARD_PATH).into_response()
        }
    }
}

/// GET /health: Server health check
async fn handle_health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
        "name": config::APP_NAME,
        "version": config::APP_VERSION,
    }))
}
