// Dashboard catalog - embedded report listing backed by a single JSON file
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::flash_cookie::FlashSigner;
use crate::infrastructure::json_store::JsonFileStore;
use crate::infrastructure::security_headers::with_security_headers;
use crate::infrastructure::templates::Templates;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{about, admin_add_form, admin_add_submit, dashboard_detail, home};

/// Wire the store, service and templates described by `config`.
pub fn build_state(config: &AppConfig) -> anyhow::Result<Arc<AppState>> {
    let store = Arc::new(JsonFileStore::new(config.data_file.clone()));

    Ok(Arc::new(AppState {
        dashboard_service: DashboardService::new(store),
        templates: Templates::new()?,
        flash: FlashSigner::new(config.secret_key.clone()),
    }))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/", get(home))
        .route("/dashboard/:slug", get(dashboard_detail))
        .route("/about", get(about))
        .route("/admin/add", get(admin_add_form).post(admin_add_submit))
        .with_state(state);

    with_security_headers(router).layer(TraceLayer::new_for_http())
}
