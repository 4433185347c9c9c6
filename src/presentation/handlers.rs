// HTTP request handlers
use crate::application::dashboard_service::AddDashboardError;
use crate::domain::dashboard::DashboardSubmission;
use crate::domain::flash::Flash;
use crate::infrastructure::flash_cookie::FlashSigner;
use crate::presentation::app_state::AppState;
use crate::presentation::error::AppError;
use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;
use std::sync::Arc;

/// List all dashboards
pub async fn home(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let taken = state.flash.take(&headers);
    let dashboards = state.dashboard_service.list_dashboards().await?;

    let body = state.templates.render(
        "index.html",
        context! { dashboards => dashboards, flash => taken.flash },
    )?;
    Ok(page(body, taken.present))
}

/// Show one dashboard with its embedded report
pub async fn dashboard_detail(
    Path(slug): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let Some(dashboard) = state.dashboard_service.find_by_slug(&slug).await? else {
        tracing::debug!(%slug, "Dashboard not found");
        return Ok(redirect_home(&state.flash, Flash::error("Dashboard not found")));
    };

    let taken = state.flash.take(&headers);
    let body = state.templates.render(
        "dashboard_detail.html",
        context! { dashboard => dashboard, flash => taken.flash },
    )?;
    Ok(page(body, taken.present))
}

pub async fn about(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let taken = state.flash.take(&headers);
    let body = state
        .templates
        .render("about.html", context! { flash => taken.flash })?;
    Ok(page(body, taken.present))
}

/// Empty submission form
pub async fn admin_add_form(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let taken = state.flash.take(&headers);
    render_add_form(&state, taken.flash, taken.present)
}

/// Validate, append and persist a new dashboard
pub async fn admin_add_submit(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    form: Result<Form<DashboardSubmission>, FormRejection>,
) -> Result<Response, AppError> {
    // An unreadable body is treated like a submission with nothing filled in.
    let submission = match form {
        Ok(Form(submission)) => submission,
        Err(rejection) => {
            tracing::debug!(%rejection, "Unreadable add form submission");
            DashboardSubmission::default()
        }
    };

    match state.dashboard_service.add_dashboard(submission).await {
        Ok(_) => Ok(redirect_home(
            &state.flash,
            Flash::success("Dashboard added successfully!"),
        )),
        Err(AddDashboardError::MissingRequiredFields(e)) => {
            // Submitted values are not carried back into the form.
            let present = state.flash.take(&headers).present;
            render_add_form(&state, Some(Flash::error(e.to_string())), present)
        }
        Err(AddDashboardError::Store(e)) => Err(e.into()),
    }
}

fn render_add_form(
    state: &AppState,
    flash: Option<Flash>,
    clear_flash: bool,
) -> Result<Response, AppError> {
    let body = state
        .templates
        .render("admin_add.html", context! { flash => flash })?;
    Ok(page(body, clear_flash))
}

/// Render an HTML page, expiring the flash cookie once it has been shown.
fn page(body: String, clear_flash: bool) -> Response {
    let mut response = Html(body).into_response();
    if clear_flash {
        response
            .headers_mut()
            .append(header::SET_COOKIE, FlashSigner::clear_cookie());
    }
    response
}

fn redirect_home(signer: &FlashSigner, flash: Flash) -> Response {
    let mut response = Redirect::to("/").into_response();
    if let Some(cookie) = signer.set_cookie(&flash) {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clears_flash_cookie_only_when_sent() {
        let response = page("<p>ok</p>".to_string(), true);
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().contains("Max-Age=0"));

        let response = page("<p>ok</p>".to_string(), false);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[test]
    fn test_redirect_home_carries_signed_flash() {
        let signer = FlashSigner::new("secret");
        let response = redirect_home(&signer, Flash::error("Dashboard not found"));

        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        let value = cookie
            .strip_prefix("flash=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        assert_eq!(signer.decode(value), Some(Flash::error("Dashboard not found")));
    }
}
