//! Page handlers
//!
//! Every expected failure is rendered inline with status 200.

use axum::{
    extract::{rejection::FormRejection, Form, State},
    response::Response,
};
use minijinja::context;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::audit::DEFAULT_RECENT_LIMIT;
use crate::web::state::AppState;

/// Characters of the token shown on the authentication page
pub const TOKEN_DISPLAY_CHARS: usize = 50;

const AUTH_FAILED: &str = "Authentication failed";
const DEVICE_IP_REQUIRED: &str = "Device IP is required";

/// Form posted by the interfaces page
#[derive(Debug, Default, Deserialize)]
pub struct InterfaceForm {
    #[serde(default)]
    pub device_ip: String,
}

/// Shorten a token for display, marking the cut with `...`
pub fn token_display(token: &str) -> String {
    if token.chars().count() > TOKEN_DISPLAY_CHARS {
        let head: String = token.chars().take(TOKEN_DISPLAY_CHARS).collect();
        format!("{}...", head)
    } else {
        token.to_string()
    }
}

/// GET / - landing page
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    state.renderer.page("index.html", context! {})
}

/// GET /authenticate/ - obtain and show a token
pub async fn authenticate(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session();

    let context = match session.authenticate().await {
        Ok(()) => {
            let token = session.token().unwrap_or_default();
            context! {
                token => token,
                token_display => token_display(token),
                success => true,
            }
        }
        Err(_) => context! { error => AUTH_FAILED },
    };

    state.renderer.page("auth_result.html", context)
}

/// GET /devices/ - device table
pub async fn list_devices(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session();

    if session.authenticate().await.is_err() {
        return state.renderer.page("devices_list.html", context! { error => AUTH_FAILED });
    }

    let devices = session.list_devices().await.ok();
    state.renderer.page("devices_list.html", context! { devices => devices })
}

/// GET /interfaces/ - device IP form
pub async fn interfaces_form(State(state): State<Arc<AppState>>) -> Response {
    state.renderer.page("interfaces_form.html", context! {})
}

/// POST /interfaces/ - interface table for one device
pub async fn device_interfaces(
    State(state): State<Arc<AppState>>,
    form: Result<Form<InterfaceForm>, FormRejection>,
) -> Response {
    // An unreadable body counts as a missing IP
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!("Unreadable interface form: {}", rejection);
            InterfaceForm::default()
        }
    };

    let device_ip = form.device_ip.trim();
    if device_ip.is_empty() {
        debug!("Rejected interface lookup without device IP");
        return state.renderer.page("interfaces_list.html", context! { error => DEVICE_IP_REQUIRED });
    }

    let mut session = state.session();
    if session.authenticate().await.is_err() {
        return state.renderer.page("interfaces_list.html", context! { error => AUTH_FAILED });
    }

    let interfaces = session.get_device_interfaces(device_ip).await.ok();
    state.renderer.page(
        "interfaces_list.html",
        context! {
            interfaces => interfaces,
            device_ip => device_ip,
        },
    )
}

/// GET /logs/ - recent audit events, newest first
pub async fn view_logs(State(state): State<Arc<AppState>>) -> Response {
    let logs = state.audit.recent_events(DEFAULT_RECENT_LIMIT);
    state.renderer.page("logs.html", context! { logs => logs })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display_truncates() {
        let long = "a".repeat(120);
        let shown = token_display(&long);
        assert_eq!(shown.len(), 53);
        assert!(shown.ends_with("..."));

        let exact = "b".repeat(50);
        assert_eq!(token_display(&exact), exact);
        assert_eq!(token_display("short"), "short");
    }
}
