//! Page rendering
//!
//! Jinja templates and static assets are embedded in the binary.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::Environment;
use rust_embed::Embed;
use serde::Serialize;
use tracing::error;

/// Page templates
#[derive(Embed)]
#[folder = "src/web/templates/"]
struct TemplateAssets;

/// Stylesheet and other static files
#[derive(Embed)]
#[folder = "src/web/static/"]
pub(crate) struct StaticAssets;

/// Template renderer shared by all handlers
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_loader(|name| {
            Ok(TemplateAssets::get(name).map(|file| String::from_utf8_lossy(&file.data).into_owned()))
        });
        Self { env }
    }

    /// Render a template to a string
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }

    /// Render a template into an HTML response
    ///
    /// Expected failures are part of the context, so anything going wrong
    /// here is a template bug and answers 500.
    pub fn page<S: Serialize>(&self, name: &str, context: S) -> Response {
        match self.render(name, context) {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                error!("Failed to render {}: {:#}", name, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
