//! Result rendering
//!
//! Converts transit results, service status and error messages into HTML
//! fragments for the display regions. Templates are `.html` so Tera
//! autoescaping applies to every interpolated value; nothing coming from the
//! backend or the user is ever inserted raw.

use domain::{ServiceStatus, TransitResult};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;

use crate::error::ApplicationError;

const RESULT_TEMPLATE: &str = r#"<h3>Nearest MTR Station:</h3>
<p class="station-name">{{ station_name }}</p>
<h4>Walking Directions</h4>
{% if steps | length > 0 -%}
<ol class="walking-directions">
{%- for step in steps %}
  <li>{{ step.instruction }} ({{ step.distance }})</li>
{%- endfor %}
</ol>
{%- else -%}
<p class="no-directions">No walking directions available.</p>
{%- endif %}
<h4>Accessibility</h4>
{% if has_accessibility -%}
<ul class="accessibility">
{%- for exit in exits %}
  <li>Exit {{ exit.id }}: {{ exit.features | join(sep=", ") }}</li>
{%- endfor %}
</ul>
{%- else -%}
<p class="no-accessibility">No accessibility information available.</p>
{%- endif %}
"#;

const ERROR_TEMPLATE: &str = r#"<p class="text-danger">{{ message }}</p>"#;

const STATUS_TEMPLATE: &str = r#"<p class="status-text">{{ status }}</p>
<p class="status-updated">Last updated: {{ timestamp }}</p>"#;

const STATUS_ERROR_TEMPLATE: &str =
    r#"<p class="text-danger">Unable to load service status: {{ message }}</p>"#;

/// Static markup used when even the error template cannot be rendered
pub const FALLBACK_ERROR_HTML: &str =
    r#"<p class="text-danger">An error occurred. Please try again.</p>"#;

#[derive(Serialize)]
struct ExitView<'a> {
    id: &'a str,
    features: &'a [String],
}

/// Renders HTML fragments for the result and status regions
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    tera: Tera,
}

impl ResultRenderer {
    /// Compile the embedded templates
    ///
    /// # Errors
    ///
    /// Returns `Render` if a template fails to compile.
    pub fn new() -> Result<Self, ApplicationError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("result.html", RESULT_TEMPLATE),
            ("error.html", ERROR_TEMPLATE),
            ("status.html", STATUS_TEMPLATE),
            ("status_error.html", STATUS_ERROR_TEMPLATE),
        ])
        .map_err(|e| ApplicationError::Render(format!("template compilation failed: {e}")))?;

        Ok(Self { tera })
    }

    /// Render a transit result: station name, walking steps, accessibility
    ///
    /// # Errors
    ///
    /// Returns `Render` if the template cannot be rendered.
    pub fn render(&self, result: &TransitResult) -> Result<String, ApplicationError> {
        let exits: Vec<ExitView<'_>> = result
            .accessibility
            .exits_with_features()
            .map(|(id, features)| ExitView { id, features })
            .collect();

        let mut context = Context::new();
        context.insert("station_name", &result.station_name);
        context.insert("steps", &result.walking_directions);
        context.insert("exits", &exits);
        context.insert("has_accessibility", &!result.accessibility.is_empty());

        self.render_template("result.html", &context)
    }

    /// Render a user-visible error for the result region
    ///
    /// # Errors
    ///
    /// Returns `Render` if the template cannot be rendered.
    pub fn render_error(&self, message: &str) -> Result<String, ApplicationError> {
        let mut context = Context::new();
        context.insert("message", message);
        self.render_template("error.html", &context)
    }

    /// Render the status panel
    ///
    /// # Errors
    ///
    /// Returns `Render` if the template cannot be rendered.
    pub fn render_status(&self, status: &ServiceStatus) -> Result<String, ApplicationError> {
        let mut context = Context::new();
        context.insert("status", &status.status_text);
        context.insert("timestamp", &status.timestamp);
        self.render_template("status.html", &context)
    }

    /// Render a status fetch failure for the status panel
    ///
    /// # Errors
    ///
    /// Returns `Render` if the template cannot be rendered.
    pub fn render_status_error(&self, message: &str) -> Result<String, ApplicationError> {
        let mut context = Context::new();
        context.insert("message", message);
        self.render_template("status_error.html", &context)
    }

    fn render_template(&self, name: &str, context: &Context) -> Result<String, ApplicationError> {
        self.tera.render(name, context).map_err(|e| {
            error!(template = name, error = %e, "Template rendering failed");
            ApplicationError::Render(format!("{name}: {e}"))
        })
    }
}
