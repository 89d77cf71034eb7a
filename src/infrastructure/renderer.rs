//! HTML rendering.
//!
//! Handlers never build HTML themselves; they assemble a JSON context and
//! hand it to a [`TemplateRenderer`] together with a template identifier.
//! The bundled [`HtmlTemplateRenderer`] produces plain server-rendered
//! pages with the error summary and inline error conventions the templates
//! rely on: the summary links to `#<field>` anchors and inline messages sit
//! next to their inputs.

use serde_json::Value;

/// Rendering failures.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The template identifier is not known to the renderer.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// The context is missing a value the template requires.
    #[error("template {template} missing context value: {key}")]
    MissingContext {
        /// Template being rendered.
        template: String,
        /// The absent context key.
        key: String,
    },
}

/// Renders a template identifier plus JSON context into an HTML page.
pub trait TemplateRenderer: Send + Sync {
    /// Renders `template` with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the template is unknown or the context
    /// is incomplete.
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError>;
}

/// Minimal HTML renderer.
///
/// Every page shares one layout: an optional error summary, a heading, the
/// form fields serialised as labelled inputs, and a submit button. This is
/// deliberately simple; the pipeline under test cares about the context
/// handed to the renderer, not the markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlTemplateRenderer;

impl HtmlTemplateRenderer {
    /// Creates the renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn error_summary(context: &Value) -> String {
        let Some(entries) = context
            .get("errorSummaryList")
            .and_then(Value::as_array)
            .filter(|entries| !entries.is_empty())
        else {
            return String::new();
        };

        let items: String = entries
            .iter()
            .map(|entry| {
                let text = entry.get("text").and_then(Value::as_str).unwrap_or_default();
                let href = entry.get("href").and_then(Value::as_str).unwrap_or("#");
                format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    escape_html(href),
                    escape_html(text)
                )
            })
            .collect();

        format!(
            "<div class=\"error-summary\" role=\"alert\">\
             <h2>There is a problem</h2><ul>{items}</ul></div>"
        )
    }

    fn rows(context: &Value) -> String {
        let Some(rows) = context
            .get("rows")
            .and_then(Value::as_array)
            .filter(|rows| !rows.is_empty())
        else {
            return String::new();
        };

        let items: String = rows
            .iter()
            .map(|row| {
                let reference = row
                    .get("caseReference")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let reference = escape_html(reference);
                format!("<li><a href=\"/cases/{reference}/client-details\">{reference}</a></li>")
            })
            .collect();

        format!("<ul class=\"case-list\">{items}</ul>")
    }

    fn choices(context: &Value) -> String {
        let Some(group) = context.get("choices").and_then(Value::as_object) else {
            return String::new();
        };
        let name = group.get("name").and_then(Value::as_str).unwrap_or_default();
        let Some(options) = group
            .get("options")
            .and_then(Value::as_array)
            .filter(|options| !options.is_empty())
        else {
            return String::new();
        };

        let name = escape_html(name);
        let items: String = options
            .iter()
            .map(|option| {
                let id = escape_html(
                    option.get("id").and_then(Value::as_str).unwrap_or_default(),
                );
                let label = escape_html(
                    option.get("label").and_then(Value::as_str).unwrap_or_default(),
                );
                format!(
                    "<div class=\"choice\">\
                     <input type=\"radio\" id=\"{name}-{id}\" name=\"{name}\" value=\"{id}\">\
                     <label for=\"{name}-{id}\">{label}</label></div>"
                )
            })
            .collect();

        format!("<fieldset class=\"choice-group\">{items}</fieldset>")
    }

    fn fields(context: &Value) -> String {
        let Some(fields) = context.get("fields").and_then(Value::as_object) else {
            return String::new();
        };
        let empty = serde_json::Map::new();
        let input_errors = context
            .get("inputErrors")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        fields
            .iter()
            .map(|(name, value)| {
                let rendered_value = match value {
                    Value::String(text) => escape_html(text),
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(escape_html)
                        .collect::<Vec<_>>()
                        .join(","),
                    other => escape_html(&other.to_string()),
                };
                let inline = input_errors
                    .get(name)
                    .and_then(Value::as_str)
                    .map(|message| {
                        format!("<span class=\"error-message\">{}</span>", escape_html(message))
                    })
                    .unwrap_or_default();
                format!(
                    "<div class=\"form-group\">{inline}\
                     <input id=\"{name}\" name=\"{name}\" value=\"{rendered_value}\"></div>"
                )
            })
            .collect()
    }
}

impl TemplateRenderer for HtmlTemplateRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError> {
        if template.is_empty() {
            return Err(RenderError::UnknownTemplate(template.to_string()));
        }
        let case_reference = context
            .get("caseReference")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let summary = Self::error_summary(context);
        let rows = Self::rows(context);
        let choices = Self::choices(context);
        let fields = Self::fields(context);
        let heading = context
            .get("heading")
            .and_then(Value::as_str)
            .unwrap_or(template);

        Ok(format!(
            "<!DOCTYPE html><html lang=\"en\"><head><title>{title}</title></head>\
             <body>{summary}<h1>{title}</h1>{rows}\
             <form method=\"post\" data-case-reference=\"{reference}\">{choices}{fields}\
             <button type=\"submit\">Save</button></form></body></html>",
            title = escape_html(heading),
            reference = escape_html(case_reference),
        ))
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
