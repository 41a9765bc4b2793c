//! Page rendering.
//!
//! [`TemplateEngine`] is the seam handlers render through; [`MiniJinjaEngine`]
//! is the implementation. Templates whose names end in `.html` are
//! auto-escaped.

use minijinja::{Environment, ErrorKind, Value};
use thiserror::Error;

use crate::assets::templates::BUILTIN_TEMPLATES;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A template engine that renders named templates with JSON data.
pub trait TemplateEngine: Send + Sync {
    /// Renders a template string once, without registering it.
    fn render_template(&self, template: &str, data: &serde_json::Value) -> Result<String, RenderError>;

    /// Compiles and registers a named template.
    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError>;

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError>;

    fn has_template(&self, name: &str) -> bool;
}

/// MiniJinja-backed engine preloaded with the dashboard pages.
///
/// ```rust
/// use catalog_dashboard::render::{MiniJinjaEngine, TemplateEngine};
///
/// let engine = MiniJinjaEngine::new("Rs.");
/// let out = engine
///     .render_template("{{ price | money }}", &serde_json::json!({"price": 1499.5}))
///     .unwrap();
/// assert_eq!(out, "Rs. 1499.50");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates an engine with filters registered and no templates.
    pub fn new(currency: &str) -> Self {
        let mut env = Environment::new();
        register_filters(&mut env, currency);
        Self { env }
    }

    /// Creates an engine holding the built-in page templates.
    pub fn with_builtin_templates(currency: &str) -> Result<Self, RenderError> {
        let mut engine = Self::new(currency);
        for (name, source) in BUILTIN_TEMPLATES {
            engine.add_template(name, source)?;
        }
        Ok(engine)
    }

    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render_template(&self, template: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        let value = Value::from_serialize(data);
        Ok(self.env.render_str(template, value)?)
    }

    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(name).map_err(|err| match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(name.to_string()),
            _ => RenderError::Template(err),
        })?;
        let value = Value::from_serialize(data);
        Ok(tmpl.render(value)?)
    }

    fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}

/// Registers the dashboard filters.
///
/// - `money`: `1499.5` → `"Rs. 1499.50"` (prefix is the configured currency)
/// - `join_lines`: a list joined with newlines
pub fn register_filters(env: &mut Environment<'static>, currency: &str) {
    let currency = currency.to_string();
    env.add_filter("money", move |amount: f64| -> String {
        format!("{} {:.2}", currency, amount)
    });

    env.add_filter("join_lines", |value: Value| -> Result<String, minijinja::Error> {
        let lines: Vec<String> = value.try_iter()?.map(|v| v.to_string()).collect();
        Ok(lines.join("\n"))
    });
}
