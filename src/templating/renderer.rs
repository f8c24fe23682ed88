//! Template rendering with Tera.
//!
//! [`TemplateRenderer`] looks a template up in its [`TemplateStore`], builds a
//! [`RenderContext`] from the data and substitutes it with a fresh Tera instance.
//! Rendering is a pure function of (template text, data, options).

use serde::Serialize;
use serde_json::Value;
use tera::Tera;

use super::context::RenderContext;
use super::filters;
use super::serialize::SerializeMode;
use super::store::TemplateStore;
use crate::core::ScaffoldError;

/// Per-call rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Serialize values as JSON5 instead of plain JSON.
    pub relaxed: bool,
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self {
            relaxed: false,
        }
    }

    pub fn relaxed() -> Self {
        Self {
            relaxed: true,
        }
    }

    pub fn mode(self) -> SerializeMode {
        if self.relaxed {
            SerializeMode::Relaxed
        } else {
            SerializeMode::Plain
        }
    }
}

/// Renders named templates from a store.
pub struct TemplateRenderer<S> {
    store: S,
}

impl<S: TemplateStore> TemplateRenderer<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
        }
    }

    /// Render template `name` with `data`.
    ///
    /// Every top-level key `k` of `data` is available to the template as `_k`
    /// (raw value) and `k` (serialized string).
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::TemplateNotFound`] if the store has no template `name`
    /// - [`ScaffoldError::Serialization`] if `data` is not an object or a value
    ///   cannot be serialized
    /// - [`ScaffoldError::TemplateRender`] if Tera rejects the template
    pub fn render(&self, name: &str, data: &Value, options: RenderOptions) -> Result<String, ScaffoldError> {
        let template = self.store.lookup(name)?;
        let context = RenderContext::build(data, options.mode())?;

        tracing::debug!(
            "Rendering template '{}' with {} binding(s), mode {:?}",
            name,
            context.bindings().len(),
            options.mode()
        );

        render_text(name, &template, &context)
    }

    /// Render template `name` with any serializable `data`, converted to JSON first.
    ///
    /// # Errors
    ///
    /// As [`Self::render`], plus [`ScaffoldError::Serialization`] when `data`
    /// has no JSON form.
    pub fn render_serialize<T>(&self, name: &str, data: &T, options: RenderOptions) -> Result<String, ScaffoldError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_value(data)
            .map_err(|e| ScaffoldError::serialization("<data>", e.to_string()))?;
        self.render(name, &data, options)
    }

    /// Render template `name` without data.
    pub fn render_empty(&self, name: &str) -> Result<String, ScaffoldError> {
        self.render(name, &Value::Null, RenderOptions::default())
    }
}

/// Render raw template text against a prepared context.
///
/// # Errors
///
/// Returns [`ScaffoldError::TemplateRender`] on syntax errors and unknown variables.
pub fn render_text(name: &str, template: &str, context: &RenderContext) -> Result<String, ScaffoldError> {
    // A fresh instance per render keeps calls independent.
    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    filters::register_all(&mut tera);

    tera.render_str(template, &context.to_tera()).map_err(|e| ScaffoldError::TemplateRender {
        name: name.to_string(),
        message: format_tera_error(&e),
    })
}

/// Flatten a Tera error chain into one message without Tera's internal template name.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut all_messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        all_messages.push(err.to_string());
        current = err.source();
    }

    let messages: Vec<String> = all_messages
        .into_iter()
        .map(|msg| {
            msg.replace("while rendering '__tera_one_off'", "")
                .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                .replace("'__tera_one_off'", "template")
                .trim()
                .to_string()
        })
        .filter(|msg| {
            !msg.is_empty() && msg != "Template rendering failed" && msg != "Template syntax error"
        })
        .collect();

    if messages.is_empty() {
        "Template syntax error".to_string()
    } else {
        messages.join("\n  → ")
    }
}
