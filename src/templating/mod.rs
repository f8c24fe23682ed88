//! Template rendering for generated project files.
//!
//! # Overview
//!
//! Each output file is produced by one call to [`TemplateRenderer::render`] with
//! a template name and a data object. Before substitution every top-level value
//! is serialized once, so a template embeds whole sub-trees without any
//! formatting logic of its own:
//!
//! ```text
//! {
//!     "name": {{ name }},
//!     "dependencies": {{ dependencies | indent }}
//! }
//! ```
//!
//! # Template Context
//!
//! For every data key `k`:
//! - `k`: the value serialized as plain JSON, or as JSON5 when
//!   [`RenderOptions::relaxed`] is set
//! - `_k`: the raw value, for `{% if %}` / `{% for %}` and field access
//!
//! # Custom Filters
//!
//! - `indent(width=4)`: indent continuation lines of a serialized block
//! - `json` / `json5`: serialize a raw sub-value
//!
//! # Template Sources
//!
//! Templates come from a [`TemplateStore`]. The built-in set is compiled into
//! the binary ([`EmbeddedTemplates`]); a directory of `<name>.tera` files can
//! override individual templates ([`LayeredTemplates::standard`]).
//!
//! # Examples
//!
//! ```rust,no_run
//! use serde_json::json;
//! use service_scaffold::templating::{EmbeddedTemplates, RenderOptions, TemplateRenderer};
//!
//! # fn example() -> Result<(), service_scaffold::core::ScaffoldError> {
//! let renderer = TemplateRenderer::new(EmbeddedTemplates);
//! let text = renderer.render("router", &json!({"app": "public"}), RenderOptions::plain())?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod filters;
pub mod renderer;
pub mod serialize;
pub mod store;

pub use context::{RenderBinding, RenderContext};
pub use renderer::{RenderOptions, TemplateRenderer};
pub use serialize::{MAX_NESTING_DEPTH, SerializeMode, serialize_value};
pub use store::{DirectoryTemplates, EmbeddedTemplates, LayeredTemplates, TemplateStore};
