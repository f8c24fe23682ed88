//! Core types shared across the generator
//!
//! ## `error` - Error Handling
//!
//! - [`ScaffoldError`] - Enumerated error types covering every generator failure mode
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! # Examples
//!
//! ```rust
//! use service_scaffold::core::{ScaffoldError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(ScaffoldError::validation("_config", "expected an object").into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, ScaffoldError, user_friendly_error};
