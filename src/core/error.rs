//! Error handling for the scaffold generator
//!
//! This module provides the error taxonomy and user-friendly error reporting for the
//! generator. The error system follows two principles:
//! 1. **Strongly-typed errors** so callers can match on the exact failure
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`ScaffoldError`] - Enumerated error types for every failure the generator reports
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! # Error Categories
//!
//! - **Answer data**: [`ScaffoldError::Validation`] for structurally invalid answers
//! - **Rendering**: [`ScaffoldError::TemplateNotFound`], [`ScaffoldError::Serialization`],
//!   [`ScaffoldError::TemplateRender`]
//! - **External collaborators**: [`ScaffoldError::ExternalService`] (license lookup) and
//!   [`ScaffoldError::ExternalProcess`] (package installer)
//! - **Environment**: [`ScaffoldError::ConfigError`], [`ScaffoldError::IoError`]
//!
//! None of these are retried internally. The orchestration layer aborts on the first
//! error and leaves already-written files in place.
//!
//! # Examples
//!
//! ```rust,no_run
//! use service_scaffold::core::{ScaffoldError, user_friendly_error};
//!
//! let error = ScaffoldError::TemplateNotFound {
//!     name: "confg".to_string(),
//!     suggestions: vec!["config".to_string()],
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for scaffold operations
///
/// Each variant describes one failure mode and carries the data a caller or a user
/// needs to act on it.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// Answer data has a shape the normalizers cannot work with
    ///
    /// # Fields
    /// - `field`: Dotted path of the offending answer field (e.g. `_config.storage`)
    /// - `reason`: What was expected
    #[error("Invalid answer '{field}': {reason}")]
    Validation {
        /// Dotted path of the offending answer field
        field: String,
        /// What was expected
        reason: String,
    },

    /// Named template does not exist in the template store
    #[error("Template not found: {name}")]
    TemplateNotFound {
        /// The requested template name
        name: String,
        /// Known template names close to the requested one
        suggestions: Vec<String>,
    },

    /// A render value could not be serialized
    ///
    /// Raised for data that is not a key/value mapping, for values nested beyond
    /// the serializer depth limit, and for serde failures.
    #[error("Failed to serialize '{key}': {reason}")]
    Serialization {
        /// Top-level render key whose value failed (or `<data>` for the whole object)
        key: String,
        /// Why serialization failed
        reason: String,
    },

    /// Template engine rejected the template or the context
    #[error("Failed to render template '{name}': {message}")]
    TemplateRender {
        /// Template name
        name: String,
        /// Engine message, with causes flattened
        message: String,
    },

    /// License service answered with a non-success status
    #[error("License service responded with status {status}: {body}")]
    ExternalService {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Package installer exited with a non-zero status
    #[error("Command '{command}' failed: {stderr}")]
    ExternalProcess {
        /// The command line that was executed
        command: String,
        /// Captured error stream
        stderr: String,
    },

    /// Generator configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error from the standard library
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error for cases not covered above
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for ScaffoldError {
    fn clone(&self) -> Self {
        match self {
            Self::Validation {
                field,
                reason,
            } => Self::Validation {
                field: field.clone(),
                reason: reason.clone(),
            },
            Self::TemplateNotFound {
                name,
                suggestions,
            } => Self::TemplateNotFound {
                name: name.clone(),
                suggestions: suggestions.clone(),
            },
            Self::Serialization {
                key,
                reason,
            } => Self::Serialization {
                key: key.clone(),
                reason: reason.clone(),
            },
            Self::TemplateRender {
                name,
                message,
            } => Self::TemplateRender {
                name: name.clone(),
                message: message.clone(),
            },
            Self::ExternalService {
                status,
                body,
            } => Self::ExternalService {
                status: *status,
                body: body.clone(),
            },
            Self::ExternalProcess {
                command,
                stderr,
            } => Self::ExternalProcess {
                command: command.clone(),
                stderr: stderr.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io::Error is not Clone; keep kind and message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

impl ScaffoldError {
    /// Shorthand for a [`ScaffoldError::Validation`] error.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`ScaffoldError::Serialization`] error.
    pub fn serialization(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Serialization {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Error context wrapper that adds user-friendly details and suggestions
///
/// # Examples
///
/// ```rust,no_run
/// use service_scaffold::core::{ErrorContext, ScaffoldError};
///
/// let context = ErrorContext::new(ScaffoldError::ConfigError {
///     message: "bad toml".to_string(),
/// })
/// .with_suggestion("Fix ~/.scaffold/config.toml")
/// .with_details("The generator reads its registries from that file");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ScaffoldError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ScaffoldError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`ScaffoldError`] (anywhere in the chain), [`std::io::Error`] and
/// [`toml::de::Error`]; anything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(scaffold_error) =
        error.chain().find_map(|cause| cause.downcast_ref::<ScaffoldError>())
    {
        return create_error_context(scaffold_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(ScaffoldError::Other {
                    message: error_chain_message(&error),
                })
                .with_suggestion("Check write permissions on the target directory")
                .with_details("The generator could not read or write one of its files");
            }
            std::io::ErrorKind::AlreadyExists => {
                return ErrorContext::new(ScaffoldError::Other {
                    message: error_chain_message(&error),
                })
                .with_suggestion("Scaffold into an empty directory or remove the existing files")
                .with_details("The target file or directory already exists");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(ScaffoldError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of your generator config file")
        .with_details("Configuration is read from --config, $SCAFFOLD_CONFIG or ~/.scaffold/config.toml");
    }

    ErrorContext::new(ScaffoldError::Other {
        message: error_chain_message(&error),
    })
}

/// Flatten an error and its causes into one message.
fn error_chain_message(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }
    message
}

fn create_error_context(error: ScaffoldError) -> ErrorContext {
    match &error {
        ScaffoldError::Validation {
            field,
            ..
        } => {
            let suggestion = format!("Fix the '{field}' entry in your answers file");
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Internal answers (keys starting with '_') drive config normalization and must have the expected shape")
        }

        ScaffoldError::TemplateNotFound {
            suggestions,
            ..
        } => {
            let ctx = ErrorContext::new(error.clone())
                .with_details("Templates are looked up in --templates DIR first, then in the built-in set");
            if suggestions.is_empty() {
                ctx.with_suggestion("Check the template name, or add <name>.tera to your template directory")
            } else {
                ctx.with_suggestion(format!("Did you mean: {}?", suggestions.join(", ")))
            }
        }

        ScaffoldError::Serialization {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Render data must be a JSON object whose values are not nested too deeply")
            .with_details("Each top-level value is serialized to JSON or JSON5 before substitution"),

        ScaffoldError::TemplateRender {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Check template syntax: variables use {{ var }}, control flow uses {% %}. \
                 Raw values are bound as _<key>, serialized values as <key>",
            )
            .with_details("Template errors occur when Tera cannot render the template"),

        ScaffoldError::ExternalService {
            status,
            ..
        } => {
            let suggestion = if *status == 403 || *status == 429 {
                "The GitHub API rate limit may be exhausted; retry later or pass --no-license"
            } else {
                "Check the license name in your answers, or pass --no-license"
            };
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("License text is fetched from the GitHub licenses API")
        }

        ScaffoldError::ExternalProcess {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run the install manually in the generated project, or pass --skip-install")
            .with_details("Generated files were written before the installer ran and are left in place"),

        ScaffoldError::ConfigError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check your generator config file")
            .with_details("Configuration is read from --config, $SCAFFOLD_CONFIG or ~/.scaffold/config.toml"),

        ScaffoldError::IoError(_) => ErrorContext::new(error)
            .with_suggestion("Check file permissions and available disk space"),

        ScaffoldError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
