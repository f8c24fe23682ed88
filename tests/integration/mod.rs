//! Integration test suite for the scaffold generator.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: the `scaffold` binary end to end (`init`, `render`, `normalize`, errors)
//! - **generate**: `scaffold::run` against a mock license service and a fake installer
//! - **installer**: package installer invocation and failure reporting
//! - **license**: license fetch status and header handling
//! - **normalization**: documented normalization scenarios through the public API
//! - **templating**: built-in templates and directory overrides

#[path = "../common/mod.rs"]
mod common;

mod cli;
mod generate;
mod installer;
mod license;
mod normalization;
mod templating;
