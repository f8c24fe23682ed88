//! Test helpers shared by unit and integration tests.

use serde_json::Value;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, else `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Answers covering every normalizer path: SQL storage, apps with a doc site,
/// a passthrough storage backend and both dependency kinds.
pub fn sample_answers() -> Value {
    serde_json::json!({
        "name": "sample-service",
        "version": "1.0.0",
        "description": "Sample service",
        "license": "MIT License",
        "author": "Sample Author <author@example.com>",
        "_dependencies": ["mysql", "mocha", "unknown-plugin"],
        "_config": {
            "_sqlProvider": "mysql",
            "_sqlHost": "localhost",
            "_sqlPort": 3306,
            "_sqlDatabase": "app",
            "_sqlUsername": "root",
            "_sqlPassword": "secret",
            "_apps": ["public", "public-doc", "cli"],
            "_host": "http://127.0.0.1",
            "listen": {
                "public": {"port": 3000},
                "public-doc": {"port": 3001},
            },
            "storage": {
                "couchbase": {"host": "localhost", "buckets": {"main": {"bucket": "main"}}},
            },
        },
    })
}
