//! Writes a [`ScaffoldPlan`] to disk.

use anyhow::{Context, Result};
use futures::future::try_join_all;
use std::path::Path;
use tokio::fs;

use super::plan::ScaffoldPlan;

/// Create the plan's directories in order, then write all files concurrently.
///
/// The first failure aborts the write; files already written stay in place.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or a file cannot be written.
pub async fn write_plan(root: &Path, plan: &ScaffoldPlan) -> Result<()> {
    for dir in &plan.directories {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }

    try_join_all(plan.files.iter().map(|file| async move {
        let path = root.join(&file.path);
        tracing::info!("Creating {}", file.path.display());
        fs::write(&path, &file.content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }))
    .await?;

    Ok(())
}
