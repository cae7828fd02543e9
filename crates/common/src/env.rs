//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists, creating it (and parents) when missing.
pub async fn ensure_data_dir(data_dir: &Path) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_err() {
        warn!(data_dir = %data_dir.display(), "data directory not found; creating it");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    info!(data_dir = %data_dir.display(), event = "data_dir_ready", "data directory ready");
    Ok(())
}
