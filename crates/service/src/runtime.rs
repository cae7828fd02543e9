//! Runtime environment helpers
//!
//! Keeps the server crate calling `service::runtime::*` at startup without
//! depending directly on `common`.

use configs::StorageConfig;

use crate::file::course_store::CourseStore;

/// Ensure the data directory exists and the course store is ready to serve.
pub async fn open_course_store(cfg: &StorageConfig) -> anyhow::Result<CourseStore> {
    common::env::ensure_data_dir(&cfg.data_dir).await?;
    let store = CourseStore::new(cfg);
    store.init().await?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_store_in_fresh_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("runtime_{}", uuid::Uuid::new_v4()));
        let store = open_course_store(&StorageConfig::in_dir(&dir)).await?;
        assert!(store.read_courses().await?.is_empty());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
