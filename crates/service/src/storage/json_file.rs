use std::{ffi::OsString, path::{Path, PathBuf}};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;

use crate::errors::ServiceError;

/// Read a JSON array from `path`.
///
/// Blank content yields an empty vector. A missing file or malformed JSON is a
/// `ServiceError::Read`.
pub async fn read_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ServiceError> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| ServiceError::Read(format!("{}: {e}", path.display())))?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw).map_err(|e| ServiceError::Read(format!("{}: {e}", path.display())))
}

/// Read any JSON document from `path`.
pub async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ServiceError> {
    let raw = fs::read(path)
        .await
        .map_err(|e| ServiceError::Read(format!("{}: {e}", path.display())))?;
    serde_json::from_slice(&raw).map_err(|e| ServiceError::Read(format!("{}: {e}", path.display())))
}

/// Pretty-print with two-space indentation.
pub fn to_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ServiceError> {
    serde_json::to_vec_pretty(value).map_err(|e| ServiceError::Write(e.to_string()))
}

/// Sibling path used while staging: `courses.json` -> `courses.json.tmp`.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `bytes` to the staging sibling of `path` and return the staging path.
pub async fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf, ServiceError> {
    let tmp = staging_path(path);
    fs::write(&tmp, bytes)
        .await
        .map_err(|e| ServiceError::Write(format!("{}: {e}", tmp.display())))?;
    Ok(tmp)
}

/// Move a staged file over its target.
pub async fn commit(staged: &Path, target: &Path) -> Result<(), ServiceError> {
    fs::rename(staged, target)
        .await
        .map_err(|e| ServiceError::Write(format!("{}: {e}", target.display())))
}

/// Best-effort cleanup of staged files after a failed write.
pub async fn discard(staged: &[PathBuf]) {
    for tmp in staged {
        let _ = fs::remove_file(tmp).await;
    }
}

/// Replace `path` with `bytes` via stage + rename so readers never see a torn file.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ServiceError> {
    let tmp = stage(path, bytes).await?;
    if let Err(e) = commit(&tmp, path).await {
        discard(&[tmp]).await;
        return Err(e);
    }
    Ok(())
}
