// FICHIER : src-core/src/utils/fs.rs

use crate::utils::{json, AppError, Result};
use serde::de::DeserializeOwned;
use tokio::fs;

// --- RE-EXPORTS (Isolation de la couche OS) ---
pub use std::path::{Path, PathBuf};

pub async fn exists(path: &Path) -> bool {
    fs::metadata(path).await.is_ok()
}

pub async fn read_to_string(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path).await?)
}

/// Lit et désérialise un fichier JSON.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !exists(path).await {
        return Err(AppError::NotFound(format!(
            "Fichier JSON introuvable : {}",
            path.to_string_lossy()
        )));
    }
    let content = read_to_string(path).await?;
    json::parse(&content)
}

/// Variante synchrone, utilisée au chargement de la configuration et des tables.
pub fn read_json_sync<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(AppError::NotFound(format!(
            "Fichier JSON introuvable : {}",
            path.to_string_lossy()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    json::parse(&content)
}
