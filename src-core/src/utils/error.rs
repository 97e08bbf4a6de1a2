// FICHIER : src-core/src/utils/error.rs

use serde::Serialize;
use std::io;

// --- RE-EXPORTS ANYHOW (Pour la flexibilité du CLI) ---
pub use anyhow::{anyhow, Context};
// On renomme le Result de anyhow pour ne pas qu'il écrase le nôtre
pub use anyhow::Result as AnyResult;

/// Type de résultat standard du moteur de conformité.
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs.
/// Le vérificateur lui-même est total : seules les frontières (JSON, fichiers,
/// configuration, tables de règles) produisent ces erreurs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Argument invalide : {0}")]
    InvalidArgument(String),

    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Table de règles invalide : {0}")]
    RuleTable(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),

    #[error("Introuvable : {0}")]
    NotFound(String),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),
}

// Les consommateurs (UI, CLI --json) reçoivent l'erreur sous forme de chaîne.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

// Permet de faire : return Err(format!("...").into());
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}
