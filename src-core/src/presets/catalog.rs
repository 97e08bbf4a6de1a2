// FICHIER : src-core/src/presets/catalog.rs

use crate::model::test_result::FIELD_NAMES;
use crate::utils::config::AppConfig;
use crate::utils::{fs, json, AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Catalogue embarqué.
pub const BUILTIN_PRESETS_JSON: &str = include_str!("../../rules/presets.json");

/// Mise à jour partielle d'un relevé : nom de champ JSON -> valeur.
pub type PartialUpdate = BTreeMap<String, String>;

/// Gabarit de circuit proposé à l'auto-remplissage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub values: PartialUpdate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PresetFile {
    presets: Vec<Preset>,
}

/// Catalogue de presets injecté (jamais d'état global mutable).
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn new(presets: Vec<Preset>) -> Result<Self> {
        for preset in &presets {
            if let Some(bad) = preset
                .values
                .keys()
                .find(|k| !FIELD_NAMES.contains(&k.as_str()) || k.as_str() == "id")
            {
                return Err(AppError::Config(format!(
                    "preset '{}' : champ non applicable '{}'",
                    preset.name, bad
                )));
            }
        }
        let mut names: Vec<String> = presets.iter().map(|p| p.name.to_lowercase()).collect();
        names.sort();
        if let Some(dup) = names.windows(2).find(|w| w[0] == w[1]) {
            return Err(AppError::Config(format!("preset dupliqué : {}", dup[0])));
        }
        Ok(Self { presets })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_PRESETS_JSON)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: PresetFile = json::parse(content)?;
        Self::new(file.presets)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file: PresetFile = fs::read_json_sync(path)?;
        Self::new(file.presets)
    }

    /// Catalogue externe si `presets_path` est configuré, sinon catalogue embarqué.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match &config.presets_path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    /// Recherche insensible à la casse.
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }
}
