// FICHIER : src-core/src/utils/config.rs

use crate::utils::error::{AppError, Result};
use crate::utils::{env, fs};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Singleton global pour la configuration
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Variables d'environnement reconnues
pub const ENV_CONFIG_PATH: &str = "EICR_CONFIG";
pub const ENV_MODE: &str = "EICR_ENV_MODE";
pub const ENV_LOG_LEVEL: &str = "EICR_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "EICR_LOG_DIR";
pub const ENV_RULES_PATH: &str = "EICR_RULES_PATH";
pub const ENV_PRESETS_PATH: &str = "EICR_PRESETS_PATH";
pub const ENV_ZS_FACTOR: &str = "EICR_ZS_CORRECTION_FACTOR";

/// Configuration globale de l'application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_env_mode")]
    pub env_mode: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dossier des logs JSON (rotation quotidienne). Absent = console seule.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Table de règles externe. Absent = table BS 7671 embarquée.
    #[serde(default)]
    pub rules_path: Option<PathBuf>,

    /// Catalogue de presets externe. Absent = catalogue embarqué.
    #[serde(default)]
    pub presets_path: Option<PathBuf>,

    #[serde(default)]
    pub checker: CheckerConfig,
}

/// Réglages du moteur de conformité
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckerConfig {
    /// Facteur appliqué aux Zs tabulés (règle des 80 %)
    #[serde(default = "default_zs_factor")]
    pub zs_correction_factor: f64,

    /// Nombre d'anomalies critiques affichées avant "voir plus"
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Règles désactivées (liste ou chaîne séparée par des virgules)
    #[serde(default, deserialize_with = "deserialize_rule_ids_flexible")]
    pub disabled_rules: Vec<String>,
}

// --- HELPERS SERDE ---

fn default_env_mode() -> String {
    "production".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_zs_factor() -> f64 {
    0.8
}
fn default_preview_limit() -> usize {
    5
}

fn deserialize_rule_ids_flexible<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Value = Deserialize::deserialize(deserializer)?;

    match v {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(s
            .split(',')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect()),
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(|item| item.as_str())
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect()),
        _ => Err(serde::de::Error::custom(
            "Format de 'disabled_rules' invalide : attendu Liste ou Chaîne",
        )),
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            zs_correction_factor: default_zs_factor(),
            preview_limit: default_preview_limit(),
            disabled_rules: Vec::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env_mode: default_env_mode(),
            log_level: default_log_level(),
            log_dir: None,
            rules_path: None,
            presets_path: None,
            checker: CheckerConfig::default(),
        }
    }
}

// --- IMPLÉMENTATION PRINCIPALE ---

impl AppConfig {
    pub fn init() -> Result<()> {
        if CONFIG.get().is_some() {
            return Ok(());
        }

        let target_env = if cfg!(test) || env::get_optional(ENV_MODE).as_deref() == Some("test") {
            "test".to_string()
        } else if let Some(env_override) = env::get_optional(ENV_MODE) {
            env_override
        } else if cfg!(debug_assertions) {
            "development".to_string()
        } else {
            "production".to_string()
        };

        let config = if target_env == "test" {
            Self::create_default_test_config()
        } else {
            Self::load(&target_env)?
        };

        if CONFIG.set(config).is_err() {
            tracing::debug!("AppConfig déjà initialisée par un autre thread");
        }
        Ok(())
    }

    /// Accès global. Sans `init()` préalable, retombe sur la configuration par défaut.
    pub fn get() -> &'static AppConfig {
        CONFIG.get_or_init(AppConfig::default)
    }

    /// Charge la configuration : fichier `EICR_CONFIG` (optionnel) puis surcharges d'environnement.
    pub fn load(env_mode: &str) -> Result<Self> {
        let mut config = match env::get_optional(ENV_CONFIG_PATH) {
            Some(path) => Self::from_path(Path::new(&path))?,
            None => Self::default(),
        };
        config.env_mode = env_mode.to_string();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let config: AppConfig = fs::read_json_sync(path).map_err(|e| {
            AppError::Config(format!("{} ({})", e, path.to_string_lossy()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(level) = env::get_optional(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(dir) = env::get_optional(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(rules) = env::get_optional(ENV_RULES_PATH) {
            self.rules_path = Some(PathBuf::from(rules));
        }
        if let Some(presets) = env::get_optional(ENV_PRESETS_PATH) {
            self.presets_path = Some(PathBuf::from(presets));
        }
        if env::get_optional(ENV_ZS_FACTOR).is_some() {
            self.checker.zs_correction_factor = env::get_parsed(ENV_ZS_FACTOR)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let factor = self.checker.zs_correction_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(AppError::Config(format!(
                "zs_correction_factor doit être dans ]0, 1] (reçu {})",
                factor
            )));
        }
        Ok(())
    }

    fn create_default_test_config() -> Self {
        AppConfig {
            env_mode: "test".to_string(),
            log_level: "debug".to_string(),
            ..AppConfig::default()
        }
    }
}

// --- TESTS UNITAIRES ---
