// FICHIER : src-core/src/utils/mod.rs

// =========================================================================
//  EICR UTILS - Foundation Layer
// =========================================================================

// --- 1. MODULES INTERNES ---
pub mod config;
pub mod env;
pub mod error;
pub mod fs;
pub mod json;
pub mod logger;
pub mod macros;

// --- 2. FAÇADES SÉMANTIQUES ---

/// **Core Foundation** : Types de base et Erreurs.
pub mod core {
    pub use super::error::{AppError, Result};
    pub use chrono::{DateTime, Utc};
}

/// **Physical Layer (I/O)** : lecture des relevés, tables et presets.
pub mod io {
    pub use super::fs::{exists, read_json, read_json_sync, read_to_string, Path, PathBuf};
}

/// **Data Abstraction** : Manipulation JSON.
pub mod data {
    pub use super::json::{
        from_value, json, merge, parse, stringify, stringify_pretty, to_value, Map, Value,
    };
    pub use serde::{Deserialize, Serialize};
    pub use std::collections::{BTreeMap, HashMap, HashSet};
}

/// **Application Context** : Accès global Config/Log/Env.
pub mod context {
    pub use super::config::{AppConfig, CheckerConfig};
    pub use super::env::{get, get_optional, get_or, get_parsed, is_enabled};
    pub use super::logger::init_logging;
}

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::context::AppConfig;
    pub use super::core::{AppError, Result};
    pub use super::data::{json, Deserialize, Serialize, Value};
    pub use tracing::{debug, error, info, instrument, warn};
}

// --> Exports directs
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use logger::init_logging;
