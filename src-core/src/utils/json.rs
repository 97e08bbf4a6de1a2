// FICHIER : src-core/src/utils/json.rs

use crate::utils::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

// --- RE-EXPORTS (Single Source of Truth pour le JSON) ---
pub use serde_json::{json, Map, Value};

/// Parse une chaîne JSON en un type T.
/// En cas d'échec, l'erreur embarque un extrait du contenu pour le débogage.
pub fn parse<T: DeserializeOwned>(s: &str) -> Result<T> {
    serde_json::from_str(s).map_err(|e| {
        let snippet: String = s.chars().take(100).collect();
        tracing::debug!(snippet = %snippet, "Échec du parsing JSON");
        AppError::Serialization(e)
    })
}

/// Convertit un type T en chaîne JSON compacte.
pub fn stringify<T: Serialize>(v: &T) -> Result<String> {
    Ok(serde_json::to_string(v)?)
}

/// Convertit un type T en chaîne JSON formatée (pretty).
pub fn stringify_pretty<T: Serialize>(v: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(v)?)
}

/// Convertit un `serde_json::Value` en type T.
pub fn from_value<T: DeserializeOwned>(v: Value) -> Result<T> {
    Ok(serde_json::from_value(v)?)
}

/// Convertit un type T en `serde_json::Value`.
pub fn to_value<T: Serialize>(v: T) -> Result<Value> {
    Ok(serde_json::to_value(v)?)
}

/// Fusionne récursivement deux objets JSON (Deep Merge).
/// L'objet `b` écrase les valeurs de `a` en cas de conflit.
pub fn merge(a: &mut Value, b: Value) {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => {
            for (k, v) in b {
                merge(a.entry(k).or_insert(Value::Null), v);
            }
        }
        (a, b) => *a = b,
    }
}
