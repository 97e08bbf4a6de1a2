// FICHIER : src-core/src/model/test_result.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Relevé d'essais d'un circuit (ligne du "schedule of test results").
///
/// Tous les champs sont des chaînes : les valeurs numériques arrivent telles que
/// saisies ("32A", ">200", "N/A"). Un champ vide équivaut à un champ absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestResult {
    #[serde(deserialize_with = "flexible_string")]
    pub id: String,
    #[serde(deserialize_with = "flexible_string")]
    pub circuit_number: String,
    #[serde(deserialize_with = "flexible_string")]
    pub circuit_description: String,
    #[serde(deserialize_with = "flexible_string")]
    pub circuit_type: String,
    #[serde(rename = "type", deserialize_with = "flexible_string")]
    pub kind: String,
    #[serde(deserialize_with = "flexible_string")]
    pub live_size: String,
    #[serde(deserialize_with = "flexible_string")]
    pub cpc_size: String,
    #[serde(deserialize_with = "flexible_string")]
    pub protective_device_type: String,
    #[serde(deserialize_with = "flexible_string")]
    pub protective_device_rating: String,
    #[serde(deserialize_with = "flexible_string")]
    pub protective_device_curve: String,
    #[serde(deserialize_with = "flexible_string")]
    pub bs_standard: String,
    #[serde(deserialize_with = "flexible_string")]
    pub reference_method: String,
    #[serde(deserialize_with = "flexible_string")]
    pub zs: String,
    #[serde(deserialize_with = "flexible_string")]
    pub max_zs: String,
    #[serde(deserialize_with = "flexible_string")]
    pub r1r2: String,
    #[serde(deserialize_with = "flexible_string")]
    pub insulation_live_neutral: String,
    #[serde(deserialize_with = "flexible_string")]
    pub insulation_live_earth: String,
    #[serde(deserialize_with = "flexible_string")]
    pub polarity: String,
    #[serde(deserialize_with = "flexible_string")]
    pub functional_testing: String,
    #[serde(deserialize_with = "flexible_string")]
    pub rcd_rating: String,
    #[serde(deserialize_with = "flexible_bool")]
    pub auto_filled: bool,
}

/// Noms JSON des champs texte, dans l'ordre de déclaration.
pub const FIELD_NAMES: &[&str] = &[
    "id",
    "circuitNumber",
    "circuitDescription",
    "circuitType",
    "type",
    "liveSize",
    "cpcSize",
    "protectiveDeviceType",
    "protectiveDeviceRating",
    "protectiveDeviceCurve",
    "bsStandard",
    "referenceMethod",
    "zs",
    "maxZs",
    "r1r2",
    "insulationLiveNeutral",
    "insulationLiveEarth",
    "polarity",
    "functionalTesting",
    "rcdRating",
];

pub const AUTO_FILLED_FIELD: &str = "autoFilled";

impl TestResult {
    /// Accès à un champ brut par son nom JSON. `autoFilled` est rendu en "true"/"false".
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "id" => &self.id,
            "circuitNumber" => &self.circuit_number,
            "circuitDescription" => &self.circuit_description,
            "circuitType" => &self.circuit_type,
            "type" => &self.kind,
            "liveSize" => &self.live_size,
            "cpcSize" => &self.cpc_size,
            "protectiveDeviceType" => &self.protective_device_type,
            "protectiveDeviceRating" => &self.protective_device_rating,
            "protectiveDeviceCurve" => &self.protective_device_curve,
            "bsStandard" => &self.bs_standard,
            "referenceMethod" => &self.reference_method,
            "zs" => &self.zs,
            "maxZs" => &self.max_zs,
            "r1r2" => &self.r1r2,
            "insulationLiveNeutral" => &self.insulation_live_neutral,
            "insulationLiveEarth" => &self.insulation_live_earth,
            "polarity" => &self.polarity,
            "functionalTesting" => &self.functional_testing,
            "rcdRating" => &self.rcd_rating,
            AUTO_FILLED_FIELD => return Some(if self.auto_filled { "true" } else { "false" }),
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Modifie un champ texte par son nom JSON. Retourne `false` si le nom est inconnu.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "id" => &mut self.id,
            "circuitNumber" => &mut self.circuit_number,
            "circuitDescription" => &mut self.circuit_description,
            "circuitType" => &mut self.circuit_type,
            "type" => &mut self.kind,
            "liveSize" => &mut self.live_size,
            "cpcSize" => &mut self.cpc_size,
            "protectiveDeviceType" => &mut self.protective_device_type,
            "protectiveDeviceRating" => &mut self.protective_device_rating,
            "protectiveDeviceCurve" => &mut self.protective_device_curve,
            "bsStandard" => &mut self.bs_standard,
            "referenceMethod" => &mut self.reference_method,
            "zs" => &mut self.zs,
            "maxZs" => &mut self.max_zs,
            "r1r2" => &mut self.r1r2,
            "insulationLiveNeutral" => &mut self.insulation_live_neutral,
            "insulationLiveEarth" => &mut self.insulation_live_earth,
            "polarity" => &mut self.polarity,
            "functionalTesting" => &mut self.functional_testing,
            "rcdRating" => &mut self.rcd_rating,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// Libellé lisible du circuit pour les rapports ("3 - Kitchen Sockets").
    pub fn label(&self) -> String {
        match (self.circuit_number.trim(), self.circuit_description.trim()) {
            ("", "") => self.id.clone(),
            ("", desc) => desc.to_string(),
            (num, "") => num.to_string(),
            (num, desc) => format!("{} - {}", num, desc),
        }
    }
}

// --- HELPERS SERDE ---

fn flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Value = Deserialize::deserialize(deserializer)?;
    match v {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(serde::de::Error::custom(
            "Format invalide : attendu texte, nombre ou null",
        )),
    }
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Value = Deserialize::deserialize(deserializer)?;
    match v {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::String(s) => Ok(matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "yes"
        )),
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0) != 0.0),
        _ => Err(serde::de::Error::custom(
            "Format invalide pour autoFilled : attendu booléen",
        )),
    }
}
