// FICHIER : src-core/src/model/normalise.rs

use crate::model::numeric::parse_leading_number;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Catégorie de circuit déduite du type ou de la description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitCategory {
    RingFinal,
    RadialSocket,
    Lighting,
    Shower,
    Cooker,
    Immersion,
    EvCharger,
}

impl CircuitCategory {
    pub const ALL: [CircuitCategory; 7] = [
        CircuitCategory::RingFinal,
        CircuitCategory::RadialSocket,
        CircuitCategory::Lighting,
        CircuitCategory::Shower,
        CircuitCategory::Cooker,
        CircuitCategory::Immersion,
        CircuitCategory::EvCharger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitCategory::RingFinal => "ring_final",
            CircuitCategory::RadialSocket => "radial_socket",
            CircuitCategory::Lighting => "lighting",
            CircuitCategory::Shower => "shower",
            CircuitCategory::Cooker => "cooker",
            CircuitCategory::Immersion => "immersion",
            CircuitCategory::EvCharger => "ev_charger",
        }
    }

    /// Méthode d'installation supposée quand le relevé n'en indique pas.
    pub fn default_reference_method(&self) -> &'static str {
        match self {
            CircuitCategory::Shower | CircuitCategory::Cooker => "B",
            _ => "C",
        }
    }

    pub fn is_socket(&self) -> bool {
        matches!(self, CircuitCategory::RingFinal | CircuitCategory::RadialSocket)
    }
}

impl fmt::Display for CircuitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn category_patterns() -> &'static [(CircuitCategory, Regex)] {
    static PATTERNS: OnceLock<Vec<(CircuitCategory, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        // L'ordre compte : "Ring Final Sockets" est un ring, pas une radiale.
        [
            (CircuitCategory::EvCharger, r"(?i)\bev\b|electric vehicle|car charg|ev[- ]?charg"),
            (CircuitCategory::Shower, r"(?i)shower"),
            (CircuitCategory::Cooker, r"(?i)cooker|oven|\bhob\b"),
            (CircuitCategory::Immersion, r"(?i)immersion|water heater"),
            (CircuitCategory::RingFinal, r"(?i)\bring\b"),
            (CircuitCategory::Lighting, r"(?i)light"),
            (CircuitCategory::RadialSocket, r"(?i)socket|radial"),
        ]
        .into_iter()
        .filter_map(|(category, pattern)| Regex::new(pattern).ok().map(|re| (category, re)))
        .collect()
    })
}

/// Classe un libellé libre ("Downstairs Lights", "Electric Shower").
pub fn classify(label: &str) -> Option<CircuitCategory> {
    if label.trim().is_empty() {
        return None;
    }
    category_patterns()
        .iter()
        .find(|(_, re)| re.is_match(label))
        .map(|(category, _)| *category)
}

/// Catégorie d'un circuit : `type`, puis `circuitType`, puis `circuitDescription`.
pub fn infer_category(kind: &str, circuit_type: &str, description: &str) -> Option<CircuitCategory> {
    [kind, circuit_type, description]
        .into_iter()
        .find_map(classify)
}

/// Section de conducteur en mm². Zéro ou négatif est traité comme absent.
pub fn conductor_size(raw: &str) -> Option<f64> {
    parse_leading_number(raw).filter(|size| *size > 0.0)
}

/// Famille du dispositif de protection : MCB, RCBO, RCD ou FUSE.
pub fn device_base_type(raw: &str) -> Option<String> {
    let upper = raw.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }
    let base = if upper.contains("RCBO") {
        "RCBO"
    } else if upper.contains("RCD") || upper.contains("RCCB") {
        "RCD"
    } else if upper.contains("MCB") || upper.starts_with("TYPE") {
        "MCB"
    } else if upper.contains("FUSE")
        || ["BS 88", "BS88", "BS 1361", "BS1361", "BS 3036", "BS3036", "BS 1362", "BS1362"]
            .iter()
            .any(|std| upper.contains(std))
    {
        "FUSE"
    } else {
        return Some(upper);
    };
    Some(base.to_string())
}

fn curve_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:^|\btype\s*)([BCD123])\b").ok())
        .as_ref()
}

fn curve_letter(token: &str) -> String {
    match token.to_uppercase().as_str() {
        "1" => "B".to_string(),
        "2" => "C".to_string(),
        "3" => "D".to_string(),
        other => other.to_string(),
    }
}

/// Courbe de déclenchement. Les anciens "Type 1/2/3" deviennent B/C/D.
/// Sans courbe explicite, on la cherche dans le libellé du dispositif ("MCB Type C").
pub fn curve(curve_raw: &str, device_raw: &str) -> Option<String> {
    let trimmed = curve_raw.trim();
    if !trimmed.is_empty() {
        return Some(match curve_re().and_then(|re| re.captures(trimmed)) {
            Some(caps) => curve_letter(&caps[1]),
            None => trimmed.to_uppercase(),
        });
    }
    let device = device_raw.trim();
    if device.is_empty() || !device.to_lowercase().contains("type") {
        return None;
    }
    curve_re()?
        .captures(device)
        .map(|caps| curve_letter(&caps[1]))
}

/// Norme par défaut d'une famille de dispositif.
pub fn default_bs_standard(device_type: &str) -> Option<&'static str> {
    match device_type {
        "MCB" => Some("BS EN 60898"),
        "RCBO" => Some("BS EN 61009"),
        "RCD" => Some("BS EN 61008"),
        "FUSE" => Some("BS 1361"),
        _ => None,
    }
}

/// Méthode de référence normalisée ("Method C" -> "C", "100").
pub fn reference_method(raw: &str, category: Option<CircuitCategory>) -> Option<String> {
    let upper = raw.trim().to_uppercase();
    let cleaned = upper.strip_prefix("METHOD").unwrap_or(&upper).trim();
    if !cleaned.is_empty() {
        return Some(cleaned.to_string());
    }
    category.map(|c| c.default_reference_method().to_string())
}

/// Résultat de polarité : "pass", "fail" ou "n/a". Toute autre saisie est gardée en minuscules.
pub fn polarity(raw: &str) -> Option<String> {
    let lower = raw.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }
    let normalised = match lower.as_str() {
        "✓" | "✔" | "pass" | "passed" | "ok" | "yes" | "y" | "correct" | "sat" => "pass",
        "✗" | "✘" | "x" | "fail" | "failed" | "no" | "n" | "incorrect" | "unsat" => "fail",
        "n/a" | "na" | "lim" => "n/a",
        _ => return Some(lower),
    };
    Some(normalised.to_string())
}
