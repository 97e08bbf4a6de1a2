// FICHIER : src-core/src/checker/severity.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Niveau de sévérité d'un avertissement réglementaire.
/// L'ordre de déclaration donne l'ordinal : `Critical > Warning > Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,     // Information / Bleu
    Warning,  // Avertissement / Jaune
    Critical, // Bloquant / Rouge
}

impl Severity {
    /// Ordre d'affichage : critique d'abord.
    pub const DISPLAY_ORDER: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Info];

    /// Une mise à jour automatique est suspendue jusqu'à approbation explicite.
    pub fn requires_approval(&self) -> bool {
        matches!(self, Severity::Warning | Severity::Critical)
    }

    /// Code d'observation EICR correspondant (C2 / C3 / FI).
    pub fn observation_code(&self) -> &'static str {
        match self {
            Severity::Critical => "C2",
            Severity::Warning => "C3",
            Severity::Info => "FI",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_and_approval() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert!(Severity::Critical.requires_approval());
        assert!(Severity::Warning.requires_approval());
        assert!(!Severity::Info.requires_approval());
    }

    #[test]
    fn test_serde_and_codes() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
        let s: Severity = serde_json::from_str("\"info\"").unwrap();
        assert_eq!(s, Severity::Info);
        assert_eq!(Severity::Warning.observation_code(), "C3");
        assert!(serde_json::from_str::<Severity>("\"fatal\"").is_err());
    }
}
