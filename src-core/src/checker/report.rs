// FICHIER : src-core/src/checker/report.rs

use crate::checker::severity::Severity;
use serde::{Deserialize, Serialize};

/// Avertissement produit par une règle déclenchée.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulationWarning {
    pub severity: Severity,
    pub rule_id: String,
    pub title: String,
    pub description: String,
    pub regulation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl RegulationWarning {
    /// Clé de déduplication.
    pub fn dedup_key(&self) -> (&str, &str) {
        (self.regulation.as_str(), self.title.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.warning + self.info
    }
}

/// Appréciation globale dérivée des avertissements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Satisfactory,
    RequiresAttention,
    Unsatisfactory,
}

impl Assessment {
    pub fn from_counts(counts: &SeverityCounts) -> Self {
        if counts.critical > 0 {
            Assessment::Unsatisfactory
        } else if counts.warning > 0 {
            Assessment::RequiresAttention
        } else {
            Assessment::Satisfactory
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulationCheckResult {
    pub warnings: Vec<RegulationWarning>,
    pub overall_assessment: Assessment,
    pub counts: SeverityCounts,
}

impl RegulationCheckResult {
    pub fn from_warnings(warnings: Vec<RegulationWarning>) -> Self {
        let mut counts = SeverityCounts::default();
        for w in &warnings {
            counts.record(w.severity);
        }
        Self {
            overall_assessment: Assessment::from_counts(&counts),
            warnings,
            counts,
        }
    }

    /// Aucun avertissement critique ni "warning" (les infos sont tolérées).
    pub fn is_compliant(&self) -> bool {
        self.counts.critical == 0 && self.counts.warning == 0
    }

    pub fn requires_approval(&self) -> bool {
        self.warnings.iter().any(|w| w.severity.requires_approval())
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.warnings.iter().map(|w| w.severity).max()
    }

    /// Groupes non vides, critique d'abord ; l'ordre de déclaration est conservé dans un groupe.
    pub fn grouped_by_severity(&self) -> Vec<(Severity, Vec<&RegulationWarning>)> {
        Severity::DISPLAY_ORDER
            .iter()
            .map(|sev| {
                let group: Vec<&RegulationWarning> =
                    self.warnings.iter().filter(|w| w.severity == *sev).collect();
                (*sev, group)
            })
            .filter(|(_, group)| !group.is_empty())
            .collect()
    }

    /// Résumé lisible pour les boîtes de dialogue et le CLI.
    pub fn summary(&self) -> String {
        match self.overall_assessment {
            Assessment::Unsatisfactory => format!(
                "Unsatisfactory: {} critical issue(s), {} warning(s)",
                self.counts.critical, self.counts.warning
            ),
            Assessment::RequiresAttention => {
                format!("Requires attention: {} warning(s)", self.counts.warning)
            }
            Assessment::Satisfactory if self.counts.info > 0 => {
                format!("Satisfactory ({} note(s))", self.counts.info)
            }
            Assessment::Satisfactory => "Satisfactory".to_string(),
        }
    }
}
