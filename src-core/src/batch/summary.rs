// FICHIER : src-core/src/batch/summary.rs

use crate::checker::compliance::ComplianceChecker;
use crate::checker::report::{RegulationWarning, SeverityCounts};
use crate::checker::severity::Severity;
use crate::model::test_result::TestResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Avertissement rattaché au circuit qui l'a produit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchIssue {
    pub circuit_id: String,
    pub circuit_description: String,
    #[serde(flatten)]
    pub warning: RegulationWarning,
}

/// Bilan d'un tableau de relevés.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_circuits: usize,
    pub compliant_circuits: usize,
    /// critical + warning (les notes d'information ne comptent pas)
    pub total_issues: usize,
    pub critical_issues: usize,
    pub warning_issues: usize,
    pub info_issues: usize,
    pub issues: Vec<BatchIssue>,
    pub standard: String,
    pub generated_at: DateTime<Utc>,
}

/// Aperçu "voir plus" des anomalies critiques.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPreview<'a> {
    pub issues: Vec<&'a BatchIssue>,
    pub remaining: usize,
}

impl BatchSummary {
    pub fn has_critical(&self) -> bool {
        self.critical_issues > 0
    }

    pub fn counts(&self) -> SeverityCounts {
        SeverityCounts {
            critical: self.critical_issues,
            warning: self.warning_issues,
            info: self.info_issues,
        }
    }

    pub fn issues_with(&self, severity: Severity) -> impl Iterator<Item = &BatchIssue> + '_ {
        self.issues
            .iter()
            .filter(move |i| i.warning.severity == severity)
    }

    /// Les `limit` premières anomalies critiques, dans l'ordre des circuits.
    pub fn critical_preview(&self, limit: usize) -> CriticalPreview<'_> {
        let issues: Vec<&BatchIssue> = self.issues_with(Severity::Critical).take(limit).collect();
        CriticalPreview {
            remaining: self.critical_issues.saturating_sub(issues.len()),
            issues,
        }
    }

    /// Deux bilans identiques au moment de génération près.
    pub fn same_outcome(&self, other: &BatchSummary) -> bool {
        self.total_circuits == other.total_circuits
            && self.compliant_circuits == other.compliant_circuits
            && self.counts() == other.counts()
            && self.issues == other.issues
    }
}

/// Vérifie chaque relevé puis agrège. Un tableau vide donne un bilan à zéro.
pub fn evaluate_batch<C>(records: &[TestResult], checker: &C) -> BatchSummary
where
    C: ComplianceChecker + ?Sized,
{
    let mut counts = SeverityCounts::default();
    let mut compliant_circuits = 0;
    let mut issues = Vec::new();

    for record in records {
        let result = checker.check(record);
        if result.is_compliant() {
            compliant_circuits += 1;
        }
        for warning in result.warnings {
            counts.record(warning.severity);
            issues.push(BatchIssue {
                circuit_id: record.id.clone(),
                circuit_description: record.label(),
                warning,
            });
        }
    }

    tracing::info!(
        circuits = records.len(),
        compliant = compliant_circuits,
        critical = counts.critical,
        warning = counts.warning,
        "Tableau de relevés évalué"
    );

    BatchSummary {
        total_circuits: records.len(),
        compliant_circuits,
        total_issues: counts.critical + counts.warning,
        critical_issues: counts.critical,
        warning_issues: counts.warning,
        info_issues: counts.info,
        issues,
        standard: checker.standard().to_string(),
        generated_at: Utc::now(),
    }
}
