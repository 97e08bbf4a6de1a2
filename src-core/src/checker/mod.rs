// FICHIER : src-core/src/checker/mod.rs

pub mod compliance;
pub mod report;
pub mod severity;
pub mod template;

pub use compliance::{check_regulation_compliance, check_value, ComplianceChecker};
pub use report::{Assessment, RegulationCheckResult, RegulationWarning, SeverityCounts};
pub use severity::Severity;
