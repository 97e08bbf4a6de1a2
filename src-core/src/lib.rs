// FICHIER : src-core/src/lib.rs

pub mod utils;

pub mod model;
pub mod reference;
pub mod rules_engine;

pub mod batch;
pub mod checker;
pub mod presets;

pub use batch::{evaluate_batch, schedule_hash, BatchMemo, BatchSummary};
pub use checker::{
    check_regulation_compliance, Assessment, ComplianceChecker, RegulationCheckResult,
    RegulationWarning, Severity,
};
pub use model::TestResult;
pub use presets::{review_update, PendingUpdate, PresetCatalog};
pub use rules_engine::RuleTable;
pub use utils::{AppConfig, AppError, Result};
