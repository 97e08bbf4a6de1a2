// FICHIER : src-core/src/batch/mod.rs

pub mod hash;
pub mod memo;
pub mod summary;

pub use hash::{schedule_hash, summary_hash};
pub use memo::BatchMemo;
pub use summary::{evaluate_batch, BatchIssue, BatchSummary, CriticalPreview};
