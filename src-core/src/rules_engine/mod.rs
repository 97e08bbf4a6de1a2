// FICHIER : src-core/src/rules_engine/mod.rs

pub mod analyzer;
pub mod ast;
pub mod evaluator;
pub mod store;
pub mod table;

pub use analyzer::Analyzer;
pub use ast::{Expr, Rule};
pub use evaluator::{DataProvider, EvalError, Evaluator, NoOpDataProvider};
pub use store::RuleStore;
pub use table::RuleTable;
