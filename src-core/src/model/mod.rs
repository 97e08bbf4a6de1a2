// FICHIER : src-core/src/model/mod.rs

pub mod facts;
pub mod normalise;
pub mod numeric;
pub mod test_result;

pub use normalise::CircuitCategory;
pub use test_result::TestResult;
