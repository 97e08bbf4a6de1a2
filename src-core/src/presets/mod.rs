// FICHIER : src-core/src/presets/mod.rs

pub mod catalog;
pub mod review;

pub use catalog::{PartialUpdate, Preset, PresetCatalog};
pub use review::{derive_max_zs, review_preset, review_update, PendingUpdate};
