// FICHIER : src-core/src/reference/mod.rs

pub mod tables;

use crate::rules_engine::evaluator::{smart_number, DataProvider};
use serde_json::Value;
use tables::{CABLE_CAPACITY, CATEGORY_LIMITS, CURVES, MAX_ZS, REFERENCE_METHODS, TE_CPC};

/// Noms des tables consultables via `Expr::Lookup`.
pub const TABLE_CABLE_CAPACITY: &str = "cable_capacity";
pub const TABLE_TE_CPC: &str = "te_cpc";
pub const TABLE_MAX_ZS: &str = "max_zs";
pub const TABLE_CATEGORY: &str = "category";

pub const KNOWN_TABLES: [&str; 4] = [
    TABLE_CABLE_CAPACITY,
    TABLE_TE_CPC,
    TABLE_MAX_ZS,
    TABLE_CATEGORY,
];

const EPSILON: f64 = 1e-6;

fn parse_key(key: &str) -> Option<f64> {
    key.trim().parse::<f64>().ok()
}

fn same(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Tables de référence BS 7671, en lecture seule.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceTables;

impl ReferenceTables {
    pub fn new() -> Self {
        Self
    }

    /// Courant admissible Iz pour une section et une méthode de référence.
    pub fn cable_capacity(&self, size: f64, method: &str) -> Option<f64> {
        let col = REFERENCE_METHODS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(method.trim()))?;
        CABLE_CAPACITY
            .iter()
            .find(|(s, _)| same(*s, size))
            .map(|(_, row)| row[col])
    }

    pub fn te_cpc(&self, live_size: f64) -> Option<f64> {
        TE_CPC
            .iter()
            .find(|(live, _)| same(*live, live_size))
            .map(|(_, cpc)| *cpc)
    }

    /// Zs maximal tabulé (non corrigé) pour une courbe et un calibre.
    pub fn max_zs(&self, curve: &str, rating: f64) -> Option<f64> {
        let col = CURVES
            .iter()
            .position(|c| c.eq_ignore_ascii_case(curve.trim()))?;
        MAX_ZS
            .iter()
            .find(|(r, _)| same(*r, rating))
            .map(|(_, row)| row[col])
    }

    pub fn category_limit(&self, category: &str, column: &str) -> Option<f64> {
        let (_, min_rating, max_rating, min_live) = CATEGORY_LIMITS
            .iter()
            .find(|(name, ..)| *name == category)?;
        match column {
            "min_rating" => Some(*min_rating),
            "max_rating" => Some(*max_rating),
            "min_live_size" => Some(*min_live),
            _ => None,
        }
    }
}

impl DataProvider for ReferenceTables {
    fn get_value(&self, table: &str, key: &str, column: &str) -> Option<Value> {
        let found = match table {
            TABLE_CABLE_CAPACITY => self.cable_capacity(parse_key(key)?, column),
            TABLE_TE_CPC => self.te_cpc(parse_key(key)?),
            TABLE_MAX_ZS => self.max_zs(column, parse_key(key)?),
            TABLE_CATEGORY => self.category_limit(key, column),
            _ => {
                tracing::trace!(table, "Table de référence inconnue");
                None
            }
        };
        found.map(smart_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cable_capacity_lookup() {
        let tables = ReferenceTables::new();
        assert_eq!(tables.cable_capacity(2.5, "C"), Some(27.0));
        assert_eq!(tables.cable_capacity(2.5, "c"), Some(27.0));
        assert_eq!(tables.cable_capacity(1.5, "B"), Some(17.5));
        assert_eq!(tables.cable_capacity(2.5, "E"), None);
        assert_eq!(tables.cable_capacity(25.0, "C"), None);
    }

    #[test]
    fn test_max_zs_and_cpc() {
        let tables = ReferenceTables::new();
        assert_eq!(tables.max_zs("B", 32.0), Some(1.37));
        assert_eq!(tables.max_zs("D", 6.0), Some(1.82));
        assert_eq!(tables.max_zs("K", 32.0), None);
        assert_eq!(tables.te_cpc(2.5), Some(1.5));
        assert_eq!(tables.te_cpc(0.75), None);
    }

    #[test]
    fn test_provider_keys_are_textual() {
        let tables = ReferenceTables::new();
        assert_eq!(
            tables.get_value(TABLE_CABLE_CAPACITY, "2.5", "C"),
            Some(serde_json::json!(27))
        );
        assert_eq!(
            tables.get_value(TABLE_CATEGORY, "shower", "min_live_size"),
            Some(serde_json::json!(6))
        );
        assert_eq!(tables.get_value(TABLE_CATEGORY, "shower", "colour"), None);
        assert_eq!(tables.get_value("voltage_drop", "2.5", "C"), None);
        assert_eq!(tables.get_value(TABLE_TE_CPC, "abc", "cpc"), None);
    }
}
