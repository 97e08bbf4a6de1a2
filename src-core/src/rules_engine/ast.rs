// FICHIER : src-core/src/rules_engine/ast.rs

use crate::checker::severity::Severity;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Règle BS 7671 déclarative, telle que décrite dans `rules/bs7671.json`.
///
/// `when` est le prédicat de déclenchement : la règle produit un avertissement
/// lorsqu'il s'évalue à une valeur "vraie". `message` et `suggestion` sont des
/// gabarits dont les `{placeholders}` sont résolus depuis `bindings` puis depuis
/// les faits du circuit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub regulation: String,
    pub message: String,
    #[serde(default)]
    pub suggestion: Option<String>,
    pub when: Expr,
    #[serde(default)]
    pub bindings: BTreeMap<String, Expr>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Arbre Syntaxique Abstrait (AST) des prédicats.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    // --- 1. Primitives & Variables ---
    Val(Value),
    Var(String),
    /// Vrai si le fait existe et n'est pas nul. Ne lève jamais `VarNotFound`.
    Exists(String),

    // --- 2. Logique ---
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    // --- 3. Comparaisons ---
    Eq(Vec<Expr>),
    Neq(Vec<Expr>),
    Gt(Box<Expr>, Box<Expr>),
    Lt(Box<Expr>, Box<Expr>),
    Gte(Box<Expr>, Box<Expr>),
    Lte(Box<Expr>, Box<Expr>),

    // --- 4. Mathématiques ---
    Add(Vec<Expr>),
    Sub(Vec<Expr>),
    Mul(Vec<Expr>),
    Div(Vec<Expr>),
    Abs(Box<Expr>),

    // --- 5. Listes & Chaînes ---
    Len(Box<Expr>),
    Concat(Vec<Expr>),
    Contains {
        list: Box<Expr>,
        value: Box<Expr>,
    },
    Trim(Box<Expr>),
    Lower(Box<Expr>),
    Upper(Box<Expr>),
    RegexMatch {
        value: Box<Expr>,
        pattern: Box<Expr>,
    },

    // --- 6. Tables de référence ---
    Lookup {
        table: String,
        key: Box<Expr>,
        column: Box<Expr>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ast_serialization_primitive() {
        let expr = Expr::Val(json!(42));
        let json = serde_json::to_string(&expr).unwrap();
        assert_eq!(json, r#"{"val":42}"#);
    }

    #[test]
    fn test_ast_deserialization_lookup() {
        let json_str = r#"{
            "lookup": {
                "table": "cable_capacity",
                "key": { "var": "live_size" },
                "column": { "var": "reference_method" }
            }
        }"#;
        let expr: Expr = serde_json::from_str(json_str).expect("Désérialisation échouée");
        match expr {
            Expr::Lookup { table, .. } => assert_eq!(table, "cable_capacity"),
            _ => panic!("Structure incorrecte"),
        }
    }

    #[test]
    fn test_rule_defaults() {
        let json_rule = r#"{
            "id": "ZS-EXCEEDS-MAX",
            "severity": "critical",
            "title": "Earth fault loop impedance exceeds maximum",
            "regulation": "411.4.4",
            "message": "Zs {zs} > {max_zs}",
            "when": { "gt": [{ "var": "zs" }, { "var": "max_zs" }] }
        }"#;
        let rule: Rule = serde_json::from_str(json_rule).unwrap();
        assert!(rule.enabled);
        assert!(rule.suggestion.is_none());
        assert!(rule.bindings.is_empty());
        assert_eq!(rule.severity, Severity::Critical);
    }

    #[test]
    fn test_exists_and_regex_variants() {
        let exists: Expr = serde_json::from_str(r#"{ "exists": "rcd_rating" }"#).unwrap();
        assert_eq!(exists, Expr::Exists("rcd_rating".into()));

        let regex_json = r#"{
            "regex_match": {
                "value": { "var": "bs_standard" },
                "pattern": { "val": "60898|61009" }
            }
        }"#;
        let regex_expr: Expr = serde_json::from_str(regex_json).unwrap();
        assert!(matches!(regex_expr, Expr::RegexMatch { .. }));
    }
}
