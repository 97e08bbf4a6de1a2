// FICHIER : src-core/src/checker/compliance.rs

use crate::checker::report::{RegulationCheckResult, RegulationWarning};
use crate::checker::template;
use crate::model::facts;
use crate::model::test_result::TestResult;
use crate::rules_engine::ast::Rule;
use crate::rules_engine::evaluator::{DataProvider, Evaluator};
use crate::rules_engine::table::RuleTable;
use crate::utils::{AppError, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Interface commune des vérificateurs de conformité.
pub trait ComplianceChecker: Send + Sync {
    /// Référence de la norme appliquée (ex: "BS 7671:2018+A2:2022").
    fn standard(&self) -> &str;
    fn check(&self, record: &TestResult) -> RegulationCheckResult;
}

impl ComplianceChecker for RuleTable {
    fn standard(&self) -> &str {
        RuleTable::standard(self)
    }

    fn check(&self, record: &TestResult) -> RegulationCheckResult {
        check_regulation_compliance(record, self)
    }
}

/// Vérifie un relevé contre la table de règles.
///
/// Fonction totale et pure : une règle dont un fait est absent ou illisible est
/// ignorée, jamais en erreur. Les avertissements suivent l'ordre de déclaration
/// des règles et sont dédupliqués par `(regulation, title)`.
pub fn check_regulation_compliance(record: &TestResult, table: &RuleTable) -> RegulationCheckResult {
    let ctx = facts::build_context(record, table.settings().zs_correction_factor);
    let provider = table.reference();

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut warnings = Vec::new();

    for rule in table.active_rules() {
        match Evaluator::evaluate_bool(&rule.when, &ctx, provider) {
            Ok(true) => {
                if !seen.insert((rule.regulation.clone(), rule.title.clone())) {
                    tracing::trace!(rule_id = %rule.id, "Avertissement dupliqué ignoré");
                    continue;
                }
                warnings.push(build_warning(rule, &ctx, provider));
            }
            Ok(false) => {}
            Err(e) => {
                tracing::trace!(rule_id = %rule.id, reason = %e, "Règle non évaluable");
            }
        }
    }

    let result = RegulationCheckResult::from_warnings(warnings);
    tracing::debug!(
        circuit = %record.id,
        critical = result.counts.critical,
        warning = result.counts.warning,
        info = result.counts.info,
        "Vérification terminée"
    );
    result
}

fn build_warning(rule: &Rule, ctx: &Value, provider: &dyn DataProvider) -> RegulationWarning {
    let mut bindings = Map::new();
    for (name, expr) in &rule.bindings {
        if let Ok(v) = Evaluator::evaluate(expr, ctx, provider) {
            bindings.insert(name.clone(), v.into_owned());
        }
    }

    RegulationWarning {
        severity: rule.severity,
        rule_id: rule.id.clone(),
        title: rule.title.clone(),
        description: template::render(&rule.message, &bindings, ctx),
        regulation: rule.regulation.clone(),
        suggestion: rule
            .suggestion
            .as_deref()
            .map(|s| template::render(s, &bindings, ctx)),
    }
}

/// Frontière JSON : seul point où le vérificateur peut échouer.
/// `null` ou une valeur non-objet est une erreur d'appel (`InvalidArgument`).
pub fn check_value(value: &Value, table: &RuleTable) -> Result<RegulationCheckResult> {
    let record = record_from_value(value)?;
    Ok(check_regulation_compliance(&record, table))
}

pub fn record_from_value(value: &Value) -> Result<TestResult> {
    match value {
        Value::Null => Err(AppError::InvalidArgument(
            "relevé de circuit absent (null)".to_string(),
        )),
        Value::Object(_) => serde_json::from_value(value.clone()).map_err(|e| {
            AppError::InvalidArgument(format!("relevé de circuit illisible : {}", e))
        }),
        other => Err(AppError::InvalidArgument(format!(
            "relevé de circuit attendu sous forme d'objet, reçu : {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "booléen",
        Value::Number(_) => "nombre",
        Value::String(_) => "chaîne",
        Value::Array(_) => "tableau",
        Value::Object(_) => "objet",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::severity::Severity;
    use crate::rules_engine::ast::Expr;
    use crate::utils::config::CheckerConfig;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn rule(id: &str, title: &str, regulation: &str, when: Expr) -> Rule {
        Rule {
            id: id.into(),
            severity: Severity::Critical,
            title: title.into(),
            regulation: regulation.into(),
            message: "Zs {zs} Ω".into(),
            suggestion: Some("Max {max_zs} Ω".into()),
            when,
            bindings: BTreeMap::new(),
            enabled: true,
        }
    }

    fn zs_gt(other: &str) -> Expr {
        Expr::Gt(
            Box::new(Expr::Var("zs".into())),
            Box::new(Expr::Var(other.into())),
        )
    }

    fn table(rules: Vec<Rule>) -> RuleTable {
        RuleTable::from_rules(rules, CheckerConfig::default()).unwrap()
    }

    #[test]
    fn test_overlapping_rules_are_deduplicated() {
        let t = table(vec![
            rule("A", "Zs too high", "411.4.4", zs_gt("max_zs")),
            rule("B", "Zs too high", "411.4.4", zs_gt("r1r2")),
            rule("C", "Zs too high", "Table 41.3", zs_gt("r1r2")),
        ]);
        let record = TestResult {
            zs: "2".into(),
            max_zs: "1".into(),
            r1r2: "0.5".into(),
            ..TestResult::default()
        };
        let result = check_regulation_compliance(&record, &t);
        let ids: Vec<&str> = result.warnings.iter().map(|w| w.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert_eq!(result.warnings[0].description, "Zs 2 Ω");
        assert_eq!(result.warnings[0].suggestion.as_deref(), Some("Max 1 Ω"));
    }

    #[test]
    fn test_unevaluable_rules_are_skipped() {
        let t = table(vec![rule("A", "Zs too high", "411.4.4", zs_gt("max_zs"))]);
        let record = TestResult {
            zs: "".into(),
            max_zs: "".into(),
            ..TestResult::default()
        };
        assert!(check_regulation_compliance(&record, &t).warnings.is_empty());
    }

    #[test]
    fn test_disabled_rules_do_not_fire() {
        let mut disabled = rule("A", "Zs too high", "411.4.4", zs_gt("max_zs"));
        disabled.enabled = false;
        let t = table(vec![disabled]);
        let record = TestResult {
            zs: "5".into(),
            max_zs: "1".into(),
            ..TestResult::default()
        };
        assert!(t.check(&record).warnings.is_empty());
    }

    #[test]
    fn test_check_value_boundary() {
        let t = table(vec![rule("A", "Zs too high", "411.4.4", zs_gt("max_zs"))]);

        let err = check_value(&Value::Null, &t).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));

        let err = check_value(&json!([1, 2]), &t).unwrap_err();
        assert!(err.to_string().contains("tableau"));

        let ok = check_value(&json!({ "zs": "1.5", "maxZs": 1.15 }), &t).unwrap();
        assert_eq!(ok.counts.critical, 1);
    }
}
