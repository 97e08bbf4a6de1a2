// FICHIER : src-core/tests/compliance_suite/rule_table_loading.rs

use crate::common::compliant_ring_final;
use eicr::checker::{check_regulation_compliance, ComplianceChecker};
use eicr::rules_engine::RuleTable;
use eicr::utils::config::{AppConfig, CheckerConfig};
use eicr::utils::AppError;
use tempfile::tempdir;

const SINGLE_RULE: &str = r#"{
    "standard": "BS 7671 (site)",
    "version": "test",
    "rules": [{
        "id": "ZS-LIMIT",
        "severity": "critical",
        "title": "Zs too high",
        "regulation": "411.4.4",
        "message": "Zs {zs} above 1",
        "when": { "gt": [ { "var": "zs" }, { "val": 1.0 } ] }
    }]
}"#;

#[test]
fn test_external_table_from_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");
    std::fs::write(&path, SINGLE_RULE).unwrap();

    let config = AppConfig {
        rules_path: Some(path),
        ..AppConfig::default()
    };
    let table = RuleTable::from_config(&config).unwrap();
    assert_eq!(table.len(), 1);

    let checker: &dyn ComplianceChecker = &table;
    assert_eq!(checker.standard(), "BS 7671 (site)");

    let mut record = compliant_ring_final("c1");
    record.zs = "1.1".into();
    let result = checker.check(&record);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].description, "Zs 1.1 above 1");
}

#[test]
fn test_unknown_fact_is_rejected_at_load() {
    let bad = SINGLE_RULE.replace("\"var\": \"zs\"", "\"var\": \"voltage\"");
    let err = RuleTable::from_json_str(&bad, CheckerConfig::default()).unwrap_err();
    assert!(matches!(err, AppError::RuleTable(_)));
}

#[test]
fn test_disabled_rules_and_factor_from_settings() {
    let settings = CheckerConfig {
        disabled_rules: vec!["TESTING-INCOMPLETE".into()],
        ..CheckerConfig::default()
    };
    let table = RuleTable::from_json_str(eicr::rules_engine::table::BUILTIN_RULES_JSON, settings)
        .unwrap();
    let result = check_regulation_compliance(&compliant_ring_final("c1"), &table);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}
