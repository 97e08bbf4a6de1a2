// FICHIER : src-core/tests/compliance_suite/checker_scenarios.rs

use crate::common::{compliant_ring_final, count, dedup_keys, setup_table};
use eicr::checker::compliance::check_value;
use eicr::checker::{check_regulation_compliance, Assessment, Severity};
use eicr::model::TestResult;
use eicr::utils::AppError;
use serde_json::json;

#[test]
fn test_determinism() {
    let table = setup_table();
    let mut records = vec![compliant_ring_final("c1"), TestResult::default()];
    let mut noisy = compliant_ring_final("c2");
    noisy.zs = "3.2".into();
    noisy.polarity = "Fail".into();
    noisy.cpc_size = "0.5".into();
    records.push(noisy);

    for record in &records {
        let a = check_regulation_compliance(record, &table);
        let b = check_regulation_compliance(record, &table);
        assert_eq!(dedup_keys(&a), dedup_keys(&b));
        assert_eq!(a, b);
    }
}

#[test]
fn test_no_false_positive_on_compliant_ring_final() {
    let table = setup_table();
    let result = check_regulation_compliance(&compliant_ring_final("c1"), &table);

    assert_eq!(count(&result, Severity::Critical), 0, "{:?}", result.warnings);
    assert_eq!(count(&result, Severity::Warning), 0, "{:?}", result.warnings);
    assert!(result.is_compliant());
    assert_eq!(result.overall_assessment, Assessment::Satisfactory);
}

#[test]
fn test_zs_overload_yields_single_critical() {
    let table = setup_table();
    let mut record = compliant_ring_final("c1");
    record.zs = "1.5".into();

    let result = check_regulation_compliance(&record, &table);
    let criticals: Vec<_> = result
        .warnings
        .iter()
        .filter(|w| w.severity == Severity::Critical)
        .collect();

    assert_eq!(criticals.len(), 1, "{:?}", result.warnings);
    assert!(criticals[0].title.to_lowercase().contains("earth fault loop impedance"));
    assert!(criticals[0].description.contains("1.5"));
    assert!(criticals[0].description.contains("1.15"));
    assert_eq!(result.overall_assessment, Assessment::Unsatisfactory);
}

#[test]
fn test_undersized_shower_conductor() {
    let table = setup_table();
    let record = TestResult {
        id: "sh1".into(),
        kind: "Electric Shower".into(),
        live_size: "1.5".into(),
        cpc_size: "1.0".into(),
        protective_device_rating: "40".into(),
        ..TestResult::default()
    };

    let result = check_regulation_compliance(&record, &table);
    assert!(result
        .warnings
        .iter()
        .any(|w| w.severity == Severity::Critical && w.title.to_lowercase().contains("conductor")));
}

#[test]
fn test_graceful_degradation_on_empty_impedance() {
    let table = setup_table();
    let mut record = compliant_ring_final("c1");
    record.zs = "".into();
    record.max_zs = "".into();
    record.protective_device_type = "MCB".into();
    record.protective_device_curve = "B".into();

    let result = check_regulation_compliance(&record, &table);
    assert!(!result
        .warnings
        .iter()
        .any(|w| w.regulation == "411.4.4" || w.title.to_lowercase().contains("impedance")));
}

#[test]
fn test_unreadable_values_are_skipped_not_errors() {
    let table = setup_table();
    let mut record = compliant_ring_final("c1");
    record.zs = "N/A".into();
    record.live_size = "LIM".into();

    let result = check_regulation_compliance(&record, &table);
    assert_eq!(count(&result, Severity::Critical), 0, "{:?}", result.warnings);
}

#[test]
fn test_overlapping_rules_are_deduplicated() {
    let table = setup_table();
    let mut record = compliant_ring_final("c1");
    record.zs = "1.5".into();
    record.protective_device_type = "MCB".into();
    record.protective_device_curve = "B".into();
    record.bs_standard = "BS EN 60898".into();

    let result = check_regulation_compliance(&record, &table);
    let zs_warnings = result
        .warnings
        .iter()
        .filter(|w| w.regulation == "411.4.4")
        .count();
    assert_eq!(zs_warnings, 1);
    assert_eq!(dedup_keys(&result).len(), result.warnings.len());
}

#[test]
fn test_json_boundary() {
    let table = setup_table();
    let result = check_value(
        &json!({ "id": 7, "zs": 1.5, "maxZs": "1.15", "autoFilled": "true" }),
        &table,
    )
    .unwrap();
    assert_eq!(count(&result, Severity::Critical), 1);
    assert!(result.warnings.iter().any(|w| w.rule_id == "AUTOFILL-UNVERIFIED"));

    let err = check_value(&json!(null), &table).unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
    assert!(check_value(&json!([1, 2]), &table).is_err());
}
