// FICHIER : src-core/tests/compliance_suite/batch_integration.rs

use crate::common::{compliant_ring_final, setup_table};
use eicr::batch::{evaluate_batch, schedule_hash, BatchMemo};
use eicr::model::test_result::AUTO_FILLED_FIELD;
use eicr::model::TestResult;

fn three_circuits() -> Vec<TestResult> {
    let ok = compliant_ring_final("c1");

    let mut warned = compliant_ring_final("c2");
    warned.circuit_number = "2".into();
    warned.cpc_size = "1.0".into();

    let mut critical = compliant_ring_final("c3");
    critical.circuit_number = "3".into();
    critical.zs = "1.5".into();

    vec![ok, warned, critical]
}

#[test]
fn test_batch_aggregation() {
    let table = setup_table();
    let summary = evaluate_batch(&three_circuits(), &table);

    assert_eq!(summary.total_circuits, 3);
    assert_eq!(summary.compliant_circuits, 1);
    assert_eq!(summary.warning_issues, 1);
    assert_eq!(summary.critical_issues, 1);
    assert_eq!(summary.total_issues, 2);

    let preview = summary.critical_preview(5);
    assert_eq!(preview.issues.len(), 1);
    assert_eq!(preview.issues[0].circuit_id, "c3");
    assert_eq!(preview.remaining, 0);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["compliantCircuits"], 1);
    assert_eq!(json["totalIssues"], 2);
}

#[test]
fn test_hash_changes_with_every_consumed_field() {
    let table = setup_table();
    let base = three_circuits();
    let base_hash = schedule_hash(&base, &table);

    let consumed = table.consumed_fields();
    assert!(!consumed.is_empty());

    for field in consumed {
        let mut changed = base.clone();
        if field == AUTO_FILLED_FIELD {
            changed[1].auto_filled = !changed[1].auto_filled;
        } else {
            let current = changed[1].field(field).unwrap_or_default().to_string();
            assert!(changed[1].set_field(field, format!("{}9", current)), "{}", field);
        }
        assert_ne!(schedule_hash(&changed, &table), base_hash, "champ {}", field);
    }
}

#[test]
fn test_hash_ignores_unconsumed_fields() {
    let table = setup_table();
    let base = three_circuits();
    let mut relabelled = base.clone();
    relabelled[0].circuit_number = "42".into();

    assert!(!table.consumed_fields().contains("circuitNumber"));
    assert_eq!(schedule_hash(&base, &table), schedule_hash(&relabelled, &table));
}

#[test]
fn test_memo_reuses_summary_until_schedule_changes() {
    let table = setup_table();
    let memo = BatchMemo::default();
    let mut records = three_circuits();

    let first = memo.evaluate(&records, &table);
    assert!(first.same_outcome(&memo.evaluate(&records, &table)));
    assert_eq!(memo.len(), 1);

    records[0].zs = "2.0".into();
    let second = memo.evaluate(&records, &table);
    assert_eq!(second.critical_issues, 2);
    assert_eq!(memo.len(), 2);
}
