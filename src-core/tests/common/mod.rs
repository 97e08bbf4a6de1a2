// FICHIER : src-core/tests/common/mod.rs

use eicr::checker::{RegulationCheckResult, Severity};
use eicr::model::TestResult;
use eicr::rules_engine::RuleTable;
use std::sync::Once;

static INIT: Once = Once::new();

/// Table embarquée, avec un subscriber de test initialisé une seule fois.
pub fn setup_table() -> RuleTable {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
    RuleTable::builtin().expect("La table embarquée doit être valide")
}

/// Ring final conforme : 2.5/1.5 mm², 32 A, méthode C, Zs 0.5 / 1.15 Ω.
pub fn compliant_ring_final(id: &str) -> TestResult {
    TestResult {
        id: id.into(),
        circuit_number: "1".into(),
        circuit_description: "Kitchen Sockets".into(),
        kind: "Ring Final".into(),
        live_size: "2.5".into(),
        cpc_size: "1.5".into(),
        protective_device_rating: "32".into(),
        reference_method: "C".into(),
        zs: "0.5".into(),
        max_zs: "1.15".into(),
        ..TestResult::default()
    }
}

#[allow(dead_code)]
pub fn count(result: &RegulationCheckResult, severity: Severity) -> usize {
    result
        .warnings
        .iter()
        .filter(|w| w.severity == severity)
        .count()
}

#[allow(dead_code)]
pub fn dedup_keys(result: &RegulationCheckResult) -> std::collections::BTreeSet<(String, String)> {
    result
        .warnings
        .iter()
        .map(|w| (w.regulation.clone(), w.title.clone()))
        .collect()
}
