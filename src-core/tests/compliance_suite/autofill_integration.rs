// FICHIER : src-core/tests/compliance_suite/autofill_integration.rs

use crate::common::setup_table;
use eicr::checker::Severity;
use eicr::model::TestResult;
use eicr::presets::{review_preset, review_update, PartialUpdate, PresetCatalog};

#[test]
fn test_every_builtin_preset_is_clean() {
    let table = setup_table();
    let catalog = PresetCatalog::builtin().unwrap();

    for preset in catalog.presets() {
        let current = TestResult {
            id: preset.name.clone(),
            ..TestResult::default()
        };
        let pending = review_preset(&current, preset, &table).unwrap();
        assert!(
            !pending.requires_approval,
            "preset {} : {:?}",
            preset.name,
            pending.warnings
        );
        assert!(!pending.merged.max_zs.is_empty(), "preset {}", preset.name);
    }
}

#[test]
fn test_update_that_breaks_sizing_requires_approval() {
    let table = setup_table();
    let catalog = PresetCatalog::builtin().unwrap();
    let shower = catalog.get("shower").unwrap();

    let mut update: PartialUpdate = shower.values.clone();
    update.insert("liveSize".into(), "2.5".into());

    let pending = review_update(&TestResult::default(), &update, &table).unwrap();
    assert!(pending.requires_approval);
    assert!(pending
        .warnings
        .iter()
        .any(|w| w.severity == Severity::Critical && w.rule_id.starts_with("CABLE")));
    assert!(pending.impacted_rules.iter().any(|id| id == "CABLE-CAPACITY"));
}
