// FICHIER : src-core/src/presets/review.rs

use crate::checker::compliance::check_regulation_compliance;
use crate::checker::report::{RegulationCheckResult, RegulationWarning};
use crate::model::facts;
use crate::model::test_result::TestResult;
use crate::presets::catalog::{PartialUpdate, Preset};
use crate::rules_engine::table::RuleTable;
use crate::utils::{AppError, Result};
use serde::Serialize;

/// Mise à jour en attente : le relevé fusionné et ce qu'il faut montrer à l'inspecteur
/// avant de l'appliquer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingUpdate {
    pub merged: TestResult,
    pub changed_fields: Vec<String>,
    pub impacted_rules: Vec<String>,
    pub warnings: Vec<RegulationWarning>,
    pub requires_approval: bool,
    pub result: RegulationCheckResult,
}

/// Fusionne une mise à jour partielle dans une copie du relevé puis la vérifie.
///
/// Les valeurs vides de la mise à jour n'écrasent rien. Le relevé fusionné est
/// marqué `autoFilled`, et `maxZs` est complété depuis la Table 41.3 quand il est
/// vide et dérivable. L'approbation est requise dès qu'un avertissement
/// `warning` ou `critical` est présent.
pub fn review_update(
    current: &TestResult,
    update: &PartialUpdate,
    table: &RuleTable,
) -> Result<PendingUpdate> {
    let mut merged = current.clone();
    let mut changed_fields = Vec::new();

    for (field, value) in update {
        if field == "id" {
            return Err(AppError::InvalidArgument(
                "une mise à jour ne peut pas modifier l'identifiant du circuit".to_string(),
            ));
        }
        if value.trim().is_empty() {
            continue;
        }
        let before = merged.field(field).map(str::to_string);
        if !merged.set_field(field, value.clone()) {
            return Err(AppError::InvalidArgument(format!(
                "champ inconnu dans la mise à jour : {}",
                field
            )));
        }
        if before.as_deref() != Some(value.as_str()) {
            changed_fields.push(field.clone());
        }
    }

    if merged.max_zs.trim().is_empty() {
        if let Some(max_zs) = derive_max_zs(&merged, table) {
            merged.max_zs = max_zs;
            changed_fields.push("maxZs".to_string());
        }
    }
    merged.auto_filled = true;

    let impacted_rules = table
        .impacted_by_fields(changed_fields.iter().map(String::as_str))
        .into_iter()
        .map(|r| r.id.clone())
        .collect();

    let result = check_regulation_compliance(&merged, table);
    let requires_approval = result.requires_approval();

    tracing::info!(
        circuit = %merged.id,
        changed = changed_fields.len(),
        warnings = result.warnings.len(),
        requires_approval,
        "Mise à jour auto-remplie examinée"
    );

    Ok(PendingUpdate {
        merged,
        changed_fields,
        impacted_rules,
        warnings: result.warnings.clone(),
        requires_approval,
        result,
    })
}

pub fn review_preset(current: &TestResult, preset: &Preset, table: &RuleTable) -> Result<PendingUpdate> {
    review_update(current, &preset.values, table)
}

/// Zs maximal de la Table 41.3 pour un MCB/RCBO dont la courbe et le calibre sont connus,
/// corrigé par `zs_correction_factor` (règle des 80 %) comme la règle `ZS-EXCEEDS-TABLE`.
pub fn derive_max_zs(record: &TestResult, table: &RuleTable) -> Option<String> {
    let factor = table.settings().zs_correction_factor;
    let ctx = facts::build_context(record, factor);
    let standard = ctx.get("bs_standard")?.as_str()?;
    if !(standard.contains("60898") || standard.contains("61009")) {
        return None;
    }
    let curve = ctx.get("curve")?.as_str()?;
    let rating = ctx.get("rating")?.as_f64()?;
    table
        .reference()
        .max_zs(curve, rating)
        .map(|zs| format!("{:.2}", zs * factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::catalog::PresetCatalog;
    use crate::utils::config::CheckerConfig;

    fn blank(id: &str) -> TestResult {
        TestResult {
            id: id.into(),
            circuit_number: "1".into(),
            ..TestResult::default()
        }
    }

    #[test]
    fn test_clean_preset_needs_no_approval() {
        let table = RuleTable::builtin().unwrap();
        let catalog = PresetCatalog::builtin().unwrap();
        let current = blank("c1");

        let pending = review_preset(&current, catalog.get("ring_final").unwrap(), &table).unwrap();

        assert!(pending.merged.auto_filled);
        // 1.37 Ω (Table 41.3, B32) x 0.8
        assert_eq!(pending.merged.max_zs, "1.10");
        assert!(pending.changed_fields.contains(&"maxZs".to_string()));
        assert!(!pending.requires_approval, "{:?}", pending.warnings);
        // Le relevé d'origine n'est pas modifié
        assert_eq!(current, blank("c1"));
        assert!(pending
            .warnings
            .iter()
            .any(|w| w.rule_id == "AUTOFILL-UNVERIFIED"));
    }

    #[test]
    fn test_conflicting_update_requires_approval() {
        let table = RuleTable::builtin().unwrap();
        let mut current = blank("c2");
        current.zs = "1.5".into();

        let mut update = PartialUpdate::new();
        update.insert("type".into(), "Ring Final".into());
        update.insert("protectiveDeviceType".into(), "MCB".into());
        update.insert("protectiveDeviceCurve".into(), "B".into());
        update.insert("protectiveDeviceRating".into(), "32".into());
        update.insert("rcdRating".into(), "".into());

        let pending = review_update(&current, &update, &table).unwrap();
        assert!(pending.requires_approval);
        assert!(pending.impacted_rules.contains(&"ZS-EXCEEDS-TABLE".to_string()));
        assert!(!pending.changed_fields.contains(&"rcdRating".to_string()));
    }

    #[test]
    fn test_invalid_updates_are_rejected() {
        let table = RuleTable::builtin().unwrap();
        let mut update = PartialUpdate::new();
        update.insert("voltage".into(), "230".into());
        assert!(matches!(
            review_update(&blank("c3"), &update, &table),
            Err(AppError::InvalidArgument(_))
        ));

        let mut id_update = PartialUpdate::new();
        id_update.insert("id".into(), "other".into());
        assert!(review_update(&blank("c3"), &id_update, &table).is_err());
    }

    #[test]
    fn test_derived_max_zs_follows_correction_factor() {
        let record = TestResult {
            protective_device_type: "MCB".into(),
            protective_device_curve: "B".into(),
            protective_device_rating: "32".into(),
            ..TestResult::default()
        };
        let table = RuleTable::builtin().unwrap();
        assert_eq!(derive_max_zs(&record, &table).as_deref(), Some("1.10"));

        let uncorrected = RuleTable::from_json_str(
            crate::rules_engine::table::BUILTIN_RULES_JSON,
            CheckerConfig {
                zs_correction_factor: 1.0,
                ..CheckerConfig::default()
            },
        )
        .unwrap();
        assert_eq!(derive_max_zs(&record, &uncorrected).as_deref(), Some("1.37"));

        let fuse = TestResult {
            protective_device_type: "BS 1361 Fuse".into(),
            ..record
        };
        assert_eq!(derive_max_zs(&fuse, &table), None);
    }

    #[test]
    fn test_measured_zs_checked_against_derived_max_zs() {
        let table = RuleTable::builtin().unwrap();
        let catalog = PresetCatalog::builtin().unwrap();
        let mut current = blank("c5");
        current.zs = "1.2".into();

        let pending = review_preset(&current, catalog.get("ring_final").unwrap(), &table).unwrap();
        assert_eq!(pending.merged.max_zs, "1.10");
        assert!(pending.requires_approval);
        assert!(pending
            .warnings
            .iter()
            .any(|w| w.rule_id == "ZS-EXCEEDS-MAX"));
    }

    #[test]
    fn test_existing_max_zs_is_kept() {
        let table = RuleTable::builtin().unwrap();
        let mut current = blank("c4");
        current.max_zs = "1.09".into();
        let catalog = PresetCatalog::builtin().unwrap();

        let pending = review_preset(&current, catalog.get("lighting").unwrap(), &table).unwrap();
        assert_eq!(pending.merged.max_zs, "1.09");
        assert!(!pending.changed_fields.contains(&"maxZs".to_string()));
    }
}
