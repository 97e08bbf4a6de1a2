// FICHIER : src-core/tools/eicr-cli/src/commands/mod.rs

pub mod autofill;
pub mod batch;
pub mod check;
pub mod hash;
pub mod rules;

use eicr::checker::compliance::record_from_value;
use eicr::checker::RegulationCheckResult;
use eicr::model::TestResult;
use eicr::rules_engine::RuleTable;
use eicr::utils::context::AppConfig;
use eicr::utils::data::Value;
use eicr::utils::error::{anyhow, AnyResult, Context};
use eicr::utils::io::{self, Path};
use eicr::{user_info, user_success, user_warn};

/// Issue d'une commande, traduite en code de sortie par `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    CriticalFound,
}

/// Table de règles selon la configuration active.
pub fn load_table() -> AnyResult<RuleTable> {
    RuleTable::from_config(AppConfig::get()).context("Chargement de la table de règles")
}

/// Lit un relevé unique.
pub async fn read_record(path: &Path) -> AnyResult<TestResult> {
    let value: Value = io::read_json(path)
        .await
        .with_context(|| format!("Lecture de {}", path.display()))?;
    Ok(record_from_value(&value)?)
}

/// Lit un tableau : soit une liste de relevés, soit `{ "circuits": [...] }`.
pub async fn read_schedule(path: &Path) -> AnyResult<Vec<TestResult>> {
    let value: Value = io::read_json(path)
        .await
        .with_context(|| format!("Lecture de {}", path.display()))?;
    schedule_from_value(&value)
}

pub fn schedule_from_value(value: &Value) -> AnyResult<Vec<TestResult>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("circuits") {
            Some(Value::Array(items)) => items,
            _ => return Err(anyhow!("Objet sans liste 'circuits'")),
        },
        _ => return Err(anyhow!("Tableau de relevés attendu")),
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            record_from_value(item).with_context(|| format!("Relevé n°{} invalide", i + 1))
        })
        .collect()
}

/// Affichage texte d'un résultat, groupé par sévérité.
pub fn print_result(label: &str, result: &RegulationCheckResult) {
    if result.warnings.is_empty() {
        user_success!("CHECK_OK", "{} : aucune anomalie", label);
        return;
    }
    user_info!("CHECK_RESULT", "{} : {}", label, result.summary());
    for (severity, group) in result.grouped_by_severity() {
        for w in group {
            user_warn!(
                "CHECK_ISSUE",
                "[{}|{}] {} ({}) : {}",
                severity.observation_code(),
                severity,
                w.title,
                w.regulation,
                w.description
            );
            if let Some(s) = &w.suggestion {
                println!("      ↳ {}", s);
            }
        }
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> AnyResult<()> {
    println!("{}", eicr::utils::data::stringify_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eicr::utils::data::json;

    #[test]
    fn test_schedule_accepts_list_and_wrapper() {
        let list = json!([{ "id": "c1" }, { "id": "c2" }]);
        assert_eq!(schedule_from_value(&list).unwrap().len(), 2);

        let wrapped = json!({ "circuits": [{ "id": "c1" }] });
        assert_eq!(schedule_from_value(&wrapped).unwrap()[0].id, "c1");
    }

    #[test]
    fn test_schedule_rejects_null_entry() {
        let bad = json!([{ "id": "c1" }, null]);
        let err = schedule_from_value(&bad).unwrap_err();
        assert!(format!("{:#}", err).contains("n°2"));
        assert!(schedule_from_value(&json!("nope")).is_err());
    }
}
