// FICHIER : src-core/src/model/facts.rs

use crate::model::normalise::{self, CircuitCategory};
use crate::model::numeric::{parse_leading_number, parse_rating};
use crate::model::test_result::{TestResult, AUTO_FILLED_FIELD};
use crate::rules_engine::evaluator::smart_number;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Faits exposés aux règles et champs bruts dont chacun est dérivé.
/// Un fait absent du contexte rend la règle qui le lit "non évaluable".
pub const FACT_SOURCES: &[(&str, &[&str])] = &[
    ("category", &["type", "circuitType", "circuitDescription"]),
    ("live_size", &["liveSize"]),
    ("cpc_size", &["cpcSize"]),
    ("rating", &["protectiveDeviceRating"]),
    ("device_type", &["protectiveDeviceType"]),
    ("curve", &["protectiveDeviceCurve", "protectiveDeviceType"]),
    ("bs_standard", &["bsStandard", "protectiveDeviceType"]),
    (
        "reference_method",
        &["referenceMethod", "type", "circuitType", "circuitDescription"],
    ),
    ("zs", &["zs"]),
    ("max_zs", &["maxZs"]),
    ("r1r2", &["r1r2"]),
    ("insulation_ln", &["insulationLiveNeutral"]),
    ("insulation_le", &["insulationLiveEarth"]),
    ("polarity", &["polarity"]),
    ("rcd_rating", &["rcdRating"]),
    ("auto_filled", &[AUTO_FILLED_FIELD]),
    ("tests.r1r2", &["r1r2"]),
    ("tests.insulation", &["insulationLiveNeutral"]),
    ("tests.polarity", &["polarity"]),
    ("tests.functional", &["functionalTesting"]),
    ("settings.zs_correction_factor", &[]),
];

pub fn is_known_fact(path: &str) -> bool {
    FACT_SOURCES.iter().any(|(fact, _)| *fact == path)
}

/// Champs bruts du relevé dont dépend un ensemble de faits.
pub fn source_fields<'a, I>(facts: I) -> BTreeSet<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut fields = BTreeSet::new();
    for fact in facts {
        if let Some((_, sources)) = FACT_SOURCES.iter().find(|(name, _)| *name == fact) {
            fields.extend(sources.iter().copied());
        }
    }
    fields
}

/// Faits impactés par la modification d'un ensemble de champs bruts.
pub fn facts_for_fields<'a, I>(fields: I) -> BTreeSet<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let fields: BTreeSet<&str> = fields.into_iter().collect();
    FACT_SOURCES
        .iter()
        .filter(|(_, sources)| sources.iter().any(|s| fields.contains(s)))
        .map(|(fact, _)| *fact)
        .collect()
}

fn recorded(raw: &str) -> bool {
    !raw.trim().is_empty()
}

fn insert_num(ctx: &mut Map<String, Value>, key: &str, n: Option<f64>) {
    if let Some(n) = n {
        ctx.insert(key.to_string(), smart_number(n));
    }
}

fn insert_str(ctx: &mut Map<String, Value>, key: &str, s: Option<String>) {
    if let Some(s) = s {
        ctx.insert(key.to_string(), Value::String(s));
    }
}

/// Construit le contexte d'évaluation d'un relevé.
/// Le relevé n'est jamais modifié ; un champ vide ou illisible n'apparaît pas.
pub fn build_context(record: &TestResult, zs_correction_factor: f64) -> Value {
    let mut ctx = Map::new();

    let category: Option<CircuitCategory> = normalise::infer_category(
        &record.kind,
        &record.circuit_type,
        &record.circuit_description,
    );
    insert_str(&mut ctx, "category", category.map(|c| c.as_str().to_string()));

    insert_num(&mut ctx, "live_size", normalise::conductor_size(&record.live_size));
    insert_num(&mut ctx, "cpc_size", normalise::conductor_size(&record.cpc_size));
    insert_num(
        &mut ctx,
        "rating",
        parse_rating(&record.protective_device_rating).filter(|r| *r > 0.0),
    );

    let device_type = normalise::device_base_type(&record.protective_device_type);
    insert_str(
        &mut ctx,
        "curve",
        normalise::curve(&record.protective_device_curve, &record.protective_device_type),
    );
    let bs_standard = if recorded(&record.bs_standard) {
        Some(record.bs_standard.trim().to_uppercase())
    } else {
        device_type
            .as_deref()
            .and_then(normalise::default_bs_standard)
            .map(str::to_string)
    };
    insert_str(&mut ctx, "bs_standard", bs_standard);
    insert_str(&mut ctx, "device_type", device_type);
    insert_str(
        &mut ctx,
        "reference_method",
        normalise::reference_method(&record.reference_method, category),
    );

    insert_num(&mut ctx, "zs", parse_leading_number(&record.zs));
    insert_num(&mut ctx, "max_zs", parse_leading_number(&record.max_zs));
    insert_num(&mut ctx, "r1r2", parse_leading_number(&record.r1r2));
    insert_num(
        &mut ctx,
        "insulation_ln",
        parse_leading_number(&record.insulation_live_neutral),
    );
    insert_num(
        &mut ctx,
        "insulation_le",
        parse_leading_number(&record.insulation_live_earth),
    );
    insert_str(&mut ctx, "polarity", normalise::polarity(&record.polarity));
    insert_num(&mut ctx, "rcd_rating", parse_leading_number(&record.rcd_rating));
    ctx.insert("auto_filled".to_string(), Value::Bool(record.auto_filled));

    let mut tests = Map::new();
    tests.insert("r1r2".into(), Value::Bool(recorded(&record.r1r2)));
    tests.insert(
        "insulation".into(),
        Value::Bool(recorded(&record.insulation_live_neutral)),
    );
    tests.insert("polarity".into(), Value::Bool(recorded(&record.polarity)));
    tests.insert(
        "functional".into(),
        Value::Bool(recorded(&record.functional_testing)),
    );
    ctx.insert("tests".into(), Value::Object(tests));

    let mut settings = Map::new();
    insert_num(&mut settings, "zs_correction_factor", Some(zs_correction_factor));
    ctx.insert("settings".into(), Value::Object(settings));

    Value::Object(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_result::FIELD_NAMES;

    #[test]
    fn test_every_source_is_a_real_field() {
        for (fact, sources) in FACT_SOURCES {
            for source in *sources {
                assert!(
                    FIELD_NAMES.contains(source) || *source == AUTO_FILLED_FIELD,
                    "{} -> {}",
                    fact,
                    source
                );
            }
        }
    }

    #[test]
    fn test_context_from_compliant_ring_final() {
        let record = TestResult {
            kind: "Ring Final".into(),
            live_size: "2.5".into(),
            cpc_size: "1.5".into(),
            protective_device_type: "MCB".into(),
            protective_device_rating: "32A".into(),
            reference_method: "C".into(),
            zs: "0.5".into(),
            max_zs: "1.15".into(),
            ..TestResult::default()
        };
        let ctx = build_context(&record, 0.8);

        assert_eq!(ctx["category"], "ring_final");
        assert_eq!(ctx["rating"], 32);
        assert_eq!(ctx["live_size"], 2.5);
        assert_eq!(ctx["bs_standard"], "BS EN 60898");
        assert_eq!(ctx["settings"]["zs_correction_factor"], 0.8);
        assert_eq!(ctx["tests"]["r1r2"], false);
        assert!(ctx.get("curve").is_none());
    }

    #[test]
    fn test_blank_and_unparsable_values_are_absent() {
        let record = TestResult {
            zs: "".into(),
            max_zs: "N/A".into(),
            insulation_live_earth: "LIM".into(),
            ..TestResult::default()
        };
        let ctx = build_context(&record, 0.8);
        assert!(ctx.get("zs").is_none());
        assert!(ctx.get("max_zs").is_none());
        assert!(ctx.get("insulation_le").is_none());
        assert!(ctx.get("category").is_none());
    }

    #[test]
    fn test_field_fact_mapping_both_ways() {
        let fields = source_fields(["curve", "zs"]);
        assert!(fields.contains("protectiveDeviceCurve"));
        assert!(fields.contains("protectiveDeviceType"));
        assert!(fields.contains("zs"));

        let facts = facts_for_fields(["protectiveDeviceType"]);
        assert!(facts.contains("device_type"));
        assert!(facts.contains("curve"));
        assert!(facts.contains("bs_standard"));
        assert!(!facts.contains("zs"));
    }
}
