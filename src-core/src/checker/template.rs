// FICHIER : src-core/src/checker/template.rs

use crate::rules_engine::evaluator::value_to_key;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::OnceLock;

fn placeholder_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([a-z_][a-z0-9_.]*)\}").ok())
        .as_ref()
}

fn lookup<'a>(path: &str, bindings: &'a Map<String, Value>, ctx: &'a Value) -> Option<&'a Value> {
    if let Some(v) = bindings.get(path) {
        return Some(v);
    }
    path.split('.')
        .try_fold(ctx, |current, part| current.get(part))
}

/// Remplit les `{placeholders}` d'un gabarit, d'abord depuis `bindings`, puis depuis les faits.
/// Un placeholder non résolu est laissé tel quel.
pub fn render(template: &str, bindings: &Map<String, Value>, ctx: &Value) -> String {
    let Some(re) = placeholder_re() else {
        return template.to_string();
    };
    re.replace_all(template, |caps: &Captures| match lookup(&caps[1], bindings, ctx) {
        Some(v) if !v.is_null() => format_value(v),
        _ => caps[0].to_string(),
    })
    .into_owned()
}

fn format_value(v: &Value) -> String {
    match v.as_f64() {
        // Arrondi d'affichage : 0.67 * 32 = 21.44 et non 21.440000000000001
        Some(n) => value_to_key(&serde_json::json!((n * 1000.0).round() / 1000.0)),
        None => value_to_key(v),
    }
}
