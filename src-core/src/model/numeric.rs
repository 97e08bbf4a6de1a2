// FICHIER : src-core/src/model/numeric.rs

use regex::Regex;
use std::sync::OnceLock;

fn leading_number_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    // Qualificatif optionnel (">200", "<0.01", "≥ 2") puis le premier nombre.
    RE.get_or_init(|| Regex::new(r"^\s*(?:[<>≤≥~]=?\s*)?(-?(?:\d+(?:[.,]\d+)?|[.,]\d+))").ok())
        .as_ref()
}

fn any_number_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:[.,]\d+)?").ok()).as_ref()
}

fn to_f64(token: &str) -> Option<f64> {
    token.replace(',', ".").parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Extrait le nombre en tête de chaîne : "32A" -> 32, ">200" -> 200, "1.5mm²" -> 1.5.
/// Une chaîne sans nombre en tête ("", "N/A", "LIM") est absente, jamais zéro.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    leading_number_re()?
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| to_f64(m.as_str()))
}

/// Calibre d'un dispositif : accepte aussi les notations préfixées ("B32", "C16").
pub fn parse_rating(raw: &str) -> Option<f64> {
    parse_leading_number(raw).or_else(|| {
        any_number_re()?
            .find(raw)
            .and_then(|m| to_f64(m.as_str()))
    })
}
