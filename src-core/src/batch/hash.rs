// FICHIER : src-core/src/batch/hash.rs

use crate::model::test_result::TestResult;
use crate::rules_engine::table::RuleTable;
use sha2::{Digest, Sha256};

const RECORD_SEP: u8 = 0x1e;

/// Champs lus par `TestResult::label()` en plus de l'`id`.
pub const LABEL_FIELDS: [&str; 2] = ["circuitNumber", "circuitDescription"];

/// Empreinte SHA-256 (hex) d'un tableau de relevés.
///
/// Couvre l'empreinte de la table (norme, facteur, règles actives), puis pour chaque
/// relevé son `id` et chaque champ brut lu par au moins une règle. Tout changement
/// d'un champ lu change l'empreinte ; les champs purement descriptifs non.
pub fn schedule_hash(records: &[TestResult], table: &RuleTable) -> String {
    let consumed: Vec<&str> = table.consumed_fields().into_iter().collect();
    digest(records, table, &consumed)
}

/// Empreinte d'un bilan complet : `schedule_hash` plus les champs des libellés
/// de circuit recopiés dans le bilan (`BatchIssue::circuit_description`).
pub fn summary_hash(records: &[TestResult], table: &RuleTable) -> String {
    let mut fields: Vec<&str> = table.consumed_fields().into_iter().collect();
    for label in LABEL_FIELDS {
        if !fields.contains(&label) {
            fields.push(label);
        }
    }
    digest(records, table, &fields)
}

fn digest(records: &[TestResult], table: &RuleTable, fields: &[&str]) -> String {
    let mut hasher = Sha256::new();

    update_framed(&mut hasher, table.fingerprint().as_bytes());
    hasher.update([RECORD_SEP]);

    for record in records {
        update_framed(&mut hasher, record.id.as_bytes());
        for field in fields {
            update_framed(&mut hasher, field.as_bytes());
            update_framed(&mut hasher, record.field(field).unwrap_or_default().as_bytes());
        }
        hasher.update([RECORD_SEP]);
    }

    hex::encode(hasher.finalize())
}

// Préfixe de longueur : aucun contenu (même avec des octets de contrôle) ne peut
// déplacer une frontière entre deux valeurs.
fn update_framed(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
