// FICHIER : src-core/src/rules_engine/table.rs

use crate::model::facts;
use crate::reference::ReferenceTables;
use crate::rules_engine::analyzer::Analyzer;
use crate::rules_engine::ast::Rule;
use crate::rules_engine::store::RuleStore;
use crate::utils::config::{AppConfig, CheckerConfig};
use crate::utils::{fs, json, AppError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// Table BS 7671 embarquée.
pub const BUILTIN_RULES_JSON: &str = include_str!("../../rules/bs7671.json");

const DEFAULT_STANDARD: &str = "BS 7671:2018+A2:2022";

/// Format du fichier de règles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTableFile {
    #[serde(default = "default_standard")]
    pub standard: String,
    #[serde(default)]
    pub version: String,
    pub rules: Vec<Rule>,
}

fn default_standard() -> String {
    DEFAULT_STANDARD.to_string()
}

/// Table de règles immuable : règles validées, tables de référence et réglages.
/// Partageable entre threads (`Send + Sync`), jamais modifiée après chargement.
#[derive(Debug, Clone)]
pub struct RuleTable {
    standard: String,
    version: String,
    store: RuleStore,
    reference: ReferenceTables,
    settings: CheckerConfig,
}

impl RuleTable {
    /// Table embarquée avec les réglages par défaut.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_RULES_JSON, CheckerConfig::default())
    }

    pub fn from_json_str(content: &str, settings: CheckerConfig) -> Result<Self> {
        let file: RuleTableFile = json::parse(content)
            .map_err(|e| AppError::RuleTable(format!("fichier de règles illisible : {}", e)))?;
        Self::from_file(file, settings)
    }

    pub fn from_path(path: &Path, settings: CheckerConfig) -> Result<Self> {
        let file: RuleTableFile = fs::read_json_sync(path)?;
        let table = Self::from_file(file, settings)?;
        tracing::info!(path = %path.display(), rules = table.len(), "Table de règles chargée");
        Ok(table)
    }

    pub fn from_rules(rules: Vec<Rule>, settings: CheckerConfig) -> Result<Self> {
        Self::from_file(
            RuleTableFile {
                standard: default_standard(),
                version: String::new(),
                rules,
            },
            settings,
        )
    }

    /// Table externe si `rules_path` est configuré, sinon table embarquée.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match &config.rules_path {
            Some(path) => Self::from_path(path, config.checker.clone()),
            None => Self::from_json_str(BUILTIN_RULES_JSON, config.checker.clone()),
        }
    }

    fn from_file(file: RuleTableFile, settings: CheckerConfig) -> Result<Self> {
        let mut store = RuleStore::new();
        for rule in file.rules {
            store.register_rule(rule)?;
        }

        for id in &settings.disabled_rules {
            if store.get(id).is_none() {
                tracing::warn!(rule_id = %id, "Règle désactivée inconnue dans la configuration");
            }
        }

        Ok(Self {
            standard: file.standard,
            version: file.version,
            store,
            reference: ReferenceTables::new(),
            settings,
        })
    }

    pub fn standard(&self) -> &str {
        &self.standard
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn settings(&self) -> &CheckerConfig {
        &self.settings
    }

    pub fn reference(&self) -> &ReferenceTables {
        &self.reference
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    pub fn rules(&self) -> &[Rule] {
        self.store.rules()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn is_active(&self, rule: &Rule) -> bool {
        rule.enabled && !self.settings.disabled_rules.iter().any(|id| *id == rule.id)
    }

    /// Règles actives, dans l'ordre de déclaration.
    pub fn active_rules(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.store.rules().iter().filter(move |r| self.is_active(r))
    }

    /// Champs bruts du relevé lus par au moins une règle active.
    pub fn consumed_fields(&self) -> BTreeSet<&'static str> {
        let mut consumed: BTreeSet<String> = BTreeSet::new();
        for rule in self.active_rules() {
            consumed.extend(Analyzer::rule_dependencies(rule));
        }
        facts::source_fields(consumed.iter().map(String::as_str))
    }

    /// Règles actives impactées par la modification de champs bruts.
    pub fn impacted_by_fields<'a, I>(&self, fields: I) -> Vec<&Rule>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let changed: HashSet<String> = facts::facts_for_fields(fields)
            .into_iter()
            .map(str::to_string)
            .collect();
        self.store
            .get_impacted_rules(&changed)
            .into_iter()
            .filter(|r| self.is_active(r))
            .collect()
    }

    /// Empreinte de ce qui, hors relevés, change le résultat d'une vérification.
    /// Le corps sérialisé de chaque règle active est condensé : modifier un prédicat
    /// ou un message sans changer de version change l'empreinte.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for rule in self.active_rules() {
            let body = json::stringify(rule).unwrap_or_else(|_| rule.id.clone());
            hasher.update((body.len() as u64).to_le_bytes());
            hasher.update(body.as_bytes());
        }
        format!(
            "{}|{}|zs={}|{}",
            self.standard,
            self.version,
            self.settings.zs_correction_factor,
            hex::encode(hasher.finalize())
        )
    }
}
