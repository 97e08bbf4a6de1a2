// FICHIER : src-core/src/rules_engine/store.rs

use crate::model::facts;
use crate::rules_engine::analyzer::{Analyzer, MAX_RULE_DEPTH};
use crate::rules_engine::ast::Rule;
use crate::utils::{AppError, Result};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Registre ordonné des règles avec index inversé des dépendances.
#[derive(Debug, Default, Clone)]
pub struct RuleStore {
    /// Règles dans l'ordre de déclaration (ordre d'émission des avertissements)
    rules: Vec<Rule>,
    /// "rule_id" -> position dans `rules`
    positions: HashMap<String, usize>,
    /// Index inversé : "fait" -> Vec<"rule_id">
    dependency_cache: HashMap<String, Vec<String>>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre une règle après validation (profondeur, faits connus, unicité).
    /// Ré-enregistrer une règle strictement identique est sans effet.
    pub fn register_rule(&mut self, rule: Rule) -> Result<()> {
        if let Some(&pos) = self.positions.get(&rule.id) {
            if self.rules[pos] == rule {
                return Ok(());
            }
            return Err(AppError::RuleTable(format!(
                "identifiant de règle dupliqué : {}",
                rule.id
            )));
        }

        Analyzer::validate_depth(&rule.when, MAX_RULE_DEPTH)
            .map_err(|e| AppError::RuleTable(format!("{} : {}", rule.id, e)))?;
        for expr in rule.bindings.values() {
            Analyzer::validate_depth(expr, MAX_RULE_DEPTH)
                .map_err(|e| AppError::RuleTable(format!("{} : {}", rule.id, e)))?;
        }

        let deps = Analyzer::rule_dependencies(&rule);
        if let Some(unknown) = deps.iter().find(|d| !facts::is_known_fact(d)) {
            return Err(AppError::RuleTable(format!(
                "{} : fait inconnu '{}'",
                rule.id, unknown
            )));
        }

        for dep in deps {
            self.dependency_cache
                .entry(dep)
                .or_default()
                .push(rule.id.clone());
        }
        self.positions.insert(rule.id.clone(), self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.positions.get(id).map(|&pos| &self.rules[pos])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Règles impactées par un ensemble de faits modifiés, dans l'ordre de déclaration.
    pub fn get_impacted_rules(&self, changed_facts: &HashSet<String>) -> Vec<&Rule> {
        let mut impacted_pos: BTreeSet<usize> = BTreeSet::new();

        for fact in changed_facts {
            if let Some(ids) = self.dependency_cache.get(fact) {
                impacted_pos.extend(ids.iter().filter_map(|id| self.positions.get(id).copied()));
            }
        }

        impacted_pos.into_iter().map(|pos| &self.rules[pos]).collect()
    }

    /// Ensemble des faits lus par au moins une règle.
    pub fn consumed_facts(&self) -> BTreeSet<String> {
        self.dependency_cache.keys().cloned().collect()
    }
}
