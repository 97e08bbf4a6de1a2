// FICHIER : src-core/src/rules_engine/analyzer.rs

use crate::rules_engine::ast::{Expr, Rule};
use std::collections::BTreeSet;

/// Profondeur maximale acceptée au chargement d'une table de règles.
pub const MAX_RULE_DEPTH: usize = 16;

pub struct Analyzer;

impl Analyzer {
    pub fn get_dependencies(expr: &Expr) -> BTreeSet<String> {
        let mut deps = BTreeSet::new();
        Self::visit(expr, &mut deps);
        deps
    }

    /// Faits lus par une règle : prédicat `when` et expressions de `bindings`.
    pub fn rule_dependencies(rule: &Rule) -> BTreeSet<String> {
        let mut deps = Self::get_dependencies(&rule.when);
        for expr in rule.bindings.values() {
            Self::visit(expr, &mut deps);
        }
        deps
    }

    pub fn validate_depth(expr: &Expr, max_depth: usize) -> Result<(), String> {
        Self::check_depth(expr, 0, max_depth)
    }

    fn visit(expr: &Expr, deps: &mut BTreeSet<String>) {
        match expr {
            Expr::Val(_) => {}

            Expr::Var(name) | Expr::Exists(name) => {
                deps.insert(name.clone());
            }

            // Listes génériques
            Expr::And(l)
            | Expr::Or(l)
            | Expr::Eq(l)
            | Expr::Neq(l)
            | Expr::Add(l)
            | Expr::Sub(l)
            | Expr::Mul(l)
            | Expr::Div(l)
            | Expr::Concat(l) => {
                for item in l {
                    Self::visit(item, deps);
                }
            }

            // Unaires
            Expr::Not(e)
            | Expr::Upper(e)
            | Expr::Lower(e)
            | Expr::Trim(e)
            | Expr::Abs(e)
            | Expr::Len(e) => Self::visit(e, deps),

            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => {
                Self::visit(condition, deps);
                Self::visit(then_branch, deps);
                Self::visit(else_branch, deps);
            }

            // Binaires
            Expr::Gt(a, b)
            | Expr::Lt(a, b)
            | Expr::Gte(a, b)
            | Expr::Lte(a, b)
            | Expr::Contains { list: a, value: b }
            | Expr::RegexMatch {
                value: a,
                pattern: b,
            }
            | Expr::Lookup {
                key: a, column: b, ..
            } => {
                Self::visit(a, deps);
                Self::visit(b, deps);
            }
        }
    }

    fn check_depth(expr: &Expr, current: usize, max: usize) -> Result<(), String> {
        if current > max {
            return Err(format!("Expression trop profonde (max {})", max));
        }
        match expr {
            Expr::Val(_) | Expr::Var(_) | Expr::Exists(_) => Ok(()),

            Expr::And(l)
            | Expr::Or(l)
            | Expr::Eq(l)
            | Expr::Neq(l)
            | Expr::Add(l)
            | Expr::Sub(l)
            | Expr::Mul(l)
            | Expr::Div(l)
            | Expr::Concat(l) => {
                for item in l {
                    Self::check_depth(item, current + 1, max)?;
                }
                Ok(())
            }

            Expr::Not(e)
            | Expr::Upper(e)
            | Expr::Lower(e)
            | Expr::Trim(e)
            | Expr::Abs(e)
            | Expr::Len(e) => Self::check_depth(e, current + 1, max),

            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => {
                Self::check_depth(condition, current + 1, max)?;
                Self::check_depth(then_branch, current + 1, max)?;
                Self::check_depth(else_branch, current + 1, max)
            }

            Expr::Gt(a, b)
            | Expr::Lt(a, b)
            | Expr::Gte(a, b)
            | Expr::Lte(a, b)
            | Expr::Contains { list: a, value: b }
            | Expr::RegexMatch {
                value: a,
                pattern: b,
            }
            | Expr::Lookup {
                key: a, column: b, ..
            } => {
                Self::check_depth(a, current + 1, max)?;
                Self::check_depth(b, current + 1, max)
            }
        }
    }
}
