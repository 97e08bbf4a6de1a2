// FICHIER : src-core/src/rules_engine/evaluator.rs

use crate::rules_engine::ast::Expr;
use regex::Regex;
use serde_json::{json, Value};
use std::borrow::Cow;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EvalError {
    #[error("Champ introuvable : {0}")]
    VarNotFound(String),
    #[error("Type incompatible : attendu nombre")]
    NotANumber,
    #[error("Type incompatible : attendu chaîne de caractères")]
    NotAString,
    #[error("Erreur Regex : {0}")]
    InvalidRegex(String),
    #[error("Erreur générique : {0}")]
    Generic(String),
}

/// Source des tables de référence consultées par `Expr::Lookup`.
pub trait DataProvider {
    fn get_value(&self, table: &str, key: &str, column: &str) -> Option<Value>;
}

pub struct NoOpDataProvider;
impl DataProvider for NoOpDataProvider {
    fn get_value(&self, _t: &str, _k: &str, _c: &str) -> Option<Value> {
        None
    }
}

pub struct Evaluator;

impl Evaluator {
    pub fn evaluate<'a>(
        expr: &'a Expr,
        context: &'a Value,
        provider: &dyn DataProvider,
    ) -> Result<Cow<'a, Value>, EvalError> {
        match expr {
            Expr::Val(v) => Ok(Cow::Borrowed(v)),
            Expr::Var(path) => resolve_path(context, path),
            Expr::Exists(path) => {
                let found = matches!(resolve_path(context, path), Ok(v) if !v.is_null());
                Ok(Cow::Owned(Value::Bool(found)))
            }

            // --- Opérateurs Logiques ---
            Expr::And(list) => {
                for e in list {
                    let val = Self::evaluate(e, context, provider)?;
                    if !is_truthy(&val) {
                        return Ok(Cow::Owned(Value::Bool(false)));
                    }
                }
                Ok(Cow::Owned(Value::Bool(true)))
            }
            Expr::Or(list) => {
                for e in list {
                    let val = Self::evaluate(e, context, provider)?;
                    if is_truthy(&val) {
                        return Ok(Cow::Owned(Value::Bool(true)));
                    }
                }
                Ok(Cow::Owned(Value::Bool(false)))
            }
            Expr::Not(e) => {
                let res = Self::evaluate(e, context, provider)?;
                Ok(Cow::Owned(Value::Bool(!is_truthy(&res))))
            }
            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let val_cond = Self::evaluate(condition, context, provider)?;
                if is_truthy(&val_cond) {
                    Self::evaluate(then_branch, context, provider)
                } else {
                    Self::evaluate(else_branch, context, provider)
                }
            }

            // --- Comparaisons ---
            Expr::Eq(args) => {
                if args.len() < 2 {
                    return Ok(Cow::Owned(Value::Bool(true)));
                }
                let first = Self::evaluate(&args[0], context, provider)?;
                for arg in &args[1..] {
                    let next = Self::evaluate(arg, context, provider)?;
                    if !values_equal(&first, &next) {
                        return Ok(Cow::Owned(Value::Bool(false)));
                    }
                }
                Ok(Cow::Owned(Value::Bool(true)))
            }
            Expr::Neq(args) => {
                if args.len() < 2 {
                    return Ok(Cow::Owned(Value::Bool(false)));
                }
                let a = Self::evaluate(&args[0], context, provider)?;
                let b = Self::evaluate(&args[1], context, provider)?;
                Ok(Cow::Owned(Value::Bool(!values_equal(&a, &b))))
            }
            Expr::Gt(a, b) => compare_nums(a, b, context, provider, |x, y| x > y),
            Expr::Lt(a, b) => compare_nums(a, b, context, provider, |x, y| x < y),
            Expr::Gte(a, b) => compare_nums(a, b, context, provider, |x, y| x >= y),
            Expr::Lte(a, b) => compare_nums(a, b, context, provider, |x, y| x <= y),

            // --- Mathématiques ---
            Expr::Add(list) => fold_nums(list, context, provider, 0.0, |acc, x| acc + x),
            Expr::Mul(list) => fold_nums(list, context, provider, 1.0, |acc, x| acc * x),
            Expr::Sub(list) => {
                if list.is_empty() {
                    return Ok(Cow::Owned(json!(0)));
                }
                let mut acc = eval_number(&list[0], context, provider)?;
                for e in &list[1..] {
                    acc -= eval_number(e, context, provider)?;
                }
                Ok(Cow::Owned(smart_number(acc)))
            }
            Expr::Div(list) => {
                if list.len() < 2 {
                    return Err(EvalError::Generic("Div requiert au moins 2 args".into()));
                }
                let num = eval_number(&list[0], context, provider)?;
                let den = eval_number(&list[1], context, provider)?;
                if den == 0.0 {
                    return Err(EvalError::Generic("Division par zéro".into()));
                }
                Ok(Cow::Owned(smart_number(num / den)))
            }
            Expr::Abs(e) => {
                let v = eval_number(e, context, provider)?;
                Ok(Cow::Owned(smart_number(v.abs())))
            }

            // --- Listes & Chaînes ---
            Expr::Len(e) => {
                let v = Self::evaluate(e, context, provider)?;
                match v.as_ref() {
                    Value::Array(a) => Ok(Cow::Owned(json!(a.len()))),
                    Value::String(s) => Ok(Cow::Owned(json!(s.chars().count()))),
                    _ => Ok(Cow::Owned(json!(0))),
                }
            }
            Expr::Concat(list) => {
                let mut res = String::new();
                for e in list {
                    let v = Self::evaluate(e, context, provider)?;
                    res.push_str(&value_to_key(&v));
                }
                Ok(Cow::Owned(Value::String(res)))
            }
            Expr::Contains { list, value } => {
                let col = Self::evaluate(list, context, provider)?;
                let target = Self::evaluate(value, context, provider)?;
                match col.as_ref() {
                    Value::Array(arr) => Ok(Cow::Owned(Value::Bool(
                        arr.iter().any(|item| values_equal(item, &target)),
                    ))),
                    Value::String(s) => {
                        let sub = target.as_str().unwrap_or("");
                        Ok(Cow::Owned(Value::Bool(s.contains(sub))))
                    }
                    _ => Ok(Cow::Owned(Value::Bool(false))),
                }
            }
            Expr::Trim(e) => {
                let v = Self::evaluate(e, context, provider)?;
                Ok(Cow::Owned(Value::String(
                    v.as_str().unwrap_or("").trim().to_string(),
                )))
            }
            Expr::Lower(e) => {
                let v = Self::evaluate(e, context, provider)?;
                Ok(Cow::Owned(Value::String(
                    v.as_str().unwrap_or("").to_lowercase(),
                )))
            }
            Expr::Upper(e) => {
                let v = Self::evaluate(e, context, provider)?;
                Ok(Cow::Owned(Value::String(
                    v.as_str().unwrap_or("").to_uppercase(),
                )))
            }
            Expr::RegexMatch { value, pattern } => {
                let v_str = Self::evaluate(value, context, provider)?;
                let p_str = Self::evaluate(pattern, context, provider)?;

                let v = v_str.as_str().ok_or(EvalError::NotAString)?;
                let p = p_str.as_str().ok_or(EvalError::NotAString)?;

                let re = Regex::new(p).map_err(|e| EvalError::InvalidRegex(e.to_string()))?;
                Ok(Cow::Owned(Value::Bool(re.is_match(v))))
            }

            // --- Tables de référence ---
            Expr::Lookup { table, key, column } => {
                let key_v = Self::evaluate(key, context, provider)?;
                let col_v = Self::evaluate(column, context, provider)?;
                let res = provider
                    .get_value(table, &value_to_key(&key_v), &value_to_key(&col_v))
                    .unwrap_or(Value::Null);
                Ok(Cow::Owned(res))
            }
        }
    }

    /// Évalue un prédicat et le réduit à un booléen.
    pub fn evaluate_bool(
        expr: &Expr,
        context: &Value,
        provider: &dyn DataProvider,
    ) -> Result<bool, EvalError> {
        Self::evaluate(expr, context, provider).map(|v| is_truthy(&v))
    }
}

// --- Helpers ---

// Convertit les floats en int si pas de décimales (pour compatibilité as_i64)
pub(crate) fn smart_number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        json!(n as i64)
    } else {
        json!(n)
    }
}

/// Représentation textuelle stable d'une valeur, utilisée comme clé de table.
pub(crate) fn value_to_key(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => match smart_number(f) {
                Value::Number(clean) => clean.to_string(),
                other => other.to_string(),
            },
            None => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn resolve_path<'a>(context: &'a Value, path: &str) -> Result<Cow<'a, Value>, EvalError> {
    let mut current = context;
    if path.is_empty() {
        return Ok(Cow::Borrowed(current));
    }

    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map
                    .get(part)
                    .ok_or_else(|| EvalError::VarNotFound(path.to_string()))?;
            }
            _ => return Err(EvalError::VarNotFound(path.to_string())),
        }
    }
    Ok(Cow::Borrowed(current))
}

pub(crate) fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().unwrap_or(0.0) != 0.0,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn eval_number(expr: &Expr, c: &Value, p: &dyn DataProvider) -> Result<f64, EvalError> {
    Evaluator::evaluate(expr, c, p)?
        .as_f64()
        .ok_or(EvalError::NotANumber)
}

fn compare_nums<'a, F>(
    a: &Expr,
    b: &Expr,
    c: &'a Value,
    p: &dyn DataProvider,
    op: F,
) -> Result<Cow<'a, Value>, EvalError>
where
    F: Fn(f64, f64) -> bool,
{
    let va = eval_number(a, c, p)?;
    let vb = eval_number(b, c, p)?;
    Ok(Cow::Owned(Value::Bool(op(va, vb))))
}

fn fold_nums<'a, F>(
    list: &[Expr],
    c: &'a Value,
    p: &dyn DataProvider,
    init: f64,
    op: F,
) -> Result<Cow<'a, Value>, EvalError>
where
    F: Fn(f64, f64) -> f64,
{
    let mut acc = init;
    for e in list {
        acc = op(acc, eval_number(e, c, p)?);
    }
    Ok(Cow::Owned(smart_number(acc)))
}
