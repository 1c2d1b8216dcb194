//! Deep equality and the two leaf checks every walk bottoms out in.
use ordered_float::OrderedFloat;
use serde_json::{Number, Value};

use crate::error::{ConformError, Result};
use crate::path::Cursor;
use crate::spec::Check;

// ------------------------------- Policy ---------------------------------- //

/// Cap on how much of a rendered value ends up in an error message.
pub const RENDER_MAX_CHARS: usize = 120;
const RENDER_ELLIPSIS: &str = "...";

// ------------------------------ Equality --------------------------------- //

/// Structural equality per variant. Numbers compare by value (`1 == 1.0`);
/// values of different kinds are never equal.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm.iter().all(|(k, x)| ym.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => false,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) { return a == b; }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) { return a == b; }
    if x.is_f64() || y.is_f64() {
        return match (x.as_f64(), y.as_f64()) {
            (Some(a), Some(b)) => OrderedFloat(a) == OrderedFloat(b),
            _ => false,
        };
    }
    // one side negative i64, the other beyond i64::MAX
    false
}

// ------------------------------- Checks ---------------------------------- //

/// Succeeds iff `actual` deep-equals `expected`; hands `actual` back.
pub fn equal<'v>(expected: &Value, actual: &'v Value, at: &Cursor<'_>) -> Result<&'v Value> {
    if values_equal(expected, actual) {
        return Ok(actual);
    }
    Err(ConformError::Mismatch {
        expected: render(expected),
        actual: render(actual),
        path: at.to_path(),
    })
}

/// Succeeds iff `check` accepts `actual`.
///
/// A plain "no" reads `'4' does not meet expectation at '[a, 1]'`. A check
/// that rejects with its own wording keeps that sentence and gains the path:
/// a matcher called directly says `'2' is not falsy.`, inside a walk the same
/// rejection reads `'2' is not falsy at '[k]'`.
pub fn equal_with_predicate<'v>(check: &Check, actual: &'v Value, at: &Cursor<'_>) -> Result<&'v Value> {
    match check(actual) {
        Ok(true) => Ok(actual),
        Ok(false) => Err(ConformError::ExpectationUnmet {
            actual: render(actual),
            path: at.to_path(),
            reason: None,
        }),
        Err(rejected) => Err(ConformError::ExpectationUnmet {
            actual: rejected.value,
            path: at.to_path(),
            reason: Some(rejected.reason),
        }),
    }
}

// ------------------------------ Utilities -------------------------------- //

/// Empty string, sequence or map. Scalars have no notion of emptiness.
pub fn is_empty(v: &Value) -> bool {
    match v {
        Value::String(s) => s.is_empty(),
        Value::Array(xs) => xs.is_empty(),
        Value::Object(m) => m.is_empty(),
        _ => false,
    }
}

/// Message form of a value: strings bare, everything else as compact JSON.
pub fn render(v: &Value) -> String {
    let full = match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if full.chars().count() <= RENDER_MAX_CHARS {
        return full;
    }
    let mut out: String = full.chars().take(RENDER_MAX_CHARS).collect();
    out.push_str(RENDER_ELLIPSIS);
    out
}

pub(crate) fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn numbers_compare_by_value() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(values_equal(&json!(-3), &json!(-3.0)));
        assert!(!values_equal(&json!(1), &json!(2)));
        assert!(!values_equal(&json!(u64::MAX), &json!(-1)));
    }

    #[test]
    fn different_kinds_are_never_equal() {
        assert!(!values_equal(&json!([]), &json!({})));
        assert!(!values_equal(&json!(null), &json!(false)));
        assert!(!values_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn nested_structures_compare_deeply() {
        let a = json!({"x": [1, {"y": "z"}], "w": null});
        let b = json!({"w": null, "x": [1.0, {"y": "z"}]});
        assert!(values_equal(&a, &b));
        let c = json!({"x": [1, {"y": "q"}], "w": null});
        assert!(!values_equal(&a, &c));
    }

    #[test]
    fn equal_reports_both_sides_and_path() {
        let root = Cursor::root();
        let at = root.key("a");
        let err = equal(&json!("my_required_key"), &json!("does not match"), &at).unwrap_err();
        assert_eq!(err.to_string(), "'does not match' is not equal to 'my_required_key' at '[a]'");
        assert_eq!(equal(&json!(5), &json!(5), &at).unwrap(), &json!(5));
    }

    #[test]
    fn predicate_check_passes_value_through() {
        let check: Check = Arc::new(|v: &Value| Ok::<bool, crate::error::Rejected>(v.as_i64().is_some_and(|n| n > 5)));
        let root = Cursor::root();
        assert_eq!(equal_with_predicate(&check, &json!(45), &root).unwrap(), &json!(45));
        let err = equal_with_predicate(&check, &json!(4), &root).unwrap_err();
        assert_eq!(err.to_string(), "'4' does not meet expectation at '[]'");
    }

    #[test]
    fn rejection_wording_survives_with_path() {
        let check: Check = Arc::new(|v: &Value| Err::<bool, _>(crate::error::Rejected::new(v, "is not falsy")));
        let root = Cursor::root();
        let at = root.key("return_me_1");
        let err = equal_with_predicate(&check, &json!(2), &at).unwrap_err();
        assert_eq!(err.to_string(), "'2' is not falsy at '[return_me_1]'");
        assert_eq!(err.kind(), crate::error::ErrorKind::PredicateUnmet);
    }

    #[test]
    fn long_values_are_truncated() {
        let long = Value::String("x".repeat(RENDER_MAX_CHARS + 10));
        let out = render(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), RENDER_MAX_CHARS + 3);
    }

    #[test]
    fn emptiness_is_for_containers_and_strings() {
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!([])));
        assert!(is_empty(&json!({})));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(null)));
    }
}
