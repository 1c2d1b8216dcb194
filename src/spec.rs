//! Declarative shape descriptions.
//!
//! A [`Spec`] is a closed tree of node kinds. Nodes are immutable once built
//! and can be shared across any number of walks (and threads).
pub mod every;
pub mod keys;
pub mod pred;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Rejected;

pub use every::Every;
pub use keys::Keys;
pub use pred::Pred;

/// A bare predicate. `Ok(false)` is a plain "no"; `Err` is a "no" with wording.
pub type Check = Arc<dyn Fn(&Value) -> Result<bool, Rejected> + Send + Sync>;

/// Ordered map of key to nested node. Top-level specs are one of these.
pub type SpecMap = IndexMap<String, Spec>;

pub fn spec_map<I, K, S>(entries: I) -> SpecMap
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Into<Spec>,
{
    entries.into_iter().map(|(k, s)| (k.into(), s.into())).collect()
}

#[derive(Clone)]
pub enum Spec {
    /// Deep-equality against a constant.
    Literal(Value),
    Pred(Pred),
    Keys(Keys),
    Every(Every),
    /// Position-wise specs; the spec length bounds the walk.
    Seq(Vec<Spec>),
    /// Nested map spec, walked like the top level.
    Map(SpecMap),
    Func(Check),
}

impl Spec {
    pub fn literal(v: impl Into<Value>) -> Self { Spec::Literal(v.into()) }

    /// Wrap a plain boolean closure.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Spec::Func(Arc::new(move |v: &Value| Ok::<bool, Rejected>(f(v))))
    }

    pub fn check(check: Check) -> Self { Spec::Func(check) }

    pub fn every(item: impl Into<Spec>) -> Self { Spec::Every(Every::new(item)) }

    pub fn seq<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        Spec::Seq(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Spec>,
    {
        Spec::Map(spec_map(entries))
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Spec::Literal(_) => "literal",
            Spec::Pred(_) => "pred",
            Spec::Keys(_) => "keys",
            Spec::Every(_) => "every",
            Spec::Seq(_) => "seq",
            Spec::Map(_) => "map",
            Spec::Func(_) => "func",
        }
    }

    /// Default carried by a predicate node, if any. Only predicates ever
    /// contribute defaults.
    pub fn default_value(&self) -> Option<&Value> {
        match self {
            Spec::Pred(p) => p.default(),
            _ => None,
        }
    }
}

// ----------------------------- Conversions ------------------------------- //

/// Objects become map specs, arrays become sequence specs, everything else a
/// literal. Use [`Spec::literal`] to compare a whole structure instead.
impl From<Value> for Spec {
    fn from(v: Value) -> Self {
        match v {
            Value::Object(m) => Spec::Map(m.into_iter().map(|(k, v)| (k, Spec::from(v))).collect()),
            Value::Array(xs) => Spec::Seq(xs.into_iter().map(Spec::from).collect()),
            other => Spec::Literal(other),
        }
    }
}

impl From<&str> for Spec {
    fn from(s: &str) -> Self { Spec::Literal(Value::from(s)) }
}

impl From<String> for Spec {
    fn from(s: String) -> Self { Spec::Literal(Value::from(s)) }
}

impl From<i32> for Spec {
    fn from(n: i32) -> Self { Spec::Literal(Value::from(n)) }
}

impl From<i64> for Spec {
    fn from(n: i64) -> Self { Spec::Literal(Value::from(n)) }
}

impl From<u64> for Spec {
    fn from(n: u64) -> Self { Spec::Literal(Value::from(n)) }
}

impl From<f64> for Spec {
    fn from(n: f64) -> Self { Spec::Literal(Value::from(n)) }
}

impl From<bool> for Spec {
    fn from(b: bool) -> Self { Spec::Literal(Value::from(b)) }
}

impl From<Pred> for Spec {
    fn from(p: Pred) -> Self { Spec::Pred(p) }
}

impl From<Keys> for Spec {
    fn from(k: Keys) -> Self { Spec::Keys(k) }
}

impl From<Every> for Spec {
    fn from(e: Every) -> Self { Spec::Every(e) }
}

impl From<Check> for Spec {
    fn from(c: Check) -> Self { Spec::Func(c) }
}

impl From<Vec<Spec>> for Spec {
    fn from(xs: Vec<Spec>) -> Self { Spec::Seq(xs) }
}

impl From<SpecMap> for Spec {
    fn from(m: SpecMap) -> Self { Spec::Map(m) }
}

impl fmt::Debug for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spec::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Spec::Pred(p) => fmt::Debug::fmt(p, f),
            Spec::Keys(k) => fmt::Debug::fmt(k, f),
            Spec::Every(e) => fmt::Debug::fmt(e, f),
            Spec::Seq(xs) => f.debug_tuple("Seq").field(xs).finish(),
            Spec::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Spec::Func(_) => f.write_str("Func(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_objects_and_arrays_become_structural_nodes() {
        let spec = Spec::from(json!({"a": [1, "x"], "b": {"c": null}}));
        let Spec::Map(m) = &spec else { panic!("expected map spec, got {spec:?}") };
        assert!(matches!(m.get("a"), Some(Spec::Seq(xs)) if xs.len() == 2));
        assert!(matches!(m.get("b"), Some(Spec::Map(_))));
    }

    #[test]
    fn literal_keeps_structure_whole() {
        let spec = Spec::literal(json!({"a": 1}));
        assert!(matches!(spec, Spec::Literal(Value::Object(_))));
    }

    #[test]
    fn map_preserves_insertion_order() {
        let spec = Spec::map([("z", Spec::from(1)), ("a", Spec::from(2)), ("m", Spec::from(3))]);
        let Spec::Map(m) = spec else { panic!("expected map spec") };
        let keys: Vec<&str> = m.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn only_predicates_carry_defaults() {
        let p = Spec::from(Pred::new(|_| true).with_default(9));
        assert_eq!(p.default_value(), Some(&json!(9)));
        assert_eq!(Spec::from(9).default_value(), None);
    }
}
