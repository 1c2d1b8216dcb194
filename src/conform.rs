//! The walk: one dispatcher over node kinds plus the two entry points.
//!
//! `validate` and `conform` share every step. They differ only in how each
//! map-shaped fold seeds its accumulator: with a copy of the data (validate,
//! unlisted keys survive) or empty (conform, only described keys survive).
use serde_json::{Map, Value};

use crate::error::{Container, ConformError, Result};
use crate::path::{Cursor, Path};
use crate::spec::{Spec, SpecMap};
use crate::value::{self, equal, equal_with_predicate, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Validate,
    Conform,
}

impl Mode {
    pub(crate) fn seed(self, data: &Map<String, Value>) -> Map<String, Value> {
        match self {
            Mode::Validate => data.clone(),
            Mode::Conform => Map::new(),
        }
    }
}

// ------------------------------- Front API -------------------------------- //

/// Check `data` against `spec` and hand back all of `data`, with predicate
/// defaults filled in where the spec asked for them.
pub fn validate(spec: &SpecMap, data: &Value) -> Result<Value> {
    run(spec, data, &Cursor::root(), Mode::Validate)
}

/// Check `data` against `spec` and hand back only what the spec describes.
pub fn conform(spec: &SpecMap, data: &Value) -> Result<Value> {
    run(spec, data, &Cursor::root(), Mode::Conform)
}

/// [`conform`] for a document that lives below `prefix`; error paths start there.
pub fn conform_at(spec: &SpecMap, data: &Value, prefix: &Path) -> Result<Value> {
    run(spec, data, &Cursor::with_prefix(prefix), Mode::Conform)
}

fn run(spec: &SpecMap, data: &Value, at: &Cursor<'_>, mode: Mode) -> Result<Value> {
    tracing::debug!(?mode, keys = spec.len(), path = %at, "walk starting");
    let result = walk_map(spec, data, at, mode);
    match &result {
        Ok(_) => tracing::debug!(?mode, "walk passed"),
        Err(error) => tracing::debug!(?mode, %error, "walk failed"),
    }
    result
}

// ------------------------------- Dispatch --------------------------------- //

/// What it means for one value to conform to one node. Every composite node
/// comes back here for its children.
pub fn process(spec: &Spec, data: &Value, at: &Cursor<'_>, mode: Mode) -> Result<Value> {
    tracing::trace!(path = %at, spec = spec.kind_name(), data = value::kind_name(data), "dispatch");
    match spec {
        Spec::Every(every) => every.conform_in(data, at, mode),
        Spec::Seq(items) => walk_seq(items, data, at, mode),
        Spec::Map(map) => walk_map(map, data, at, mode),
        Spec::Pred(pred) => pred.conform(data, at),
        Spec::Keys(keys) => keys.conform_in(data, at, mode),
        Spec::Func(check) => equal_with_predicate(check, data, at).cloned(),
        Spec::Literal(expected) => equal(expected, data, at).cloned(),
    }
}

/// Pairs spec and data by index. The spec length bounds the walk: a shorter
/// data sequence is not an error, a longer one keeps its tail only when
/// validating.
fn walk_seq(items: &[Spec], data: &Value, at: &Cursor<'_>, mode: Mode) -> Result<Value> {
    let Value::Array(xs) = data else {
        return Err(ConformError::TypeMismatch {
            expected: Container::Array,
            actual: render(data),
            path: at.to_path(),
        });
    };

    let mut out = Vec::with_capacity(xs.len());
    for (i, (item, x)) in items.iter().zip(xs).enumerate() {
        out.push(process(item, x, &at.index(i), mode)?);
    }
    if mode == Mode::Validate {
        out.extend(xs.iter().skip(items.len()).cloned());
    }
    Ok(Value::Array(out))
}

/// Fold over the spec's entries. An absent key is looked at as `null`.
fn walk_map(spec: &SpecMap, data: &Value, at: &Cursor<'_>, mode: Mode) -> Result<Value> {
    let Value::Object(fields) = data else {
        return Err(ConformError::TypeMismatch {
            expected: Container::Map,
            actual: render(data),
            path: at.to_path(),
        });
    };

    let mut out = mode.seed(fields);
    for (key, node) in spec {
        let here = at.key(key);
        let field = fields.get(key).unwrap_or(&Value::Null);
        out.insert(key.clone(), process(node, field, &here, mode)?);
    }
    Ok(Value::Object(out))
}
