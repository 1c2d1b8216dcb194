use serde_json::Value;

use crate::conform::{process, Mode};
use crate::error::{Container, ConformError, Result};
use crate::path::Cursor;
use crate::spec::{Spec, SpecMap};
use crate::value::render;

/// Required and optional keys of a map, each with a nested node.
///
/// Required keys are folded first; optional keys fold into the same
/// accumulator. A missing required key is only forgiven when its node is a
/// predicate with a default. Optional keys never synthesize anything.
#[derive(Debug, Clone, Default)]
pub struct Keys {
    required: SpecMap,
    optional: SpecMap,
}

impl Keys {
    /// Fails with [`ConformError::KeyCollision`] if a key is both required
    /// and optional.
    pub fn new<R, O, K, S>(required: R, optional: O) -> Result<Self>
    where
        R: IntoIterator<Item = (K, S)>,
        O: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Spec>,
    {
        let required: SpecMap = required.into_iter().map(|(k, s)| (k.into(), s.into())).collect();
        let optional: SpecMap = optional.into_iter().map(|(k, s)| (k.into(), s.into())).collect();
        if let Some(key) = required.keys().find(|k| optional.contains_key(*k)) {
            return Err(ConformError::KeyCollision { key: key.clone() });
        }
        Ok(Self { required, optional })
    }

    pub fn required<I, K, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Spec>,
    {
        Self { required: entries.into_iter().map(|(k, s)| (k.into(), s.into())).collect(), ..Self::default() }
    }

    pub fn optional<I, K, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Spec>,
    {
        Self { optional: entries.into_iter().map(|(k, s)| (k.into(), s.into())).collect(), ..Self::default() }
    }

    /// Keep only the described keys of `value`, filling predicate defaults.
    pub fn conform(&self, value: &Value, at: &Cursor<'_>) -> Result<Value> {
        self.conform_in(value, at, Mode::Conform)
    }

    pub(crate) fn conform_in(&self, value: &Value, at: &Cursor<'_>, mode: Mode) -> Result<Value> {
        let Value::Object(data) = value else {
            return Err(ConformError::TypeMismatch {
                expected: Container::Map,
                actual: render(value),
                path: at.to_path(),
            });
        };

        let mut out = mode.seed(data);

        for (key, node) in &self.required {
            match data.get(key) {
                Some(v) => {
                    let here = at.key(key);
                    out.insert(key.clone(), process(node, v, &here, mode)?);
                }
                None => match node.default_value() {
                    Some(default) => {
                        tracing::debug!(path = %at, key = %key, "required key absent, using predicate default");
                        out.insert(key.clone(), default.clone());
                    }
                    None => {
                        return Err(ConformError::MissingKey { key: key.clone(), path: at.to_path() });
                    }
                },
            }
        }

        for (key, node) in &self.optional {
            if let Some(v) = data.get(key) {
                let here = at.key(key);
                out.insert(key.clone(), process(node, v, &here, mode)?);
            }
        }

        Ok(Value::Object(out))
    }
}
