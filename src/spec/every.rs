use serde_json::Value;

use crate::conform::{process, Mode};
use crate::error::{Container, ConformError, Result};
use crate::path::Cursor;
use crate::spec::Spec;
use crate::value::render;

/// One node applied to every element of a sequence. No length requirement.
#[derive(Debug, Clone)]
pub struct Every {
    item: Box<Spec>,
}

impl Every {
    pub fn new(item: impl Into<Spec>) -> Self {
        Self { item: Box::new(item.into()) }
    }

    pub fn conform(&self, data: &Value, at: &Cursor<'_>) -> Result<Value> {
        self.conform_in(data, at, Mode::Conform)
    }

    /// Left to right; the first failing element aborts the walk.
    pub(crate) fn conform_in(&self, data: &Value, at: &Cursor<'_>, mode: Mode) -> Result<Value> {
        let Value::Array(xs) = data else {
            return Err(ConformError::TypeMismatch {
                expected: Container::Array,
                actual: render(data),
                path: at.to_path(),
            });
        };
        xs.iter()
            .enumerate()
            .map(|(i, x)| process(&self.item, x, &at.index(i), mode))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }
}
