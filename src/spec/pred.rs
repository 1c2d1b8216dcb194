use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{ConformError, Result};
use crate::path::Cursor;
use crate::value::render;

/// Leaf node: a boolean function with an optional default and optional
/// custom error text.
#[derive(Clone)]
pub struct Pred {
    pred: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
    error_text: Option<String>,
    default: Option<Value>,
}

impl Pred {
    pub fn new<F>(pred: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self { pred: Arc::new(pred), error_text: None, default: None }
    }

    pub fn with_error(mut self, text: impl Into<String>) -> Self {
        self.error_text = Some(text.into());
        self
    }

    /// A `null` default is the same as no default: absent and null are one state.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        let default = default.into();
        self.default = if default.is_null() { None } else { Some(default) };
        self
    }

    pub fn default(&self) -> Option<&Value> { self.default.as_ref() }

    /// Pass-through check. Absent and `null` are the same here: both take the
    /// default when there is one, without calling the function.
    pub fn conform(&self, value: &Value, at: &Cursor<'_>) -> Result<Value> {
        if value.is_null() {
            return match &self.default {
                Some(default) => {
                    tracing::debug!(path = %at, "substituting predicate default");
                    Ok(default.clone())
                }
                None => Err(ConformError::MissingValue { path: at.to_path() }),
            };
        }
        if !(self.pred)(value) {
            return Err(ConformError::PredicateUnmet {
                actual: render(value),
                path: at.to_path(),
                detail: self.error_text.clone(),
            });
        }
        Ok(value.clone())
    }
}

impl fmt::Debug for Pred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pred")
            .field("error_text", &self.error_text)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn here() -> Pred { Pred::new(|v| v == "here") }

    #[test]
    fn truthy_pred_returns_value() {
        assert_eq!(here().conform(&json!("here"), &Cursor::root()).unwrap(), json!("here"));
    }

    #[test]
    fn falsy_pred_names_value_and_path() {
        let root = Cursor::root();
        let at = root.key("my-key");
        let err = here().conform(&json!("there"), &at).unwrap_err();
        assert_eq!(err.to_string(), "'there' does not meet spec for '[my-key]'");
    }

    #[test]
    fn null_without_default_is_missing() {
        let root = Cursor::root();
        let at = root.key("my-key");
        let err = here().conform(&Value::Null, &at).unwrap_err();
        assert_eq!(err, ConformError::MissingValue { path: at.to_path() });
        assert_eq!(err.to_string(), "the value at path '[my-key]' is missing");
    }

    #[test]
    fn default_wins_without_calling_pred() {
        let pred = Pred::new(|_| panic!("predicate must not run for a defaulted value"))
            .with_default("my-default");
        assert_eq!(pred.conform(&Value::Null, &Cursor::root()).unwrap(), json!("my-default"));
    }

    #[test]
    fn default_does_not_mask_a_failing_value() {
        let pred = here().with_default("my-default");
        assert_eq!(pred.conform(&json!("here"), &Cursor::root()).unwrap(), json!("here"));
        let err = pred.conform(&json!("there"), &Cursor::root()).unwrap_err();
        assert_eq!(err.to_string(), "'there' does not meet spec for '[]'");
    }

    #[test]
    fn error_text_is_appended() {
        let pred = here().with_error("my-error-msg").with_default("my-default");
        let err = pred.conform(&json!("there"), &Cursor::root()).unwrap_err();
        assert_eq!(err.to_string(), "'there' does not meet spec for '[]': 'my-error-msg'");
    }

    #[test]
    fn null_default_counts_as_none() {
        let pred = here().with_default(Value::Null);
        assert!(pred.default().is_none());
    }
}
