//! Conform, then decode the result into a caller type. Decode failures name
//! the JSON path of the offending field.
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::conform::{conform, validate};
use crate::error::ConformError;
use crate::spec::SpecMap;

#[derive(Error, Debug)]
pub enum TypedError {
    #[error(transparent)]
    Conform(#[from] ConformError),

    #[error("at JSON path {path} → {message}")]
    Decode { path: String, message: String },
}

pub fn conform_into<T: DeserializeOwned>(spec: &SpecMap, data: &Value) -> Result<T, TypedError> {
    from_value_with_path(conform(spec, data)?)
}

pub fn validate_into<T: DeserializeOwned>(spec: &SpecMap, data: &Value) -> Result<T, TypedError> {
    from_value_with_path(validate(spec, data)?)
}

/// Deserialize with JSON-path context in error messages.
pub fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T, TypedError> {
    match serde_path_to_error::deserialize::<_, T>(value) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(TypedError::Decode { path, message: err.into_inner().to_string() })
        }
    }
}
