//! Ready-made checks. Each factory returns a bare [`Check`], usable directly
//! as a node (`Spec::check(matchers::is_truthy())`) or called on its own.
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::error::Rejected;
use crate::spec::Check;
use crate::value::is_empty;

/// Accepts every value, `null` and empty ones included.
pub fn anything() -> Check {
    Arc::new(|_: &Value| Ok::<bool, Rejected>(true))
}

pub fn is_null() -> Check {
    Arc::new(|v: &Value| {
        if v.is_null() { Ok(true) } else { Err(Rejected::new(v, "is not nil")) }
    })
}

/// `null`, or an empty string, sequence or map. Booleans are never falsy.
pub fn is_falsy() -> Check {
    Arc::new(|v: &Value| {
        if falsy(v) { Ok(true) } else { Err(Rejected::new(v, "is not falsy")) }
    })
}

/// Anything that is not falsy. Numbers (zero included) and both booleans pass.
pub fn is_truthy() -> Check {
    Arc::new(|v: &Value| {
        if !falsy(v) { Ok(true) } else { Err(Rejected::new(v, "is not truthy")) }
    })
}

/// Strings matching `pattern`. Anything that is not a string is rejected.
pub fn matching(pattern: &str) -> Result<Check, regex::Error> {
    let re = Regex::new(pattern)?;
    Ok(Arc::new(move |v: &Value| match v.as_str() {
        Some(s) if re.is_match(s) => Ok(true),
        _ => Err(Rejected::new(v, format!("does not match /{}/", re.as_str()))),
    }))
}

fn falsy(v: &Value) -> bool {
    v.is_null() || is_empty(v)
}
