//! Structural conformance for dynamically-typed JSON values.
//!
//! Describe the expected shape of a document as a [`Spec`] tree, then either:
//! - [`validate`]: check it and get the whole document back (defaults filled in), or
//! - [`conform`]: check it and get back only the parts the spec describes.
//!
//! The walk stops at the first mismatch and reports it as a [`ConformError`]
//! carrying the offending value and the path to it.
//!
//! ```
//! use serde_json::json;
//! use shape_conform::{conform, spec_map, Pred, Spec};
//!
//! let spec = spec_map([
//!     ("a", Spec::from("x")),
//!     ("b", Spec::from(Pred::new(|v| v == 2).with_default(9))),
//! ]);
//! let out = conform(&spec, &json!({"a": "x", "noise": true})).unwrap();
//! assert_eq!(out, json!({"a": "x", "b": 9}));
//! ```
pub mod conform;
pub mod error;
pub mod matchers;
pub mod path;
pub mod spec;
pub mod typed;
pub mod value;

pub use conform::{conform, conform_at, process, validate, Mode};
pub use error::{ConformError, Container, ErrorKind, Rejected, Report, Result};
pub use path::{Cursor, Path, Segment};
pub use spec::{spec_map, Check, Every, Keys, Pred, Spec, SpecMap};
pub use typed::{conform_into, validate_into, TypedError};
