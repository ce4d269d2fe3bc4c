//! Merge partial JSON documents into typed records and keep the leftovers.
//!
//! `json_residue` populates a struct from a JSON object while computing the
//! *residual diff*: every key whose value could not be bound to a field,
//! because no field declares it or because the value has the wrong type.
//! The diff keeps the input's nesting, so `{"a":{"x":1,"y":2}}` merged into a
//! record whose `a` only knows `x` leaves `{"a":{"y":2}}` behind.
//!
//! Field metadata comes from `#[derive(Record)]`, implemented in the
//! companion `json_residue_macros` crate. Field-level mismatches never fail
//! a merge; only malformed JSON and non-object roots are errors.
//!
//! ```
//! use json_residue::Record;
//! use serde_json::json;
//!
//! #[derive(Debug, Default, Record)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let (person, diff) =
//!     json_residue::unmarshal_with_diff::<Person>(r#"{"name":"merlin","age":"old","hat":true}"#)?;
//! assert_eq!(person.name, "merlin");
//! assert_eq!(person.age, 0);
//! assert_eq!(serde_json::Value::Object(diff), json!({"age": "old", "hat": true}));
//! # Ok::<_, std::sync::Arc<json_residue::ResidueError>>(())
//! ```

extern crate self as json_residue;

use std::sync::Arc;

pub use json_residue_macros::Record;
pub use serde_json;

mod convert;
pub mod descriptor;
mod error;
pub mod merge;
mod options;
mod record;
mod result_ext;
mod unmarshal;

pub use convert::Convertible;
pub use descriptor::{FieldDescriptor, FieldKind, RecordDescriptor, Shape, ShapeKind};
pub use error::ResidueError;
pub use merge::{Descent, FieldOutcome, MergeReport};
pub use options::{DEFAULT_MAX_DEPTH, ENV_PREFIX, MergeOptions};
pub use record::Record;
pub use result_ext::ResidueResultExt;
pub use unmarshal::{
    Merger, from_value_with_diff, merge_value, unmarshal, unmarshal_with_diff,
};

/// Residual keys left over after a merge.
pub type Diff = serde_json::Map<String, serde_json::Value>;

/// Result type used throughout the crate.
///
/// Errors are shared so callers can fan them out without cloning.
pub type ResidueResult<T> = Result<T, Arc<ResidueError>>;
