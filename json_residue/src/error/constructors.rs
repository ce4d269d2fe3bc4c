//! Constructors for `ResidueError`.

use std::sync::Arc;

use figment::Error as FigmentError;
use serde_json::Value;

use super::ResidueError;

impl ResidueError {
    /// Construct a [`ResidueError::NotAnObject`] describing `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_residue::ResidueError;
    /// use serde_json::json;
    ///
    /// let err = ResidueError::not_an_object(&json!([1, 2]));
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Expected a JSON object at the document root, found array"
    /// );
    /// ```
    #[must_use]
    pub const fn not_an_object(value: &Value) -> Self {
        Self::NotAnObject {
            found: json_type_name(value),
        }
    }

    /// Construct an options error from a [`figment::Error`].
    #[must_use]
    pub fn options(source: FigmentError) -> Self {
        Self::Options(Box::new(source))
    }

    /// Wrap the error in an [`Arc`] for use with [`crate::ResidueResult`].
    #[must_use]
    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Name of the JSON type carried by `value`, as used in error messages.
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
