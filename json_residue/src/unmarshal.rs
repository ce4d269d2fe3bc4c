//! Entry points: decode a document and merge it into a record.
//!
//! Two contracts are offered. *Mutate-existing* ([`unmarshal`],
//! [`merge_value`]) merges into a record the caller already holds and
//! returns the diff. *Construct-fresh* ([`unmarshal_with_diff`],
//! [`from_value_with_diff`]) starts from `R::default()` and returns the record
//! alongside the diff. Both reject documents whose root is not an object.
//!
//! The free functions use [`MergeOptions::default`]; a [`Merger`] carries
//! explicit options.

use serde_json::Value;

use crate::merge::{MergeContext, merge_record};
use crate::{Diff, MergeOptions, Record, ResidueError, ResidueResult, ResidueResultExt};

/// Merge entry points bound to a set of [`MergeOptions`].
///
/// ```
/// use json_residue::{MergeOptions, Merger, Record};
///
/// #[derive(Debug, Default, Record)]
/// struct Outer {
///     #[residue(nested)]
///     inner: Inner,
/// }
///
/// #[derive(Debug, Default, Record)]
/// struct Inner {
///     id: u32,
/// }
///
/// let shallow = Merger::new(MergeOptions::default().with_max_depth(0));
/// let (outer, diff) = shallow.unmarshal_with_diff::<Outer>(r#"{"inner":{"id":7}}"#)?;
/// assert_eq!(outer.inner.id, 0);
/// assert!(diff.contains_key("inner"));
/// # Ok::<_, std::sync::Arc<json_residue::ResidueError>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    /// Create a merger using `options`.
    #[must_use]
    pub const fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Options this merger applies.
    #[must_use]
    pub const fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Decode `input` and merge it into `target`, returning the diff.
    ///
    /// # Errors
    ///
    /// Returns [`ResidueError::Decode`] for malformed JSON and
    /// [`ResidueError::NotAnObject`] when the root is not an object. No field
    /// of `target` is touched in either case.
    pub fn unmarshal<R: Record>(&self, input: impl AsRef<[u8]>, target: &mut R) -> ResidueResult<Diff> {
        let value: Value = serde_json::from_slice(input.as_ref()).into_residue()?;
        self.merge_value(target, value)
    }

    /// Decode `input` into a fresh `R::default()`, returning the record and
    /// the diff.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`Merger::unmarshal`].
    pub fn unmarshal_with_diff<R: Record>(&self, input: impl AsRef<[u8]>) -> ResidueResult<(R, Diff)> {
        let mut record = R::default();
        let diff = self.unmarshal(input, &mut record)?;
        Ok((record, diff))
    }

    /// Merge an already-decoded document into `target`, returning the diff.
    ///
    /// # Errors
    ///
    /// Returns [`ResidueError::NotAnObject`] when `value` is not an object.
    pub fn merge_value<R: Record>(&self, target: &mut R, value: Value) -> ResidueResult<Diff> {
        let mut source = match value {
            Value::Object(map) => map,
            other => return Err(ResidueError::not_an_object(&other).into_arc()),
        };
        let report = merge_record(target, &mut source, MergeContext::new(&self.options));
        tracing::debug!(
            record = report.record(),
            bound = report.bound_count(),
            residual = source.len(),
            "merged document"
        );
        Ok(source)
    }

    /// Merge an already-decoded document into a fresh `R::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`ResidueError::NotAnObject`] when `value` is not an object.
    pub fn from_value_with_diff<R: Record>(&self, value: Value) -> ResidueResult<(R, Diff)> {
        let mut record = R::default();
        let diff = self.merge_value(&mut record, value)?;
        Ok((record, diff))
    }
}

/// Decode `input` and merge it into `target`, returning the diff.
///
/// ```
/// use json_residue::Record;
/// use serde_json::json;
///
/// #[derive(Debug, Default, Record)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let mut person = Person { name: "arthur".into(), age: 40 };
/// let diff = json_residue::unmarshal(r#"{"name":"merlin","wand":true}"#, &mut person)?;
/// assert_eq!(person.name, "merlin");
/// assert_eq!(person.age, 40);
/// assert_eq!(serde_json::Value::Object(diff), json!({"wand": true}));
/// # Ok::<_, std::sync::Arc<json_residue::ResidueError>>(())
/// ```
///
/// # Errors
///
/// See [`Merger::unmarshal`].
pub fn unmarshal<R: Record>(input: impl AsRef<[u8]>, target: &mut R) -> ResidueResult<Diff> {
    Merger::default().unmarshal(input, target)
}

/// Decode `input` into a fresh `R::default()`, returning the record and the
/// diff.
///
/// # Errors
///
/// See [`Merger::unmarshal_with_diff`].
pub fn unmarshal_with_diff<R: Record>(input: impl AsRef<[u8]>) -> ResidueResult<(R, Diff)> {
    Merger::default().unmarshal_with_diff(input)
}

/// Merge an already-decoded document into `target`, returning the diff.
///
/// # Errors
///
/// See [`Merger::merge_value`].
pub fn merge_value<R: Record>(target: &mut R, value: Value) -> ResidueResult<Diff> {
    Merger::default().merge_value(target, value)
}

/// Merge an already-decoded document into a fresh `R::default()`.
///
/// # Errors
///
/// See [`Merger::from_value_with_diff`].
pub fn from_value_with_diff<R: Record>(value: Value) -> ResidueResult<(R, Diff)> {
    Merger::default().from_value_with_diff(value)
}
