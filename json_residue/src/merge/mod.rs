//! The struct merger: binds a mapping onto a record and leaves the residue.
//!
//! [`merge_record`] walks a record's [`RecordDescriptor`] in declaration
//! order. Every value that binds to a field is removed from the source
//! mapping; everything else stays behind, so once the walk finishes the
//! mapping *is* the diff.
//!
//! Mismatches are never errors. A key whose value has the wrong dynamic type,
//! or fails scalar conversion, is simply left in place and the field keeps
//! whatever value it had before the merge.
//!
//! The remaining functions are the accessors `#[derive(Record)]` wires into
//! each [`FieldKind`]; they are public so generated code can name them.

use std::borrow::BorrowMut;

use serde_json::{Map, Value};

use crate::descriptor::{FieldDescriptor, FieldKind, RecordDescriptor};
use crate::{Convertible, MergeOptions, Record};

/// Recursion state threaded through a merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeContext {
    depth: usize,
    max_depth: usize,
}

impl MergeContext {
    /// Context for a root record merged under `options`.
    #[must_use]
    pub const fn new(options: &MergeOptions) -> Self {
        Self {
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Nesting depth of the record currently being merged; the root is `0`.
    #[must_use]
    pub const fn depth(self) -> usize {
        self.depth
    }

    /// Context for a record nested one level deeper, or `None` once the
    /// configured limit is reached.
    #[must_use]
    pub const fn descend(self) -> Option<Self> {
        if self.depth >= self.max_depth {
            return None;
        }
        Some(Self {
            depth: self.depth + 1,
            max_depth: self.max_depth,
        })
    }
}

impl Default for MergeContext {
    fn default() -> Self {
        Self::new(&MergeOptions::default())
    }
}

/// What happened to a single field during a merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The source had no value under the field's key.
    Absent,
    /// The value was bound and its key removed.
    Consumed,
    /// A nested mapping was entered, but not all of its keys bound; the
    /// reduced mapping stays under the field's key.
    Partial,
    /// The value's dynamic type did not fit the field; the key is untouched.
    Mismatched,
    /// The depth limit stopped the descent; the key is untouched.
    DepthLimited,
}

impl FieldOutcome {
    /// Returns `true` when the field's value was consumed wholly or in part.
    #[must_use]
    pub const fn is_bound(self) -> bool {
        matches!(self, Self::Consumed | Self::Partial)
    }
}

/// Result of descending into a nested record or a sequence of records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Descent {
    /// The depth limit prevented entering the value; nothing was touched.
    Blocked,
    /// The value was merged and no limit was reached below it.
    Complete,
    /// The depth limit stopped a descent somewhere below the value.
    ///
    /// A nested record keeps what it bound and its residue holds the limited
    /// keys. A sequence is left untouched, since its element residue would
    /// otherwise be discarded.
    Truncated,
}

impl Descent {
    fn of(report: &MergeReport) -> Self {
        if report.truncated {
            Self::Truncated
        } else {
            Self::Complete
        }
    }
}

/// Outcome of a single field, as recorded in a [`MergeReport`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldReport {
    /// Field identifier in the record declaration.
    pub name: &'static str,
    /// Key looked up in the source mapping.
    pub key: &'static str,
    /// What happened to the field.
    pub outcome: FieldOutcome,
}

/// Per-field outcomes for one level of a merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeReport {
    record: &'static str,
    fields: Vec<FieldReport>,
    truncated: bool,
}

impl MergeReport {
    /// Name of the record type that was merged.
    #[must_use]
    pub const fn record(&self) -> &'static str {
        self.record
    }

    /// Outcomes in field declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldReport] {
        &self.fields
    }

    /// Outcome of the field declared as `name`.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<FieldOutcome> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.outcome)
    }

    /// Returns `true` when the field declared as `name` received a value.
    #[must_use]
    pub fn is_bound(&self, name: &str) -> bool {
        self.outcome(name).is_some_and(FieldOutcome::is_bound)
    }

    /// Returns `true` when the depth limit stopped a descent anywhere below
    /// this record. The limited keys are still in the residue.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Number of fields that received a value.
    #[must_use]
    pub fn bound_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| field.outcome.is_bound())
            .count()
    }
}

/// Merge `source` into `target`, removing every key that was bound.
///
/// Fields are visited in declaration order. Missing keys leave the field
/// untouched; keys without a field are never inspected.
///
/// # Examples
///
/// ```
/// use json_residue::merge::{FieldOutcome, MergeContext, merge_record};
/// use json_residue::Record;
/// use serde_json::json;
///
/// #[derive(Debug, Default, Record)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let mut source = json!({"name": "merlin", "age": "old", "title": "wizard"})
///     .as_object()
///     .cloned()
///     .unwrap_or_default();
/// let mut person = Person::default();
/// let report = merge_record(&mut person, &mut source, MergeContext::default());
///
/// assert_eq!(person.name, "merlin");
/// assert_eq!(report.outcome("age"), Some(FieldOutcome::Mismatched));
/// assert_eq!(
///     serde_json::Value::Object(source),
///     json!({"age": "old", "title": "wizard"})
/// );
/// ```
pub fn merge_record<R: Record>(
    target: &mut R,
    source: &mut Map<String, Value>,
    cx: MergeContext,
) -> MergeReport {
    let descriptor = &R::DESCRIPTOR;
    let mut truncated = false;
    let fields = descriptor
        .fields
        .iter()
        .map(|field| {
            let (outcome, limited) = merge_field(descriptor, field, target, source, cx);
            truncated |= limited;
            FieldReport {
                name: field.name,
                key: field.key,
                outcome,
            }
        })
        .collect();
    MergeReport {
        record: descriptor.name,
        fields,
        truncated,
    }
}

fn merge_field<R: Record>(
    descriptor: &RecordDescriptor<R>,
    field: &FieldDescriptor<R>,
    target: &mut R,
    source: &mut Map<String, Value>,
    cx: MergeContext,
) -> (FieldOutcome, bool) {
    let Some(value) = source.get_mut(field.key) else {
        return (FieldOutcome::Absent, false);
    };
    let (outcome, truncated) = match (&field.kind, value) {
        (FieldKind::Scalar { assign }, found) => {
            if assign(target, found) {
                (FieldOutcome::Consumed, false)
            } else {
                (FieldOutcome::Mismatched, false)
            }
        }
        (FieldKind::NestedRecord { merge, .. }, Value::Object(nested)) => {
            match merge(target, nested, cx) {
                Descent::Blocked => (FieldOutcome::DepthLimited, true),
                Descent::Truncated => (FieldOutcome::Partial, true),
                Descent::Complete if nested.is_empty() => (FieldOutcome::Consumed, false),
                Descent::Complete => (FieldOutcome::Partial, false),
            }
        }
        (FieldKind::SequenceOfRecord { merge, .. }, Value::Array(items)) => {
            match merge(target, items.as_slice(), cx) {
                Descent::Complete => (FieldOutcome::Consumed, false),
                Descent::Blocked | Descent::Truncated => (FieldOutcome::DepthLimited, true),
            }
        }
        (FieldKind::NestedRecord { .. } | FieldKind::SequenceOfRecord { .. }, _) => {
            (FieldOutcome::Mismatched, false)
        }
    };

    if outcome == FieldOutcome::Consumed {
        source.shift_remove(field.key);
    } else {
        tracing::trace!(
            record = descriptor.name,
            field = field.name,
            key = field.key,
            ?outcome,
            "value left in diff"
        );
    }
    (outcome, truncated)
}

/// Convert `value` into `slot`, returning `false` and leaving `slot`
/// untouched when the value is not convertible.
pub fn assign_scalar<T: Convertible>(slot: &mut T, value: &Value) -> bool {
    match T::convert(value) {
        Some(converted) => {
            *slot = converted;
            true
        }
        None => false,
    }
}

/// Merge `source` into the nested record held by `slot`.
///
/// `slot` is the record itself or a `Box` of it. Nothing is touched when the
/// depth limit has been reached.
pub fn merge_nested<T, S>(slot: &mut S, source: &mut Map<String, Value>, cx: MergeContext) -> Descent
where
    T: Record,
    S: BorrowMut<T>,
{
    let Some(inner) = enter::<T>(cx) else {
        return Descent::Blocked;
    };
    Descent::of(&merge_record(<S as BorrowMut<T>>::borrow_mut(slot), source, inner))
}

/// Merge `source` into an optional nested record.
///
/// An existing record is merged in place. When `slot` is `None`, a default
/// record is filled and stored only if at least one of its fields bound, so
/// a mapping with nothing usable leaves the field `None`.
pub fn merge_optional_nested<T, S>(
    slot: &mut Option<S>,
    source: &mut Map<String, Value>,
    cx: MergeContext,
) -> Descent
where
    T: Record,
    S: BorrowMut<T> + From<T>,
{
    let Some(inner) = enter::<T>(cx) else {
        return Descent::Blocked;
    };
    if let Some(held) = slot.as_mut() {
        return Descent::of(&merge_record(<S as BorrowMut<T>>::borrow_mut(held), source, inner));
    }
    let mut fresh = T::default();
    let report = merge_record(&mut fresh, source, inner);
    if report.bound_count() > 0 {
        *slot = Some(S::from(fresh));
    }
    Descent::of(&report)
}

/// Append one record per mapping in `items` to `slot`.
///
/// Elements that are not mappings are dropped without trace in the diff.
/// Each appended record starts from `T::default()`; keys of an element that
/// do not bind are discarded along with the sequence itself. `slot` may hold
/// the records themselves or `Box`es of them.
///
/// When the depth limit stops a descent inside any element, no record is
/// appended and [`Descent::Truncated`] is returned so the whole sequence
/// stays in the diff.
pub fn merge_sequence<T, S>(slot: &mut Vec<S>, items: &[Value], cx: MergeContext) -> Descent
where
    T: Record,
    S: From<T>,
{
    let Some(inner) = enter::<T>(cx) else {
        return Descent::Blocked;
    };
    let mut merged = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Value::Object(element) = item else {
            tracing::trace!(
                record = T::DESCRIPTOR.name,
                index,
                "dropping non-object sequence element"
            );
            continue;
        };
        let mut record = T::default();
        let report = merge_record(&mut record, &mut element.clone(), inner);
        if report.is_truncated() {
            tracing::debug!(
                record = T::DESCRIPTOR.name,
                index,
                "depth limit reached inside sequence element; leaving sequence in diff"
            );
            return Descent::Truncated;
        }
        merged.push(S::from(record));
    }
    slot.extend(merged);
    Descent::Complete
}

fn enter<T: Record>(cx: MergeContext) -> Option<MergeContext> {
    let inner = cx.descend();
    if inner.is_none() {
        tracing::warn!(
            record = T::DESCRIPTOR.name,
            depth = cx.depth(),
            "depth limit reached; leaving nested value in diff"
        );
    }
    inner
}
