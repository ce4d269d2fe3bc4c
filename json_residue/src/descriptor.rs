//! Static field descriptors generated by `#[derive(Record)]`.
//!
//! A [`RecordDescriptor`] replaces runtime type inspection: it lists a
//! record's fields in declaration order together with the external key each
//! one binds to and a [`FieldKind`] carrying the monomorphic accessor the
//! merger calls. Descriptors are constants, so they hold no per-document
//! state and can be shared freely.
//!
//! [`Shape`] is the type-erased view of a descriptor. It is assembled on
//! demand for introspection and for detecting self-referential records.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::Record;
use crate::merge::{Descent, MergeContext};

/// Compile-time description of a record type's fields.
pub struct RecordDescriptor<R: 'static> {
    /// Name of the record type as written in its declaration.
    pub name: &'static str,
    /// Fields in declaration order. Skipped fields are absent.
    pub fields: &'static [FieldDescriptor<R>],
}

impl<R: 'static> RecordDescriptor<R> {
    /// Find the field bound to the external `key`, if any.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&'static FieldDescriptor<R>> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Iterate the external keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + use<R> {
        self.fields.iter().map(|field| field.key)
    }
}

/// Description of a single record field.
pub struct FieldDescriptor<R: 'static> {
    /// Field identifier in the record declaration.
    pub name: &'static str,
    /// Key looked up in the source mapping.
    pub key: &'static str,
    /// How the field consumes the value found under `key`.
    pub kind: FieldKind<R>,
}

/// Merge behaviour of a field, with the accessor for that behaviour.
pub enum FieldKind<R: 'static> {
    /// A value converted through [`crate::Convertible`].
    ///
    /// `assign` returns `true` when the value converted and was stored.
    Scalar {
        /// Convert and store the value.
        assign: fn(&mut R, &Value) -> bool,
    },
    /// A nested record populated from a mapping.
    NestedRecord {
        /// Shape of the nested record type.
        shape: fn() -> Shape,
        /// Merge the mapping into the nested record.
        merge: fn(&mut R, &mut Map<String, Value>, MergeContext) -> Descent,
    },
    /// A `Vec` of records populated from a sequence of mappings.
    SequenceOfRecord {
        /// Shape of the element record type.
        shape: fn() -> Shape,
        /// Append one record per mapping element.
        merge: fn(&mut R, &[Value], MergeContext) -> Descent,
    },
}

impl<R: 'static> FieldKind<R> {
    /// Type-erased kind of this field.
    #[must_use]
    pub fn shape_kind(&self) -> ShapeKind {
        match self {
            Self::Scalar { .. } => ShapeKind::Scalar,
            Self::NestedRecord { shape, .. } => ShapeKind::NestedRecord(*shape),
            Self::SequenceOfRecord { shape, .. } => ShapeKind::SequenceOfRecord(*shape),
        }
    }
}

/// Type-erased view of a [`RecordDescriptor`].
#[derive(Clone, Debug)]
pub struct Shape {
    /// Fully qualified type name of the record.
    pub type_name: &'static str,
    /// Fields in declaration order.
    pub fields: Vec<FieldShape>,
}

/// Type-erased view of a [`FieldDescriptor`].
#[derive(Clone, Debug)]
pub struct FieldShape {
    /// Field identifier in the record declaration.
    pub name: &'static str,
    /// Key looked up in the source mapping.
    pub key: &'static str,
    /// Kind of the field, with element shapes for nested kinds.
    pub kind: ShapeKind,
}

/// Field kind as exposed by a [`Shape`].
///
/// Nested kinds carry a constructor rather than an expanded shape so
/// self-referential records can be described without infinite expansion.
#[derive(Clone, Copy, Debug)]
pub enum ShapeKind {
    /// A converted scalar value.
    Scalar,
    /// A nested record.
    NestedRecord(fn() -> Shape),
    /// A sequence of records.
    SequenceOfRecord(fn() -> Shape),
}

impl ShapeKind {
    /// Element shape for nested kinds.
    #[must_use]
    pub fn element(self) -> Option<Shape> {
        match self {
            Self::Scalar => None,
            Self::NestedRecord(shape) | Self::SequenceOfRecord(shape) => Some(shape()),
        }
    }
}

impl Shape {
    /// Build the shape of `R` from its descriptor.
    #[must_use]
    pub fn of<R: Record>() -> Self {
        let descriptor = &R::DESCRIPTOR;
        Self {
            type_name: std::any::type_name::<R>(),
            fields: descriptor
                .fields
                .iter()
                .map(|field| FieldShape {
                    name: field.name,
                    key: field.key,
                    kind: field.kind.shape_kind(),
                })
                .collect(),
        }
    }

    /// Returns `true` when the nested fields reachable from this record form
    /// a cycle, directly or through other records.
    ///
    /// Merging such a record is bounded only by the configured depth limit.
    #[must_use]
    pub fn is_recursive(&self) -> bool {
        let mut path = vec![self.type_name];
        let mut finished = HashSet::new();
        reaches_ancestor(self, &mut path, &mut finished)
    }
}

/// Depth-first search for a back edge onto any type on `path`.
fn reaches_ancestor(
    shape: &Shape,
    path: &mut Vec<&'static str>,
    finished: &mut HashSet<&'static str>,
) -> bool {
    for element in shape.fields.iter().filter_map(|field| field.kind.element()) {
        if path.contains(&element.type_name) {
            return true;
        }
        if finished.contains(element.type_name) {
            continue;
        }
        path.push(element.type_name);
        let found = reaches_ancestor(&element, path, finished);
        path.pop();
        if found {
            return true;
        }
        finished.insert(element.type_name);
    }
    false
}
