//! The trait implemented by `#[derive(Record)]`.

use crate::descriptor::{RecordDescriptor, Shape};
use crate::{Diff, ResidueResult};

/// A struct that JSON documents can be merged into.
///
/// Implementations are normally generated with `#[derive(Record)]`, which
/// builds [`Record::DESCRIPTOR`] from the struct's fields:
///
/// ```
/// use json_residue::Record;
///
/// #[derive(Debug, Default, Record)]
/// struct Pet {
///     name: String,
/// }
///
/// #[derive(Debug, Default, Record)]
/// #[residue(rename_all = "camelCase")]
/// struct Person {
///     full_name: String,
///     #[residue(rename = "years")]
///     age: u32,
///     #[residue(nested)]
///     pets: Vec<Pet>,
///     #[residue(skip)]
///     secret: String,
/// }
///
/// let keys: Vec<_> = Person::DESCRIPTOR.keys().collect();
/// assert_eq!(keys, ["fullName", "years", "pets"]);
///
/// let (person, diff) = Person::from_json_with_diff(
///     r#"{"fullName":"merlin","years":30,"pets":[{"name":"owl"}],"secret":"x"}"#,
/// )?;
/// assert_eq!(person.pets.len(), 1);
/// assert!(person.secret.is_empty());
/// assert_eq!(diff.len(), 1);
/// # Ok::<_, std::sync::Arc<json_residue::ResidueError>>(())
/// ```
pub trait Record: Default + 'static {
    /// Field descriptor driving the merge.
    const DESCRIPTOR: RecordDescriptor<Self>;

    /// Type-erased view of [`Record::DESCRIPTOR`].
    #[must_use]
    fn shape() -> Shape {
        Shape::of::<Self>()
    }

    /// Decode `input` and merge it into `self`, returning the diff.
    ///
    /// # Errors
    ///
    /// Returns an error when `input` is not JSON or its root is not an object.
    fn merge_json(&mut self, input: impl AsRef<[u8]>) -> ResidueResult<Diff> {
        crate::unmarshal(input, self)
    }

    /// Decode `input` into a fresh record, returning it alongside the diff.
    ///
    /// # Errors
    ///
    /// Returns an error when `input` is not JSON or its root is not an object.
    fn from_json_with_diff(input: impl AsRef<[u8]>) -> ResidueResult<(Self, Diff)> {
        crate::unmarshal_with_diff(input)
    }
}
