//! Procedural macros for `json_residue`.
//!
//! `#[derive(Record)]` builds a struct's field descriptor at compile time: the
//! external key for each field, whether the field is a converted scalar, a
//! nested record, or a sequence of records, and the accessor the merger calls
//! to populate it. No runtime type inspection is involved.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for the `json_residue::Record` trait.
///
/// Struct attributes: `#[residue(rename_all = "camelCase")]` and
/// `#[residue(crate = "path")]`. Field attributes: `#[residue(rename =
/// "key")]`, `#[residue(nested)]` for records, `Option` records, and `Vec`s of
/// records, and `#[residue(skip)]`. Serde's `rename`, `rename_all`, and `skip`
/// are honoured when no `residue` equivalent is present.
#[proc_macro_derive(Record, attributes(residue))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
