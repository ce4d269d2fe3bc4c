//! Parsing utilities for the `Record` derive macro.
//!
//! Struct-level keys: `rename_all = "..."` and `crate = "..."`. Field-level
//! keys: `rename = "..."`, `nested`, and `skip`. Serde's `rename`,
//! `rename_all`, and `skip` attributes are honoured as fallbacks so a struct
//! deriving both `Deserialize` and `Record` reads the same keys either way.

use syn::meta::ParseNestedMeta;
use syn::parenthesized;
use syn::{Attribute, Token};

mod input;
mod literals;
mod serde_attrs;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::{ParsedInput, parse_input};
use literals::lit_str;
pub(crate) use serde_attrs::RenameRule;
use serde_attrs::{serde_field_rename, serde_rename_all, serde_skips};
pub(crate) use type_utils::{option_inner, unboxed, vec_inner};

#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Rule applied to field names that carry no explicit rename.
    pub rename_all: Option<RenameRule>,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[residue(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `json_residue::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Record)]`.
///
/// - `rename` sets the external key, overriding any `rename_all` rule.
/// - `nested` marks a record, `Option` of a record, or `Vec` of records.
/// - `skip` leaves the field out of the descriptor entirely.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub rename: Option<String>,
    pub nested: bool,
    pub skip: bool,
}

/// Iterate all `#[residue(...)]` attributes once and apply a callback.
fn parse_residue<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("residue")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn unknown_key(meta: &ParseNestedMeta, expected: &str) -> syn::Error {
    let key = meta
        .path
        .get_ident()
        .map_or_else(|| "attribute".to_owned(), ToString::to_string);
    meta.error(format!("unknown residue key '{key}'; expected {expected}"))
}

/// Extracts `#[residue(...)]` and serde metadata applied to a struct.
///
/// Unlike serde attributes, unknown `residue` keys are rejected: the
/// attribute namespace belongs to this derive, so a typo is always a mistake.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_residue(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("rename_all") => {
                let s = lit_str(meta, "rename_all")?;
                out.rename_all = Some(RenameRule::parse(&s)?);
                Ok(())
            }
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
                Ok(())
            }
            _ => Err(unknown_key(meta, "`rename_all` or `crate`")),
        }
    })?;
    if out.rename_all.is_none() {
        out.rename_all = serde_rename_all(attrs)?;
    }
    Ok(out)
}

/// Parses field-level `#[residue(...)]` attributes, falling back to serde's
/// `rename` and `skip`.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_residue(&field.attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("rename") => {
                out.rename = Some(lit_str(meta, "rename")?.value());
                Ok(())
            }
            Some("nested") => {
                out.nested = true;
                Ok(())
            }
            Some("skip") => {
                out.skip = true;
                Ok(())
            }
            _ => Err(unknown_key(meta, "`rename`, `nested`, or `skip`")),
        }
    })?;
    if out.rename.is_none() {
        out.rename = serde_field_rename(&field.attrs)?;
    }
    out.skip = out.skip || serde_skips(&field.attrs)?;
    if out.skip && out.nested {
        return Err(syn::Error::new_spanned(
            field,
            "`nested` and `skip` cannot be combined",
        ));
    }
    Ok(out)
}
