//! Input parsing for the `Record` derive macro.
//!
//! This module gathers the struct identifier, generics, fields, and
//! attribute metadata in one pass so macro expansion can fail fast with
//! useful errors.

use syn::{Data, DeriveInput, Fields, Generics, Ident};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// Everything the generator needs from the user's struct.
pub(crate) struct ParsedInput {
    pub ident: Ident,
    pub generics: Generics,
    pub fields: Vec<syn::Field>,
    pub struct_attrs: StructAttrs,
    pub field_attrs: Vec<FieldAttrs>,
}

/// Gathers information from the user-provided struct.
///
/// Enums, unions, tuple structs, and unit structs are rejected: a record
/// needs named fields to bind keys to.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let ident = input.ident.clone();
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().cloned().collect::<Vec<_>>(),
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Record requires named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &ident,
                "Record can only be derived for structs",
            ));
        }
    };

    let field_attrs = fields
        .iter()
        .map(parse_field_attrs)
        .collect::<syn::Result<Vec<_>>>()?;
    Ok(ParsedInput {
        ident,
        generics: input.generics.clone(),
        fields,
        struct_attrs,
        field_attrs,
    })
}
