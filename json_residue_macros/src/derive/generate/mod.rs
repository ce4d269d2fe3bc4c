//! Record descriptor code generation for `#[derive(Record)]`.
//!
//! Each surviving field becomes one `FieldDescriptor` entry whose kind holds
//! a non-capturing closure. The closures coerce to the function pointers the
//! descriptor stores, so the whole descriptor is a constant.

use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Ident, Type};

use super::crate_path;
use super::parse::{FieldAttrs, ParsedInput, RenameRule, option_inner, unboxed, vec_inner};

/// How a field consumes the value found under its key.
///
/// Nested plans carry the record type itself, with any `Box` removed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FieldPlan<'a> {
    Scalar,
    Nested(&'a Type),
    OptionalNested(&'a Type),
    Sequence(&'a Type),
}

/// A field that takes part in the merge.
pub(crate) struct FieldSpec<'a> {
    pub ident: &'a Ident,
    pub name: String,
    pub key: String,
    pub plan: FieldPlan<'a>,
}

/// Compute the external key of a field.
///
/// Precedence: explicit rename, then the container's `rename_all` rule, then
/// the field name itself without any `r#` prefix.
pub(crate) fn external_key(name: &str, attrs: &FieldAttrs, rename_all: Option<RenameRule>) -> String {
    if let Some(rename) = &attrs.rename {
        return rename.clone();
    }
    rename_all.map_or_else(|| name.to_owned(), |rule| rule.apply(name))
}

/// The record type behind one wrapper layer, with any `Box` removed.
///
/// Further `Option` or `Vec` layers are rejected here, where the error can
/// point at the field, rather than surfacing as an unmet `Record` bound.
fn record_type(ty: &Type) -> syn::Result<&Type> {
    let record = unboxed(ty);
    if option_inner(record).is_some() || vec_inner(record).is_some() {
        return Err(syn::Error::new_spanned(
            ty,
            "`nested` expects a record, a `Box` or `Option` of a record, or a `Vec` of records",
        ));
    }
    Ok(record)
}

fn plan_for<'a>(ty: &'a Type, attrs: &FieldAttrs) -> syn::Result<FieldPlan<'a>> {
    if !attrs.nested {
        return Ok(FieldPlan::Scalar);
    }
    let plan = if let Some(element) = vec_inner(ty) {
        FieldPlan::Sequence(record_type(element)?)
    } else if let Some(inner) = option_inner(ty) {
        FieldPlan::OptionalNested(record_type(inner)?)
    } else {
        FieldPlan::Nested(record_type(ty)?)
    };
    Ok(plan)
}

/// Resolve the merge plan for every field not marked `skip`.
///
/// Two fields bound to the same key are rejected, since only the first could
/// ever receive a value.
pub(crate) fn plan_fields(parsed: &ParsedInput) -> syn::Result<Vec<FieldSpec<'_>>> {
    let rename_all = parsed.struct_attrs.rename_all;
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut specs = Vec::new();
    for (field, attrs) in parsed.fields.iter().zip(&parsed.field_attrs) {
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
        };
        let name = ident.unraw().to_string();
        let key = external_key(&name, attrs, rename_all);
        if let Some(previous) = seen.insert(key.clone(), name.clone()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("key '{key}' is already bound to field `{previous}`"),
            ));
        }
        specs.push(FieldSpec {
            ident,
            name,
            key,
            plan: plan_for(&field.ty, attrs)?,
        });
    }
    Ok(specs)
}

fn field_tokens(spec: &FieldSpec<'_>, krate: &TokenStream) -> TokenStream {
    let FieldSpec {
        ident,
        name,
        key,
        plan,
    } = spec;
    let kind = match plan {
        FieldPlan::Scalar => quote! {
            #krate::FieldKind::<Self>::Scalar {
                assign: |record, value| #krate::merge::assign_scalar(&mut record.#ident, value),
            }
        },
        FieldPlan::Nested(ty) => quote! {
            #krate::FieldKind::<Self>::NestedRecord {
                shape: #krate::Shape::of::<#ty>,
                merge: |record, source, cx| {
                    #krate::merge::merge_nested::<#ty, _>(&mut record.#ident, source, cx)
                },
            }
        },
        FieldPlan::OptionalNested(ty) => quote! {
            #krate::FieldKind::<Self>::NestedRecord {
                shape: #krate::Shape::of::<#ty>,
                merge: |record, source, cx| {
                    #krate::merge::merge_optional_nested::<#ty, _>(&mut record.#ident, source, cx)
                },
            }
        },
        FieldPlan::Sequence(ty) => quote! {
            #krate::FieldKind::<Self>::SequenceOfRecord {
                shape: #krate::Shape::of::<#ty>,
                merge: |record, items, cx| {
                    #krate::merge::merge_sequence::<#ty, _>(&mut record.#ident, items, cx)
                },
            }
        },
    };
    quote! {
        #krate::FieldDescriptor {
            name: #name,
            key: #key,
            kind: #kind,
        }
    }
}

/// Emit the `Record` implementation for `parsed`.
pub(crate) fn record_impl(parsed: &ParsedInput) -> syn::Result<TokenStream> {
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    let specs = plan_fields(parsed)?;
    let fields = specs.iter().map(|spec| field_tokens(spec, &krate));
    let ident = &parsed.ident;
    let record_name = ident.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) = parsed.generics.split_for_impl();
    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
            const DESCRIPTOR: #krate::RecordDescriptor<Self> = #krate::RecordDescriptor {
                name: #record_name,
                fields: &[#(#fields),*],
            };
        }
    })
}

#[cfg(test)]
mod tests;
