//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses a string literal assigned to `key`, as in `rename = "name"`.
///
/// # Examples
///
/// ```rust,ignore
/// use syn::Attribute;
/// let attr: Attribute = syn::parse_quote!(#[residue(rename = "name")]);
/// attr.parse_nested_meta(|meta| {
///     let s = lit_str(&meta, "rename")?;
///     assert_eq!(s.value(), "name");
///     Ok(())
/// })?;
/// ```
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    let literal = meta.value()?.parse::<Lit>()?;
    match literal {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}
