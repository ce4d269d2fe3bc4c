//! Path prefix for items the generated `Record` impl refers to.
//!
//! Generated code names the trait, the descriptor types, and the merge
//! accessors through one prefix. It is `json_residue` unless the struct sets
//! `#[residue(crate = "...")]`, which is needed when the dependency is renamed
//! in `Cargo.toml` or re-exported from another crate.

use proc_macro2::TokenStream;
use quote::quote;

/// Prefix tokens for generated paths, honouring a `crate` override.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { json_residue }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    //! Prefix selection with and without an override.

    use super::*;
    use anyhow::{Context, Result, ensure};
    use rstest::rstest;

    #[rstest]
    #[case::default(None, "json_residue")]
    #[case::renamed(Some("residue"), "residue")]
    #[case::reexported(Some("app::deps::json_residue"), "app :: deps :: json_residue")]
    fn prefix_matches_override(
        #[case] input: Option<&str>,
        #[case] expected: &str,
    ) -> Result<()> {
        let parsed = input
            .map(syn::parse_str::<syn::Path>)
            .transpose()
            .context("valid path")?;
        let tokens = resolve(parsed.as_ref());
        ensure!(tokens.to_string() == expected, "got {tokens}");
        Ok(())
    }
}
