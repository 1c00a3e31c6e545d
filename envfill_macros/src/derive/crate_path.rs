//! Crate path resolution for renamed dependencies.
//!
//! `#[env(crate = "...")]` replaces the `envfill` root used by generated
//! paths, for callers that rename the dependency or re-export it.

use proc_macro2::TokenStream;
use quote::quote;

/// Tokens naming the runtime crate, `::envfill` unless overridden.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::envfill }, |path| quote! { #path })
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests panic on malformed fixtures")]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default(None, ":: envfill")]
    #[case::renamed(Some("config_env"), "config_env")]
    #[case::in_crate(Some("crate"), "crate")]
    #[case::nested(Some("my_app::deps::envfill"), "my_app :: deps :: envfill")]
    fn resolve_produces_expected_tokens(#[case] input: Option<&str>, #[case] expected: &str) {
        let parsed = input.map(|s| syn::parse_str::<syn::Path>(s).expect("valid path"));
        assert_eq!(resolve(parsed.as_ref()).to_string(), expected);
    }
}
