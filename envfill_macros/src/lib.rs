//! Procedural macros for `envfill`.
//!
//! `#[derive(EnvConfig)]` turns a struct with named fields into an
//! `envfill::EnvConfig` implementation. Each participating field becomes one
//! call to `Walker::visit` carrying the field's `#[env(...)]` directives, so
//! directive combinations are checked when the field is visited at runtime.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `envfill::EnvConfig`.
///
/// Field attributes: `key = "NAME"`, `skip`, `default = <literal>`,
/// `required`, `prefix = "NAME"`, `flatten`, `collect`.
/// Struct attributes: `validate`, `crate = "path"`.
#[proc_macro_derive(EnvConfig, attributes(env))]
pub fn derive_env_config(tokens: TokenStream) -> TokenStream {
    let input = parse_macro_input!(tokens as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
