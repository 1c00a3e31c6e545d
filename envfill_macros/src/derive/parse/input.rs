//! Input gathering for the `EnvConfig` derive macro.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Visibility};

use super::{FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs};

/// A field of the derive input with its directives.
pub(crate) struct EnvField {
    pub ident: syn::Ident,
    /// Field name as reported in errors, without any `r#` prefix.
    pub name: String,
    /// Only fields with an explicit visibility participate.
    pub visible: bool,
    pub attrs: FieldAttrs,
}

/// Everything the generator needs from the derive input.
pub(crate) struct EnvInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub struct_attrs: StructAttrs,
    pub fields: Vec<EnvField>,
}

/// Gathers the struct identifier, generics and attribute metadata in one
/// pass, failing fast on malformed attributes.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<EnvInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "EnvConfig requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "EnvConfig can only be derived for structs",
            ));
        }
    };

    let fields = named
        .iter()
        .filter_map(|field| field.ident.as_ref().map(|ident| (ident, field)))
        .map(|(ident, field)| {
            Ok(EnvField {
                ident: ident.clone(),
                name: ident.unraw().to_string(),
                visible: !matches!(field.vis, Visibility::Inherited),
                attrs: parse_field_attrs(&field.attrs)?,
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(EnvInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        struct_attrs,
        fields,
    })
}
