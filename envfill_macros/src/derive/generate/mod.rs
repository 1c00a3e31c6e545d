//! Code generation for `#[derive(EnvConfig)]`.
//!
//! Each visible, non-skipped field becomes one `Walker::visit` call,
//! followed by a `Walker::validate` call when the field asks for one. The
//! slot variant is picked from the directives alone; combinations that can
//! never resolve get `Slot::Invalid` so the field's type is not constrained
//! and the runtime resolver reports the declaration error.

use proc_macro2::TokenStream;
use quote::quote;

use super::crate_path;
use super::parse::{EnvField, EnvInput, FieldAttrs};

/// Which `Slot` variant a field is offered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotKind {
    Leaf,
    Nested,
    Collector,
    Invalid,
}

impl SlotKind {
    pub(crate) const fn of(attrs: &FieldAttrs) -> Self {
        let has_key = attrs.key.is_some();
        let has_prefix = attrs.prefix.is_some();
        if has_key && (has_prefix || attrs.flatten || attrs.collect) {
            Self::Invalid
        } else if attrs.collect {
            if attrs.flatten { Self::Invalid } else { Self::Collector }
        } else if attrs.flatten || has_prefix {
            Self::Nested
        } else if has_key {
            Self::Leaf
        } else {
            Self::Invalid
        }
    }
}

fn option_str(value: Option<&str>) -> TokenStream {
    value.map_or_else(
        || quote! { ::core::option::Option::None },
        |v| quote! { ::core::option::Option::Some(#v) },
    )
}

fn visit_tokens(krate: &TokenStream, field: &EnvField) -> TokenStream {
    let ident = &field.ident;
    let name = &field.name;
    let attrs = &field.attrs;
    let key = option_str(attrs.key.as_deref());
    let prefix = option_str(attrs.prefix.as_deref());
    let default = option_str(attrs.default.as_deref());
    let required = attrs.required;
    let flatten = attrs.flatten;
    let collect = attrs.collect;
    let slot = match SlotKind::of(attrs) {
        SlotKind::Leaf => quote! { #krate::Slot::Leaf(&mut self.#ident) },
        SlotKind::Nested => quote! { #krate::Slot::Nested(&mut self.#ident) },
        SlotKind::Collector => quote! { #krate::Slot::Collector(&mut self.#ident) },
        SlotKind::Invalid => quote! { #krate::Slot::Invalid },
    };
    let validate = attrs.validate.then(|| {
        quote! { walker.validate(#name, &self.#ident)?; }
    });
    quote! {
        walker.visit(
            &#krate::FieldSpec {
                name: #name,
                key: #key,
                prefix: #prefix,
                default: #default,
                required: #required,
                flatten: #flatten,
                collect: #collect,
            },
            prefix,
            #slot,
        )?;
        #validate
    }
}

/// Generate the `EnvConfig` implementation for `input`.
pub(crate) fn env_config_impl(input: &EnvInput) -> TokenStream {
    let krate = crate_path::resolve(input.struct_attrs.crate_path.as_ref());
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let visits: Vec<TokenStream> = input
        .fields
        .iter()
        .filter(|field| field.visible && !field.attrs.skipped())
        .map(|field| visit_tokens(&krate, field))
        .collect();
    let unused = visits
        .is_empty()
        .then(|| quote! { let _ = (walker, prefix); });
    let validate = input.struct_attrs.validate.then(|| {
        let record = ident.to_string();
        quote! { walker.validate(#record, &*self)?; }
    });

    quote! {
        impl #impl_generics #krate::EnvConfig for #ident #ty_generics #where_clause {
            fn populate(
                &mut self,
                walker: &#krate::Walker<'_>,
                prefix: &str,
            ) -> #krate::EnvResult<()> {
                #unused
                #(#visits)*
                #validate
                ::core::result::Result::Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests;
