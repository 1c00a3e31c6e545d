//! Parsing of `#[env(...)]` attributes and the derive input.

use syn::meta::ParseNestedMeta;
use syn::Attribute;

mod input;
mod literals;

pub(crate) use input::{EnvField, EnvInput, parse_input};
use literals::{default_text, flag, lit_str};

/// Struct-level attributes recognised by `#[derive(EnvConfig)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Run the record's `Validate` hook after its fields are populated.
    pub validate: bool,
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level directives.
///
/// They are carried to the runtime resolver unchanged; only attribute
/// syntax is checked here.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub key: Option<String>,
    pub skip: bool,
    pub default: Option<String>,
    pub required: bool,
    pub prefix: Option<String>,
    pub flatten: bool,
    pub collect: bool,
    /// Run the field value's `Validate` hook once the field is filled.
    pub validate: bool,
}

impl FieldAttrs {
    /// Whether the field is excluded from population altogether.
    pub(crate) fn skipped(&self) -> bool {
        self.skip || self.key.as_deref() == Some("-")
    }
}

/// Iterate all `#[env(...)]` attributes and apply a callback per entry.
fn parse_env<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("env")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn unknown(meta: &ParseNestedMeta, expected: &str) -> syn::Error {
    let name = meta
        .path
        .get_ident()
        .map_or_else(|| "attribute".to_owned(), |ident| format!("`{ident}`"));
    meta.error(format!("unknown env attribute {name}; expected one of {expected}"))
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta, key: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{key}`")));
    }
    *slot = Some(value);
    Ok(())
}

/// Extracts `#[env(...)]` metadata applied to a struct.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_env(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("validate") => out.validate = flag(meta, "validate")?,
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                set_once(&mut out.crate_path, path, meta, "crate")?;
            }
            _ => return Err(unknown(meta, "`validate`, `crate`")),
        }
        Ok(())
    })?;
    Ok(out)
}

/// Parses field-level `#[env(...)]` attributes.
///
/// Unknown keys are rejected so a misspelt directive cannot silently leave a
/// field unpopulated.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_env(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("key") => {
                let value = lit_str(meta, "key")?.value();
                set_once(&mut out.key, value, meta, "key")?;
            }
            Some("skip") => out.skip = flag(meta, "skip")?,
            Some("default") => {
                let value = default_text(meta)?;
                set_once(&mut out.default, value, meta, "default")?;
            }
            Some("required") => out.required = flag(meta, "required")?,
            Some("prefix") => {
                let value = lit_str(meta, "prefix")?.value();
                set_once(&mut out.prefix, value, meta, "prefix")?;
            }
            Some("flatten") => out.flatten = flag(meta, "flatten")?,
            Some("collect") => out.collect = flag(meta, "collect")?,
            Some("validate") => out.validate = flag(meta, "validate")?,
            _ => {
                return Err(unknown(
                    meta,
                    "`key`, `skip`, `default`, `required`, `prefix`, `flatten`, `collect`, \
                     `validate`",
                ));
            }
        }
        Ok(())
    })?;
    Ok(out)
}
