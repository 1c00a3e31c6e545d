//! Literal parsing helpers for `#[env(...)]` attributes.

use syn::meta::ParseNestedMeta;
use syn::{Expr, ExprLit, ExprUnary, Lit, LitStr, Token, UnOp};

/// Parses a string literal value for `key`.
pub(super) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

/// Parses a flag written either bare (`required`) or as `required = <bool>`.
pub(super) fn flag(meta: &ParseNestedMeta, key: &str) -> syn::Result<bool> {
    if !meta.input.peek(Token![=]) {
        return Ok(true);
    }
    match meta.value()?.parse::<Lit>()? {
        Lit::Bool(b) => Ok(b.value),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a bool"))),
    }
}

/// Parses a `default` value into the text the converter will receive.
///
/// Strings are used verbatim; integer, float and bool literals use their
/// source spelling without a type suffix. Numbers may be negated.
pub(super) fn default_text(meta: &ParseNestedMeta) -> syn::Result<String> {
    let expr = meta.value()?.parse::<Expr>()?;
    match &expr {
        Expr::Lit(ExprLit { lit, .. }) => literal_text(lit),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match inner.as_ref() {
            Expr::Lit(ExprLit {
                lit: lit @ (Lit::Int(_) | Lit::Float(_)),
                ..
            }) => Ok(format!("-{}", literal_text(lit)?)),
            _ => Err(unsupported_default(&expr)),
        },
        _ => Err(unsupported_default(&expr)),
    }
}

fn literal_text(lit: &Lit) -> syn::Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_owned()),
        Lit::Float(f) => Ok(f.base10_digits().to_owned()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(syn::Error::new(other.span(), UNSUPPORTED_DEFAULT)),
    }
}

const UNSUPPORTED_DEFAULT: &str = "default must be a string, integer, float or bool literal";

fn unsupported_default(expr: &Expr) -> syn::Error {
    syn::Error::new_spanned(expr, UNSUPPORTED_DEFAULT)
}
