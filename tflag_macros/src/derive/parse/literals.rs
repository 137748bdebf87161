//! Literal parsing helpers for derive attributes.

use syn::{Expr, ExprLit, ExprUnary, Lit, LitStr, UnOp};

/// Parses a string literal from an attribute.
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    let literal = meta.value()?.parse::<Lit>()?;
    match literal {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

/// Parses a string, number or boolean literal and returns its text.
///
/// Numbers keep their digits without any type suffix, and a leading minus
/// sign is preserved, so `default = -10` yields `"-10"`.
pub(crate) fn lit_text(meta: &syn::meta::ParseNestedMeta, key: &str) -> Result<String, syn::Error> {
    let expr = meta.value()?.parse::<Expr>()?;
    expr_text(&expr).ok_or_else(|| {
        syn::Error::new_spanned(
            &expr,
            format!("{key} must be a string, number or boolean literal"),
        )
    })
}

fn expr_text(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => lit_text_of(lit),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => match &**expr {
            Expr::Lit(ExprLit {
                lit: lit @ (Lit::Int(_) | Lit::Float(_)),
                ..
            }) => lit_text_of(lit).map(|digits| format!("-{digits}")),
            _ => None,
        },
        Expr::Group(group) => expr_text(&group.expr),
        _ => None,
    }
}

fn lit_text_of(lit: &Lit) -> Option<String> {
    match lit {
        Lit::Str(s) => Some(s.value()),
        Lit::Int(i) => Some(i.base10_digits().to_owned()),
        Lit::Float(f) => Some(f.base10_digits().to_owned()),
        Lit::Bool(b) => Some(b.value.to_string()),
        _ => None,
    }
}
