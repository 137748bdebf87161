//! Parsing of `#[tflag(...)]` attributes.
//!
//! Field attributes are reduced to the `(key, text)` tag bag the runtime
//! descriptor decoder reads. Unknown keys are consumed and dropped.

use syn::meta::ParseNestedMeta;
use syn::parenthesized;
use syn::{Attribute, Token};

mod input;
mod literals;

pub(crate) use input::{BoundField, parse_input};
use literals::{lit_str, lit_text};

/// Flag name the runtime treats as "do not bind".
pub(crate) const SKIP: &str = "-";

#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[tflag(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `tflag::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Flags)]`.
///
/// - `flag` overrides the lower-cased field name; `"-"` skips the field.
/// - `skip` is shorthand for `flag = "-"`.
/// - `usage`, `default` and `env` are passed through as text.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub tags: Vec<(String, String)>,
}

impl FieldAttrs {
    /// Whether the last `flag` tag is the skip sentinel.
    pub(crate) fn is_skipped(&self) -> bool {
        self.tags
            .iter()
            .rev()
            .find(|(key, _)| key == "flag")
            .is_some_and(|(_, value)| value == SKIP)
    }
}

/// Iterate all `#[tflag(...)]` attributes once and apply a callback.
fn parse_tflag<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("tflag")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Parses struct-level `#[tflag(...)]` attributes.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_tflag(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let lit = lit_str(meta, "crate")?;
            out.crate_path = Some(syn::parse_str::<syn::Path>(&lit.value()).map_err(|_| {
                syn::Error::new(lit.span(), "crate must be a valid path, e.g. \"my_alias\"")
            })?);
            Ok(())
        } else {
            discard_unknown(meta)
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[tflag(...)]` attributes into a tag bag.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_tflag(attrs, |meta| {
        let Some(ident) = meta.path.get_ident().map(ToString::to_string) else {
            return discard_unknown(meta);
        };
        match ident.as_str() {
            "skip" => {
                out.tags.push(("flag".to_owned(), SKIP.to_owned()));
                Ok(())
            }
            "flag" | "usage" | "env" => {
                let value = lit_str(meta, &ident)?.value();
                out.tags.push((ident, value));
                Ok(())
            }
            "default" => {
                let value = lit_text(meta, &ident)?;
                out.tags.push((ident, value));
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}
