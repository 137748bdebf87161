//! Input parsing for the `Flags` derive macro.
//!
//! Gathers the struct identifier, the fields to bind and the struct-level
//! attributes in one pass so expansion can fail fast with useful errors.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields};

use super::{StructAttrs, parse_field_attrs, parse_struct_attrs};

/// A field that takes part in binding.
pub(crate) struct BoundField {
    /// Field identifier as written, possibly raw.
    pub ident: syn::Ident,
    /// Field name with any `r#` prefix removed.
    pub name: String,
    /// Declared field type.
    pub ty: syn::Type,
    /// Recognised `(key, text)` tags in source order.
    pub tags: Vec<(String, String)>,
}

/// Everything expansion needs from the derive input.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub attrs: StructAttrs,
    pub fields: Vec<BoundField>,
}

/// Gathers information from the user-provided struct.
///
/// Skipped fields are dropped here, so their types need no `Field` impl.
pub(crate) fn parse_input(input: &DeriveInput) -> Result<ParsedInput, syn::Error> {
    let ident = input.ident.clone();
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => {
                return Ok(ParsedInput {
                    ident,
                    attrs,
                    fields: Vec::new(),
                });
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Flags requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Flags can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::new();
    for field in named {
        let field_attrs = parse_field_attrs(&field.attrs)?;
        if field_attrs.is_skipped() {
            continue;
        }
        let Some(field_ident) = field.ident.clone() else {
            continue;
        };
        fields.push(BoundField {
            name: field_ident.unraw().to_string(),
            ident: field_ident,
            ty: field.ty.clone(),
            tags: field_attrs.tags,
        });
    }
    Ok(ParsedInput {
        ident,
        attrs,
        fields,
    })
}
