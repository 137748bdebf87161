//! Expansion of `#[derive(Flags)]`.
//!
//! Parsing gathers the bound fields and their tags; generation emits the
//! `Flags`, `Field` and `Bindable` impls against the resolved crate path.

mod crate_path;
mod generate;
mod parse;

pub(crate) use generate::generate_impls;
pub(crate) use parse::parse_input;

/// Expands the derive input into trait implementations.
///
/// # Errors
///
/// Returns a spanned error for non-struct inputs, tuple structs and
/// malformed `#[tflag(...)]` attributes.
pub(crate) fn expand(input: &syn::DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let parsed = parse_input(input)?;
    let krate = crate_path::runtime_path(parsed.attrs.crate_path.as_ref());
    Ok(generate_impls(
        &parsed.ident,
        &input.generics,
        &parsed.fields,
        &krate,
    ))
}
