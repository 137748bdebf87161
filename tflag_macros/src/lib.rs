//! Procedural macros for `tflag`.
//!
//! [`Flags`](macro@Flags) turns a struct definition into the descriptor table
//! the `tflag` binder walks: each field's name and `#[tflag(...)]` tags are
//! emitted in declaration order alongside a mutable borrow of the field.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `tflag::Flags`.
///
/// Also implements `tflag::Field`, so the struct can be nested inside
/// another derived struct, and `tflag::Bindable`, so it can be passed to the
/// binding entry points.
///
/// Field attributes: `flag = "name"`, `skip`, `usage = "text"`,
/// `default = <literal>` and `env = "NAME"`. Struct attribute:
/// `crate = "path"` to reach `tflag` through another name.
#[proc_macro_derive(Flags, attributes(tflag))]
pub fn derive_flags(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
