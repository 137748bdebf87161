//! Code generation for `#[derive(Flags)]`.
//!
//! The generated `bind_fields` destructures `self` into per-field borrows
//! and hands each one to `Walker::field` with its name and tag bag, in
//! declaration order.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Generics, Path, parse_quote};

use super::parse::BoundField;

/// Adds a `FieldTy: Field` predicate per field when the struct is generic.
fn field_bounds(generics: &Generics, fields: &[BoundField], krate: &Path) -> Generics {
    let mut bounded = generics.clone();
    if generics.type_params().next().is_none() {
        return bounded;
    }
    let clause = bounded.make_where_clause();
    for field in fields {
        let ty = &field.ty;
        clause.predicates.push(parse_quote!(#ty: #krate::Field));
    }
    bounded
}

fn binding_calls(fields: &[BoundField]) -> (Vec<TokenStream>, Vec<TokenStream>) {
    fields
        .iter()
        .map(|field| {
            let ident = &field.ident;
            let binding = format_ident!("__tflag_{}", ident.unraw());
            let name = &field.name;
            let keys = field.tags.iter().map(|(key, _)| key);
            let values = field.tags.iter().map(|(_, value)| value);
            (
                quote! { #ident: #binding },
                quote! {
                    walker.field(prefix, #name, &[#((#keys, #values)),*], #binding)?;
                },
            )
        })
        .unzip()
}

/// Emits the `Flags`, `Field` and `Bindable` impls for a struct.
pub(crate) fn generate_impls(
    ident: &syn::Ident,
    generics: &Generics,
    fields: &[BoundField],
    krate: &Path,
) -> TokenStream {
    let bounded = field_bounds(generics, fields, krate);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
    let (patterns, calls) = binding_calls(fields);
    let unused = fields
        .is_empty()
        .then(|| quote! { let _ = (prefix, walker); });

    quote! {
        impl #impl_generics #krate::Flags for #ident #ty_generics #where_clause {
            fn bind_fields<'__tflag, __R>(
                &'__tflag mut self,
                prefix: &str,
                walker: &mut #krate::Walker<'__tflag, '_, __R>,
            ) -> #krate::FlagResult<()>
            where
                __R: #krate::Registrar<'__tflag> + ?Sized,
            {
                let Self { #(#patterns,)* .. } = self;
                #unused
                #(#calls)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics #krate::Field for #ident #ty_generics #where_clause {
            fn bind_field<'__tflag, __R>(
                &'__tflag mut self,
                desc: &#krate::Descriptor,
                prefix: &str,
                walker: &mut #krate::Walker<'__tflag, '_, __R>,
            ) -> #krate::FlagResult<()>
            where
                __R: #krate::Registrar<'__tflag> + ?Sized,
            {
                walker.descend(desc, prefix, self)
            }
        }

        impl #impl_generics #krate::Bindable for #ident #ty_generics #where_clause {
            type Config = Self;

            fn config_mut(&mut self) -> #krate::FlagResult<&mut Self> {
                ::core::result::Result::Ok(self)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Token-level checks of the generated impls.

    use super::*;
    use rstest::rstest;

    fn field(ident: syn::Ident, ty: syn::Type, tags: &[(&str, &str)]) -> BoundField {
        BoundField {
            name: ident.unraw().to_string(),
            ident,
            ty,
            tags: tags
                .iter()
                .map(|&(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
        }
    }

    fn expand(generics: &Generics, fields: &[BoundField]) -> String {
        generate_impls(&parse_quote!(Config), generics, fields, &parse_quote!(tflag)).to_string()
    }

    #[rstest]
    fn emits_fields_in_declaration_order_with_tags() {
        let fields = [
            field(parse_quote!(port), parse_quote!(isize), &[("default", "80")]),
            field(parse_quote!(host), parse_quote!(String), &[]),
        ];
        let tokens = expand(&Generics::default(), &fields);
        let port = tokens
            .find("walker . field (prefix , \"port\" , & [(\"default\" , \"80\")] , __tflag_port)")
            .expect("port call present");
        let host = tokens
            .find("walker . field (prefix , \"host\" , & [] , __tflag_host)")
            .expect("host call present");
        assert!(port < host, "fields out of order: {tokens}");
        assert!(tokens.contains("let Self { port : __tflag_port , host : __tflag_host , .. } = self ;"));
    }

    #[rstest]
    fn raw_identifiers_bind_under_their_plain_name() {
        let fields = [field(parse_quote!(r#type), parse_quote!(String), &[])];
        let tokens = expand(&Generics::default(), &fields);
        assert!(tokens.contains("r#type : __tflag_type"), "tokens: {tokens}");
        assert!(tokens.contains("\"type\""), "tokens: {tokens}");
    }

    #[rstest]
    #[case(parse_quote!(<T>), true)]
    #[case(Generics::default(), false)]
    fn bounds_field_types_only_for_generic_structs(
        #[case] generics: Generics,
        #[case] bounded: bool,
    ) {
        let fields = [field(parse_quote!(inner), parse_quote!(T), &[])];
        let tokens = expand(&generics, &fields);
        assert_eq!(tokens.contains("T : tflag :: Field"), bounded, "tokens: {tokens}");
    }

    #[rstest]
    fn uses_the_resolved_crate_path() {
        let tokens = generate_impls(
            &parse_quote!(Config),
            &Generics::default(),
            &[],
            &parse_quote!(my_alias),
        )
        .to_string();
        assert!(tokens.contains("impl my_alias :: Flags for Config"));
        assert!(tokens.contains("impl my_alias :: Bindable for Config"));
        assert!(!tokens.contains("tflag ::"));
    }
}
