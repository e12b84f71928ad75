use itertools::Itertools as _;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Field, Ident, Index, Token, Variant, punctuated::Punctuated, spanned::Spanned};

use crate::{common::AnalyzedEnum, generics::reject_generics};

fn derive_generic_enum(
    ident: &Ident,
    variants: &Punctuated<Variant, Token![,]>,
) -> syn::Result<TokenStream2> {
    let analyzed = AnalyzedEnum::from_variants(variants)?;

    let names: Vec<&str> = analyzed.variants.iter().map(|(name, _)| name.as_str()).collect();
    let idents = analyzed.variants.iter().map(|&(_, ident)| ident);

    let set_arms = analyzed.variants.iter().map(|(name, variant)| {
        quote! {
            if text.eq_ignore_ascii_case(#name) {
                *self = Self::#variant;
                return ::core::result::Result::Ok(());
            }
        }
    });

    Ok(quote! {
        impl ::herald::Generic for #ident {
            fn set(&mut self, text: &str) -> ::core::result::Result<(), ::herald::errors::ParseError> {
                #(#set_arms)*

                ::core::result::Result::Err(::herald::errors::ParseError::should_be(
                    text,
                    &[ #(#names,)* ],
                ))
            }
        }

        impl ::core::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(match *self {
                    #(Self::#idents => #names,)*
                })
            }
        }
    })
}

fn derive_generic_newtype(ident: &Ident, field: &Field) -> TokenStream2 {
    let (struct_body, accessor) = match field.ident {
        Some(ref field) => (quote! { { #field: value } }, quote! { #field }),
        None => {
            let index = Index::from(0);
            (quote! { ( value ) }, quote! { #index })
        }
    };

    quote! {
        impl ::herald::Generic for #ident {
            fn set(&mut self, text: &str) -> ::core::result::Result<(), ::herald::errors::ParseError> {
                match ::core::str::FromStr::from_str(text) {
                    ::core::result::Result::Ok(value) => {
                        *self = Self #struct_body;
                        ::core::result::Result::Ok(())
                    }
                    ::core::result::Result::Err(err) => ::core::result::Result::Err(
                        ::herald::errors::ParseError::invalid(text, err)
                    ),
                }
            }
        }

        impl ::core::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.#accessor, f)
            }
        }
    }
}

pub fn derive_generic_result(item: TokenStream2) -> syn::Result<TokenStream2> {
    let input: DeriveInput = syn::parse2(item)?;
    reject_generics(&input.generics)?;

    match input.data {
        Data::Struct(ref data) => {
            let field = data.fields.iter().exactly_one().map_err(|_| {
                syn::Error::new(
                    input.span(),
                    "can only derive `Generic` on structs with exactly one field",
                )
            })?;

            Ok(derive_generic_newtype(&input.ident, field))
        }
        Data::Enum(ref data) => derive_generic_enum(&input.ident, &data.variants),
        Data::Union(_) => Err(syn::Error::new(
            input.span(),
            "can't derive `Generic` on a union",
        )),
    }
}
