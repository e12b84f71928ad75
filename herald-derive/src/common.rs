use std::collections::HashMap;

use darling::{FromAttributes, util::SpannedValue};
use heck::ToKebabCase as _;
use lazy_format::lazy_format;
use syn::{Fields, Ident, Variant, spanned::Spanned as _};

#[derive(FromAttributes)]
#[darling(attributes(herald))]
struct VariantAttr {
    rename: Option<SpannedValue<String>>,
}

/// A fieldless enum, with the name each variant is parsed from
pub struct AnalyzedEnum<'a> {
    pub variants: Vec<(String, &'a Ident)>,
}

impl<'a> AnalyzedEnum<'a> {
    pub fn from_variants(variants: impl IntoIterator<Item = &'a Variant>) -> syn::Result<Self> {
        let mut collected = Vec::new();
        let mut seen: HashMap<String, &Ident> = HashMap::new();

        for variant in variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new(
                    variant.fields.span(),
                    "can only derive `Generic` on enums whose variants have no fields",
                ));
            }

            let attr = VariantAttr::from_attributes(&variant.attrs)?;

            let (name, span) = match attr.rename {
                Some(rename) => (rename.as_str().to_owned(), rename.span()),
                None => (variant.ident.to_string().to_kebab_case(), variant.ident.span()),
            };

            // Matching is case insensitive, so names that differ only in case
            // would be ambiguous
            if let Some(previous) = seen.insert(name.to_lowercase(), &variant.ident) {
                let mut err = syn::Error::new(
                    span,
                    lazy_format!("duplicate value name {name:?}"),
                );

                err.combine(syn::Error::new(previous.span(), "previous variant here"));
                return Err(err);
            }

            collected.push((name, &variant.ident));
        }

        Ok(Self {
            variants: collected,
        })
    }
}
