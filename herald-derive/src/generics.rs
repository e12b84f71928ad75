use syn::{Generics, spanned::Spanned};

/// Flag values are stored as `dyn Any`, so they can't borrow anything and
/// derived types can't have generic parameters of any kind.
pub fn reject_generics(generics: &Generics) -> syn::Result<()> {
    if let Some(param) = generics.const_params().next() {
        return Err(syn::Error::new(
            param.span(),
            "const generics aren't supported by herald",
        ));
    }

    if let Some(param) = generics.type_params().next() {
        return Err(syn::Error::new(
            param.span(),
            "generic types aren't supported by herald",
        ));
    }

    if let Some(param) = generics.lifetimes().next() {
        return Err(syn::Error::new(
            param.span(),
            "flag values must be 'static, so they can't have lifetimes",
        ));
    }

    Ok(())
}
