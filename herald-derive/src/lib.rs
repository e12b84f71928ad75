/*!
Derive macro for `herald::Generic`. Use it through the re-export in
`herald` rather than depending on this crate directly.
 */

mod common;
mod generics;
mod value;

use proc_macro::TokenStream;

/**
Derive `herald::Generic` (and `Display`) for a flag value type.

- On an enum whose variants have no fields, the flag accepts the kebab-case
  name of each variant, case insensitively. `#[herald(rename = "...")]` on a
  variant changes its name. Any other text fails with a list of the accepted
  names.
- On a struct with exactly one field, parsing and rendering are delegated to
  the field's `FromStr` and `Display` implementations.

The type must also be `Clone` to be used in a `Flag`.
*/
#[proc_macro_derive(Generic, attributes(herald))]
pub fn derive_generic(item: TokenStream) -> TokenStream {
    match value::derive_generic_result(item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
