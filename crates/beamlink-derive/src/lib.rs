// beamlink-derive: compile-time descriptors for beamlink-reflect
//
// Provides derive macros:
// - #[derive(Structure)]   - product types exposed field by field
// - #[derive(Variant)]     - sum types exposed through their active alternative
// - #[derive(Enumeration)] - fieldless enums exposed as host enums
//
// Generated code refers to `::beamlink_reflect`, which re-exports these
// derives, so depending on beamlink-reflect alone is enough.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod enumeration;
mod structure;
mod variant;

/// Derives `Reflect` and `Structure` for a struct with named fields.
///
/// Attributes:
/// - `#[reflect(name = "...")]` on the struct sets the host type name
/// - `#[reflect(rename = "...")]` on a field sets its host name
/// - `#[reflect(skip)]` hides a field from the host
/// - `#[reflect(default = expr)]` applies `expr` on zero-argument construction
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Default, Structure)]
/// struct Slit {
///     #[reflect(default = 1.0)]
///     width: f64,
///     #[reflect(rename = "worldPosition")]
///     position: DVec4,
/// }
/// ```
#[proc_macro_derive(Structure, attributes(reflect))]
pub fn derive_structure(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    structure::expand_structure(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives `Reflect` and `Variant` for an enum of single-field tuple members.
///
/// Also implements `Alternative<Enum>` for every wrapped type and
/// `From<Alternative>` for the enum. The enum must implement `Default`.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Variant)]
/// enum Surface {
///     Plane(Plane),
///     Quadric(Quadric),
/// }
/// ```
#[proc_macro_derive(Variant, attributes(reflect))]
pub fn derive_variant(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    variant::expand_variant(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives `Reflect` and `Enumeration` for a fieldless enum.
///
/// Member names default to SCREAMING_SNAKE_CASE; override one with
/// `#[reflect(rename = "...")]`. The enum must be `Copy + PartialEq`.
#[proc_macro_derive(Enumeration, attributes(reflect))]
pub fn derive_enumeration(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    enumeration::expand_enumeration(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn reject_generics(input: &DeriveInput) -> syn::Result<()> {
    if input.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &input.generics,
            "reflected types cannot be generic; each needs a single host name",
        ))
    }
}
