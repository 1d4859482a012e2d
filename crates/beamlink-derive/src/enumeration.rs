// #[derive(Enumeration)] implementation
//
// Fieldless enums become primitive host enums. Member names default to the
// SCREAMING_SNAKE_CASE form of the Rust identifier.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{container_attrs, member_attrs, screaming_snake};
use crate::reject_generics;

pub fn expand_enumeration(input: DeriveInput) -> Result<TokenStream> {
    reject_generics(&input)?;
    let ident = &input.ident;
    let host_name = container_attrs(&input.attrs)?
        .name
        .unwrap_or_else(|| ident.to_string());

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(ident, "Enumeration can only be derived for enums"));
    };

    let mut entries = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Enumeration members cannot carry data",
            ));
        }
        let member = &variant.ident;
        let name = member_attrs(&variant.attrs)?
            .rename
            .unwrap_or_else(|| screaming_snake(&member.to_string()));
        entries.push(quote! { (#name, #ident::#member) });
    }

    Ok(quote! {
        impl ::beamlink_reflect::Reflect for #ident {
            const CATEGORY: ::beamlink_reflect::Category = ::beamlink_reflect::Category::Primitive;

            fn type_name() -> &'static str {
                #host_name
            }

            fn to_host(&self) -> ::beamlink_reflect::HostValue {
                ::beamlink_reflect::enum_to_host(self)
            }

            fn from_host(
                _module: &::beamlink_reflect::HostModule,
                value: ::beamlink_reflect::HostValue,
            ) -> ::beamlink_reflect::HostResult<Self> {
                ::beamlink_reflect::enum_from_host(value)
            }
        }

        impl ::beamlink_reflect::Enumeration for #ident {
            fn members() -> &'static [(&'static str, Self)] {
                &[#(#entries),*]
            }

            fn discriminant(self) -> i64 {
                self as i64
            }
        }
    })
}
