// #[derive(Variant)] implementation
//
// Every enum member must wrap exactly one alternative type: `Plane(Plane)`.
// Besides `Reflect` + `Variant` for the enum, each alternative type gets an
// `Alternative<Enum>` impl and the enum gets `From<Alternative>`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::container_attrs;
use crate::reject_generics;

pub fn expand_variant(input: DeriveInput) -> Result<TokenStream> {
    reject_generics(&input)?;
    let ident = &input.ident;
    let host_name = container_attrs(&input.attrs)?
        .name
        .unwrap_or_else(|| ident.to_string());

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(ident, "Variant can only be derived for enums"));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(ident, "Variant needs at least one alternative"));
    }

    let mut members = Vec::new();
    let mut alternatives = Vec::new();
    for variant in &data.variants {
        match &variant.fields {
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                members.push(&variant.ident);
                alternatives.push(&fields.unnamed[0].ty);
            }
            _ => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "each Variant member must wrap exactly one alternative type, e.g. `Plane(Plane)`",
                ))
            }
        }
    }

    let alternative_impls = members.iter().zip(&alternatives).map(|(member, ty)| {
        quote! {
            impl ::beamlink_reflect::Alternative<#ident> for #ty {
                #[allow(unreachable_patterns)]
                fn extract(variant: &#ident) -> ::core::option::Option<&Self> {
                    match variant {
                        #ident::#member(inner) => ::core::option::Option::Some(inner),
                        _ => ::core::option::Option::None,
                    }
                }

                fn wrap(self) -> #ident {
                    #ident::#member(self)
                }
            }

            impl ::core::convert::From<#ty> for #ident {
                fn from(value: #ty) -> Self {
                    #ident::#member(value)
                }
            }
        }
    });

    Ok(quote! {
        impl ::beamlink_reflect::Reflect for #ident {
            const CATEGORY: ::beamlink_reflect::Category = ::beamlink_reflect::Category::Variant;

            fn type_name() -> &'static str {
                #host_name
            }

            fn to_host(&self) -> ::beamlink_reflect::HostValue {
                ::beamlink_reflect::binder::object_to_host(self)
            }

            fn from_host(
                module: &::beamlink_reflect::HostModule,
                value: ::beamlink_reflect::HostValue,
            ) -> ::beamlink_reflect::HostResult<Self> {
                ::beamlink_reflect::binder::object_from_host(module, value)
            }

            fn register(
                module: &mut ::beamlink_reflect::HostModule,
            ) -> ::core::result::Result<(), ::beamlink_reflect::ReflectError> {
                ::beamlink_reflect::register_variant::<Self>(module)
            }

            fn expose(
                target: ::beamlink_reflect::Ref<Self>,
            ) -> ::beamlink_reflect::HostResult<::beamlink_reflect::HostValue> {
                ::beamlink_reflect::binder::expose_variant(target)
            }
        }

        impl ::beamlink_reflect::Variant for #ident {
            fn visit<R: ::beamlink_reflect::AlternativeVisitor<Self>>(&self, visitor: R) -> R::Output {
                match self {
                    #(#ident::#members(active) => visitor.visit(active),)*
                }
            }

            fn alternatives() -> ::std::vec::Vec<::beamlink_reflect::AlternativeSpec<Self>> {
                ::std::vec![#(::beamlink_reflect::AlternativeSpec::of::<#alternatives>()),*]
            }
        }

        #(#alternative_impls)*
    })
}
