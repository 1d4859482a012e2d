// #[derive(Structure)] implementation
//
// Expands a struct with named fields into `Reflect` + `Structure` impls whose
// field specs read and write each member by copy.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{container_attrs, member_attrs};
use crate::reject_generics;

pub fn expand_structure(input: DeriveInput) -> Result<TokenStream> {
    reject_generics(&input)?;
    let ident = &input.ident;
    let host_name = container_attrs(&input.attrs)?
        .name
        .unwrap_or_else(|| ident.to_string());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "Structure can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Structure can only be derived for structs",
            ))
        }
    };

    let mut specs = Vec::new();
    for field in fields {
        let attrs = member_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(member) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let name = attrs.rename.unwrap_or_else(|| member.to_string());

        let get = quote! { |owner: &Self| -> #ty { ::core::clone::Clone::clone(&owner.#member) } };
        let set = quote! { |owner: &mut Self, value: #ty| owner.#member = value };

        specs.push(match attrs.default {
            Some(default) => quote! {
                ::beamlink_reflect::FieldSpec::field_with_default::<#ty>(
                    #name,
                    #get,
                    #set,
                    { let default: #ty = #default; default },
                )
            },
            None => quote! {
                ::beamlink_reflect::FieldSpec::field::<#ty>(#name, #get, #set)
            },
        });
    }

    Ok(quote! {
        impl ::beamlink_reflect::Reflect for #ident {
            const CATEGORY: ::beamlink_reflect::Category = ::beamlink_reflect::Category::Structure;

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
                ::beamlink_reflect::register_structure::<Self>(module)
            }

            fn expose(
                target: ::beamlink_reflect::Ref<Self>,
            ) -> ::beamlink_reflect::HostResult<::beamlink_reflect::HostValue> {
                ::beamlink_reflect::binder::expose_structure(target)
            }
        }

        impl ::beamlink_reflect::Structure for #ident {
            fn fields() -> ::std::vec::Vec<::beamlink_reflect::FieldSpec<Self>> {
                ::std::vec![#(#specs),*]
            }
        }
    })
}
