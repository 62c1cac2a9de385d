// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This crate provides procedural macros for the Tessera scene core.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, LitInt, LitStr};

/// A derive macro that implements the `tessera_data::ecs::Component` trait
/// with the default (no-op) hooks.
///
/// The catalogue name defaults to the type name. Two optional attributes are
/// understood:
///
/// - `#[component(name = "...")]` overrides the catalogue name, which is
///   also the field name used in scene files.
/// - `#[component(order = N)]` also registers the type in the global
///   catalogue at position `N`.
///
/// The macro only works inside `tessera-data`, where the trait lives.
#[proc_macro_derive(Component, attributes(component))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "catalogue components cannot be generic",
        ));
    }

    let mut name = LitStr::new(&ident.to_string(), ident.span());
    let mut order: Option<LitInt> = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("component")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = meta.value()?.parse()?;
                Ok(())
            } else if meta.path.is_ident("order") {
                order = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `name` or `order`"))
            }
        })?;
    }

    let registration = order.map(|order| {
        quote! { crate::register_component!(#ident, #order); }
    });

    Ok(quote! {
        impl crate::ecs::Component for #ident {
            const NAME: &'static str = #name;
        }
        #registration
    })
}
