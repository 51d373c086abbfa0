// This file is part of openrazer_client, a library to control peripheral devices through the OpenRazer daemon.
//
// Copyright 2025 Canonical Ltd.
//
// SPDX-License-Identifier: GPL-3.0-only
//
// openrazer_client is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License version 3, as published by the Free Software Foundation.
//
// openrazer_client is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranties of MERCHANTABILITY, SATISFACTORY QUALITY, or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with this program.  If not, see http://www.gnu.org/licenses/.

//! Procedural macros for openrazer_client.
//!
//! [`WireEnum`](macro@WireEnum) derives the integral wire codec for fieldless `#[repr(u8)]`
//! enumerations. Every variant must carry an explicit discriminant, which is the value the
//! daemon sends and expects on the bus. The generated code implements
//! `openrazer_client::codec::WireEnum` and `openrazer_client::codec::FromWire`, so a decoded value
//! outside the declared discriminants is a malformed reply rather than a panic.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, parse_macro_input};

#[proc_macro_derive(WireEnum)]
pub fn derive_wire_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_wire_enum(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn expand_wire_enum(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(Error::new_spanned(
            name,
            "WireEnum can only be derived for enums",
        ));
    };

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new_spanned(
                variant,
                "WireEnum variants cannot carry fields",
            ));
        }
        if variant.discriminant.is_none() {
            return Err(Error::new_spanned(
                variant,
                "WireEnum variants need an explicit discriminant matching the wire value",
            ));
        }
        variants.push(&variant.ident);
    }

    let type_name = name.to_string();
    Ok(quote! {
        impl ::openrazer_client::codec::WireEnum for #name {
            const TYPE_NAME: &'static str = #type_name;

            fn code(self) -> u8 {
                self as u8
            }

            fn from_code(code: u8) -> ::core::option::Option<Self> {
                #(
                    if code == #name::#variants as u8 {
                        return ::core::option::Option::Some(#name::#variants);
                    }
                )*
                ::core::option::Option::None
            }
        }

        impl ::openrazer_client::codec::FromWire for #name {
            const SHAPE: &'static str = #type_name;

            fn from_wire(
                value: &::openrazer_client::codec::WireValue,
            ) -> ::core::result::Result<Self, ::openrazer_client::error::RazerError> {
                ::openrazer_client::codec::decode_enum::<#name>(value)
            }
        }
    })
}
