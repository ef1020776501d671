//! Derive macro for `sifter`.
//!
//! This crate generates the record descriptors behind `#[derive(Sift)]`. It:
//! - reads `#[sift(...)]` field and container attributes
//! - emits a static `RecordDescriptor` holding each field's raw tags
//! - emits `Record`, `RecordType` and `Siftable` implementations
//!
//! It does **not** interpret tags. Tag grammar is checked by the `sifter`
//! runtime when a record's plan is first compiled.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

#[cfg(feature = "slog")]
use proc_macro2::Span;
use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_struct;
mod field;
mod types;
use container::{parse_container_options, ContainerOptions};
use derive_struct::{derive_struct, StructDeriveOutput};

/// Derives `sifter::Record` (and related impls) for structs.
///
/// # Container Attributes
///
/// - `#[sift(crate = "path")]` - Path to the `sifter` crate. Only needed when the crate is
///   re-exported from somewhere the derive cannot detect.
///
/// # Field Attributes
///
/// - **No annotation**: The field is a leaf, output under its own name at level 0. Its type must
///   implement `serde::Serialize`.
///
/// - `#[sift(json = "...")]`: Serialization tag: `-`, `alias`, `alias,omitempty` or `,omitempty`.
///
/// - `#[sift(confidential = "...")]`: Confidentiality tag: `-` or `level0` to `level3`.
///
/// - `#[sift(nested)]`: The field is itself a record; its fields are output under the field's
///   alias. The type must implement `sifter::RecordType` (derive `Sift`, or a `Box` of such a type).
///
/// - `#[sift(embed)]`: Like `nested`, but the record's fields merge into the parent unless an
///   explicit alias is given with `json`.
///
/// Fields whose name starts with `_` never appear in output. Tuple fields are named by index.
///
/// Tag strings are passed through unchanged; a malformed tag makes every sift of the type fail
/// with `SiftError::TagParse`.
///
/// Enums, unions and generic structs are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `slog::Value` (behind `cfg(feature = "slog")`): logs the record's `LEVEL0` view through
///   `sifter::slog::SiftedJson`. The derive first looks for a top-level `slog` crate; if not
///   found, it checks the `SIFTER_SLOG_CRATE` env var for an alternate path (e.g.,
///   `my_log::slog`). If neither is available, compilation fails with a clear error.
#[proc_macro_derive(Sift, attributes(sift))]
pub fn derive_sift(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the sifter crate root.
///
/// Handles crate renaming (e.g., `my_sifter = { package = "sifter", ... }`).
/// Inside `sifter` itself the crate is reached through its
/// `extern crate self as sifter` alias, which also keeps doctests working.
fn crate_root() -> TokenStream {
    match crate_name("sifter") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::sifter },
    }
}

/// Returns the token stream to reference the slog crate root.
///
/// Handles crate renaming (e.g., `my_slog = { package = "slog", ... }`).
/// If the top-level `slog` crate is not available, falls back to the
/// `SIFTER_SLOG_CRATE` env var, which should be a path like `my_log::slog`.
#[cfg(feature = "slog")]
fn slog_crate() -> Result<TokenStream> {
    match crate_name("slog") {
        Ok(FoundCrate::Itself) => Ok(quote! { crate }),
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            Ok(quote! { ::#ident })
        }
        Err(_) => {
            let env_value = std::env::var("SIFTER_SLOG_CRATE").map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    "slog support is enabled, but no top-level `slog` crate was found. \
Set the SIFTER_SLOG_CRATE env var to a path (e.g., `my_log::slog`) or add \
`slog` as a direct dependency.",
                )
            })?;
            let path = syn::parse_str::<syn::Path>(&env_value).map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    format!("SIFTER_SLOG_CRATE must be a valid Rust path (got `{env_value}`)"),
                )
            })?;
            Ok(quote! { #path })
        }
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { crate_path } = parse_container_options(&attrs)?;
    let crate_root = crate_path.map_or_else(crate_root, |path| quote! { #path });

    if !generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &generics,
            "`Sift` cannot be derived for generic types",
        ));
    }

    let StructDeriveOutput {
        descriptors,
        accessors,
    } = match &data {
        Data::Struct(data) => derive_struct(data, &crate_root)?,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span(),
                "`Sift` cannot be derived for enums",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Sift` cannot be derived for unions",
            ));
        }
    };

    #[cfg(feature = "slog")]
    let slog_impl = {
        let slog_crate = slog_crate()?;
        quote! {
            impl #slog_crate::Value for #ident {
                fn serialize(
                    &self,
                    _record: &#slog_crate::Record<'_>,
                    key: #slog_crate::Key,
                    serializer: &mut dyn #slog_crate::Serializer,
                ) -> #slog_crate::Result {
                    let sifted = #crate_root::slog::SiftedJson::public(self);
                    #slog_crate::Value::serialize(&sifted, _record, key, serializer)
                }
            }
        }
    };

    #[cfg(not(feature = "slog"))]
    let slog_impl = quote! {};

    Ok(quote! {
        impl #crate_root::Record for #ident {
            fn descriptor(&self) -> &'static #crate_root::RecordDescriptor {
                <Self as #crate_root::RecordType>::record_descriptor()
            }

            #[allow(clippy::match_single_binding)]
            fn field(&self, index: usize) -> ::core::option::Option<#crate_root::FieldRef<'_>> {
                match index {
                    #(#accessors)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #crate_root::RecordType for #ident {
            fn record_descriptor() -> &'static #crate_root::RecordDescriptor {
                static DESCRIPTOR: #crate_root::RecordDescriptor = #crate_root::RecordDescriptor {
                    name: ::core::stringify!(#ident),
                    type_id: ::core::any::TypeId::of::<#ident>,
                    fields: &[#(#descriptors),*],
                };
                &DESCRIPTOR
            }
        }

        impl #crate_root::Siftable for #ident {
            fn as_record(&self) -> ::core::result::Result<&dyn #crate_root::Record, #crate_root::SiftError> {
                ::core::result::Result::Ok(self)
            }
        }

        #slog_impl
    })
}
