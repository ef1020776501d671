//! Struct-specific `Record` derivation.
//!
//! This module turns a struct's fields into two parallel outputs: the static
//! descriptor entries (name, raw tags, nesting kind) and the accessor arms
//! that hand out each field by index.

use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned, ToTokens};
use syn::{ext::IdentExt, spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    field::{parse_field_options, FieldKind},
    types::is_scalar_type,
};

pub(crate) struct StructDeriveOutput {
    /// `FieldDescriptor` expressions, in declaration order.
    pub(crate) descriptors: Vec<TokenStream>,
    /// `index => Some(FieldRef::...)` match arms.
    pub(crate) accessors: Vec<TokenStream>,
}

pub(crate) fn derive_struct(data: &DataStruct, crate_root: &TokenStream) -> Result<StructDeriveOutput> {
    let mut descriptors = Vec::new();
    let mut accessors = Vec::new();

    let fields: Vec<&syn::Field> = match &data.fields {
        Fields::Named(fields) => fields.named.iter().collect(),
        Fields::Unnamed(fields) => fields.unnamed.iter().collect(),
        Fields::Unit => Vec::new(),
    };

    for (index, field) in fields.into_iter().enumerate() {
        let span = field.span();
        let options = parse_field_options(&field.attrs)?;
        let ty = &field.ty;

        if options.kind != FieldKind::Leaf && is_scalar_type(ty) {
            return Err(syn::Error::new(
                options.kind_span.unwrap_or(span),
                "scalar fields cannot be `nested` or `embed`: only records can be walked",
            ));
        }

        let (name, member) = match &field.ident {
            Some(ident) => (ident.unraw().to_string(), ident.to_token_stream()),
            None => (index.to_string(), syn::Index::from(index).to_token_stream()),
        };
        let serialization_tag = options.json.map_or_else(String::new, |tag| tag.value());
        let confidentiality_tag = options
            .confidential
            .map_or_else(String::new, |tag| tag.value());

        let kind = match options.kind {
            FieldKind::Leaf => quote! { #crate_root::FieldKind::Leaf },
            FieldKind::Nested => quote_spanned! { span =>
                #crate_root::FieldKind::Nested(<#ty as #crate_root::RecordType>::record_descriptor)
            },
            FieldKind::Embedded => quote_spanned! { span =>
                #crate_root::FieldKind::Embedded(<#ty as #crate_root::RecordType>::record_descriptor)
            },
        };
        descriptors.push(quote! {
            #crate_root::FieldDescriptor {
                name: #name,
                serialization_tag: #serialization_tag,
                confidentiality_tag: #confidentiality_tag,
                kind: #kind,
            }
        });

        accessors.push(accessor_arm(crate_root, index, &member, options.kind, span));
    }

    Ok(StructDeriveOutput {
        descriptors,
        accessors,
    })
}

fn accessor_arm(
    crate_root: &TokenStream,
    index: usize,
    member: &TokenStream,
    kind: FieldKind,
    span: Span,
) -> TokenStream {
    let value = match kind {
        FieldKind::Leaf => quote_spanned! { span =>
            #crate_root::FieldRef::Leaf(&self.#member)
        },
        FieldKind::Nested | FieldKind::Embedded => quote_spanned! { span =>
            #crate_root::FieldRef::Record(&self.#member)
        },
    };
    quote! {
        #index => ::core::option::Option::Some(#value),
    }
}
