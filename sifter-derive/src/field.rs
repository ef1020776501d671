//! Parsing of `#[sift(...)]` field attributes.
//!
//! This module maps attribute syntax to descriptor entries and produces
//! structured errors for invalid forms. Tag strings are not interpreted here;
//! they are forwarded verbatim and parsed when the plan is compiled.

use proc_macro2::Span;
use syn::{meta::ParseNestedMeta, spanned::Spanned, Attribute, LitStr, Meta, Result};

/// How a field relates to its record.
///
/// | Attribute | Kind | Behavior |
/// |-----------|------|----------|
/// | None | `Leaf` | Serialized as a value |
/// | `#[sift(nested)]` | `Nested` | Walked, children under the field's alias |
/// | `#[sift(embed)]` | `Embedded` | Walked, children merged into the parent |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Leaf,
    Nested,
    Embedded,
}

/// Options parsed from a field's `#[sift(...)]` attributes.
#[derive(Clone, Debug)]
pub(crate) struct FieldOptions {
    /// Raw serialization tag (`json = "..."`).
    pub(crate) json: Option<LitStr>,
    /// Raw confidentiality tag (`confidential = "..."`).
    pub(crate) confidential: Option<LitStr>,
    pub(crate) kind: FieldKind,
    /// Span of the `nested`/`embed` keyword, for follow-up errors.
    pub(crate) kind_span: Option<Span>,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            json: None,
            confidential: None,
            kind: FieldKind::Leaf,
            kind_span: None,
        }
    }
}

fn set_once<T>(target: &mut Option<T>, value: T, meta: &ParseNestedMeta<'_>, key: &str) -> Result<()> {
    if target.is_some() {
        return Err(meta.error(format!("duplicate `{key}` option on the same field")));
    }
    *target = Some(value);
    Ok(())
}

fn set_kind(options: &mut FieldOptions, kind: FieldKind, meta: &ParseNestedMeta<'_>) -> Result<()> {
    if options.kind_span.is_some() {
        return Err(meta.error("a field can be either `nested` or `embed`, and only once"));
    }
    options.kind = kind;
    options.kind_span = Some(meta.path.span());
    Ok(())
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("sift") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("json") {
                        let value: LitStr = meta.value()?.parse()?;
                        set_once(&mut options.json, value, &meta, "json")
                    } else if meta.path.is_ident("confidential") {
                        let value: LitStr = meta.value()?.parse()?;
                        set_once(&mut options.confidential, value, &meta, "confidential")
                    } else if meta.path.is_ident("nested") {
                        set_kind(&mut options, FieldKind::Nested, &meta)
                    } else if meta.path.is_ident("embed") {
                        set_kind(&mut options, FieldKind::Embedded, &meta)
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `json`, `confidential`, `nested` or `embed`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected options, e.g. #[sift(json = \"alias\", confidential = \"level1\")]",
                ));
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[sift]",
                ));
            }
        }
    }

    Ok(options)
}
