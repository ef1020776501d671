//! Container-level attribute parsing for `#[derive(Sift)]`.
//!
//! This module handles attributes on the struct itself, not on fields.

use syn::{Attribute, LitStr, Meta, Result};

/// Options parsed from container-level `#[sift(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Path to the `sifter` crate, overriding automatic detection.
    pub(crate) crate_path: Option<syn::Path>,
}

/// Parses container-level `#[sift(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("sift") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                // Bare #[sift] on container - currently no meaning, ignore
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("crate") {
                        if options.crate_path.is_some() {
                            return Err(meta.error("duplicate `crate` option"));
                        }
                        let value: LitStr = meta.value()?.parse()?;
                        options.crate_path = Some(value.parse()?);
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `crate`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[sift]",
                ));
            }
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_defaults() {
        let options = parse_container_options(&parse_attrs(quote! {})).unwrap();
        assert!(options.crate_path.is_none());
    }

    #[test]
    fn crate_path_is_parsed() {
        let attrs = parse_attrs(quote! { #[sift(crate = "::vendored::sifter")] });
        let options = parse_container_options(&attrs).unwrap();
        let path = options.crate_path.unwrap();
        assert!(path.leading_colon.is_some());
        assert_eq!(path.segments.len(), 2);
    }

    #[test]
    fn invalid_crate_path_errors() {
        let attrs = parse_attrs(quote! { #[sift(crate = "not a path")] });
        assert!(parse_container_options(&attrs).is_err());
    }

    #[test]
    fn unknown_option_errors() {
        let attrs = parse_attrs(quote! { #[sift(unknown_option)] });
        let result = parse_container_options(&attrs);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown container option"));
    }

    #[test]
    fn bare_sift_on_container_is_ignored() {
        let options = parse_container_options(&parse_attrs(quote! { #[sift] })).unwrap();
        assert!(options.crate_path.is_none());
    }
}
