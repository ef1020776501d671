//! Type checks used by the `nested`/`embed` guard.

/// Primitive names that can never implement `RecordType`.
const PRIMITIVES: &[&str] = &[
    "bool", "char", "str", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16",
    "u32", "u64", "u128", "usize",
];

/// Returns `true` when `ty` is spelled as a bare primitive (`u32`, `&str`,
/// `(u8, u8)`, `[i64; 4]`), so marking it `nested` or `embed` is certainly a
/// mistake. Paths, aliases and generic wrappers are left to the type checker.
pub(crate) fn is_scalar_type(ty: &syn::Type) -> bool {
    match ty {
        syn::Type::Path(path) if path.qself.is_none() => path
            .path
            .get_ident()
            .is_some_and(|ident| PRIMITIVES.iter().any(|name| ident == name)),
        syn::Type::Reference(reference) => is_scalar_type(&reference.elem),
        syn::Type::Array(array) => is_scalar_type(&array.elem),
        syn::Type::Tuple(tuple) => tuple.elems.iter().all(is_scalar_type),
        syn::Type::Paren(inner) => is_scalar_type(&inner.elem),
        _ => false,
    }
}
