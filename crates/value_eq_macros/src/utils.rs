//! Shared utilities for the derive macro.

use syn::{
    punctuated::Punctuated, token::Comma, Data, DeriveInput, Field, Fields, GenericArgument,
    PathArguments, Type,
};

/// Validate that the input is a struct with named fields, returning the fields.
pub fn validate_struct_with_named_fields<'a>(
    input: &'a DeriveInput,
    macro_name: &str,
) -> syn::Result<&'a Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{macro_name} derive only supports structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{macro_name} derive only supports structs"),
        )),
    }
}

/// If `ty` is `Name<Arg>` with `Name` one of `names`, return `Arg`.
///
/// Matches on the last path segment only, so `Option<T>`,
/// `std::option::Option<T>` and `core::option::Option<T>` all match.
fn single_type_argument<'a>(ty: &'a Type, names: &[&str]) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if !names.iter().any(|name| segment.ident == name) {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });
    match (types.next(), types.next()) {
        (Some(inner), None) => Some(inner),
        _ => None,
    }
}

/// `T` for `Option<T>`.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    single_type_argument(ty, &["Option"])
}

/// `T` for `Box<T>`, `Arc<T>` and `Rc<T>`.
pub fn pointer_inner(ty: &Type) -> Option<&Type> {
    single_type_argument(ty, &["Box", "Arc", "Rc"])
}

/// Check if a type is `f32` or `f64`.
pub fn is_float_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            type_path.path.is_ident("f32") || type_path.path.is_ident("f64")
        }
        _ => false,
    }
}

/// Check if a type mentions a trait object anywhere (`dyn Trait`, `Box<dyn Trait>`).
pub fn contains_trait_object(ty: &Type) -> bool {
    match ty {
        Type::TraitObject(_) => true,
        Type::Reference(reference) => contains_trait_object(&reference.elem),
        Type::Paren(paren) => contains_trait_object(&paren.elem),
        Type::Group(group) => contains_trait_object(&group.elem),
        Type::Array(array) => contains_trait_object(&array.elem),
        Type::Slice(slice) => contains_trait_object(&slice.elem),
        Type::Tuple(tuple) => tuple.elems.iter().any(contains_trait_object),
        Type::Path(type_path) => type_path.path.segments.iter().any(|segment| {
            let PathArguments::AngleBracketed(args) = &segment.arguments else {
                return false;
            };
            args.args.iter().any(|arg| match arg {
                GenericArgument::Type(ty) => contains_trait_object(ty),
                _ => false,
            })
        }),
        _ => false,
    }
}
