//! `ValueObject` derive macro implementation.
//!
//! Generates `value_eq::ValueObject` from a struct's named fields. Each field
//! becomes one member declaration; which builder method declares it follows
//! from the field's attributes and the shape of its type:
//!
//! | field                          | declaration          |
//! |--------------------------------|----------------------|
//! | `#[value_eq(ignore)]`          | `ignore`             |
//! | `#[value_eq(sequence)] S`      | `sequence`           |
//! | `f32`, `f64`                   | `canonical`          |
//! | `Option<f32>`, `Option<f64>`   | `canonical_nullable` |
//! | `Option<T>`, `Box<T>`, ...     | `nullable`           |
//! | anything else                  | `field`              |
//!
//! The generated `Eq` impl requires `Eq` of every compared field type except
//! the floats, which are compared through their canonical form. A field
//! whose `PartialEq` is not reflexive has to be ignored, or the type has to
//! opt out with `#[value_eq(skip_std_traits)]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{ext::IdentExt, parse_macro_input, Attribute, DeriveInput, Field, Ident, LitStr, Type};

use crate::utils::{
    contains_trait_object, is_float_type, option_inner, pointer_inner,
    validate_struct_with_named_fields,
};

/// Main entry point for the `ValueObject` derive macro.
pub fn derive_value_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_value_object_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_value_object_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "ValueObject derive does not support generic types",
        ));
    }

    let container = parse_container_attrs(&input.attrs)?;
    let fields = validate_struct_with_named_fields(input, "ValueObject")?;

    let declarations = fields
        .iter()
        .map(|field| generate_declaration(name, field))
        .collect::<syn::Result<Vec<_>>>()?;

    let std_traits = if container.skip_std_traits {
        quote! {}
    } else {
        let eq_bounds = fields
            .iter()
            .map(total_eq_bound)
            .filter_map(syn::Result::transpose)
            .collect::<syn::Result<Vec<_>>>()?;
        generate_std_traits(name, &eq_bounds)
    };

    Ok(quote! {
        impl ::value_eq::ValueObject for #name {
            fn members(members: &mut ::value_eq::Members<Self>) {
                #(#declarations)*
            }

            fn comparer() -> &'static ::value_eq::Comparer<Self> {
                static COMPARER: ::std::sync::OnceLock<&'static ::value_eq::Comparer<#name>> =
                    ::std::sync::OnceLock::new();
                *COMPARER.get_or_init(::value_eq::Comparer::<#name>::instance)
            }
        }

        #std_traits
    })
}

/// `PartialEq`, `Eq` and `Hash`, all routed through the cached comparer.
///
/// `eq_bounds` are the field types whose `Eq` the derived `Eq` relies on.
fn generate_std_traits(name: &Ident, eq_bounds: &[&Type]) -> TokenStream2 {
    quote! {
        impl ::core::cmp::PartialEq for #name {
            fn eq(&self, other: &Self) -> bool {
                <Self as ::value_eq::ValueObject>::comparer().equals(self, other)
            }
        }

        impl ::core::cmp::Eq for #name
        where
            #(#eq_bounds: ::core::cmp::Eq,)*
        {
        }

        impl ::core::hash::Hash for #name {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(<Self as ::value_eq::ValueObject>::comparer().hash(self));
            }
        }
    }
}

/// The field type whose `Eq` the derived `Eq` depends on, if any.
///
/// Ignored fields and canonically compared floats impose nothing.
fn total_eq_bound(field: &Field) -> syn::Result<Option<&Type>> {
    if parse_field_attrs(field)?.ignore {
        return Ok(None);
    }
    let ty = &field.ty;
    let canonical = is_float_type(ty) || option_inner(ty).is_some_and(is_float_type);
    Ok((!canonical).then_some(ty))
}

#[derive(Default)]
struct ContainerAttrs {
    skip_std_traits: bool,
}

/// Parse `#[value_eq(skip_std_traits)]` on the struct itself.
fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut parsed = ContainerAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("value_eq")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip_std_traits") {
                parsed.skip_std_traits = true;
                Ok(())
            } else {
                Err(meta.error("unknown value_eq container attribute, expected `skip_std_traits`"))
            }
        })?;
    }
    Ok(parsed)
}

#[derive(Default)]
struct FieldAttrs {
    ignore: bool,
    sequence: bool,
}

/// Parse `#[value_eq(ignore)]` and `#[value_eq(sequence)]` on a field.
fn parse_field_attrs(field: &Field) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("value_eq")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("ignore") {
                parsed.ignore = true;
                Ok(())
            } else if meta.path.is_ident("sequence") {
                parsed.sequence = true;
                Ok(())
            } else {
                Err(meta.error("unknown value_eq field attribute, expected `ignore` or `sequence`"))
            }
        })?;
    }
    Ok(parsed)
}

/// Generate the builder call that declares one field.
fn generate_declaration(owner: &Ident, field: &Field) -> syn::Result<TokenStream2> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
    let member = LitStr::new(&ident.unraw().to_string(), ident.span());
    let ty = &field.ty;
    let attrs = parse_field_attrs(field)?;

    // Excluded members need no contract, so their type is never inspected.
    if attrs.ignore {
        return Ok(quote! {
            members.ignore::<#ty>(#member);
        });
    }

    if contains_trait_object(ty) {
        return Err(syn::Error::new_spanned(
            ty,
            format!(
                "field `{member}` holds a trait object, which has no equality contract; \
                 mark it #[value_eq(ignore)]",
                member = member.value()
            ),
        ));
    }

    if attrs.sequence {
        return Ok(match option_inner(ty) {
            Some(_) => quote! {
                members.sequence(#member, |this: &#owner| this.#ident.as_ref());
            },
            None => quote! {
                members.sequence(#member, |this: &#owner| ::core::option::Option::Some(&this.#ident));
            },
        });
    }

    if is_float_type(ty) {
        return Ok(quote! {
            members.canonical(#member, |this: &#owner| &this.#ident);
        });
    }

    if let Some(inner) = option_inner(ty) {
        if is_float_type(inner) {
            return Ok(quote! {
                members.canonical_nullable(#member, |this: &#owner| this.#ident.as_ref());
            });
        }
        if pointer_inner(inner).is_some() {
            return Ok(quote! {
                members.nullable(#member, |this: &#owner| this.#ident.as_deref());
            });
        }
        return Ok(quote! {
            members.nullable(#member, |this: &#owner| this.#ident.as_ref());
        });
    }

    if pointer_inner(ty).is_some() {
        return Ok(quote! {
            members.nullable(#member, |this: &#owner| ::core::option::Option::Some(&*this.#ident));
        });
    }

    Ok(quote! {
        members.field(#member, |this: &#owner| &this.#ident);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, FieldsNamed};

    fn bounds(fields: &FieldsNamed) -> Vec<Type> {
        fields
            .named
            .iter()
            .filter_map(|field| total_eq_bound(field).unwrap())
            .cloned()
            .collect()
    }

    #[test]
    fn test_compared_fields_require_eq() {
        let fields: FieldsNamed = parse_quote!({
            name: String,
            tags: Vec<Option<String>>,
            shared: Option<Box<Nested>>,
            weight: Box<f64>,
        });
        let expected: [Type; 4] = [
            parse_quote!(String),
            parse_quote!(Vec<Option<String>>),
            parse_quote!(Option<Box<Nested>>),
            parse_quote!(Box<f64>),
        ];
        assert_eq!(bounds(&fields), expected);
    }

    #[test]
    fn test_floats_and_ignored_fields_impose_no_bound() {
        let fields: FieldsNamed = parse_quote!({
            price: f64,
            discount: Option<f32>,
            #[value_eq(ignore)]
            callback: Box<dyn Fn()>,
        });
        assert!(bounds(&fields).is_empty());
    }
}
