//! `#[derive(Describe)]` expansion.

use crate::attrs::{ContainerAttrs, FieldAttrs};
use crate::unit_enum::UnitEnum;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DataStruct, DeriveInput, Fields, Type};

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    crate::reject_generics(input, "Describe")?;
    let name = &input.ident;
    let schema = crate::schema_path();

    let body = match &input.data {
        Data::Struct(data) => expand_struct(input, data)?,
        Data::Enum(data) => UnitEnum::analyze(input, data)?.alias(),
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Describe can only be derived for structs and enums, not unions",
            ));
        }
    };

    Ok(quote! {
        impl #schema::Describe for #name {
            fn describe(schema: &mut #schema::Schema) -> #schema::TypeDesc {
                #body
            }
        }
    })
}

fn expand_struct(input: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream> {
    let schema = crate::schema_path();
    let container = ContainerAttrs::parse(&input.attrs)?;
    let type_name = container
        .rename
        .unwrap_or_else(|| input.ident.unraw().to_string());

    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Describe can only be derived for structs with named fields",
        ));
    };

    let mut fields = Vec::new();
    for field in &named.named {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let rust_name = ident.unraw().to_string();
        let ty = &field.ty;

        let mut expr = if attrs.flatten {
            quote! {
                #schema::FieldDef::embedded(#rust_name, <#ty as #schema::Describe>::describe(schema))
            }
        } else {
            let desc = if attrs.ts_type.is_some() {
                overridden_desc(ty)
            } else {
                quote! { <#ty as #schema::Describe>::describe(schema) }
            };
            let json = attrs.rename.unwrap_or_else(|| rust_name.clone());
            let tag = if attrs.omit_empty {
                format!("{json},omitempty")
            } else {
                json
            };
            quote! {
                #schema::FieldDef::new(#rust_name, #desc).json(#tag)
            }
        };
        if let Some(ts_type) = attrs.ts_type {
            expr = quote! { #expr.ts_type(#ts_type) };
        }
        if let Some(transform) = attrs.transform {
            expr = quote! { #expr.ts_transform(#transform) };
        }
        fields.push(expr);
    }

    Ok(quote! {
        schema.define_with(#type_name, |schema| {
            let _ = &schema;
            #schema::TypeDef::Struct(
                #schema::StructDef::new(#type_name)
                    #(.field(#fields))*
            )
        })
    })
}

/// Descriptor for a field whose TypeScript type is given explicitly.
///
/// The field type is not required to implement `Describe`; only an outer
/// `Option` is kept so the field stays optional.
fn overridden_desc(ty: &Type) -> TokenStream {
    let schema = crate::schema_path();
    let any = quote! { #schema::TypeDesc::Primitive(#schema::Kind::Any) };
    if is_option(ty) {
        quote! { #schema::TypeDesc::pointer(#any) }
    } else {
        any
    }
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        Type::Group(group) => is_option(&group.elem),
        Type::Paren(paren) => is_option(&paren.elem),
        _ => false,
    }
}
