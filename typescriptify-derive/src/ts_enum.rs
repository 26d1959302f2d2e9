//! `#[derive(TsEnum)]` expansion.

use crate::unit_enum::UnitEnum;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DataStruct, DeriveInput, Fields};

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    crate::reject_generics(input, "TsEnum")?;
    match &input.data {
        Data::Enum(data) => expand_unit_enum(input, &UnitEnum::analyze(input, data)?),
        Data::Struct(data) => expand_record(input, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "TsEnum can only be derived for enums and structs, not unions",
        )),
    }
}

/// Each variant is one member; the enum itself is the named type.
fn expand_unit_enum(input: &DeriveInput, unit: &UnitEnum) -> syn::Result<TokenStream> {
    let schema = crate::schema_path();
    let name = &input.ident;
    let alias = unit.alias();

    let literal_arms = unit.variants().iter().map(|v| {
        let ident = &v.ident;
        let literal = &v.literal;
        quote! { Self::#ident => #literal }
    });
    let name_arms = unit.variants().iter().map(|v| {
        let ident = &v.ident;
        let member = &v.name;
        quote! { Self::#ident => ::std::string::String::from(#member) }
    });

    Ok(quote! {
        impl #schema::EnumValue for #name {
            fn literal(&self) -> #schema::EnumLiteral {
                match self {
                    #(#literal_arms,)*
                }
            }
        }

        impl #schema::TsNamer for #name {
            fn ts_name(&self) -> ::std::string::String {
                match self {
                    #(#name_arms,)*
                }
            }
        }

        impl #schema::TsEnum for #name {
            fn enum_type(schema: &mut #schema::Schema) -> #schema::TypeDesc {
                #alias
            }

            fn enum_element(&self) -> #schema::EnumElement {
                #schema::scalar_element(self)
            }
        }
    })
}

/// A record with a `value` field of the enum type and a `ts_name` field.
fn expand_record(input: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream> {
    let schema = crate::schema_path();
    let name = &input.ident;

    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            name,
            "TsEnum records need named `value` and `ts_name` fields",
        ));
    };
    let field = |wanted: &str| {
        named
            .named
            .iter()
            .find(|f| f.ident.as_ref().is_some_and(|i| i.unraw() == wanted))
    };
    let (Some(value), Some(_)) = (field("value"), field("ts_name")) else {
        return Err(syn::Error::new_spanned(
            name,
            "TsEnum records need named `value` and `ts_name` fields",
        ));
    };
    let value_ty = &value.ty;

    Ok(quote! {
        impl #schema::TsEnum for #name {
            fn enum_type(schema: &mut #schema::Schema) -> #schema::TypeDesc {
                <#value_ty as #schema::Describe>::describe(schema)
            }

            fn enum_element(&self) -> #schema::EnumElement {
                #schema::EnumElement::new(
                    #schema::EnumValue::literal(&self.value),
                    ::std::string::ToString::to_string(&self.ts_name),
                )
            }
        }
    })
}
