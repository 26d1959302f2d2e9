//! Shared analysis of fieldless enums.

use crate::attrs::{ContainerAttrs, VariantAttrs};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::{DataEnum, DeriveInput, Expr, Fields, Lit, UnOp};

/// A fieldless enum and the literal of each variant.
pub struct UnitEnum {
    type_name: String,
    kind: Ident,
    variants: Vec<UnitVariant>,
}

pub struct UnitVariant {
    pub ident: Ident,
    pub name: String,
    pub literal: TokenStream,
}

impl UnitEnum {
    pub fn analyze(input: &DeriveInput, data: &DataEnum) -> syn::Result<Self> {
        let schema = crate::schema_path();
        let container = ContainerAttrs::parse(&input.attrs)?;
        let type_name = container
            .rename
            .unwrap_or_else(|| input.ident.unraw().to_string());

        if data.variants.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "enums without variants cannot be described",
            ));
        }

        let mut attrs = Vec::with_capacity(data.variants.len());
        for variant in &data.variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    &variant.fields,
                    "only fieldless enum variants are supported",
                ));
            }
            attrs.push(VariantAttrs::parse(&variant.attrs)?);
        }

        let with_values = attrs.iter().filter(|a| a.value.is_some()).count();
        let textual = with_values > 0;
        if textual && with_values != attrs.len() {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "either every variant or none carries `#[ts(value = \"...\")]`",
            ));
        }

        let kind = if textual {
            Ident::new("String", Span::call_site())
        } else {
            repr_kind(input)?
        };
        let unsigned = kind.to_string().starts_with("Uint");

        let mut variants = Vec::with_capacity(data.variants.len());
        let mut next: i128 = 0;
        for (variant, attrs) in data.variants.iter().zip(attrs) {
            let literal = match attrs.value {
                Some(value) => quote! {
                    #schema::EnumLiteral::Str(::std::string::String::from(#value))
                },
                None => {
                    let value = match &variant.discriminant {
                        Some((_, expr)) => discriminant(expr)?,
                        None => next,
                    };
                    next = value + 1;
                    integer_literal(value, unsigned, variant)?
                }
            };
            variants.push(UnitVariant {
                ident: variant.ident.clone(),
                name: attrs
                    .name
                    .unwrap_or_else(|| variant.ident.unraw().to_string()),
                literal,
            });
        }

        Ok(Self {
            type_name,
            kind,
            variants,
        })
    }

    pub fn variants(&self) -> &[UnitVariant] {
        &self.variants
    }

    /// Expression registering the enum's named type and returning its handle.
    pub fn alias(&self) -> TokenStream {
        let schema = crate::schema_path();
        let type_name = &self.type_name;
        let kind = &self.kind;
        quote! {
            schema.define_with(#type_name, |_| {
                #schema::TypeDef::Alias(#schema::AliasDef::new(
                    #type_name,
                    #schema::TypeDesc::Primitive(#schema::Kind::#kind),
                ))
            })
        }
    }
}

fn repr_kind(input: &DeriveInput) -> syn::Result<Ident> {
    let mut kind = "Int";
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                kind = match ident.to_string().as_str() {
                    "i8" => "Int8",
                    "i16" => "Int16",
                    "i32" => "Int32",
                    "i64" => "Int64",
                    "isize" => "Int",
                    "u8" => "Uint8",
                    "u16" => "Uint16",
                    "u32" => "Uint32",
                    "u64" => "Uint64",
                    "usize" => "Uint",
                    _ => kind,
                };
            }
            if meta.input.peek(syn::token::Paren) {
                let content;
                syn::parenthesized!(content in meta.input);
                content.parse::<TokenStream>()?;
            }
            Ok(())
        })?;
    }
    Ok(Ident::new(kind, Span::call_site()))
}

fn discriminant(expr: &Expr) -> syn::Result<i128> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int) => int.base10_parse(),
            other => Err(syn::Error::new_spanned(
                other,
                "enum discriminants must be integer literals",
            )),
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => Ok(-discriminant(&unary.expr)?),
        Expr::Paren(paren) => discriminant(&paren.expr),
        Expr::Group(group) => discriminant(&group.expr),
        other => Err(syn::Error::new_spanned(
            other,
            "enum discriminants must be integer literals",
        )),
    }
}

fn integer_literal(value: i128, unsigned: bool, variant: &syn::Variant) -> syn::Result<TokenStream> {
    let schema = crate::schema_path();
    if unsigned {
        let value = u64::try_from(value).map_err(|_| {
            syn::Error::new_spanned(&variant.ident, "discriminant does not fit an unsigned value")
        })?;
        Ok(quote! { #schema::EnumLiteral::Uint(#value) })
    } else {
        let value = i64::try_from(value).map_err(|_| {
            syn::Error::new_spanned(&variant.ident, "discriminant does not fit a signed value")
        })?;
        Ok(quote! { #schema::EnumLiteral::Int(#value) })
    }
}
