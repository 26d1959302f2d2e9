//! `#[ts(...)]` attribute parsing.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

/// Options on a struct or enum.
#[derive(Default)]
pub struct ContainerAttrs {
    /// Name of the generated entity.
    pub rename: Option<String>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for_each_ts(attrs, |meta| {
            if meta.path.is_ident("rename") {
                out.rename = Some(string_value(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unsupported container attribute, expected `rename`"))
            }
        })?;
        Ok(out)
    }
}

/// Options on a struct field.
#[derive(Default)]
pub struct FieldAttrs {
    pub rename: Option<String>,
    pub skip: bool,
    pub omit_empty: bool,
    pub ts_type: Option<String>,
    pub transform: Option<String>,
    pub flatten: bool,
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for_each_ts(attrs, |meta| {
            if meta.path.is_ident("rename") {
                out.rename = Some(string_value(&meta)?);
            } else if meta.path.is_ident("skip") {
                out.skip = true;
            } else if meta.path.is_ident("omit_empty") || meta.path.is_ident("optional") {
                out.omit_empty = true;
            } else if meta.path.is_ident("type") || meta.path.is_ident("ts_type") {
                out.ts_type = Some(string_value(&meta)?);
            } else if meta.path.is_ident("transform") {
                out.transform = Some(string_value(&meta)?);
            } else if meta.path.is_ident("flatten") {
                out.flatten = true;
            } else {
                return Err(meta.error(
                    "unsupported field attribute, expected one of `rename`, `skip`, \
                     `omit_empty`, `optional`, `type`, `transform`, `flatten`",
                ));
            }
            Ok(())
        })?;
        Ok(out)
    }
}

/// Options on an enum variant.
#[derive(Default)]
pub struct VariantAttrs {
    /// Member name in generated output.
    pub name: Option<String>,
    /// Text value of the member.
    pub value: Option<String>,
}

impl VariantAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for_each_ts(attrs, |meta| {
            if meta.path.is_ident("name") {
                out.name = Some(string_value(&meta)?);
            } else if meta.path.is_ident("value") {
                out.value = Some(string_value(&meta)?);
            } else {
                return Err(meta.error("unsupported variant attribute, expected `name` or `value`"));
            }
            Ok(())
        })?;
        Ok(out)
    }
}

fn for_each_ts<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("ts")) {
        attr.parse_nested_meta(&mut f)?;
    }
    Ok(())
}

fn string_value(meta: &ParseNestedMeta) -> syn::Result<String> {
    let lit: LitStr = meta.value()?.parse()?;
    Ok(lit.value())
}
