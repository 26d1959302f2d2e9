//! # Typescriptify Derive
//!
//! Procedural macros describing Rust types for TypeScript generation.
//!
//! The generated code refers to `::typescriptify::schema`, so these macros
//! are used through the `typescriptify` crate.

mod attrs;
mod describe;
mod ts_enum;
mod unit_enum;

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

/// Derives `Describe` for a struct with named fields or a fieldless enum.
///
/// Structs become struct definitions whose fields carry a JSON name (the
/// field name unless renamed). Enums become a named scalar type: text when
/// the variants carry `#[ts(value = "...")]`, otherwise the integer kind of
/// their `#[repr]`.
///
/// # Example
/// ```ignore
/// #[derive(Describe)]
/// #[ts(rename = "User")]
/// struct Person {
///     name: String,
///     #[ts(omit_empty)]
///     nickname: String,
///     #[ts(rename = "born_at", type = "Date", transform = "new Date(__VALUE__)")]
///     born: String,
///     #[ts(flatten)]
///     audit: Audit,
///     #[ts(skip)]
///     cache: Cache,
/// }
/// ```
#[proc_macro_derive(Describe, attributes(ts))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    describe::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `TsEnum` for a fieldless enum or an enum record.
///
/// On an enum, every variant is a member named after the variant (or
/// `#[ts(name = "...")]`) with its discriminant or `#[ts(value = "...")]`
/// as value. On a struct, the `value` field holds the member value and
/// `ts_name` its name.
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy, TsEnum)]
/// #[repr(u8)]
/// enum Weekday {
///     Sunday,
///     Monday,
///     #[ts(name = "Tue")]
///     Tuesday = 5,
/// }
/// ```
#[proc_macro_derive(TsEnum, attributes(ts))]
pub fn derive_ts_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    ts_enum::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn schema_path() -> proc_macro2::TokenStream {
    quote! { ::typescriptify::schema }
}

fn reject_generics(input: &DeriveInput, derive: &str) -> syn::Result<()> {
    if input.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &input.generics,
            format!("{derive} cannot be derived for generic types"),
        ))
    }
}
