//! # Typescriptify Schema
//!
//! Host type model, reflection traits and schema parser.
//!
//! This crate provides:
//! - Type handles and definitions for structs, aliases and enumerations
//! - The `Describe` reflection trait and its std implementations
//! - Go-style type expression parsing
//! - XML schema documents
//! - Schema validation

pub mod describe;
pub mod error;
pub mod expr;
pub mod parser;
pub mod types;
pub mod validation;

pub use describe::{Describe, EnumValue, TsEnum, TsNamer, scalar_element};
pub use error::{ParseError, SchemaError};
pub use parser::{SchemaDocument, Settings, parse_schema, parse_schema_file};
pub use types::{
    AliasDef, EnumDef, EnumElement, EnumLiteral, FieldDef, FieldMeta, FieldOptions,
    IGNORE_SENTINEL, JsonTag, Kind, Schema, StructDef, TypeDef, TypeDesc, VALUE_PLACEHOLDER,
};
pub use validation::{validate_enum, validate_schema};
