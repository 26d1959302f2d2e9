//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits. The
//! `Describe` and `TsEnum` names bring both the trait and its derive macro.
//!
//! ```ignore
//! use typescriptify::prelude::*;
//! ```

// Derive macros
pub use typescriptify_derive::{Describe, TsEnum};

// Type model
pub use typescriptify_schema::{
    Describe, EnumDef, EnumElement, EnumLiteral, EnumValue, FieldOptions, Kind, Schema, TsEnum,
    TsNamer, TypeDesc,
};

// Generation
pub use typescriptify_codegen::{CodegenError, CustomCode, Generator, Options, StructType};
