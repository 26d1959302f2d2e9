//! # Typescriptify
//!
//! Generate TypeScript classes, interfaces and enums from Rust types.
//!
//! Rust types describe themselves through `#[derive(Describe)]`; a
//! [`codegen::Generator`] collects them and emits TypeScript that declares
//! matching entities and rebuilds nested objects from JSON payloads.
//! Hand-written code placed between `//[Name:]` and `//[end]` markers in a
//! generated file survives regeneration.
//!
//! ## Quick Start
//!
//! ```ignore
//! use typescriptify::prelude::*;
//!
//! #[derive(Describe)]
//! struct Address {
//!     city: String,
//! }
//!
//! #[derive(Describe)]
//! struct Person {
//!     name: String,
//!     age: Option<u32>,
//!     addresses: Vec<Address>,
//! }
//!
//! let mut generator = Generator::new().with_create_from_method(false);
//! generator.add::<Person>();
//! generator.convert_to_file("models.ts")?;
//! ```
//!
//! Types can also be declared in an XML schema and converted with
//! [`codegen::convert_schema_file`].
//!
//! ## Crate Organization
//!
//! - [`schema`] - Type model, reflection traits and XML schema parsing
//! - [`codegen`] - TypeScript generation and output file handling

pub mod prelude;

/// Type model, reflection traits and schema parsing.
pub mod schema {
    pub use typescriptify_schema::*;
}

/// TypeScript generation.
pub mod codegen {
    pub use typescriptify_codegen::*;
}

pub use typescriptify_derive::{Describe, TsEnum};
pub use typescriptify_schema::{Describe, TsEnum};
