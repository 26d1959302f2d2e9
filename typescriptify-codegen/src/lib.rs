//! # Typescriptify Codegen
//!
//! TypeScript generation from host type descriptions.
//!
//! This crate provides:
//! - Class and interface generation with payload hydration
//! - Enum generation
//! - Preservation of hand-written code blocks across regeneration
//! - Output file backup and writing

pub mod custom_code;
pub mod error;
pub mod generator;
pub mod options;
pub mod output;
pub mod typescript;

pub use custom_code::CustomCode;
pub use error::CodegenError;
pub use generator::{Generator, StructType};
pub use options::Options;

/// Generates TypeScript from an XML schema string.
///
/// # Arguments
/// * `xml` - XML schema content
///
/// # Returns
/// Generated TypeScript code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or generation fails.
pub fn generate_from_xml(xml: &str) -> Result<String, CodegenError> {
    let document = typescriptify_schema::parse_schema(xml)?;
    let generator = Generator::from_document(document)?;
    generator.convert(&CustomCode::new())
}

/// Generates TypeScript from an XML schema file.
///
/// # Arguments
/// * `path` - Path to the XML schema file
///
/// # Returns
/// Generated TypeScript code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<String, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml)
}

/// Converts an XML schema file into a TypeScript file, keeping the custom
/// code blocks of the file it replaces.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, generation, or writing fails.
pub fn convert_schema_file(
    schema_path: &std::path::Path,
    output_path: &std::path::Path,
) -> Result<(), CodegenError> {
    let document = typescriptify_schema::parse_schema_file(schema_path)?;
    Generator::from_document(document)?.convert_to_file(output_path)
}
