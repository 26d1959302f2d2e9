//! Schema validation utilities.
//!
//! This module provides validation functions for schemas to ensure every
//! reference resolves before code generation runs.

use crate::error::SchemaError;
use crate::types::{EnumDef, Schema, StructDef, TypeDef, TypeDesc};

/// Validates a schema for correctness.
///
/// # Arguments
/// * `schema` - The schema to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    for type_def in &schema.types {
        match type_def {
            TypeDef::Struct(def) => validate_struct(schema, def)?,
            TypeDef::Alias(alias) => {
                validate_reference(schema, &alias.underlying)?;
                schema.resolve_alias(&alias.underlying)?;
            }
        }
    }
    Ok(())
}

/// Validates a struct definition.
fn validate_struct(schema: &Schema, def: &StructDef) -> Result<(), SchemaError> {
    for field in &def.fields {
        validate_reference(schema, &field.ty)?;
        if field.embedded && schema.struct_name(field.ty.deref())?.is_none() {
            return Err(SchemaError::InvalidEmbedding {
                owner: def.name.clone(),
                field: field.name.clone(),
            });
        }
    }
    // Detects embedding cycles.
    schema.deep_fields(&def.name)?;
    Ok(())
}

/// Checks that every named handle inside `desc` is registered.
fn validate_reference(schema: &Schema, desc: &TypeDesc) -> Result<(), SchemaError> {
    match desc {
        TypeDesc::Primitive(_) => Ok(()),
        TypeDesc::Named(name) => {
            if schema.has_type(name) {
                Ok(())
            } else {
                Err(SchemaError::TypeNotFound { name: name.clone() })
            }
        }
        TypeDesc::Pointer(inner) | TypeDesc::Slice(inner) => validate_reference(schema, inner),
        TypeDesc::Map { key, value } => {
            validate_reference(schema, key)?;
            validate_reference(schema, value)
        }
    }
}

/// Validates an enum definition.
///
/// # Errors
/// Returns `SchemaError` on an empty enum, a blank member name, or a
/// duplicate member name or value.
pub fn validate_enum(enum_def: &EnumDef) -> Result<(), SchemaError> {
    if enum_def.elements.is_empty() {
        return Err(SchemaError::Validation {
            message: format!("Enum '{}' has no values", enum_def.name),
        });
    }

    let mut seen_names = Vec::with_capacity(enum_def.elements.len());
    let mut seen_values = Vec::with_capacity(enum_def.elements.len());

    for element in &enum_def.elements {
        if element.name.trim().is_empty() {
            return Err(SchemaError::InvalidEnumValue {
                enum_name: enum_def.name.clone(),
                value: element.value.render(),
            });
        }

        if seen_names.contains(&&element.name) {
            return Err(SchemaError::Validation {
                message: format!(
                    "Duplicate enum value name '{}' in enum '{}'",
                    element.name, enum_def.name
                ),
            });
        }
        seen_names.push(&element.name);

        if seen_values.contains(&&element.value) {
            return Err(SchemaError::Validation {
                message: format!(
                    "Duplicate enum value '{}' in enum '{}'",
                    element.value, enum_def.name
                ),
            });
        }
        seen_values.push(&element.value);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AliasDef, EnumLiteral, FieldDef, Kind};

    fn valid_schema() -> Schema {
        let mut schema = Schema::new();
        schema.add_type(TypeDef::Struct(
            StructDef::new("Address").field(FieldDef::new("City", Kind::String.into()).json("city")),
        ));
        schema.add_type(TypeDef::Struct(
            StructDef::new("Person")
                .field(FieldDef::new("Homes", TypeDesc::parse("map[string]*Address").unwrap()).json("homes")),
        ));
        schema
    }

    #[test]
    fn test_validate_valid_schema() {
        assert!(validate_schema(&valid_schema()).is_ok());
    }

    #[test]
    fn test_validate_unknown_reference() {
        let mut schema = valid_schema();
        schema.add_type(TypeDef::Struct(
            StructDef::new("Order").field(FieldDef::new("Items", TypeDesc::parse("[]Item").unwrap())),
        ));
        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::TypeNotFound { name }) if name == "Item"
        ));
    }

    #[test]
    fn test_validate_embedded_non_struct() {
        let mut schema = valid_schema();
        schema.add_type(TypeDef::Alias(AliasDef::new("Weekday", Kind::Int.into())));
        schema.add_type(TypeDef::Struct(
            StructDef::new("Shift").field(FieldDef::embedded("Weekday", TypeDesc::named("Weekday"))),
        ));
        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::InvalidEmbedding { .. })
        ));
    }

    #[test]
    fn test_validate_enum_duplicates() {
        let def = EnumDef::new("Color")
            .element(EnumLiteral::Int(1), "Red")
            .element(EnumLiteral::Int(1), "Crimson");
        assert!(matches!(
            validate_enum(&def),
            Err(SchemaError::Validation { .. })
        ));

        let def = EnumDef::new("Color")
            .element(EnumLiteral::Int(1), "Red")
            .element(EnumLiteral::Int(2), "Red");
        assert!(validate_enum(&def).is_err());
    }

    #[test]
    fn test_validate_enum_blank_name() {
        let def = EnumDef::new("Color").element(EnumLiteral::Int(1), " ");
        assert!(matches!(
            validate_enum(&def),
            Err(SchemaError::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn test_validate_enum_ok() {
        let def = EnumDef::new("Color")
            .element(EnumLiteral::Int(1), "Red")
            .element(EnumLiteral::Int(2), "Green");
        assert!(validate_enum(&def).is_ok());
        assert!(validate_enum(&EnumDef::new("Empty")).is_err());
    }
}
