//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] typescriptify_schema::ParseError),

    /// Schema validation error.
    #[error("schema error: {0}")]
    Schema(#[from] typescriptify_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Field whose kind has no output mapping and no override.
    #[error("cannot find type for {kind} (field '{field}' in '{owner}')")]
    UnmappableType {
        /// Offending kind or type expression.
        kind: String,
        /// Field name.
        field: String,
        /// Owning type name.
        owner: String,
    },

    /// Unknown type reference.
    #[error("unknown type '{type_name}' in field '{field}'")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Field name.
        field: String,
    },

    /// A registered type is not a struct.
    #[error("type '{type_name}' is not a struct and cannot be converted")]
    NotAStruct {
        /// Type name.
        type_name: String,
    },

    /// Map key type that cannot be used as an index signature.
    #[error("unsupported map key type '{key}' in field '{field}' of '{owner}'")]
    UnsupportedMapKey {
        /// Key type expression.
        key: String,
        /// Field name.
        field: String,
        /// Owning type name.
        owner: String,
    },
}

impl CodegenError {
    /// Creates an unmappable type error.
    pub fn unmappable(
        kind: impl Into<String>,
        field: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self::UnmappableType {
            kind: kind.into(),
            field: field.into(),
            owner: owner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmappable_message() {
        let err = CodegenError::unmappable("func", "callback", "Handler");
        assert_eq!(
            err.to_string(),
            "cannot find type for func (field 'callback' in 'Handler')"
        );
    }

    #[test]
    fn test_from_schema_error() {
        let err: CodegenError = typescriptify_schema::SchemaError::TypeNotFound {
            name: "Person".to_string(),
        }
        .into();
        assert!(matches!(err, CodegenError::Schema(_)));
    }
}
