//! Error types for schema parsing and validation.

use thiserror::Error;

/// Error type for schema parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed character or entity reference.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Unknown element encountered.
    #[error("unknown element '{element}' in context '{context}'")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (type, enum, etc.).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Malformed type expression.
    #[error("invalid type expression '{expr}': {reason}")]
    InvalidTypeExpr {
        /// The expression as written.
        expr: String,
        /// What went wrong.
        reason: String,
    },

    /// Invalid enum literal for the declared underlying type.
    #[error("invalid literal '{literal}' for enum '{enum_name}'")]
    InvalidEnumLiteral {
        /// Enum name.
        enum_name: String,
        /// Literal as written.
        literal: String,
    },

    /// Invalid schema structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Type not found.
    #[error("type '{name}' not found")]
    TypeNotFound {
        /// Type name.
        name: String,
    },

    /// A struct was expected but the name refers to something else.
    #[error("type '{name}' is not a struct")]
    NotAStruct {
        /// Type name.
        name: String,
    },

    /// Embedded field that does not refer to a struct.
    #[error("embedded field '{field}' in '{owner}' does not refer to a struct")]
    InvalidEmbedding {
        /// Owning struct.
        owner: String,
        /// Field name.
        field: String,
    },

    /// Circular type reference.
    #[error("circular type reference detected: {path}")]
    CircularReference {
        /// Path of the circular reference.
        path: String,
    },

    /// Invalid enum value.
    #[error("invalid enum value '{value}' for enum '{enum_name}'")]
    InvalidEnumValue {
        /// Enum name.
        enum_name: String,
        /// Invalid value.
        value: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid type expression error.
    pub fn type_expr(expr: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTypeExpr {
            expr: expr.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attr_message() {
        let err = ParseError::missing_attr("field", "type");
        assert_eq!(
            err.to_string(),
            "missing required attribute 'type' on element 'field'"
        );
    }

    #[test]
    fn test_type_expr_message() {
        let err = ParseError::type_expr("map[string", "missing ']'");
        assert!(err.to_string().contains("map[string"));
        assert!(err.to_string().contains("missing ']'"));
    }

    #[test]
    fn test_schema_error_from_parse() {
        let err: SchemaError = ParseError::duplicate("struct", "Person").into();
        assert!(matches!(err, SchemaError::Parse(_)));
    }
}
