//! Scalar kind to TypeScript type mapping.

use std::collections::HashMap;
use typescriptify_schema::Kind;

/// TypeScript name for boolean kinds.
pub const TS_BOOLEAN: &str = "boolean";
/// TypeScript name for numeric kinds.
pub const TS_NUMBER: &str = "number";
/// TypeScript name for text.
pub const TS_STRING: &str = "string";
/// TypeScript name for dynamic values.
pub const TS_ANY: &str = "any";

/// Fixed lookup table from scalar kinds to TypeScript primitive names.
///
/// Complex numbers, functions and channels have no mapping.
#[derive(Debug, Clone)]
pub struct KindMapper {
    table: HashMap<Kind, &'static str>,
}

impl KindMapper {
    /// Creates the mapper with its fixed table.
    #[must_use]
    pub fn new() -> Self {
        let mut table = HashMap::new();

        table.insert(Kind::Bool, TS_BOOLEAN);
        table.insert(Kind::Any, TS_ANY);
        table.insert(Kind::String, TS_STRING);

        for kind in Kind::ALL {
            if kind.is_signed() || kind.is_unsigned() || kind.is_float() {
                table.insert(kind, TS_NUMBER);
            }
        }

        Self { table }
    }

    /// Returns the TypeScript name for `kind`, if it has one.
    #[must_use]
    pub fn lookup(&self, kind: Kind) -> Option<&'static str> {
        self.table.get(&kind).copied()
    }
}

impl Default for KindMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_kinds() {
        let mapper = KindMapper::new();
        for kind in [Kind::Int, Kind::Int8, Kind::Uint64, Kind::Float32, Kind::Float64] {
            assert_eq!(mapper.lookup(kind), Some("number"));
        }
    }

    #[test]
    fn test_other_kinds() {
        let mapper = KindMapper::default();
        assert_eq!(mapper.lookup(Kind::Bool), Some("boolean"));
        assert_eq!(mapper.lookup(Kind::String), Some("string"));
        assert_eq!(mapper.lookup(Kind::Any), Some("any"));
    }

    #[test]
    fn test_unmapped_kinds() {
        let mapper = KindMapper::new();
        for kind in [Kind::Func, Kind::Chan, Kind::Complex64, Kind::Complex128] {
            assert_eq!(mapper.lookup(kind), None);
        }
    }
}
