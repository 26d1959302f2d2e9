//! Enum registration and generation.

use crate::options::Options;
use std::collections::HashMap;
use typescriptify_schema::{EnumDef, EnumLiteral, Kind};
use tracing::debug;

/// Ordered set of registered enumerations.
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    order: Vec<String>,
    enums: HashMap<String, EnumDef>,
}

impl EnumRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an enumeration, replacing the members of one registered
    /// under the same name while keeping its position.
    ///
    /// # Panics
    /// Panics if the enum has no members, a member has a blank name, or the
    /// members mix literal categories. These are programming errors in the
    /// caller's registration code.
    pub fn register(&mut self, def: EnumDef) {
        assert!(
            !def.elements.is_empty(),
            "enum '{}' is registered without members",
            def.name
        );
        if let Some(blank) = def.elements.iter().find(|e| e.name.trim().is_empty()) {
            panic!(
                "enum '{}' has a member with a blank name (value {})",
                def.name, blank.value
            );
        }
        let category = def.elements[0].value.category();
        if let Some(other) = def.elements.iter().find(|e| e.value.category() != category) {
            panic!(
                "enum '{}' mixes {} and {} members ('{}')",
                def.name,
                category,
                other.value.category(),
                other.name
            );
        }

        debug!(name = %def.name, members = def.elements.len(), "registered enum");
        if !self.enums.contains_key(&def.name) {
            self.order.push(def.name.clone());
        }
        self.enums.insert(def.name.clone(), def);
    }

    /// Returns true if `name` is a registered enumeration.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    /// Looks up an enumeration by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EnumDef> {
        self.enums.get(name)
    }

    /// Iterates enumerations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &EnumDef> {
        self.order.iter().filter_map(|name| self.enums.get(name))
    }

    /// Number of registered enumerations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Scalar kind used for the named type of an enum whose schema has none.
#[must_use]
pub fn underlying_kind(def: &EnumDef) -> Kind {
    match def.elements.first().map(|e| &e.value) {
        Some(EnumLiteral::Uint(_)) => Kind::Uint64,
        Some(EnumLiteral::Float(_)) => Kind::Float64,
        Some(EnumLiteral::Str(_)) => Kind::String,
        Some(EnumLiteral::Bool(_)) => Kind::Bool,
        Some(EnumLiteral::Int(_)) | None => Kind::Int64,
    }
}

/// Generator for enum declarations.
pub struct EnumGenerator<'a> {
    options: &'a Options,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Generates the declaration of one enum.
    #[must_use]
    pub fn generate(&self, def: &EnumDef) -> String {
        let mut output = String::new();
        let indent = &self.options.indent;

        if self.options.export {
            output.push_str("export ");
        }
        output.push_str(&format!("enum {} {{\n", self.options.entity_name(&def.name)));
        for element in &def.elements {
            output.push_str(&format!("{indent}{} = {},\n", element.name, element.value));
        }
        output.push('}');

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> EnumDef {
        EnumDef::new("Color")
            .element(EnumLiteral::Str("red".to_string()), "Red")
            .element(EnumLiteral::Str("green".to_string()), "Green")
    }

    #[test]
    fn test_generate_enum() {
        let options = Options::default();
        let output = EnumGenerator::new(&options).generate(&color());
        assert_eq!(
            output,
            "export enum Color {\n    Red = \"red\",\n    Green = \"green\",\n}"
        );
    }

    #[test]
    fn test_generate_enum_with_affixes() {
        let options = Options {
            prefix: "Ts".to_string(),
            export: false,
            indent: "\t".to_string(),
            ..Options::default()
        };
        let def = EnumDef::new("Weekday")
            .element(EnumLiteral::Int(0), "Sunday")
            .element(EnumLiteral::Int(1), "Monday");
        let output = EnumGenerator::new(&options).generate(&def);
        assert_eq!(output, "enum TsWeekday {\n\tSunday = 0,\n\tMonday = 1,\n}");
    }

    #[test]
    fn test_register_keeps_position_on_replace() {
        let mut registry = EnumRegistry::new();
        registry.register(color());
        registry.register(EnumDef::new("Size").element(EnumLiteral::Int(1), "Small"));
        registry.register(EnumDef::new("Color").element(EnumLiteral::Int(1), "Blue"));

        let names: Vec<_> = registry.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Color", "Size"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("Color").unwrap().elements[0].name, "Blue");
    }

    #[test]
    #[should_panic(expected = "without members")]
    fn test_register_empty_panics() {
        EnumRegistry::new().register(EnumDef::new("Color"));
    }

    #[test]
    #[should_panic(expected = "blank name")]
    fn test_register_blank_name_panics() {
        EnumRegistry::new().register(EnumDef::new("Color").element(EnumLiteral::Int(1), ""));
    }

    #[test]
    #[should_panic(expected = "mixes")]
    fn test_register_mixed_panics() {
        EnumRegistry::new().register(
            EnumDef::new("Color")
                .element(EnumLiteral::Int(1), "Red")
                .element(EnumLiteral::Str("g".to_string()), "Green"),
        );
    }

    #[test]
    fn test_underlying_kind() {
        assert_eq!(underlying_kind(&color()), Kind::String);
        assert_eq!(
            underlying_kind(&EnumDef::new("A").element(EnumLiteral::Uint(3), "X")),
            Kind::Uint64
        );
    }
}
