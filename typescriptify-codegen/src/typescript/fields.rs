//! Field declaration and initializer emission.

use crate::error::CodegenError;
use crate::typescript::kinds::KindMapper;
use typescriptify_schema::{FieldOptions, TypeDesc, VALUE_PLACEHOLDER};

/// External name of a field and whether it is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldName {
    /// External (JSON) name.
    pub name: String,
    /// Declared with a `?` marker.
    pub optional: bool,
}

impl FieldName {
    /// Creates a field name.
    #[must_use]
    pub fn new(name: impl Into<String>, optional: bool) -> Self {
        Self {
            name: name.into(),
            optional,
        }
    }

    /// Returns the name as written in a declaration.
    #[must_use]
    pub fn declared(&self) -> String {
        if self.optional {
            format!("{}?", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Returns the raw payload access expression for this field.
    #[must_use]
    pub fn source(&self) -> String {
        format!("source[\"{}\"]", self.name)
    }
}

/// Accumulates field declarations and constructor statements for one entity.
pub struct ClassBuilder<'a> {
    kinds: &'a KindMapper,
    indent: &'a str,
    prefix: &'a str,
    suffix: &'a str,
    owner: &'a str,
    fields: Vec<String>,
    constructor_body: Vec<String>,
    needs_convert_values: bool,
}

impl<'a> ClassBuilder<'a> {
    /// Creates a builder for the host type `owner`.
    #[must_use]
    pub fn new(
        kinds: &'a KindMapper,
        indent: &'a str,
        prefix: &'a str,
        suffix: &'a str,
        owner: &'a str,
    ) -> Self {
        Self {
            kinds,
            indent,
            prefix,
            suffix,
            owner,
            fields: Vec::new(),
            constructor_body: Vec::new(),
            needs_convert_values: false,
        }
    }

    /// Field declaration lines, in emission order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Constructor statement lines, in emission order.
    #[must_use]
    pub fn constructor_body(&self) -> &[String] {
        &self.constructor_body
    }

    /// Name of the host type being built.
    #[must_use]
    pub fn owner(&self) -> &str {
        self.owner
    }

    /// Returns true if any initializer calls `convertValues`.
    #[must_use]
    pub const fn needs_convert_values(&self) -> bool {
        self.needs_convert_values
    }

    /// Adds a field typed by its scalar kind or by an explicit override.
    ///
    /// A transform template, when present, becomes the initializer with the
    /// raw value substituted for the placeholder.
    ///
    /// # Errors
    /// Returns `CodegenError::UnmappableType` if `ty` has no mapping and no
    /// override is given.
    pub fn add_simple_field(
        &mut self,
        field: &FieldName,
        ty: &TypeDesc,
        opts: &FieldOptions,
    ) -> Result<(), CodegenError> {
        let ts_type = match opts.ts_type() {
            Some(ts_type) => ts_type.to_string(),
            None => self.primitive_name(ty, &field.name)?.to_string(),
        };

        self.add_field(field, &ts_type);
        let initializer = match opts.ts_transform() {
            Some(transform) => transform.replace(VALUE_PLACEHOLDER, &field.source()),
            None => field.source(),
        };
        self.add_initializer(&field.name, &initializer);
        Ok(())
    }

    /// Adds an N-dimensional array of scalars.
    ///
    /// # Errors
    /// Returns `CodegenError::UnmappableType` if the element has no mapping.
    pub fn add_simple_array_field(
        &mut self,
        field: &FieldName,
        elem: &TypeDesc,
        depth: usize,
        opts: &FieldOptions,
    ) -> Result<(), CodegenError> {
        let ts_type = match opts.ts_type() {
            Some(ts_type) => ts_type.to_string(),
            None => format!(
                "{}{}",
                self.primitive_name(elem, &field.name)?,
                "[]".repeat(depth)
            ),
        };

        self.add_field(field, &ts_type);
        self.add_initializer(&field.name, &field.source());
        Ok(())
    }

    /// Adds a field referencing a generated enum.
    pub fn add_enum_field(&mut self, field: &FieldName, enum_name: &str) {
        let entity = self.entity_name(enum_name);
        self.add_field(field, &entity);
        self.add_initializer(&field.name, &field.source());
    }

    /// Adds a field referencing a nested struct, hydrated from the payload.
    pub fn add_struct_field(&mut self, field: &FieldName, struct_name: &str) {
        let entity = self.entity_name(struct_name);
        self.add_field(field, &entity);
        self.add_hydrating_initializer(field, &entity, false);
    }

    /// Adds an N-dimensional array of nested structs.
    pub fn add_array_of_structs_field(&mut self, field: &FieldName, struct_name: &str, depth: usize) {
        let entity = self.entity_name(struct_name);
        self.add_field(field, &format!("{entity}{}", "[]".repeat(depth)));
        self.add_hydrating_initializer(field, &entity, false);
    }

    /// Adds a keyed mapping; `hydrate` names the value entity when each
    /// value must be rebuilt from the payload.
    pub fn add_map_field(
        &mut self,
        field: &FieldName,
        key_type: &str,
        value_type: &str,
        hydrate: Option<&str>,
    ) {
        self.add_field(field, &format!("{{[key: {key_type}]: {value_type}}}"));
        match hydrate {
            Some(entity) => self.add_hydrating_initializer(field, entity, true),
            None => self.add_initializer(&field.name, &field.source()),
        }
    }

    /// Returns the generated entity name for a host type name.
    #[must_use]
    pub fn entity_name(&self, name: &str) -> String {
        format!("{}{}{}", self.prefix, name, self.suffix)
    }

    fn primitive_name(&self, ty: &TypeDesc, field: &str) -> Result<&'static str, CodegenError> {
        match ty {
            TypeDesc::Primitive(kind) => self.kinds.lookup(*kind),
            _ => None,
        }
        .ok_or_else(|| CodegenError::unmappable(ty.to_string(), field, self.owner))
    }

    fn add_hydrating_initializer(&mut self, field: &FieldName, entity: &str, as_map: bool) {
        let initializer = if as_map {
            format!("this.convertValues({}, {entity}, true)", field.source())
        } else {
            format!("this.convertValues({}, {entity})", field.source())
        };
        self.needs_convert_values = true;
        self.add_initializer(&field.name, &initializer);
    }

    fn add_initializer(&mut self, name: &str, initializer: &str) {
        self.constructor_body.push(format!(
            "{indent}{indent}this.{name} = {initializer};",
            indent = self.indent
        ));
    }

    fn add_field(&mut self, field: &FieldName, ts_type: &str) {
        self.fields
            .push(format!("{}{}: {};", self.indent, field.declared(), ts_type));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typescriptify_schema::Kind;

    fn builder(kinds: &KindMapper) -> ClassBuilder<'_> {
        ClassBuilder::new(kinds, "    ", "", "", "Person")
    }

    #[test]
    fn test_simple_field() {
        let kinds = KindMapper::new();
        let mut b = builder(&kinds);
        b.add_simple_field(
            &FieldName::new("age", true),
            &Kind::Int.into(),
            &FieldOptions::default(),
        )
        .unwrap();

        assert_eq!(b.fields(), ["    age?: number;"]);
        assert_eq!(b.constructor_body(), ["        this.age = source[\"age\"];"]);
        assert!(!b.needs_convert_values());
    }

    #[test]
    fn test_simple_field_with_transform() {
        let kinds = KindMapper::new();
        let mut b = builder(&kinds);
        let opts = FieldOptions::with_type("Date").transform("new Date(__VALUE__)");
        b.add_simple_field(&FieldName::new("born", false), &Kind::String.into(), &opts)
            .unwrap();

        assert_eq!(b.fields(), ["    born: Date;"]);
        assert_eq!(
            b.constructor_body(),
            ["        this.born = new Date(source[\"born\"]);"]
        );
    }

    #[test]
    fn test_simple_field_unmappable() {
        let kinds = KindMapper::new();
        let mut b = builder(&kinds);
        let err = b
            .add_simple_field(
                &FieldName::new("callback", false),
                &Kind::Func.into(),
                &FieldOptions::default(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CodegenError::UnmappableType { ref kind, ref field, ref owner }
                if kind == "func" && field == "callback" && owner == "Person"
        ));
        assert!(b.fields().is_empty());
    }

    #[test]
    fn test_simple_array_depth() {
        let kinds = KindMapper::new();
        let mut b = builder(&kinds);
        b.add_simple_array_field(
            &FieldName::new("grid", false),
            &Kind::Float64.into(),
            2,
            &FieldOptions::default(),
        )
        .unwrap();

        assert_eq!(b.fields(), ["    grid: number[][];"]);
    }

    #[test]
    fn test_struct_fields_use_affixes() {
        let kinds = KindMapper::new();
        let mut b = ClassBuilder::new(&kinds, "\t", "Api", "Dto", "Person");
        b.add_struct_field(&FieldName::new("address", true), "Address");
        b.add_array_of_structs_field(&FieldName::new("friends", false), "Person", 1);

        assert_eq!(
            b.fields(),
            ["\taddress?: ApiAddressDto;", "\tfriends: ApiPersonDto[];"]
        );
        assert_eq!(
            b.constructor_body(),
            [
                "\t\tthis.address = this.convertValues(source[\"address\"], ApiAddressDto);",
                "\t\tthis.friends = this.convertValues(source[\"friends\"], ApiPersonDto);",
            ]
        );
        assert!(b.needs_convert_values());
    }

    #[test]
    fn test_map_fields() {
        let kinds = KindMapper::new();
        let mut b = builder(&kinds);
        b.add_map_field(&FieldName::new("labels", false), "string", "string", None);
        b.add_map_field(
            &FieldName::new("homes", false),
            "string",
            "Address",
            Some("Address"),
        );

        assert_eq!(
            b.fields(),
            [
                "    labels: {[key: string]: string};",
                "    homes: {[key: string]: Address};",
            ]
        );
        assert_eq!(
            b.constructor_body()[1],
            "        this.homes = this.convertValues(source[\"homes\"], Address, true);"
        );
    }

    #[test]
    fn test_enum_field() {
        let kinds = KindMapper::new();
        let mut b = builder(&kinds);
        b.add_enum_field(&FieldName::new("day", false), "Weekday");
        assert_eq!(b.fields(), ["    day: Weekday;"]);
        assert_eq!(b.constructor_body(), ["        this.day = source[\"day\"];"]);
    }
}
