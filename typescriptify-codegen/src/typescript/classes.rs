//! Class and interface generation.
//!
//! [`ClassGenerator`] walks a registered struct, converts every struct it
//! depends on and returns the dependency declarations followed by the
//! struct's own declaration.

use crate::custom_code::CustomCode;
use crate::error::CodegenError;
use crate::options::Options;
use crate::typescript::enums::EnumRegistry;
use crate::typescript::fields::{ClassBuilder, FieldName};
use crate::typescript::kinds::KindMapper;
use std::collections::{HashMap, HashSet};
use typescriptify_schema::{FieldDef, FieldOptions, Schema, SchemaError, TypeDesc};
use tracing::{debug, trace};

/// Body of the generated `convertValues` helper, as `(depth, line)` pairs.
const CONVERT_VALUES: &[(usize, &str)] = &[
    (0, "convertValues(a: any, classs: any, asMap: boolean = false): any {"),
    (1, "if (!a) {"),
    (2, "return a;"),
    (1, "}"),
    (1, "if (a.slice) {"),
    (2, "return (a as any[]).map(elem => this.convertValues(elem, classs));"),
    (1, "} else if (\"object\" === typeof a) {"),
    (2, "if (asMap) {"),
    (3, "for (const key of Object.keys(a)) {"),
    (4, "a[key] = new classs(a[key]);"),
    (3, "}"),
    (3, "return a;"),
    (2, "}"),
    (2, "return new classs(a);"),
    (1, "}"),
    (1, "return a;"),
    (0, "}"),
];

/// Names already emitted during one conversion.
#[derive(Debug, Default)]
pub struct ConversionState {
    converted: HashSet<String>,
}

impl ConversionState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `name` as emitted. Returns false if it already was.
    pub fn mark(&mut self, name: &str) -> bool {
        self.converted.insert(name.to_string())
    }

    /// Returns true if `name` was emitted.
    #[must_use]
    pub fn is_converted(&self, name: &str) -> bool {
        self.converted.contains(name)
    }
}

/// Renders the `convertValues` helper with the given indentation unit.
#[must_use]
pub fn convert_values_helper(indent: &str) -> String {
    CONVERT_VALUES
        .iter()
        .map(|(depth, line)| format!("{}{}", indent.repeat(depth + 1), line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generator for struct declarations.
pub struct ClassGenerator<'a> {
    schema: &'a Schema,
    options: &'a Options,
    kinds: &'a KindMapper,
    enums: &'a EnumRegistry,
    field_options: &'a HashMap<TypeDesc, FieldOptions>,
    custom_code: &'a CustomCode,
}

impl<'a> ClassGenerator<'a> {
    /// Creates a new class generator.
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        options: &'a Options,
        kinds: &'a KindMapper,
        enums: &'a EnumRegistry,
        field_options: &'a HashMap<TypeDesc, FieldOptions>,
        custom_code: &'a CustomCode,
    ) -> Self {
        Self {
            schema,
            options,
            kinds,
            enums,
            field_options,
            custom_code,
        }
    }

    /// Converts the struct `name` and every struct it depends on.
    ///
    /// Returns an empty string if `name` was already emitted in `state`.
    ///
    /// # Errors
    /// Returns `CodegenError` if `name` is not a struct or a field cannot be
    /// mapped.
    pub fn convert_type(
        &self,
        name: &str,
        state: &mut ConversionState,
    ) -> Result<String, CodegenError> {
        if !state.mark(name) {
            trace!(name, "already converted");
            return Ok(String::new());
        }

        self.schema.get_struct(name).map_err(|e| match e {
            SchemaError::NotAStruct { name } => CodegenError::NotAStruct { type_name: name },
            other => other.into(),
        })?;

        let entity = self.options.entity_name(name);
        debug!(name, entity = %entity, "converting struct");

        let mut dependencies = Vec::new();
        let mut builder = ClassBuilder::new(
            self.kinds,
            &self.options.indent,
            &self.options.prefix,
            &self.options.suffix,
            name,
        );

        for field in self.schema.deep_fields(name)? {
            let Some(external) = field.external_name() else {
                trace!(field = %field.name, "skipping field");
                continue;
            };
            let field_name = FieldName::new(external, field.is_optional());
            self.add_field(&mut builder, &field_name, field, state, &mut dependencies)?;
        }

        let mut output = String::new();
        for dependency in dependencies.iter().rev().filter(|d| !d.is_empty()) {
            output.push_str(dependency);
            output.push('\n');
        }
        output.push_str(&self.render(&entity, &builder));

        Ok(output)
    }

    fn add_field(
        &self,
        builder: &mut ClassBuilder<'_>,
        field_name: &FieldName,
        field: &FieldDef,
        state: &mut ConversionState,
        dependencies: &mut Vec<String>,
    ) -> Result<(), CodegenError> {
        let ty = field.ty.deref();
        let opts = self.options_for(field, ty);

        if opts.ts_transform().is_some() || opts.ts_type().is_some() {
            return self.add_overridden_field(builder, field_name, ty, &opts);
        }
        if let Some(enum_name) = self.enum_name(ty) {
            builder.add_enum_field(field_name, enum_name);
            return Ok(());
        }

        match self.resolve(ty, &field_name.name)? {
            TypeDesc::Named(struct_name) => {
                dependencies.push(self.convert_type(struct_name, state)?);
                builder.add_struct_field(field_name, struct_name);
            }
            TypeDesc::Map { key, value } => {
                let key_type = self.map_key_type(key, &field_name.name, builder)?;
                self.convert_dependencies(value, &field_name.name, state, dependencies)?;
                let value_type = self.type_name(value, &field_name.name, builder)?;
                let hydrate = match self.schema.struct_name(value.deref()) {
                    Ok(Some(struct_name)) => Some(self.options.entity_name(struct_name)),
                    _ => None,
                };
                builder.add_map_field(field_name, &key_type, &value_type, hydrate.as_deref());
            }
            TypeDesc::Slice(elem) => {
                let mut depth = 1;
                let mut elem = self.resolve(elem.deref(), &field_name.name)?;
                while let TypeDesc::Slice(inner) = elem {
                    depth += 1;
                    elem = self.resolve(inner.deref(), &field_name.name)?;
                }
                match elem {
                    TypeDesc::Named(struct_name) => {
                        dependencies.push(self.convert_type(struct_name, state)?);
                        builder.add_array_of_structs_field(field_name, struct_name, depth);
                    }
                    other => builder.add_simple_array_field(field_name, other, depth, &opts)?,
                }
            }
            shape => builder.add_simple_field(field_name, shape, &opts)?,
        }

        Ok(())
    }

    /// Adds a field carrying an explicit type or transform override.
    fn add_overridden_field(
        &self,
        builder: &mut ClassBuilder<'_>,
        field_name: &FieldName,
        ty: &TypeDesc,
        opts: &FieldOptions,
    ) -> Result<(), CodegenError> {
        let shape = if opts.ts_type().is_some() {
            ty
        } else {
            self.resolve(ty, &field_name.name)?
        };
        builder.add_simple_field(field_name, shape, opts)
    }

    /// Field-level options win over the options registered for the type.
    fn options_for(&self, field: &FieldDef, ty: &TypeDesc) -> FieldOptions {
        if !field.meta.options.is_empty() {
            return field.meta.options.clone();
        }
        self.field_options
            .get(ty)
            .or_else(|| self.field_options.get(&field.ty))
            .cloned()
            .unwrap_or_default()
    }

    fn enum_name<'d>(&self, ty: &'d TypeDesc) -> Option<&'d str> {
        match ty {
            TypeDesc::Named(name) if self.enums.contains(name) => Some(name.as_str()),
            _ => None,
        }
    }

    fn resolve<'d>(&self, ty: &'d TypeDesc, field: &str) -> Result<&'d TypeDesc, CodegenError>
    where
        'a: 'd,
    {
        self.schema.resolve_alias(ty).map_err(|e| match e {
            SchemaError::TypeNotFound { name } => CodegenError::UnknownType {
                type_name: name,
                field: field.to_string(),
            },
            other => other.into(),
        })
    }

    /// Converts every struct reachable from a map value.
    fn convert_dependencies(
        &self,
        ty: &TypeDesc,
        field: &str,
        state: &mut ConversionState,
        dependencies: &mut Vec<String>,
    ) -> Result<(), CodegenError> {
        if self.enum_name(ty).is_some() {
            return Ok(());
        }
        match self.resolve(ty, field)? {
            TypeDesc::Named(struct_name) => {
                dependencies.push(self.convert_type(struct_name, state)?);
            }
            TypeDesc::Pointer(inner) | TypeDesc::Slice(inner) => {
                self.convert_dependencies(inner, field, state, dependencies)?;
            }
            TypeDesc::Map { value, .. } => {
                self.convert_dependencies(value, field, state, dependencies)?;
            }
            TypeDesc::Primitive(_) => {}
        }
        Ok(())
    }

    /// Renders the index signature key type of a map.
    fn map_key_type(
        &self,
        key: &TypeDesc,
        field: &str,
        builder: &ClassBuilder<'_>,
    ) -> Result<String, CodegenError> {
        let unsupported = || CodegenError::UnsupportedMapKey {
            key: key.to_string(),
            field: field.to_string(),
            owner: builder.owner().to_string(),
        };
        match self.resolve(key, field)? {
            TypeDesc::Primitive(kind) => self
                .kinds
                .lookup(*kind)
                .map(str::to_string)
                .ok_or_else(unsupported),
            _ => Err(unsupported()),
        }
    }

    /// Renders the TypeScript type of a map value.
    fn type_name(
        &self,
        ty: &TypeDesc,
        field: &str,
        builder: &ClassBuilder<'_>,
    ) -> Result<String, CodegenError> {
        if let Some(enum_name) = self.enum_name(ty) {
            return Ok(self.options.entity_name(enum_name));
        }
        match self.resolve(ty, field)? {
            TypeDesc::Named(struct_name) => Ok(self.options.entity_name(struct_name)),
            TypeDesc::Primitive(kind) => self
                .kinds
                .lookup(*kind)
                .map(str::to_string)
                .ok_or_else(|| CodegenError::unmappable(kind.name(), field, builder.owner())),
            TypeDesc::Pointer(inner) => self.type_name(inner, field, builder),
            TypeDesc::Slice(elem) => Ok(format!("{}[]", self.type_name(elem, field, builder)?)),
            TypeDesc::Map { key, value } => Ok(format!(
                "{{[key: {}]: {}}}",
                self.map_key_type(key, field, builder)?,
                self.type_name(value, field, builder)?
            )),
        }
    }

    fn render(&self, entity: &str, builder: &ClassBuilder<'_>) -> String {
        let indent = &self.options.indent;
        let mut output = String::new();

        if self.options.export {
            output.push_str("export ");
        }
        let keyword = if self.options.interface {
            "interface"
        } else {
            "class"
        };
        output.push_str(&format!("{keyword} {entity} {{\n"));
        for line in builder.fields() {
            output.push_str(line);
            output.push('\n');
        }

        if !self.options.interface {
            if self.options.create_from_method {
                output.push_str(&format!(
                    "\n{indent}static createFrom(source: any = {{}}) {{\n{indent}{indent}return new {entity}(source);\n{indent}}}\n"
                ));
            }
            if self.options.emits_constructor() {
                output.push_str(&format!(
                    "\n{indent}constructor(source: any = {{}}) {{\n{indent}{indent}if ('string' === typeof source) source = JSON.parse(source);\n"
                ));
                for line in builder.constructor_body() {
                    output.push_str(line);
                    output.push('\n');
                }
                output.push_str(&format!("{indent}}}\n"));

                if builder.needs_convert_values() {
                    output.push('\n');
                    output.push_str(&convert_values_helper(indent));
                    output.push('\n');
                }
            }
        }

        output.push_str(&self.custom_code.render(entity, indent));
        output.push('}');

        output
    }
}
