//! Conversion driver.

use crate::custom_code::CustomCode;
use crate::error::CodegenError;
use crate::options::Options;
use crate::output;
use crate::typescript::enums::underlying_kind;
use crate::typescript::{ClassGenerator, ConversionState, EnumGenerator, EnumRegistry, KindMapper};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use typescriptify_schema::{
    AliasDef, Describe, EnumDef, FieldOptions, Schema, SchemaDocument, TsEnum, TypeDef, TypeDesc,
    validate_enum, validate_schema,
};

/// A struct registration carrying per-type field options.
///
/// Every field of a converted struct whose type equals a key of
/// `field_options` uses the associated options unless the field declares
/// its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
    /// Struct to convert.
    pub ty: TypeDesc,
    /// Options keyed by field type.
    pub field_options: HashMap<TypeDesc, FieldOptions>,
}

impl StructType {
    /// Creates a registration without field options.
    #[must_use]
    pub fn new(ty: TypeDesc) -> Self {
        Self {
            ty,
            field_options: HashMap::new(),
        }
    }

    /// Adds options for fields of type `field_type`.
    #[must_use]
    pub fn field_option(mut self, field_type: TypeDesc, options: FieldOptions) -> Self {
        self.field_options.insert(field_type, options);
        self
    }
}

/// TypeScript generator.
///
/// Collects struct and enum registrations, then converts them into one
/// TypeScript source text.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: Options,
    schema: Schema,
    kinds: KindMapper,
    structs: Vec<TypeDesc>,
    enums: EnumRegistry,
    field_options: HashMap<TypeDesc, FieldOptions>,
    imports: Vec<String>,
}

impl Generator {
    /// Creates a generator with default options and an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator over an existing schema.
    #[must_use]
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    /// Creates a generator from a parsed schema document.
    ///
    /// The document's settings override the defaults; its enums, imports and
    /// convert list are registered in document order.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if the schema or an enum is invalid.
    pub fn from_document(document: SchemaDocument) -> Result<Self, CodegenError> {
        validate_schema(&document.schema)?;
        for def in &document.enums {
            validate_enum(def)?;
        }

        let mut generator = Self::with_schema(document.schema);
        generator.options.apply(&document.settings);
        for import in document.imports {
            generator.add_import(import);
        }
        for def in document.enums {
            generator.add_enum_def(def);
        }
        for name in document.convert {
            generator.add_type(TypeDesc::named(name));
        }

        Ok(generator)
    }

    /// Sets the prefix of every generated entity name.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = prefix.into();
        self
    }

    /// Sets the suffix of every generated entity name.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.options.suffix = suffix.into();
        self
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.options.indent = indent.into();
        self
    }

    /// Emits interfaces instead of classes.
    #[must_use]
    pub fn with_interface(mut self, interface: bool) -> Self {
        self.options.interface = interface;
        self
    }

    /// Toggles the `export` keyword.
    #[must_use]
    pub fn with_export(mut self, export: bool) -> Self {
        self.options.export = export;
        self
    }

    /// Toggles the instance constructor.
    #[must_use]
    pub fn with_constructor(mut self, constructor: bool) -> Self {
        self.options.create_constructor = constructor;
        self
    }

    /// Toggles the deprecated static `createFrom` method.
    #[must_use]
    pub fn with_create_from_method(mut self, create_from: bool) -> Self {
        self.options.create_from_method = create_from;
        self
    }

    /// Sets the directory receiving backups of replaced output files.
    #[must_use]
    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.backup_dir = Some(dir.into());
        self
    }

    /// Replaces all options at once.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Returns the current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the type registry.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the type registry for direct registration.
    pub fn schema_mut(&mut self) -> &mut Schema {
        &mut self.schema
    }

    /// Describes `T` into the registry without scheduling it.
    pub fn describe<T: Describe + ?Sized>(&mut self) -> TypeDesc {
        T::describe(&mut self.schema)
    }

    /// Schedules `T` for conversion.
    pub fn add<T: Describe + ?Sized>(&mut self) -> &mut Self {
        let ty = self.describe::<T>();
        self.add_type(ty)
    }

    /// Schedules the type of `value` for conversion.
    pub fn add_value<T: Describe + ?Sized>(&mut self, _value: &T) -> &mut Self {
        self.add::<T>()
    }

    /// Schedules a registered type for conversion. A pointer is unwrapped.
    pub fn add_type(&mut self, ty: TypeDesc) -> &mut Self {
        debug!(ty = %ty, "scheduled type");
        self.structs.push(ty);
        self
    }

    /// Schedules a struct together with its field options.
    pub fn add_struct_type(&mut self, struct_type: StructType) -> &mut Self {
        self.field_options.extend(struct_type.field_options);
        self.add_type(struct_type.ty)
    }

    /// Registers an enumeration from its complete collection of values.
    ///
    /// # Panics
    /// Panics if the collection is empty, a member name is blank, the
    /// values mix literal categories, or the enum type is not named.
    pub fn add_enum<T, I>(&mut self, values: I) -> &mut Self
    where
        T: TsEnum,
        I: IntoIterator<Item = T>,
    {
        let ty = T::enum_type(&mut self.schema);
        let Some(name) = ty.name() else {
            panic!("enum values must belong to a named type, not '{ty}'");
        };

        let mut def = EnumDef::new(name);
        for value in values {
            def.add_element(value.enum_element());
        }
        self.add_enum_def(def)
    }

    /// Registers an enumeration definition.
    ///
    /// A named type is declared for it if the registry has none.
    ///
    /// # Panics
    /// Panics on the same configuration errors as [`Generator::add_enum`].
    pub fn add_enum_def(&mut self, def: EnumDef) -> &mut Self {
        if !self.schema.has_type(&def.name) && !def.elements.is_empty() {
            self.schema.add_type(TypeDef::Alias(AliasDef::new(
                def.name.clone(),
                underlying_kind(&def).into(),
            )));
        }
        self.enums.register(def);
        self
    }

    /// Adds a line emitted verbatim before all definitions.
    pub fn add_import(&mut self, import: impl Into<String>) -> &mut Self {
        let import = import.into();
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
        self
    }

    /// Converts every registration into TypeScript.
    ///
    /// Imports come first, then enums in registration order, then structs in
    /// registration order with their dependencies ahead of them. Every
    /// definition is emitted once.
    ///
    /// # Errors
    /// Returns `CodegenError` if a registered type is not a struct or a field
    /// cannot be mapped.
    pub fn convert(&self, custom_code: &CustomCode) -> Result<String, CodegenError> {
        if self.options.create_from_method {
            warn!("createFrom method is deprecated and implies the constructor");
        }

        let mut state = ConversionState::new();
        let mut output = String::new();

        for import in &self.imports {
            output.push_str(import);
            output.push('\n');
        }

        let enums = EnumGenerator::new(&self.options);
        for def in self.enums.iter() {
            if state.mark(&def.name) {
                self.push_chunk(&mut output, &enums.generate(def));
            }
        }

        let classes = ClassGenerator::new(
            &self.schema,
            &self.options,
            &self.kinds,
            &self.enums,
            &self.field_options,
            custom_code,
        );
        for ty in &self.structs {
            let TypeDesc::Named(name) = ty.deref() else {
                return Err(CodegenError::NotAStruct {
                    type_name: ty.to_string(),
                });
            };
            let chunk = classes.convert_type(name, &mut state)?;
            self.push_chunk(&mut output, &chunk);
        }

        Ok(output)
    }

    /// Converts into `path`, keeping the custom code blocks of the file it
    /// replaces.
    ///
    /// The previous file is copied to the backup directory first when one
    /// is configured. Nothing is written if conversion fails.
    ///
    /// # Errors
    /// Returns `CodegenError` if conversion or any file operation fails.
    pub fn convert_to_file(&self, path: impl AsRef<Path>) -> Result<(), CodegenError> {
        let path = path.as_ref();
        let custom_code = CustomCode::load(path)?;
        let converted = self.convert(&custom_code)?;

        if let Some(dir) = &self.options.backup_dir {
            output::backup(path, dir)?;
        }
        output::write_output(path, &converted)?;
        info!(path = %path.display(), bytes = converted.len(), "wrote TypeScript definitions");

        Ok(())
    }

    fn push_chunk(&self, output: &mut String, chunk: &str) {
        let indent = &self.options.indent;
        let trimmed = chunk.trim_matches(|c: char| matches!(c, ' ' | '\r' | '\n') || indent.contains(c));
        if !trimmed.is_empty() {
            output.push('\n');
            output.push_str(trimmed);
        }
    }
}
