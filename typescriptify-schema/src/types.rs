//! Schema type definitions.
//!
//! This module contains the data structures describing host-side types:
//! scalar kinds, type handles, struct and alias definitions, per-field
//! metadata and enumeration values, plus the [`Schema`] registry that
//! resolves named handles.

use crate::error::SchemaError;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Maximum number of alias hops followed before a chain is considered cyclic.
const MAX_ALIAS_DEPTH: usize = 64;

/// Scalar kinds of the host type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Boolean.
    Bool,
    /// Platform-sized signed integer.
    Int,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Platform-sized unsigned integer.
    Uint,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// 64-bit complex number.
    Complex64,
    /// 128-bit complex number.
    Complex128,
    /// UTF-8 text.
    String,
    /// Open, dynamically typed value.
    Any,
    /// Function value.
    Func,
    /// Channel value.
    Chan,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 19] = [
        Self::Bool,
        Self::Int,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Float32,
        Self::Float64,
        Self::Complex64,
        Self::Complex128,
        Self::String,
        Self::Any,
        Self::Func,
        Self::Chan,
    ];

    /// Returns the lowercase name used in type expressions.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::String => "string",
            Self::Any => "any",
            Self::Func => "func",
            Self::Chan => "chan",
        }
    }

    /// Parses a kind from its type-expression name.
    ///
    /// `byte`, `rune` and `interface{}` are accepted as aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(Self::Uint8),
            "rune" => Some(Self::Int32),
            "interface{}" => Some(Self::Any),
            _ => Self::ALL.iter().copied().find(|k| k.name() == name),
        }
    }

    /// Returns true if this is a signed integer kind.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(
            self,
            Self::Int | Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64
        )
    }

    /// Returns true if this is an unsigned integer kind.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Self::Uint | Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    /// Returns true if this is a floating point kind.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle to a host type.
///
/// Named handles refer to a [`TypeDef`] registered in a [`Schema`]; the
/// remaining variants are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    /// Scalar kind.
    Primitive(Kind),
    /// Reference to a struct or alias by name.
    Named(String),
    /// Pointer; the pointee is optional.
    Pointer(Box<TypeDesc>),
    /// Growable sequence.
    Slice(Box<TypeDesc>),
    /// Keyed mapping.
    Map {
        /// Key type.
        key: Box<TypeDesc>,
        /// Value type.
        value: Box<TypeDesc>,
    },
}

impl TypeDesc {
    /// Creates a named handle.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps a handle in a pointer.
    #[must_use]
    pub fn pointer(inner: TypeDesc) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Wraps a handle in a slice.
    #[must_use]
    pub fn slice(elem: TypeDesc) -> Self {
        Self::Slice(Box::new(elem))
    }

    /// Creates a map handle.
    #[must_use]
    pub fn map(key: TypeDesc, value: TypeDesc) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Returns the name of a named handle.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if this is a pointer handle.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer(_))
    }

    /// Strips one pointer level, if any.
    #[must_use]
    pub fn deref(&self) -> &TypeDesc {
        match self {
            Self::Pointer(inner) => inner,
            other => other,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Named(name) => f.write_str(name),
            Self::Pointer(inner) => write!(f, "*{inner}"),
            Self::Slice(elem) => write!(f, "[]{elem}"),
            Self::Map { key, value } => write!(f, "map[{key}]{value}"),
        }
    }
}

impl From<Kind> for TypeDesc {
    fn from(kind: Kind) -> Self {
        Self::Primitive(kind)
    }
}

/// Type definition variants.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    /// Struct with an ordered field list.
    Struct(StructDef),
    /// Named type over another type.
    Alias(AliasDef),
}

impl TypeDef {
    /// Returns the name of the type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(s) => &s.name,
            Self::Alias(a) => &a.name,
        }
    }

    /// Returns true if this is a struct type.
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    /// Returns true if this is an alias type.
    #[must_use]
    pub const fn is_alias(&self) -> bool {
        matches!(self, Self::Alias(_))
    }
}

/// Struct type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    /// Type name.
    pub name: String,
    /// Declared fields, in declaration order.
    pub fields: Vec<FieldDef>,
}

impl StructDef {
    /// Creates a new struct definition without fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field to the struct.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    /// Adds a field, builder style.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}

/// Named type over an underlying type, e.g. `type Weekday int`.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasDef {
    /// Type name.
    pub name: String,
    /// Underlying type.
    pub underlying: TypeDesc,
}

impl AliasDef {
    /// Creates a new alias definition.
    #[must_use]
    pub fn new(name: impl Into<String>, underlying: TypeDesc) -> Self {
        Self {
            name: name.into(),
            underlying,
        }
    }
}

/// Field within a struct type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Host field name.
    pub name: String,
    /// Declared type.
    pub ty: TypeDesc,
    /// Whether the field is embedded (its fields are promoted into the owner).
    pub embedded: bool,
    /// Serialization and output metadata.
    pub meta: FieldMeta,
}

impl FieldDef {
    /// Creates a plain field without metadata.
    ///
    /// A field without an external name is not visible in generated output;
    /// see [`FieldDef::external_name`].
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: false,
            meta: FieldMeta::default(),
        }
    }

    /// Creates an embedded field.
    #[must_use]
    pub fn embedded(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            embedded: true,
            ..Self::new(name, ty)
        }
    }

    /// Sets the JSON tag from its textual form (`"name,omitempty"`).
    #[must_use]
    pub fn json(mut self, tag: &str) -> Self {
        self.meta.json = Some(JsonTag::parse(tag));
        self
    }

    /// Sets an explicit output type.
    #[must_use]
    pub fn ts_type(mut self, ts_type: impl Into<String>) -> Self {
        self.meta.options.ts_type = Some(ts_type.into());
        self
    }

    /// Sets a value transform template containing [`VALUE_PLACEHOLDER`].
    #[must_use]
    pub fn ts_transform(mut self, transform: impl Into<String>) -> Self {
        self.meta.options.ts_transform = Some(transform.into());
        self
    }

    /// Replaces the whole metadata record.
    #[must_use]
    pub fn with_meta(mut self, meta: FieldMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Returns the external name if the field is visible.
    ///
    /// Fields without a JSON tag, with an empty name, or with the `-`
    /// sentinel are not visible.
    #[must_use]
    pub fn external_name(&self) -> Option<&str> {
        self.meta
            .json
            .as_ref()
            .map(|tag| tag.name.as_str())
            .filter(|name| !name.is_empty() && *name != IGNORE_SENTINEL)
    }

    /// Returns true if the field is optional in generated output.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.ty.is_pointer() || self.meta.json.as_ref().is_some_and(|tag| tag.omit_empty)
    }
}

/// External name that hides a field.
pub const IGNORE_SENTINEL: &str = "-";

/// Placeholder substituted with the raw value in transform templates.
pub const VALUE_PLACEHOLDER: &str = "__VALUE__";

/// Per-field metadata record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// JSON name and modifiers.
    pub json: Option<JsonTag>,
    /// Output overrides.
    pub options: FieldOptions,
}

/// JSON serialization tag of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonTag {
    /// External name; `-` hides the field.
    pub name: String,
    /// The field may be omitted when empty.
    pub omit_empty: bool,
}

impl JsonTag {
    /// Creates a tag with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            omit_empty: false,
        }
    }

    /// Parses the comma-separated tag form, e.g. `"age,omitempty"`.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let mut parts = tag.split(',');
        let name = parts.next().unwrap_or_default().trim().to_string();
        let omit_empty = parts
            .take_while(|part| !part.is_empty())
            .any(|part| part.trim() == "omitempty");
        Self { name, omit_empty }
    }
}

/// Output overrides for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// Explicit output type name.
    pub ts_type: Option<String>,
    /// Initializer template; [`VALUE_PLACEHOLDER`] is replaced by the raw value.
    pub ts_transform: Option<String>,
}

impl FieldOptions {
    /// Creates options with an explicit output type.
    #[must_use]
    pub fn with_type(ts_type: impl Into<String>) -> Self {
        Self {
            ts_type: Some(ts_type.into()),
            ts_transform: None,
        }
    }

    /// Adds a transform template.
    #[must_use]
    pub fn transform(mut self, transform: impl Into<String>) -> Self {
        self.ts_transform = Some(transform.into());
        self
    }

    /// Returns the explicit output type, if set and non-empty.
    #[must_use]
    pub fn ts_type(&self) -> Option<&str> {
        self.ts_type.as_deref().filter(|t| !t.is_empty())
    }

    /// Returns the transform template, if set and non-empty.
    #[must_use]
    pub fn ts_transform(&self) -> Option<&str> {
        self.ts_transform.as_deref().filter(|t| !t.is_empty())
    }

    /// Returns true if neither override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ts_type().is_none() && self.ts_transform().is_none()
    }
}

/// Literal value of an enumeration member.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumLiteral {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Boolean.
    Bool(bool),
}

impl EnumLiteral {
    /// Parses a literal written for an enum over `kind`.
    #[must_use]
    pub fn parse(kind: Kind, text: &str) -> Option<Self> {
        let text = text.trim();
        if kind.is_signed() {
            text.parse().ok().map(Self::Int)
        } else if kind.is_unsigned() {
            text.parse().ok().map(Self::Uint)
        } else if kind.is_float() {
            text.parse().ok().map(Self::Float)
        } else {
            match kind {
                Kind::String => Some(Self::Str(text.to_string())),
                Kind::Bool => text.parse().ok().map(Self::Bool),
                _ => None,
            }
        }
    }

    /// Returns a short name of the literal's category.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Uint(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
        }
    }

    /// Renders the literal as target-language source.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Uint(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Bool(v) => v.to_string(),
            Self::Str(s) => {
                let mut out = String::with_capacity(s.len() + 2);
                out.push('"');
                for c in s.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\t' => out.push_str("\\t"),
                        c => out.push(c),
                    }
                }
                out.push('"');
                out
            }
        }
    }
}

impl fmt::Display for EnumLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// One member of an enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumElement {
    /// Underlying value.
    pub value: EnumLiteral,
    /// Member name in generated output.
    pub name: String,
}

impl EnumElement {
    /// Creates a new enum element.
    #[must_use]
    pub fn new(value: EnumLiteral, name: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
        }
    }
}

/// Enumeration over a named type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    /// Name of the underlying named type.
    pub name: String,
    /// Members in registration order.
    pub elements: Vec<EnumElement>,
}

impl EnumDef {
    /// Creates a new enum definition without members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
        }
    }

    /// Adds a member to the enum.
    pub fn add_element(&mut self, element: EnumElement) {
        self.elements.push(element);
    }

    /// Adds a member, builder style.
    #[must_use]
    pub fn element(mut self, value: EnumLiteral, name: impl Into<String>) -> Self {
        self.elements.push(EnumElement::new(value, name));
        self
    }

    /// Looks up a member by name.
    #[must_use]
    pub fn get_element(&self, name: &str) -> Option<&EnumElement> {
        self.elements.iter().find(|e| e.name == name)
    }
}

/// Registry of named host types.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Type definitions, in registration order.
    pub types: Vec<TypeDef>,
    /// Type lookup map.
    type_map: HashMap<String, usize>,
    /// Names whose definitions are being built by [`Schema::define_with`].
    pending: HashSet<String>,
}

impl Schema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type definition, replacing any previous one with the same name.
    pub fn add_type(&mut self, type_def: TypeDef) {
        let name = type_def.name().to_string();
        if let Some(&index) = self.type_map.get(&name) {
            self.types[index] = type_def;
        } else {
            self.type_map.insert(name, self.types.len());
            self.types.push(type_def);
        }
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.type_map.get(name).map(|&idx| &self.types[idx])
    }

    /// Returns true if a type with the given name exists or is being defined.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.type_map.contains_key(name) || self.pending.contains(name)
    }

    /// Looks up a struct by name.
    ///
    /// # Errors
    /// Returns `SchemaError::TypeNotFound` or `SchemaError::NotAStruct`.
    pub fn get_struct(&self, name: &str) -> Result<&StructDef, SchemaError> {
        let mut current = name;
        for _ in 0..=MAX_ALIAS_DEPTH {
            match self.get_type(current) {
                Some(TypeDef::Struct(def)) => return Ok(def),
                Some(TypeDef::Alias(alias)) => match &alias.underlying {
                    TypeDesc::Named(target) => current = target,
                    _ => {
                        return Err(SchemaError::NotAStruct {
                            name: name.to_string(),
                        });
                    }
                },
                None => {
                    return Err(SchemaError::TypeNotFound {
                        name: current.to_string(),
                    });
                }
            }
        }
        Err(SchemaError::CircularReference {
            path: name.to_string(),
        })
    }

    /// Registers the type `name` once, building it with `build`.
    ///
    /// The name is reserved before `build` runs, so recursive types that
    /// refer back to `name` terminate.
    pub fn define_with<F>(&mut self, name: &str, build: F) -> TypeDesc
    where
        F: FnOnce(&mut Schema) -> TypeDef,
    {
        if !self.has_type(name) {
            self.pending.insert(name.to_string());
            let def = build(self);
            self.pending.remove(name);
            self.add_type(def);
        }
        TypeDesc::named(name)
    }

    /// Follows alias chains until a structural handle or a struct is reached.
    ///
    /// # Errors
    /// Returns `SchemaError::TypeNotFound` for unresolved names and
    /// `SchemaError::CircularReference` for cyclic alias chains.
    pub fn resolve_alias<'a>(&'a self, desc: &'a TypeDesc) -> Result<&'a TypeDesc, SchemaError> {
        let mut current = desc;
        let mut path = Vec::new();
        while let TypeDesc::Named(name) = current {
            match self.get_type(name) {
                Some(TypeDef::Struct(_)) => return Ok(current),
                Some(TypeDef::Alias(alias)) => {
                    path.push(name.as_str());
                    if path.len() > MAX_ALIAS_DEPTH {
                        return Err(SchemaError::CircularReference {
                            path: path.join(" -> "),
                        });
                    }
                    current = &alias.underlying;
                }
                None => {
                    return Err(SchemaError::TypeNotFound { name: name.clone() });
                }
            }
        }
        Ok(current)
    }

    /// Returns the struct name a handle resolves to, if it is a struct.
    ///
    /// # Errors
    /// Propagates resolution errors from [`Schema::resolve_alias`].
    pub fn struct_name<'a>(&'a self, desc: &'a TypeDesc) -> Result<Option<&'a str>, SchemaError> {
        match self.resolve_alias(desc)? {
            TypeDesc::Named(name) => Ok(Some(name.as_str())),
            _ => Ok(None),
        }
    }

    /// Returns the fields of `name` with embedded structs flattened in place.
    ///
    /// Embedded structs and embedded pointers to structs are expanded
    /// recursively; any other embedded field is kept as a regular field.
    ///
    /// # Errors
    /// Returns `SchemaError` if a struct is missing or embedding is cyclic.
    pub fn deep_fields(&self, name: &str) -> Result<Vec<&FieldDef>, SchemaError> {
        let mut fields = Vec::new();
        let mut stack = Vec::new();
        self.collect_fields(name, &mut stack, &mut fields)?;
        Ok(fields)
    }

    fn collect_fields<'a>(
        &'a self,
        name: &str,
        stack: &mut Vec<String>,
        out: &mut Vec<&'a FieldDef>,
    ) -> Result<(), SchemaError> {
        if stack.iter().any(|s| s == name) {
            stack.push(name.to_string());
            return Err(SchemaError::CircularReference {
                path: stack.join(" -> "),
            });
        }
        let def = self.get_struct(name)?;
        stack.push(name.to_string());
        for field in &def.fields {
            if field.embedded {
                if let Some(inner) = self.struct_name(field.ty.deref())? {
                    self.collect_fields(inner, stack, out)?;
                    continue;
                }
            }
            out.push(field);
        }
        stack.pop();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_schema() -> Schema {
        let mut schema = Schema::new();
        schema.add_type(TypeDef::Struct(
            StructDef::new("Base")
                .field(FieldDef::new("ID", Kind::Int64.into()).json("id"))
                .field(FieldDef::new("Created", Kind::String.into()).json("created")),
        ));
        schema.add_type(TypeDef::Struct(
            StructDef::new("Person")
                .field(FieldDef::embedded("Base", TypeDesc::pointer(TypeDesc::named("Base"))))
                .field(FieldDef::new("Name", Kind::String.into()).json("name")),
        ));
        schema
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(Kind::from_name("int64"), Some(Kind::Int64));
        assert_eq!(Kind::from_name("byte"), Some(Kind::Uint8));
        assert_eq!(Kind::from_name("interface{}"), Some(Kind::Any));
        assert_eq!(Kind::from_name("Address"), None);
    }

    #[test]
    fn test_kind_predicates() {
        assert!(Kind::Int16.is_signed());
        assert!(Kind::Uint.is_unsigned());
        assert!(Kind::Float32.is_float());
        assert!(!Kind::String.is_signed());
    }

    #[test]
    fn test_type_desc_display() {
        let desc = TypeDesc::map(
            Kind::String.into(),
            TypeDesc::slice(TypeDesc::pointer(TypeDesc::named("Address"))),
        );
        assert_eq!(desc.to_string(), "map[string][]*Address");
    }

    #[test]
    fn test_json_tag_parse() {
        let tag = JsonTag::parse("age,omitempty");
        assert_eq!(tag.name, "age");
        assert!(tag.omit_empty);

        let tag = JsonTag::parse("name");
        assert_eq!(tag.name, "name");
        assert!(!tag.omit_empty);

        let tag = JsonTag::parse("-");
        assert_eq!(tag.name, "-");
    }

    #[test]
    fn test_field_visibility_and_optionality() {
        let hidden = FieldDef::new("Secret", Kind::String.into());
        assert_eq!(hidden.external_name(), None);

        let ignored = FieldDef::new("Skip", Kind::String.into()).json("-");
        assert_eq!(ignored.external_name(), None);

        let age = FieldDef::new("Age", Kind::Int.into()).json("age,omitempty");
        assert_eq!(age.external_name(), Some("age"));
        assert!(age.is_optional());

        let address = FieldDef::new("Address", TypeDesc::pointer(TypeDesc::named("Address")))
            .json("address");
        assert!(address.is_optional());
    }

    #[test]
    fn test_field_options() {
        let opts = FieldOptions::with_type("Date").transform("new Date(__VALUE__)");
        assert_eq!(opts.ts_type(), Some("Date"));
        assert_eq!(opts.ts_transform(), Some("new Date(__VALUE__)"));
        assert!(!opts.is_empty());
        assert!(FieldOptions::default().is_empty());
        assert!(FieldOptions::with_type("").is_empty());
    }

    #[test]
    fn test_enum_literal_render() {
        assert_eq!(EnumLiteral::Int(-3).render(), "-3");
        assert_eq!(EnumLiteral::Float(1.5).render(), "1.5");
        assert_eq!(EnumLiteral::Str("say \"hi\"".into()).render(), r#""say \"hi\"""#);
        assert_eq!(EnumLiteral::Bool(true).render(), "true");
    }

    #[test]
    fn test_enum_literal_parse() {
        assert_eq!(EnumLiteral::parse(Kind::Int, " 7 "), Some(EnumLiteral::Int(7)));
        assert_eq!(EnumLiteral::parse(Kind::Uint8, "-1"), None);
        assert_eq!(
            EnumLiteral::parse(Kind::String, "red"),
            Some(EnumLiteral::Str("red".into()))
        );
        assert_eq!(EnumLiteral::parse(Kind::Func, "x"), None);
    }

    #[test]
    fn test_enum_def() {
        let def = EnumDef::new("Color")
            .element(EnumLiteral::Int(1), "Red")
            .element(EnumLiteral::Int(2), "Green");
        assert_eq!(def.elements.len(), 2);
        assert_eq!(def.get_element("Green").unwrap().value, EnumLiteral::Int(2));
    }

    #[test]
    fn test_schema_type_lookup() {
        let schema = person_schema();
        assert!(schema.has_type("Person"));
        assert!(!schema.has_type("Unknown"));
        assert!(schema.get_struct("Person").is_ok());
        assert!(matches!(
            schema.get_struct("Unknown"),
            Err(SchemaError::TypeNotFound { .. })
        ));
    }

    #[test]
    fn test_schema_add_type_replaces() {
        let mut schema = Schema::new();
        schema.add_type(TypeDef::Struct(StructDef::new("A")));
        schema.add_type(TypeDef::Alias(AliasDef::new("A", Kind::Int.into())));
        assert_eq!(schema.types.len(), 1);
        assert!(schema.get_type("A").unwrap().is_alias());
    }

    #[test]
    fn test_define_with_recursive() {
        let mut schema = Schema::new();
        let desc = schema.define_with("Node", |schema| {
            let child = schema.define_with("Node", |_| unreachable!("already pending"));
            TypeDef::Struct(
                StructDef::new("Node")
                    .field(FieldDef::new("Children", TypeDesc::slice(child)).json("children")),
            )
        });
        assert_eq!(desc, TypeDesc::named("Node"));
        assert_eq!(schema.types.len(), 1);
    }

    #[test]
    fn test_resolve_alias() {
        let mut schema = person_schema();
        schema.add_type(TypeDef::Alias(AliasDef::new("Weekday", Kind::Int.into())));
        schema.add_type(TypeDef::Alias(AliasDef::new("Day", TypeDesc::named("Weekday"))));
        let day = TypeDesc::named("Day");
        assert_eq!(schema.resolve_alias(&day).unwrap(), &TypeDesc::Primitive(Kind::Int));

        let person = TypeDesc::named("Person");
        assert_eq!(schema.resolve_alias(&person).unwrap(), &person);
        assert_eq!(schema.struct_name(&person).unwrap(), Some("Person"));
    }

    #[test]
    fn test_resolve_alias_cycle() {
        let mut schema = Schema::new();
        schema.add_type(TypeDef::Alias(AliasDef::new("A", TypeDesc::named("B"))));
        schema.add_type(TypeDef::Alias(AliasDef::new("B", TypeDesc::named("A"))));
        let a = TypeDesc::named("A");
        assert!(matches!(
            schema.resolve_alias(&a),
            Err(SchemaError::CircularReference { .. })
        ));
    }

    #[test]
    fn test_deep_fields_flattens_embedded_pointer() {
        let schema = person_schema();
        let names: Vec<_> = schema
            .deep_fields("Person")
            .unwrap()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["ID", "Created", "Name"]);
    }

    #[test]
    fn test_deep_fields_embedding_cycle() {
        let mut schema = Schema::new();
        schema.add_type(TypeDef::Struct(
            StructDef::new("A").field(FieldDef::embedded("B", TypeDesc::named("B"))),
        ));
        schema.add_type(TypeDef::Struct(
            StructDef::new("B").field(FieldDef::embedded("A", TypeDesc::named("A"))),
        ));
        assert!(matches!(
            schema.deep_fields("A"),
            Err(SchemaError::CircularReference { .. })
        ));
    }
}
