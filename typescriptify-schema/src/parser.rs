//! XML schema parser.
//!
//! This module parses schema documents that declare convertible types up
//! front, as an alternative to `#[derive(Describe)]`.

use crate::error::ParseError;
use crate::types::{
    AliasDef, EnumDef, EnumElement, EnumLiteral, FieldDef, JsonTag, Kind, Schema, StructDef,
    TypeDef, TypeDesc,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Root element name.
const ROOT: &str = "typescriptify";

/// Output settings declared on the root element.
///
/// Unset attributes leave the generator's defaults in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Prefix for every generated entity name.
    pub prefix: Option<String>,
    /// Suffix for every generated entity name.
    pub suffix: Option<String>,
    /// Indentation unit.
    pub indent: Option<String>,
    /// Emit interfaces instead of classes.
    pub interface: Option<bool>,
    /// Prefix definitions with `export`.
    pub export: Option<bool>,
    /// Emit the instance constructor.
    pub constructor: Option<bool>,
    /// Emit the static `createFrom` method.
    pub create_from: Option<bool>,
    /// Backup directory; empty disables backups.
    pub backup_dir: Option<String>,
}

/// A parsed schema document.
#[derive(Debug, Clone, Default)]
pub struct SchemaDocument {
    /// Declared struct and alias types.
    pub schema: Schema,
    /// Enumerations, in document order.
    pub enums: Vec<EnumDef>,
    /// Names of the types to convert, in document order.
    pub convert: Vec<String>,
    /// Import lines emitted verbatim at the top of the output.
    pub imports: Vec<String>,
    /// Output settings.
    pub settings: Settings,
}

/// Parses a schema document from a string.
///
/// # Arguments
/// * `xml` - XML schema content
///
/// # Returns
/// Parsed document or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or contains invalid schema elements.
pub fn parse_schema(xml: &str) -> Result<SchemaDocument, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut document: Option<SchemaDocument> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = element_name(e)?;
                if name != ROOT {
                    return Err(ParseError::unknown_element(name, "document"));
                }
                let mut doc = SchemaDocument {
                    settings: parse_settings(e)?,
                    ..SchemaDocument::default()
                };
                parse_body(&mut reader, &mut doc)?;
                document = Some(doc);
            }
            Ok(Event::Empty(ref e)) => {
                let name = element_name(e)?;
                if name != ROOT {
                    return Err(ParseError::unknown_element(name, "document"));
                }
                document = Some(SchemaDocument {
                    settings: parse_settings(e)?,
                    ..SchemaDocument::default()
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    document.ok_or_else(|| ParseError::InvalidStructure {
        message: format!("No {ROOT} element found"),
    })
}

/// Parses a schema document from a file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_schema_file(path: &std::path::Path) -> Result<SchemaDocument, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_schema(&xml)
}

/// Parses the children of the root element.
fn parse_body(reader: &mut Reader<&[u8]>, doc: &mut SchemaDocument) -> Result<(), ParseError> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let (e, has_body) = match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, true),
            Ok(Event::Empty(e)) => (e, false),
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated {ROOT} element"),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => continue,
        };

        let name = element_name(&e)?;
        match name.as_str() {
            "import" => {
                let line = if has_body {
                    read_text(reader, "import")?
                } else {
                    String::new()
                };
                if !line.is_empty() {
                    doc.imports.push(line);
                }
            }
            "type" => {
                let alias = parse_alias(&e)?;
                if has_body {
                    skip_to_end(reader)?;
                }
                if doc.schema.has_type(&alias.name) {
                    return Err(ParseError::duplicate("type", alias.name));
                }
                doc.schema.add_type(TypeDef::Alias(alias));
            }
            "struct" => {
                let def = parse_struct(reader, &e, has_body)?;
                if doc.schema.has_type(&def.name) {
                    return Err(ParseError::duplicate("type", def.name));
                }
                doc.schema.add_type(TypeDef::Struct(def));
            }
            "enum" => {
                let def = parse_enum(reader, &e, has_body, &mut doc.schema)?;
                if doc.enums.iter().any(|existing| existing.name == def.name) {
                    return Err(ParseError::duplicate("enum", def.name));
                }
                doc.enums.push(def);
            }
            "convert" => {
                let target = required_attr(&e, "convert", "type")?;
                if has_body {
                    skip_to_end(reader)?;
                }
                doc.convert.push(target);
            }
            other => return Err(ParseError::unknown_element(other, ROOT)),
        }
    }

    Ok(())
}

/// Parses the root element attributes.
fn parse_settings(e: &BytesStart<'_>) -> Result<Settings, ParseError> {
    let mut settings = Settings::default();

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "prefix" => settings.prefix = Some(value),
            "suffix" => settings.suffix = Some(value),
            "indent" => settings.indent = Some(value),
            "mode" => {
                settings.interface = Some(match value.as_str() {
                    "class" => false,
                    "interface" => true,
                    other => return Err(ParseError::invalid_attr(ROOT, "mode", other)),
                })
            }
            "export" => settings.export = Some(parse_bool(ROOT, "export", &value)?),
            "constructor" => {
                settings.constructor = Some(parse_bool(ROOT, "constructor", &value)?)
            }
            "createFrom" => settings.create_from = Some(parse_bool(ROOT, "createFrom", &value)?),
            "backupDir" => settings.backup_dir = Some(value),
            _ => {}
        }
    }

    Ok(settings)
}

/// Parses a named type over an underlying type.
fn parse_alias(e: &BytesStart<'_>) -> Result<AliasDef, ParseError> {
    let mut name = None;
    let mut underlying = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "underlying" => underlying = Some(TypeDesc::parse(&value)?),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("type", "name"))?;
    let underlying = underlying.ok_or_else(|| ParseError::missing_attr("type", "underlying"))?;
    Ok(AliasDef::new(name, underlying))
}

/// Parses a struct definition and its fields.
fn parse_struct(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
) -> Result<StructDef, ParseError> {
    let mut def = StructDef::new(required_attr(e, "struct", "name")?);
    if !has_body {
        return Ok(def);
    }

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let tag_name = element_name(e)?;
                if tag_name != "field" {
                    return Err(ParseError::unknown_element(tag_name, "struct"));
                }
                def.add_field(parse_field(e)?);
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"struct" {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated struct '{}'", def.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(def)
}

/// Parses a struct field.
fn parse_field(e: &BytesStart<'_>) -> Result<FieldDef, ParseError> {
    let mut name = None;
    let mut ty = None;
    let mut embedded = false;
    let mut json = None;
    let mut ts_type = None;
    let mut ts_transform = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "type" => ty = Some(TypeDesc::parse(&value)?),
            "embedded" => embedded = parse_bool("field", "embedded", &value)?,
            "json" => json = Some(JsonTag::parse(&value)),
            "tsType" => ts_type = Some(value),
            "tsTransform" => ts_transform = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("field", "name"))?;
    let ty = ty.ok_or_else(|| ParseError::missing_attr("field", "type"))?;

    let mut field = if embedded {
        FieldDef::embedded(name, ty)
    } else {
        FieldDef::new(name, ty)
    };
    field.meta.json = json;
    field.meta.options.ts_type = ts_type;
    field.meta.options.ts_transform = ts_transform;

    Ok(field)
}

/// Parses an enumeration and its members.
///
/// The underlying kind comes from the `type` attribute, else from an alias
/// with the same name, else defaults to `int`. A missing alias is declared.
fn parse_enum(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    has_body: bool,
    schema: &mut Schema,
) -> Result<EnumDef, ParseError> {
    let mut name = None;
    let mut kind = None;

    for (key, value) in attributes(e)? {
        match key.as_str() {
            "name" => name = Some(value),
            "type" => {
                kind = Some(
                    Kind::from_name(&value)
                        .ok_or_else(|| ParseError::invalid_attr("enum", "type", value))?,
                )
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("enum", "name"))?;
    let kind = match (kind, schema.get_type(&name)) {
        (Some(kind), _) => kind,
        (None, Some(TypeDef::Alias(alias))) => match alias.underlying {
            TypeDesc::Primitive(kind) => kind,
            _ => return Err(ParseError::invalid_attr("enum", "name", name)),
        },
        (None, Some(TypeDef::Struct(_))) => {
            return Err(ParseError::invalid_attr("enum", "name", name));
        }
        (None, None) => Kind::Int,
    };
    if !schema.has_type(&name) {
        schema.add_type(TypeDef::Alias(AliasDef::new(name.clone(), kind.into())));
    }

    let mut enum_def = EnumDef::new(name);
    if !has_body {
        return Ok(enum_def);
    }

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                enum_def.add_element(parse_enum_value(reader, e, &enum_def.name, kind, true)?);
            }
            Ok(Event::Empty(ref e)) => {
                enum_def.add_element(parse_enum_value(reader, e, &enum_def.name, kind, false)?);
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated enum '{}'", enum_def.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(enum_def)
}

/// Parses an enum member; the literal is the element text.
fn parse_enum_value(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    enum_name: &str,
    kind: Kind,
    has_body: bool,
) -> Result<EnumElement, ParseError> {
    let tag_name = element_name(e)?;
    if tag_name != "value" {
        return Err(ParseError::unknown_element(tag_name, "enum"));
    }
    let name = required_attr(e, "value", "name")?;
    let text = if has_body {
        read_text(reader, "value")?
    } else {
        String::new()
    };
    let value = EnumLiteral::parse(kind, &text).ok_or_else(|| ParseError::InvalidEnumLiteral {
        enum_name: enum_name.to_string(),
        literal: text.clone(),
    })?;

    Ok(EnumElement::new(value, name))
}

/// Returns the qualified name of an element.
fn element_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    Ok(std::str::from_utf8(&name_bytes)?.to_string())
}

/// Collects unescaped attributes in document order.
fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut out = Vec::new();
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let raw = std::str::from_utf8(&attr.value)?;
        let value = quick_xml::escape::unescape(raw)?.into_owned();
        out.push((key, value));
    }
    Ok(out)
}

/// Returns a required attribute or a missing-attribute error.
fn required_attr(e: &BytesStart<'_>, element: &str, attribute: &str) -> Result<String, ParseError> {
    attributes(e)?
        .into_iter()
        .find(|(key, _)| key == attribute)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ParseError::missing_attr(element, attribute))
}

fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

/// Reads the text content of the current element up to its end tag.
fn read_text(reader: &mut Reader<&[u8]>, element: &str) -> Result<String, ParseError> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => {
                let raw = std::str::from_utf8(t.as_ref())?;
                text.push_str(&quick_xml::escape::unescape(raw)?);
            }
            Ok(Event::CData(ref t)) => {
                text.push_str(std::str::from_utf8(t.as_ref())?);
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                return Err(ParseError::unknown_element(element_name(e)?, element));
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated {element} element"),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(text.trim().to_string())
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERSON_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<typescriptify prefix="Api" indent="  " mode="interface" export="false" backupDir="">
    <import>import Decimal from 'decimal.js'</import>
    <type name="Weekday" underlying="int"/>
    <enum name="Weekday">
        <value name="Monday">1</value>
        <value name="Tuesday">2</value>
    </enum>
    <enum name="Color" type="string">
        <value name="Red">red</value>
    </enum>
    <struct name="Address">
        <field name="City" json="city" type="string"/>
        <field name="Number" json="number,omitempty" type="int"/>
    </struct>
    <struct name="Person">
        <field name="Name" json="name" type="string"/>
        <field name="Addresses" json="addresses" type="[]*Address"/>
        <field name="Born" json="born" type="string" tsType="Date" tsTransform="new Date(__VALUE__)"/>
        <field name="Day" json="day" type="Weekday"/>
    </struct>
    <convert type="Person"/>
</typescriptify>"#;

    #[test]
    fn test_parse_settings() {
        let doc = parse_schema(PERSON_SCHEMA).expect("Failed to parse schema");
        assert_eq!(doc.settings.prefix.as_deref(), Some("Api"));
        assert_eq!(doc.settings.indent.as_deref(), Some("  "));
        assert_eq!(doc.settings.interface, Some(true));
        assert_eq!(doc.settings.export, Some(false));
        assert_eq!(doc.settings.backup_dir.as_deref(), Some(""));
        assert_eq!(doc.settings.constructor, None);
    }

    #[test]
    fn test_parse_types() {
        let doc = parse_schema(PERSON_SCHEMA).expect("Failed to parse schema");
        assert!(doc.schema.get_type("Weekday").unwrap().is_alias());
        assert!(doc.schema.get_type("Color").unwrap().is_alias());

        let person = doc.schema.get_struct("Person").unwrap();
        assert_eq!(person.fields.len(), 4);
        assert_eq!(person.fields[1].ty.to_string(), "[]*Address");
        assert_eq!(person.fields[2].meta.options.ts_type(), Some("Date"));
        assert_eq!(
            person.fields[2].meta.options.ts_transform(),
            Some("new Date(__VALUE__)")
        );

        let address = doc.schema.get_struct("Address").unwrap();
        assert!(address.fields[1].is_optional());
    }

    #[test]
    fn test_parse_enums_imports_and_convert() {
        let doc = parse_schema(PERSON_SCHEMA).expect("Failed to parse schema");
        assert_eq!(doc.imports, ["import Decimal from 'decimal.js'"]);
        assert_eq!(doc.convert, ["Person"]);
        assert_eq!(doc.enums.len(), 2);
        assert_eq!(doc.enums[0].elements[1].name, "Tuesday");
        assert_eq!(doc.enums[0].elements[1].value, EnumLiteral::Int(2));
        assert_eq!(doc.enums[1].elements[0].value, EnumLiteral::Str("red".into()));
    }

    #[test]
    fn test_parse_escaped_attribute() {
        let xml = r#"<typescriptify>
    <struct name="Event">
        <field name="At" json="at" type="string" tsTransform="parse(__VALUE__, &quot;iso&quot;)"/>
    </struct>
</typescriptify>"#;
        let doc = parse_schema(xml).unwrap();
        let field = &doc.schema.get_struct("Event").unwrap().fields[0];
        assert_eq!(
            field.meta.options.ts_transform(),
            Some(r#"parse(__VALUE__, "iso")"#)
        );
    }

    #[test]
    fn test_missing_root() {
        let err = parse_schema("<?xml version=\"1.0\"?>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_duplicate_struct() {
        let xml = r#"<typescriptify><struct name="A"/><struct name="A"/></typescriptify>"#;
        assert!(matches!(
            parse_schema(xml),
            Err(ParseError::DuplicateDefinition { .. })
        ));
    }

    #[test]
    fn test_unknown_element() {
        let xml = r#"<typescriptify><message name="A"/></typescriptify>"#;
        assert!(matches!(
            parse_schema(xml),
            Err(ParseError::UnknownElement { .. })
        ));
    }

    #[test]
    fn test_missing_field_type() {
        let xml = r#"<typescriptify><struct name="A"><field name="x"/></struct></typescriptify>"#;
        assert!(matches!(
            parse_schema(xml),
            Err(ParseError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_invalid_enum_literal() {
        let xml = r#"<typescriptify>
    <enum name="Level" type="uint8"><value name="Low">-1</value></enum>
</typescriptify>"#;
        assert!(matches!(
            parse_schema(xml),
            Err(ParseError::InvalidEnumLiteral { .. })
        ));
    }

    #[test]
    fn test_enum_member_without_name() {
        let xml = r#"<typescriptify><enum name="Level"><value>1</value></enum></typescriptify>"#;
        assert!(matches!(
            parse_schema(xml),
            Err(ParseError::MissingAttribute { .. })
        ));
    }
}
