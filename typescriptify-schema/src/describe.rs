//! Reflection traits.
//!
//! [`Describe`] turns a Rust type into a [`TypeDesc`], registering any named
//! definitions it needs in a [`Schema`]. Implementations for the standard
//! scalars and containers live here; structs and unit enums get theirs from
//! `#[derive(Describe)]`.

use crate::types::{EnumElement, EnumLiteral, Kind, Schema, TypeDesc};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// A type that can describe itself to a [`Schema`].
pub trait Describe {
    /// Returns the handle for `Self`, registering named definitions as needed.
    fn describe(schema: &mut Schema) -> TypeDesc;
}

/// A value usable as the underlying value of an enum member.
pub trait EnumValue {
    /// Returns the literal written into generated output.
    fn literal(&self) -> EnumLiteral;
}

/// Produces the member name for a scalar enum value.
pub trait TsNamer {
    /// Returns the member name in generated output.
    fn ts_name(&self) -> String;
}

/// An element of an enumeration collection.
///
/// Scalar elements combine [`EnumValue`] and [`TsNamer`]; record elements
/// carry the value and the name as two fields. Both shapes are derivable.
pub trait TsEnum {
    /// Returns the handle of the enumeration's named type.
    fn enum_type(schema: &mut Schema) -> TypeDesc;

    /// Returns this element's value and member name.
    fn enum_element(&self) -> EnumElement;
}

/// Builds an [`EnumElement`] from a scalar value.
pub fn scalar_element<T: EnumValue + TsNamer + ?Sized>(value: &T) -> EnumElement {
    EnumElement::new(value.literal(), value.ts_name())
}

macro_rules! describe_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe(_schema: &mut Schema) -> TypeDesc {
                    TypeDesc::Primitive(Kind::$kind)
                }
            }
        )*
    };
}

describe_primitive! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Int,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    usize => Uint,
    f32 => Float32,
    f64 => Float64,
    char => String,
    str => String,
    String => String,
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(schema: &mut Schema) -> TypeDesc {
        T::describe(schema)
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe(schema: &mut Schema) -> TypeDesc {
        TypeDesc::pointer(T::describe(schema))
    }
}

macro_rules! describe_transparent {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Describe + ?Sized> Describe for $wrapper<T> {
                fn describe(schema: &mut Schema) -> TypeDesc {
                    T::describe(schema)
                }
            }
        )*
    };
}

describe_transparent!(Box, Rc, Arc);

macro_rules! describe_sequence {
    ($($seq:ident),*) => {
        $(
            impl<T: Describe> Describe for $seq<T> {
                fn describe(schema: &mut Schema) -> TypeDesc {
                    TypeDesc::slice(T::describe(schema))
                }
            }
        )*
    };
}

describe_sequence!(Vec, VecDeque, BTreeSet);

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe(schema: &mut Schema) -> TypeDesc {
        TypeDesc::slice(T::describe(schema))
    }
}

impl<T: Describe> Describe for [T] {
    fn describe(schema: &mut Schema) -> TypeDesc {
        TypeDesc::slice(T::describe(schema))
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe(schema: &mut Schema) -> TypeDesc {
        TypeDesc::slice(T::describe(schema))
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe(schema: &mut Schema) -> TypeDesc {
        let key = K::describe(schema);
        TypeDesc::map(key, V::describe(schema))
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe(schema: &mut Schema) -> TypeDesc {
        let key = K::describe(schema);
        TypeDesc::map(key, V::describe(schema))
    }
}

macro_rules! enum_value {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl EnumValue for $ty {
                fn literal(&self) -> EnumLiteral {
                    EnumLiteral::$variant(*self as $target)
                }
            }
        )*
    };
}

enum_value!(Int as i64: i8, i16, i32, i64, isize);
enum_value!(Uint as u64: u8, u16, u32, u64, usize);
enum_value!(Float as f64: f32, f64);

impl EnumValue for bool {
    fn literal(&self) -> EnumLiteral {
        EnumLiteral::Bool(*self)
    }
}

impl EnumValue for str {
    fn literal(&self) -> EnumLiteral {
        EnumLiteral::Str(self.to_string())
    }
}

impl EnumValue for String {
    fn literal(&self) -> EnumLiteral {
        EnumLiteral::Str(self.clone())
    }
}

impl<T: EnumValue + ?Sized> EnumValue for &T {
    fn literal(&self) -> EnumLiteral {
        T::literal(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldDef, StructDef, TypeDef};

    struct Node;

    impl Describe for Node {
        fn describe(schema: &mut Schema) -> TypeDesc {
            schema.define_with("Node", |schema| {
                TypeDef::Struct(
                    StructDef::new("Node")
                        .field(FieldDef::new("Label", String::describe(schema)).json("label"))
                        .field(
                            FieldDef::new("Children", Vec::<Node>::describe(schema))
                                .json("children"),
                        ),
                )
            })
        }
    }

    #[derive(Clone, Copy)]
    struct Level(u8);

    impl EnumValue for Level {
        fn literal(&self) -> EnumLiteral {
            self.0.literal()
        }
    }

    impl TsNamer for Level {
        fn ts_name(&self) -> String {
            format!("Level{}", self.0)
        }
    }

    #[test]
    fn test_describe_scalars() {
        let mut schema = Schema::new();
        assert_eq!(i32::describe(&mut schema), TypeDesc::Primitive(Kind::Int32));
        assert_eq!(<&str>::describe(&mut schema), TypeDesc::Primitive(Kind::String));
        assert_eq!(f64::describe(&mut schema), TypeDesc::Primitive(Kind::Float64));
        assert!(schema.types.is_empty());
    }

    #[test]
    fn test_describe_containers() {
        let mut schema = Schema::new();
        assert_eq!(
            Option::<Vec<Vec<u16>>>::describe(&mut schema).to_string(),
            "*[][]uint16"
        );
        assert_eq!(
            HashMap::<String, Box<[bool; 3]>>::describe(&mut schema).to_string(),
            "map[string][]bool"
        );
        assert_eq!(BTreeMap::<u8, Arc<str>>::describe(&mut schema).to_string(), "map[uint8]string");
    }

    #[test]
    fn test_describe_recursive_struct() {
        let mut schema = Schema::new();
        let desc = Option::<Node>::describe(&mut schema);
        assert_eq!(desc.to_string(), "*Node");
        let node = schema.get_struct("Node").unwrap();
        assert_eq!(node.fields[1].ty.to_string(), "[]Node");
    }

    #[test]
    fn test_enum_values() {
        assert_eq!((-4i8).literal(), EnumLiteral::Int(-4));
        assert_eq!(7usize.literal(), EnumLiteral::Uint(7));
        assert_eq!("red".literal(), EnumLiteral::Str("red".into()));
        assert_eq!(0.5f32.literal(), EnumLiteral::Float(0.5));
    }

    #[test]
    fn test_scalar_element() {
        let element = scalar_element(&Level(3));
        assert_eq!(element.name, "Level3");
        assert_eq!(element.value, EnumLiteral::Uint(3));
    }
}
