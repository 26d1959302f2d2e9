//! TypeScript code generation modules.

pub mod classes;
pub mod enums;
pub mod fields;
pub mod kinds;

pub use classes::{ClassGenerator, ConversionState, convert_values_helper};
pub use enums::{EnumGenerator, EnumRegistry};
pub use fields::{ClassBuilder, FieldName};
pub use kinds::KindMapper;
