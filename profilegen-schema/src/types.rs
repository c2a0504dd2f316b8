//! Type definitions.
//!
//! This module contains the data structures for declared profile types:
//! their base representation kind and, for enumerated types, their
//! ordered named values.

use std::fmt;

/// Base representation kind of a type or field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseKind {
    /// Enumerated value stored in one byte.
    Enum,
    /// Signed 8-bit integer.
    Sint8,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Signed 16-bit integer.
    Sint16,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Signed 32-bit integer.
    Sint32,
    /// Unsigned 32-bit integer.
    Uint32,
    /// UTF-8 string.
    String,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// Unsigned 8-bit integer, zero is invalid.
    Uint8z,
    /// Unsigned 16-bit integer, zero is invalid.
    Uint16z,
    /// Unsigned 32-bit integer, zero is invalid.
    Uint32z,
    /// Raw byte.
    Byte,
    /// Signed 64-bit integer.
    Sint64,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Unsigned 64-bit integer, zero is invalid.
    Uint64z,
    /// Boolean.
    Bool,
}

impl BaseKind {
    /// Every base kind, in wire code order.
    pub const ALL: [Self; 18] = [
        Self::Enum,
        Self::Sint8,
        Self::Uint8,
        Self::Sint16,
        Self::Uint16,
        Self::Sint32,
        Self::Uint32,
        Self::String,
        Self::Float32,
        Self::Float64,
        Self::Uint8z,
        Self::Uint16z,
        Self::Uint32z,
        Self::Byte,
        Self::Sint64,
        Self::Uint64,
        Self::Uint64z,
        Self::Bool,
    ];

    /// Parses a base kind from its profile name, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.profile_name().eq_ignore_ascii_case(s))
    }

    /// Returns the name used in profile tables.
    #[must_use]
    pub const fn profile_name(self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::Sint8 => "sint8",
            Self::Uint8 => "uint8",
            Self::Sint16 => "sint16",
            Self::Uint16 => "uint16",
            Self::Sint32 => "sint32",
            Self::Uint32 => "uint32",
            Self::String => "string",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Uint8z => "uint8z",
            Self::Uint16z => "uint16z",
            Self::Uint32z => "uint32z",
            Self::Byte => "byte",
            Self::Sint64 => "sint64",
            Self::Uint64 => "uint64",
            Self::Uint64z => "uint64z",
            Self::Bool => "bool",
        }
    }

    /// Returns the Rust storage type.
    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::Enum | Self::Uint8 | Self::Uint8z | Self::Byte => "u8",
            Self::Sint8 => "i8",
            Self::Sint16 => "i16",
            Self::Uint16 | Self::Uint16z => "u16",
            Self::Sint32 => "i32",
            Self::Uint32 | Self::Uint32z => "u32",
            Self::String => "String",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::Sint64 => "i64",
            Self::Uint64 | Self::Uint64z => "u64",
            Self::Bool => "bool",
        }
    }

    /// Returns true for floating point kinds.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns true if the storage type is `Copy`.
    #[must_use]
    pub const fn is_copy(self) -> bool {
        !matches!(self, Self::String)
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile_name())
    }
}

/// Declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Normalized name.
    pub name: String,
    /// Label as written in the types table.
    pub raw_name: String,
    /// Base representation kind.
    pub base: BaseKind,
    /// Named values in declaration order.
    pub values: Vec<TypeValue>,
    /// Comment.
    pub comment: Option<String>,
}

impl TypeDef {
    /// Creates a type definition without values.
    #[must_use]
    pub fn new(name: String, raw_name: String, base: BaseKind) -> Self {
        Self {
            name,
            raw_name,
            base,
            values: Vec::new(),
            comment: None,
        }
    }

    /// Returns true if the type enumerates named values.
    #[must_use]
    pub fn is_enumerated(&self) -> bool {
        !self.values.is_empty()
    }

    /// Looks up a value by normalized name.
    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&TypeValue> {
        self.values.iter().find(|v| v.name == name)
    }
}

/// Named value of an enumerated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeValue {
    /// Normalized name.
    pub name: String,
    /// Label as written in the types table.
    pub raw_name: String,
    /// Literal value, passed through verbatim.
    pub value: String,
    /// Comment.
    pub comment: Option<String>,
}
