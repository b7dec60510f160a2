//! Type references and primitive types.

use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;

/// An encoded integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntegerType {
    /// A raw byte, not number-encoded.
    Byte,
    Char,
    Short,
    Three,
    Int,
}

impl IntegerType {
    /// Parses a primitive integer type name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(Self::Byte),
            "char" => Some(Self::Char),
            "short" => Some(Self::Short),
            "three" => Some(Self::Three),
            "int" => Some(Self::Int),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Three => "three",
            Self::Int => "int",
        }
    }

    /// Number of bytes the type occupies on the wire.
    pub const fn width(self) -> usize {
        match self {
            Self::Byte | Self::Char => 1,
            Self::Short => 2,
            Self::Three => 3,
            Self::Int => 4,
        }
    }

    /// Largest value the type can carry.
    pub const fn max_value(self) -> u32 {
        match self {
            Self::Byte => 0xFF,
            Self::Char => 252,
            Self::Short => 64_008,
            Self::Three => 16_194_276,
            Self::Int => 4_097_152_080,
        }
    }
}

/// A built-in type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Integer(IntegerType),
    Bool,
    String,
    EncodedString,
    /// All remaining bytes.
    Blob,
}

impl PrimitiveType {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Self::Bool),
            "string" => Some(Self::String),
            "encoded_string" => Some(Self::EncodedString),
            "blob" => Some(Self::Blob),
            _ => IntegerType::parse(name).map(Self::Integer),
        }
    }

    /// Returns `true` for the two string types.
    pub const fn is_string(self) -> bool {
        matches!(self, Self::String | Self::EncodedString)
    }
}

/// A reference to a type by name, with an optional integer width override.
///
/// Written `Name` or `Name:width`, e.g. `Direction:short` or `bool:byte`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: String,
    pub width: Option<IntegerType>,
}

impl TypeRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: None,
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: IntegerType) -> Self {
        self.width = Some(width);
        self
    }

    /// The primitive type this refers to, if any.
    pub fn primitive(&self) -> Option<PrimitiveType> {
        PrimitiveType::parse(&self.name)
    }
}

impl FromStr for TypeRef {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((name, width)) = s.split_once(':') else {
            return Ok(Self::new(s));
        };
        let width = IntegerType::parse(width)
            .filter(|_| !name.is_empty())
            .ok_or_else(|| SchemaError::InvalidTypeOverride {
                scope: "type reference".to_string(),
                type_name: s.to_string(),
            })?;
        Ok(Self::new(name).with_width(width))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.width {
            Some(width) => write!(f, "{}:{}", self.name, width.as_str()),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The length of a string field or the element count of an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LengthSpec {
    Fixed(usize),
    /// Name of an earlier `length` instruction in the same scope.
    Reference(String),
}

impl LengthSpec {
    pub const fn fixed(&self) -> Option<usize> {
        match self {
            Self::Fixed(length) => Some(*length),
            Self::Reference(_) => None,
        }
    }
}

impl FromStr for LengthSpec {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SchemaError::MissingAttribute {
                kind: "length specification",
                attribute: "length",
            });
        }
        Ok(s.parse::<usize>()
            .map_or_else(|_| Self::Reference(s.to_string()), Self::Fixed))
    }
}

impl fmt::Display for LengthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(length) => write!(f, "{length}"),
            Self::Reference(name) => write!(f, "{name}"),
        }
    }
}
