//! Protocol description errors.

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building, validating or sizing a protocol
/// description.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// An attribute that is not legal for the instruction kind was populated.
    UnexpectedAttribute {
        kind: &'static str,
        attribute: &'static str,
        value: String,
    },

    /// A required attribute was missing or empty.
    MissingAttribute {
        kind: &'static str,
        attribute: &'static str,
    },

    /// A name was declared twice in the same scope.
    DuplicateName { scope: String, name: String },

    /// Two values of an enum resolve to the same ordinal.
    DuplicateEnumValue { enum_name: String, value: u32 },

    /// A type name does not resolve to a primitive, enum or struct.
    UnknownType { scope: String, type_name: String },

    /// A `:width` override is malformed or applied to a type that is not an
    /// enum or bool.
    InvalidTypeOverride { scope: String, type_name: String },

    /// An enum's backing type is not an integer type or another enum.
    InvalidEnumType { enum_name: String, data_type: String },

    /// A length instruction has a non-integer type.
    InvalidLengthType { scope: String, type_name: String },

    /// A length reference does not name an earlier length instruction.
    UnknownLengthReference { scope: String, name: String },

    /// A switch does not name an earlier integer or enum field.
    UnknownSwitchField { scope: String, field: String },

    /// A case value is not valid for the switch field's type.
    InvalidCaseValue {
        scope: String,
        field: String,
        value: String,
    },

    /// Fixed content cannot be parsed for its type.
    InvalidContent {
        scope: String,
        type_name: String,
        content: String,
    },

    /// A break or delimited array appears outside a chunked group.
    MisplacedBreak { scope: String, kind: &'static str },

    /// A default case is not the last case of its switch, or appears twice.
    MisplacedDefaultCase { scope: String, field: String },

    /// A field has neither a name nor fixed content.
    UnnamedFieldWithoutContent { scope: String, type_name: String },

    /// A type has no statically known size.
    UnresolvableSize { type_name: String, reason: String },

    /// A struct contains itself.
    RecursiveType { type_name: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedAttribute {
                kind,
                attribute,
                value,
            } => {
                write!(
                    f,
                    "unexpected attribute `{attribute}` (value {value:?}) on {kind} instruction"
                )
            }
            Self::MissingAttribute { kind, attribute } => {
                write!(f, "missing required attribute `{attribute}` on {kind}")
            }
            Self::DuplicateName { scope, name } => {
                write!(f, "duplicate name `{name}` in {scope}")
            }
            Self::DuplicateEnumValue { enum_name, value } => {
                write!(f, "enum `{enum_name}` has more than one value {value}")
            }
            Self::UnknownType { scope, type_name } => {
                write!(f, "unknown type `{type_name}` in {scope}")
            }
            Self::InvalidTypeOverride { scope, type_name } => {
                write!(f, "invalid type override `{type_name}` in {scope}")
            }
            Self::InvalidEnumType {
                enum_name,
                data_type,
            } => {
                write!(
                    f,
                    "enum `{enum_name}` has non-integer backing type `{data_type}`"
                )
            }
            Self::InvalidLengthType { scope, type_name } => {
                write!(f, "length of type `{type_name}` in {scope} is not an integer")
            }
            Self::UnknownLengthReference { scope, name } => {
                write!(f, "unknown length reference `{name}` in {scope}")
            }
            Self::UnknownSwitchField { scope, field } => {
                write!(f, "switch on unknown field `{field}` in {scope}")
            }
            Self::InvalidCaseValue {
                scope,
                field,
                value,
            } => {
                write!(
                    f,
                    "invalid case value `{value}` for switch on `{field}` in {scope}"
                )
            }
            Self::InvalidContent {
                scope,
                type_name,
                content,
            } => {
                write!(
                    f,
                    "content {content:?} is not valid for type `{type_name}` in {scope}"
                )
            }
            Self::MisplacedBreak { scope, kind } => {
                write!(f, "{kind} outside a chunked group in {scope}")
            }
            Self::MisplacedDefaultCase { scope, field } => {
                write!(
                    f,
                    "default case must be the last case of the switch on `{field}` in {scope}"
                )
            }
            Self::UnnamedFieldWithoutContent { scope, type_name } => {
                write!(
                    f,
                    "unnamed field of type `{type_name}` in {scope} has no content"
                )
            }
            Self::UnresolvableSize { type_name, reason } => {
                write!(f, "type `{type_name}` has no static size: {reason}")
            }
            Self::RecursiveType { type_name } => {
                write!(f, "type `{type_name}` contains itself")
            }
        }
    }
}

impl std::error::Error for SchemaError {}
