//! Error types for code generation.

use std::fmt;

use schema::SchemaError;

/// Result type for code generation.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Errors that can occur while generating source for a protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodegenError {
    /// The description itself is invalid, or a size could not be computed.
    Schema(SchemaError),

    /// A package is not part of the generator's protocol set.
    UnknownPackage { package: String },

    /// A configured module or runtime path is not a valid Rust path.
    InvalidModulePath { path: String },

    /// The packet family or action enum is missing, or lacks a packet's value.
    UnknownPacketEnum { enum_name: String, value: String },

    /// The generated tokens did not parse as a Rust source file.
    InvalidOutput { package: String, message: String },
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(err) => write!(f, "invalid protocol description: {err}"),
            Self::UnknownPackage { package } => {
                write!(f, "package `{package}` is not part of the protocol set")
            }
            Self::InvalidModulePath { path } => {
                write!(f, "`{path}` is not a valid module path")
            }
            Self::UnknownPacketEnum { enum_name, value } => {
                write!(f, "packet enum `{enum_name}` has no value `{value}`")
            }
            Self::InvalidOutput { package, message } => {
                write!(f, "generated source for `{package}` does not parse: {message}")
            }
        }
    }
}

impl std::error::Error for CodegenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schema(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchemaError> for CodegenError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}
