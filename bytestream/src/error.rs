//! Error types for bytestream operations.

use std::fmt;

/// Result type for bytestream operations.
pub type EoResult<T> = Result<T, EoError>;

/// Errors that can occur while encoding or decoding protocol data.
///
/// Reader under-runs are not errors: reads past the end of the data (or the
/// current chunk) return truncated or zero-valued results instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EoError {
    /// Value cannot be represented in the requested encoded width.
    NumberOutOfRange {
        /// The value that was out of range.
        value: u64,
        /// Largest value representable in the width.
        max: u64,
    },

    /// A fixed-length string did not have exactly the declared length.
    StringLengthMismatch {
        /// Declared length.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// A padded string was longer than the declared length.
    StringTooLong {
        /// Declared (maximum) length.
        max: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// `next_chunk` was called while the reader was not in chunked reading mode.
    NotChunked,

    /// A collection did not match the length declared for it.
    InvalidLength {
        /// Name of the member carrying the collection.
        name: &'static str,
        /// Declared length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A length value does not fit in an encoded number after applying its offset.
    LengthOverflow {
        /// The length that was being encoded.
        length: usize,
        /// Offset applied to the length.
        offset: i32,
    },

    /// Switch data is missing or does not correspond to the switch field's value.
    MissingSwitchData {
        /// Type owning the switch.
        type_name: &'static str,
        /// Field the switch is keyed on.
        field: &'static str,
    },

    /// An enum value has no name in its definition.
    UnrecognizedEnumValue {
        /// Enum type name.
        type_name: &'static str,
        /// Raw value.
        value: u32,
    },
}

impl fmt::Display for EoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumberOutOfRange { value, max } => {
                write!(f, "value {value} exceeds maximum encodable value {max}")
            }
            Self::StringLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "fixed string length mismatch: expected {expected} bytes, got {actual}"
                )
            }
            Self::StringTooLong { max, actual } => {
                write!(f, "padded string too long: {actual} bytes > {max}")
            }
            Self::NotChunked => write!(f, "reader is not in chunked reading mode"),
            Self::InvalidLength {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "expected `{name}` to have length {expected}, got {actual}"
                )
            }
            Self::LengthOverflow { length, offset } => {
                write!(
                    f,
                    "length {length} with offset {offset} is not an encodable number"
                )
            }
            Self::MissingSwitchData { type_name, field } => {
                write!(
                    f,
                    "switch data for `{type_name}.{field}` does not match the field value"
                )
            }
            Self::UnrecognizedEnumValue { type_name, value } => {
                write!(f, "unrecognized value {value} for enum `{type_name}`")
            }
        }
    }
}

impl std::error::Error for EoError {}
