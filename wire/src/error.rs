//! Error types for wire operations.

use std::fmt;

/// Result type for wire operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors that can occur while framing packets.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireError {
    /// Frame length exceeds what the 2-byte length prefix can carry.
    FrameTooLarge { length: usize, max: usize },

    /// Frame length prefix is too small to hold the packet id.
    FrameTooShort { length: usize },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameTooLarge { length, max } => {
                write!(f, "frame too large: {length} bytes > {max}")
            }
            Self::FrameTooShort { length } => {
                write!(f, "frame too short: {length} bytes cannot hold a packet id")
            }
        }
    }
}

impl std::error::Error for WireError {}
