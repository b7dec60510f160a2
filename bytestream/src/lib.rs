//! Byte-level encoding primitives for the eoproto protocol toolkit.
//!
//! This crate provides the number and string codecs used on the wire, plus
//! [`EoWriter`] and [`EoReader`] for building and consuming payloads.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Lenient reads** - Reading past the end of the data (or the current
//!   chunk) yields truncated or zero values, never an error or a panic.
//! - **Strict writes** - Out of range values fail with a structured error and
//!   leave the buffer untouched.
//! - **No domain knowledge** - This crate knows nothing about packets,
//!   families or game state.
//!
//! # Example
//!
//! ```
//! use bytestream::{EoReader, EoWriter};
//!
//! let mut writer = EoWriter::new();
//! writer.add_char(123).unwrap();
//! writer.add_break();
//! writer.add_short(12345).unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = EoReader::new(&bytes);
//! reader.set_chunked_reading_mode(true);
//! assert_eq!(reader.get_char(), 123);
//! reader.next_chunk().unwrap();
//! assert_eq!(reader.get_short(), 12345);
//! ```

mod error;
mod number;
mod reader;
mod serialize;
mod string;
mod writer;

pub use error::{EoError, EoResult};
pub use number::{
    decode_number, encode_number, CHAR_MAX, INT_MAX, NUMBER_ABSENT, SHORT_MAX, THREE_MAX,
};
pub use reader::{ChunkedModeGuard, EoReader};
pub use serialize::{length_to_number, number_to_length, EoSerialize};
pub use string::{bytes_to_string, decode_string, encode_string, string_to_bytes};
pub use writer::{EoWriter, SanitizeGuard};

/// Separates chunks in chunked payloads.
pub const BREAK_BYTE: u8 = 0xFF;

/// Fills the unused tail of padded strings.
pub const PADDING_BYTE: u8 = 0xFF;

/// Replaces [`BREAK_BYTE`] in sanitized string payloads.
pub const SANITIZED_BYTE: u8 = 0x79;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let writer = EoWriter::new();
        let bytes = writer.finish();
        assert!(bytes.is_empty());

        let reader = EoReader::new(&bytes);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn numbers_roundtrip_at_every_width() {
        let mut writer = EoWriter::new();
        writer.add_char(CHAR_MAX).unwrap();
        writer.add_short(SHORT_MAX).unwrap();
        writer.add_three(THREE_MAX).unwrap();
        writer.add_int(INT_MAX).unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 10);

        let mut reader = EoReader::new(&bytes);
        assert_eq!(reader.get_char(), CHAR_MAX);
        assert_eq!(reader.get_short(), SHORT_MAX);
        assert_eq!(reader.get_three(), THREE_MAX);
        assert_eq!(reader.get_int(), INT_MAX);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn chunked_strings_roundtrip() {
        let mut writer = EoWriter::new();
        writer.set_sanitize_strings(true);
        writer.add_string("first");
        writer.add_break();
        writer.add_encoded_string("second");
        writer.add_break();
        writer.add_padded_string("third", 8).unwrap();
        let bytes = writer.finish();

        let mut reader = EoReader::new(&bytes);
        reader.set_chunked_reading_mode(true);
        assert_eq!(reader.get_string(), "first");
        reader.next_chunk().unwrap();
        assert_eq!(reader.get_encoded_string(), "second");
        reader.next_chunk().unwrap();
        assert_eq!(reader.get_padded_string(8), "third");
    }

    #[test]
    fn doctest_example() {
        let mut writer = EoWriter::new();
        writer.add_char(123).unwrap();
        writer.add_break();
        writer.add_short(12_345).unwrap();

        let bytes = writer.finish();

        let mut reader = EoReader::new(&bytes);
        reader.set_chunked_reading_mode(true);
        assert_eq!(reader.get_char(), 123);
        reader.next_chunk().unwrap();
        assert_eq!(reader.get_short(), 12_345);
    }
}
