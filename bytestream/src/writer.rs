//! Append-only writer for protocol data.

use std::ops::{Deref, DerefMut};

use crate::error::{EoError, EoResult};
use crate::number::{encode_number, CHAR_MAX, INT_MAX, SHORT_MAX, THREE_MAX};
use crate::string::{encode_string, string_to_bytes};
use crate::{BREAK_BYTE, PADDING_BYTE, SANITIZED_BYTE};

/// A writer for encoding protocol data.
///
/// Writes are accumulated in an internal buffer. Call [`finish`](Self::finish)
/// to get the final byte buffer. A failed write leaves the buffer untouched.
#[derive(Debug, Default, Clone)]
pub struct EoWriter {
    data: Vec<u8>,
    sanitize_strings: bool,
}

impl EoWriter {
    /// Creates a new empty `EoWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `EoWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            data: Vec::with_capacity(bytes),
            sanitize_strings: false,
        }
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns `true` if string payloads are sanitized.
    pub const fn sanitize_strings(&self) -> bool {
        self.sanitize_strings
    }

    /// Enables or disables string sanitization.
    ///
    /// When enabled, 0xFF bytes in string payloads are replaced with 0x79
    /// (`y`) so they cannot be mistaken for chunk break bytes.
    pub fn set_sanitize_strings(&mut self, sanitize: bool) {
        self.sanitize_strings = sanitize;
    }

    /// Returns a guard that restores the current sanitization setting when
    /// dropped.
    pub fn preserve_sanitize_strings(&mut self) -> SanitizeGuard<'_> {
        let previous = self.sanitize_strings;
        SanitizeGuard {
            writer: self,
            previous,
        }
    }

    /// Writes a raw byte.
    pub fn add_byte(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Writes a raw byte from a wider value.
    ///
    /// # Errors
    ///
    /// Returns [`EoError::NumberOutOfRange`] if `value` exceeds 0xFF.
    pub fn add_byte_checked(&mut self, value: u32) -> EoResult<()> {
        let byte = u8::try_from(value).map_err(|_| EoError::NumberOutOfRange {
            value: u64::from(value),
            max: u64::from(u8::MAX),
        })?;
        self.add_byte(byte);
        Ok(())
    }

    /// Writes raw bytes.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Writes a 0xFF chunk break byte.
    pub fn add_break(&mut self) {
        self.add_byte(BREAK_BYTE);
    }

    /// Writes an encoded 1-byte number.
    pub fn add_char(&mut self, number: u32) -> EoResult<()> {
        self.add_number(number, 1, CHAR_MAX)
    }

    /// Writes an encoded 2-byte number.
    pub fn add_short(&mut self, number: u32) -> EoResult<()> {
        self.add_number(number, 2, SHORT_MAX)
    }

    /// Writes an encoded 3-byte number.
    pub fn add_three(&mut self, number: u32) -> EoResult<()> {
        self.add_number(number, 3, THREE_MAX)
    }

    /// Writes an encoded 4-byte number.
    pub fn add_int(&mut self, number: u32) -> EoResult<()> {
        self.add_number(number, 4, INT_MAX)
    }

    /// Writes a string.
    pub fn add_string(&mut self, string: &str) {
        let bytes = self.string_bytes(string);
        self.add_bytes(&bytes);
    }

    /// Writes a string that must be exactly `length` bytes long.
    pub fn add_fixed_string(&mut self, string: &str, length: usize) -> EoResult<()> {
        let bytes = self.fixed_string_bytes(string, length, false)?;
        self.add_bytes(&bytes);
        Ok(())
    }

    /// Writes a string right-padded with 0xFF to `length` bytes.
    pub fn add_padded_string(&mut self, string: &str, length: usize) -> EoResult<()> {
        let bytes = self.fixed_string_bytes(string, length, true)?;
        self.add_bytes(&bytes);
        Ok(())
    }

    /// Writes an encoded string.
    pub fn add_encoded_string(&mut self, string: &str) {
        let mut bytes = self.string_bytes(string);
        encode_string(&mut bytes);
        self.add_bytes(&bytes);
    }

    /// Writes an encoded string that must be exactly `length` bytes long.
    pub fn add_fixed_encoded_string(&mut self, string: &str, length: usize) -> EoResult<()> {
        let mut bytes = self.fixed_string_bytes(string, length, false)?;
        encode_string(&mut bytes);
        self.add_bytes(&bytes);
        Ok(())
    }

    /// Writes an encoded string right-padded with 0xFF to `length` bytes.
    pub fn add_padded_encoded_string(&mut self, string: &str, length: usize) -> EoResult<()> {
        let mut bytes = self.fixed_string_bytes(string, length, true)?;
        encode_string(&mut bytes);
        self.add_bytes(&bytes);
        Ok(())
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.data
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.data);
    }

    fn add_number(&mut self, number: u32, width: usize, max: u32) -> EoResult<()> {
        if number > max {
            return Err(EoError::NumberOutOfRange {
                value: u64::from(number),
                max: u64::from(max),
            });
        }
        let encoded = encode_number(number);
        self.add_bytes(&encoded[..width]);
        Ok(())
    }

    fn string_bytes(&self, string: &str) -> Vec<u8> {
        let mut bytes = string_to_bytes(string);
        if self.sanitize_strings {
            for byte in &mut bytes {
                if *byte == BREAK_BYTE {
                    *byte = SANITIZED_BYTE;
                }
            }
        }
        bytes
    }

    fn fixed_string_bytes(&self, string: &str, length: usize, padded: bool) -> EoResult<Vec<u8>> {
        let mut bytes = self.string_bytes(string);
        if padded {
            if bytes.len() > length {
                return Err(EoError::StringTooLong {
                    max: length,
                    actual: bytes.len(),
                });
            }
            bytes.resize(length, PADDING_BYTE);
        } else if bytes.len() != length {
            return Err(EoError::StringLengthMismatch {
                expected: length,
                actual: bytes.len(),
            });
        }
        Ok(bytes)
    }
}

/// Restores a writer's sanitization setting when dropped.
///
/// Dereferences to the writer, so it can be used anywhere a writer is.
#[derive(Debug)]
pub struct SanitizeGuard<'w> {
    writer: &'w mut EoWriter,
    previous: bool,
}

impl Deref for SanitizeGuard<'_> {
    type Target = EoWriter;

    fn deref(&self) -> &Self::Target {
        self.writer
    }
}

impl DerefMut for SanitizeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.writer
    }
}

impl Drop for SanitizeGuard<'_> {
    fn drop(&mut self) {
        self.writer.sanitize_strings = self.previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = EoWriter::new();
        assert!(writer.is_empty());
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn add_raw_bytes() {
        let mut writer = EoWriter::new();
        writer.add_byte(0x00);
        writer.add_bytes(&[0x01, 0x02]);
        writer.add_break();
        assert_eq!(writer.finish(), vec![0x00, 0x01, 0x02, 0xFF]);
    }

    #[test]
    fn add_byte_checked_range() {
        let mut writer = EoWriter::new();
        writer.add_byte_checked(0xFF).unwrap();
        let err = writer.add_byte_checked(0x100).unwrap_err();
        assert_eq!(
            err,
            EoError::NumberOutOfRange {
                value: 0x100,
                max: 0xFF
            }
        );
        assert_eq!(writer.as_bytes(), &[0xFF]);
    }

    #[test]
    fn add_numbers() {
        let mut writer = EoWriter::new();
        writer.add_char(123).unwrap();
        writer.add_short(12_345).unwrap();
        writer.add_three(10_000_000).unwrap();
        writer.add_int(2_048_576_040).unwrap();
        assert_eq!(
            writer.finish(),
            vec![0x7C, 0xCA, 0x31, 0xB0, 0x3A, 0x9D, 0x7F, 0x7F, 0x7F, 0x7F]
        );
    }

    #[test]
    fn add_char_limits() {
        let mut writer = EoWriter::new();
        writer.add_char(252).unwrap();
        assert!(matches!(
            writer.add_char(253),
            Err(EoError::NumberOutOfRange { value: 253, .. })
        ));
        assert_eq!(writer.len(), 1);
    }

    #[test]
    fn add_short_three_int_limits() {
        let mut writer = EoWriter::new();
        writer.add_short(64_008).unwrap();
        assert!(writer.add_short(64_009).is_err());
        writer.add_three(16_194_276).unwrap();
        assert!(writer.add_three(16_194_277).is_err());
        writer.add_int(4_097_152_080).unwrap();
        assert!(writer.add_int(4_097_152_081).is_err());
        assert_eq!(writer.len(), 2 + 3 + 4);
    }

    #[test]
    fn small_numbers_keep_absent_digits() {
        let mut writer = EoWriter::new();
        writer.add_short(0).unwrap();
        assert_eq!(writer.finish(), vec![0x01, 0xFE]);
    }

    #[test]
    fn add_strings() {
        let mut writer = EoWriter::new();
        writer.add_string("foo");
        writer.add_fixed_string("bar", 3).unwrap();
        writer.add_padded_string("baz", 5).unwrap();
        assert_eq!(writer.finish(), b"foobarbaz\xFF\xFF".to_vec());
    }

    #[test]
    fn fixed_string_length_must_match() {
        let mut writer = EoWriter::new();
        assert_eq!(
            writer.add_fixed_string("foo", 4),
            Err(EoError::StringLengthMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(writer.add_fixed_string("foo", 2).is_err());
        assert!(writer.is_empty());
    }

    #[test]
    fn padded_string_must_fit() {
        let mut writer = EoWriter::new();
        writer.add_padded_string("foo", 3).unwrap();
        assert_eq!(
            writer.add_padded_string("foobar", 3),
            Err(EoError::StringTooLong { max: 3, actual: 6 })
        );
        assert_eq!(writer.finish(), b"foo".to_vec());
    }

    #[test]
    fn add_encoded_strings() {
        let mut writer = EoWriter::new();
        writer.add_encoded_string("Hello, World!");
        assert_eq!(writer.finish(), b"!;a-^H s^3a:)".to_vec());

        let mut writer = EoWriter::new();
        writer.add_fixed_encoded_string("Hello, World!", 13).unwrap();
        assert!(writer.add_fixed_encoded_string("Hello", 13).is_err());
        assert_eq!(writer.finish(), b"!;a-^H s^3a:)".to_vec());
    }

    #[test]
    fn padded_encoded_string_pads_before_encoding() {
        let mut writer = EoWriter::new();
        writer.add_padded_encoded_string("ab", 3).unwrap();
        // "ab\xFF" is inverted with odd parity then reversed.
        assert_eq!(writer.finish(), vec![0xFF, 0x3D, 0x6C]);
    }

    #[test]
    fn sanitization_replaces_break_bytes() {
        let mut writer = EoWriter::new();
        writer.set_sanitize_strings(true);
        writer.add_string("a\u{ff}b");
        writer.add_padded_string("\u{ff}", 2).unwrap();
        writer.add_bytes(&[0xFF]);
        assert_eq!(writer.finish(), vec![0x61, 0x79, 0x62, 0x79, 0xFF, 0xFF]);
    }

    #[test]
    fn no_sanitization_by_default() {
        let mut writer = EoWriter::new();
        writer.add_string("\u{ff}");
        assert_eq!(writer.finish(), vec![0xFF]);
    }

    #[test]
    fn guard_restores_sanitization() {
        let mut writer = EoWriter::new();
        {
            let mut guard = writer.preserve_sanitize_strings();
            guard.set_sanitize_strings(true);
            guard.add_string("\u{ff}");
        }
        assert!(!writer.sanitize_strings());
        writer.add_string("\u{ff}");
        assert_eq!(writer.finish(), vec![0x79, 0xFF]);
    }

    #[test]
    fn finish_into() {
        let mut writer = EoWriter::new();
        writer.add_byte(0xAB);

        let mut buf = vec![0x00, 0x11];
        writer.finish_into(&mut buf);
        assert_eq!(buf, vec![0x00, 0x11, 0xAB]);
    }

    #[test]
    fn with_capacity() {
        let writer = EoWriter::with_capacity(100);
        assert_eq!(writer.len(), 0);
    }
}
