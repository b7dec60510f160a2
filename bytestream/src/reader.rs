//! Sequential reader with chunked reading mode.

use std::ops::{Deref, DerefMut};

use crate::error::{EoError, EoResult};
use crate::number::decode_number;
use crate::string::{bytes_to_string, decode_string};
use crate::{BREAK_BYTE, PADDING_BYTE};

/// A cursor over protocol data.
///
/// Reads never fail on short input: reading past the end of the data, or past
/// the end of the current chunk in chunked reading mode, yields truncated or
/// zero-valued results.
///
/// In chunked reading mode the data is split into chunks by 0xFF break bytes,
/// and [`remaining`](Self::remaining) only counts bytes up to the next break.
#[derive(Debug, Clone)]
pub struct EoReader<'a> {
    data: &'a [u8],
    position: usize,
    chunked_reading_mode: bool,
    chunk_start: usize,
    next_break: Option<usize>,
}

impl<'a> EoReader<'a> {
    /// Creates a new `EoReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            chunked_reading_mode: false,
            chunk_start: 0,
            next_break: None,
        }
    }

    /// Creates a reader over a subrange of this reader's data.
    ///
    /// `index` and `length` are clamped to the data; the new reader starts at
    /// position zero in non-chunked mode. This reader is not advanced.
    #[must_use]
    pub fn slice(&self, index: usize, length: usize) -> EoReader<'a> {
        let begin = index.min(self.data.len());
        let end = begin + length.min(self.data.len() - begin);
        EoReader::new(&self.data[begin..end])
    }

    /// Creates a reader over everything from `index` to the end of the data.
    #[must_use]
    pub fn slice_from(&self, index: usize) -> EoReader<'a> {
        self.slice(index, self.data.len().saturating_sub(index))
    }

    /// Returns the current position in the underlying data.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes left to read.
    ///
    /// In chunked reading mode this is the number of bytes left in the
    /// current chunk.
    pub fn remaining(&self) -> usize {
        if self.chunked_reading_mode {
            let next_break = self.next_break.unwrap_or(self.data.len());
            next_break - self.position.min(next_break)
        } else {
            self.data.len().saturating_sub(self.position)
        }
    }

    /// Returns `true` if the reader is in chunked reading mode.
    pub const fn is_chunked(&self) -> bool {
        self.chunked_reading_mode
    }

    /// Enables or disables chunked reading mode.
    ///
    /// The first time chunked reading mode is enabled, the next break is
    /// located from the current chunk start.
    pub fn set_chunked_reading_mode(&mut self, chunked: bool) {
        self.chunked_reading_mode = chunked;
        if chunked && self.next_break.is_none() {
            self.next_break = Some(self.find_next_break());
        }
    }

    /// Returns a guard that restores the current chunked reading mode when
    /// dropped.
    pub fn preserve_chunked_mode(&mut self) -> ChunkedModeGuard<'_, 'a> {
        let previous = self.chunked_reading_mode;
        ChunkedModeGuard {
            reader: self,
            previous,
        }
    }

    /// Moves the reader past the next break byte.
    ///
    /// # Errors
    ///
    /// Returns [`EoError::NotChunked`] if the reader is not in chunked
    /// reading mode.
    pub fn next_chunk(&mut self) -> EoResult<()> {
        if !self.chunked_reading_mode {
            return Err(EoError::NotChunked);
        }

        let next_break = self.next_break.unwrap_or_else(|| self.find_next_break());
        self.position = next_break;
        if self.position < self.data.len() {
            // Skip the break byte
            self.position += 1;
        }

        self.chunk_start = self.position;
        self.next_break = Some(self.find_next_break());
        Ok(())
    }

    /// Reads a raw byte, or 0 if nothing remains.
    pub fn get_byte(&mut self) -> u8 {
        self.get_bytes(1).first().copied().unwrap_or(0)
    }

    /// Reads up to `length` raw bytes.
    pub fn get_bytes(&mut self, length: usize) -> &'a [u8] {
        let data = self.data;
        let length = length.min(self.remaining());
        let start = self.position.min(data.len());
        let end = (start + length).min(data.len());
        self.position = end;
        &data[start..end]
    }

    /// Reads an encoded 1-byte number.
    pub fn get_char(&mut self) -> u32 {
        decode_number(self.get_bytes(1))
    }

    /// Reads an encoded 2-byte number.
    pub fn get_short(&mut self) -> u32 {
        decode_number(self.get_bytes(2))
    }

    /// Reads an encoded 3-byte number.
    pub fn get_three(&mut self) -> u32 {
        decode_number(self.get_bytes(3))
    }

    /// Reads an encoded 4-byte number.
    pub fn get_int(&mut self) -> u32 {
        decode_number(self.get_bytes(4))
    }

    /// Reads all remaining bytes as a string.
    pub fn get_string(&mut self) -> String {
        let length = self.remaining();
        bytes_to_string(self.get_bytes(length))
    }

    /// Reads a string of `length` bytes.
    pub fn get_fixed_string(&mut self, length: usize) -> String {
        bytes_to_string(self.get_bytes(length))
    }

    /// Reads a string of `length` bytes, dropping 0xFF padding.
    pub fn get_padded_string(&mut self, length: usize) -> String {
        bytes_to_string(strip_padding(self.get_bytes(length)))
    }

    /// Reads all remaining bytes as an encoded string.
    pub fn get_encoded_string(&mut self) -> String {
        let length = self.remaining();
        self.get_fixed_encoded_string(length)
    }

    /// Reads an encoded string of `length` bytes.
    pub fn get_fixed_encoded_string(&mut self, length: usize) -> String {
        let mut bytes = self.get_bytes(length).to_vec();
        decode_string(&mut bytes);
        bytes_to_string(&bytes)
    }

    /// Reads an encoded string of `length` bytes, dropping 0xFF padding.
    pub fn get_padded_encoded_string(&mut self, length: usize) -> String {
        let mut bytes = self.get_bytes(length).to_vec();
        decode_string(&mut bytes);
        bytes_to_string(strip_padding(&bytes))
    }

    fn find_next_break(&self) -> usize {
        let start = self.chunk_start.min(self.data.len());
        self.data[start..]
            .iter()
            .position(|&byte| byte == BREAK_BYTE)
            .map_or(self.data.len(), |offset| start + offset)
    }
}

fn strip_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .position(|&byte| byte == PADDING_BYTE)
        .unwrap_or(bytes.len());
    &bytes[..end]
}

/// Restores a reader's chunked reading mode when dropped.
///
/// Dereferences to the reader, so it can be used anywhere a reader is.
#[derive(Debug)]
pub struct ChunkedModeGuard<'r, 'a> {
    reader: &'r mut EoReader<'a>,
    previous: bool,
}

impl<'a> Deref for ChunkedModeGuard<'_, 'a> {
    type Target = EoReader<'a>;

    fn deref(&self) -> &Self::Target {
        self.reader
    }
}

impl DerefMut for ChunkedModeGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.reader
    }
}

impl Drop for ChunkedModeGuard<'_, '_> {
    fn drop(&mut self) {
        self.reader.chunked_reading_mode = self.previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let mut reader = EoReader::new(&[]);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.get_byte(), 0);
        assert_eq!(reader.get_int(), 0);
        assert_eq!(reader.get_string(), "");
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_numbers() {
        let mut reader = EoReader::new(&[
            0x7C, 0xCA, 0x31, 0x01, 0x01, 0x02, 0xFD, 0xFD, 0xFD, 0xFD,
        ]);
        assert_eq!(reader.get_char(), 123);
        assert_eq!(reader.get_short(), 12_345);
        assert_eq!(reader.get_three(), 64_009);
        assert_eq!(reader.get_int(), 4_097_152_080);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn short_read_is_truncated() {
        let mut reader = EoReader::new(&[0x01, 0x02, 0x03]);
        assert_eq!(reader.get_bytes(8), &[0x01, 0x02, 0x03]);
        assert_eq!(reader.position(), 3);
        assert!(reader.get_bytes(1).is_empty());
    }

    #[test]
    fn short_number_read_treats_missing_bytes_as_zero() {
        let mut reader = EoReader::new(&[0xCA]);
        assert_eq!(reader.get_int(), 201);
    }

    #[test]
    fn read_strings() {
        let mut reader = EoReader::new(b"fooBAR\xFF\xFFrest");
        assert_eq!(reader.get_fixed_string(3), "foo");
        assert_eq!(reader.get_padded_string(5), "BAR");
        assert_eq!(reader.get_string(), "rest");
    }

    #[test]
    fn padded_string_strips_from_first_padding_byte() {
        let mut reader = EoReader::new(b"ab\xFFcd");
        assert_eq!(reader.get_padded_string(5), "ab");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn read_encoded_strings() {
        let mut reader = EoReader::new(b"!;a-^H s^3a:)");
        assert_eq!(reader.get_encoded_string(), "Hello, World!");

        let mut reader = EoReader::new(b"!;a-^H s^3a:)tail");
        assert_eq!(reader.get_fixed_encoded_string(13), "Hello, World!");
        assert_eq!(reader.get_string(), "tail");
    }

    #[test]
    fn chunked_reading_literal() {
        let data = [
            0x7C, 0x67, 0x61, 0x72, 0x62, 0x61, 0x67, 0x65, 0xFF, 0xCA, 0x31,
        ];
        let mut reader = EoReader::new(&data);
        reader.set_chunked_reading_mode(true);
        assert_eq!(reader.remaining(), 8);
        assert_eq!(reader.get_char(), 123);
        reader.next_chunk().unwrap();
        assert_eq!(reader.get_short(), 12_345);
    }

    #[test]
    fn chunked_under_read() {
        let data = [
            0x7C, 0x67, 0x61, 0x72, 0x62, 0x61, 0x67, 0x65, 0xFF, 0xCA, 0x31,
        ];
        let mut reader = EoReader::new(&data);
        reader.set_chunked_reading_mode(true);
        assert_eq!(reader.get_char(), 123);
        // "garbage" is skipped by moving to the next chunk.
        reader.next_chunk().unwrap();
        assert_eq!(reader.position(), 9);
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn chunked_over_read() {
        let mut reader = EoReader::new(&[0xFF, 0x7C]);
        reader.set_chunked_reading_mode(true);
        assert_eq!(reader.get_int(), 0);
        reader.next_chunk().unwrap();
        assert_eq!(reader.get_short(), 123);
    }

    #[test]
    fn chunked_double_read() {
        let mut reader = EoReader::new(&[0xFF, 0x7C, 0xCA, 0x31]);
        // Reading all four bytes; 0xFF is clamped to the largest digit.
        assert_eq!(reader.get_int(), 790_222_476);

        // Seeking to the first break moves the position backwards.
        reader.set_chunked_reading_mode(true);
        reader.next_chunk().unwrap();
        assert_eq!(reader.get_char(), 123);
        assert_eq!(reader.get_short(), 12_345);
    }

    #[test]
    fn next_chunk_requires_chunked_mode() {
        let mut reader = EoReader::new(&[0x01, 0xFF, 0x02]);
        assert_eq!(reader.next_chunk(), Err(EoError::NotChunked));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn next_chunk_at_end_of_data() {
        let mut reader = EoReader::new(&[0x01, 0x02]);
        reader.set_chunked_reading_mode(true);
        assert_eq!(reader.remaining(), 2);
        reader.next_chunk().unwrap();
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.remaining(), 0);
        reader.next_chunk().unwrap();
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn chunked_string_stops_at_break() {
        let mut reader = EoReader::new(b"first\xFFsecond");
        reader.set_chunked_reading_mode(true);
        assert_eq!(reader.get_string(), "first");
        reader.next_chunk().unwrap();
        assert_eq!(reader.get_string(), "second");
    }

    #[test]
    fn leaving_chunked_mode_reports_whole_buffer() {
        let mut reader = EoReader::new(&[0x01, 0xFF, 0x02]);
        reader.set_chunked_reading_mode(true);
        assert_eq!(reader.remaining(), 1);
        reader.set_chunked_reading_mode(false);
        assert_eq!(reader.remaining(), 3);
    }

    #[test]
    fn guard_restores_chunked_mode() {
        let mut reader = EoReader::new(&[0x01, 0xFF, 0x02]);
        {
            let mut guard = reader.preserve_chunked_mode();
            guard.set_chunked_reading_mode(true);
            assert!(guard.is_chunked());
            assert_eq!(guard.get_char(), 0);
        }
        assert!(!reader.is_chunked());
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn guard_restores_on_error_path() {
        fn fails(reader: &mut EoReader<'_>) -> EoResult<()> {
            let mut guard = reader.preserve_chunked_mode();
            guard.set_chunked_reading_mode(false);
            guard.next_chunk()
        }

        let mut reader = EoReader::new(&[0x01]);
        reader.set_chunked_reading_mode(true);
        assert_eq!(fails(&mut reader), Err(EoError::NotChunked));
        assert!(reader.is_chunked());
    }

    #[test]
    fn slice_is_clamped_and_independent() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut reader = EoReader::new(&data);
        reader.get_byte();

        let mut slice = reader.slice(1, 2);
        assert_eq!(slice.get_bytes(5), &[0x02, 0x03]);
        assert_eq!(reader.position(), 1);

        assert_eq!(reader.slice(4, 10).remaining(), 1);
        assert_eq!(reader.slice(10, 10).remaining(), 0);
        assert_eq!(reader.slice_from(3).remaining(), 2);
    }
}
