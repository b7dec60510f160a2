//! Serialization contract implemented by generated protocol types.

use crate::error::{EoError, EoResult};
use crate::reader::EoReader;
use crate::writer::EoWriter;

/// A type that can be written to and read from the protocol byte stream.
pub trait EoSerialize: Sized {
    /// Writes `self` to the writer.
    fn serialize(&self, writer: &mut EoWriter) -> EoResult<()>;

    /// Reads a value from the reader.
    fn deserialize(reader: &mut EoReader<'_>) -> EoResult<Self>;

    /// Serializes `self` into a fresh byte buffer.
    fn to_bytes(&self) -> EoResult<Vec<u8>> {
        let mut writer = EoWriter::new();
        self.serialize(&mut writer)?;
        Ok(writer.finish())
    }

    /// Deserializes a value from a byte slice.
    fn from_bytes(bytes: &[u8]) -> EoResult<Self> {
        let mut reader = EoReader::new(bytes);
        Self::deserialize(&mut reader)
    }
}

/// Converts a collection length to the number written for it on the wire.
///
/// The wire carries `length - offset`.
pub fn length_to_number(length: usize, offset: i32) -> EoResult<u32> {
    let overflow = || EoError::LengthOverflow { length, offset };
    let length = i64::try_from(length).map_err(|_| overflow())?;
    u32::try_from(length - i64::from(offset)).map_err(|_| overflow())
}

/// Converts a number read from the wire back into a collection length.
///
/// Negative results clamp to zero.
pub fn number_to_length(value: u32, offset: i32) -> usize {
    let length = i64::from(value) + i64::from(offset);
    usize::try_from(length).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Coords {
        x: u32,
        y: u32,
    }

    impl EoSerialize for Coords {
        fn serialize(&self, writer: &mut EoWriter) -> EoResult<()> {
            writer.add_short(self.x)?;
            writer.add_short(self.y)
        }

        fn deserialize(reader: &mut EoReader<'_>) -> EoResult<Self> {
            Ok(Self {
                x: reader.get_short(),
                y: reader.get_short(),
            })
        }
    }

    #[test]
    fn to_and_from_bytes() {
        let coords = Coords { x: 12_345, y: 7 };
        let bytes = coords.to_bytes().unwrap();
        assert_eq!(bytes, vec![0xCA, 0x31, 0x08, 0xFE]);
        assert_eq!(Coords::from_bytes(&bytes).unwrap(), coords);
    }

    #[test]
    fn to_bytes_propagates_errors() {
        let coords = Coords { x: 64_009, y: 0 };
        assert!(matches!(
            coords.to_bytes(),
            Err(EoError::NumberOutOfRange { value: 64_009, .. })
        ));
    }

    #[test]
    fn length_offsets() {
        assert_eq!(length_to_number(5, 0).unwrap(), 5);
        assert_eq!(length_to_number(5, 1).unwrap(), 4);
        assert_eq!(length_to_number(5, -2).unwrap(), 7);
        assert_eq!(number_to_length(4, 1), 5);
        assert_eq!(number_to_length(7, -2), 5);
    }

    #[test]
    fn negative_wire_length_is_an_error() {
        assert_eq!(
            length_to_number(0, 1),
            Err(EoError::LengthOverflow {
                length: 0,
                offset: 1
            })
        );
    }

    #[test]
    fn negative_length_clamps_to_zero() {
        assert_eq!(number_to_length(0, -3), 0);
    }
}
