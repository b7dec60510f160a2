//! Length-prefixed packet framing.
//!
//! A frame is a 2-byte encoded length followed by that many bytes: the
//! packet action, the packet family, then the payload.

use bytestream::{decode_number, encode_number, SHORT_MAX};

use crate::error::{WireError, WireResult};

/// Size of the encoded length prefix.
pub const LENGTH_SIZE: usize = 2;

/// Largest frame body the length prefix can describe.
pub const MAX_FRAME_LEN: usize = SHORT_MAX as usize;

const ID_SIZE: usize = 2;

/// Identifies a packet by family and action byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PacketId {
    pub family: u8,
    pub action: u8,
}

impl PacketId {
    /// The connection init packet, which is never encrypted.
    pub const INIT: Self = Self::new(0xFF, 0xFF);

    #[must_use]
    pub const fn new(family: u8, action: u8) -> Self {
        Self { family, action }
    }

    /// Returns `true` for the init packet.
    pub const fn is_init(self) -> bool {
        self.family == Self::INIT.family && self.action == Self::INIT.action
    }
}

/// A decoded frame borrowing its payload from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub id: PacketId,
    pub payload: &'a [u8],
}

/// Appends a frame for `payload` to `out`.
///
/// # Errors
///
/// Returns [`WireError::FrameTooLarge`] if the payload does not fit in a
/// frame. `out` is left untouched on error.
pub fn encode_frame(id: PacketId, payload: &[u8], out: &mut Vec<u8>) -> WireResult<()> {
    let length = ID_SIZE + payload.len();
    let encoded_length = u32::try_from(length)
        .ok()
        .filter(|&length| length <= SHORT_MAX)
        .ok_or(WireError::FrameTooLarge {
            length,
            max: MAX_FRAME_LEN,
        })?;

    out.reserve(LENGTH_SIZE + length);
    out.extend_from_slice(&encode_number(encoded_length)[..LENGTH_SIZE]);
    out.push(id.action);
    out.push(id.family);
    out.extend_from_slice(payload);
    Ok(())
}

/// Decodes the first frame in `buf`.
///
/// Returns `Ok(None)` if `buf` does not yet hold a complete frame, otherwise
/// the frame and the number of bytes it occupies.
///
/// # Errors
///
/// Returns [`WireError::FrameTooShort`] if the length prefix cannot cover
/// the packet id.
pub fn decode_frame(buf: &[u8]) -> WireResult<Option<(Frame<'_>, usize)>> {
    let Some(prefix) = buf.get(..LENGTH_SIZE) else {
        return Ok(None);
    };
    let length = decode_number(prefix) as usize;
    if length < ID_SIZE {
        return Err(WireError::FrameTooShort { length });
    }

    let total = LENGTH_SIZE + length;
    let Some(body) = buf.get(LENGTH_SIZE..total) else {
        return Ok(None);
    };

    let frame = Frame {
        id: PacketId::new(body[1], body[0]),
        payload: &body[ID_SIZE..],
    };
    Ok(Some((frame, total)))
}
