//! Packet framing, encryption and sequencing for the EO network protocol.
//!
//! This crate handles what surrounds a packet payload on the wire: the length
//! prefixed frame, the byte-shuffling packet encryption, and the sequence
//! numbers clients attach to their packets. It does not know about packet
//! contents; those are produced by generated protocol types.
//!
//! # Design Principles
//!
//! - **Incremental decoding** - Incomplete input is not an error; callers
//!   buffer and retry.
//! - **In-place transforms** - Encryption works on the caller's buffer.
//! - **Caller-supplied randomness** - Sequence starts are generated from any
//!   [`rand::Rng`], so tests can be deterministic.

mod encrypt;
mod error;
mod packet;
mod sequence;

pub use encrypt::{
    decrypt_packet, deinterleave, encrypt_packet, flip_msb, interleave, server_verification_hash,
    swap_multiples,
};
pub use error::{WireError, WireResult};
pub use packet::{decode_frame, encode_frame, Frame, PacketId, LENGTH_SIZE, MAX_FRAME_LEN};
pub use sequence::{
    AccountReplySequenceStart, InitSequenceStart, PacketSequencer, PingSequenceStart,
    SequenceStart,
};
