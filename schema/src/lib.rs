//! Protocol description model for eoproto.
//!
//! This crate defines how a protocol is described before code is generated
//! for it:
//! - Enums, structs and packets built from typed instructions
//! - Raw description records and their per-kind attribute rules
//! - Cross-protocol type resolution and validation
//! - Static size calculation and deterministic protocol hashing
//!
//! # Design Principles
//!
//! - **Typed instructions** - Each instruction kind carries only its own attributes.
//! - **Validate once** - A [`ProtocolSet`] is checked when built, generators trust it.
//! - **Deterministic hashing** - The protocol hash is stable given the same layout.

mod error;
mod hash;
mod instruction;
mod protocol;
mod raw;
mod size;
mod types;
mod validate;

pub use error::{SchemaError, SchemaResult};
pub use hash::protocol_hash;
pub use instruction::{
    Array, Case, CaseValue, Chunked, Dummy, Field, Instruction, InstructionKind, Length, Switch,
};
pub use protocol::{
    EnumDef, EnumValue, PacketDef, Protocol, ProtocolSet, ResolvedType, StructDef,
};
pub use raw::{RawCase, RawEnum, RawEnumValue, RawInstruction, RawPacket, RawProtocol, RawStruct};
pub use types::{IntegerType, LengthSpec, PrimitiveType, TypeRef};
