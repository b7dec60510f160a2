//! Deterministic protocol hashing.

use blake3::Hasher;

use crate::instruction::{CaseValue, Instruction};
use crate::protocol::{EnumDef, Protocol};
use crate::types::{LengthSpec, TypeRef};

/// Computes a deterministic fingerprint of a protocol description.
///
/// Comments are excluded, so only changes that affect generated layouts
/// change the hash.
#[must_use]
pub fn protocol_hash(protocol: &Protocol) -> u64 {
    let mut hasher = Hasher::new();
    write_str(&mut hasher, &protocol.package);

    write_len(&mut hasher, protocol.enums.len());
    for def in &protocol.enums {
        write_enum(&mut hasher, def);
    }

    write_len(&mut hasher, protocol.structs.len());
    for def in &protocol.structs {
        write_str(&mut hasher, &def.name);
        write_instructions(&mut hasher, &def.instructions);
    }

    write_len(&mut hasher, protocol.packets.len());
    for def in &protocol.packets {
        write_str(&mut hasher, &def.family);
        write_str(&mut hasher, &def.action);
        write_instructions(&mut hasher, &def.instructions);
    }

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

fn write_enum(hasher: &mut Hasher, def: &EnumDef) {
    write_str(hasher, &def.name);
    write_str(hasher, &def.data_type);
    let ordinals = def.ordinals();
    write_len(hasher, ordinals.len());
    for (value, ordinal) in ordinals {
        write_str(hasher, &value.name);
        write_u32(hasher, ordinal);
    }
}

fn write_instructions(hasher: &mut Hasher, instructions: &[Instruction]) {
    write_len(hasher, instructions.len());
    for instruction in instructions {
        write_instruction(hasher, instruction);
    }
}

fn write_instruction(hasher: &mut Hasher, instruction: &Instruction) {
    match instruction {
        Instruction::Field(field) => {
            write_u8(hasher, 0);
            write_opt_str(hasher, field.name.as_deref());
            write_type(hasher, &field.data_type);
            write_length(hasher, field.length.as_ref());
            write_bool(hasher, field.padded);
            write_bool(hasher, field.optional);
            write_opt_str(hasher, field.content.as_deref());
        }
        Instruction::Array(array) => {
            write_u8(hasher, 1);
            write_str(hasher, &array.name);
            write_type(hasher, &array.data_type);
            write_length(hasher, array.length.as_ref());
            write_bool(hasher, array.optional);
            write_bool(hasher, array.delimited);
            write_bool(hasher, array.trailing_delimiter);
        }
        Instruction::Length(length) => {
            write_u8(hasher, 2);
            write_str(hasher, &length.name);
            write_type(hasher, &length.data_type);
            write_bool(hasher, length.optional);
            hasher.update(&length.offset.to_le_bytes());
        }
        Instruction::Dummy(dummy) => {
            write_u8(hasher, 3);
            write_type(hasher, &dummy.data_type);
            write_str(hasher, &dummy.content);
        }
        Instruction::Switch(switch) => {
            write_u8(hasher, 4);
            write_str(hasher, &switch.field);
            write_len(hasher, switch.cases.len());
            for case in &switch.cases {
                match &case.value {
                    CaseValue::Value(value) => {
                        write_u8(hasher, 0);
                        write_str(hasher, value);
                    }
                    CaseValue::Default => write_u8(hasher, 1),
                }
                write_instructions(hasher, &case.instructions);
            }
        }
        Instruction::Chunked(chunked) => {
            write_u8(hasher, 5);
            write_instructions(hasher, &chunked.instructions);
        }
        Instruction::Break => write_u8(hasher, 6),
    }
}

fn write_type(hasher: &mut Hasher, type_ref: &TypeRef) {
    write_str(hasher, &type_ref.to_string());
}

fn write_length(hasher: &mut Hasher, length: Option<&LengthSpec>) {
    match length {
        None => write_u8(hasher, 0),
        Some(LengthSpec::Fixed(length)) => {
            write_u8(hasher, 1);
            write_len(hasher, *length);
        }
        Some(LengthSpec::Reference(name)) => {
            write_u8(hasher, 2);
            write_str(hasher, name);
        }
    }
}

fn write_opt_str(hasher: &mut Hasher, value: Option<&str>) {
    match value {
        None => write_u8(hasher, 0),
        Some(value) => {
            write_u8(hasher, 1);
            write_str(hasher, value);
        }
    }
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_len(hasher, value.len());
    hasher.update(value.as_bytes());
}

fn write_bool(hasher: &mut Hasher, value: bool) {
    write_u8(hasher, u8::from(value));
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}

fn write_len(hasher: &mut Hasher, value: usize) {
    hasher.update(&(value as u64).to_le_bytes());
}
