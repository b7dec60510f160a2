//! Description file shapes.
//!
//! A raw instruction is a flat record: a `kind` tag plus every attribute any
//! kind may carry, all optional. Converting to the typed model checks that
//! only the attributes legal for the kind are populated and that required
//! ones are present.

use crate::error::{SchemaError, SchemaResult};
use crate::instruction::{
    Array, Case, CaseValue, Chunked, Dummy, Field, Instruction, InstructionKind, Length, Switch,
};
use crate::protocol::{EnumDef, EnumValue, PacketDef, Protocol, StructDef};
use crate::types::{LengthSpec, TypeRef};

/// A protocol description as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields, rename_all = "kebab-case")
)]
pub struct RawProtocol {
    pub package: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub comment: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enums: Vec<RawEnum>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub structs: Vec<RawStruct>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub packets: Vec<RawPacket>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields, rename_all = "kebab-case")
)]
pub struct RawEnum {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub data_type: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub comment: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub values: Vec<RawEnumValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields, rename_all = "kebab-case")
)]
pub struct RawEnumValue {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields, rename_all = "kebab-case")
)]
pub struct RawStruct {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub comment: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub instructions: Vec<RawInstruction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields, rename_all = "kebab-case")
)]
pub struct RawPacket {
    pub family: String,
    pub action: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub comment: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub instructions: Vec<RawInstruction>,
}

/// One instruction as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields, rename_all = "kebab-case")
)]
pub struct RawInstruction {
    pub kind: InstructionKind,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", default, skip_serializing_if = "Option::is_none")
    )]
    pub data_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub length: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub padded: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub optional: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub comment: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub content: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub delimited: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub trailing_delimiter: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub offset: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub field: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub cases: Option<Vec<RawCase>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub instructions: Option<Vec<RawInstruction>>,
}

/// One switch case as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(deny_unknown_fields, rename_all = "kebab-case")
)]
pub struct RawCase {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub default: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub comment: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub instructions: Vec<RawInstruction>,
}

const FIELD_ATTRIBUTES: &[&str] = &[
    "name", "type", "length", "padded", "optional", "comment", "content",
];
const ARRAY_ATTRIBUTES: &[&str] = &[
    "name",
    "type",
    "length",
    "optional",
    "delimited",
    "trailing-delimiter",
    "comment",
];
const LENGTH_ATTRIBUTES: &[&str] = &["name", "type", "optional", "offset", "comment"];
const DUMMY_ATTRIBUTES: &[&str] = &["type", "content", "comment"];
const SWITCH_ATTRIBUTES: &[&str] = &["field", "cases"];
const CHUNKED_ATTRIBUTES: &[&str] = &["instructions"];

impl RawInstruction {
    /// Creates an instruction of `kind` with no attributes.
    #[must_use]
    pub const fn new(kind: InstructionKind) -> Self {
        Self {
            kind,
            name: None,
            data_type: None,
            length: None,
            padded: None,
            optional: None,
            comment: None,
            content: None,
            delimited: None,
            trailing_delimiter: None,
            offset: None,
            field: None,
            cases: None,
            instructions: None,
        }
    }

    /// Attributes that are populated, with a rendering of their value.
    fn populated(&self) -> Vec<(&'static str, String)> {
        let mut attributes = Vec::new();
        let mut push = |attribute, value: Option<String>| {
            if let Some(value) = value {
                attributes.push((attribute, value));
            }
        };
        push("name", self.name.clone());
        push("type", self.data_type.clone());
        push("length", self.length.clone());
        push("padded", self.padded.map(|v| v.to_string()));
        push("optional", self.optional.map(|v| v.to_string()));
        push("comment", self.comment.clone());
        push("content", self.content.clone());
        push("delimited", self.delimited.map(|v| v.to_string()));
        push(
            "trailing-delimiter",
            self.trailing_delimiter.map(|v| v.to_string()),
        );
        push("offset", self.offset.map(|v| v.to_string()));
        push("field", self.field.clone());
        push(
            "cases",
            self.cases.as_ref().map(|cases| format!("{} cases", cases.len())),
        );
        push(
            "instructions",
            self.instructions
                .as_ref()
                .map(|instructions| format!("{} instructions", instructions.len())),
        );
        attributes
    }

    fn legal_attributes(&self) -> &'static [&'static str] {
        match self.kind {
            InstructionKind::Field => FIELD_ATTRIBUTES,
            InstructionKind::Array => ARRAY_ATTRIBUTES,
            InstructionKind::Length => LENGTH_ATTRIBUTES,
            InstructionKind::Dummy => DUMMY_ATTRIBUTES,
            InstructionKind::Switch => SWITCH_ATTRIBUTES,
            InstructionKind::Chunked => CHUNKED_ATTRIBUTES,
            InstructionKind::Break => &[],
        }
    }

    /// Converts to the typed model, checking attribute legality.
    pub fn into_instruction(self) -> SchemaResult<Instruction> {
        let kind = self.kind.as_str();
        let legal = self.legal_attributes();
        if let Some((attribute, value)) = self
            .populated()
            .into_iter()
            .find(|(attribute, _)| !legal.contains(attribute))
        {
            return Err(SchemaError::UnexpectedAttribute {
                kind,
                attribute,
                value,
            });
        }

        let missing = |attribute| SchemaError::MissingAttribute { kind, attribute };
        let type_ref = |data_type: Option<String>| -> SchemaResult<TypeRef> {
            data_type.ok_or_else(|| missing("type"))?.parse()
        };
        let length = |length: Option<String>| -> SchemaResult<Option<LengthSpec>> {
            length.map(|length| length.parse()).transpose()
        };

        let instruction = match self.kind {
            InstructionKind::Field => Instruction::Field(Field {
                data_type: type_ref(self.data_type)?,
                name: self.name,
                length: length(self.length)?,
                padded: self.padded.unwrap_or(false),
                optional: self.optional.unwrap_or(false),
                comment: self.comment,
                content: self.content,
            }),
            InstructionKind::Array => Instruction::Array(Array {
                name: self.name.ok_or_else(|| missing("name"))?,
                data_type: type_ref(self.data_type)?,
                length: length(self.length)?,
                optional: self.optional.unwrap_or(false),
                delimited: self.delimited.unwrap_or(false),
                trailing_delimiter: self.trailing_delimiter.unwrap_or(false),
                comment: self.comment,
            }),
            InstructionKind::Length => Instruction::Length(Length {
                name: self.name.ok_or_else(|| missing("name"))?,
                data_type: type_ref(self.data_type)?,
                optional: self.optional.unwrap_or(false),
                offset: self.offset.unwrap_or(0),
                comment: self.comment,
            }),
            InstructionKind::Dummy => Instruction::Dummy(Dummy {
                data_type: type_ref(self.data_type)?,
                content: self.content.ok_or_else(|| missing("content"))?,
                comment: self.comment,
            }),
            InstructionKind::Switch => Instruction::Switch(Switch {
                field: self.field.ok_or_else(|| missing("field"))?,
                cases: self
                    .cases
                    .ok_or_else(|| missing("cases"))?
                    .into_iter()
                    .map(RawCase::into_case)
                    .collect::<SchemaResult<_>>()?,
            }),
            InstructionKind::Chunked => Instruction::Chunked(Chunked {
                instructions: convert_instructions(
                    self.instructions.ok_or_else(|| missing("instructions"))?,
                )?,
            }),
            InstructionKind::Break => Instruction::Break,
        };
        Ok(instruction)
    }
}

impl RawCase {
    /// Converts to the typed model.
    pub fn into_case(self) -> SchemaResult<Case> {
        let value = match (self.value, self.default.unwrap_or(false)) {
            (Some(value), false) => CaseValue::Value(value),
            (None, true) => CaseValue::Default,
            (Some(value), true) => {
                return Err(SchemaError::UnexpectedAttribute {
                    kind: "default case",
                    attribute: "value",
                    value,
                });
            }
            (None, false) => {
                return Err(SchemaError::MissingAttribute {
                    kind: "case",
                    attribute: "value",
                });
            }
        };
        Ok(Case {
            value,
            comment: self.comment,
            instructions: convert_instructions(self.instructions)?,
        })
    }
}

fn convert_instructions(raw: Vec<RawInstruction>) -> SchemaResult<Vec<Instruction>> {
    raw.into_iter().map(RawInstruction::into_instruction).collect()
}

impl Protocol {
    /// Converts a description file into a structurally validated protocol.
    pub fn from_raw(raw: RawProtocol) -> SchemaResult<Self> {
        let enums = raw
            .enums
            .into_iter()
            .map(|def| EnumDef {
                name: def.name,
                data_type: def.data_type,
                comment: def.comment,
                values: def
                    .values
                    .into_iter()
                    .map(|value| EnumValue {
                        name: value.name,
                        value: value.value,
                        comment: value.comment,
                    })
                    .collect(),
            })
            .collect();
        let structs = raw
            .structs
            .into_iter()
            .map(|def| {
                Ok(StructDef {
                    name: def.name,
                    comment: def.comment,
                    instructions: convert_instructions(def.instructions)?,
                })
            })
            .collect::<SchemaResult<_>>()?;
        let packets = raw
            .packets
            .into_iter()
            .map(|def| {
                Ok(PacketDef {
                    family: def.family,
                    action: def.action,
                    comment: def.comment,
                    instructions: convert_instructions(def.instructions)?,
                })
            })
            .collect::<SchemaResult<_>>()?;

        let protocol = Self {
            package: raw.package,
            comment: raw.comment,
            enums,
            structs,
            packets,
        };
        protocol.validate()?;
        Ok(protocol)
    }
}

impl TryFrom<RawProtocol> for Protocol {
    type Error = SchemaError;

    fn try_from(raw: RawProtocol) -> SchemaResult<Self> {
        Self::from_raw(raw)
    }
}
