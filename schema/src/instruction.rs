//! Layout instructions for structs and packets.

use std::fmt;

use crate::types::{LengthSpec, TypeRef};

/// The kind of an [`Instruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum InstructionKind {
    Field,
    Array,
    Length,
    Dummy,
    Switch,
    Chunked,
    Break,
}

impl InstructionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Array => "array",
            Self::Length => "length",
            Self::Dummy => "dummy",
            Self::Switch => "switch",
            Self::Chunked => "chunked",
            Self::Break => "break",
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a struct or packet layout, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Field(Field),
    Array(Array),
    Length(Length),
    Dummy(Dummy),
    Switch(Switch),
    Chunked(Chunked),
    Break,
}

impl Instruction {
    pub const fn kind(&self) -> InstructionKind {
        match self {
            Self::Field(_) => InstructionKind::Field,
            Self::Array(_) => InstructionKind::Array,
            Self::Length(_) => InstructionKind::Length,
            Self::Dummy(_) => InstructionKind::Dummy,
            Self::Switch(_) => InstructionKind::Switch,
            Self::Chunked(_) => InstructionKind::Chunked,
            Self::Break => InstructionKind::Break,
        }
    }
}

impl From<Field> for Instruction {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<Array> for Instruction {
    fn from(array: Array) -> Self {
        Self::Array(array)
    }
}

impl From<Length> for Instruction {
    fn from(length: Length) -> Self {
        Self::Length(length)
    }
}

impl From<Dummy> for Instruction {
    fn from(dummy: Dummy) -> Self {
        Self::Dummy(dummy)
    }
}

impl From<Switch> for Instruction {
    fn from(switch: Switch) -> Self {
        Self::Switch(switch)
    }
}

impl From<Chunked> for Instruction {
    fn from(chunked: Chunked) -> Self {
        Self::Chunked(chunked)
    }
}

/// A single value.
///
/// Named fields without content become members. Fields with content are
/// constants written and expected verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: Option<String>,
    pub data_type: TypeRef,
    /// Length of a string field.
    pub length: Option<LengthSpec>,
    /// Fixed-length string padded with 0xFF.
    pub padded: bool,
    pub optional: bool,
    pub comment: Option<String>,
    pub content: Option<String>,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: TypeRef) -> Self {
        Self {
            name: Some(name.into()),
            data_type,
            length: None,
            padded: false,
            optional: false,
            comment: None,
            content: None,
        }
    }

    /// Creates an unnamed field carrying fixed content.
    #[must_use]
    pub fn constant(data_type: TypeRef, content: impl Into<String>) -> Self {
        Self {
            name: None,
            content: Some(content.into()),
            ..Self::new("", data_type)
        }
    }

    #[must_use]
    pub fn with_length(mut self, length: LengthSpec) -> Self {
        self.length = Some(length);
        self
    }

    #[must_use]
    pub fn padded(mut self) -> Self {
        self.padded = true;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A sequence of values of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array {
    pub name: String,
    pub data_type: TypeRef,
    /// Element count; unbounded arrays run to the end of the data or chunk.
    pub length: Option<LengthSpec>,
    pub optional: bool,
    /// Elements are separated by break bytes.
    pub delimited: bool,
    /// A break byte follows the last element too.
    pub trailing_delimiter: bool,
    pub comment: Option<String>,
}

impl Array {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            data_type,
            length: None,
            optional: false,
            delimited: false,
            trailing_delimiter: false,
            comment: None,
        }
    }

    #[must_use]
    pub fn with_length(mut self, length: LengthSpec) -> Self {
        self.length = Some(length);
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn delimited(mut self, trailing_delimiter: bool) -> Self {
        self.delimited = true;
        self.trailing_delimiter = trailing_delimiter;
        self
    }
}

/// An integer carrying the length of a later field or array.
///
/// The wire value is the length minus `offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Length {
    pub name: String,
    pub data_type: TypeRef,
    pub optional: bool,
    pub offset: i32,
    pub comment: Option<String>,
}

impl Length {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            data_type,
            optional: false,
            offset: 0,
            comment: None,
        }
    }

    #[must_use]
    pub fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Placeholder data written only when a record would otherwise be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dummy {
    pub data_type: TypeRef,
    pub content: String,
    pub comment: Option<String>,
}

impl Dummy {
    #[must_use]
    pub fn new(data_type: TypeRef, content: impl Into<String>) -> Self {
        Self {
            data_type,
            content: content.into(),
            comment: None,
        }
    }
}

/// Selects trailing data by the value of an earlier field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    pub field: String,
    pub cases: Vec<Case>,
}

impl Switch {
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            cases: Vec::new(),
        }
    }

    #[must_use]
    pub fn case(mut self, case: Case) -> Self {
        self.cases.push(case);
        self
    }
}

/// The value a switch case matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaseValue {
    /// An enum value name or an integer literal.
    Value(String),
    Default,
}

/// One branch of a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub value: CaseValue,
    pub comment: Option<String>,
    pub instructions: Vec<Instruction>,
}

impl Case {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: CaseValue::Value(value.into()),
            comment: None,
            instructions: Vec::new(),
        }
    }

    #[must_use]
    pub const fn default_case() -> Self {
        Self {
            value: CaseValue::Default,
            comment: None,
            instructions: Vec::new(),
        }
    }

    #[must_use]
    pub fn instruction(mut self, instruction: impl Into<Instruction>) -> Self {
        self.instructions.push(instruction.into());
        self
    }
}

/// A group of instructions read in chunked mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chunked {
    pub instructions: Vec<Instruction>,
}

impl Chunked {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn instruction(mut self, instruction: impl Into<Instruction>) -> Self {
        self.instructions.push(instruction.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_kinds() {
        let field: Instruction = Field::new("x", TypeRef::new("char")).into();
        assert_eq!(field.kind(), InstructionKind::Field);
        assert_eq!(Instruction::Break.kind().as_str(), "break");
        assert_eq!(InstructionKind::Chunked.to_string(), "chunked");
    }

    #[test]
    fn constant_field_has_no_name() {
        let field = Field::constant(TypeRef::new("string"), "ok");
        assert_eq!(field.name, None);
        assert_eq!(field.content.as_deref(), Some("ok"));
    }

    #[test]
    fn builders_compose() {
        let switch = Switch::new("reply_code")
            .case(Case::new("Ok").instruction(Field::new("id", TypeRef::new("short"))))
            .case(Case::default_case());
        assert_eq!(switch.cases.len(), 2);
        assert_eq!(switch.cases[1].value, CaseValue::Default);

        let chunked = Chunked::new()
            .instruction(Field::new("name", TypeRef::new("string")))
            .instruction(Instruction::Break);
        assert_eq!(chunked.instructions.len(), 2);
    }
}
