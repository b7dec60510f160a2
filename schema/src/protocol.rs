//! Protocol descriptions: enums, structs and packets grouped by package.

use heck::ToUpperCamelCase;

use crate::error::{SchemaError, SchemaResult};
use crate::instruction::Instruction;
use crate::types::{IntegerType, PrimitiveType, TypeRef};

/// A named value of an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    /// Explicit ordinal; defaults to the previous ordinal plus one.
    pub value: Option<u32>,
    pub comment: Option<String>,
}

impl EnumValue {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            comment: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }
}

/// An enum definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    /// Name of an integer type or of another enum.
    pub data_type: String,
    pub comment: Option<String>,
    pub values: Vec<EnumValue>,
}

impl EnumDef {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            comment: None,
            values: Vec::new(),
        }
    }

    /// Adds a value to the enum.
    #[must_use]
    pub fn value(mut self, value: EnumValue) -> Self {
        self.values.push(value);
        self
    }

    /// Returns each value with its resolved ordinal, in declaration order.
    pub fn ordinals(&self) -> Vec<(&EnumValue, u32)> {
        let mut next = 0u32;
        self.values
            .iter()
            .map(|value| {
                let ordinal = value.value.unwrap_or(next);
                next = ordinal.saturating_add(1);
                (value, ordinal)
            })
            .collect()
    }

    /// Looks up the ordinal of a value by name.
    pub fn ordinal_of(&self, name: &str) -> Option<u32> {
        self.ordinals()
            .into_iter()
            .find(|(value, _)| value.name == name)
            .map(|(_, ordinal)| ordinal)
    }
}

/// A struct definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    pub name: String,
    pub comment: Option<String>,
    pub instructions: Vec<Instruction>,
}

impl StructDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            instructions: Vec::new(),
        }
    }

    /// Adds an instruction to the struct.
    #[must_use]
    pub fn instruction(mut self, instruction: impl Into<Instruction>) -> Self {
        self.instructions.push(instruction.into());
        self
    }
}

/// A packet definition, identified by family and action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketDef {
    pub family: String,
    pub action: String,
    pub comment: Option<String>,
    pub instructions: Vec<Instruction>,
}

impl PacketDef {
    #[must_use]
    pub fn new(family: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            action: action.into(),
            comment: None,
            instructions: Vec::new(),
        }
    }

    /// Adds an instruction to the packet.
    #[must_use]
    pub fn instruction(mut self, instruction: impl Into<Instruction>) -> Self {
        self.instructions.push(instruction.into());
        self
    }

    /// The generated type name: `{Family}{Action}{Package}Packet`.
    pub fn type_name(&self, package: &str) -> String {
        format!(
            "{}{}{}Packet",
            self.family,
            self.action,
            package.to_upper_camel_case()
        )
    }
}

/// The definitions of one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    pub package: String,
    pub comment: Option<String>,
    pub enums: Vec<EnumDef>,
    pub structs: Vec<StructDef>,
    pub packets: Vec<PacketDef>,
}

impl Protocol {
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            comment: None,
            enums: Vec::new(),
            structs: Vec::new(),
            packets: Vec::new(),
        }
    }

    /// Adds an enum definition.
    #[must_use]
    pub fn enum_def(mut self, def: EnumDef) -> Self {
        self.enums.push(def);
        self
    }

    /// Adds a struct definition.
    #[must_use]
    pub fn struct_def(mut self, def: StructDef) -> Self {
        self.structs.push(def);
        self
    }

    /// Adds a packet definition.
    #[must_use]
    pub fn packet(mut self, def: PacketDef) -> Self {
        self.packets.push(def);
        self
    }

    pub fn find_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|def| def.name == name)
    }

    pub fn find_struct(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|def| def.name == name)
    }

    /// Finds a packet by its generated type name.
    pub fn find_packet(&self, type_name: &str) -> Option<&PacketDef> {
        self.packets
            .iter()
            .find(|def| def.type_name(&self.package) == type_name)
    }

    /// Type names declared by this package, in declaration order.
    pub fn type_names(&self) -> impl Iterator<Item = String> + '_ {
        self.enums
            .iter()
            .map(|def| def.name.clone())
            .chain(self.structs.iter().map(|def| def.name.clone()))
            .chain(self.packets.iter().map(|def| def.type_name(&self.package)))
    }
}

/// A type name resolved against a [`ProtocolSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedType<'a> {
    Primitive(PrimitiveType),
    Enum {
        package: &'a str,
        def: &'a EnumDef,
    },
    Struct {
        package: &'a str,
        def: &'a StructDef,
    },
}

/// A validated collection of packages whose types may refer to each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolSet {
    protocols: Vec<Protocol>,
}

impl ProtocolSet {
    /// Creates a set from packages after validation.
    pub fn new(protocols: Vec<Protocol>) -> SchemaResult<Self> {
        let set = Self { protocols };
        set.validate()?;
        Ok(set)
    }

    pub fn protocols(&self) -> &[Protocol] {
        &self.protocols
    }

    /// Looks up a package by name.
    pub fn get(&self, package: &str) -> Option<&Protocol> {
        self.protocols.iter().find(|protocol| protocol.package == package)
    }

    /// Finds an enum and the package declaring it.
    pub fn find_enum(&self, name: &str) -> Option<(&Protocol, &EnumDef)> {
        self.protocols
            .iter()
            .find_map(|protocol| protocol.find_enum(name).map(|def| (protocol, def)))
    }

    /// Finds a struct and the package declaring it.
    pub fn find_struct(&self, name: &str) -> Option<(&Protocol, &StructDef)> {
        self.protocols
            .iter()
            .find_map(|protocol| protocol.find_struct(name).map(|def| (protocol, def)))
    }

    /// Finds a packet by generated type name and the package declaring it.
    pub fn find_packet(&self, type_name: &str) -> Option<(&Protocol, &PacketDef)> {
        self.protocols
            .iter()
            .find_map(|protocol| protocol.find_packet(type_name).map(|def| (protocol, def)))
    }

    /// Resolves a type name to a primitive, enum or struct.
    pub fn resolve(&self, name: &str) -> Option<ResolvedType<'_>> {
        if let Some(primitive) = PrimitiveType::parse(name) {
            return Some(ResolvedType::Primitive(primitive));
        }
        if let Some((protocol, def)) = self.find_enum(name) {
            return Some(ResolvedType::Enum {
                package: &protocol.package,
                def,
            });
        }
        self.find_struct(name)
            .map(|(protocol, def)| ResolvedType::Struct {
                package: &protocol.package,
                def,
            })
    }

    /// Resolves the integer type backing an enum, following enum-of-enum
    /// chains.
    pub fn enum_integer_type(&self, def: &EnumDef) -> SchemaResult<IntegerType> {
        let mut current = def;
        let mut seen = vec![def.name.as_str()];
        loop {
            if let Some(integer) = IntegerType::parse(&current.data_type) {
                return Ok(integer);
            }
            let next = self
                .find_enum(&current.data_type)
                .map(|(_, next)| next)
                .filter(|next| !seen.contains(&next.name.as_str()))
                .ok_or_else(|| SchemaError::InvalidEnumType {
                    enum_name: def.name.clone(),
                    data_type: current.data_type.clone(),
                })?;
            seen.push(&next.name);
            current = next;
        }
    }

    /// The integer type a value of `type_ref` is carried as, for integers,
    /// bools and enums.
    ///
    /// Bools are carried as `char` unless overridden.
    pub fn integer_type(&self, type_ref: &TypeRef) -> Option<IntegerType> {
        if type_ref.width.is_some() {
            return type_ref.width;
        }
        match self.resolve(&type_ref.name)? {
            ResolvedType::Primitive(PrimitiveType::Integer(integer)) => Some(integer),
            ResolvedType::Primitive(PrimitiveType::Bool) => Some(IntegerType::Char),
            ResolvedType::Enum { def, .. } => self.enum_integer_type(def).ok(),
            ResolvedType::Primitive(_) | ResolvedType::Struct { .. } => None,
        }
    }
}
