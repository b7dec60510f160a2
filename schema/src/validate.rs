//! Structural and cross-reference validation.
//!
//! [`Protocol::validate`] checks a single package in isolation. The
//! [`ProtocolSet::validate`] pass additionally resolves every type, length
//! and switch reference against all packages in the set. Both fail on the
//! first violation and have no side effects.

use std::collections::{HashMap, HashSet};

use crate::error::{SchemaError, SchemaResult};
use crate::instruction::{CaseValue, Field, Instruction, Switch};
use crate::protocol::{EnumDef, Protocol, ProtocolSet, ResolvedType};
use crate::types::{LengthSpec, PrimitiveType, TypeRef};

fn require(value: &str, kind: &'static str, attribute: &'static str) -> SchemaResult<()> {
    if value.is_empty() {
        return Err(SchemaError::MissingAttribute { kind, attribute });
    }
    Ok(())
}

fn insert_unique<'a>(names: &mut HashSet<&'a str>, scope: &str, name: &'a str) -> SchemaResult<()> {
    if !names.insert(name) {
        return Err(SchemaError::DuplicateName {
            scope: scope.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

impl Protocol {
    /// Checks the package's structure without resolving references.
    ///
    /// Every instruction at every depth is visited: required attributes are
    /// non-empty, unnamed fields carry content, breaks and delimited arrays
    /// sit inside chunked groups, default cases come last, and names are
    /// unique within their scope.
    pub fn validate(&self) -> SchemaResult<()> {
        require(&self.package, "protocol", "package")?;
        let scope = format!("package `{}`", self.package);

        let packet_names: Vec<String> = self
            .packets
            .iter()
            .map(|def| def.type_name(&self.package))
            .collect();

        let mut type_names = HashSet::new();
        for def in &self.enums {
            require(&def.name, "enum", "name")?;
            insert_unique(&mut type_names, &scope, &def.name)?;
            validate_enum(def)?;
        }
        for def in &self.structs {
            require(&def.name, "struct", "name")?;
            insert_unique(&mut type_names, &scope, &def.name)?;
            let scope = format!("struct `{}`", def.name);
            check_layout(&scope, &def.instructions, false, &mut HashSet::new())?;
        }
        for (def, type_name) in self.packets.iter().zip(&packet_names) {
            require(&def.family, "packet", "family")?;
            require(&def.action, "packet", "action")?;
            insert_unique(&mut type_names, &scope, type_name)?;
            let scope = format!("packet `{type_name}`");
            check_layout(&scope, &def.instructions, false, &mut HashSet::new())?;
        }
        Ok(())
    }
}

fn validate_enum(def: &EnumDef) -> SchemaResult<()> {
    require(&def.data_type, "enum", "type")?;
    let scope = format!("enum `{}`", def.name);

    let mut names = HashSet::new();
    let mut ordinals = HashSet::new();
    for (value, ordinal) in def.ordinals() {
        require(&value.name, "enum value", "name")?;
        insert_unique(&mut names, &scope, &value.name)?;
        if !ordinals.insert(ordinal) {
            return Err(SchemaError::DuplicateEnumValue {
                enum_name: def.name.clone(),
                value: ordinal,
            });
        }
    }
    Ok(())
}

fn check_layout<'a>(
    scope: &str,
    instructions: &'a [Instruction],
    in_chunked: bool,
    members: &mut HashSet<&'a str>,
) -> SchemaResult<()> {
    for instruction in instructions {
        match instruction {
            Instruction::Field(field) => {
                require(&field.data_type.name, "field", "type")?;
                match (&field.name, &field.content) {
                    (Some(name), _) => {
                        require(name, "field", "name")?;
                        insert_unique(members, scope, name)?;
                    }
                    (None, None) => {
                        return Err(SchemaError::UnnamedFieldWithoutContent {
                            scope: scope.to_string(),
                            type_name: field.data_type.to_string(),
                        });
                    }
                    (None, Some(_)) => {}
                }
            }
            Instruction::Array(array) => {
                require(&array.name, "array", "name")?;
                require(&array.data_type.name, "array", "type")?;
                if array.delimited && !in_chunked {
                    return Err(SchemaError::MisplacedBreak {
                        scope: scope.to_string(),
                        kind: "delimited array",
                    });
                }
                insert_unique(members, scope, &array.name)?;
            }
            Instruction::Length(length) => {
                require(&length.name, "length", "name")?;
                require(&length.data_type.name, "length", "type")?;
                insert_unique(members, scope, &length.name)?;
            }
            Instruction::Dummy(dummy) => {
                require(&dummy.data_type.name, "dummy", "type")?;
                require(&dummy.content, "dummy", "content")?;
            }
            Instruction::Switch(switch) => {
                check_switch(scope, switch, in_chunked)?;
            }
            Instruction::Chunked(chunked) => {
                if chunked.instructions.is_empty() {
                    return Err(SchemaError::MissingAttribute {
                        kind: "chunked",
                        attribute: "instructions",
                    });
                }
                check_layout(scope, &chunked.instructions, true, members)?;
            }
            Instruction::Break => {
                if !in_chunked {
                    return Err(SchemaError::MisplacedBreak {
                        scope: scope.to_string(),
                        kind: "break",
                    });
                }
            }
        }
    }
    Ok(())
}

fn check_switch(scope: &str, switch: &Switch, in_chunked: bool) -> SchemaResult<()> {
    require(&switch.field, "switch", "field")?;
    if switch.cases.is_empty() {
        return Err(SchemaError::MissingAttribute {
            kind: "switch",
            attribute: "cases",
        });
    }
    let last = switch.cases.len() - 1;
    let mut values = HashSet::new();
    for (index, case) in switch.cases.iter().enumerate() {
        let label = match &case.value {
            CaseValue::Value(value) => {
                require(value, "case", "value")?;
                insert_unique(&mut values, scope, value)?;
                value.as_str()
            }
            CaseValue::Default => {
                if index != last {
                    return Err(SchemaError::MisplacedDefaultCase {
                        scope: scope.to_string(),
                        field: switch.field.clone(),
                    });
                }
                "default"
            }
        };
        let case_scope = format!("case `{label}` of switch on `{}` in {scope}", switch.field);
        check_layout(&case_scope, &case.instructions, in_chunked, &mut HashSet::new())?;
    }
    Ok(())
}

impl ProtocolSet {
    /// Validates every package, then resolves all cross references.
    ///
    /// Types must resolve, width overrides apply only to enums and bools,
    /// enum backing types are integers, length references name an earlier
    /// length instruction in the same scope, switches name an earlier
    /// integer or enum field in the same scope, and case values and fixed
    /// content parse for their types.
    pub fn validate(&self) -> SchemaResult<()> {
        let scope = "protocol set";
        let mut packages = HashSet::new();
        let mut type_names = HashSet::new();
        for protocol in self.protocols() {
            protocol.validate()?;
            insert_unique(&mut packages, scope, &protocol.package)?;
            for name in protocol.type_names() {
                if !type_names.insert(name.clone()) {
                    return Err(SchemaError::DuplicateName {
                        scope: scope.to_string(),
                        name,
                    });
                }
            }
        }

        for protocol in self.protocols() {
            for def in &protocol.enums {
                self.enum_integer_type(def)?;
            }
            for def in &protocol.structs {
                let scope = format!("struct `{}`", def.name);
                References::new(self, scope).check(&def.instructions)?;
            }
            for def in &protocol.packets {
                let scope = format!("packet `{}`", def.type_name(&protocol.package));
                References::new(self, scope).check(&def.instructions)?;
            }
        }
        Ok(())
    }

    /// Parses fixed content of an integer, bool or enum type as a number.
    ///
    /// Enum content may be a value name or an ordinal.
    pub fn content_value(&self, type_ref: &TypeRef, content: &str) -> Option<u32> {
        let max = self.integer_type(type_ref)?.max_value();
        let value = match self.resolve(&type_ref.name)? {
            ResolvedType::Enum { def, .. } => def
                .ordinal_of(content)
                .or_else(|| content.parse().ok())?,
            ResolvedType::Primitive(PrimitiveType::Integer(_) | PrimitiveType::Bool) => {
                content.parse().ok()?
            }
            ResolvedType::Primitive(_) | ResolvedType::Struct { .. } => return None,
        };
        (value <= max).then_some(value)
    }
}

/// Cross-reference checks for one record scope.
struct References<'s, 'a> {
    set: &'s ProtocolSet,
    scope: String,
    lengths: HashSet<&'a str>,
    fields: HashMap<&'a str, &'a TypeRef>,
}

impl<'s, 'a> References<'s, 'a> {
    fn new(set: &'s ProtocolSet, scope: String) -> Self {
        Self {
            set,
            scope,
            lengths: HashSet::new(),
            fields: HashMap::new(),
        }
    }

    fn check(&mut self, instructions: &'a [Instruction]) -> SchemaResult<()> {
        for instruction in instructions {
            match instruction {
                Instruction::Field(field) => self.check_field(field)?,
                Instruction::Array(array) => {
                    let resolved = self.check_type(&array.data_type)?;
                    if resolved == ResolvedType::Primitive(PrimitiveType::Blob) {
                        return Err(self.unknown_type(&array.data_type));
                    }
                    self.check_length_reference(array.length.as_ref())?;
                }
                Instruction::Length(length) => {
                    let resolved = self.check_type(&length.data_type)?;
                    if !matches!(
                        resolved,
                        ResolvedType::Primitive(PrimitiveType::Integer(_))
                    ) || length.data_type.width.is_some()
                    {
                        return Err(SchemaError::InvalidLengthType {
                            scope: self.scope.clone(),
                            type_name: length.data_type.to_string(),
                        });
                    }
                    self.lengths.insert(&length.name);
                }
                Instruction::Dummy(dummy) => {
                    let resolved = self.check_type(&dummy.data_type)?;
                    self.check_content(&dummy.data_type, resolved, &dummy.content, None)?;
                }
                Instruction::Switch(switch) => self.check_switch(switch)?,
                Instruction::Chunked(chunked) => self.check(&chunked.instructions)?,
                Instruction::Break => {}
            }
        }
        Ok(())
    }

    fn check_field(&mut self, field: &'a Field) -> SchemaResult<()> {
        let resolved = self.check_type(&field.data_type)?;
        let is_string = matches!(resolved, ResolvedType::Primitive(p) if p.is_string());

        if let Some(length) = &field.length {
            if !is_string {
                return Err(SchemaError::UnexpectedAttribute {
                    kind: "field",
                    attribute: "length",
                    value: length.to_string(),
                });
            }
            self.check_length_reference(Some(length))?;
        }

        match (&field.name, &field.content) {
            (_, Some(content)) => {
                let fixed = field
                    .length
                    .as_ref()
                    .and_then(LengthSpec::fixed)
                    .map(|length| (length, field.padded));
                self.check_content(&field.data_type, resolved, content, fixed)?;
            }
            (Some(name), None) => {
                self.fields.insert(name, &field.data_type);
            }
            (None, None) => {}
        }
        Ok(())
    }

    fn check_type(&self, type_ref: &TypeRef) -> SchemaResult<ResolvedType<'s>> {
        let resolved = self
            .set
            .resolve(&type_ref.name)
            .ok_or_else(|| self.unknown_type(type_ref))?;
        let overridable = matches!(
            resolved,
            ResolvedType::Enum { .. } | ResolvedType::Primitive(PrimitiveType::Bool)
        );
        if type_ref.width.is_some() && !overridable {
            return Err(SchemaError::InvalidTypeOverride {
                scope: self.scope.clone(),
                type_name: type_ref.to_string(),
            });
        }
        Ok(resolved)
    }

    fn unknown_type(&self, type_ref: &TypeRef) -> SchemaError {
        SchemaError::UnknownType {
            scope: self.scope.clone(),
            type_name: type_ref.to_string(),
        }
    }

    fn check_length_reference(&self, length: Option<&LengthSpec>) -> SchemaResult<()> {
        if let Some(LengthSpec::Reference(name)) = length {
            if !self.lengths.contains(name.as_str()) {
                return Err(SchemaError::UnknownLengthReference {
                    scope: self.scope.clone(),
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_content(
        &self,
        type_ref: &TypeRef,
        resolved: ResolvedType<'_>,
        content: &str,
        fixed_length: Option<(usize, bool)>,
    ) -> SchemaResult<()> {
        let valid = match resolved {
            ResolvedType::Primitive(primitive) if primitive.is_string() => {
                match fixed_length {
                    Some((length, true)) => content.chars().count() <= length,
                    Some((length, false)) => content.chars().count() == length,
                    None => true,
                }
            }
            ResolvedType::Primitive(PrimitiveType::Blob) | ResolvedType::Struct { .. } => false,
            ResolvedType::Primitive(_) | ResolvedType::Enum { .. } => {
                self.set.content_value(type_ref, content).is_some()
            }
        };
        if !valid {
            return Err(SchemaError::InvalidContent {
                scope: self.scope.clone(),
                type_name: type_ref.to_string(),
                content: content.to_string(),
            });
        }
        Ok(())
    }

    fn check_switch(&self, switch: &'a Switch) -> SchemaResult<()> {
        let unknown_field = || SchemaError::UnknownSwitchField {
            scope: self.scope.clone(),
            field: switch.field.clone(),
        };
        let type_ref = *self.fields.get(switch.field.as_str()).ok_or_else(unknown_field)?;
        let enum_def = match self.set.resolve(&type_ref.name) {
            Some(ResolvedType::Enum { def, .. }) => Some(def),
            Some(ResolvedType::Primitive(PrimitiveType::Integer(_))) => None,
            _ => return Err(unknown_field()),
        };

        for case in &switch.cases {
            let label = match &case.value {
                CaseValue::Value(value) => {
                    let valid = match enum_def {
                        Some(def) => def.ordinal_of(value).is_some(),
                        None => value.parse::<u32>().is_ok(),
                    };
                    if !valid {
                        return Err(SchemaError::InvalidCaseValue {
                            scope: self.scope.clone(),
                            field: switch.field.clone(),
                            value: value.clone(),
                        });
                    }
                    value.as_str()
                }
                CaseValue::Default => "default",
            };

            let scope = format!(
                "case `{label}` of switch on `{}` in {}",
                switch.field, self.scope
            );
            References::new(self.set, scope).check(&case.instructions)?;
        }
        Ok(())
    }
}
