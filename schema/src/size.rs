//! Static size calculation.

use crate::error::{SchemaError, SchemaResult};
use crate::instruction::Instruction;
use crate::protocol::{ProtocolSet, ResolvedType};
use crate::types::{LengthSpec, PrimitiveType, TypeRef};

impl ProtocolSet {
    /// Calculates the number of bytes every value of a type occupies.
    ///
    /// `type_name` may carry a width override (`Direction:short`). Chunked
    /// groups are flattened into their parent, each break adds one byte, and
    /// fixed-count arrays add `count * element size` plus their delimiters.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnresolvableSize`] if any member has no static
    /// size, and [`SchemaError::RecursiveType`] if a struct contains itself.
    pub fn calculate_type_size(&self, type_name: &str) -> SchemaResult<usize> {
        let type_ref: TypeRef = type_name.parse()?;
        SizeCalculator {
            set: self,
            root: type_name,
            visiting: Vec::new(),
        }
        .type_size(&type_ref, None)
    }
}

struct SizeCalculator<'s, 'r> {
    set: &'s ProtocolSet,
    root: &'r str,
    visiting: Vec<&'s str>,
}

impl<'s> SizeCalculator<'s, '_> {
    fn unresolvable(&self, reason: String) -> SchemaError {
        SchemaError::UnresolvableSize {
            type_name: self.root.to_string(),
            reason,
        }
    }

    fn overflow(&self) -> SchemaError {
        self.unresolvable("size overflows usize".to_string())
    }

    fn type_size(&mut self, type_ref: &TypeRef, length: Option<&LengthSpec>) -> SchemaResult<usize> {
        if let Some(width) = type_ref.width {
            return Ok(width.width());
        }

        let set = self.set;
        let resolved = set
            .resolve(&type_ref.name)
            .ok_or_else(|| SchemaError::UnknownType {
                scope: format!("size of `{}`", self.root),
                type_name: type_ref.to_string(),
            })?;

        match resolved {
            ResolvedType::Primitive(PrimitiveType::Integer(integer)) => Ok(integer.width()),
            ResolvedType::Primitive(PrimitiveType::Bool) => Ok(1),
            ResolvedType::Primitive(PrimitiveType::String | PrimitiveType::EncodedString) => {
                match length {
                    Some(LengthSpec::Fixed(length)) => Ok(*length),
                    _ => Err(self.unresolvable(format!("`{type_ref}` has no fixed length"))),
                }
            }
            ResolvedType::Primitive(PrimitiveType::Blob) => {
                Err(self.unresolvable("`blob` runs to the end of the data".to_string()))
            }
            ResolvedType::Enum { def, .. } => Ok(set.enum_integer_type(def)?.width()),
            ResolvedType::Struct { def, .. } => {
                if self.visiting.contains(&def.name.as_str()) {
                    return Err(SchemaError::RecursiveType {
                        type_name: def.name.clone(),
                    });
                }
                self.visiting.push(&def.name);
                let size = self.instructions_size(&def.instructions);
                self.visiting.pop();
                size
            }
        }
    }

    fn instructions_size(&mut self, instructions: &'s [Instruction]) -> SchemaResult<usize> {
        let mut size: usize = 0;
        for instruction in instructions {
            let instruction_size = match instruction {
                Instruction::Field(field) => {
                    self.type_size(&field.data_type, field.length.as_ref())?
                }
                Instruction::Length(length) => self.type_size(&length.data_type, None)?,
                Instruction::Dummy(dummy) => {
                    let content = LengthSpec::Fixed(dummy.content.chars().count());
                    self.type_size(&dummy.data_type, Some(&content))?
                }
                Instruction::Array(array) => {
                    let Some(count) = array.length.as_ref().and_then(LengthSpec::fixed) else {
                        return Err(self.unresolvable(format!(
                            "array `{}` has no fixed length",
                            array.name
                        )));
                    };
                    let delimiters = match (array.delimited, array.trailing_delimiter) {
                        (false, _) => 0,
                        (true, true) => count,
                        (true, false) => count.saturating_sub(1),
                    };
                    let element = self.type_size(&array.data_type, None)?;
                    count
                        .checked_mul(element)
                        .and_then(|elements| elements.checked_add(delimiters))
                        .ok_or_else(|| self.overflow())?
                }
                Instruction::Switch(switch) => {
                    return Err(self.unresolvable(format!(
                        "switch on `{}` selects data of varying size",
                        switch.field
                    )));
                }
                Instruction::Chunked(chunked) => self.instructions_size(&chunked.instructions)?,
                Instruction::Break => 1,
            };
            size = size
                .checked_add(instruction_size)
                .ok_or_else(|| self.overflow())?;
        }
        Ok(size)
    }
}
