//! Struct, packet and switch case emission.
//!
//! A record is any type built from instructions: a struct, a packet, or the
//! data of one switch case. Every record gets a Rust struct holding its
//! members and an `EoSerialize` impl reading and writing its instructions in
//! declaration order.

use std::collections::HashMap;

use heck::ToUpperCamelCase;
use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote};
use schema::{
    Array, CaseValue, Dummy, Field, Instruction, IntegerType, Length, LengthSpec, PrimitiveType,
    ResolvedType, SchemaError, Switch, TypeRef,
};

use crate::error::CodegenResult;
use crate::generator::Context;
use crate::naming::{case_suffix, member_ident, type_ident, variant_ident};

/// The family and action values of a packet.
pub(crate) struct PacketIds {
    pub family_type: TokenStream,
    pub family: TokenStream,
    pub action_type: TokenStream,
    pub action: TokenStream,
}

/// A type built from instructions.
pub(crate) struct Record<'p> {
    pub name: String,
    pub comment: Option<&'p str>,
    pub instructions: &'p [Instruction],
    pub packet: Option<PacketIds>,
}

/// Emits a record's struct, its `EoSerialize` impl and the types of its
/// switch cases.
pub(crate) fn generate_record(ctx: &Context<'_>, record: &Record<'_>) -> CodegenResult<TokenStream> {
    let mut emitter = RecordEmitter::new(ctx, &record.name, record.instructions);
    emitter.instructions(record.instructions)?;
    Ok(emitter.finish(record))
}

/// How a value of some type is carried.
enum ValueKind {
    Byte,
    Integer(IntegerType),
    Bool(IntegerType),
    Enum { path: TokenStream, width: IntegerType },
    String { encoded: bool },
    Blob,
    Struct(TokenStream),
}

/// Members declared in one record, flattened across chunked groups.
#[derive(Default)]
struct Scope<'p> {
    lengths: HashMap<&'p str, bool>,
    fields: HashMap<&'p str, &'p Field>,
}

impl<'p> Scope<'p> {
    fn collect(&mut self, instructions: &'p [Instruction]) {
        for instruction in instructions {
            match instruction {
                Instruction::Length(length) => {
                    self.lengths.insert(&length.name, length.optional);
                }
                Instruction::Field(field) => {
                    if let Some(name) = &field.name {
                        self.fields.insert(name, field);
                    }
                }
                Instruction::Chunked(chunked) => self.collect(&chunked.instructions),
                _ => {}
            }
        }
    }
}

/// Which side of the record a length expression is evaluated on.
#[derive(Clone, Copy)]
enum Side {
    Write,
    Read,
}

struct RecordEmitter<'c, 'p> {
    ctx: &'c Context<'c>,
    owner: String,
    scope: Scope<'p>,
    members: Vec<TokenStream>,
    member_idents: Vec<Ident>,
    write: Vec<TokenStream>,
    read: Vec<TokenStream>,
    extra: Vec<TokenStream>,
    chunked_groups: usize,
    has_dummy: bool,
}

impl<'c, 'p> RecordEmitter<'c, 'p> {
    fn new(ctx: &'c Context<'c>, owner: &str, instructions: &'p [Instruction]) -> Self {
        let mut scope = Scope::default();
        scope.collect(instructions);
        Self {
            ctx,
            owner: owner.to_string(),
            scope,
            members: Vec::new(),
            member_idents: Vec::new(),
            write: Vec::new(),
            read: Vec::new(),
            extra: Vec::new(),
            chunked_groups: 0,
            has_dummy: false,
        }
    }

    fn instructions(&mut self, instructions: &'p [Instruction]) -> CodegenResult<()> {
        for instruction in instructions {
            match instruction {
                Instruction::Field(field) => self.field(field)?,
                Instruction::Array(array) => self.array(array)?,
                Instruction::Length(length) => self.length(length)?,
                Instruction::Dummy(dummy) => self.dummy(dummy)?,
                Instruction::Switch(switch) => self.switch(switch)?,
                Instruction::Chunked(chunked) => {
                    let index = self.chunked_groups;
                    self.chunked_groups += 1;
                    let sanitize = format_ident!("__sanitize_{}", index);
                    let chunked_mode = format_ident!("__chunked_{}", index);
                    self.write.push(quote! {
                        let #sanitize = writer.sanitize_strings();
                        writer.set_sanitize_strings(true);
                    });
                    self.read.push(quote! {
                        let #chunked_mode = reader.is_chunked();
                        reader.set_chunked_reading_mode(true);
                    });
                    self.instructions(&chunked.instructions)?;
                    self.write
                        .push(quote!(writer.set_sanitize_strings(#sanitize);));
                    self.read
                        .push(quote!(reader.set_chunked_reading_mode(#chunked_mode);));
                }
                Instruction::Break => {
                    self.write.push(quote!(writer.add_break();));
                    self.read.push(quote!(reader.next_chunk()?;));
                }
            }
        }
        Ok(())
    }

    fn member(&mut self, name: &str, ty: TokenStream, comment: Option<&str>) -> Ident {
        let ident = member_ident(name);
        let doc = comment.map(|comment| quote!(#[doc = #comment]));
        self.members.push(quote! {
            #doc
            pub #ident: #ty,
        });
        self.member_idents.push(ident.clone());
        ident
    }

    fn field(&mut self, field: &'p Field) -> CodegenResult<()> {
        if let Some(content) = &field.content {
            let length = field
                .length
                .clone()
                .unwrap_or(LengthSpec::Fixed(content.chars().count()));
            let (write, read) = self.constant(&field.data_type, content, &length, field.padded)?;
            self.write.push(write);
            self.read.push(read);
            return Ok(());
        }
        let Some(name) = &field.name else {
            return Err(SchemaError::UnnamedFieldWithoutContent {
                scope: self.owner.clone(),
                type_name: field.data_type.to_string(),
            }
            .into());
        };

        let kind = self.classify(&field.data_type)?;
        let ty = rust_type(&kind);
        let ty = if field.optional {
            quote!(::core::option::Option<#ty>)
        } else {
            ty
        };
        let ident = self.member(name, ty, field.comment.as_deref());

        let write_length = self.length_expr(field.length.as_ref(), Side::Write);
        let read_length = self.length_expr(field.length.as_ref(), Side::Read);
        if field.optional {
            let write = self.write_value(&kind, &quote!(*value), write_length.as_ref(), field.padded);
            self.write.push(quote! {
                if let ::core::option::Option::Some(value) = &self.#ident {
                    #write
                }
            });
            let read = self.read_value(&kind, read_length.as_ref(), field.padded);
            self.read.push(quote! {
                let #ident = if reader.remaining() > 0 {
                    ::core::option::Option::Some(#read)
                } else {
                    ::core::option::Option::None
                };
            });
        } else {
            let write = self.write_value(&kind, &quote!(self.#ident), write_length.as_ref(), field.padded);
            self.write.push(write);
            let read = self.read_value(&kind, read_length.as_ref(), field.padded);
            self.read.push(quote!(let #ident = #read;));
        }
        Ok(())
    }

    fn array(&mut self, array: &'p Array) -> CodegenResult<()> {
        let ctx = self.ctx;
        let rt = &ctx.runtime;
        let kind = self.classify(&array.data_type)?;
        let element = rust_type(&kind);
        let ty = if array.optional {
            quote!(::core::option::Option<::std::vec::Vec<#element>>)
        } else {
            quote!(::std::vec::Vec<#element>)
        };
        let ident = self.member(&array.name, ty, array.comment.as_deref());
        let name = array.name.as_str();

        // Writing
        let check = self
            .length_expr(array.length.as_ref(), Side::Write)
            .map(|expected| {
                quote! {
                    if items.len() != #expected {
                        return ::core::result::Result::Err(#rt::EoError::InvalidLength {
                            name: #name,
                            expected: #expected,
                            actual: items.len(),
                        });
                    }
                }
            });
        let write_item = self.write_value(&kind, &quote!(*item), None, false);
        let write_loop = match (array.delimited, array.trailing_delimiter) {
            (false, _) => quote! {
                for item in items {
                    #write_item
                }
            },
            (true, true) => quote! {
                for item in items {
                    #write_item
                    writer.add_break();
                }
            },
            (true, false) => quote! {
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        writer.add_break();
                    }
                    #write_item
                }
            },
        };
        let write_items = quote! {
            #check
            #write_loop
        };
        self.write.push(if array.optional {
            quote! {
                if let ::core::option::Option::Some(items) = &self.#ident {
                    #write_items
                }
            }
        } else {
            quote! {
                {
                    let items = &self.#ident;
                    #write_items
                }
            }
        });

        // Reading
        let read_item = self.read_value(&kind, None, false);
        let read_items = match self.length_expr(array.length.as_ref(), Side::Read) {
            Some(count) => {
                let delimiter = match (array.delimited, array.trailing_delimiter) {
                    (false, _) => None,
                    (true, true) => Some(quote!(reader.next_chunk()?;)),
                    (true, false) => Some(quote! {
                        if index + 1 < count {
                            reader.next_chunk()?;
                        }
                    }),
                };
                let index = if array.delimited && !array.trailing_delimiter {
                    quote!(index)
                } else {
                    quote!(_)
                };
                quote! {
                    let count = #count;
                    let mut items = ::std::vec::Vec::new();
                    for #index in 0..count {
                        items.push(#read_item);
                        #delimiter
                    }
                    items
                }
            }
            None if array.delimited => quote! {
                let mut items = ::std::vec::Vec::new();
                while reader.remaining() > 0 {
                    items.push(#read_item);
                    reader.next_chunk()?;
                }
                items
            },
            None => {
                let size = self.element_size(&array.data_type)?;
                quote! {
                    let count = reader.remaining() / #size;
                    let mut items = ::std::vec::Vec::new();
                    for _ in 0..count {
                        items.push(#read_item);
                    }
                    items
                }
            }
        };
        self.read.push(if array.optional {
            quote! {
                let #ident = if reader.remaining() > 0 {
                    ::core::option::Option::Some({ #read_items })
                } else {
                    ::core::option::Option::None
                };
            }
        } else {
            quote!(let #ident = { #read_items };)
        });
        Ok(())
    }

    fn length(&mut self, length: &'p Length) -> CodegenResult<()> {
        let ctx = self.ctx;
        let rt = &ctx.runtime;
        let width = self.integer_width(&length.data_type)?;
        let ty = if length.optional {
            quote!(::core::option::Option<usize>)
        } else {
            quote!(usize)
        };
        let ident = self.member(&length.name, ty, length.comment.as_deref());
        let offset = offset_literal(length.offset);

        let number = quote!(#rt::length_to_number(value, #offset)?);
        let write = write_integer(width, &number);
        let read = read_integer(width);
        if length.optional {
            self.write.push(quote! {
                if let ::core::option::Option::Some(value) = self.#ident {
                    #write
                }
            });
            self.read.push(quote! {
                let #ident = if reader.remaining() > 0 {
                    ::core::option::Option::Some(#rt::number_to_length(#read, #offset))
                } else {
                    ::core::option::Option::None
                };
            });
        } else {
            self.write.push(quote! {
                {
                    let value = self.#ident;
                    #write
                }
            });
            self.read
                .push(quote!(let #ident = #rt::number_to_length(#read, #offset);));
        }
        Ok(())
    }

    fn dummy(&mut self, dummy: &Dummy) -> CodegenResult<()> {
        self.has_dummy = true;
        let length = LengthSpec::Fixed(dummy.content.chars().count());
        let (write, read) = self.constant(&dummy.data_type, &dummy.content, &length, false)?;
        self.write.push(quote! {
            if writer.len() == __start {
                #write
            }
        });
        self.read.push(quote! {
            if reader.position() == __start {
                #read
            }
        });
        Ok(())
    }

    fn switch(&mut self, switch: &'p Switch) -> CodegenResult<()> {
        let ctx = self.ctx;
        let rt = &ctx.runtime;
        let field = *self.scope.fields.get(switch.field.as_str()).ok_or_else(|| {
            SchemaError::UnknownSwitchField {
                scope: self.owner.clone(),
                field: switch.field.clone(),
            }
        })?;
        let field_ident = member_ident(&switch.field);
        let kind = self.classify(&field.data_type)?;

        let data_name = format!("{}{}Data", self.owner, switch.field.to_upper_camel_case());
        let data_ident = type_ident(&data_name);
        let data_member = self.member(
            &format!("{}_data", switch.field),
            quote!(::core::option::Option<#data_ident>),
            None,
        );
        let owner = self.owner.as_str();
        let field_name = switch.field.as_str();

        let mut variants = Vec::new();
        let mut write_arms = Vec::new();
        let mut read_arms = Vec::new();
        let mut has_default = false;
        for case in &switch.cases {
            let pattern = match &case.value {
                CaseValue::Value(value) => self.case_pattern(&kind, &field.data_type, value)?,
                CaseValue::Default => {
                    has_default = true;
                    quote!(_)
                }
            };
            if case.instructions.is_empty() {
                write_arms.push(quote!(#pattern => {}));
                read_arms.push(quote!(#pattern => ::core::option::Option::None,));
                continue;
            }

            let suffix = case_suffix(&case.value);
            let case_name = format!("{data_name}{suffix}");
            let case_ident = type_ident(&case_name);
            let doc = case.comment.as_deref().map(|comment| quote!(#[doc = #comment]));
            variants.push(quote! {
                #doc
                #suffix(#case_ident),
            });
            self.extra.push(generate_record(
                ctx,
                &Record {
                    name: case_name,
                    comment: case.comment.as_deref(),
                    instructions: &case.instructions,
                    packet: None,
                },
            )?);
            write_arms.push(quote! {
                #pattern => match &self.#data_member {
                    ::core::option::Option::Some(#data_ident::#suffix(data)) => {
                        #rt::EoSerialize::serialize(data, &mut *writer)?;
                    }
                    _ => {
                        return ::core::result::Result::Err(#rt::EoError::MissingSwitchData {
                            type_name: #owner,
                            field: #field_name,
                        });
                    }
                },
            });
            read_arms.push(quote! {
                #pattern => ::core::option::Option::Some(#data_ident::#suffix(
                    <#case_ident as #rt::EoSerialize>::deserialize(&mut *reader)?,
                )),
            });
        }
        if !has_default {
            write_arms.push(quote!(_ => {}));
            read_arms.push(quote!(_ => ::core::option::Option::None,));
        }

        let data_doc = format!("Data selected by `{owner}.{field_name}`.");
        self.extra.push(quote! {
            #[doc = #data_doc]
            #[derive(Debug, Clone, PartialEq, Eq)]
            pub enum #data_ident {
                #(#variants)*
            }
        });

        let (write_key, read_key) = if field.optional {
            (
                quote!(self.#field_ident.unwrap_or_default()),
                quote!(#field_ident.unwrap_or_default()),
            )
        } else {
            (quote!(self.#field_ident), quote!(#field_ident))
        };
        self.write.push(quote! {
            match #write_key {
                #(#write_arms)*
            }
        });
        self.read.push(quote! {
            let #data_member = match #read_key {
                #(#read_arms)*
            };
        });
        Ok(())
    }

    fn finish(self, record: &Record<'_>) -> TokenStream {
        let rt = &self.ctx.runtime;
        let name = type_ident(&record.name);
        let doc = record.comment.map(|comment| quote!(#[doc = #comment]));
        let members = &self.members;
        let member_idents = &self.member_idents;
        let write = &self.write;
        let read = &self.read;
        let extra = &self.extra;

        let (write_start, read_start) = if self.has_dummy {
            (
                quote!(let __start = writer.len();),
                quote!(let __start = reader.position();),
            )
        } else {
            (TokenStream::new(), TokenStream::new())
        };
        let serialize = if write.is_empty() {
            quote! {
                fn serialize(&self, _writer: &mut #rt::EoWriter) -> #rt::EoResult<()> {
                    ::core::result::Result::Ok(())
                }
            }
        } else {
            quote! {
                fn serialize(&self, writer: &mut #rt::EoWriter) -> #rt::EoResult<()> {
                    let mut writer = writer.preserve_sanitize_strings();
                    #write_start
                    #(#write)*
                    ::core::result::Result::Ok(())
                }
            }
        };
        let deserialize = if read.is_empty() {
            quote! {
                fn deserialize(_reader: &mut #rt::EoReader<'_>) -> #rt::EoResult<Self> {
                    ::core::result::Result::Ok(Self {})
                }
            }
        } else {
            quote! {
                fn deserialize(reader: &mut #rt::EoReader<'_>) -> #rt::EoResult<Self> {
                    let mut reader = reader.preserve_chunked_mode();
                    #read_start
                    #(#read)*
                    ::core::result::Result::Ok(Self {
                        #(#member_idents),*
                    })
                }
            }
        };
        let packet = record.packet.as_ref().map(|ids| {
            let PacketIds {
                family_type,
                family,
                action_type,
                action,
            } = ids;
            quote! {
                impl #name {
                    /// Packet family this packet is sent under.
                    pub const FAMILY: #family_type = #family;
                    /// Packet action this packet is sent under.
                    pub const ACTION: #action_type = #action;
                }
            }
        });

        quote! {
            #doc
            #[derive(Debug, Clone, PartialEq, Eq, Default)]
            pub struct #name {
                #(#members)*
            }

            #packet

            impl #rt::EoSerialize for #name {
                #serialize
                #deserialize
            }

            #(#extra)*
        }
    }

    fn classify(&self, type_ref: &TypeRef) -> CodegenResult<ValueKind> {
        let set = self.ctx.set;
        let resolved = set
            .resolve(&type_ref.name)
            .ok_or_else(|| SchemaError::UnknownType {
                scope: self.owner.clone(),
                type_name: type_ref.to_string(),
            })?;
        let kind = match resolved {
            ResolvedType::Primitive(PrimitiveType::Integer(IntegerType::Byte))
                if type_ref.width.is_none() =>
            {
                ValueKind::Byte
            }
            ResolvedType::Primitive(PrimitiveType::Integer(integer)) => {
                ValueKind::Integer(type_ref.width.unwrap_or(integer))
            }
            ResolvedType::Primitive(PrimitiveType::Bool) => {
                ValueKind::Bool(type_ref.width.unwrap_or(IntegerType::Char))
            }
            ResolvedType::Primitive(PrimitiveType::String) => ValueKind::String { encoded: false },
            ResolvedType::Primitive(PrimitiveType::EncodedString) => {
                ValueKind::String { encoded: true }
            }
            ResolvedType::Primitive(PrimitiveType::Blob) => ValueKind::Blob,
            ResolvedType::Enum { def, .. } => ValueKind::Enum {
                path: self.ctx.type_path(&def.name)?,
                width: match type_ref.width {
                    Some(width) => width,
                    None => set.enum_integer_type(def)?,
                },
            },
            ResolvedType::Struct { def, .. } => ValueKind::Struct(self.ctx.type_path(&def.name)?),
        };
        Ok(kind)
    }

    fn integer_width(&self, type_ref: &TypeRef) -> CodegenResult<IntegerType> {
        self.ctx.set.integer_type(type_ref).ok_or_else(|| {
            SchemaError::InvalidLengthType {
                scope: self.owner.clone(),
                type_name: type_ref.to_string(),
            }
            .into()
        })
    }

    fn element_size(&self, type_ref: &TypeRef) -> CodegenResult<Literal> {
        let size = self.ctx.set.calculate_type_size(&type_ref.to_string())?;
        if size == 0 {
            return Err(SchemaError::UnresolvableSize {
                type_name: type_ref.to_string(),
                reason: "elements occupy no bytes".to_string(),
            }
            .into());
        }
        Ok(Literal::usize_unsuffixed(size))
    }

    /// The `usize` expression a length resolves to.
    fn length_expr(&self, length: Option<&LengthSpec>, side: Side) -> Option<TokenStream> {
        match length? {
            LengthSpec::Fixed(length) => {
                let length = Literal::usize_unsuffixed(*length);
                Some(quote!(#length))
            }
            LengthSpec::Reference(name) => {
                let ident = member_ident(name);
                let place = match side {
                    Side::Write => quote!(self.#ident),
                    Side::Read => quote!(#ident),
                };
                if self.scope.lengths.get(name.as_str()).copied().unwrap_or(false) {
                    Some(quote!(#place.unwrap_or_default()))
                } else {
                    Some(place)
                }
            }
        }
    }

    /// Statement writing the value at `place`.
    fn write_value(
        &self,
        kind: &ValueKind,
        place: &TokenStream,
        length: Option<&TokenStream>,
        padded: bool,
    ) -> TokenStream {
        let rt = &self.ctx.runtime;
        match kind {
            ValueKind::Byte => quote!(writer.add_byte(#place);),
            ValueKind::Integer(width) => write_integer(*width, place),
            ValueKind::Bool(width) | ValueKind::Enum { width, .. } => {
                write_integer(*width, &quote!(u32::from(#place)))
            }
            ValueKind::String { encoded } => {
                let method = string_method("add", *encoded, length.is_some(), padded);
                match length {
                    Some(length) => quote!(writer.#method(&#place, #length)?;),
                    None => quote!(writer.#method(&#place);),
                }
            }
            ValueKind::Blob => quote!(writer.add_bytes(&#place);),
            ValueKind::Struct(_) => quote!(#rt::EoSerialize::serialize(&#place, &mut *writer)?;),
        }
    }

    /// Expression reading one value.
    fn read_value(&self, kind: &ValueKind, length: Option<&TokenStream>, padded: bool) -> TokenStream {
        let rt = &self.ctx.runtime;
        match kind {
            ValueKind::Byte => quote!(reader.get_byte()),
            ValueKind::Integer(width) => read_integer(*width),
            ValueKind::Bool(width) => {
                let read = read_integer(*width);
                quote!(#read != 0)
            }
            ValueKind::Enum { path, width } => {
                let read = read_integer(*width);
                quote!(#path::from(#read))
            }
            ValueKind::String { encoded } => {
                let method = string_method("get", *encoded, length.is_some(), padded);
                match length {
                    Some(length) => quote!(reader.#method(#length)),
                    None => quote!(reader.#method()),
                }
            }
            ValueKind::Blob => quote! {
                {
                    let remaining = reader.remaining();
                    reader.get_bytes(remaining).to_vec()
                }
            },
            ValueKind::Struct(path) => {
                quote!(<#path as #rt::EoSerialize>::deserialize(&mut *reader)?)
            }
        }
    }

    /// Statements writing and skipping a constant.
    fn constant(
        &self,
        type_ref: &TypeRef,
        content: &str,
        length: &LengthSpec,
        padded: bool,
    ) -> CodegenResult<(TokenStream, TokenStream)> {
        let kind = self.classify(type_ref)?;
        if let ValueKind::String { encoded } = kind {
            let write_length = self.length_expr(Some(length), Side::Write);
            let read_length = self.length_expr(Some(length), Side::Read);
            let write_method = string_method("add", encoded, true, padded);
            let read_method = string_method("get", encoded, true, padded);
            return Ok((
                quote!(writer.#write_method(#content, #write_length)?;),
                quote!(let _ = reader.#read_method(#read_length);),
            ));
        }

        let value = self.ctx.content_value(type_ref, content)?;
        let literal = Literal::u32_unsuffixed(value);
        let width = match kind {
            ValueKind::Byte => IntegerType::Byte,
            ValueKind::Integer(width) | ValueKind::Bool(width) | ValueKind::Enum { width, .. } => {
                width
            }
            ValueKind::String { .. } | ValueKind::Blob | ValueKind::Struct(_) => {
                return Err(SchemaError::InvalidContent {
                    scope: self.owner.clone(),
                    type_name: type_ref.to_string(),
                    content: content.to_string(),
                }
                .into());
            }
        };
        let write = write_integer(width, &quote!(#literal));
        let read = read_integer(width);
        Ok((write, quote!(let _ = #read;)))
    }

    fn case_pattern(
        &self,
        kind: &ValueKind,
        type_ref: &TypeRef,
        value: &str,
    ) -> CodegenResult<TokenStream> {
        let invalid = || SchemaError::InvalidCaseValue {
            scope: self.owner.clone(),
            field: type_ref.to_string(),
            value: value.to_string(),
        };
        match kind {
            ValueKind::Enum { path, .. } => {
                let resolved = self.ctx.set.resolve(&type_ref.name);
                let Some(ResolvedType::Enum { def, .. }) = resolved else {
                    return Err(invalid().into());
                };
                if def.ordinal_of(value).is_some() {
                    let variant = variant_ident(value);
                    Ok(quote!(#path::#variant))
                } else {
                    let number: u32 = value.parse().map_err(|_| invalid())?;
                    let literal = Literal::u32_unsuffixed(number);
                    Ok(quote!(#path::Unrecognized(#literal)))
                }
            }
            ValueKind::Byte | ValueKind::Integer(_) => {
                let number: u32 = value.parse().map_err(|_| invalid())?;
                let literal = Literal::u32_unsuffixed(number);
                Ok(quote!(#literal))
            }
            _ => Err(invalid().into()),
        }
    }
}

fn rust_type(kind: &ValueKind) -> TokenStream {
    match kind {
        ValueKind::Byte => quote!(u8),
        ValueKind::Integer(_) => quote!(u32),
        ValueKind::Bool(_) => quote!(bool),
        ValueKind::Enum { path, .. } | ValueKind::Struct(path) => path.clone(),
        ValueKind::String { .. } => quote!(::std::string::String),
        ValueKind::Blob => quote!(::std::vec::Vec<u8>),
    }
}

fn read_integer(width: IntegerType) -> TokenStream {
    match width {
        IntegerType::Byte => quote!(u32::from(reader.get_byte())),
        IntegerType::Char => quote!(reader.get_char()),
        IntegerType::Short => quote!(reader.get_short()),
        IntegerType::Three => quote!(reader.get_three()),
        IntegerType::Int => quote!(reader.get_int()),
    }
}

fn write_integer(width: IntegerType, value: &TokenStream) -> TokenStream {
    match width {
        IntegerType::Byte => quote!(writer.add_byte_checked(#value)?;),
        IntegerType::Char => quote!(writer.add_char(#value)?;),
        IntegerType::Short => quote!(writer.add_short(#value)?;),
        IntegerType::Three => quote!(writer.add_three(#value)?;),
        IntegerType::Int => quote!(writer.add_int(#value)?;),
    }
}

/// `{add|get}_[fixed_|padded_][encoded_]string`.
fn string_method(prefix: &str, encoded: bool, sized: bool, padded: bool) -> Ident {
    let size = match (sized, padded) {
        (false, _) => "",
        (true, false) => "fixed_",
        (true, true) => "padded_",
    };
    let encoding = if encoded { "encoded_" } else { "" };
    format_ident!("{}_{}{}string", prefix, size, encoding)
}

fn offset_literal(offset: i32) -> TokenStream {
    let magnitude = Literal::u32_unsuffixed(offset.unsigned_abs());
    if offset < 0 {
        quote!(-#magnitude)
    } else {
        quote!(#magnitude)
    }
}
