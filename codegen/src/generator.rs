//! Generator entry points and shared generation context.

use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::quote;
use schema::{protocol_hash, Protocol, ProtocolSet, ResolvedType, SchemaError, TypeRef};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::enums::generate_enum;
use crate::error::{CodegenError, CodegenResult};
use crate::naming::{parse_path, type_ident, variant_ident};
use crate::records::{generate_record, PacketIds, Record};

/// Generated source for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Package the source was generated from.
    pub package: String,
    /// Suggested file name, `{package}.rs` in snake case.
    pub file_name: String,
    /// The Rust source text.
    pub source: String,
}

/// Generates Rust source for the packages of a validated [`ProtocolSet`].
///
/// The generator only holds shared references and may be used from several
/// threads at once.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    set: &'a ProtocolSet,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    pub const fn new(set: &'a ProtocolSet, config: GeneratorConfig) -> Self {
        Self { set, config }
    }

    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the source unit for one package of the set.
    pub fn generate(&self, protocol: &Protocol) -> CodegenResult<GeneratedUnit> {
        let protocol = self
            .set
            .get(&protocol.package)
            .ok_or_else(|| CodegenError::UnknownPackage {
                package: protocol.package.clone(),
            })?;
        let ctx = Context {
            set: self.set,
            config: &self.config,
            runtime: parse_path(&self.config.runtime_path)?,
            package: &protocol.package,
        };

        let mut items = TokenStream::new();
        for def in &protocol.enums {
            debug!(package = %protocol.package, name = %def.name, "generating enum");
            items.extend(generate_enum(&ctx, def)?);
        }
        for def in &protocol.structs {
            debug!(package = %protocol.package, name = %def.name, "generating struct");
            items.extend(generate_record(
                &ctx,
                &Record {
                    name: def.name.clone(),
                    comment: def.comment.as_deref(),
                    instructions: &def.instructions,
                    packet: None,
                },
            )?);
        }
        for def in &protocol.packets {
            let name = def.type_name(&protocol.package);
            debug!(package = %protocol.package, name = %name, "generating packet");
            let (family_type, family) =
                ctx.packet_enum_value(&self.config.family_type, &def.family)?;
            let (action_type, action) =
                ctx.packet_enum_value(&self.config.action_type, &def.action)?;
            let ids = PacketIds {
                family_type,
                family,
                action_type,
                action,
            };
            items.extend(generate_record(
                &ctx,
                &Record {
                    name,
                    comment: def.comment.as_deref(),
                    instructions: &def.instructions,
                    packet: Some(ids),
                },
            )?);
        }

        let file: syn::File =
            syn::parse2(items).map_err(|err| CodegenError::InvalidOutput {
                package: protocol.package.clone(),
                message: err.to_string(),
            })?;
        let hash = protocol_hash(protocol);
        let source = format!(
            "// Generated by eoproto-codegen from package `{}` (protocol hash {hash:#018x}).\n\
             // Do not edit by hand.\n\n{}\n",
            protocol.package,
            quote!(#file)
        );
        debug!(
            package = %protocol.package,
            bytes = source.len(),
            "generated unit"
        );

        Ok(GeneratedUnit {
            package: protocol.package.clone(),
            file_name: format!("{}.rs", protocol.package.to_snake_case()),
            source,
        })
    }

    /// Generates one unit per package, in set order.
    pub fn generate_all(&self) -> CodegenResult<Vec<GeneratedUnit>> {
        self.set
            .protocols()
            .iter()
            .map(|protocol| self.generate(protocol))
            .collect()
    }
}

/// State shared while generating one package.
pub(crate) struct Context<'a> {
    pub set: &'a ProtocolSet,
    pub config: &'a GeneratorConfig,
    pub runtime: syn::Path,
    pub package: &'a str,
}

impl Context<'_> {
    /// Path to a named enum or struct as seen from the package being
    /// generated.
    pub fn type_path(&self, name: &str) -> CodegenResult<TokenStream> {
        let package = match self.set.resolve(name) {
            Some(ResolvedType::Enum { package, .. } | ResolvedType::Struct { package, .. }) => {
                package
            }
            _ => {
                return Err(SchemaError::UnknownType {
                    scope: format!("package `{}`", self.package),
                    type_name: name.to_string(),
                }
                .into())
            }
        };
        let ident = type_ident(name);
        if package == self.package {
            Ok(quote!(#ident))
        } else {
            let module = parse_path(&self.config.module_path(package))?;
            Ok(quote!(#module::#ident))
        }
    }

    /// Paths to the packet family or action enum and one of its values.
    fn packet_enum_value(
        &self,
        enum_name: &str,
        value: &str,
    ) -> CodegenResult<(TokenStream, TokenStream)> {
        let unknown = || CodegenError::UnknownPacketEnum {
            enum_name: enum_name.to_string(),
            value: value.to_string(),
        };
        let (_, def) = self.set.find_enum(enum_name).ok_or_else(unknown)?;
        if def.ordinal_of(value).is_none() {
            return Err(unknown());
        }
        let path = self.type_path(enum_name)?;
        let variant = variant_ident(value);
        let value = quote!(#path::#variant);
        Ok((path, value))
    }

    /// Resolves a content string to the number it stands for.
    pub fn content_value(&self, type_ref: &TypeRef, content: &str) -> CodegenResult<u32> {
        self.set.content_value(type_ref, content).ok_or_else(|| {
            SchemaError::InvalidContent {
                scope: format!("package `{}`", self.package),
                type_name: type_ref.to_string(),
                content: content.to_string(),
            }
            .into()
        })
    }
}
