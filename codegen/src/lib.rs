//! Rust source generation for eoproto protocol descriptions.
//!
//! This crate turns a validated [`schema::ProtocolSet`] into Rust source:
//! - One enum per description enum, with an `Unrecognized(u32)` fallback
//! - One struct per description struct and packet, implementing `EoSerialize`
//! - One data enum per switch and one struct per non-empty switch case
//!
//! # Design Principles
//!
//! - **Explicit configuration** - Paths and names come from [`GeneratorConfig`], never globals.
//! - **Checked output** - Every unit is parsed with `syn` before it is returned.
//! - **Deterministic** - The same description always yields the same source.
//!
//! # Example
//!
//! ```
//! use codegen::{Generator, GeneratorConfig};
//! use schema::{Field, Protocol, ProtocolSet, StructDef, TypeRef};
//!
//! let protocol = Protocol::new("common").struct_def(
//!     StructDef::new("Coords")
//!         .instruction(Field::new("x", TypeRef::new("char")))
//!         .instruction(Field::new("y", TypeRef::new("char"))),
//! );
//! let set = ProtocolSet::new(vec![protocol]).unwrap();
//! let generator = Generator::new(&set, GeneratorConfig::default());
//! let units = generator.generate_all().unwrap();
//! assert_eq!(units[0].file_name, "common.rs");
//! assert!(units[0].source.contains("pub struct Coords"));
//! ```

mod config;
mod enums;
mod error;
mod generator;
mod naming;
mod records;

pub use config::{GeneratorConfig, DEFAULT_RUNTIME_PATH};
pub use error::{CodegenError, CodegenResult};
pub use generator::{GeneratedUnit, Generator};

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{EnumDef, EnumValue, Field, PacketDef, Protocol, ProtocolSet, TypeRef};

    fn packet_enums() -> Protocol {
        Protocol::new("net")
            .enum_def(EnumDef::new("PacketFamily", "byte").value(EnumValue::new("Walk").with_value(4)))
            .enum_def(EnumDef::new("PacketAction", "byte").value(EnumValue::new("Player").with_value(4)))
    }

    #[test]
    fn public_api_exports() {
        let set = ProtocolSet::new(vec![packet_enums()]).unwrap();
        let generator = Generator::new(&set, GeneratorConfig::default());
        assert_eq!(generator.config().runtime_path, DEFAULT_RUNTIME_PATH);
        let units = generator.generate_all().unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].package, "net");
    }

    #[test]
    fn unknown_package_fails() {
        let set = ProtocolSet::new(vec![packet_enums()]).unwrap();
        let generator = Generator::new(&set, GeneratorConfig::default());
        assert_eq!(
            generator.generate(&Protocol::new("missing")),
            Err(CodegenError::UnknownPackage {
                package: "missing".to_string()
            })
        );
    }

    #[test]
    fn invalid_runtime_path_fails() {
        let set = ProtocolSet::new(vec![packet_enums()]).unwrap();
        let config = GeneratorConfig::default().with_runtime_path("two words");
        let generator = Generator::new(&set, config);
        assert!(matches!(
            generator.generate_all(),
            Err(CodegenError::InvalidModulePath { .. })
        ));
    }

    #[test]
    fn packets_need_family_values() {
        let client = Protocol::new("client").packet(
            PacketDef::new("Face", "Player").instruction(Field::new("x", TypeRef::new("char"))),
        );
        let set = ProtocolSet::new(vec![packet_enums(), client]).unwrap();
        let generator = Generator::new(&set, GeneratorConfig::default());
        let client = set.get("client").unwrap();
        assert_eq!(
            generator.generate(client),
            Err(CodegenError::UnknownPacketEnum {
                enum_name: "PacketFamily".to_string(),
                value: "Face".to_string()
            })
        );
    }
}
