//! Command-line tooling for eoproto protocol descriptions.
//!
//! This crate backs the `eoproto-tools` binary:
//!
//! - Discover and load JSON descriptions into a validated protocol set
//! - Generate one Rust source file per package, or check existing ones
//! - Summarize packages and the static size of their structs
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Errors name the file and the offending instruction.

mod generate;
mod inspect;
mod load;

pub use generate::{ensure_fresh, generate, generate_units, GenerateOptions, GenerateReport};
pub use inspect::{format_inspect_pretty, inspect, InspectReport, PackageSummary, TypeSize};
pub use load::{collect_descriptions, load_protocol, load_set, parse_package_alias, DEFAULT_GLOB};

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    pub(crate) const COMMON: &str = r#"{
        "package": "common",
        "enums": [
            {
                "name": "PacketFamily",
                "type": "byte",
                "values": [{ "name": "Talk", "value": 18 }]
            },
            {
                "name": "PacketAction",
                "type": "byte",
                "values": [{ "name": "Player", "value": 17 }]
            },
            {
                "name": "Direction",
                "type": "char",
                "values": [{ "name": "Down" }, { "name": "Left" }, { "name": "Up" }, { "name": "Right" }]
            }
        ],
        "structs": [
            {
                "name": "Coords",
                "instructions": [
                    { "kind": "field", "name": "x", "type": "char" },
                    { "kind": "field", "name": "y", "type": "char" }
                ]
            },
            {
                "name": "Message",
                "instructions": [
                    { "kind": "field", "name": "text", "type": "string" }
                ]
            }
        ]
    }"#;

    pub(crate) const SERVER: &str = r#"{
        "package": "server",
        "packets": [
            {
                "family": "Talk",
                "action": "Player",
                "instructions": [
                    { "kind": "field", "name": "player_id", "type": "short" },
                    { "kind": "field", "name": "at", "type": "Coords" },
                    { "kind": "field", "name": "facing", "type": "Direction" }
                ]
            }
        ]
    }"#;

    pub(crate) fn write(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn public_api_exports() {
        assert_eq!(DEFAULT_GLOB, "*.json");

        let options = GenerateOptions::default();
        assert!(!options.rustfmt);
        assert!(!options.check);
        assert_eq!(options.config, codegen::GeneratorConfig::default());

        let report = GenerateReport::default();
        assert!(report.written.is_empty());
        assert!(report.unchanged.is_empty());
        assert!(report.stale.is_empty());
    }
}
