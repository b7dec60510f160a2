//! Protocol set summaries.

use std::fmt::Write;

use schema::ProtocolSet;
use serde::Serialize;

/// Summary of every package in a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub packages: Vec<PackageSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub package: String,
    pub hash: String,
    pub enums: usize,
    pub structs: usize,
    pub packets: usize,
    pub sizes: Vec<TypeSize>,
}

/// Static size of one struct or packet, or why it has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSize {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Builds a report for every package in the set.
pub fn inspect(set: &ProtocolSet) -> InspectReport {
    let packages = set
        .protocols()
        .iter()
        .map(|protocol| {
            let sizes = protocol
                .structs
                .iter()
                .map(|def| def.name.clone())
                .map(|name| match set.calculate_type_size(&name) {
                    Ok(size) => TypeSize {
                        name,
                        size: Some(size),
                        reason: None,
                    },
                    Err(err) => TypeSize {
                        name,
                        size: None,
                        reason: Some(err.to_string()),
                    },
                })
                .collect();
            PackageSummary {
                package: protocol.package.clone(),
                hash: format!("{:#018x}", schema::protocol_hash(protocol)),
                enums: protocol.enums.len(),
                structs: protocol.structs.len(),
                packets: protocol.packets.len(),
                sizes,
            }
        })
        .collect();
    InspectReport { packages }
}

/// Renders a report for terminals.
pub fn format_inspect_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    for package in &report.packages {
        let _ = writeln!(out, "== {} (hash {}) ==", package.package, package.hash);
        let _ = writeln!(
            out,
            "enums: {} structs: {} packets: {}",
            package.enums, package.structs, package.packets
        );
        if package.sizes.is_empty() {
            continue;
        }
        out.push_str("sizes:\n");
        for entry in &package.sizes {
            match (entry.size, &entry.reason) {
                (Some(size), _) => {
                    let _ = writeln!(out, "  {}: {size} bytes", entry.name);
                }
                (None, reason) => {
                    let _ = writeln!(
                        out,
                        "  {}: variable ({})",
                        entry.name,
                        reason.as_deref().unwrap_or("unknown")
                    );
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::load_set;
    use crate::tests::{write, COMMON, SERVER};

    #[test]
    fn report_counts_and_sizes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "common.json", COMMON);
        write(dir.path(), "server.json", SERVER);
        let set = load_set(dir.path(), None).unwrap();

        let report = inspect(&set);
        let common = report
            .packages
            .iter()
            .find(|package| package.package == "common")
            .unwrap();
        assert_eq!(common.enums, 3);
        assert_eq!(common.structs, 2);
        assert_eq!(common.packets, 0);
        assert_eq!(
            common.sizes[0],
            TypeSize {
                name: "Coords".to_string(),
                size: Some(2),
                reason: None,
            }
        );
        assert!(common.sizes[1].size.is_none());
        assert!(common.sizes[1].reason.is_some());

        let pretty = format_inspect_pretty(&report);
        assert!(pretty.contains("== common"));
        assert!(pretty.contains("Coords: 2 bytes"));
        assert!(pretty.contains("Message: variable"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["packages"][0]["sizes"][0]["size"], 2);
    }
}
