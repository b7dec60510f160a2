//! Generates the protocol modules from the descriptions in `protocol/`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codegen::{Generator, GeneratorConfig};
use schema::{Protocol, ProtocolSet, RawProtocol};

const PROTOCOL_DIR: &str = "protocol";

fn load(path: &Path) -> Result<Protocol> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read description {}", path.display()))?;
    let raw: RawProtocol = serde_json::from_str(&contents)
        .with_context(|| format!("parse description {}", path.display()))?;
    Protocol::from_raw(raw).with_context(|| format!("invalid description {}", path.display()))
}

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed={PROTOCOL_DIR}");

    let mut paths = Vec::new();
    for entry in fs::read_dir(PROTOCOL_DIR).context("read protocol directory")? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            println!("cargo:rerun-if-changed={}", path.display());
            paths.push(path);
        }
    }
    paths.sort();

    let protocols = paths
        .iter()
        .map(|path| load(path))
        .collect::<Result<Vec<_>>>()?;
    let set = ProtocolSet::new(protocols).context("protocol set validation failed")?;

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").context("OUT_DIR is not set")?);
    let units = Generator::new(&set, GeneratorConfig::default())
        .generate_all()
        .context("code generation failed")?;
    for unit in units {
        let path = out_dir.join(&unit.file_name);
        fs::write(&path, unit.source).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}
