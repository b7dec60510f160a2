//! Description discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use schema::{Protocol, ProtocolSet, RawProtocol};
use tracing::debug;

/// File name pattern used when no glob is given.
pub const DEFAULT_GLOB: &str = "*.json";

/// Recursively collects description files under `dir`, sorted by path.
///
/// A file matches when the pattern matches either its full path or its
/// file name.
pub fn collect_descriptions(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(glob.unwrap_or(DEFAULT_GLOB)).context("invalid glob pattern")?;
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).with_context(|| format!("read dir {}", dir.display()))? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if matches_name || pattern.matches_path(&path) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Loads and structurally validates one description file.
pub fn load_protocol(path: &Path) -> Result<Protocol> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read description {}", path.display()))?;
    let raw: RawProtocol = serde_json::from_str(&contents)
        .with_context(|| format!("parse description {}", path.display()))?;
    let protocol = Protocol::from_raw(raw)
        .with_context(|| format!("invalid description {}", path.display()))?;
    debug!(
        path = %path.display(),
        package = %protocol.package,
        enums = protocol.enums.len(),
        structs = protocol.structs.len(),
        packets = protocol.packets.len(),
        "loaded description"
    );
    Ok(protocol)
}

/// Loads every matching description under `dir` into a validated set.
pub fn load_set(dir: &Path, glob: Option<&str>) -> Result<ProtocolSet> {
    let files = collect_descriptions(dir, glob)?;
    anyhow::ensure!(
        !files.is_empty(),
        "no descriptions matching `{}` under {}",
        glob.unwrap_or(DEFAULT_GLOB),
        dir.display()
    );
    let protocols = files
        .iter()
        .map(|path| load_protocol(path))
        .collect::<Result<Vec<_>>>()?;
    ProtocolSet::new(protocols).context("protocol set validation failed")
}

/// Parses a `--package name=path` alias.
pub fn parse_package_alias(value: &str) -> Result<(String, String)> {
    let (package, path) = value
        .split_once('=')
        .with_context(|| format!("expected `package=module::path`, got `{value}`"))?;
    anyhow::ensure!(
        !package.is_empty() && !path.is_empty(),
        "expected `package=module::path`, got `{value}`"
    );
    Ok((package.to_string(), path.to_string()))
}
