//! Writing generated units to disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use codegen::{GeneratedUnit, Generator, GeneratorConfig};
use schema::ProtocolSet;
use tracing::{debug, info};

/// Options for [`generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Directory generated files are written to.
    pub out_dir: PathBuf,
    pub config: GeneratorConfig,
    /// Format each unit with `rustfmt` before writing.
    pub rustfmt: bool,
    /// Compare against existing files instead of writing.
    pub check: bool,
}

/// What [`generate`] did with each unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    /// Files that differ from what would be generated (check mode only).
    pub stale: Vec<PathBuf>,
}

/// Generates one file per package of the set into `options.out_dir`.
pub fn generate(set: &ProtocolSet, options: &GenerateOptions) -> Result<GenerateReport> {
    let generator = Generator::new(set, options.config.clone());
    let units = generator.generate_all().context("code generation failed")?;
    if !options.check {
        fs::create_dir_all(&options.out_dir)
            .with_context(|| format!("create output dir {}", options.out_dir.display()))?;
    }

    let mut report = GenerateReport::default();
    for unit in units {
        let source = if options.rustfmt {
            rustfmt(&unit)?
        } else {
            unit.source
        };
        let path = options.out_dir.join(&unit.file_name);
        let existing = fs::read_to_string(&path).ok();
        if existing.as_deref() == Some(source.as_str()) {
            debug!(path = %path.display(), "unchanged");
            report.unchanged.push(path);
        } else if options.check {
            info!(path = %path.display(), "stale");
            report.stale.push(path);
        } else {
            fs::write(&path, source).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), package = %unit.package, "wrote");
            report.written.push(path);
        }
    }
    Ok(report)
}

/// Formats a unit's source through `rustfmt`.
fn rustfmt(unit: &GeneratedUnit) -> Result<String> {
    let mut child = Command::new("rustfmt")
        .args(["--edition", "2021", "--emit", "stdout"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("run rustfmt")?;
    child
        .stdin
        .take()
        .context("rustfmt stdin")?
        .write_all(unit.source.as_bytes())
        .context("write to rustfmt")?;
    let output = child.wait_with_output().context("wait for rustfmt")?;
    if !output.status.success() {
        bail!(
            "rustfmt failed on `{}`: {}",
            unit.file_name,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8(output.stdout).context("rustfmt output is not UTF-8")
}

/// Convenience for callers that only need the units.
pub fn generate_units(set: &ProtocolSet, config: GeneratorConfig) -> Result<Vec<GeneratedUnit>> {
    Generator::new(set, config)
        .generate_all()
        .context("code generation failed")
}

/// Returns an error listing stale files, if any.
pub fn ensure_fresh(report: &GenerateReport, out_dir: &Path) -> Result<()> {
    if report.stale.is_empty() {
        return Ok(());
    }
    let files: Vec<_> = report
        .stale
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    bail!(
        "{} generated file(s) in {} are stale: {}",
        files.len(),
        out_dir.display(),
        files.join(", ")
    )
}
