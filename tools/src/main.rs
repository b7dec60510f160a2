use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codegen::GeneratorConfig;
use eoproto_tools::{
    ensure_fresh, format_inspect_pretty, generate, inspect, load_set, parse_package_alias,
    GenerateOptions,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "eoproto-tools",
    version,
    about = "eoproto description validation, inspection and code generation"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one Rust source file per package.
    Generate {
        /// Directory searched recursively for descriptions.
        input: PathBuf,
        /// Directory generated files are written to.
        #[arg(long)]
        out: PathBuf,
        /// Glob selecting description files (default `*.json`).
        #[arg(long)]
        glob: Option<String>,
        /// Module path of a package, as `name=path`. May be repeated.
        #[arg(long = "package", value_name = "NAME=PATH")]
        packages: Vec<String>,
        /// Path of the runtime crate used by generated code.
        #[arg(long, default_value = codegen::DEFAULT_RUNTIME_PATH)]
        runtime: String,
        /// Format generated files with rustfmt.
        #[arg(long)]
        rustfmt: bool,
        /// Fail if generated files are missing or out of date instead of
        /// writing them.
        #[arg(long)]
        check: bool,
    },
    /// Summarize packages and static struct sizes.
    Inspect {
        /// Directory searched recursively for descriptions.
        input: PathBuf,
        /// Glob selecting description files (default `*.json`).
        #[arg(long)]
        glob: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = InspectFormat::Pretty)]
        format: InspectFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectFormat {
    Json,
    Pretty,
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            input,
            out,
            glob,
            packages,
            runtime,
            rustfmt,
            check,
        } => {
            let set = load_set(&input, glob.as_deref())
                .with_context(|| format!("load descriptions from {}", input.display()))?;
            let mut config = GeneratorConfig::default().with_runtime_path(runtime);
            for alias in &packages {
                let (package, path) = parse_package_alias(alias)?;
                config = config.with_module_path(package, path);
            }
            let options = GenerateOptions {
                out_dir: out,
                config,
                rustfmt,
                check,
            };
            let report = generate(&set, &options)?;
            if check {
                ensure_fresh(&report, &options.out_dir)?;
                println!("{} file(s) up to date", report.unchanged.len());
            } else {
                println!(
                    "{} file(s) written, {} unchanged",
                    report.written.len(),
                    report.unchanged.len()
                );
            }
        }
        Command::Inspect {
            input,
            glob,
            format,
        } => {
            let set = load_set(&input, glob.as_deref())
                .with_context(|| format!("load descriptions from {}", input.display()))?;
            let report = inspect(&set);
            match format {
                InspectFormat::Json => {
                    let json = serde_json::to_string_pretty(&report).context("serialize json")?;
                    println!("{json}");
                }
                InspectFormat::Pretty => print!("{}", format_inspect_pretty(&report)),
            }
        }
    }
    Ok(())
}
