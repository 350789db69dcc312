//! `skg-shacl`: compiles the SKG OWL ontology into a SHACL shapes graph.
//!
//! Reads the ontology Turtle file, derives one node shape per documented
//! class from the relationship bullets in its description, and writes the
//! shapes graph to `<output>`.
//!
//! **Input resolution:**
//! - `--input <path>`: that file
//! - `--version <v>`: `<ontology-root>/<v>/skg-o.ttl` (must exist)
//! - otherwise: `<ontology-root>/current/skg-o.ttl`
//!
//! **Usage:**
//! ```
//! skg-shacl <output> [--input <path> | --version <v>] [--format turtle|ntriples|jsonld] [--check]
//! ```
//!
//! Log output goes to stderr and is filtered by `SKG_LOG` (default `info`).

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use skg_conformance::{run_all, ConformanceReport, Severity};
use skg_shapes::serializer::{self, Format};
use skg_shapes::{compile_path, CompileOptions};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_ENV_VAR: &str = "SKG_LOG";
const ONTOLOGY_FILE: &str = "skg-o.ttl";
const CURRENT_VERSION: &str = "current";

/// Compile the SKG ontology into SHACL shapes.
#[derive(Parser)]
#[command(
    name = "skg-shacl",
    about = "Generate SHACL shapes from the SKG OWL ontology"
)]
struct Args {
    /// Output file for the shapes graph.
    output: PathBuf,

    /// Ontology Turtle file to read instead of a versioned one.
    #[arg(long, conflicts_with = "version")]
    input: Option<PathBuf>,

    /// Ontology version directory under the ontology root.
    #[arg(long)]
    version: Option<String>,

    /// Directory holding versioned ontology releases.
    #[arg(long, default_value = "data-model/ontology")]
    ontology_root: PathBuf,

    /// Serialization of the shapes graph.
    #[arg(long, value_enum, default_value_t = OutputFormat::Turtle)]
    format: OutputFormat,

    /// Suffix appended to a class IRI to name its node shape.
    #[arg(long, default_value = skg_shapes::compiler::DEFAULT_SHAPE_SUFFIX)]
    shape_suffix: String,

    /// Full IRI of a description predicate; repeat to try several in order.
    #[arg(long = "description-predicate", value_name = "IRI")]
    description_predicates: Vec<String>,

    /// Run the conformance suite on the shapes graph and fail on errors.
    #[arg(long)]
    check: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Turtle,
    Ntriples,
    Jsonld,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Turtle => Format::Turtle,
            OutputFormat::Ntriples => Format::NTriples,
            OutputFormat::Jsonld => Format::JsonLd,
        }
    }
}

impl Args {
    fn compile_options(&self) -> CompileOptions {
        let mut options = CompileOptions {
            shape_suffix: self.shape_suffix.clone(),
            ..CompileOptions::default()
        };
        if !self.description_predicates.is_empty() {
            options.description_predicates = self.description_predicates.clone();
        }
        options
    }
}

/// Picks the ontology file to compile.
fn ontology_path(root: &Path, input: Option<&Path>, version: Option<&str>) -> Result<PathBuf> {
    if let Some(input) = input {
        return Ok(input.to_path_buf());
    }
    match version {
        Some(version) => {
            let path = root.join(version).join(ONTOLOGY_FILE);
            if !path.is_file() {
                bail!(
                    "Ontology version {} not found: {} does not exist",
                    version,
                    path.display()
                );
            }
            Ok(path)
        }
        None => Ok(root.join(CURRENT_VERSION).join(ONTOLOGY_FILE)),
    }
}

/// Whether `output` carries the conventional extension of `format`.
fn has_format_extension(output: &Path, format: Format) -> bool {
    output.extension().and_then(|ext| ext.to_str()) == Some(format.extension())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var(LOG_ENV_VAR)
                .from_env_lossy(),
        )
        .init();
}

fn print_report(report: &ConformanceReport) {
    println!("SKG Shapes Conformance Report");
    println!("=============================");
    println!();

    for result in &report.results {
        println!(
            "[{}] {}: {}",
            result.severity.tag(),
            result.validator,
            result.message
        );
        for detail in &result.details {
            println!("       {}", detail);
        }
    }

    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        report.count(Severity::Pass),
        report.count(Severity::Warning),
        report.failure_count()
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let input = ontology_path(
        &args.ontology_root,
        args.input.as_deref(),
        args.version.as_deref(),
    )?;
    let options = args.compile_options();

    tracing::info!(input = %input.display(), "compiling ontology");
    let shapes = compile_path(&input, &options)
        .with_context(|| format!("Failed to compile {}", input.display()))?;

    println!(
        "SKG shapes: {} node shapes, {} property shapes, {} prefixes",
        shapes.node_shapes.len(),
        shapes.property_shape_count(),
        shapes.prefixes.len()
    );

    if args.check {
        let report = run_all(&shapes, &options.shape_suffix);
        print_report(&report);
        if !report.all_passed() {
            eprintln!(
                "Conformance FAILED: {} check(s) did not pass.",
                report.failure_count()
            );
            process::exit(1);
        }
    }

    let format = Format::from(args.format);
    if !has_format_extension(&args.output, format) {
        tracing::warn!(
            output = %args.output.display(),
            expected = format.extension(),
            "output file extension does not match the format"
        );
    }
    let text = serializer::render(&shapes, format);
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(&args.output, text)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("  Written: {}", args.output.display());

    Ok(())
}
