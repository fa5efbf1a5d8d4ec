//! DataCite CLI - Command-line tool for rendering DataCite metadata records.
//!
//! This is the main entry point for the DataCite command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use datacite::prelude::*;

/// DataCite - kernel-4 metadata record renderer
#[derive(Parser)]
#[command(name = "datacite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON record as DataCite XML
    Render {
        /// Input JSON record
        #[arg(short, long, env = "DATACITE_INPUT")]
        input: PathBuf,

        /// Output XML file (stdout when omitted)
        #[arg(short, long, env = "DATACITE_OUTPUT")]
        output: Option<PathBuf>,

        /// Single-line output without XML declaration
        #[arg(long)]
        compact: bool,

        /// Refuse records with missing required fields
        #[arg(long)]
        strict: bool,
    },

    /// Render a directory of JSON records to XML files
    Batch {
        /// Directory containing JSON records
        #[arg(short, long, env = "DATACITE_INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "DATACITE_OUTPUT")]
        output: PathBuf,

        /// File pattern (glob-style) relative to the input directory
        #[arg(short, long, default_value = "*.json")]
        pattern: String,

        /// Single-line output without XML declaration
        #[arg(long)]
        compact: bool,

        /// Refuse records with missing required fields
        #[arg(long)]
        strict: bool,
    },

    /// Read a DataCite XML document and print it as a JSON record
    Inspect {
        /// Input XML file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Check a JSON record for missing required fields
    Validate {
        /// Input JSON record
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            compact,
            strict,
        } => {
            cmd_render(&input, output.as_deref(), compact, strict)?;
        }
        Commands::Batch {
            input,
            output,
            pattern,
            compact,
            strict,
        } => {
            cmd_batch(&input, &output, &pattern, compact, strict)?;
        }
        Commands::Inspect { input } => {
            cmd_inspect(&input)?;
        }
        Commands::Validate { input } => {
            cmd_validate(&input)?;
        }
    }

    Ok(())
}

fn renderer(compact: bool) -> RecordRenderer {
    if compact {
        RecordRenderer::with_options(RenderOptions::compact())
    } else {
        RecordRenderer::new()
    }
}

fn cmd_render(input: &Path, output: Option<&Path>, compact: bool, strict: bool) -> Result<()> {
    let record = MetadataRecord::from_json_file(input).context("Failed to read JSON record")?;

    if strict {
        record.validate().context("Record is incomplete")?;
    }

    let xml = renderer(compact)
        .render(&record)
        .context("Failed to render record")?;

    match output {
        Some(path) => {
            fs::write(path, xml).context("Failed to write output file")?;
            println!("Rendered {} -> {}", input.display(), path.display());
        }
        None => println!("{}", xml),
    }

    Ok(())
}

fn cmd_batch(input: &Path, output: &Path, pattern: &str, compact: bool, strict: bool) -> Result<()> {
    let inputs = collect_inputs(input, pattern)?;

    if inputs.is_empty() {
        anyhow::bail!("No files in {} match '{}'", input.display(), pattern);
    }

    println!("Rendering {} records to {}...", inputs.len(), output.display());

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let stats = BatchRenderer::new(renderer(compact))
        .strict(strict)
        .render_files(&inputs, output, |done, _| pb.set_position(done as u64))
        .context("Failed to render batch")?;

    pb.finish_with_message("Done");

    for (path, error) in &stats.failures {
        eprintln!("Error rendering {}: {}", path.display(), error);
    }

    println!(
        "Rendered {} records in {:?} ({} errors)",
        stats.rendered,
        start.elapsed(),
        stats.failed
    );

    Ok(())
}

/// Files in `dir` matching `pattern`; `dir` itself is matched literally.
fn collect_inputs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.to_str().context("Input path is not valid UTF-8")?;
    let full_pattern = Path::new(&glob::Pattern::escape(dir)).join(pattern);
    let full_pattern = full_pattern
        .to_str()
        .context("Input path is not valid UTF-8")?;

    let mut inputs: Vec<PathBuf> = glob::glob(full_pattern)
        .context("Invalid file pattern")?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    inputs.sort();

    Ok(inputs)
}

fn cmd_inspect(input: &Path) -> Result<()> {
    let xml = fs::read_to_string(input).context("Failed to read input file")?;
    let record = MetadataRecord::from_datacite_xml(&xml).context("Failed to parse DataCite XML")?;

    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}

fn cmd_validate(input: &Path) -> Result<()> {
    let record = MetadataRecord::from_json_file(input).context("Failed to read JSON record")?;

    match record.validate() {
        Ok(()) => {
            println!("{}: ok", input.display());
            Ok(())
        }
        Err(e) => anyhow::bail!("{}: {}", input.display(), e),
    }
}
