//! Command-line interface for repodigest.
//!
//! This binary provides access to the repodigest library functionality,
//! ingesting a local directory or a GitHub repository and printing or saving
//! the resulting digest.

use clap::{Parser, ValueEnum};
use repodigest::{
    IngestionQuery, Limits, LimitsBuilder, clone_repo, ingest_query, output, parse_query,
};
use std::path::{Path, PathBuf};
use std::process::exit;

/// repodigest — turn a repository into a text digest
#[derive(Parser)]
#[command(name = "repodigest", version, about, long_about = None)]
struct Cli {
    /// GitHub repository URL or local directory path
    source: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Maximum number of files to ingest
    #[arg(long)]
    max_files: Option<usize>,

    /// Cumulative content size ceiling in bytes
    #[arg(long)]
    max_total_size: Option<u64>,

    /// Per-file size ceiling in bytes (larger files are skipped)
    #[arg(long)]
    max_file_size: Option<u64>,

    /// Maximum directory depth below the root
    #[arg(long)]
    max_depth: Option<usize>,

    /// Include patterns (can be repeated; carried on the query)
    #[arg(short = 'i', long = "include")]
    include_patterns: Vec<String>,

    /// Ignore patterns (can be repeated; carried on the query)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Branch to clone (remote sources only)
    #[arg(long)]
    branch: Option<String>,

    /// Write the digest to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty output (indented JSON)
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn limits(&self) -> Limits {
        let mut builder = LimitsBuilder::new();
        if let Some(count) = self.max_files {
            builder = builder.max_files(count);
        }
        if let Some(bytes) = self.max_total_size {
            builder = builder.max_total_size(bytes);
        }
        if let Some(bytes) = self.max_file_size {
            builder = builder.max_file_size(bytes);
        }
        if let Some(depth) = self.max_depth {
            builder = builder.max_depth(depth);
        }
        builder.build()
    }

    fn into_query(self) -> Result<(IngestionQuery, OutputFormat, Option<PathBuf>, bool), repodigest::DigestError> {
        let limits = self.limits();
        let query = if Path::new(&self.source).is_dir() {
            IngestionQuery::local(&self.source, limits)
        } else {
            let include = join_patterns(&self.include_patterns);
            let ignore = join_patterns(&self.ignore_patterns);
            let mut query =
                parse_query(&self.source, limits, include.as_deref(), ignore.as_deref())?;
            query.branch = self.branch;
            query
        };
        Ok((query, self.format, self.output, self.pretty))
    }
}

fn join_patterns(patterns: &[String]) -> Option<String> {
    if patterns.is_empty() {
        None
    } else {
        Some(patterns.join(","))
    }
}

fn main() {
    let cli = Cli::parse();
    let (query, format, out_path, pretty) = match cli.into_query() {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    if let Some(clone_config) = query.extract_clone_config() {
        if !query.local_path.exists() {
            if let Err(e) = clone_repo(&clone_config) {
                eprintln!("Error: {}", e);
                exit(1);
            }
        }
    }

    match ingest_query(&query) {
        Ok(digest) => emit_digest(&digest, format, out_path, pretty),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn emit_digest(
    digest: &repodigest::Digest,
    format: OutputFormat,
    out_path: Option<PathBuf>,
    pretty: bool,
) {
    let lib_format = match format {
        OutputFormat::Text => output::OutputFormat::Text,
        OutputFormat::Json => output::OutputFormat::Json,
    };

    if let Some(path) = out_path {
        if let Err(e) = output::write_digest_to_file(digest, lib_format, &path, pretty) {
            eprintln!("Error: {}", e);
            exit(1);
        }
        return;
    }

    match format {
        OutputFormat::Text => {
            // Stdout is a display boundary: the content view gets the crop
            // policy that a hosting service would apply.
            print!("{}", digest.summary);
            println!();
            println!("{}", digest.tree);
            println!();
            println!("{}", output::crop_for_display(&digest.content));
        }
        OutputFormat::Json => {
            println!("{}", output::format_digest_output(digest, lib_format, pretty));
        }
    }
}
