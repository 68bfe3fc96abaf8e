//! Output assembly for completed ingestion calls.
//!
//! Turns a finished [`Node`] tree into the three digest views (summary, tree
//! diagram, file contents), and provides plain-text/JSON rendering, file
//! writing, and the display-boundary cropping policy.

use crate::error::DigestError;
use crate::tree::build_tree_string;
use crate::types::{Digest, Node};
use std::fs;
use std::path::Path;

/// Width of the `=` separator framing each file in the content view.
const SEPARATOR_WIDTH: usize = 80;

/// Character budget applied by [`crop_for_display`] at presentation
/// boundaries. The core never truncates.
pub const MAX_DISPLAY_SIZE: usize = 300_000;

/// Supported digest renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Returns the conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// Renders the three digest views for a completed tree.
///
/// Pure function of the tree and the display identifier; performs no I/O.
pub fn format_digest(root: &Node, slug: &str) -> Digest {
    let files = root.files();

    let total_chars: usize = files
        .iter()
        .map(|file| file.content.as_deref().unwrap_or("").chars().count())
        .sum();
    let estimated_tokens = total_chars / 4;

    let summary = format!(
        "Repository: {slug}\n\
         Files analyzed: {}\n\
         Directories: {}\n\
         Total size: {:.2} KB\n\
         Estimated tokens: {}\n",
        root.file_count,
        root.dir_count,
        root.size as f64 / 1024.0,
        group_thousands(estimated_tokens),
    );

    let tree = format!("File Tree:\n\n{}", build_tree_string(root));

    let mut content_lines: Vec<String> = vec!["File Contents:".to_string(), String::new()];
    for file in &files {
        content_lines.push("=".repeat(SEPARATOR_WIDTH));
        content_lines.push(format!("File: {}", file.rel_path.display()));
        content_lines.push("=".repeat(SEPARATOR_WIDTH));
        content_lines.push(file.content.clone().unwrap_or_default());
        content_lines.push(String::new());
    }
    let content = content_lines.join("\n");

    Digest {
        summary,
        tree,
        content,
    }
}

/// Formats the digest into a single string.
pub fn format_digest_output(digest: &Digest, format: OutputFormat, pretty: bool) -> String {
    match format {
        OutputFormat::Text => format_text(digest),
        OutputFormat::Json => format_json(digest, pretty),
    }
}

/// Writes the formatted digest to a file.
pub fn write_digest_to_file(
    digest: &Digest,
    format: OutputFormat,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), DigestError> {
    let content = format_digest_output(digest, format, pretty);
    fs::write(&path, content).map_err(|e| DigestError::io(path.as_ref(), e))?;
    Ok(())
}

/// Applies the presentation-boundary size cap to a content view.
///
/// Content longer than [`MAX_DISPLAY_SIZE`] characters is truncated and
/// prefixed with a cropped notice; shorter content is returned unchanged.
pub fn crop_for_display(content: &str) -> String {
    match content.char_indices().nth(MAX_DISPLAY_SIZE) {
        None => content.to_string(),
        Some((byte_end, _)) => format!(
            "(Content cropped to {}k characters)\n{}",
            MAX_DISPLAY_SIZE / 1_000,
            &content[..byte_end]
        ),
    }
}

// ----------------------- Internal formatting -----------------------

fn format_text(digest: &Digest) -> String {
    let mut out = String::with_capacity(
        digest.summary.len() + digest.tree.len() + digest.content.len() + 4,
    );
    out.push_str(&digest.summary);
    out.push('\n');
    out.push_str(&digest.tree);
    out.push_str("\n\n");
    out.push_str(&digest.content);
    if !digest.content.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn format_json(digest: &Digest, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(digest).expect("JSON serialization failed")
    } else {
        serde_json::to_string(digest).expect("JSON serialization failed")
    }
}

fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}
