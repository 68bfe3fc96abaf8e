//! Process-level defaults for ingestion limits and scratch space.
//!
//! Every ceiling can be overridden through a `REPODIGEST_*` environment
//! variable; values that are missing or fail to parse fall back to the
//! built-in default.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_MAX_FILES: usize = 1000;
pub const DEFAULT_MAX_TOTAL_SIZE_MB: u64 = 50;
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 1;
pub const DEFAULT_MAX_DIRECTORY_DEPTH: usize = 10;

/// Conventional file name for a digest written to disk.
pub const OUTPUT_FILE_NAME: &str = "digest.txt";

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

/// Maximum number of files counted in one ingestion call.
pub fn max_files() -> usize {
    env_parse("REPODIGEST_MAX_FILES", DEFAULT_MAX_FILES)
}

/// Cumulative content-size ceiling for one ingestion call, in bytes.
pub fn max_total_size_bytes() -> u64 {
    env_parse("REPODIGEST_MAX_TOTAL_SIZE_MB", DEFAULT_MAX_TOTAL_SIZE_MB) * 1024 * 1024
}

/// Per-file size ceiling, in bytes.
pub fn max_file_size_bytes() -> u64 {
    env_parse("REPODIGEST_MAX_FILE_SIZE_MB", DEFAULT_MAX_FILE_SIZE_MB) * 1024 * 1024
}

/// Directory depth ceiling, 0 being the traversal root.
pub fn max_directory_depth() -> usize {
    env_parse("REPODIGEST_MAX_DIRECTORY_DEPTH", DEFAULT_MAX_DIRECTORY_DEPTH)
}

/// Base directory under which cloned repositories are materialized, one
/// fresh subdirectory per query id.
pub fn tmp_base_path() -> PathBuf {
    match env::var("REPODIGEST_TMP_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => env::temp_dir().join("repodigest"),
    }
}
