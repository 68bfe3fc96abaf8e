//! # Repodigest
//!
//! `repodigest` renders a directory tree into three textual views — a summary,
//! an ASCII tree diagram, and a concatenation of file contents — suitable for
//! feeding to a text-processing or language-model pipeline.
//!
//! The core is a bounded ingestion engine: a recursive filesystem walker that
//! enforces interacting resource limits (file count, cumulative size, per-file
//! size, directory depth) while building an in-memory [`Node`] tree whose
//! aggregated statistics stay exactly consistent with its leaves, then
//! deterministically serializes that tree into stable text formats. Remote
//! repositories can be materialized first with [`clone_repo`].
//!
//! # Features
//!
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use repodigest::{ingest_query, IngestionQuery, LimitsBuilder};
//!
//! let limits = LimitsBuilder::new()
//!     .max_file_size(1024 * 1024) // 1 MB per file
//!     .max_depth(10)
//!     .build();
//!
//! let query = IngestionQuery::local("./my-project", limits);
//! let digest = ingest_query(&query).expect("Failed to ingest directory");
//!
//! println!("{}", digest.summary);
//! println!("{}", digest.tree);
//! ```

mod clone;
mod config;
mod engine;
mod error;
mod options;
pub mod output;
mod query;
mod tree;
mod types;

pub use clone::{CLONE_TIMEOUT_SECS, CloneConfig, clone_repo};
pub use config::OUTPUT_FILE_NAME;
pub use engine::{ingest_query, walk};
pub use error::DigestError;
pub use options::{Limits, LimitsBuilder};
pub use query::{IngestionQuery, parse_query};
pub use types::{Digest, Node, NodeKind, TraversalStats, UNREADABLE_PLACEHOLDER};
