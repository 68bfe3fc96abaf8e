use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Content substituted for a file that could not be read as UTF-8 text,
/// whether because it is binary, malformed, or unreadable due to permissions.
pub const UNREADABLE_PLACEHOLDER: &str = "[Binary or unreadable file]";

/// The kind of a filesystem entry captured in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
    Symlink,
}

/// A single entry in the materialized directory tree.
///
/// Every node is exclusively owned by its parent's `children` vector; the
/// root has no owner. Directory counters are the exact fold of the node's
/// children: `size` is the sum of child sizes, `file_count` the sum of child
/// file counts, and `dir_count` counts each directory child plus its own
/// `dir_count`. Nodes are append-only while being built and are not mutated
/// once handed back to their parent.
#[derive(Debug, Serialize, Deserialize)]
pub struct Node {
    /// Base name of the filesystem entry.
    pub name: String,
    /// Entry kind; a closed set, never an open string.
    pub kind: NodeKind,
    /// Path relative to the traversal root, used as the stable display key.
    pub rel_path: PathBuf,
    /// Bytes: content length for files, summed child sizes for directories,
    /// always 0 for symlinks.
    pub size: u64,
    /// Recursively aggregated number of file and symlink entries at or below
    /// this node.
    pub file_count: usize,
    /// Recursively aggregated number of directory entries below this node.
    pub dir_count: usize,
    /// 0 at the root, parent depth + 1 for every descendant.
    pub depth: usize,
    /// Ordered children; only directories ever have any.
    pub children: Vec<Node>,
    /// Decoded text for accepted files, or [`UNREADABLE_PLACEHOLDER`].
    /// Directories and symlinks never carry content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Node {
    pub(crate) fn directory(name: String, rel_path: PathBuf, depth: usize) -> Self {
        Self {
            name,
            kind: NodeKind::Directory,
            rel_path,
            size: 0,
            file_count: 0,
            dir_count: 0,
            depth,
            children: Vec::new(),
            content: None,
        }
    }

    pub(crate) fn symlink(name: String, rel_path: PathBuf, depth: usize) -> Self {
        Self {
            name,
            kind: NodeKind::Symlink,
            rel_path,
            size: 0,
            file_count: 1,
            dir_count: 0,
            depth,
            children: Vec::new(),
            content: None,
        }
    }

    pub(crate) fn file(
        name: String,
        rel_path: PathBuf,
        depth: usize,
        size: u64,
        content: String,
    ) -> Self {
        Self {
            name,
            kind: NodeKind::File,
            rel_path,
            size,
            file_count: 1,
            dir_count: 0,
            depth,
            children: Vec::new(),
            content: Some(content),
        }
    }

    /// Sorts children in place: directories first, then files and symlinks,
    /// each group ascending by case-insensitive name. The sort is stable and
    /// local to this node.
    pub fn sort_children(&mut self) {
        self.children
            .sort_by_key(|child| (child.kind != NodeKind::Directory, child.name.to_lowercase()));
    }

    /// Returns all file nodes in sorted depth-first order.
    ///
    /// This is the shared ordering for the content view and the token
    /// estimate; directories and symlinks are excluded.
    pub fn files(&self) -> Vec<&Node> {
        let mut files = Vec::new();
        self.collect_files(&mut files);
        files
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a Node>) {
        if self.kind == NodeKind::File {
            out.push(self);
            return;
        }
        for child in &self.children {
            match child.kind {
                NodeKind::File => out.push(child),
                NodeKind::Directory => child.collect_files(out),
                NodeKind::Symlink => {}
            }
        }
    }
}

/// Running counters for a single ingestion call.
///
/// Created when the walk starts, threaded explicitly through every recursive
/// call, and discarded when the walk returns; never shared between concurrent
/// ingestion calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraversalStats {
    /// Files and symlinks counted so far across the whole tree.
    pub total_files: usize,
    /// Bytes of accepted file content counted so far across the whole tree.
    pub total_size: u64,
}

/// The three rendered views of one ingestion call.
#[derive(Debug, Serialize, Deserialize)]
pub struct Digest {
    /// Fixed-field text block with counts, size, and a token estimate.
    pub summary: String,
    /// ASCII tree diagram of the accepted entries.
    pub tree: String,
    /// Concatenation of every accepted file's content with framing.
    pub content: String,
}
