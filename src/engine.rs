use crate::error::DigestError;
use crate::options::Limits;
use crate::output::format_digest;
use crate::query::IngestionQuery;
use crate::types::{Digest, Node, TraversalStats, UNREADABLE_PLACEHOLDER};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;
#[derive(Debug)]
pub(crate) enum ContentError {
    Binary,
    Decode,
    Io(std::io::Error),
}
pub fn ingest_query(query: &IngestionQuery) -> Result<Digest, DigestError> {
    let path = &query.local_path;
    if !path.exists() {
        return Err(DigestError::NotFound {
            slug: query.slug.clone(),
        });
    }
    #[cfg(feature = "logging")]
    tracing::debug!("Starting ingestion of {} at {}", query.slug, path.display());
    let (root, _stats) = walk(path, &query.limits)?;
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Walk finished: {} files, {} directories, {} bytes",
        root.file_count,
        root.dir_count,
        root.size
    );
    Ok(format_digest(&root, &query.slug))
}
pub fn walk(root: &Path, limits: &Limits) -> Result<(Node, TraversalStats), DigestError> {
    if !root.exists() {
        return Err(DigestError::NotFound {
            slug: base_name(root),
        });
    }
    let mut stats = TraversalStats::default();
    let name = base_name(root);
    let node = walk_dir(name.clone(), root, PathBuf::new(), 0, limits, &mut stats)
        .unwrap_or_else(|| Node::directory(name, PathBuf::new(), 0));
    Ok((node, stats))
}
fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
fn walk_dir(
    name: String,
    path: &Path,
    rel_path: PathBuf,
    depth: usize,
    limits: &Limits,
    stats: &mut TraversalStats,
) -> Option<Node> {
    if depth > limits.max_depth
        || stats.total_files >= limits.max_files
        || stats.total_size >= limits.max_total_size
    {
        return None;
    }
    let mut node = Node::directory(name, rel_path, depth);
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(_err) => {
            // Unreadable directory: keep the node, skip its contents.
            #[cfg(feature = "logging")]
            tracing::warn!("Cannot list {}: {}; skipping directory", path.display(), _err);
            return Some(node);
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_err) => {
                #[cfg(feature = "logging")]
                tracing::warn!("Unreadable entry under {}: {}", path.display(), _err);
                continue;
            }
        };
        let entry_name = entry.file_name().to_string_lossy().into_owned();
        if entry_name == ".git" {
            continue;
        }
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(_) => continue,
        };
        let entry_path = entry.path();
        let entry_rel = node.rel_path.join(&entry_name);
        if file_type.is_symlink() {
            stats.total_files += 1;
            node.file_count += 1;
            node.children
                .push(Node::symlink(entry_name, entry_rel, depth + 1));
        } else if file_type.is_file() {
            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(_) => continue,
            };
            if size > limits.max_file_size {
                #[cfg(feature = "logging")]
                tracing::debug!("Skipping {} ({} bytes over per-file limit)", entry_rel.display(), size);
                continue;
            }
            if stats.total_size + size > limits.max_total_size {
                #[cfg(feature = "logging")]
                tracing::debug!("Skipping {} (total-size ceiling reached)", entry_rel.display());
                continue;
            }
            stats.total_files += 1;
            stats.total_size += size;
            // The file that crosses max_files stays counted but is excluded
            // from the tree.
            if stats.total_files > limits.max_files {
                continue;
            }
            let content = match read_file_content(&entry_path) {
                Ok(text) => text,
                Err(_reason) => {
                    #[cfg(feature = "logging")]
                    tracing::debug!("Substituting placeholder for {}: {:?}", entry_rel.display(), _reason);
                    UNREADABLE_PLACEHOLDER.to_string()
                }
            };
            node.size += size;
            node.file_count += 1;
            node.children
                .push(Node::file(entry_name, entry_rel, depth + 1, size, content));
        } else if file_type.is_dir() {
            if let Some(child) = walk_dir(entry_name, &entry_path, entry_rel, depth + 1, limits, stats)
            {
                node.size += child.size;
                node.file_count += child.file_count;
                node.dir_count += 1 + child.dir_count;
                node.children.push(child);
            }
        }
    }
    node.sort_children();
    Some(node)
}
fn read_file_content(path: &Path) -> Result<String, ContentError> {
    let file = File::open(path).map_err(ContentError::Io)?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::with_capacity(4096);
    reader
        .by_ref()
        .take(4096)
        .read_to_end(&mut bytes)
        .map_err(ContentError::Io)?;
    if content_inspector::inspect(&bytes).is_binary() {
        return Err(ContentError::Binary);
    }
    reader.read_to_end(&mut bytes).map_err(ContentError::Io)?;
    String::from_utf8(bytes).map_err(|_| ContentError::Decode)
}
