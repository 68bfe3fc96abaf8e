use repodigest::{
    IngestionQuery,
    Limits,
    LimitsBuilder,
    Node,
    NodeKind,
    UNREADABLE_PLACEHOLDER,
    ingest_query,
    walk,
};
use std::fs;
use tempfile::tempdir;

fn wide_limits() -> Limits {
    LimitsBuilder::new()
        .max_files(1000)
        .max_total_size(50 * 1024 * 1024)
        .max_file_size(1024 * 1024)
        .max_depth(10)
        .build()
}

fn assert_aggregates(node: &Node) {
    if node.kind != NodeKind::Directory {
        return;
    }
    let size: u64 = node.children.iter().map(|c| c.size).sum();
    let file_count: usize = node.children.iter().map(|c| c.file_count).sum();
    let dir_count: usize = node
        .children
        .iter()
        .filter(|c| c.kind == NodeKind::Directory)
        .map(|c| 1 + c.dir_count)
        .sum();
    assert_eq!(node.size, size, "size mismatch at {:?}", node.rel_path);
    assert_eq!(node.file_count, file_count, "file_count mismatch at {:?}", node.rel_path);
    assert_eq!(node.dir_count, dir_count, "dir_count mismatch at {:?}", node.rel_path);
    for child in &node.children {
        assert_eq!(child.depth, node.depth + 1);
        assert_aggregates(child);
    }
}

#[test]
fn test_scenario_tree_rendering() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();
    fs::write(dir.path().join("a/b.txt"), "hello").unwrap();
    fs::write(dir.path().join("a/c.txt"), "world").unwrap();
    fs::write(dir.path().join("z.txt"), "!").unwrap();
    let (root, _) = walk(dir.path(), &wide_limits()).unwrap();
    let query = IngestionQuery::local(dir.path(), wide_limits());
    let digest = ingest_query(&query).unwrap();
    let root_name = &root.name;
    let expected = format!(
        "{root_name}/\n\
         ├── a/\n\
         │   ├── b.txt\n\
         │   └── c.txt\n\
         └── z.txt"
    );
    assert!(digest.tree.contains(&expected), "tree was:\n{}", digest.tree);
}

#[test]
fn test_aggregation_invariants() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/nested")).unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
    fs::write(dir.path().join("src/nested/lib.rs"), "pub fn lib() {}").unwrap();
    fs::write(dir.path().join("docs/guide.md"), "# Guide").unwrap();
    fs::write(dir.path().join("README.md"), "readme").unwrap();
    let (root, stats) = walk(dir.path(), &wide_limits()).unwrap();
    assert_eq!(root.depth, 0);
    assert_eq!(root.file_count, 4);
    assert_eq!(root.dir_count, 3);
    assert_eq!(stats.total_files, 4);
    assert_eq!(stats.total_size, root.size);
    assert_aggregates(&root);
}

#[test]
fn test_children_sorted_dirs_first_case_insensitive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Beta.txt"), "b").unwrap();
    fs::write(dir.path().join("alpha.txt"), "a").unwrap();
    fs::create_dir(dir.path().join("zeta")).unwrap();
    fs::create_dir(dir.path().join("Apple")).unwrap();
    let (root, _) = walk(dir.path(), &wide_limits()).unwrap();
    let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Apple", "zeta", "alpha.txt", "Beta.txt"]);
}

#[test]
fn test_git_directory_skipped() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/main").unwrap();
    fs::write(dir.path().join("kept.txt"), "kept").unwrap();
    let (root, stats) = walk(dir.path(), &wide_limits()).unwrap();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].name, "kept.txt");
    assert_eq!(stats.total_files, 1);
}

#[test]
fn test_oversized_file_skipped_entirely() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("big.txt"), "A".repeat(5000)).unwrap();
    fs::write(dir.path().join("small.txt"), "ok").unwrap();
    let limits = LimitsBuilder::new()
        .max_files(1000)
        .max_total_size(50 * 1024 * 1024)
        .max_file_size(100)
        .max_depth(10)
        .build();
    let (root, stats) = walk(dir.path(), &limits).unwrap();
    assert_eq!(root.file_count, 1);
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].name, "small.txt");
    assert_eq!(stats.total_files, 1);
    assert_eq!(stats.total_size, 2);
    let query = IngestionQuery::local(dir.path(), limits);
    let digest = ingest_query(&query).unwrap();
    assert!(!digest.tree.contains("big.txt"));
    assert!(!digest.content.contains("big.txt"));
    assert!(digest.summary.contains("Files analyzed: 1"));
}

#[test]
fn test_total_size_ceiling_skips_uncounted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "A".repeat(60)).unwrap();
    fs::write(dir.path().join("b.txt"), "B".repeat(60)).unwrap();
    let limits = LimitsBuilder::new()
        .max_files(1000)
        .max_total_size(100)
        .max_file_size(1024)
        .max_depth(10)
        .build();
    let (root, stats) = walk(dir.path(), &limits).unwrap();
    // Only one of the two fits under the 100-byte ceiling.
    assert_eq!(root.file_count, 1);
    assert_eq!(stats.total_files, 1);
    assert_eq!(stats.total_size, 60);
}

#[test]
fn test_depth_limit_prunes_whole_subtree() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("level1/level2")).unwrap();
    fs::write(dir.path().join("level1/kept.txt"), "kept").unwrap();
    fs::write(dir.path().join("level1/level2/dropped.txt"), "dropped").unwrap();
    let limits = LimitsBuilder::new()
        .max_files(1000)
        .max_total_size(50 * 1024 * 1024)
        .max_file_size(1024 * 1024)
        .max_depth(1)
        .build();
    let (root, _) = walk(dir.path(), &limits).unwrap();
    let level1 = &root.children[0];
    assert_eq!(level1.name, "level1");
    assert_eq!(level1.depth, 1);
    // level2 sits past the depth ceiling and is entirely absent.
    assert!(level1.children.iter().all(|c| c.name != "level2"));
    assert_eq!(root.dir_count, 1);
    let query = IngestionQuery::local(dir.path(), limits);
    let digest = ingest_query(&query).unwrap();
    assert!(digest.tree.contains("level1/"));
    assert!(!digest.tree.contains("level2"));
    assert!(!digest.content.contains("dropped.txt"));
    assert!(digest.content.contains("kept.txt"));
}

#[test]
fn test_file_count_limit_counts_but_excludes_crossing_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::write(dir.path().join("b.txt"), "b").unwrap();
    let limits = LimitsBuilder::new()
        .max_files(1)
        .max_total_size(50 * 1024 * 1024)
        .max_file_size(1024 * 1024)
        .max_depth(10)
        .build();
    let (root, stats) = walk(dir.path(), &limits).unwrap();
    // The crossing file is counted in stats yet never appended to the tree.
    assert_eq!(root.file_count, 1);
    assert_eq!(root.children.len(), 1);
    assert_eq!(stats.total_files, 2);
}

#[cfg(unix)]
#[test]
fn test_symlink_accepted_with_zero_size() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("target.txt"), "target").unwrap();
    std::os::unix::fs::symlink(dir.path().join("target.txt"), dir.path().join("link")).unwrap();
    let (root, stats) = walk(dir.path(), &wide_limits()).unwrap();
    let link = root
        .children
        .iter()
        .find(|c| c.name == "link")
        .expect("symlink node missing");
    assert_eq!(link.kind, NodeKind::Symlink);
    assert_eq!(link.size, 0);
    assert!(link.content.is_none());
    assert_eq!(root.file_count, 2);
    assert_eq!(stats.total_files, 2);
    // Symlinks never contribute bytes.
    assert_eq!(stats.total_size, 6);
    assert_aggregates(&root);
    let query = IngestionQuery::local(dir.path(), wide_limits());
    let digest = ingest_query(&query).unwrap();
    assert!(digest.tree.contains("├── link") || digest.tree.contains("└── link"));
    assert!(!digest.tree.contains("link/"));
    assert!(!digest.content.contains("File: link"));
}

#[test]
fn test_binary_file_gets_placeholder_but_counts() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("blob.dat"), [0u8, 1, 2, 3, 255]).unwrap();
    let (root, stats) = walk(dir.path(), &wide_limits()).unwrap();
    assert_eq!(root.file_count, 1);
    assert_eq!(root.size, 5);
    assert_eq!(stats.total_size, 5);
    assert_eq!(root.children[0].content.as_deref(), Some(UNREADABLE_PLACEHOLDER));
    let query = IngestionQuery::local(dir.path(), wide_limits());
    let digest = ingest_query(&query).unwrap();
    assert!(digest.content.contains(UNREADABLE_PLACEHOLDER));
}

#[test]
fn test_invalid_utf8_gets_placeholder() {
    let dir = tempdir().unwrap();
    // Valid-looking text prefix, broken UTF-8 later on.
    let mut bytes = b"almost text ".to_vec();
    bytes.extend_from_slice(&[0xC3, 0x28]);
    fs::write(dir.path().join("broken.txt"), &bytes).unwrap();
    let (root, _) = walk(dir.path(), &wide_limits()).unwrap();
    assert_eq!(root.children[0].content.as_deref(), Some(UNREADABLE_PLACEHOLDER));
}

#[test]
fn test_summary_fields_and_token_estimate() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/data.txt"), "x".repeat(4100)).unwrap();
    let query = IngestionQuery::local(dir.path(), wide_limits());
    let digest = ingest_query(&query).unwrap();
    assert!(digest.summary.starts_with(&format!("Repository: {}\n", query.slug)));
    assert!(digest.summary.contains("Files analyzed: 1\n"));
    assert!(digest.summary.contains("Directories: 1\n"));
    assert!(digest.summary.contains(&format!("Total size: {:.2} KB\n", 4100.0 / 1024.0)));
    // 4100 chars / 4 = 1025 tokens, rendered with a thousands separator.
    assert!(digest.summary.contains("Estimated tokens: 1,025\n"));
}

#[test]
fn test_content_view_framing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), "payload").unwrap();
    let query = IngestionQuery::local(dir.path(), wide_limits());
    let digest = ingest_query(&query).unwrap();
    let separator = "=".repeat(80);
    assert!(digest.content.starts_with("File Contents:\n\n"));
    assert!(digest.content.contains(&format!(
        "{separator}\nFile: only.txt\n{separator}\npayload\n"
    )));
}

#[test]
fn test_missing_root_is_not_found() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    assert!(walk(&missing, &wide_limits()).is_err());
    let mut query = IngestionQuery::local(dir.path(), wide_limits());
    query.slug = "owner/repo".to_string();
    query.local_path = missing;
    let err = ingest_query(&query).unwrap_err();
    assert_eq!(err.to_string(), "owner/repo cannot be found");
}

#[test]
fn test_tree_and_content_views_list_same_files_in_order() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/inner")).unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("src/zz.rs"), "z").unwrap();
    fs::write(dir.path().join("src/inner/deep.rs"), "d").unwrap();
    fs::write(dir.path().join("docs/a.md"), "a").unwrap();
    fs::write(dir.path().join("top.txt"), "t").unwrap();
    let query = IngestionQuery::local(dir.path(), wide_limits());
    let digest = ingest_query(&query).unwrap();

    let tree_paths = parse_tree_file_paths(&digest.tree);
    let content_paths: Vec<String> = digest
        .content
        .lines()
        .filter_map(|line| line.strip_prefix("File: "))
        .map(str::to_string)
        .collect();
    assert_eq!(tree_paths, content_paths);
    assert_eq!(
        content_paths,
        vec!["docs/a.md", "src/inner/deep.rs", "src/zz.rs", "top.txt"]
    );
}

// Re-derives file paths from the rendered tree via connector/suffix parsing.
fn parse_tree_file_paths(tree: &str) -> Vec<String> {
    let mut stack: Vec<String> = Vec::new();
    let mut paths = Vec::new();
    for line in tree.lines() {
        let chars: Vec<char> = line.chars().collect();
        let Some(connector_at) = chars.iter().position(|&c| c == '├' || c == '└') else {
            continue;
        };
        let depth = connector_at / 4 + 1;
        let name: String = chars[connector_at + 4..].iter().collect();
        stack.truncate(depth - 1);
        if let Some(dir_name) = name.strip_suffix('/') {
            stack.push(dir_name.to_string());
        } else {
            let mut parts = stack.clone();
            parts.push(name);
            paths.push(parts.join("/"));
        }
    }
    paths
}
