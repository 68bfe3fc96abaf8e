//! Parsing of user-supplied repository sources into canonical queries.

use crate::clone::CloneConfig;
use crate::config;
use crate::error::DigestError;
use crate::options::Limits;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

static URL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn url_pattern() -> &'static Regex {
    URL_PATTERN.get_or_init(|| {
        Regex::new(r"^(?:https?://)?(?:www\.)?github\.com/([^/]+)/([^/]+)(?:/.*)?$")
            .expect("URL pattern is valid")
    })
}

/// A canonical, fully resolved ingestion request.
///
/// `local_path` is a fresh per-query directory under the scratch base; it is
/// the isolation boundary the traversal engine relies on. The pattern sets
/// are validated and carried through but deliberately not applied by the
/// traversal itself.
#[derive(Debug, Clone)]
pub struct IngestionQuery {
    /// Short hex identifier derived from the raw source string.
    pub id: String,
    /// Canonical repository URL; absent for local-directory queries.
    pub url: Option<String>,
    /// Display identifier used in the summary header and error messages.
    pub slug: String,
    /// Root path handed to the traversal engine.
    pub local_path: PathBuf,
    pub limits: Limits,
    pub include_patterns: Option<Vec<String>>,
    pub ignore_patterns: Option<Vec<String>>,
    pub branch: Option<String>,
}

impl IngestionQuery {
    /// Builds a query over an already materialized local directory.
    pub fn local(path: impl Into<PathBuf>, limits: Limits) -> Self {
        let path = path.into();
        let slug = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            id: short_hash(&path.display().to_string()),
            url: None,
            slug,
            local_path: path,
            limits,
            include_patterns: None,
            ignore_patterns: None,
            branch: None,
        }
    }

    /// Extracts the clone collaborator's configuration, if this query refers
    /// to a remote repository.
    pub fn extract_clone_config(&self) -> Option<CloneConfig> {
        self.url.as_ref().map(|url| CloneConfig {
            url: url.clone(),
            local_path: self.local_path.clone(),
            branch: self.branch.clone(),
        })
    }
}

/// Parses a GitHub repository URL into an [`IngestionQuery`].
///
/// Accepts `https://`/`http://` and scheme-less forms, an optional `www.`
/// prefix, a `.git` suffix, and trailing path segments. Pattern strings are
/// comma-separated globs; each is validated here so that bad input fails at
/// the boundary rather than mid-walk.
pub fn parse_query(
    source: &str,
    limits: Limits,
    include_patterns: Option<&str>,
    ignore_patterns: Option<&str>,
) -> Result<IngestionQuery, DigestError> {
    let source = source.trim();

    let captures = url_pattern()
        .captures(source)
        .ok_or_else(|| DigestError::InvalidUrl(source.to_string()))?;
    let owner = &captures[1];
    let repo = captures[2].trim_end_matches(".git");
    if repo.is_empty() {
        return Err(DigestError::InvalidUrl(source.to_string()));
    }

    let url = format!("https://github.com/{owner}/{repo}");
    let slug = format!("{owner}/{repo}");

    let id = short_hash(source);
    let local_path = config::tmp_base_path().join(&id);

    Ok(IngestionQuery {
        id,
        url: Some(url),
        slug,
        local_path,
        limits,
        include_patterns: parse_patterns(include_patterns)?,
        ignore_patterns: parse_patterns(ignore_patterns)?,
        branch: None,
    })
}

fn short_hash(source: &str) -> String {
    blake3::hash(source.as_bytes()).to_hex()[..8].to_string()
}

fn parse_patterns(raw: Option<&str>) -> Result<Option<Vec<String>>, DigestError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let mut patterns = Vec::new();
    for pattern in raw.split(',') {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            continue;
        }
        globset::Glob::new(pattern).map_err(|e| DigestError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        patterns.push(pattern.to_string());
    }
    if patterns.is_empty() {
        Ok(None)
    } else {
        Ok(Some(patterns))
    }
}
