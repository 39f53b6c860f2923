//! Input discovery for the generation jobs.
//!
//! Each configured glob is split into a literal directory and a file-name
//! pattern. Directories are only read when the iterator reaches them, so a
//! scan reflects the filesystem at iteration time, and re-scanning re-reads it.

use globset::{Glob, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}'];

/// Error for globs the scanner cannot enumerate.
#[derive(Debug, Error)]
pub enum GlobError {
    /// Glob syntax appears outside the final path component.
    #[error("glob syntax is only allowed in the file name component")]
    NestedPattern,

    /// The glob ends with a separator.
    #[error("glob has no file name component")]
    MissingFileName,

    /// The file-name pattern failed to compile.
    #[error(transparent)]
    Invalid(#[from] globset::Error),
}

/// Split a glob into its literal directory and a compiled file-name matcher.
pub fn split_glob(pattern: &str) -> Result<(PathBuf, GlobMatcher), GlobError> {
    let normalized = pattern.trim().replace('\\', "/");
    let (dir, name) = match normalized.rsplit_once('/') {
        Some((dir, name)) => (dir, name),
        None => ("", normalized.as_str()),
    };

    if dir.contains(GLOB_META) {
        return Err(GlobError::NestedPattern);
    }
    if name.is_empty() {
        return Err(GlobError::MissingFileName);
    }

    let matcher = Glob::new(name)?.compile_matcher();
    Ok((PathBuf::from(dir), matcher))
}

#[derive(Debug)]
struct ScanRule {
    dir: PathBuf,
    matcher: GlobMatcher,
}

impl ScanRule {
    /// Files in `root/dir` whose names match, sorted by name.
    ///
    /// Hidden entries are never matched. A missing or unreadable directory
    /// yields nothing.
    fn matching_files(&self, root: &Path) -> Vec<PathBuf> {
        let dir = root.join(&self.dir);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let name = entry.file_name();
                !name.as_encoded_bytes().starts_with(b".") && self.matcher.is_match(name)
            })
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        files.sort();
        files
    }
}

/// Lazily enumerates files matching a union of globs under a project root.
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    rules: Vec<ScanRule>,
}

impl Scanner {
    /// Build a scanner for `patterns`, each relative to `root`.
    pub fn new<P: AsRef<Path>>(root: P, patterns: &[String]) -> Result<Self, GlobError> {
        let rules = patterns
            .iter()
            .map(|pattern| split_glob(pattern).map(|(dir, matcher)| ScanRule { dir, matcher }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            rules,
        })
    }

    /// Iterate matching files, glob by glob in configuration order.
    pub fn scan(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.rules
            .iter()
            .flat_map(move |rule| rule.matching_files(&self.root))
    }

    /// Owning version of [`Scanner::scan`].
    pub fn into_scan(self) -> impl Iterator<Item = PathBuf> {
        let root = self.root;
        self.rules
            .into_iter()
            .flat_map(move |rule| rule.matching_files(&root))
    }
}
