//! Repository-root discovery for `stencil-detector`.
//!
//! `resolve_repo_root(path)` walks upward from a template's containing
//! directory until it finds a `.git` marker directory and expresses the
//! template's path relative to that root. Reaching the filesystem root
//! without a marker is not an error: the filesystem root itself becomes
//! the resolved root.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Directory entry that marks a repository root.
///
/// Must be a directory; a `.git` file (worktree pointer) does not count.
pub const REPO_MARKER: &str = ".git";

/// A resolved repository root for a template path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoot {
    /// Nearest marker-bearing ancestor, or the filesystem root.
    pub root: PathBuf,
    /// Template path relative to `root`.
    pub template_rel: PathBuf,
}

impl ResolvedRoot {
    /// The relative path with forward-slash segments on every platform.
    pub fn rel_str(&self) -> String {
        self.template_rel.to_string_lossy().replace('\\', "/")
    }

    /// Absolute (canonical) template path, reassembled from root and rel.
    pub fn template_path(&self) -> PathBuf {
        self.root.join(&self.template_rel)
    }
}

/// Errors from repository-root resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The template path could not be canonicalized (missing, unreadable).
    #[error("cannot resolve template path {path}: {source}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Resolve the repository root enclosing `template_path`.
///
/// Walks from the template's containing directory upward, one level at a
/// time, and stops at the first directory whose [`REPO_MARKER`] entry is a
/// directory. Resolution never fails on an existing template: without a
/// marker the filesystem root is used as-is.
pub fn resolve_repo_root(template_path: &Path) -> Result<ResolvedRoot, ResolveError> {
    let canonical =
        fs::canonicalize(template_path).map_err(|source| ResolveError::Canonicalize {
            path: template_path.to_path_buf(),
            source,
        })?;

    let mut dir = canonical.parent().unwrap_or(canonical.as_path());
    loop {
        if dir.join(REPO_MARKER).is_dir() {
            break;
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            // Filesystem root without a marker: silent fallback, not an error.
            None => break,
        }
    }

    tracing::debug!(
        "repo root for {} is {}",
        canonical.display(),
        dir.display()
    );
    let template_rel = canonical
        .strip_prefix(dir)
        .unwrap_or(canonical.as_path())
        .to_path_buf();
    Ok(ResolvedRoot {
        root: dir.to_path_buf(),
        template_rel,
    })
}
