//! Repo-root resolution tests for `stencil-detector`.
//!
//! Each case gets an isolated `TempDir` — no shared state.

use std::fs;
use std::path::{Path, PathBuf};

use rstest::rstest;
use stencil_detector::{resolve_repo_root, ResolveError, REPO_MARKER};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_template(path: &Path) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, "{{ x }}").expect("write template");
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).expect("canonicalize")
}

// ---------------------------------------------------------------------------
// Marker discovery
// ---------------------------------------------------------------------------

#[rstest]
#[case("repo/themes/sub/main.tera", "repo", "themes/sub/main.tera")]
#[case("repo/themes/main.tera", "repo", "themes/main.tera")]
#[case("repo/main.tera", "repo", "main.tera")]
fn marker_ancestor_becomes_root(
    #[case] template: &str,
    #[case] marker_dir: &str,
    #[case] expected_rel: &str,
) {
    let base = TempDir::new().expect("tempdir");
    fs::create_dir_all(base.path().join(marker_dir).join(REPO_MARKER)).expect("marker");
    let template_path = base.path().join(template);
    write_template(&template_path);

    let resolved = resolve_repo_root(&template_path).expect("resolve");
    assert_eq!(resolved.rel_str(), expected_rel);
    assert_eq!(resolved.root, canonical(&base.path().join(marker_dir)));
}

#[test]
fn nearest_marker_wins() {
    let base = TempDir::new().expect("tempdir");
    fs::create_dir_all(base.path().join(REPO_MARKER)).expect("outer marker");
    fs::create_dir_all(base.path().join("themes").join(REPO_MARKER)).expect("inner marker");
    let template_path = base.path().join("themes").join("dark.tera");
    write_template(&template_path);

    let resolved = resolve_repo_root(&template_path).expect("resolve");
    assert_eq!(resolved.rel_str(), "dark.tera");
    assert_eq!(resolved.root, canonical(&base.path().join("themes")));
}

#[test]
fn marker_file_does_not_count() {
    let base = TempDir::new().expect("tempdir");
    fs::create_dir_all(base.path().join(REPO_MARKER)).expect("outer marker");
    let repo = base.path().join("worktree");
    let template_path = repo.join("main.tera");
    write_template(&template_path);
    fs::write(repo.join(REPO_MARKER), "gitdir: elsewhere").expect("marker file");

    let resolved = resolve_repo_root(&template_path).expect("resolve");
    assert_eq!(resolved.root, canonical(base.path()));
    assert_eq!(resolved.rel_str(), "worktree/main.tera");
}

// ---------------------------------------------------------------------------
// Fallback and failure paths
// ---------------------------------------------------------------------------

#[test]
fn no_marker_falls_back_without_failing() {
    let base = TempDir::new().expect("tempdir");
    let template_path = base.path().join("themes").join("plain.tera");
    write_template(&template_path);

    let resolved = resolve_repo_root(&template_path).expect("resolve");
    // The walk terminates either at a real marker somewhere above the
    // tempdir or at the filesystem root, and the pieces reassemble into
    // the canonical template path.
    assert!(resolved.root.parent().is_none() || resolved.root.join(REPO_MARKER).is_dir());
    assert_eq!(resolved.template_path(), canonical(&template_path));
    assert!(!resolved.rel_str().starts_with('/'));
}

#[test]
fn missing_template_is_an_error() {
    let base = TempDir::new().expect("tempdir");
    let err = resolve_repo_root(&base.path().join("absent.tera")).expect_err("must fail");
    assert!(matches!(err, ResolveError::Canonicalize { .. }));
    assert!(err.to_string().contains("absent.tera"));
}
