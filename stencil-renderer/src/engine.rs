//! Tera engine wiring — template discovery, helper registration, rendering.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tera::Tera;

use stencil_core::RenderContext;

use crate::color;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

/// Template names use `/` separators regardless of platform.
fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

/// Load every file under `dir` as a template named relative to `dir`.
///
/// Non-UTF-8 files cannot be templates and are skipped.
fn load_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        match std::fs::read_to_string(&path) {
            Ok(contents) => templates.push((name, contents)),
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::debug!("skipping non-text file {}", path.display());
            }
            Err(e) => return Err(io_err(&path, e)),
        }
    }
    Ok(templates)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine bound to one on-disk template.
///
/// Every file under the template's containing directory is registered under
/// its directory-relative name, so `{% include %}`, `{% import %}`, and
/// `{% extends %}` resolve the way they read in the template source.
/// Autoescaping is off: output is trusted plain text, not sanitized HTML.
#[derive(Debug)]
pub struct TemplateEngine {
    tera: Tera,
    main: String,
}

impl TemplateEngine {
    /// Load `template_path` plus its sibling templates and register helpers.
    pub fn from_file(template_path: &Path) -> Result<Self, RenderError> {
        let invalid = || RenderError::InvalidTemplatePath {
            path: template_path.to_path_buf(),
        };
        let main = template_path
            .file_name()
            .map(|name| normalize_template_name(Path::new(name)))
            .ok_or_else(invalid)?;
        let dir = match template_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let templates = load_templates(dir)?;
        if !templates.iter().any(|(name, _)| *name == main) {
            return Err(io_err(
                template_path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "template file not found"),
            ));
        }

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(templates)?;
        tera.register_function("color_mix", color::color_mix);
        Ok(TemplateEngine { tera, main })
    }

    /// Render the main template with the merged context.
    pub fn render(&self, context: &RenderContext) -> Result<String, RenderError> {
        let tera_ctx = tera::Context::from_value(Value::Object(context.clone()))?;
        Ok(self.tera.render(&self.main, &tera_ctx)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
