//! Stencil — template rendering CLI.
//!
//! # Usage
//!
//! ```text
//! stencil [<var>=<value>...] <template-path>
//! ```
//!
//! Context comes from TOML on standard input, layered under `key=value`
//! overrides; the rendered template is printed to standard output. The
//! template's path relative to the enclosing repository root is available
//! inside templates as `template_path`.

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use stencil_core::{parse_override, ContextBuilder, ContextError};
use stencil_detector::resolve_repo_root;
use stencil_renderer::TemplateEngine;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "stencil",
    version,
    about = "Render a template with TOML context from stdin and key=value overrides",
    long_about = None,
)]
struct Cli {
    /// Zero or more `<var>=<value>` overrides followed by the template path.
    #[arg(value_name = "VAR=VALUE ... TEMPLATE", required = true)]
    args: Vec<String>,
}

impl Cli {
    fn run(self) -> Result<()> {
        let Some((template, overrides)) = self.args.split_last() else {
            anyhow::bail!("missing template path");
        };

        // Argument validation happens before any I/O: a malformed override
        // must fail the run without a render being attempted.
        let mut pairs = Vec::with_capacity(overrides.len());
        for raw in overrides {
            let (key, value) = parse_override(raw)?;
            pairs.push((key.to_owned(), value.to_owned()));
        }

        let resolved = resolve_repo_root(Path::new(template))
            .with_context(|| format!("cannot load template '{template}'"))?;

        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read context from stdin")?;

        let mut builder = ContextBuilder::from_toml_str(&input)?;
        for (key, value) in pairs {
            builder.set_string(key, value);
        }
        builder.set_template_path(resolved.rel_str());

        let engine = TemplateEngine::from_file(&resolved.template_path())?;
        let rendered = engine.render(&builder.build())?;
        println!("{rendered}");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

const USAGE: &str = "usage: stencil [<var>=<value>...] <template-path>";

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap exits 2 on argument errors by default; this tool always
            // exits 1 on failure, with --help/--version still exiting 0.
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let usage = err
                .downcast_ref::<ContextError>()
                .is_some_and(ContextError::is_usage);
            if usage {
                eprintln!("{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}
