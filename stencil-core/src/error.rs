//! Error types for stencil-core.

use thiserror::Error;

/// All errors that can arise while assembling the render context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The context input was not valid TOML.
    #[error("failed to parse context input: {0}")]
    Toml(#[from] toml::de::Error),

    /// A CLI override was not of the form `key=value`.
    #[error("malformed override '{raw}': expected <var>=<value>")]
    MalformedOverride { raw: String },

    /// A TOML float with no JSON counterpart (`inf`, `nan`).
    #[error("non-finite number {0} cannot be used as a context value")]
    NonFiniteFloat(f64),
}

impl ContextError {
    /// True for errors that should be reported with a usage line.
    pub fn is_usage(&self) -> bool {
        matches!(self, ContextError::MalformedOverride { .. })
    }
}
