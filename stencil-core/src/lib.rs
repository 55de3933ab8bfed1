//! # stencil-core
//!
//! Context model and merge logic for the stencil template renderer.
//!
//! Call [`ContextBuilder::from_toml_str`] with the TOML read from standard
//! input, layer `key=value` overrides on top, inject the reserved template
//! path, and hand the result to the renderer.

pub mod context;
pub mod error;

pub use context::{parse_override, ContextBuilder, RenderContext, TEMPLATE_PATH_KEY};
pub use error::ContextError;
