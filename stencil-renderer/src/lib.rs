//! # stencil-renderer
//!
//! Tera-based engine that renders a single on-disk template with a merged
//! key/value context and the `color_mix` helper.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use stencil_core::ContextBuilder;
//! use stencil_renderer::TemplateEngine;
//!
//! fn render(path: &Path) {
//!     if let Ok(engine) = TemplateEngine::from_file(path) {
//!         let context = ContextBuilder::default().build();
//!         if let Ok(text) = engine.render(&context) {
//!             println!("{text}");
//!         }
//!     }
//! }
//! ```

pub mod color;
pub mod engine;
pub mod error;

pub use engine::TemplateEngine;
pub use error::RenderError;
