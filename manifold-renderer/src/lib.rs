//! # manifold-renderer
//!
//! Template engine and asset renderer: turns a named asset plus an optional
//! shared header and a values object into concrete manifest bytes, with
//! empty-after-rendering detection so optional resources vanish cleanly.
//!
//! ## Usage
//!
//! ```rust
//! use manifold_core::MemoryAssetSource;
//! use manifold_renderer::{is_empty_asset, render_asset};
//! use serde_json::json;
//!
//! let source: MemoryAssetSource =
//!     [("cm.yaml", "kind: ConfigMap\nmetadata:\n  name: {{ name }}\n")]
//!         .into_iter()
//!         .collect();
//! match render_asset("cm.yaml", "", &source, &json!({"name": "cfg"})) {
//!     Ok(bytes) => assert!(!bytes.is_empty()),
//!     Err(e) if is_empty_asset(&e) => { /* skip this file */ }
//!     Err(e) => panic!("{e}"),
//! }
//! ```

pub mod engine;
pub mod error;
mod funcs;
pub mod render;

pub use engine::{CompiledTemplate, TemplateEngine};
pub use error::{
    is_empty_asset, message_is_empty_asset, RenderError, EMPTY_ASSET_MARKER,
};
pub use render::render_asset;
