//! Error types for manifold-apply.
//!
//! Hard failures carry the originating file name and, where known, the
//! decoded type, so a batch failure is diagnosable without a stack trace.
//! The one soft condition — EmptyAsset — arrives wrapped in
//! [`ApplyError::Render`] and is detected via [`ApplyError::is_empty_asset`].

use manifold_core::{DecodeError, GroupVersionKind};
use manifold_renderer::RenderError;
use thiserror::Error;

use crate::cluster::ClusterError;

/// All errors that can abort a batch apply.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// Load, parse, render, or empty-asset failure from the renderer.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Rendered bytes could not be decoded into an object.
    #[error("{file}: {source}")]
    Decode {
        file: String,
        #[source]
        source: DecodeError,
    },

    /// The rendered object declares no kind, so no resource can be resolved.
    #[error("{file}: manifest does not declare apiVersion/kind")]
    MissingKind { file: String },

    /// Discovery could not map the declared kind to a resource.
    #[error("{file}: cannot resolve resource for {gvk}: {source}")]
    Discovery {
        file: String,
        gvk: GroupVersionKind,
        #[source]
        source: ClusterError,
    },

    /// Get failed with something other than not-found.
    #[error("{file} ({object_type}): get failed: {source}")]
    Get {
        file: String,
        object_type: String,
        #[source]
        source: ClusterError,
    },

    /// Create failed for an object that did not exist.
    #[error("{file} ({object_type}): create failed: {source}")]
    Create {
        file: String,
        object_type: String,
        #[source]
        source: ClusterError,
    },

    /// Update failed for an existing object.
    #[error("{file} ({object_type}): update failed: {source}")]
    Update {
        file: String,
        object_type: String,
        #[source]
        source: ClusterError,
    },

    /// The injected per-kind apply strategy failed.
    #[error("{file} ({object_type}): apply failed: {source}")]
    Strategy {
        file: String,
        object_type: String,
        #[source]
        source: ClusterError,
    },

    /// A direct-apply report carried a hard error.
    #[error("{file} ({object_type}): {source}")]
    Direct {
        file: String,
        object_type: String,
        #[source]
        source: ClusterError,
    },
}

impl ApplyError {
    /// True when this wraps the soft empty-after-rendering signal.
    pub fn is_empty_asset(&self) -> bool {
        matches!(self, ApplyError::Render(e) if e.is_empty_asset())
    }
}
