//! Error types for manifold-renderer.

use manifold_core::AssetError;
use thiserror::Error;

/// Stable sentinel embedded in the [`RenderError::EmptyAsset`] message.
///
/// The variant is the primary signal; the marker exists so callers that only
/// see a flattened error string (an untyped error channel) can still detect
/// the condition via [`message_is_empty_asset`].
pub const EMPTY_ASSET_MARKER: &str = "ERROR_EMPTY_ASSET_AFTER_TEMPLATING";

/// All errors that can arise from template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Asset load or normalization failure.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The asset bytes are not valid UTF-8 and cannot be templated.
    #[error("asset {name} is not valid UTF-8")]
    InvalidUtf8 { name: String },

    /// Template parse or execution failure, annotated with the asset name.
    #[error("template error in {name}: {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// The rendered output contains nothing but comments and blank lines.
    /// Soft: callers skip the file and continue the batch.
    #[error("asset {name} becomes ERROR_EMPTY_ASSET_AFTER_TEMPLATING")]
    EmptyAsset { name: String },
}

impl RenderError {
    /// True when this is the soft empty-after-rendering signal.
    pub fn is_empty_asset(&self) -> bool {
        matches!(self, RenderError::EmptyAsset { .. })
    }
}

/// Predicate form of [`RenderError::is_empty_asset`].
pub fn is_empty_asset(err: &RenderError) -> bool {
    err.is_empty_asset()
}

/// Fallback detection for errors flattened into strings by an untyped
/// channel. Prefer [`is_empty_asset`] whenever the typed error is available.
pub fn message_is_empty_asset(message: &str) -> bool {
    message.contains(EMPTY_ASSET_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_asset_message_carries_the_marker() {
        let err = RenderError::EmptyAsset {
            name: "a.yaml".to_owned(),
        };
        assert!(err.is_empty_asset());
        assert!(message_is_empty_asset(&err.to_string()));
        assert!(err.to_string().contains("a.yaml"));
    }

    #[test]
    fn other_errors_are_not_empty_asset() {
        let err = RenderError::InvalidUtf8 {
            name: "a.yaml".to_owned(),
        };
        assert!(!err.is_empty_asset());
        assert!(!message_is_empty_asset(&err.to_string()));
    }
}
