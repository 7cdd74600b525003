//! Error types for manifold-core.

use thiserror::Error;

/// All errors that can arise from asset loading and normalization.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset source has no entry under the requested name.
    #[error("asset {name} not found")]
    NotFound { name: String },

    /// Underlying I/O failure while loading an asset (directory sources).
    #[error("failed to load asset {name}: {source}")]
    Load {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be normalized into a JSON-equivalent form.
    #[error("cannot normalize asset to JSON: {source}")]
    Normalize {
        #[source]
        source: serde_yaml::Error,
    },
}

/// All errors that can arise from decoding rendered manifest bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The manifest is not parseable YAML.
    #[error("failed to parse manifest YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON-normalized manifest is not parseable JSON.
    #[error("failed to parse normalized manifest JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Asset-source normalization failed while decoding.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The manifest declares no `kind`.
    #[error("manifest does not declare a kind")]
    MissingKind,

    /// The declared kind has no registered typed decoder.
    #[error("no registered type for {api_version} {kind}")]
    UnknownKind { api_version: String, kind: String },

    /// The document root is not a mapping (e.g. a bare scalar or list).
    #[error("manifest root is not a mapping")]
    NotAnObject,
}
