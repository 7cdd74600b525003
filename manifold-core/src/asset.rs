//! Asset sources — named template blobs plus JSON normalization.
//!
//! An [`AssetSource`] hands out raw template bytes by name and knows how to
//! normalize a document in its source format (YAML here) into JSON-equivalent
//! bytes. Two implementations ship with the crate:
//!
//! - [`MemoryAssetSource`] — a name → bytes map; the test backbone.
//! - [`DirAssetSource`] — assets resolved relative to a root directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::AssetError;

/// A named-blob store for template sources.
pub trait AssetSource {
    /// Load the raw bytes of the named asset. Unknown names are a fatal
    /// [`AssetError::NotFound`], never an empty result.
    fn asset(&self, name: &str) -> Result<Vec<u8>, AssetError>;

    /// Normalize a document in the source's declared format into
    /// JSON-equivalent bytes.
    fn to_json(&self, raw: &[u8]) -> Result<Vec<u8>, AssetError>;
}

/// YAML → JSON normalization shared by the shipped sources.
pub(crate) fn yaml_to_json(raw: &[u8]) -> Result<Vec<u8>, AssetError> {
    let value: serde_json::Value =
        serde_yaml::from_slice(raw).map_err(|source| AssetError::Normalize { source })?;
    // Infallible: the value came out of a serde deserializer.
    Ok(serde_json::to_vec(&value).unwrap_or_default())
}

// ---------------------------------------------------------------------------
// MemoryAssetSource
// ---------------------------------------------------------------------------

/// In-memory asset source backed by a name → bytes map.
#[derive(Debug, Default, Clone)]
pub struct MemoryAssetSource {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) an asset under `name`.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.assets.insert(name.into(), content.into());
    }
}

impl<N: Into<String>, C: Into<Vec<u8>>> FromIterator<(N, C)> for MemoryAssetSource {
    fn from_iter<T: IntoIterator<Item = (N, C)>>(iter: T) -> Self {
        Self {
            assets: iter
                .into_iter()
                .map(|(n, c)| (n.into(), c.into()))
                .collect(),
        }
    }
}

impl AssetSource for MemoryAssetSource {
    fn asset(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound {
                name: name.to_owned(),
            })
    }

    fn to_json(&self, raw: &[u8]) -> Result<Vec<u8>, AssetError> {
        yaml_to_json(raw)
    }
}

// ---------------------------------------------------------------------------
// DirAssetSource
// ---------------------------------------------------------------------------

/// Asset source reading files relative to a root directory on disk.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirAssetSource {
    fn asset(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.root.join(name);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AssetError::NotFound {
                name: name.to_owned(),
            }),
            Err(source) => Err(AssetError::Load {
                name: name.to_owned(),
                source,
            }),
        }
    }

    fn to_json(&self, raw: &[u8]) -> Result<Vec<u8>, AssetError> {
        yaml_to_json(raw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
