//! Generic object decoding — rendered bytes to an untyped structured object.

use manifold_core::{AssetSource, DecodeError, GenericObject};
use serde_json::Value;

/// Decode rendered bytes into a [`GenericObject`].
///
/// The bytes are first normalized to JSON by the asset source (which declares
/// the source format), then parsed into a generic attribute map. A document
/// that parses but lacks `kind`/`apiVersion` still yields a best-effort
/// object — non-manifest YAML-ish content passes through without erroring
/// the batch; only structural failures (unparseable document, non-mapping
/// root) are fatal for the file.
pub fn to_generic_object(
    source: &dyn AssetSource,
    raw: &[u8],
) -> Result<GenericObject, DecodeError> {
    let json = source.to_json(raw)?;
    let value: Value = serde_json::from_slice(&json)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    let object = GenericObject::new(value);
    if object.kind().is_none() {
        tracing::debug!("decoded document declares no kind; passing through as-is");
    }
    Ok(object)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
