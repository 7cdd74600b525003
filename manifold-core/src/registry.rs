//! Caller-constructed registry of statically-typed kinds.
//!
//! No global scheme: a [`KindRegistry`] is a plain value the caller builds,
//! registering the handful of kinds the system decodes into typed objects.
//! Bytes for any other kind fail typed decode with
//! [`DecodeError::UnknownKind`]; the generic decode path is the fallback for
//! those (see manifold-apply).

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::DecodeError;
use crate::types::{Deployment, GroupVersionKind, TypedObject};

/// Decoder for one registered kind: raw manifest bytes → typed object.
pub type DecodeFn = fn(&[u8]) -> Result<TypedObject, DecodeError>;

/// The apiVersion/kind envelope peeked off a manifest before dispatch.
#[derive(Debug, Deserialize)]
struct TypeMeta {
    #[serde(default, rename = "apiVersion")]
    api_version: String,
    #[serde(default)]
    kind: String,
}

/// Registry mapping kind identities to typed decoders.
#[derive(Debug, Default)]
pub struct KindRegistry {
    decoders: HashMap<GroupVersionKind, DecodeFn>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the one kind this system ships typed support for:
    /// `apps/v1 Deployment`.
    pub fn with_deployment() -> Self {
        let mut registry = Self::new();
        registry.register(
            GroupVersionKind::new("apps", "v1", "Deployment"),
            decode_deployment,
        );
        registry
    }

    /// Register (or replace) the decoder for a kind identity.
    pub fn register(&mut self, gvk: GroupVersionKind, decode: DecodeFn) {
        self.decoders.insert(gvk, decode);
    }

    pub fn is_registered(&self, gvk: &GroupVersionKind) -> bool {
        self.decoders.contains_key(gvk)
    }

    /// Decode manifest bytes into one of the registered typed kinds.
    ///
    /// Fails with [`DecodeError::MissingKind`] when the document declares no
    /// kind, and [`DecodeError::UnknownKind`] when the declared kind has no
    /// registered decoder.
    pub fn decode(&self, raw: &[u8]) -> Result<TypedObject, DecodeError> {
        let meta: TypeMeta = serde_yaml::from_slice(raw)?;
        if meta.kind.is_empty() {
            return Err(DecodeError::MissingKind);
        }
        let gvk = GroupVersionKind::from_api_version(&meta.api_version, meta.kind.as_str());
        match self.decoders.get(&gvk) {
            Some(decode) => decode(raw),
            None => Err(DecodeError::UnknownKind {
                api_version: meta.api_version,
                kind: meta.kind,
            }),
        }
    }
}

fn decode_deployment(raw: &[u8]) -> Result<TypedObject, DecodeError> {
    let deployment: Deployment = serde_yaml::from_slice(raw)?;
    Ok(TypedObject::Deployment(deployment))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
