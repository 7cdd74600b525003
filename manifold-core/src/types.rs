//! Domain types for rendered manifests and their cluster coordinates.
//!
//! Everything here is serializable via serde; YAML manifests are decoded with
//! serde_yaml, JSON-normalized documents with serde_json.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Cluster coordinates
// ---------------------------------------------------------------------------

/// Fully-qualified kind identity: API group, version, and kind name.
///
/// The core (legacy) API group is the empty string, so `v1 ConfigMap` is
/// `GroupVersionKind { group: "", version: "v1", kind: "ConfigMap" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Split a manifest `apiVersion` field (`"apps/v1"` or bare `"v1"`) into
    /// group and version, pairing it with `kind`.
    pub fn from_api_version(api_version: &str, kind: impl Into<String>) -> Self {
        match api_version.split_once('/') {
            Some((group, version)) => Self::new(group, version, kind),
            None => Self::new("", api_version, kind),
        }
    }

    /// The `apiVersion` form of this identity (`"apps/v1"`, or `"v1"` for the
    /// core group).
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}

/// A kind resolved to its API resource: the target of get/create/update calls.
///
/// Produced by discovery (see `DiscoveryClient` in manifold-apply); `resource`
/// is the plural resource name, e.g. `deployments`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceMapping {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl ResourceMapping {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for ResourceMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}/{}", self.version, self.resource)
        } else {
            write!(f, "{}/{}/{}", self.group, self.version, self.resource)
        }
    }
}

// ---------------------------------------------------------------------------
// Typed objects
// ---------------------------------------------------------------------------

/// Standard object metadata carried by every manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    /// Optimistic-concurrency token; must be carried forward on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,
}

/// An `apps/v1` Deployment — the one statically-registered typed kind.
///
/// The spec body is kept as raw JSON: the per-kind apply strategy owns its
/// interpretation, the core only needs identity and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: Value,
}

impl Deployment {
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or("")
    }

    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or("")
    }
}

/// The closed set of statically-typed decode targets.
///
/// Call sites pattern-match instead of downcasting; adding a kind means adding
/// a variant and registering its decoder in [`crate::registry::KindRegistry`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypedObject {
    Deployment(Deployment),
}

impl TypedObject {
    /// Short type name used when annotating errors, mirroring the kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedObject::Deployment(_) => "Deployment",
        }
    }
}

// ---------------------------------------------------------------------------
// Generic objects
// ---------------------------------------------------------------------------

/// An untyped manifest: a JSON object tagged (usually) with
/// apiVersion/kind/metadata, used when no typed kind is registered.
///
/// Accessors return `""`/`None` for absent fields rather than failing, since
/// non-manifest documents are tolerated by the generic decode path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenericObject(Value);

impl GenericObject {
    /// Wrap a JSON value. The decoder guarantees the value is an object;
    /// non-object values make every accessor return its absent default.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn api_version(&self) -> Option<&str> {
        self.0.get("apiVersion").and_then(Value::as_str)
    }

    pub fn kind(&self) -> Option<&str> {
        self.0.get("kind").and_then(Value::as_str)
    }

    fn metadata_str(&self, field: &str) -> Option<&str> {
        self.0
            .get("metadata")
            .and_then(|m| m.get(field))
            .and_then(Value::as_str)
    }

    pub fn name(&self) -> &str {
        self.metadata_str("name").unwrap_or("")
    }

    pub fn namespace(&self) -> &str {
        self.metadata_str("namespace").unwrap_or("")
    }

    pub fn resource_version(&self) -> Option<&str> {
        self.metadata_str("resourceVersion")
    }

    /// Set `metadata.resourceVersion`, creating the metadata mapping if the
    /// manifest lacks one. No-op on a non-object root.
    pub fn set_resource_version(&mut self, resource_version: impl Into<String>) {
        let Some(root) = self.0.as_object_mut() else {
            return;
        };
        let metadata = root
            .entry("metadata")
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if let Some(metadata) = metadata.as_object_mut() {
            metadata.insert(
                "resourceVersion".to_owned(),
                Value::String(resource_version.into()),
            );
        }
    }

    /// The declared kind identity, or `None` when `kind` or `apiVersion` is
    /// missing (the caller decides whether that is fatal).
    pub fn group_version_kind(&self) -> Option<GroupVersionKind> {
        let api_version = self.api_version()?;
        let kind = self.kind()?;
        if kind.is_empty() {
            return None;
        }
        Some(GroupVersionKind::from_api_version(api_version, kind))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
