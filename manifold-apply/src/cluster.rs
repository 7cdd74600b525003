//! Cluster-facing traits — the seams where the transport client, discovery,
//! and per-kind apply strategies plug in. None of these are implemented here
//! beyond [`CachedDiscovery`]; real clients and fakes both live with callers.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use manifold_core::{Deployment, GenericObject, GroupVersionKind, ResourceMapping};
use manifold_renderer::RenderError;

/// Opaque failure from a cluster call or injected strategy.
pub type ClusterError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Namespaced get/create/update for arbitrary resources.
///
/// `get` distinguishes not-found (`Ok(None)`) from every other failure
/// (`Err`); the reconciler creates on the former and aborts on the latter.
pub trait DynamicClusterClient {
    fn get(
        &self,
        mapping: &ResourceMapping,
        namespace: &str,
        name: &str,
    ) -> Result<Option<GenericObject>, ClusterError>;

    fn create(
        &self,
        mapping: &ResourceMapping,
        namespace: &str,
        object: &GenericObject,
    ) -> Result<GenericObject, ClusterError>;

    fn update(
        &self,
        mapping: &ResourceMapping,
        namespace: &str,
        object: &GenericObject,
    ) -> Result<GenericObject, ClusterError>;
}

/// Resolves a declared kind identity to its API resource.
pub trait DiscoveryClient {
    fn resource_for(&self, gvk: &GroupVersionKind) -> Result<ResourceMapping, ClusterError>;
}

/// Memoizing wrapper over a [`DiscoveryClient`].
///
/// Construct once and reuse across batches: each kind costs one discovery
/// round trip per process, and a mapping learned stays until the process
/// restarts — a custom resource definition registered mid-batch will not be
/// visible within the same run. Lookups are synchronized internally, but the
/// cache is designed for sequential reuse, not concurrent mutation from
/// multiple batches.
pub struct CachedDiscovery<D> {
    inner: D,
    cache: Mutex<HashMap<GroupVersionKind, ResourceMapping>>,
}

impl<D: DiscoveryClient> CachedDiscovery<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<D: DiscoveryClient> DiscoveryClient for CachedDiscovery<D> {
    fn resource_for(&self, gvk: &GroupVersionKind) -> Result<ResourceMapping, ClusterError> {
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(gvk)
        {
            return Ok(hit.clone());
        }
        let mapping = self.inner.resource_for(gvk)?;
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(gvk.clone(), mapping.clone());
        Ok(mapping)
    }
}

/// Injected per-kind apply strategy for the one typed kind.
///
/// Owns all update-vs-no-op decisioning for Deployments: the pipeline hands
/// it a freshly decoded object per file plus an expected-generation hint and
/// reports its failure annotated with the file name.
pub trait DeploymentApplier {
    /// Returns the object as applied and whether the cluster state changed.
    fn apply(
        &self,
        deployment: &Deployment,
        expected_generation: i64,
    ) -> Result<(Deployment, bool), ClusterError>;
}

/// How a single file ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Object did not exist; it was created.
    Created,
    /// Object existed; it was replaced wholesale.
    Updated,
    /// Object existed and already matched; nothing written.
    Unchanged,
    /// File rendered to nothing meaningful; no cluster call issued.
    Skipped,
}

/// Per-file result collected by a [`DirectApplier`].
#[derive(Debug)]
pub struct DirectApplyReport {
    pub file: String,
    /// Kind of the decoded object, when decoding got that far.
    pub object_kind: Option<String>,
    pub result: Result<ApplyOutcome, ClusterError>,
}

/// Render callback handed to a [`DirectApplier`]: file name → manifest bytes.
pub type RenderFn<'a> = dyn FnMut(&str) -> Result<Vec<u8>, RenderError> + 'a;

/// Injected strategy applying many standard resources in one pass.
///
/// Implementations render each file through the callback, apply the result
/// their own way, and report per file — collecting, never short-circuiting.
/// The pipeline decides afterwards which reported error aborts the batch.
pub trait DirectApplier {
    fn apply_all(&self, render: &mut RenderFn<'_>, files: &[&str]) -> Vec<DirectApplyReport>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
