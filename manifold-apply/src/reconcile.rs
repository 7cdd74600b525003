//! Get-then-create-or-update reconciliation for one generic object.

use manifold_core::{GenericObject, ResourceMapping};
use thiserror::Error;

use crate::cluster::{ApplyOutcome, ClusterError, DynamicClusterClient};

/// Cluster-call failure during one reconcile, by phase. The pipeline
/// annotates these with the originating file and type.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("get failed: {0}")]
    Get(#[source] ClusterError),

    #[error("create failed: {0}")]
    Create(#[source] ClusterError),

    #[error("update failed: {0}")]
    Update(#[source] ClusterError),
}

/// Bring cluster state for `object` into agreement with the rendered
/// manifest.
///
/// - not found → create the object as rendered;
/// - found → carry the live object's resourceVersion onto the rendered one
///   (required: without the optimistic-concurrency token every update is
///   rejected by the conflict check), then replace wholesale;
/// - any other get failure → abort, no create or update attempted.
pub fn reconcile_generic<C: DynamicClusterClient>(
    client: &C,
    mapping: &ResourceMapping,
    object: &GenericObject,
) -> Result<ApplyOutcome, ReconcileError> {
    let namespace = object.namespace();
    let name = object.name();

    match client
        .get(mapping, namespace, name)
        .map_err(ReconcileError::Get)?
    {
        None => {
            client
                .create(mapping, namespace, object)
                .map_err(ReconcileError::Create)?;
            tracing::debug!("created {mapping} {namespace}/{name}");
            Ok(ApplyOutcome::Created)
        }
        Some(current) => {
            let mut desired = object.clone();
            if let Some(resource_version) = current.resource_version() {
                desired.set_resource_version(resource_version);
            }
            client
                .update(mapping, namespace, &desired)
                .map_err(ReconcileError::Update)?;
            tracing::debug!("updated {mapping} {namespace}/{name}");
            Ok(ApplyOutcome::Updated)
        }
    }
}
