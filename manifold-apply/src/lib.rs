//! # manifold-apply
//!
//! Reconciles rendered manifests against a cluster control plane with
//! create-or-update semantics per object.
//!
//! Three batch entry points share the rendering pipeline from
//! manifold-renderer:
//!
//! - [`apply_deployments`] — typed-kind mode; decodes each file into the
//!   registered Deployment type and delegates to an injected
//!   [`DeploymentApplier`] strategy.
//! - [`apply_directly`] — standard resources through an injected
//!   [`DirectApplier`], which collects per-file reports before this layer
//!   picks the first hard error.
//! - [`apply_custom_resources`] — generic mode; decodes untyped objects and
//!   reconciles them via namespaced get-then-create-or-update, carrying the
//!   live resourceVersion forward on update.
//!
//! Empty-after-rendering files are skipped invisibly; the first hard error
//! aborts the batch with the file name and decoded type attached. Already
//! applied files are not rolled back — rerunning the batch is idempotent and
//! is the recovery mechanism.

pub mod cluster;
pub mod decode;
pub mod error;
pub mod pipeline;
pub mod reconcile;

pub use cluster::{
    ApplyOutcome, CachedDiscovery, ClusterError, DeploymentApplier, DirectApplier,
    DirectApplyReport, DiscoveryClient, DynamicClusterClient, RenderFn,
};
pub use decode::to_generic_object;
pub use error::ApplyError;
pub use pipeline::{apply_custom_resources, apply_deployments, apply_directly};
pub use reconcile::{reconcile_generic, ReconcileError};
