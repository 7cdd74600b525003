//! Batch apply entry points.
//!
//! All three walk the ordered file list sequentially — a file may depend on
//! cluster state mutated by an earlier file in the same batch (a namespace
//! created by file N referenced by file N+1). Files that render empty are
//! skipped silently; the first hard error aborts and is returned. There is
//! no rollback: effects already applied for earlier files stay, and safe
//! re-application of the whole batch is the recovery mechanism.

use manifold_core::{AssetSource, KindRegistry, TypedObject};
use manifold_renderer::{message_is_empty_asset, render_asset, RenderError};
use serde_json::Value;

use crate::cluster::{
    ApplyOutcome, DeploymentApplier, DirectApplier, DiscoveryClient, DynamicClusterClient,
};
use crate::decode::to_generic_object;
use crate::error::ApplyError;
use crate::reconcile::{reconcile_generic, ReconcileError};

/// Render one file, mapping the soft empty signal to `Ok(None)`.
fn render_or_skip(
    name: &str,
    header_file: &str,
    source: &dyn AssetSource,
    values: &Value,
) -> Result<Option<Vec<u8>>, ApplyError> {
    match render_asset(name, header_file, source, values) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.is_empty_asset() => {
            tracing::debug!("skipping {name}: empty after templating");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Render each file as a Deployment manifest and hand it to the injected
/// per-kind apply strategy.
///
/// The strategy owns all update-vs-no-op decisioning; this loop owns
/// rendering, typed decode, skip-on-empty, and first-error abort.
pub fn apply_deployments<A: DeploymentApplier>(
    applier: &A,
    source: &dyn AssetSource,
    values: &Value,
    header_file: &str,
    files: &[&str],
) -> Result<(), ApplyError> {
    let registry = KindRegistry::with_deployment();
    for name in files {
        let Some(raw) = render_or_skip(name, header_file, source, values)? else {
            continue;
        };
        let object = registry.decode(&raw).map_err(|source| ApplyError::Decode {
            file: (*name).to_owned(),
            source,
        })?;
        let type_name = object.type_name();
        let deployment = match object {
            TypedObject::Deployment(d) => d,
        };
        let (_, changed) =
            applier
                .apply(&deployment, 0)
                .map_err(|source| ApplyError::Strategy {
                    file: (*name).to_owned(),
                    object_type: type_name.to_owned(),
                    source,
                })?;
        if changed {
            tracing::info!("applied deployment from {name}");
        } else {
            tracing::debug!("deployment from {name} unchanged");
        }
    }
    Ok(())
}

/// Apply standard resources through an injected [`DirectApplier`].
///
/// The applier renders each file via the supplied callback and collects a
/// report per file without short-circuiting; this entry point then returns
/// the first reported error that is not the empty-asset signal. The strategy
/// flattens render errors into its untyped error channel, so empty-asset
/// detection here downcasts first and falls back to the message marker.
pub fn apply_directly<A: DirectApplier>(
    applier: &A,
    source: &dyn AssetSource,
    values: &Value,
    header_file: &str,
    files: &[&str],
) -> Result<(), ApplyError> {
    let mut render = |name: &str| render_asset(name, header_file, source, values);
    let reports = applier.apply_all(&mut render, files);
    for report in reports {
        match report.result {
            Ok(outcome) => {
                tracing::debug!("{}: {:?}", report.file, outcome);
            }
            Err(source) => {
                let empty = source
                    .downcast_ref::<RenderError>()
                    .map(RenderError::is_empty_asset)
                    .unwrap_or_else(|| message_is_empty_asset(&source.to_string()));
                if empty {
                    tracing::debug!("skipping {}: empty after templating", report.file);
                    continue;
                }
                return Err(ApplyError::Direct {
                    file: report.file,
                    object_type: report
                        .object_kind
                        .unwrap_or_else(|| "unknown".to_owned()),
                    source,
                });
            }
        }
    }
    Ok(())
}

/// Render each file, decode it generically, and reconcile it against the
/// cluster via get-then-create-or-update.
///
/// Pass a [`crate::cluster::CachedDiscovery`] as `discovery` to pay at most
/// one discovery round trip per kind per process.
pub fn apply_custom_resources<C, D>(
    client: &C,
    discovery: &D,
    source: &dyn AssetSource,
    values: &Value,
    header_file: &str,
    files: &[&str],
) -> Result<(), ApplyError>
where
    C: DynamicClusterClient,
    D: DiscoveryClient,
{
    for name in files {
        let Some(raw) = render_or_skip(name, header_file, source, values)? else {
            continue;
        };
        let object = to_generic_object(source, &raw).map_err(|source| ApplyError::Decode {
            file: (*name).to_owned(),
            source,
        })?;
        let gvk = object
            .group_version_kind()
            .ok_or_else(|| ApplyError::MissingKind {
                file: (*name).to_owned(),
            })?;
        let mapping =
            discovery
                .resource_for(&gvk)
                .map_err(|source| ApplyError::Discovery {
                    file: (*name).to_owned(),
                    gvk: gvk.clone(),
                    source,
                })?;

        let object_type = object.kind().unwrap_or("GenericObject").to_owned();
        let outcome = reconcile_generic(client, &mapping, &object)
            .map_err(|e| annotate(e, name, &object_type))?;
        match outcome {
            ApplyOutcome::Created => tracing::info!("created {object_type} from {name}"),
            ApplyOutcome::Updated => tracing::info!("updated {object_type} from {name}"),
            _ => {}
        }
    }
    Ok(())
}

fn annotate(err: ReconcileError, file: &str, object_type: &str) -> ApplyError {
    let file = file.to_owned();
    let object_type = object_type.to_owned();
    match err {
        ReconcileError::Get(source) => ApplyError::Get {
            file,
            object_type,
            source,
        },
        ReconcileError::Create(source) => ApplyError::Create {
            file,
            object_type,
            source,
        },
        ReconcileError::Update(source) => ApplyError::Update {
            file,
            object_type,
            source,
        },
    }
}
