//! Manifold core library — manifest domain types, asset sources, typed-kind
//! registry, errors.
//!
//! Public API surface:
//! - [`types`] — [`GroupVersionKind`], [`ResourceMapping`], typed and generic
//!   objects
//! - [`asset`] — the [`AssetSource`] trait and shipped implementations
//! - [`registry`] — the caller-constructed [`KindRegistry`]
//! - [`error`] — [`AssetError`], [`DecodeError`]

pub mod asset;
pub mod error;
pub mod registry;
pub mod types;

pub use asset::{AssetSource, DirAssetSource, MemoryAssetSource};
pub use error::{AssetError, DecodeError};
pub use registry::KindRegistry;
pub use types::{
    Deployment, GenericObject, GroupVersionKind, ObjectMeta, ResourceMapping, TypedObject,
};
