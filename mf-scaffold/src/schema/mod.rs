//! Vault schema model and the provider seam.
//!
//! - [`kind`] - element kinds and their per-kind lookup strategies
//! - [`model`] - descriptors for object types, classes, properties and items
//! - [`provider`] - the [`SchemaProvider`] trait
//! - [`snapshot`] - an in-memory, serialisable provider
//! - [`cache`] - a fetch-once wrapper used for the duration of one run

pub mod cache;
pub mod kind;
pub mod model;
pub mod provider;
pub mod snapshot;

pub use cache::CachedSchema;
pub use kind::{IdVerification, ResolutionStrategy, SchemaElementKind};
pub use model::{
    AssociatedPropertyDescriptor, AutomaticValueKind, NamedElementDescriptor,
    ObjectClassDescriptor, ObjectInstanceDescriptor, ObjectInstanceRef, ObjectTypeDescriptor,
    PropertyDefDescriptor, ValueKind, ValueListItemDescriptor, WorkflowStateDescriptor,
    RESERVED_BUILTIN_IDS,
};
pub use provider::SchemaProvider;
pub use snapshot::SchemaSnapshot;
