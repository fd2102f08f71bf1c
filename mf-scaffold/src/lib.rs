//! # mf-scaffold
//!
//! Generates strongly-typed C# model classes from an M-Files vault schema.
//!
//! A run reads object types, classes, property definitions and value lists
//! through a [`SchemaProvider`](schema::SchemaProvider) and produces:
//!
//! - `Models/ObjVerEx.cs` - the shared instance wrapper
//! - `Models/PropertyDefinitions.cs` - one enum member per property definition
//! - `Models/OT_<Type>.cs` - an abstract base per real object type
//! - `Models/<Class>.cs` - one class per object class, with typed accessors
//!   (plus `Models/Partials/<Class>.cs` when partial splitting is on)
//! - `Models/<ValueList>.cs` - one enum per static value list
//!
//! ## Example
//!
//! ```rust
//! use mf_scaffold::generator::GeneratorConfig;
//! use mf_scaffold::host::RecordingHost;
//! use mf_scaffold::orchestrator::GenerationOrchestrator;
//! use mf_scaffold::schema::{ObjectClassDescriptor, ObjectTypeDescriptor, SchemaSnapshot};
//! use mf_scaffold::writer::MemoryProjectWriter;
//!
//! let schema = SchemaSnapshot::new()
//!     .with_object_type(ObjectTypeDescriptor::new(0, "Document"))
//!     .with_class(ObjectClassDescriptor::new(1, "Invoice", 0));
//! let host = RecordingHost::new();
//! let config = GeneratorConfig::new().with_root_namespace("Contoso");
//! let mut writer = MemoryProjectWriter::new();
//!
//! GenerationOrchestrator::new(&schema, &host, config)
//!     .generate(&mut writer, false)
//!     .unwrap();
//!
//! assert!(writer.get("Models/Invoice.cs").is_some());
//! ```
//!
//! Identifier resolution (alias, GUID or numeric id to a vault id) lives in
//! [`ident`] and is usable on its own.

pub mod error;
pub mod generator;
pub mod host;
pub mod ident;
pub mod naming;
pub mod orchestrator;
pub mod schema;
pub mod writer;

pub use error::{
    GenerateError, ResolveError, ResolveResult, SchemaError, ScaffoldError, ScaffoldResult,
    WriteError,
};
pub use generator::{GeneratedArtifact, GeneratorConfig};
pub use host::{HostUi, RecordingHost, TracingHost};
pub use ident::{resolve_id, resolve_item, ItemReference, Reference, ResolvedIdentifier};
pub use naming::clean_name;
pub use orchestrator::{ApplyReport, GenerationOrchestrator, GenerationPlan};
pub use schema::{CachedSchema, SchemaElementKind, SchemaProvider, SchemaSnapshot};
pub use writer::{MemoryProjectWriter, ProjectWriter, WriteResult};
