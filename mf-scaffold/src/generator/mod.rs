//! C# artifact generation.
//!
//! - [`base`] - the shared `ObjVerEx` wrapper, from a bundled template
//! - [`property_enum`] - `PropertyDefinitions`
//! - [`object_type`] - `OT_<Name>` abstract bases
//! - [`class`] - class files and their hand-editable partials
//! - [`value_list`] - enums for static value lists
//! - [`type_mapper`] - value kind to C# accessor mapping

pub mod base;
pub mod class;
pub mod object_type;
pub mod property_enum;
pub mod source;
pub mod traits;
pub mod type_mapper;
pub mod value_list;

pub use base::{BaseWrapperEmitter, BASE_TYPE_NAME};
pub use class::{class_type_name, skip_reason, ClassEmitter, ClassMember, ClassPartialEmitter, SkipReason};
pub use object_type::{object_type_class_name, ObjectTypeEmitter};
pub use property_enum::{PropertyEnumEmitter, PROPERTY_ENUM_NAME};
pub use traits::{
    ArtifactEmitter, ArtifactKind, EmitContext, GeneratedArtifact, GeneratorConfig, IndentStyle,
    LineEnding, MODELS_DIR, MODELS_NAMESPACE, PARTIALS_DIR,
};
pub use type_mapper::{map_property_type, property_reference, AccessorShape, LookupTarget, TypeMapper};
pub use value_list::ValueListEnumEmitter;
