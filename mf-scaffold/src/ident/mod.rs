//! Identifier resolution.
//!
//! A [`Reference`] names a schema element by id, alias, GUID or enum
//! value; [`resolve_id`] turns it into the id the schema uses.
//! [`ResolvedIdentifier`] is the memoising form callers keep around.

pub mod identifier;
pub mod reference;
pub mod resolver;

pub use identifier::{ResolvedIdentifier, UNRESOLVED};
pub use reference::{canonical_braced_guid, classify_text, normalize_guid, Reference, TextForm};
pub use resolver::{resolve_id, resolve_item, ItemReference};
