//! Reference dispatch: turn any [`Reference`] into a numeric id.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::error::{ResolveError, ResolveResult};
use crate::ident::reference::{canonical_braced_guid, classify_text, normalize_guid, Reference, TextForm};
use crate::schema::{ObjectInstanceRef, SchemaElementKind, SchemaProvider};

/// `(type-id)` object reference.
static OBJ_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(([0-9]+)-([0-9]+)\)$").expect("object reference pattern is a valid regex")
});

/// Resolve `reference` to the id of an element of `kind`.
///
/// Numeric references are returned as-is without touching the schema.
/// Text is classified as integer, braced GUID or alias, in that order.
pub fn resolve_id<P>(schema: &P, kind: SchemaElementKind, reference: &Reference) -> ResolveResult<i32>
where
    P: SchemaProvider + ?Sized,
{
    match reference {
        Reference::NumericId(id) | Reference::EnumValue(id) => Ok(*id),
        Reference::LongId(id) => {
            i32::try_from(*id).map_err(|_| ResolveError::unrecognized(id.to_string()))
        }
        Reference::PreResolved(identifier) => {
            let mut identifier = identifier.as_ref().clone();
            identifier.resolve(schema, kind)?.try_id()
        }
        Reference::Guid(guid) => by_guid(schema, kind, &normalize_guid(guid)?),
        Reference::Alias(alias) => {
            if alias.trim().is_empty() {
                return Err(ResolveError::argument("alias is empty"));
            }
            by_alias(schema, kind, alias)
        }
        Reference::Text(text) => match classify_text(text)? {
            TextForm::Integer(id) => Ok(id),
            TextForm::Guid(guid) => by_guid(schema, kind, &guid),
            TextForm::Alias(alias) => by_alias(schema, kind, &alias),
        },
    }
}

fn by_guid<P>(schema: &P, kind: SchemaElementKind, guid: &str) -> ResolveResult<i32>
where
    P: SchemaProvider + ?Sized,
{
    if !kind.strategy().by_guid {
        return Err(not_found(kind, guid));
    }
    let id = schema.resolve_by_guid(kind, guid)?;
    debug!(%kind, guid, id, "resolved by GUID");
    Ok(id)
}

fn by_alias<P>(schema: &P, kind: SchemaElementKind, alias: &str) -> ResolveResult<i32>
where
    P: SchemaProvider + ?Sized,
{
    if !kind.strategy().by_alias {
        trace!(%kind, alias, "kind has no alias lookup");
        return Err(not_found(kind, alias));
    }
    let id = schema.resolve_by_alias(kind, alias)?;
    debug!(%kind, alias, id, "resolved by alias");
    Ok(id)
}

fn not_found(kind: SchemaElementKind, reference: &str) -> ResolveError {
    ResolveError::NotFound {
        kind,
        reference: reference.to_string(),
    }
}

/// Whatever a caller had on hand to name one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemReference {
    /// Object type and id.
    ObjId { object_type: i32, id: i32 },
    /// Object type, id and version; the version is dropped.
    ObjVer {
        object_type: i32,
        id: i32,
        version: i32,
    },
    /// A bare object id.
    Id(i32),
    /// An integer, `(type-id)` or braced GUID string.
    Text(String),
}

impl From<i32> for ItemReference {
    fn from(id: i32) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for ItemReference {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ItemReference {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for ItemReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjId { object_type, id } => write!(f, "({object_type}-{id})"),
            Self::ObjVer {
                object_type,
                id,
                version,
            } => write!(f, "({object_type}-{id}-{version})"),
            Self::Id(id) => write!(f, "{id}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Resolve a reference to one object.
pub fn resolve_item<P>(schema: &P, reference: &ItemReference) -> ResolveResult<ObjectInstanceRef>
where
    P: SchemaProvider + ?Sized,
{
    match reference {
        ItemReference::ObjId { object_type, id } | ItemReference::ObjVer { object_type, id, .. } => {
            Ok(ObjectInstanceRef::new(*object_type, *id))
        }
        ItemReference::Id(id) => Ok(ObjectInstanceRef::id_only(*id)),
        ItemReference::Text(text) => resolve_item_text(schema, text),
    }
}

fn resolve_item_text<P>(schema: &P, text: &str) -> ResolveResult<ObjectInstanceRef>
where
    P: SchemaProvider + ?Sized,
{
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::argument("object reference is empty"));
    }

    if let Ok(id) = trimmed.parse::<i32>() {
        return Ok(ObjectInstanceRef::id_only(id));
    }

    if let Some(captures) = OBJ_ID.captures(trimmed) {
        let object_type = captures[1].parse::<i32>();
        let id = captures[2].parse::<i32>();
        return match (object_type, id) {
            (Ok(object_type), Ok(id)) => Ok(ObjectInstanceRef::new(object_type, id)),
            _ => Err(ResolveError::unrecognized(text)),
        };
    }

    if let Some(guid) = canonical_braced_guid(trimmed) {
        let object = schema.resolve_object_by_guid(&guid)?;
        debug!(guid, object = %object, "resolved object by GUID");
        return Ok(object);
    }

    Err(ResolveError::unrecognized(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::identifier::ResolvedIdentifier;
    use crate::schema::{
        NamedElementDescriptor, ObjectInstanceDescriptor, PropertyDefDescriptor, SchemaSnapshot,
        ValueKind,
    };

    const PD_GUID: &str = "{6C4E2A10-9D3B-4F7A-A2C1-0E5F8B9D7C33}";
    const OBJ_GUID: &str = "{A7B0C3D2-11E4-4F56-8A9B-C0D1E2F3A4B5}";

    fn schema() -> SchemaSnapshot {
        SchemaSnapshot::new()
            .with_property_def(
                PropertyDefDescriptor::new(1020, "Customer", ValueKind::Text)
                    .with_alias("PD.Customer")
                    .with_guid(PD_GUID),
            )
            .with_workflow(NamedElementDescriptor::new(101, "Approval").with_alias("WF.Approval"))
            .with_object(ObjectInstanceDescriptor {
                object_type: 0,
                id: 77,
                guid: OBJ_GUID.to_string(),
            })
    }

    #[test]
    fn test_numeric_reference_is_trusted() {
        let schema = SchemaSnapshot::new();
        let id = resolve_id(&schema, SchemaElementKind::ObjectType, &Reference::id(12345)).unwrap();
        assert_eq!(id, 12345);
    }

    #[test]
    fn test_text_dispatch_order() {
        let schema = schema();
        let kind = SchemaElementKind::PropertyDefinition;

        assert_eq!(resolve_id(&schema, kind, &"1020".into()).unwrap(), 1020);
        assert_eq!(resolve_id(&schema, kind, &PD_GUID.to_lowercase().into()).unwrap(), 1020);
        assert_eq!(resolve_id(&schema, kind, &"PD.Customer".into()).unwrap(), 1020);
    }

    #[test]
    fn test_missing_alias_is_not_found() {
        let err = resolve_id(
            &schema(),
            SchemaElementKind::PropertyDefinition,
            &Reference::alias("PD.Nope"),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ResolveError::NotFound {
                kind: SchemaElementKind::PropertyDefinition,
                reference: "PD.Nope".to_string(),
            }
        );
    }

    #[test]
    fn test_alias_on_guid_only_kind_is_not_found() {
        let err = resolve_id(&schema(), SchemaElementKind::View, &"V.Mine".into()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_guid_is_argument_error() {
        let err = resolve_id(
            &schema(),
            SchemaElementKind::PropertyDefinition,
            &Reference::guid("{not-a-guid}"),
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::Argument { .. }));
    }

    #[test]
    fn test_long_id_out_of_range_is_unrecognized() {
        let err = resolve_id(
            &schema(),
            SchemaElementKind::ObjectType,
            &Reference::LongId(i64::from(i32::MAX) + 1),
        )
        .unwrap_err();
        assert!(matches!(err, ResolveError::Unrecognized { .. }));
    }

    #[test]
    fn test_pre_resolved_identifier_delegates() {
        let reference = Reference::from(ResolvedIdentifier::from_alias("WF.Approval"));
        let id = resolve_id(&schema(), SchemaElementKind::Workflow, &reference).unwrap();
        assert_eq!(id, 101);

        let unresolvable = Reference::from(ResolvedIdentifier::from_id(5));
        let err = resolve_id(&schema(), SchemaElementKind::Workflow, &unresolvable).unwrap_err();
        assert!(matches!(err, ResolveError::Unresolved { .. }));
    }

    #[test]
    fn test_resolve_item_forms() {
        let schema = schema();

        assert_eq!(
            resolve_item(&schema, &ItemReference::ObjVer { object_type: 0, id: 5, version: 3 }).unwrap(),
            ObjectInstanceRef::new(0, 5)
        );
        assert_eq!(
            resolve_item(&schema, &"42".into()).unwrap(),
            ObjectInstanceRef::id_only(42)
        );
        assert_eq!(
            resolve_item(&schema, &"(0-77)".into()).unwrap(),
            ObjectInstanceRef::new(0, 77)
        );
        assert_eq!(
            resolve_item(&schema, &OBJ_GUID.into()).unwrap(),
            ObjectInstanceRef::new(0, 77)
        );
    }

    #[test]
    fn test_resolve_item_rejects_unknown_shapes() {
        let schema = schema();
        assert!(matches!(
            resolve_item(&schema, &"Invoice 2024".into()),
            Err(ResolveError::Unrecognized { .. })
        ));
        assert!(matches!(
            resolve_item(&schema, &"(1-99999999999)".into()),
            Err(ResolveError::Unrecognized { .. })
        ));
        assert!(resolve_item(&schema, &"{00000000-0000-0000-0000-000000000000}".into())
            .unwrap_err()
            .is_not_found());
    }
}
