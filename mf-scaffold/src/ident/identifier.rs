//! Memoising identifier that resolves an alias, GUID or id once per run.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::error::{ResolveError, ResolveResult};
use crate::ident::reference::{canonical_braced_guid, normalize_guid, Reference};
use crate::ident::resolver::resolve_id;
use crate::schema::{IdVerification, SchemaElementKind, SchemaProvider};

/// Id value meaning "not resolved".
pub const UNRESOLVED: i32 = -1;

/// A reference plus its resolution state.
///
/// Holds either an alias (which may be a braced GUID) or an original
/// numeric id. [`resolve`](Self::resolve) maps it to the id the schema
/// reports and remembers the result until the source value changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentifier {
    alias: String,
    id: i32,
    original_id: i32,
    resolved_once: bool,
    kind: Option<SchemaElementKind>,
    expected_owner: Option<i32>,
}

impl Default for ResolvedIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolvedIdentifier {
    /// An empty identifier.
    pub fn new() -> Self {
        Self {
            alias: String::new(),
            id: UNRESOLVED,
            original_id: UNRESOLVED,
            resolved_once: false,
            kind: None,
            expected_owner: None,
        }
    }

    /// An identifier for a known numeric id. The id still has to be
    /// verified by [`resolve`](Self::resolve).
    pub fn from_id(id: i32) -> Self {
        Self {
            original_id: id,
            ..Self::new()
        }
    }

    /// An identifier for an alias or braced GUID.
    pub fn from_alias(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            ..Self::new()
        }
    }

    /// Require the element, when looked up by id, to belong to `owner`
    /// (a workflow state's workflow, for instance).
    pub fn with_expected_owner(mut self, owner: i32) -> Self {
        self.expected_owner = Some(owner);
        self
    }

    /// Replace the source value. Integer-like references clear the alias,
    /// text clears the original id; either way resolution state is reset.
    pub fn set(&mut self, reference: impl Into<Reference>) -> ResolveResult<&mut Self> {
        match reference.into() {
            Reference::NumericId(id) | Reference::EnumValue(id) => self.set_id(id),
            Reference::LongId(id) => {
                let id = i32::try_from(id).map_err(|_| ResolveError::unrecognized(id.to_string()))?;
                self.set_id(id);
            }
            Reference::Text(text) | Reference::Alias(text) => {
                self.set_alias(text);
                self.original_id = UNRESOLVED;
            }
            Reference::Guid(guid) => {
                self.set_alias(normalize_guid(&guid)?);
                self.original_id = UNRESOLVED;
            }
            Reference::PreResolved(source) => *self = *source,
        }
        Ok(self)
    }

    /// Assign a new alias, clearing any resolved id.
    pub fn set_alias(&mut self, alias: impl Into<String>) {
        self.alias = alias.into();
        self.id = UNRESOLVED;
        self.resolved_once = false;
    }

    fn set_id(&mut self, id: i32) {
        self.alias.clear();
        self.original_id = id;
        self.id = UNRESOLVED;
        self.resolved_once = false;
    }

    /// The alias, possibly empty.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The alias when it is a well-formed braced GUID.
    pub fn guid(&self) -> Option<String> {
        canonical_braced_guid(&self.alias)
    }

    /// The numeric id the identifier was created from, or [`UNRESOLVED`].
    pub fn original_id(&self) -> i32 {
        self.original_id
    }

    /// The resolved id, or [`UNRESOLVED`].
    pub fn raw_id(&self) -> i32 {
        self.id
    }

    /// Kind used by the last resolution.
    pub fn kind(&self) -> Option<SchemaElementKind> {
        self.kind
    }

    /// Neither an alias nor an original id is set.
    pub fn is_empty(&self) -> bool {
        self.original_id == UNRESOLVED && self.alias.is_empty()
    }

    /// Resolution ran and produced an id.
    pub fn is_resolved(&self) -> bool {
        self.id != UNRESOLVED && self.resolved_once
    }

    /// Whether a resolution attempt has completed since the last change.
    pub fn was_attempted(&self) -> bool {
        self.resolved_once
    }

    /// Integer coercion.
    pub fn try_id(&self) -> ResolveResult<i32> {
        if self.id == UNRESOLVED {
            return Err(ResolveError::Unresolved {
                kind: self.kind,
                alias: self.alias.clone(),
            });
        }
        Ok(self.id)
    }

    /// Resolve against `schema` as an element of `kind`.
    ///
    /// A no-op after the first completed attempt, even one that left the
    /// identifier unresolved; mutating it re-arms resolution. Lookup failures inside the per-kind strategy
    /// are treated as "not found"; only when every strategy is exhausted
    /// and an alias remains does the generic alias lookup run, and its
    /// failure is returned. An id that fails verification leaves the
    /// identifier unresolved without an error.
    pub fn resolve<P>(&mut self, schema: &P, kind: SchemaElementKind) -> ResolveResult<&mut Self>
    where
        P: SchemaProvider + ?Sized,
    {
        if self.resolved_once {
            trace!(%kind, identifier = %self, "already resolved");
            return Ok(self);
        }

        self.kind = Some(kind);

        let id = match self.attempt(schema, kind) {
            Some(id) => id,
            None if !self.alias.is_empty() => {
                resolve_id(schema, kind, &Reference::Text(self.alias.clone()))?
            }
            None => UNRESOLVED,
        };

        self.id = id;
        self.resolved_once = true;
        debug!(%kind, identifier = %self, id, "resolved identifier");
        Ok(self)
    }

    /// Per-kind strategy chain. `None` means "nothing matched".
    fn attempt<P>(&self, schema: &P, kind: SchemaElementKind) -> Option<i32>
    where
        P: SchemaProvider + ?Sized,
    {
        let strategy = kind.strategy();

        if let Some(guid) = self.guid() {
            if strategy.by_guid {
                return found(kind, schema.resolve_by_guid(kind, &guid));
            }
        } else if !self.alias.is_empty() {
            if strategy.by_alias {
                return found(kind, schema.resolve_by_alias(kind, &self.alias));
            }
        } else if self.original_id != UNRESOLVED {
            return self.verify_id(schema, kind, strategy.by_id);
        }

        None
    }

    fn verify_id<P>(&self, schema: &P, kind: SchemaElementKind, how: IdVerification) -> Option<i32>
    where
        P: SchemaProvider + ?Sized,
    {
        let original = self.original_id;
        match how {
            IdVerification::None => None,
            IdVerification::Lookup => found(kind, schema.verify_by_id(kind, original)),
            IdVerification::RoundTrip => {
                found(kind, schema.verify_by_id(kind, original)).filter(|id| *id == original)
            }
            IdVerification::Owner => {
                let id = found(kind, schema.verify_by_id(kind, original))?;
                if let Some(owner) = self.expected_owner {
                    found(kind, schema.owner_of(kind, id)).filter(|actual| *actual == owner)?;
                }
                Some(id)
            }
        }
    }
}

fn found<E: fmt::Display>(kind: SchemaElementKind, result: Result<i32, E>) -> Option<i32> {
    match result {
        Ok(id) => Some(id),
        Err(err) => {
            trace!(%kind, error = %err, "lookup strategy missed");
            None
        }
    }
}

impl fmt::Display for ResolvedIdentifier {
    /// String coercion: alias, else the original id, else the resolved id.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.alias.is_empty() {
            f.write_str(&self.alias)
        } else if self.original_id != UNRESOLVED {
            write!(f, "{}", self.original_id)
        } else if self.id == UNRESOLVED {
            Ok(())
        } else {
            write!(f, "{}", self.id)
        }
    }
}

impl From<i32> for ResolvedIdentifier {
    fn from(id: i32) -> Self {
        Self::from_id(id)
    }
}

impl From<&str> for ResolvedIdentifier {
    fn from(alias: &str) -> Self {
        Self::from_alias(alias)
    }
}

impl From<String> for ResolvedIdentifier {
    fn from(alias: String) -> Self {
        Self::from_alias(alias)
    }
}

/// Wire shape: `{"Alias": "..."}` when an alias exists, else `{"ID": n}`.
#[derive(Serialize, Deserialize)]
struct Wire {
    #[serde(rename = "Alias", default, skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    id: Option<i32>,
}

impl Serialize for ResolvedIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = if self.alias.is_empty() {
            let id = if self.id != UNRESOLVED { self.id } else { self.original_id };
            Wire {
                alias: None,
                id: Some(id),
            }
        } else {
            Wire {
                alias: Some(self.alias.clone()),
                id: None,
            }
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResolvedIdentifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = Wire::deserialize(deserializer)?;
        Ok(match (wire.alias, wire.id) {
            (Some(alias), _) if !alias.is_empty() => Self::from_alias(alias),
            (_, Some(id)) => Self::from_id(id),
            _ => Self::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        NamedElementDescriptor, ObjectTypeDescriptor, SchemaSnapshot, WorkflowStateDescriptor,
    };

    const VIEW_GUID: &str = "{5A1C3E7B-0000-4D2A-8F11-9E0B7C6D5A41}";

    fn schema() -> SchemaSnapshot {
        let mut snapshot = SchemaSnapshot::new()
            .with_object_type(ObjectTypeDescriptor::new(0, "Document").with_alias("OT.Document"))
            .with_workflow(NamedElementDescriptor::new(101, "Approval").with_alias("WF.Approval"))
            .with_workflow_state(
                WorkflowStateDescriptor::new(201, "Draft", 101).with_alias("WFS.Draft"),
            );
        snapshot
            .views
            .push(NamedElementDescriptor::new(7, "My view").with_guid(VIEW_GUID));
        snapshot
    }

    #[test]
    fn test_resolve_alias() {
        let mut ident = ResolvedIdentifier::from_alias("OT.Document");
        ident.resolve(&schema(), SchemaElementKind::ObjectType).unwrap();

        assert!(ident.is_resolved());
        assert_eq!(ident.try_id().unwrap(), 0);
        assert_eq!(ident.to_string(), "OT.Document");
    }

    #[test]
    fn test_resolve_id_verifies_existence() {
        let mut ident = ResolvedIdentifier::from_id(101);
        assert!(ident.try_id().is_err());

        ident.resolve(&schema(), SchemaElementKind::Workflow).unwrap();
        assert_eq!(ident.try_id().unwrap(), 101);
        assert_eq!(ident.to_string(), "101");
    }

    #[test]
    fn test_missing_id_stays_unresolved_without_error() {
        let mut ident = ResolvedIdentifier::from_id(999);
        ident.resolve(&schema(), SchemaElementKind::Workflow).unwrap();

        assert!(!ident.is_resolved());
        assert!(ident.was_attempted());
        assert_eq!(
            ident.try_id(),
            Err(ResolveError::Unresolved {
                kind: Some(SchemaElementKind::Workflow),
                alias: String::new(),
            })
        );
    }

    #[test]
    fn test_missing_alias_exhausts_chain_and_fails() {
        let mut ident = ResolvedIdentifier::from_alias("OT.Missing");
        let err = ident
            .resolve(&schema(), SchemaElementKind::ObjectType)
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(!ident.was_attempted());
    }

    #[test]
    fn test_numeric_alias_falls_back_to_generic_dispatch() {
        let mut ident = ResolvedIdentifier::from_alias("42");
        ident.resolve(&schema(), SchemaElementKind::ObjectType).unwrap();
        assert_eq!(ident.try_id().unwrap(), 42);
    }

    #[test]
    fn test_state_owner_check() {
        let mut right = ResolvedIdentifier::from_id(201).with_expected_owner(101);
        right.resolve(&schema(), SchemaElementKind::WorkflowState).unwrap();
        assert_eq!(right.try_id().unwrap(), 201);

        let mut wrong = ResolvedIdentifier::from_id(201).with_expected_owner(102);
        wrong.resolve(&schema(), SchemaElementKind::WorkflowState).unwrap();
        assert!(!wrong.is_resolved());
    }

    #[test]
    fn test_view_by_guid_and_round_trip() {
        let mut by_guid = ResolvedIdentifier::from_alias(VIEW_GUID);
        by_guid.resolve(&schema(), SchemaElementKind::View).unwrap();
        assert_eq!(by_guid.try_id().unwrap(), 7);

        let mut by_id = ResolvedIdentifier::from_id(7);
        by_id.resolve(&schema(), SchemaElementKind::View).unwrap();
        assert_eq!(by_id.try_id().unwrap(), 7);
    }

    #[test]
    fn test_set_alias_resets_resolution() {
        let mut ident = ResolvedIdentifier::from_alias("OT.Document");
        ident.resolve(&schema(), SchemaElementKind::ObjectType).unwrap();
        assert!(ident.is_resolved());

        ident.set_alias("OT.Other");
        assert_eq!(ident.raw_id(), UNRESOLVED);
        assert!(!ident.was_attempted());
    }

    #[test]
    fn test_set_switches_between_id_and_alias() {
        let mut ident = ResolvedIdentifier::from_alias("OT.Document");
        ident.set(5).unwrap();
        assert_eq!(ident.alias(), "");
        assert_eq!(ident.original_id(), 5);

        ident.set("PD.Customer").unwrap();
        assert_eq!(ident.alias(), "PD.Customer");
        assert_eq!(ident.original_id(), UNRESOLVED);

        assert!(ident.set(i64::MAX).is_err());
    }

    #[test]
    fn test_guid_accessor() {
        let ident = ResolvedIdentifier::from_alias(VIEW_GUID);
        assert_eq!(ident.guid().as_deref(), Some(VIEW_GUID));
        assert_eq!(ResolvedIdentifier::from_alias("V.Mine").guid(), None);
    }

    #[test]
    fn test_empty() {
        assert!(ResolvedIdentifier::new().is_empty());
        assert!(!ResolvedIdentifier::from_id(0).is_empty());
        assert_eq!(ResolvedIdentifier::new().to_string(), "");
    }

    #[test]
    fn test_serde_prefers_alias() {
        let alias = serde_json::to_string(&ResolvedIdentifier::from_alias("PD.Customer")).unwrap();
        assert_eq!(alias, r#"{"Alias":"PD.Customer"}"#);

        let id = serde_json::to_string(&ResolvedIdentifier::from_id(1020)).unwrap();
        assert_eq!(id, r#"{"ID":1020}"#);

        let back: ResolvedIdentifier = serde_json::from_str(r#"{"ID":1020}"#).unwrap();
        assert_eq!(back.original_id(), 1020);
    }
}
