//! Schema element kinds and their resolution capabilities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a schema element a reference can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaElementKind {
    ObjectType,
    ObjectClass,
    PropertyDefinition,
    Workflow,
    WorkflowState,
    NamedAccessList,
    ValueListItem,
    ObjectInstance,
    ObjectClassGroup,
    UserGroup,
    View,
}

impl SchemaElementKind {
    /// All kinds, in declaration order.
    pub const ALL: [SchemaElementKind; 11] = [
        Self::ObjectType,
        Self::ObjectClass,
        Self::PropertyDefinition,
        Self::Workflow,
        Self::WorkflowState,
        Self::NamedAccessList,
        Self::ValueListItem,
        Self::ObjectInstance,
        Self::ObjectClassGroup,
        Self::UserGroup,
        Self::View,
    ];

    /// Returns the name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectType => "ObjectType",
            Self::ObjectClass => "ObjectClass",
            Self::PropertyDefinition => "PropertyDefinition",
            Self::Workflow => "Workflow",
            Self::WorkflowState => "WorkflowState",
            Self::NamedAccessList => "NamedAccessList",
            Self::ValueListItem => "ValueListItem",
            Self::ObjectInstance => "ObjectInstance",
            Self::ObjectClassGroup => "ObjectClassGroup",
            Self::UserGroup => "UserGroup",
            Self::View => "View",
        }
    }

    /// Returns the lookup strategy set for this kind.
    pub fn strategy(&self) -> ResolutionStrategy {
        match self {
            Self::ObjectType
            | Self::ObjectClass
            | Self::PropertyDefinition
            | Self::Workflow
            | Self::NamedAccessList
            | Self::UserGroup => ResolutionStrategy {
                by_alias: true,
                by_guid: true,
                by_id: IdVerification::Lookup,
            },
            Self::WorkflowState => ResolutionStrategy {
                by_alias: true,
                by_guid: true,
                by_id: IdVerification::Owner,
            },
            Self::ObjectClassGroup | Self::View => ResolutionStrategy {
                by_alias: false,
                by_guid: true,
                by_id: IdVerification::RoundTrip,
            },
            Self::ValueListItem => ResolutionStrategy {
                by_alias: false,
                by_guid: true,
                by_id: IdVerification::Lookup,
            },
            Self::ObjectInstance => ResolutionStrategy {
                by_alias: false,
                by_guid: true,
                by_id: IdVerification::None,
            },
        }
    }
}

impl fmt::Display for SchemaElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which lookups a kind supports when resolving an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionStrategy {
    /// Alias lookup is available.
    pub by_alias: bool,
    /// GUID lookup is available.
    pub by_guid: bool,
    /// How a bare numeric id is confirmed to still exist.
    pub by_id: IdVerification,
}

/// How a numeric id is confirmed against the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdVerification {
    /// No id path; the kind is only reachable by alias or GUID.
    None,
    /// Fetch by id and take the id the schema reports.
    Lookup,
    /// Fetch by id; a different id coming back means unresolved.
    RoundTrip,
    /// Fetch by id and check the element still belongs to the expected owner.
    Owner,
}

impl IdVerification {
    /// Whether an id can be verified at all.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::None)
    }
}
