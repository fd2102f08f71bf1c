//! In-memory schema snapshot.
//!
//! A [`SchemaSnapshot`] is a serialisable copy of everything the generator
//! and resolver read from a vault. It implements [`SchemaProvider`] by
//! scanning its own collections, so it doubles as the offline provider
//! (loaded from a cached JSON file) and as the fixture used by tests.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SchemaError;
use crate::schema::kind::SchemaElementKind;
use crate::schema::model::{
    AssociatedPropertyDescriptor, NamedElementDescriptor, ObjectClassDescriptor,
    ObjectInstanceDescriptor, ObjectInstanceRef, ObjectTypeDescriptor, PropertyDefDescriptor,
    ValueListItemDescriptor, WorkflowStateDescriptor,
};
use crate::schema::provider::SchemaProvider;

/// Complete, read-only copy of a vault schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaSnapshot {
    /// Object types and value lists; `real_object_type` tells them apart.
    pub object_types: Vec<ObjectTypeDescriptor>,
    pub classes: Vec<ObjectClassDescriptor>,
    pub property_defs: Vec<PropertyDefDescriptor>,
    pub value_list_items: Vec<ValueListItemDescriptor>,
    pub workflows: Vec<NamedElementDescriptor>,
    pub workflow_states: Vec<WorkflowStateDescriptor>,
    pub named_access_lists: Vec<NamedElementDescriptor>,
    pub class_groups: Vec<NamedElementDescriptor>,
    pub user_groups: Vec<NamedElementDescriptor>,
    pub views: Vec<NamedElementDescriptor>,
    pub objects: Vec<ObjectInstanceDescriptor>,
}

impl SchemaSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_json(&content).map_err(|e| SchemaError::InvalidSnapshot {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Serialise the snapshot as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn with_object_type(mut self, object_type: ObjectTypeDescriptor) -> Self {
        self.object_types.push(object_type);
        self
    }

    pub fn with_class(mut self, class: ObjectClassDescriptor) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_property_def(mut self, property_def: PropertyDefDescriptor) -> Self {
        self.property_defs.push(property_def);
        self
    }

    pub fn with_value_list_item(mut self, item: ValueListItemDescriptor) -> Self {
        self.value_list_items.push(item);
        self
    }

    pub fn with_workflow(mut self, workflow: NamedElementDescriptor) -> Self {
        self.workflows.push(workflow);
        self
    }

    pub fn with_workflow_state(mut self, state: WorkflowStateDescriptor) -> Self {
        self.workflow_states.push(state);
        self
    }

    pub fn with_object(mut self, object: ObjectInstanceDescriptor) -> Self {
        self.objects.push(object);
        self
    }

    /// Find the id of the first element of `kind` matching `pred`.
    fn find(&self, kind: SchemaElementKind, pred: &dyn Fn(&dyn Identified) -> bool) -> Option<i32> {
        fn scan<T: Identified>(items: &[T], pred: &dyn Fn(&dyn Identified) -> bool) -> Option<i32> {
            items
                .iter()
                .find(|item| {
                    let element: &dyn Identified = *item;
                    pred(element)
                })
                .map(|item| item.id())
        }

        match kind {
            SchemaElementKind::ObjectType => scan(&self.object_types, pred),
            SchemaElementKind::ObjectClass => scan(&self.classes, pred),
            SchemaElementKind::PropertyDefinition => scan(&self.property_defs, pred),
            SchemaElementKind::Workflow => scan(&self.workflows, pred),
            SchemaElementKind::WorkflowState => scan(&self.workflow_states, pred),
            SchemaElementKind::NamedAccessList => scan(&self.named_access_lists, pred),
            SchemaElementKind::ValueListItem => scan(&self.value_list_items, pred),
            SchemaElementKind::ObjectInstance => scan(&self.objects, pred),
            SchemaElementKind::ObjectClassGroup => scan(&self.class_groups, pred),
            SchemaElementKind::UserGroup => scan(&self.user_groups, pred),
            SchemaElementKind::View => scan(&self.views, pred),
        }
    }
}

impl SchemaProvider for SchemaSnapshot {
    fn list_object_types(&self) -> Result<Vec<ObjectTypeDescriptor>, SchemaError> {
        Ok(self
            .object_types
            .iter()
            .filter(|ot| ot.real_object_type)
            .cloned()
            .collect())
    }

    fn list_value_lists(&self) -> Result<Vec<ObjectTypeDescriptor>, SchemaError> {
        Ok(self.object_types.clone())
    }

    fn get_object_type(&self, id: i32) -> Result<ObjectTypeDescriptor, SchemaError> {
        self.object_types
            .iter()
            .find(|ot| ot.id == id)
            .cloned()
            .ok_or_else(|| SchemaError::not_found(SchemaElementKind::ObjectType, id))
    }

    fn list_classes(&self, object_type_id: i32) -> Result<Vec<ObjectClassDescriptor>, SchemaError> {
        Ok(self
            .classes
            .iter()
            .filter(|class| class.object_type == object_type_id)
            .cloned()
            .collect())
    }

    fn list_associated_properties(
        &self,
        class_id: i32,
    ) -> Result<Vec<AssociatedPropertyDescriptor>, SchemaError> {
        self.classes
            .iter()
            .find(|class| class.id == class_id)
            .map(|class| class.associated_properties.clone())
            .ok_or_else(|| SchemaError::not_found(SchemaElementKind::ObjectClass, class_id))
    }

    fn list_property_defs(&self) -> Result<Vec<PropertyDefDescriptor>, SchemaError> {
        Ok(self.property_defs.clone())
    }

    fn get_property_def(&self, id: i32) -> Result<PropertyDefDescriptor, SchemaError> {
        self.property_defs
            .iter()
            .find(|pdef| pdef.id == id)
            .cloned()
            .ok_or_else(|| SchemaError::not_found(SchemaElementKind::PropertyDefinition, id))
    }

    fn list_static_value_list_items(
        &self,
        value_list_id: i32,
    ) -> Result<Vec<ValueListItemDescriptor>, SchemaError> {
        Ok(self
            .value_list_items
            .iter()
            .filter(|item| item.value_list == value_list_id)
            .cloned()
            .collect())
    }

    fn resolve_by_alias(&self, kind: SchemaElementKind, alias: &str) -> Result<i32, SchemaError> {
        self.find(kind, &|element| {
            element
                .aliases()
                .iter()
                .any(|candidate| candidate.trim().eq_ignore_ascii_case(alias))
        })
        .ok_or_else(|| SchemaError::not_found(kind, alias))
    }

    fn resolve_by_guid(&self, kind: SchemaElementKind, guid: &str) -> Result<i32, SchemaError> {
        self.find(kind, &|element| {
            element
                .guid()
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(guid))
        })
        .ok_or_else(|| SchemaError::not_found(kind, guid))
    }

    fn verify_by_id(&self, kind: SchemaElementKind, id: i32) -> Result<i32, SchemaError> {
        self.find(kind, &|element| element.id() == id)
            .ok_or_else(|| SchemaError::not_found(kind, id))
    }

    fn owner_of(&self, kind: SchemaElementKind, id: i32) -> Result<i32, SchemaError> {
        let owner = match kind {
            SchemaElementKind::WorkflowState => self
                .workflow_states
                .iter()
                .find(|state| state.id == id)
                .map(|state| state.workflow),
            SchemaElementKind::ValueListItem => self
                .value_list_items
                .iter()
                .find(|item| item.id == id)
                .and_then(|item| item.owner),
            SchemaElementKind::ObjectClass => self
                .classes
                .iter()
                .find(|class| class.id == id)
                .map(|class| class.object_type),
            _ => None,
        };

        owner.ok_or_else(|| SchemaError::not_found(kind, id))
    }

    fn resolve_object_by_guid(&self, guid: &str) -> Result<ObjectInstanceRef, SchemaError> {
        self.objects
            .iter()
            .find(|object| object.guid.eq_ignore_ascii_case(guid))
            .map(|object| ObjectInstanceRef::new(object.object_type, object.id))
            .ok_or_else(|| SchemaError::not_found(SchemaElementKind::ObjectInstance, guid))
    }
}

/// Common identity fields of every descriptor kept in a snapshot.
trait Identified {
    fn id(&self) -> i32;
    fn aliases(&self) -> &[String];
    fn guid(&self) -> Option<&str>;
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> i32 {
                    self.id
                }

                fn aliases(&self) -> &[String] {
                    &self.aliases
                }

                fn guid(&self) -> Option<&str> {
                    self.guid.as_deref()
                }
            }
        )*
    };
}

impl_identified!(
    ObjectTypeDescriptor,
    ObjectClassDescriptor,
    PropertyDefDescriptor,
    NamedElementDescriptor,
    WorkflowStateDescriptor,
);

impl Identified for ValueListItemDescriptor {
    fn id(&self) -> i32 {
        self.id
    }

    fn aliases(&self) -> &[String] {
        &[]
    }

    fn guid(&self) -> Option<&str> {
        self.guid.as_deref()
    }
}

impl Identified for ObjectInstanceDescriptor {
    fn id(&self) -> i32 {
        self.id
    }

    fn aliases(&self) -> &[String] {
        &[]
    }

    fn guid(&self) -> Option<&str> {
        Some(&self.guid)
    }
}
