//! The seam between the generator and wherever the schema lives.

use crate::error::SchemaError;
use crate::schema::kind::SchemaElementKind;
use crate::schema::model::{
    AssociatedPropertyDescriptor, ObjectClassDescriptor, ObjectInstanceRef, ObjectTypeDescriptor,
    PropertyDefDescriptor, ValueListItemDescriptor,
};

/// Read access to a vault schema.
///
/// Implementors answer listing calls for the generator and per-kind
/// lookups for identifier resolution. Every lookup that finds nothing
/// returns [`SchemaError::NotFound`] carrying the kind and the attempted
/// reference; the resolver decides whether that is fatal.
///
/// All calls are synchronous and may block on the backing store.
pub trait SchemaProvider {
    /// Real object types, in vault order.
    fn list_object_types(&self) -> Result<Vec<ObjectTypeDescriptor>, SchemaError>;

    /// Every value list, real object types included, in vault order.
    fn list_value_lists(&self) -> Result<Vec<ObjectTypeDescriptor>, SchemaError>;

    /// An object type or value list by id.
    fn get_object_type(&self, id: i32) -> Result<ObjectTypeDescriptor, SchemaError>;

    /// Classes of one object type, in vault order.
    fn list_classes(&self, object_type_id: i32) -> Result<Vec<ObjectClassDescriptor>, SchemaError>;

    /// Associated properties of one class, in declared order.
    fn list_associated_properties(
        &self,
        class_id: i32,
    ) -> Result<Vec<AssociatedPropertyDescriptor>, SchemaError>;

    /// Every property definition, in vault order.
    fn list_property_defs(&self) -> Result<Vec<PropertyDefDescriptor>, SchemaError>;

    /// A property definition by id.
    fn get_property_def(&self, id: i32) -> Result<PropertyDefDescriptor, SchemaError>;

    /// Items of a static value list, in vault order.
    fn list_static_value_list_items(
        &self,
        value_list_id: i32,
    ) -> Result<Vec<ValueListItemDescriptor>, SchemaError>;

    /// Id of the element of `kind` carrying `alias`.
    fn resolve_by_alias(&self, kind: SchemaElementKind, alias: &str) -> Result<i32, SchemaError>;

    /// Id of the element of `kind` carrying `guid` (braced, upper case).
    fn resolve_by_guid(&self, kind: SchemaElementKind, guid: &str) -> Result<i32, SchemaError>;

    /// Fetch the element of `kind` with `id` and return the id the schema
    /// reports for it.
    fn verify_by_id(&self, kind: SchemaElementKind, id: i32) -> Result<i32, SchemaError>;

    /// Id of the element owning the element of `kind` with `id`
    /// (a workflow state's workflow, a value list item's owner item).
    fn owner_of(&self, kind: SchemaElementKind, id: i32) -> Result<i32, SchemaError>;

    /// Type and id of the object carrying `guid`.
    fn resolve_object_by_guid(&self, guid: &str) -> Result<ObjectInstanceRef, SchemaError>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for &P {
    fn list_object_types(&self) -> Result<Vec<ObjectTypeDescriptor>, SchemaError> {
        (**self).list_object_types()
    }

    fn list_value_lists(&self) -> Result<Vec<ObjectTypeDescriptor>, SchemaError> {
        (**self).list_value_lists()
    }

    fn get_object_type(&self, id: i32) -> Result<ObjectTypeDescriptor, SchemaError> {
        (**self).get_object_type(id)
    }

    fn list_classes(&self, object_type_id: i32) -> Result<Vec<ObjectClassDescriptor>, SchemaError> {
        (**self).list_classes(object_type_id)
    }

    fn list_associated_properties(
        &self,
        class_id: i32,
    ) -> Result<Vec<AssociatedPropertyDescriptor>, SchemaError> {
        (**self).list_associated_properties(class_id)
    }

    fn list_property_defs(&self) -> Result<Vec<PropertyDefDescriptor>, SchemaError> {
        (**self).list_property_defs()
    }

    fn get_property_def(&self, id: i32) -> Result<PropertyDefDescriptor, SchemaError> {
        (**self).get_property_def(id)
    }

    fn list_static_value_list_items(
        &self,
        value_list_id: i32,
    ) -> Result<Vec<ValueListItemDescriptor>, SchemaError> {
        (**self).list_static_value_list_items(value_list_id)
    }

    fn resolve_by_alias(&self, kind: SchemaElementKind, alias: &str) -> Result<i32, SchemaError> {
        (**self).resolve_by_alias(kind, alias)
    }

    fn resolve_by_guid(&self, kind: SchemaElementKind, guid: &str) -> Result<i32, SchemaError> {
        (**self).resolve_by_guid(kind, guid)
    }

    fn verify_by_id(&self, kind: SchemaElementKind, id: i32) -> Result<i32, SchemaError> {
        (**self).verify_by_id(kind, id)
    }

    fn owner_of(&self, kind: SchemaElementKind, id: i32) -> Result<i32, SchemaError> {
        (**self).owner_of(kind, id)
    }

    fn resolve_object_by_guid(&self, guid: &str) -> Result<ObjectInstanceRef, SchemaError> {
        (**self).resolve_object_by_guid(guid)
    }
}
