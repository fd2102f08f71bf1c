//! Fetch-once wrapper around a schema provider.
//!
//! A generation run reads the same listings many times (every class asks
//! for property definitions, every lookup property asks for its target
//! list). [`CachedSchema`] fetches each listing lazily on first use and
//! serves every later call from memory, so all emitters of one run observe
//! the same snapshot. Failed fetches are not cached.

use std::cell::{OnceCell, RefCell};
use std::collections::BTreeMap;

use tracing::trace;

use crate::error::SchemaError;
use crate::schema::kind::SchemaElementKind;
use crate::schema::model::{
    AssociatedPropertyDescriptor, ObjectClassDescriptor, ObjectInstanceRef, ObjectTypeDescriptor,
    PropertyDefDescriptor, ValueListItemDescriptor,
};
use crate::schema::provider::SchemaProvider;

/// Per-run cache over a [`SchemaProvider`]. Single-threaded by design of
/// the run; not `Sync`.
#[derive(Debug)]
pub struct CachedSchema<P> {
    inner: P,
    object_types: OnceCell<Vec<ObjectTypeDescriptor>>,
    value_lists: OnceCell<Vec<ObjectTypeDescriptor>>,
    property_defs: OnceCell<Vec<PropertyDefDescriptor>>,
    object_type_by_id: RefCell<BTreeMap<i32, ObjectTypeDescriptor>>,
    property_def_by_id: RefCell<BTreeMap<i32, PropertyDefDescriptor>>,
    classes: RefCell<BTreeMap<i32, Vec<ObjectClassDescriptor>>>,
    associated: RefCell<BTreeMap<i32, Vec<AssociatedPropertyDescriptor>>>,
    items: RefCell<BTreeMap<i32, Vec<ValueListItemDescriptor>>>,
}

impl<P: SchemaProvider> CachedSchema<P> {
    /// Wrap a provider. Nothing is fetched until first use.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            object_types: OnceCell::new(),
            value_lists: OnceCell::new(),
            property_defs: OnceCell::new(),
            object_type_by_id: RefCell::new(BTreeMap::new()),
            property_def_by_id: RefCell::new(BTreeMap::new()),
            classes: RefCell::new(BTreeMap::new()),
            associated: RefCell::new(BTreeMap::new()),
            items: RefCell::new(BTreeMap::new()),
        }
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwrap, dropping the cache.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

fn once<T: Clone>(
    cell: &OnceCell<T>,
    fetch: impl FnOnce() -> Result<T, SchemaError>,
) -> Result<T, SchemaError> {
    if let Some(value) = cell.get() {
        return Ok(value.clone());
    }
    let value = fetch()?;
    Ok(cell.get_or_init(|| value).clone())
}

fn keyed<T: Clone>(
    map: &RefCell<BTreeMap<i32, T>>,
    key: i32,
    fetch: impl FnOnce() -> Result<T, SchemaError>,
) -> Result<T, SchemaError> {
    if let Some(value) = map.borrow().get(&key) {
        return Ok(value.clone());
    }
    let value = fetch()?;
    map.borrow_mut().insert(key, value.clone());
    Ok(value)
}

impl<P: SchemaProvider> SchemaProvider for CachedSchema<P> {
    fn list_object_types(&self) -> Result<Vec<ObjectTypeDescriptor>, SchemaError> {
        once(&self.object_types, || {
            trace!("fetching object types");
            self.inner.list_object_types()
        })
    }

    fn list_value_lists(&self) -> Result<Vec<ObjectTypeDescriptor>, SchemaError> {
        once(&self.value_lists, || {
            trace!("fetching value lists");
            self.inner.list_value_lists()
        })
    }

    fn get_object_type(&self, id: i32) -> Result<ObjectTypeDescriptor, SchemaError> {
        keyed(&self.object_type_by_id, id, || self.inner.get_object_type(id))
    }

    fn list_classes(&self, object_type_id: i32) -> Result<Vec<ObjectClassDescriptor>, SchemaError> {
        keyed(&self.classes, object_type_id, || {
            trace!(object_type_id, "fetching classes");
            self.inner.list_classes(object_type_id)
        })
    }

    fn list_associated_properties(
        &self,
        class_id: i32,
    ) -> Result<Vec<AssociatedPropertyDescriptor>, SchemaError> {
        keyed(&self.associated, class_id, || {
            self.inner.list_associated_properties(class_id)
        })
    }

    fn list_property_defs(&self) -> Result<Vec<PropertyDefDescriptor>, SchemaError> {
        once(&self.property_defs, || {
            trace!("fetching property definitions");
            self.inner.list_property_defs()
        })
    }

    fn get_property_def(&self, id: i32) -> Result<PropertyDefDescriptor, SchemaError> {
        keyed(&self.property_def_by_id, id, || self.inner.get_property_def(id))
    }

    fn list_static_value_list_items(
        &self,
        value_list_id: i32,
    ) -> Result<Vec<ValueListItemDescriptor>, SchemaError> {
        keyed(&self.items, value_list_id, || {
            self.inner.list_static_value_list_items(value_list_id)
        })
    }

    fn resolve_by_alias(&self, kind: SchemaElementKind, alias: &str) -> Result<i32, SchemaError> {
        self.inner.resolve_by_alias(kind, alias)
    }

    fn resolve_by_guid(&self, kind: SchemaElementKind, guid: &str) -> Result<i32, SchemaError> {
        self.inner.resolve_by_guid(kind, guid)
    }

    fn verify_by_id(&self, kind: SchemaElementKind, id: i32) -> Result<i32, SchemaError> {
        self.inner.verify_by_id(kind, id)
    }

    fn owner_of(&self, kind: SchemaElementKind, id: i32) -> Result<i32, SchemaError> {
        self.inner.owner_of(kind, id)
    }

    fn resolve_object_by_guid(&self, guid: &str) -> Result<ObjectInstanceRef, SchemaError> {
        self.inner.resolve_object_by_guid(guid)
    }
}
