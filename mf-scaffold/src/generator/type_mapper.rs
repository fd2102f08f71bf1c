//! Vault data types to C# accessor shapes.
//!
//! # Type Mappings
//!
//! | Value kind | Storage type |
//! |------------|--------------|
//! | text, multi-line text | `string` |
//! | date | `DateTime` |
//! | boolean | `bool` |
//! | integer | `int` |
//! | floating | `float` |
//! | lookup into a real object type | `OT_<Name>` |
//! | lookup into a static value list | `<Name>` (generated enum) |
//! | multi-select lookup | `List<...>` of the above |
//!
//! Any other kind has no mapping; the caller warns and skips the property.

use tracing::trace;

use crate::error::ScaffoldResult;
use crate::generator::source::quote;
use crate::ident::{canonical_braced_guid, normalize_guid, ResolvedIdentifier};
use crate::naming::clean_name;
use crate::schema::{
    ObjectTypeDescriptor, PropertyDefDescriptor, SchemaElementKind, SchemaProvider, ValueKind,
};

/// Placeholder for the property reference inside accessor templates.
pub const REF_PLACEHOLDER: &str = "{ref}";

/// Storage type plus getter and setter expression templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorShape {
    pub storage_type: String,
    pub getter_template: String,
    pub setter_template: String,
}

impl AccessorShape {
    fn new(storage_type: impl Into<String>, getter: impl Into<String>, setter: impl Into<String>) -> Self {
        Self {
            storage_type: storage_type.into(),
            getter_template: getter.into(),
            setter_template: setter.into(),
        }
    }

    fn scalar(storage_type: &str) -> Self {
        Self::new(
            storage_type,
            format!("this.GetProperty<{storage_type}>({REF_PLACEHOLDER})"),
            format!("this.SetProperty({REF_PLACEHOLDER}, value)"),
        )
    }

    /// Getter expression for a concrete property reference.
    pub fn getter(&self, reference: &str) -> String {
        self.getter_template.replace(REF_PLACEHOLDER, reference)
    }

    /// Setter statement (without `;`) for a concrete property reference.
    pub fn setter(&self, reference: &str) -> String {
        self.setter_template.replace(REF_PLACEHOLDER, reference)
    }
}

/// Generated type a lookup property points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    /// A real object type; named `OT_<Name>`.
    ObjectType(String),
    /// A static value list; named `<Name>`.
    ValueList(String),
}

impl LookupTarget {
    /// Name of the generated type for `value_list`.
    pub fn of(value_list: &ObjectTypeDescriptor) -> Self {
        let name = clean_name(&value_list.name_singular);
        if value_list.real_object_type {
            Self::ObjectType(format!("OT_{name}"))
        } else {
            Self::ValueList(name)
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::ObjectType(name) | Self::ValueList(name) => name,
        }
    }
}

/// Maps property definitions to accessor shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMapper;

impl TypeMapper {
    pub fn new() -> Self {
        Self
    }

    /// Accessor shape for `pdef`, or `None` when its value kind has no
    /// mapping.
    ///
    /// Lookup targets are resolved by id against `schema`; the generated
    /// type is referenced by name only, so it does not matter whether that
    /// artifact has been emitted yet.
    pub fn map_property_type(
        &self,
        pdef: &PropertyDefDescriptor,
        schema: &dyn SchemaProvider,
    ) -> ScaffoldResult<Option<AccessorShape>> {
        let shape = match pdef.data_type {
            ValueKind::Text | ValueKind::MultiLineText => Some(AccessorShape::scalar("string")),
            ValueKind::Date => Some(AccessorShape::scalar("DateTime")),
            ValueKind::Boolean => Some(AccessorShape::scalar("bool")),
            ValueKind::Integer => Some(AccessorShape::scalar("int")),
            ValueKind::Floating => Some(AccessorShape::scalar("float")),
            ValueKind::Lookup => self.lookup_target(pdef, schema)?.map(|target| single(&target)),
            ValueKind::MultiSelectLookup => {
                self.lookup_target(pdef, schema)?.map(|target| multi(&target))
            }
            _ => None,
        };

        trace!(
            property = %pdef.name,
            data_type = %pdef.data_type,
            storage = shape.as_ref().map(|s| s.storage_type.as_str()).unwrap_or("-"),
            "mapped property type"
        );
        Ok(shape)
    }

    fn lookup_target(
        &self,
        pdef: &PropertyDefDescriptor,
        schema: &dyn SchemaProvider,
    ) -> ScaffoldResult<Option<LookupTarget>> {
        let Some(value_list) = pdef.value_list else {
            return Ok(None);
        };

        let mut target = ResolvedIdentifier::from_id(value_list);
        let id = target
            .resolve(schema, SchemaElementKind::ObjectType)?
            .try_id()?;
        let value_list = schema.get_object_type(id)?;

        Ok(Some(LookupTarget::of(&value_list)))
    }
}

fn single(target: &LookupTarget) -> AccessorShape {
    match target {
        LookupTarget::ObjectType(name) => AccessorShape::new(
            name.as_str(),
            format!("this.GetLookup<{name}>({REF_PLACEHOLDER})"),
            format!("this.SetLookup({REF_PLACEHOLDER}, value)"),
        ),
        LookupTarget::ValueList(name) => AccessorShape::new(
            name.as_str(),
            format!("this.GetValueListItem<{name}>({REF_PLACEHOLDER})"),
            format!("this.SetValueListItem({REF_PLACEHOLDER}, value)"),
        ),
    }
}

fn multi(target: &LookupTarget) -> AccessorShape {
    match target {
        LookupTarget::ObjectType(name) => AccessorShape::new(
            format!("List<{name}>"),
            format!("this.GetLookups<{name}>({REF_PLACEHOLDER})"),
            format!("this.SetLookups({REF_PLACEHOLDER}, value)"),
        ),
        LookupTarget::ValueList(name) => AccessorShape::new(
            format!("List<{name}>"),
            format!("this.GetValueListItems<{name}>({REF_PLACEHOLDER})"),
            format!("this.SetValueListItems({REF_PLACEHOLDER}, value)"),
        ),
    }
}

/// Accessor shape for `pdef`; see [`TypeMapper::map_property_type`].
pub fn map_property_type(
    pdef: &PropertyDefDescriptor,
    schema: &dyn SchemaProvider,
) -> ScaffoldResult<Option<AccessorShape>> {
    TypeMapper::new().map_property_type(pdef, schema)
}

/// C# expression naming `pdef` inside an accessor.
///
/// Prefers the first alias, then the GUID, then the numeric id. Aliases and
/// GUIDs survive renames in the vault; display names do not.
pub fn property_reference(pdef: &PropertyDefDescriptor) -> String {
    if let Some(alias) = pdef.first_alias() {
        return quote(alias);
    }

    let guid = pdef
        .guid
        .as_deref()
        .and_then(|guid| canonical_braced_guid(guid).or_else(|| normalize_guid(guid).ok()));
    match guid {
        Some(guid) => quote(&guid),
        None => pdef.id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ResolveError, ScaffoldError};
    use crate::schema::SchemaSnapshot;

    fn schema() -> SchemaSnapshot {
        SchemaSnapshot::new()
            .with_object_type(ObjectTypeDescriptor::new(136, "Customer"))
            .with_object_type(ObjectTypeDescriptor::value_list(200, "Invoice status"))
    }

    fn map(pdef: PropertyDefDescriptor) -> Option<AccessorShape> {
        map_property_type(&pdef, &schema()).unwrap()
    }

    #[test]
    fn test_scalar_mappings() {
        let cases = [
            (ValueKind::Text, "string"),
            (ValueKind::MultiLineText, "string"),
            (ValueKind::Date, "DateTime"),
            (ValueKind::Boolean, "bool"),
            (ValueKind::Integer, "int"),
            (ValueKind::Floating, "float"),
        ];

        for (kind, expected) in cases {
            let shape = map(PropertyDefDescriptor::new(1001, "P", kind)).unwrap();
            assert_eq!(shape.storage_type, expected, "{kind}");
        }
    }

    #[test]
    fn test_scalar_accessors() {
        let shape = map(PropertyDefDescriptor::new(1001, "P", ValueKind::Text)).unwrap();
        assert_eq!(shape.getter("\"PD.P\""), "this.GetProperty<string>(\"PD.P\")");
        assert_eq!(shape.setter("1001"), "this.SetProperty(1001, value)");
    }

    #[test]
    fn test_lookup_into_real_object_type() {
        let shape = map(PropertyDefDescriptor::lookup(1002, "Customer", 136)).unwrap();
        assert_eq!(shape.storage_type, "OT_Customer");
        assert_eq!(shape.getter("1002"), "this.GetLookup<OT_Customer>(1002)");
    }

    #[test]
    fn test_lookup_into_static_list() {
        let shape = map(PropertyDefDescriptor::lookup(1003, "Status", 200)).unwrap();
        assert_eq!(shape.storage_type, "Invoicestatus");
        assert_eq!(
            shape.setter("1003"),
            "this.SetValueListItem(1003, value)"
        );
    }

    #[test]
    fn test_multi_lookup_is_a_list() {
        let real = map(PropertyDefDescriptor::multi_lookup(1004, "Customers", 136)).unwrap();
        assert_eq!(real.storage_type, "List<OT_Customer>");

        let list = map(PropertyDefDescriptor::multi_lookup(1005, "Statuses", 200)).unwrap();
        assert_eq!(list.storage_type, "List<Invoicestatus>");
    }

    #[test]
    fn test_unmapped_kinds() {
        for kind in [ValueKind::Timestamp, ValueKind::Integer64, ValueKind::Acl, ValueKind::Time] {
            assert!(map(PropertyDefDescriptor::new(1006, "P", kind)).is_none(), "{kind}");
        }
    }

    #[test]
    fn test_dangling_lookup_target_is_unresolved() {
        let pdef = PropertyDefDescriptor::lookup(1007, "Ghost", 999);
        let err = map_property_type(&pdef, &schema()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Resolve(ResolveError::Unresolved { .. })
        ));
    }

    #[test]
    fn test_property_reference_preference() {
        let guid = "{11111111-2222-3333-4444-555555555555}";
        let aliased = PropertyDefDescriptor::new(1020, "Customer", ValueKind::Text)
            .with_alias("PD.Customer")
            .with_guid(guid);
        let guid_only = PropertyDefDescriptor::new(1021, "Customer", ValueKind::Text)
            .with_guid(guid.to_lowercase());
        let bare = PropertyDefDescriptor::new(1022, "Customer", ValueKind::Text);

        assert_eq!(property_reference(&aliased), "\"PD.Customer\"");
        assert_eq!(property_reference(&guid_only), format!("\"{guid}\""));
        assert_eq!(property_reference(&bare), "1022");
    }
}
