//! Read-only descriptors of vault schema elements.
//!
//! These mirror what the vault reports for object types, classes,
//! property definitions and value list items. They are plain data: the
//! generation pipeline reads them and never mutates them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Property ids in this range belong to built-in properties the base
/// wrapper handles itself.
pub const RESERVED_BUILTIN_IDS: std::ops::RangeInclusive<i32> = 1..=100;

/// Declared data type of a property definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    #[default]
    Uninitialized,
    Text,
    MultiLineText,
    Integer,
    Integer64,
    Floating,
    Date,
    Time,
    Timestamp,
    Boolean,
    Lookup,
    MultiSelectLookup,
    FileTime,
    Acl,
}

impl ValueKind {
    /// Returns the vault's name for the data type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "MFDatatypeUninitialized",
            Self::Text => "MFDatatypeText",
            Self::MultiLineText => "MFDatatypeMultiLineText",
            Self::Integer => "MFDatatypeInteger",
            Self::Integer64 => "MFDatatypeInteger64",
            Self::Floating => "MFDatatypeFloating",
            Self::Date => "MFDatatypeDate",
            Self::Time => "MFDatatypeTime",
            Self::Timestamp => "MFDatatypeTimestamp",
            Self::Boolean => "MFDatatypeBoolean",
            Self::Lookup => "MFDatatypeLookup",
            Self::MultiSelectLookup => "MFDatatypeMultiSelectLookup",
            Self::FileTime => "MFDatatypeFILETIME",
            Self::Acl => "MFDatatypeACL",
        }
    }

    /// Whether values of this kind point into a value list.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup | Self::MultiSelectLookup)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the vault fills a property automatically, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomaticValueKind {
    #[default]
    None,
    CalculatedWithPlaceholders,
    CalculatedWithScript,
    AutoNumberSimple,
    AutoNumberWithScript,
}

/// An object type or value list. Real object types carry objects;
/// the rest are static lists of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectTypeDescriptor {
    pub id: i32,
    pub name_singular: String,
    #[serde(default)]
    pub name_plural: String,
    #[serde(default)]
    pub real_object_type: bool,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub guid: Option<String>,
}

impl ObjectTypeDescriptor {
    /// A real object type backed by object instances.
    pub fn new(id: i32, name_singular: impl Into<String>) -> Self {
        let name_singular = name_singular.into();
        Self {
            id,
            name_plural: name_singular.clone(),
            name_singular,
            real_object_type: true,
            aliases: Vec::new(),
            guid: None,
        }
    }

    /// A static value list.
    pub fn value_list(id: i32, name_singular: impl Into<String>) -> Self {
        Self {
            real_object_type: false,
            ..Self::new(id, name_singular)
        }
    }

    pub fn with_plural(mut self, name_plural: impl Into<String>) -> Self {
        self.name_plural = name_plural.into();
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }
}

/// A property definition attached to a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedPropertyDescriptor {
    pub property_def: i32,
    #[serde(default)]
    pub required: bool,
}

impl AssociatedPropertyDescriptor {
    pub fn new(property_def: i32) -> Self {
        Self {
            property_def,
            required: false,
        }
    }

    pub fn required(property_def: i32) -> Self {
        Self {
            property_def,
            required: true,
        }
    }
}

/// An object class of some object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectClassDescriptor {
    pub id: i32,
    pub name: String,
    pub object_type: i32,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub guid: Option<String>,
    /// Associated properties in declared order.
    #[serde(default)]
    pub associated_properties: Vec<AssociatedPropertyDescriptor>,
}

impl ObjectClassDescriptor {
    pub fn new(id: i32, name: impl Into<String>, object_type: i32) -> Self {
        Self {
            id,
            name: name.into(),
            object_type,
            aliases: Vec::new(),
            guid: None,
            associated_properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, property: AssociatedPropertyDescriptor) -> Self {
        self.associated_properties.push(property);
        self
    }

    pub fn with_properties(mut self, property_defs: impl IntoIterator<Item = i32>) -> Self {
        self.associated_properties
            .extend(property_defs.into_iter().map(AssociatedPropertyDescriptor::new));
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }
}

/// A property definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefDescriptor {
    pub id: i32,
    pub name: String,
    pub data_type: ValueKind,
    /// Target value list for lookup kinds.
    #[serde(default)]
    pub value_list: Option<i32>,
    #[serde(default)]
    pub automatic_value: AutomaticValueKind,
    #[serde(default)]
    pub builtin: bool,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub guid: Option<String>,
}

impl PropertyDefDescriptor {
    pub fn new(id: i32, name: impl Into<String>, data_type: ValueKind) -> Self {
        Self {
            id,
            name: name.into(),
            data_type,
            value_list: None,
            automatic_value: AutomaticValueKind::None,
            builtin: false,
            aliases: Vec::new(),
            guid: None,
        }
    }

    /// A single-select lookup into `value_list`.
    pub fn lookup(id: i32, name: impl Into<String>, value_list: i32) -> Self {
        Self {
            value_list: Some(value_list),
            ..Self::new(id, name, ValueKind::Lookup)
        }
    }

    /// A multi-select lookup into `value_list`.
    pub fn multi_lookup(id: i32, name: impl Into<String>, value_list: i32) -> Self {
        Self {
            value_list: Some(value_list),
            ..Self::new(id, name, ValueKind::MultiSelectLookup)
        }
    }

    pub fn with_automatic_value(mut self, automatic_value: AutomaticValueKind) -> Self {
        self.automatic_value = automatic_value;
        self
    }

    pub fn as_builtin(mut self) -> Self {
        self.builtin = true;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }

    /// First non-blank semantic alias.
    pub fn first_alias(&self) -> Option<&str> {
        first_alias(&self.aliases)
    }

    /// Whether the value is computed by the vault.
    pub fn is_automatic(&self) -> bool {
        self.automatic_value != AutomaticValueKind::None
    }

    /// Whether this is one of the low-numbered built-in properties.
    pub fn is_reserved_builtin(&self) -> bool {
        RESERVED_BUILTIN_IDS.contains(&self.id)
    }
}

/// An item of a static value list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueListItemDescriptor {
    pub id: i32,
    pub name: String,
    pub value_list: i32,
    #[serde(default)]
    pub owner: Option<i32>,
    #[serde(default)]
    pub guid: Option<String>,
}

impl ValueListItemDescriptor {
    pub fn new(id: i32, name: impl Into<String>, value_list: i32) -> Self {
        Self {
            id,
            name: name.into(),
            value_list,
            owner: None,
            guid: None,
        }
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }
}

/// A workflow state and the workflow owning it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStateDescriptor {
    pub id: i32,
    pub name: String,
    pub workflow: i32,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub guid: Option<String>,
}

impl WorkflowStateDescriptor {
    pub fn new(id: i32, name: impl Into<String>, workflow: i32) -> Self {
        Self {
            id,
            name: name.into(),
            workflow,
            aliases: Vec::new(),
            guid: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

/// Workflows, named access lists, class groups, user groups and views
/// share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedElementDescriptor {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub guid: Option<String>,
}

impl NamedElementDescriptor {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            aliases: Vec::new(),
            guid: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }
}

/// An object stored in the vault, addressable by GUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInstanceDescriptor {
    pub object_type: i32,
    pub id: i32,
    pub guid: String,
}

/// Identity of one object: its type and id within the type.
///
/// `object_type` is `None` when the caller only had a bare id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectInstanceRef {
    pub object_type: Option<i32>,
    pub id: i32,
}

impl ObjectInstanceRef {
    pub fn new(object_type: i32, id: i32) -> Self {
        Self {
            object_type: Some(object_type),
            id,
        }
    }

    pub fn id_only(id: i32) -> Self {
        Self {
            object_type: None,
            id,
        }
    }
}

impl fmt::Display for ObjectInstanceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.object_type {
            Some(object_type) => write!(f, "({}-{})", object_type, self.id),
            None => write!(f, "{}", self.id),
        }
    }
}

/// First non-blank alias of a declared alias list.
pub(crate) fn first_alias(aliases: &[String]) -> Option<&str> {
    aliases
        .iter()
        .map(|alias| alias.trim())
        .find(|alias| !alias.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_alias_skips_blank_entries() {
        let pdef = PropertyDefDescriptor::new(1020, "Customer", ValueKind::Text)
            .with_alias("  ")
            .with_alias("PD.Customer")
            .with_alias("PD.Client");
        assert_eq!(pdef.first_alias(), Some("PD.Customer"));
    }

    #[test]
    fn test_reserved_builtin_range() {
        let name = PropertyDefDescriptor::new(0, "Name or title", ValueKind::Text).as_builtin();
        let created = PropertyDefDescriptor::new(20, "Created", ValueKind::Timestamp).as_builtin();
        let last = PropertyDefDescriptor::new(100, "Last", ValueKind::Text);
        let custom = PropertyDefDescriptor::new(1001, "Customer", ValueKind::Text);

        assert!(!name.is_reserved_builtin());
        assert!(created.is_reserved_builtin());
        assert!(last.is_reserved_builtin());
        assert!(!custom.is_reserved_builtin());
    }

    #[test]
    fn test_value_list_is_not_real() {
        assert!(ObjectTypeDescriptor::new(0, "Document").real_object_type);
        assert!(!ObjectTypeDescriptor::value_list(101, "Status").real_object_type);
    }

    #[test]
    fn test_property_def_deserializes_with_defaults() {
        let json = r#"{ "id": 1002, "name": "Amount", "data_type": "floating" }"#;
        let pdef: PropertyDefDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(pdef.data_type, ValueKind::Floating);
        assert_eq!(pdef.automatic_value, AutomaticValueKind::None);
        assert!(pdef.aliases.is_empty());
        assert!(!pdef.is_automatic());
    }

    #[test]
    fn test_object_instance_ref_display() {
        assert_eq!(ObjectInstanceRef::new(0, 42).to_string(), "(0-42)");
        assert_eq!(ObjectInstanceRef::id_only(42).to_string(), "42");
    }
}
