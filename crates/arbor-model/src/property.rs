//! Property definitions and property values.
//!
//! A [`PropertyDefinition`] registers a named metadata slot. A [`Property`]
//! carries the value of such a slot for one resource, split by where it is
//! attached: to the structure record (this link only) or to the resource
//! record (shared by all siblings).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use arbor_types::PropertyDefinitionId;

/// Where a property value attaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MappingType {
    /// Attached to one link (structure record).
    Structure,
    /// Attached to the content record, visible through every sibling.
    Resource,
    /// Written to both records.
    Shared,
    /// Used only by [`NULL_PROPERTY_DEFINITION`].
    Unmapped,
}

impl MappingType {
    /// Persisted numeric code. `Unmapped` is `-1`.
    pub const fn code(&self) -> i32 {
        match self {
            Self::Structure => 0,
            Self::Resource => 1,
            Self::Shared => 2,
            Self::Unmapped => -1,
        }
    }

    /// Parse a persisted code. Unknown codes map to `Unmapped`.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Structure,
            1 => Self::Resource,
            2 => Self::Shared,
            _ => Self::Unmapped,
        }
    }
}

/// The "not found" property definition: nil id, empty name, mapping `-1`.
pub static NULL_PROPERTY_DEFINITION: PropertyDefinition = PropertyDefinition {
    id: PropertyDefinitionId::nil(),
    name: String::new(),
    mapping_type: MappingType::Unmapped,
};

/// A named, typed metadata slot.
///
/// Equality and hashing use only the id: two definitions created
/// independently under the same name are different definitions. Ordering by
/// name is available for presentation through [`PropertyDefinition::cmp_by_name`];
/// there is deliberately no `Ord` impl.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyDefinition {
    id: PropertyDefinitionId,
    name: String,
    mapping_type: MappingType,
}

impl PropertyDefinition {
    pub fn new(id: PropertyDefinitionId, name: impl Into<String>, mapping_type: MappingType) -> Self {
        Self {
            id,
            name: name.into(),
            mapping_type,
        }
    }

    /// The shared null definition.
    pub fn null() -> &'static PropertyDefinition {
        &NULL_PROPERTY_DEFINITION
    }

    pub fn is_null(&self) -> bool {
        self.id.is_nil()
    }

    pub fn id(&self) -> PropertyDefinitionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mapping_type(&self) -> MappingType {
        self.mapping_type
    }

    pub fn set_mapping_type(&mut self, mapping_type: MappingType) {
        self.mapping_type = mapping_type;
    }

    /// Alphabetical comparison by name, for display lists.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// Sort definitions alphabetically by name.
    pub fn sort_by_name(definitions: &mut [PropertyDefinition]) {
        definitions.sort_by(|a, b| a.cmp_by_name(b));
    }
}

impl PartialEq for PropertyDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PropertyDefinition {}

impl Hash for PropertyDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for PropertyDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.id.short_id())
    }
}

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

/// The value of one property on one resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    name: String,
    structure_value: Option<String>,
    resource_value: Option<String>,
}

impl Property {
    /// An empty property with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A property whose value attaches according to `mapping`.
    pub fn with_value(
        name: impl Into<String>,
        value: impl Into<String>,
        mapping: MappingType,
    ) -> Self {
        let mut property = Self::new(name);
        property.set_value(value, mapping);
        property
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn structure_value(&self) -> Option<&str> {
        self.structure_value.as_deref()
    }

    pub fn resource_value(&self) -> Option<&str> {
        self.resource_value.as_deref()
    }

    /// The effective value: the structure value if set, else the resource value.
    pub fn value(&self) -> Option<&str> {
        self.structure_value().or_else(|| self.resource_value())
    }

    /// The value stored at a specific attachment point. `Shared` reads like
    /// [`Property::value`]; `Unmapped` has no value.
    pub fn value_for(&self, mapping: MappingType) -> Option<&str> {
        match mapping {
            MappingType::Structure => self.structure_value(),
            MappingType::Resource => self.resource_value(),
            MappingType::Shared => self.value(),
            MappingType::Unmapped => None,
        }
    }

    /// Store a value. `Shared` writes both records; `Unmapped` is ignored.
    pub fn set_value(&mut self, value: impl Into<String>, mapping: MappingType) {
        let value = value.into();
        match mapping {
            MappingType::Structure => self.structure_value = Some(value),
            MappingType::Resource => self.resource_value = Some(value),
            MappingType::Shared => {
                self.structure_value = Some(value.clone());
                self.resource_value = Some(value);
            }
            MappingType::Unmapped => {}
        }
    }

    /// Returns `true` if neither record carries a value.
    pub fn is_empty(&self) -> bool {
        self.structure_value.is_none() && self.resource_value.is_none()
    }

    /// Merge `explicit` over `defaults`: an explicit property replaces the
    /// default of the same name, and defaults nobody overrode are appended in
    /// their original order.
    pub fn merge_defaults(explicit: &[Property], defaults: &[Property]) -> Vec<Property> {
        let mut merged = explicit.to_vec();
        for default in defaults {
            if !explicit.iter().any(|p| p.name == default.name) {
                merged.push(default.clone());
            }
        }
        merged
    }

    /// Find a property by name.
    pub fn find<'a>(properties: &'a [Property], name: &str) -> Option<&'a Property> {
        properties.iter().find(|p| p.name == name)
    }
}
