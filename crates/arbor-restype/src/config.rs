use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use arbor_model::{MappingType, Property};

use crate::error::ResourceTypeResult;
use crate::generic::{DeprecatedResourceType, GenericResourceType};
use crate::handler::ResourceTypeHandler;
use crate::registry::ResourceTypeRegistry;

/// How a configured type behaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Folder,
    #[default]
    File,
    Deprecated,
    #[serde(rename = "deprecated_folder")]
    DeprecatedFolder,
}

/// A property value attached to every new resource of a configured type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultProperty {
    pub name: String,
    pub value: String,
    #[serde(default = "default_mapping")]
    pub mapping: MappingType,
}

fn default_mapping() -> MappingType {
    MappingType::Structure
}

/// One resource type declared in configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConfig {
    pub name: String,
    pub id: u32,
    pub loader_id: u32,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub direct_editable: bool,
    #[serde(default)]
    pub cache_property: Option<String>,
    #[serde(default)]
    pub default_properties: Vec<DefaultProperty>,
}

impl TypeConfig {
    /// Build the handler this entry describes.
    pub fn to_handler(&self) -> Arc<dyn ResourceTypeHandler> {
        match self.kind {
            TypeKind::Deprecated | TypeKind::DeprecatedFolder => {
                Arc::new(DeprecatedResourceType::new(
                    &self.name,
                    self.id,
                    self.loader_id,
                    self.kind == TypeKind::DeprecatedFolder,
                ))
            }
            TypeKind::Folder | TypeKind::File => {
                let base = if self.kind == TypeKind::Folder {
                    GenericResourceType::folder(&self.name, self.id, self.loader_id)
                } else {
                    GenericResourceType::file(&self.name, self.id, self.loader_id)
                };
                let properties = self
                    .default_properties
                    .iter()
                    .map(|p| Property::with_value(&p.name, &p.value, p.mapping))
                    .collect();
                let mut handler = base
                    .with_direct_editable(self.direct_editable)
                    .with_default_properties(properties);
                if let Some(cache) = &self.cache_property {
                    handler = handler.with_cache_property(cache);
                }
                Arc::new(handler)
            }
        }
    }
}

/// Registry configuration.
///
/// ```toml
/// include_defaults = true
///
/// [[types]]
/// name = "xmlpage"
/// id = 10
/// loader_id = 1
/// direct_editable = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Start from the built-in types.
    pub include_defaults: bool,
    /// Additional types, registered in order.
    pub types: Vec<TypeConfig>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            include_defaults: true,
            types: Vec::new(),
        }
    }
}

impl RegistryConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> ResourceTypeResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Build a registry. Fails on the first duplicate id or name.
    pub fn build_registry(&self) -> ResourceTypeResult<ResourceTypeRegistry> {
        let mut registry = if self.include_defaults {
            ResourceTypeRegistry::with_default_types()
        } else {
            ResourceTypeRegistry::new()
        };
        for entry in &self.types {
            registry.register_type(entry.to_handler())?;
        }
        info!(
            types = registry.len(),
            configured = self.types.len(),
            "built resource type registry"
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResourceTypeError;
    use crate::handler::CreateRequest;
    use arbor_types::{ErrorKind, ResourceTypeId};

    const SAMPLE: &str = r#"
include_defaults = true

[[types]]
name = "xmlpage"
id = 10
loader_id = 1
direct_editable = true
cache_property = "cache"

[[types.default_properties]]
name = "template"
value = "/system/page.tpl"
mapping = "Resource"

[[types]]
name = "gallery"
id = 11
loader_id = 1
kind = "folder"

[[types]]
name = "legacy"
id = 12
loader_id = 1
kind = "deprecated"
"#;

    #[test]
    fn default_config_has_built_ins() {
        let registry = RegistryConfig::default().build_registry().unwrap();
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn parse_and_build() {
        let config = RegistryConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.types.len(), 3);
        assert_eq!(config.types[0].default_properties[0].mapping, MappingType::Resource);
        assert_eq!(config.types[1].kind, TypeKind::Folder);

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 9);

        let xmlpage = registry.handler_for("xmlpage").unwrap();
        assert!(xmlpage.is_direct_editable());
        assert_eq!(xmlpage.default_cache_property(), Some("cache"));
        let created = xmlpage.create(CreateRequest::new("/a.xml")).unwrap();
        assert_eq!(
            Property::find(&created.properties, "template").and_then(Property::resource_value),
            Some("/system/page.tpl")
        );

        assert!(registry.handler_for(ResourceTypeId(11)).unwrap().is_folder());
        assert!(registry.handler_for("legacy").unwrap().is_deprecated());
    }

    #[test]
    fn deprecated_folder_type() {
        let config = RegistryConfig::from_toml_str(
            "include_defaults = false\n[[types]]\nname = \"oldgallery\"\nid = 13\nloader_id = 1\nkind = \"deprecated_folder\"\n",
        )
        .unwrap();
        assert_eq!(config.types[0].kind, TypeKind::DeprecatedFolder);
        let registry = config.build_registry().unwrap();
        let handler = registry.handler_for("oldgallery").unwrap();
        assert!(handler.is_folder());
        assert!(handler.is_deprecated());
        assert_eq!(
            handler.create(CreateRequest::new("/g/")).unwrap_err().kind(),
            ErrorKind::UnsupportedOperation
        );
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = RegistryConfig::from_toml_str("").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn without_defaults() {
        let config = RegistryConfig::from_toml_str(
            "include_defaults = false\n[[types]]\nname = \"x\"\nid = 1\nloader_id = 1\n",
        )
        .unwrap();
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.type_names(), ["x"]);
    }

    #[test]
    fn clash_with_built_in_fails() {
        let config = RegistryConfig::from_toml_str(
            "[[types]]\nname = \"plain2\"\nid = 1\nloader_id = 1\n",
        )
        .unwrap();
        let err = config.build_registry().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = RegistryConfig::from_toml_str("[[types]]\nname = 3\n").unwrap_err();
        assert!(matches!(err, ResourceTypeError::Config(_)));
    }
}
