//! Content descriptors
//!
//! A descriptor is the serialized form of one piece of content inside a
//! package. Initializing it builds the domain object and hands it to the
//! matching registration service under the package's content source.

use contentlib_core::{Component, ContentError, ContentKind, EnemySetup, GameObject, Item, Result};
use contentlib_service::{Registration, ServiceRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::manifest::PackageManifest;

fn default_true() -> bool {
    true
}

/// Serialized game object template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefabSpec {
    pub name: String,

    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
}

impl PrefabSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            components: Vec::new(),
        }
    }

    pub fn component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Instantiate the live template
    pub fn to_game_object(&self) -> GameObject {
        self.components
            .iter()
            .cloned()
            .fold(GameObject::new(self.name.clone()), GameObject::with_component)
            .with_active(self.active)
    }
}

/// Item descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemContent {
    pub item_name: String,

    /// Registration key; defaults to the prefab's name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,

    #[serde(default)]
    pub prefab: Option<PrefabSpec>,
}

impl ItemContent {
    fn to_item(&self) -> Item {
        let prefab = self.prefab.as_ref().map(PrefabSpec::to_game_object);
        let asset_name = self
            .asset_name
            .clone()
            .or_else(|| prefab.as_ref().map(|p| p.name().to_string()))
            .unwrap_or_default();

        Item {
            item_name: self.item_name.clone(),
            asset_name,
            prefab,
        }
    }
}

/// Enemy descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyContent {
    pub name: String,

    #[serde(default)]
    pub spawn_objects: Vec<Option<PrefabSpec>>,
}

impl EnemyContent {
    fn to_setup(&self) -> EnemySetup {
        EnemySetup {
            name: self.name.clone(),
            spawn_objects: self
                .spawn_objects
                .iter()
                .map(|spec| spec.as_ref().map(PrefabSpec::to_game_object))
                .collect(),
        }
    }
}

/// One piece of content inside a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentDescriptor {
    Item(ItemContent),
    Enemy(EnemyContent),
}

impl ContentDescriptor {
    pub fn name(&self) -> &str {
        match self {
            Self::Item(item) => &item.item_name,
            Self::Enemy(enemy) => &enemy.name,
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Item(_) => ContentKind::Item,
            Self::Enemy(_) => ContentKind::Enemy,
        }
    }

    /// Register this content under the package's source
    ///
    /// # Errors
    ///
    /// Any failure is wrapped in [`ContentError::Descriptor`] carrying the
    /// descriptor's name and kind. Rejections are not failures.
    pub fn initialize(&self, manifest: &PackageManifest, services: &ServiceRegistry) -> Result<Registration> {
        let source = services
            .registry
            .get_or_create_source(&manifest.identifier(), Some(manifest.source_metadata()));

        let result = match self {
            Self::Item(content) => services.items.register(Arc::new(content.to_item()), &source),
            Self::Enemy(content) => services.enemies.register(Arc::new(content.to_setup()), &source),
        };

        result.map_err(|e| ContentError::Descriptor {
            name: self.name().to_string(),
            kind: self.kind().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentlib_core::{Difficulty, EnemyParent};
    use contentlib_service::memory::{CloneFactory, MemoryCatalog, MemoryDirector, MemoryResources};
    use contentlib_service::HostServices;
    use semver::Version;

    fn services() -> ServiceRegistry {
        ServiceRegistry::new(HostServices {
            resources: Arc::new(MemoryResources::new()),
            catalog: Arc::new(MemoryCatalog::new()),
            director: Arc::new(MemoryDirector::new()),
            factory: Arc::new(CloneFactory::new()),
        })
    }

    fn manifest() -> PackageManifest {
        PackageManifest::new("MoreCarts", "Zehs", Version::new(1, 0, 0))
    }

    #[test]
    fn test_prefab_spec_builds_template() {
        let spec = PrefabSpec {
            name: "Enemy - Duck".to_string(),
            active: false,
            components: vec![Component::EnemyParent(EnemyParent {
                enemy_name: "Duck".to_string(),
                difficulty: Difficulty::Difficulty2,
            })],
        };

        let object = spec.to_game_object();
        assert_eq!(object.name(), "Enemy - Duck");
        assert!(!object.is_active());
        assert_eq!(object.enemy_parent().unwrap().difficulty, Difficulty::Difficulty2);
    }

    #[test]
    fn test_item_asset_name_defaults_to_prefab() {
        let content = ItemContent {
            item_name: "Cart".to_string(),
            asset_name: None,
            prefab: Some(PrefabSpec::new("Item Cart Medium")),
        };
        assert_eq!(content.to_item().asset_name, "Item Cart Medium");
    }

    #[test]
    fn test_initialize_attributes_to_package_source() {
        let services = services();
        let descriptor = ContentDescriptor::Item(ItemContent {
            item_name: "Cart".to_string(),
            asset_name: None,
            prefab: Some(PrefabSpec::new("Item Cart Medium")),
        });

        let result = descriptor.initialize(&manifest(), &services).unwrap();
        assert!(result.is_registered());

        let source = services.registry.find_source_by_guid("Zehs-MoreCarts").unwrap();
        assert_eq!(source.name(), "MoreCarts");
        assert_eq!(source.version(), "1.0.0");
        assert_eq!(services.registry.all_from(&source).len(), 1);
    }

    #[test]
    fn test_initialize_failure_names_descriptor() {
        let services = services();
        let descriptor = ContentDescriptor::Enemy(EnemyContent {
            name: "Enemy - Nothing".to_string(),
            spawn_objects: vec![],
        });

        let err = descriptor.initialize(&manifest(), &services).unwrap_err();
        match err {
            ContentError::Descriptor { name, kind, .. } => {
                assert_eq!(name, "Enemy - Nothing");
                assert_eq!(kind, "enemy");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
