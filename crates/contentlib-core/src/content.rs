//! Content objects supplied by sources
//!
//! Content is a closed set of kinds. The registry stores every kind in one
//! list as [`ContentObject`] and typed queries filter on the variant through
//! [`ContentVariant`].

use std::fmt;
use std::sync::Arc;

use crate::object::{EnemyParent, GameObject};
use crate::types::ContentKind;

/// A purchasable item
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Human-readable name shown in game
    pub item_name: String,

    /// Registration key; must equal the prefab's name
    pub asset_name: String,

    /// Spawnable template
    pub prefab: Option<GameObject>,
}

impl Item {
    /// Create an item whose asset name follows its prefab
    pub fn new(item_name: impl Into<String>, prefab: GameObject) -> Self {
        Self {
            item_name: item_name.into(),
            asset_name: prefab.name().to_string(),
            prefab: Some(prefab),
        }
    }
}

/// A group of enemy templates spawned together
#[derive(Debug, Clone, PartialEq)]
pub struct EnemySetup {
    /// Asset name of the setup; registration key
    pub name: String,

    /// Templates spawned for this setup. Entries may be missing in
    /// hand-authored setups and are skipped during registration.
    pub spawn_objects: Vec<Option<GameObject>>,
}

impl EnemySetup {
    pub fn new(name: impl Into<String>, spawn_objects: Vec<GameObject>) -> Self {
        Self {
            name: name.into(),
            spawn_objects: spawn_objects.into_iter().map(Some).collect(),
        }
    }

    /// True when there is nothing to spawn
    pub fn is_degenerate(&self) -> bool {
        self.spawn_objects.iter().all(Option::is_none)
    }

    /// Find the first spawn template that carries an [`EnemyParent`] marker
    pub fn find_parent(&self) -> Option<(&GameObject, &EnemyParent)> {
        self.spawn_objects
            .iter()
            .flatten()
            .find_map(|object| object.enemy_parent().map(|parent| (object, parent)))
    }

    /// Name used in log lines: the enemy's display name when known
    pub fn display_name(&self) -> &str {
        self.find_parent()
            .map(|(_, parent)| parent.enemy_name.as_str())
            .unwrap_or(&self.name)
    }
}

/// A valuable found in levels
#[derive(Debug, Clone, PartialEq)]
pub struct Valuable {
    pub prefab: GameObject,
}

/// Any piece of content, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum ContentObject {
    Item(Arc<Item>),
    Enemy(Arc<EnemySetup>),
    Valuable(Arc<Valuable>),
}

impl ContentObject {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Item(_) => ContentKind::Item,
            Self::Enemy(_) => ContentKind::Enemy,
            Self::Valuable(_) => ContentKind::Valuable,
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &str {
        match self {
            Self::Item(item) => &item.item_name,
            Self::Enemy(enemy) => enemy.display_name(),
            Self::Valuable(valuable) => valuable.prefab.name(),
        }
    }

    /// Registration key
    pub fn key(&self) -> &str {
        match self {
            Self::Item(item) => item.content_key(),
            Self::Enemy(enemy) => enemy.content_key(),
            Self::Valuable(valuable) => valuable.content_key(),
        }
    }

    /// True if both wrap the same allocation
    ///
    /// Two objects that merely share a registration key are distinct.
    pub fn is_same_instance(&self, other: &ContentObject) -> bool {
        match (self, other) {
            (Self::Item(a), Self::Item(b)) => Arc::ptr_eq(a, b),
            (Self::Enemy(a), Self::Enemy(b)) => Arc::ptr_eq(a, b),
            (Self::Valuable(a), Self::Valuable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for ContentObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.kind(), self.name())
    }
}

/// Typed view over [`ContentObject`] variants
pub trait ContentVariant: Sized {
    const KIND: ContentKind;

    /// Project a content object onto this kind
    fn project(object: &ContentObject) -> Option<&Arc<Self>>;

    /// Wrap into the tagged union
    fn into_object(this: Arc<Self>) -> ContentObject;

    /// Registration key of this content
    fn content_key(&self) -> &str;
}

impl ContentVariant for Item {
    const KIND: ContentKind = ContentKind::Item;

    fn project(object: &ContentObject) -> Option<&Arc<Self>> {
        match object {
            ContentObject::Item(item) => Some(item),
            _ => None,
        }
    }

    fn into_object(this: Arc<Self>) -> ContentObject {
        ContentObject::Item(this)
    }

    fn content_key(&self) -> &str {
        &self.asset_name
    }
}

impl ContentVariant for EnemySetup {
    const KIND: ContentKind = ContentKind::Enemy;

    fn project(object: &ContentObject) -> Option<&Arc<Self>> {
        match object {
            ContentObject::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    fn into_object(this: Arc<Self>) -> ContentObject {
        ContentObject::Enemy(this)
    }

    fn content_key(&self) -> &str {
        &self.name
    }
}

impl ContentVariant for Valuable {
    const KIND: ContentKind = ContentKind::Valuable;

    fn project(object: &ContentObject) -> Option<&Arc<Self>> {
        match object {
            ContentObject::Valuable(valuable) => Some(valuable),
            _ => None,
        }
    }

    fn into_object(this: Arc<Self>) -> ContentObject {
        ContentObject::Valuable(this)
    }

    fn content_key(&self) -> &str {
        self.prefab.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Component;
    use crate::types::Difficulty;

    fn enemy_root(name: &str) -> GameObject {
        GameObject::new(format!("Enemy - {}", name)).with_component(Component::EnemyParent(
            EnemyParent {
                enemy_name: name.to_string(),
                difficulty: Difficulty::Difficulty1,
            },
        ))
    }

    #[test]
    fn test_item_asset_name_follows_prefab() {
        let item = Item::new("Cart Medium", GameObject::new("Item Cart Medium"));
        assert_eq!(item.asset_name, "Item Cart Medium");
        assert_eq!(item.content_key(), "Item Cart Medium");
    }

    #[test]
    fn test_find_parent_skips_missing_entries() {
        let setup = EnemySetup {
            name: "Enemy - Gnome".to_string(),
            spawn_objects: vec![None, Some(GameObject::new("Director")), Some(enemy_root("Gnome"))],
        };

        let (object, parent) = setup.find_parent().unwrap();
        assert_eq!(object.name(), "Enemy - Gnome");
        assert_eq!(parent.enemy_name, "Gnome");
        assert_eq!(setup.display_name(), "Gnome");
    }

    #[test]
    fn test_degenerate_setup() {
        let empty = EnemySetup::new("Enemy - Nothing", vec![]);
        assert!(empty.is_degenerate());

        let holes = EnemySetup {
            name: "Enemy - Holes".to_string(),
            spawn_objects: vec![None, None],
        };
        assert!(holes.is_degenerate());
    }

    #[test]
    fn test_projection_filters_by_kind() {
        let item = ContentObject::Item(Arc::new(Item::new("Gun", GameObject::new("Item Gun"))));
        let enemy = ContentObject::Enemy(Arc::new(EnemySetup::new("Enemy - Duck", vec![enemy_root("Duck")])));

        assert!(Item::project(&item).is_some());
        assert!(Item::project(&enemy).is_none());
        assert!(EnemySetup::project(&enemy).is_some());
    }

    #[test]
    fn test_same_instance_ignores_matching_keys() {
        let gun = Arc::new(Item::new("Gun", GameObject::new("Item Gun")));
        let a = ContentObject::Item(gun.clone());
        let b = ContentObject::Item(Arc::new(Item::new("Other Gun", GameObject::new("ITEM GUN"))));

        assert!(a.is_same_instance(&ContentObject::Item(gun)));
        assert!(!a.is_same_instance(&b));
        assert_eq!(a.key().to_lowercase(), b.key().to_lowercase());
    }
}
