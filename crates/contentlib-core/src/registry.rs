//! Source-attributed content registry
//!
//! Maps each [`ContentSource`] to the content it supplied, in insertion
//! order. The registry performs no deduplication of its own; the
//! registration modules decide what is allowed in.

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::content::{ContentObject, ContentVariant, EnemySetup, Item, Valuable};
use crate::source::{ContentSource, SourceMetadata};

#[derive(Default)]
struct RegistryState {
    /// Sources created per origin key, whether or not they own content yet
    origins: HashMap<String, Arc<ContentSource>>,

    /// Source guid -> (source, content) in first-registration order
    entries: IndexMap<String, (Arc<ContentSource>, Vec<ContentObject>)>,
}

/// Process-wide index from content source to supplied content
#[derive(Default)]
pub struct ContentRegistry {
    state: Mutex<RegistryState>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached source for an origin key, creating it on first use
    ///
    /// When no metadata is known for the origin the key itself is used as
    /// the source's name and identifier.
    pub fn get_or_create_source(
        &self,
        origin_key: &str,
        metadata: Option<SourceMetadata>,
    ) -> Arc<ContentSource> {
        let mut state = self.state.lock();

        if let Some(source) = state.origins.get(origin_key) {
            return source.clone();
        }

        let metadata = metadata.unwrap_or_else(|| {
            warn!("Failed to get plugin info from {}", origin_key);
            SourceMetadata::plugin(origin_key, "0.0.0", origin_key)
        });

        let source = Arc::new(ContentSource::new(metadata));
        debug!("Created content source {} for origin {}", source, origin_key);
        state.origins.insert(origin_key.to_string(), source.clone());
        source
    }

    /// Append content under a source
    pub fn add(&self, object: ContentObject, source: &Arc<ContentSource>) {
        let mut state = self.state.lock();
        state
            .entries
            .entry(source.guid().to_string())
            .or_insert_with(|| (source.clone(), Vec::new()))
            .1
            .push(object);
    }

    /// Find a source that owns content by its identifier
    pub fn find_source_by_guid(&self, guid: &str) -> Option<Arc<ContentSource>> {
        self.state
            .lock()
            .entries
            .get(guid)
            .map(|(source, _)| source.clone())
    }

    /// Find the source that owns a piece of content
    ///
    /// Ownership is by identity: content that only shares a registration key
    /// with registered content (a rejected duplicate, say) has no owner.
    pub fn find_source(&self, object: &ContentObject) -> Option<Arc<ContentSource>> {
        self.state
            .lock()
            .entries
            .values()
            .find(|(_, objects)| objects.iter().any(|o| o.is_same_instance(object)))
            .map(|(source, _)| source.clone())
    }

    /// Typed variant of [`find_source`](Self::find_source)
    pub fn source_of<T: ContentVariant>(&self, content: &T) -> Option<Arc<ContentSource>> {
        self.state
            .lock()
            .entries
            .values()
            .find(|(_, objects)| {
                objects
                    .iter()
                    .any(|o| T::project(o).is_some_and(|c| std::ptr::eq(Arc::as_ptr(c), content)))
            })
            .map(|(source, _)| source.clone())
    }

    /// Every source with all of its content
    pub fn all(&self) -> Vec<(Arc<ContentSource>, Vec<ContentObject>)> {
        self.state.lock().entries.values().cloned().collect()
    }

    /// Every source with its content of one kind, recomputed per call
    pub fn all_by_kind<T: ContentVariant>(&self) -> Vec<(Arc<ContentSource>, Vec<Arc<T>>)> {
        self.state
            .lock()
            .entries
            .values()
            .map(|(source, objects)| {
                let typed = objects.iter().filter_map(T::project).cloned().collect();
                (source.clone(), typed)
            })
            .collect()
    }

    /// All content supplied by one source; empty if it supplied none
    pub fn all_from(&self, source: &ContentSource) -> Vec<ContentObject> {
        self.state
            .lock()
            .entries
            .get(source.guid())
            .map(|(_, objects)| objects.clone())
            .unwrap_or_default()
    }

    pub fn all_from_by_kind<T: ContentVariant>(&self, source: &ContentSource) -> Vec<Arc<T>> {
        self.state
            .lock()
            .entries
            .get(source.guid())
            .map(|(_, objects)| objects.iter().filter_map(T::project).cloned().collect())
            .unwrap_or_default()
    }

    pub fn all_items(&self) -> Vec<(Arc<ContentSource>, Vec<Arc<Item>>)> {
        self.all_by_kind::<Item>()
    }

    pub fn all_enemies(&self) -> Vec<(Arc<ContentSource>, Vec<Arc<EnemySetup>>)> {
        self.all_by_kind::<EnemySetup>()
    }

    pub fn all_valuables(&self) -> Vec<(Arc<ContentSource>, Vec<Arc<Valuable>>)> {
        self.all_by_kind::<Valuable>()
    }

    pub fn source_of_item(&self, item: &Item) -> Option<Arc<ContentSource>> {
        self.source_of(item)
    }

    pub fn source_of_enemy(&self, enemy: &EnemySetup) -> Option<Arc<ContentSource>> {
        self.source_of(enemy)
    }

    pub fn source_of_valuable(&self, valuable: &Valuable) -> Option<Arc<ContentSource>> {
        self.source_of(valuable)
    }

    /// Total number of content entries across all sources
    pub fn len(&self) -> usize {
        self.state.lock().entries.values().map(|(_, objects)| objects.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Component, EnemyParent, GameObject};
    use crate::types::Difficulty;

    fn item(name: &str) -> Arc<Item> {
        Arc::new(Item::new(name, GameObject::new(format!("Item {}", name))))
    }

    fn enemy(name: &str) -> Arc<EnemySetup> {
        let root = GameObject::new(format!("Enemy - {}", name)).with_component(
            Component::EnemyParent(EnemyParent {
                enemy_name: name.to_string(),
                difficulty: Difficulty::Difficulty1,
            }),
        );
        Arc::new(EnemySetup::new(format!("Enemy - {}", name), vec![root]))
    }

    fn package(registry: &ContentRegistry, guid: &str) -> Arc<ContentSource> {
        registry.get_or_create_source(guid, Some(SourceMetadata::package(guid, "1.0.0", guid)))
    }

    #[test]
    fn test_get_or_create_source_is_cached() {
        let registry = ContentRegistry::new();
        let first = package(&registry, "author-pack");
        let second = registry.get_or_create_source("author-pack", None);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.name(), "author-pack");
    }

    #[test]
    fn test_unknown_origin_falls_back_to_key() {
        let registry = ContentRegistry::new();
        let source = registry.get_or_create_source("MyPlugin, Version=1.0.0.0", None);

        assert_eq!(source.name(), "MyPlugin, Version=1.0.0.0");
        assert_eq!(source.guid(), "MyPlugin, Version=1.0.0.0");
        assert_eq!(source.version(), "0.0.0");
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let registry = ContentRegistry::new();
        let source = package(&registry, "author-pack");

        registry.add(ContentObject::Item(item("B")), &source);
        registry.add(ContentObject::Enemy(enemy("Duck")), &source);
        registry.add(ContentObject::Item(item("A")), &source);

        let names: Vec<String> = registry
            .all_from(&source)
            .iter()
            .map(|o| o.key().to_string())
            .collect();
        assert_eq!(names, vec!["Item B", "Enemy - Duck", "Item A"]);
    }

    #[test]
    fn test_registry_does_not_deduplicate() {
        let registry = ContentRegistry::new();
        let source = package(&registry, "author-pack");
        let cart = item("Cart");

        registry.add(ContentObject::Item(cart.clone()), &source);
        registry.add(ContentObject::Item(cart), &source);

        assert_eq!(registry.all_from(&source).len(), 2);
    }

    #[test]
    fn test_find_source_by_guid_and_object() {
        let registry = ContentRegistry::new();
        let a = package(&registry, "author-a");
        let b = package(&registry, "author-b");
        let gun = item("Gun");

        registry.add(ContentObject::Item(item("Cart")), &a);
        registry.add(ContentObject::Item(gun.clone()), &b);

        assert_eq!(registry.find_source_by_guid("author-b").as_deref(), Some(&*b));
        assert!(registry.find_source_by_guid("author-c").is_none());
        assert_eq!(registry.source_of_item(&gun).as_deref(), Some(&*b));
        assert_eq!(
            registry.find_source(&ContentObject::Item(gun)).as_deref(),
            Some(&*b)
        );
        assert!(registry.source_of_item(&item("Missing")).is_none());
    }

    #[test]
    fn test_ownership_is_by_identity() {
        let registry = ContentRegistry::new();
        let a = package(&registry, "author-a");
        let cart = item("Cart");
        registry.add(ContentObject::Item(cart.clone()), &a);

        // Same registration key, different object
        let lookalike = Arc::new(Item::new("Other Cart", GameObject::new("ITEM CART")));

        assert_eq!(registry.source_of_item(&cart).as_deref(), Some(&*a));
        assert!(registry.source_of_item(&lookalike).is_none());
        assert!(registry.find_source(&ContentObject::Item(lookalike)).is_none());
    }

    #[test]
    fn test_source_without_content_is_not_found_by_guid() {
        let registry = ContentRegistry::new();
        package(&registry, "author-empty");
        assert!(registry.find_source_by_guid("author-empty").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_typed_projection() {
        let registry = ContentRegistry::new();
        let source = package(&registry, "author-pack");

        registry.add(ContentObject::Item(item("Cart")), &source);
        registry.add(ContentObject::Enemy(enemy("Duck")), &source);

        let items = registry.all_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].1.len(), 1);
        assert_eq!(items[0].1[0].item_name, "Cart");

        let enemies = registry.all_from_by_kind::<EnemySetup>(&source);
        assert_eq!(enemies.len(), 1);
        assert!(registry.all_valuables()[0].1.is_empty());
    }

    #[test]
    fn test_projection_sees_later_additions() {
        let registry = ContentRegistry::new();
        let source = package(&registry, "author-pack");

        registry.add(ContentObject::Item(item("Cart")), &source);
        assert_eq!(registry.all_items()[0].1.len(), 1);

        registry.add(ContentObject::Item(item("Gun")), &source);
        assert_eq!(registry.all_items()[0].1.len(), 2);
        assert_eq!(registry.len(), 2);
    }
}
