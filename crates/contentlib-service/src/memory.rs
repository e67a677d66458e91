//! In-memory host implementations
//!
//! Stand-ins for the game's own systems, used by the host binary's dry runs
//! and by tests.

use contentlib_core::{Difficulty, EnemySetup, GameObject, Item, Result, TemplateKey};
use glam::{Quat, Vec3};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::host::{
    EnemyDirector, ItemCatalog, ObjectFactory, PoolHost, PrefabPool, ResourceTemplates, TemplateFixup,
};

/// Built-in template set keyed by case-insensitive identifier
#[derive(Default)]
pub struct MemoryResources {
    templates: Mutex<IndexMap<TemplateKey, GameObject>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from identifiers; each gets a template named after its last path segment
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resources = Self::new();
        for id in ids {
            let id = id.as_ref();
            let name = id.rsplit('/').next().unwrap_or(id);
            resources.insert(id, GameObject::new(name));
        }
        resources
    }

    pub fn insert(&self, id: &str, template: GameObject) {
        self.templates.lock().insert(TemplateKey::new(id), template);
    }

    pub fn len(&self) -> usize {
        self.templates.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceTemplates for MemoryResources {
    fn has_template(&self, id: &str) -> bool {
        self.templates.lock().contains_key(&TemplateKey::new(id))
    }

    fn has_template_object(&self, template: &GameObject) -> bool {
        self.templates.lock().values().any(|t| t == template)
    }

    fn load(&self, id: &str) -> Option<GameObject> {
        self.templates.lock().get(&TemplateKey::new(id)).cloned()
    }
}

/// Item catalog keyed by asset name
///
/// Refuses an asset name it already holds; [`rebuild`](Self::rebuild)
/// empties it the way the game does before re-adding items.
pub struct MemoryCatalog {
    items: Mutex<IndexMap<String, Item>>,
    ready: Mutex<bool>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(IndexMap::new()),
            ready: Mutex::new(true),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        *self.ready.lock() = ready;
    }

    /// Clear the catalog ahead of a rebuild
    pub fn rebuild(&self) {
        self.items.lock().clear();
    }

    pub fn contains(&self, asset_name: &str) -> bool {
        self.items.lock().contains_key(asset_name)
    }

    pub fn item_names(&self) -> Vec<String> {
        self.items.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemCatalog for MemoryCatalog {
    fn is_ready(&self) -> bool {
        *self.ready.lock()
    }

    fn add_item(&self, item: &Item) -> bool {
        let mut items = self.items.lock();
        if items.contains_key(&item.asset_name) {
            return false;
        }
        items.insert(item.asset_name.clone(), item.clone());
        true
    }
}

/// Difficulty tables
#[derive(Default)]
pub struct MemoryDirector {
    tables: Mutex<HashMap<Difficulty, Vec<String>>>,
}

impl MemoryDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setup names in one difficulty table
    pub fn enemies_in(&self, difficulty: Difficulty) -> Vec<String> {
        self.tables.lock().get(&difficulty).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.tables.lock().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EnemyDirector for MemoryDirector {
    fn add_enemy(&self, enemy: &EnemySetup) -> bool {
        let Some((_, parent)) = enemy.find_parent() else {
            return false;
        };

        let mut tables = self.tables.lock();
        let table = tables.entry(parent.difficulty).or_default();
        if table.iter().any(|name| name == &enemy.name) {
            return false;
        }
        table.push(enemy.name.clone());
        true
    }
}

/// Factory that copies templates and counts destroyed objects
#[derive(Default)]
pub struct CloneFactory {
    spawned: AtomicUsize,
    destroyed: AtomicUsize,
}

impl CloneFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawned(&self) -> usize {
        self.spawned.load(Ordering::Relaxed)
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::Relaxed)
    }
}

impl ObjectFactory for CloneFactory {
    fn instantiate(&self, template: &GameObject, position: Vec3, rotation: Quat) -> Option<GameObject> {
        self.spawned.fetch_add(1, Ordering::Relaxed);
        Some(template.instantiate_copy(position, rotation))
    }

    fn destroy(&self, object: GameObject) {
        object.set_active(false);
        self.destroyed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Fix-up that records template names once marked ready
pub struct MemoryFixup {
    ready: AtomicBool,
    fixed: Mutex<Vec<String>>,
}

impl MemoryFixup {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: AtomicBool::new(ready),
            fixed: Mutex::new(Vec::new()),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Template names in the order they were fixed
    pub fn fixed(&self) -> Vec<String> {
        self.fixed.lock().clone()
    }
}

impl TemplateFixup for MemoryFixup {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn fix(&self, template: &GameObject) {
        self.fixed.lock().push(template.name().to_string());
    }
}

/// Slot holding the networking layer's active pool
#[derive(Default)]
pub struct MemoryPoolHost {
    pool: Mutex<Option<Arc<dyn PrefabPool>>>,
}

impl MemoryPoolHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn through whichever pool is installed
    pub fn instantiate(&self, id: &str, position: Vec3, rotation: Quat) -> Result<Option<GameObject>> {
        match self.current_pool() {
            Some(pool) => pool.instantiate(id, Some(position), Some(rotation)),
            None => Ok(None),
        }
    }
}

impl PoolHost for MemoryPoolHost {
    fn current_pool(&self) -> Option<Arc<dyn PrefabPool>> {
        self.pool.lock().clone()
    }

    fn set_pool(&self, pool: Arc<dyn PrefabPool>) {
        *self.pool.lock() = Some(pool);
    }
}
