//! Custom prefab pool
//!
//! A spawn resolver keyed by case-insensitive identifier. Identifiers
//! registered here are stamped from their template; everything else passes
//! through to the wrapped default pool unchanged.

use contentlib_core::{ContentError, GameObject, Result, TemplateKey};
use glam::{Quat, Vec3};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::default_pool::{stamp, DefaultPool};
use crate::host::{ObjectFactory, PrefabPool, ResourceTemplates};

pub struct CustomPrefabPool {
    templates: Mutex<IndexMap<TemplateKey, GameObject>>,
    default_pool: Mutex<Option<Arc<dyn PrefabPool>>>,
    resources: Arc<dyn ResourceTemplates>,
    factory: Arc<dyn ObjectFactory>,
}

impl CustomPrefabPool {
    pub fn new(resources: Arc<dyn ResourceTemplates>, factory: Arc<dyn ObjectFactory>) -> Self {
        Self {
            templates: Mutex::new(IndexMap::new()),
            default_pool: Mutex::new(None),
            resources,
            factory,
        }
    }

    /// The wrapped pool, created over the built-in templates on first access
    pub fn default_pool(&self) -> Arc<dyn PrefabPool> {
        self.default_pool
            .lock()
            .get_or_insert_with(|| {
                Arc::new(DefaultPool::new(self.resources.clone(), self.factory.clone()))
            })
            .clone()
    }

    /// Replace the wrapped pool
    pub fn set_default_pool(&self, pool: Arc<dyn PrefabPool>) {
        *self.default_pool.lock() = Some(pool);
    }

    /// Register a template under a network identifier
    ///
    /// Returns `Ok(false)` when the identifier is already taken, either by a
    /// built-in template or by a template in this pool.
    pub fn register_template(&self, id: &str, template: &GameObject) -> Result<bool> {
        if id.trim().is_empty() {
            return Err(ContentError::InvalidArgument(
                "CustomPrefabPool: failed to register network prefab. PrefabId is invalid.".to_string(),
            ));
        }

        if self.resources.has_template(id) {
            error!(
                "CustomPrefabPool: failed to register network prefab \"{}\". Prefab already exists in Resources with the same prefab id.",
                id
            );
            return Ok(false);
        }

        let mut templates = self.templates.lock();
        let key = TemplateKey::new(id);

        if let Some(existing) = templates.get(&key) {
            if existing == template {
                warn!(
                    "CustomPrefabPool: failed to register network prefab \"{}\". There is already a prefab registered with the same prefab id.",
                    id
                );
            } else {
                error!(
                    "CustomPrefabPool: failed to register network prefab \"{}\". There is already a prefab registered with the same prefab id.",
                    id
                );
            }
            return Ok(false);
        }

        templates.insert(key, template.clone());
        debug!("CustomPrefabPool: registered network prefab \"{}\"", id);
        Ok(true)
    }

    /// True if the identifier resolves here or in the built-in templates
    pub fn has_template(&self, id: &str) -> bool {
        self.templates.lock().contains_key(&TemplateKey::new(id)) || self.resources.has_template(id)
    }

    /// True if the object is a template here or a built-in template
    pub fn has_template_object(&self, template: &GameObject) -> bool {
        self.templates.lock().values().any(|t| t == template)
            || self.resources.has_template_object(template)
    }

    /// Identifier a template was registered under in this pool
    pub fn get_template_id(&self, template: &GameObject) -> Option<String> {
        self.templates
            .lock()
            .iter()
            .find(|(_, t)| *t == template)
            .map(|(key, _)| key.as_str().to_string())
    }

    /// Template registered under an identifier in this pool
    pub fn get_template(&self, id: &str) -> Option<GameObject> {
        self.templates.lock().get(&TemplateKey::new(id)).cloned()
    }

    /// Identifiers registered in this pool, in registration order
    pub fn template_ids(&self) -> Vec<String> {
        self.templates
            .lock()
            .keys()
            .map(|key| key.as_str().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.templates.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spawn an object by identifier
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] for a blank identifier. A
    /// failed spawn is not an error: it is logged and `Ok(None)` returned.
    fn spawn(&self, id: &str, position: Option<Vec3>, rotation: Option<Quat>) -> Result<Option<GameObject>> {
        if id.trim().is_empty() {
            return Err(ContentError::InvalidArgument(
                "CustomPrefabPool: failed to spawn network prefab. PrefabId is null.".to_string(),
            ));
        }

        let position = match position.filter(|p| p.is_finite()) {
            Some(position) => position,
            None => {
                error!(
                    "CustomPrefabPool: tried to spawn network prefab \"{}\" with an invalid position. Using default position.",
                    id
                );
                Vec3::ZERO
            }
        };

        let rotation = match rotation.filter(|r| r.is_finite()) {
            Some(rotation) => rotation,
            None => {
                error!(
                    "CustomPrefabPool: tried to spawn network prefab \"{}\" with an invalid rotation. Using default rotation.",
                    id
                );
                Quat::IDENTITY
            }
        };

        let template = self.get_template(id);

        let Some(template) = template else {
            let result = self
                .default_pool()
                .instantiate(id, Some(position), Some(rotation))?;

            if result.is_none() {
                error!("CustomPrefabPool: failed to spawn network prefab \"{}\". GameObject is null.", id);
            }

            return Ok(result);
        };

        let result = stamp(self.factory.as_ref(), &template, position, rotation);

        match &result {
            Some(_) => debug!(
                "CustomPrefabPool: spawned network prefab \"{}\" at position {}, rotation {:?}",
                id,
                position,
                rotation.to_euler(glam::EulerRot::YXZ)
            ),
            None => error!("CustomPrefabPool: failed to spawn network prefab \"{}\". GameObject is null.", id),
        }

        Ok(result)
    }
}

impl PrefabPool for CustomPrefabPool {
    fn instantiate(&self, id: &str, position: Option<Vec3>, rotation: Option<Quat>) -> Result<Option<GameObject>> {
        self.spawn(id, position, rotation)
    }

    fn destroy(&self, object: GameObject) {
        self.factory.destroy(object);
    }
}
