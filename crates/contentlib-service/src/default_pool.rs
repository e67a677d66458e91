//! Default spawn resolver
//!
//! Resolves identifiers against the host's built-in template set, caching
//! each template after its first load.

use contentlib_core::{GameObject, Result};
use glam::{Quat, Vec3};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;

use crate::host::{ObjectFactory, PrefabPool, ResourceTemplates};

/// Copy `template` with first-activation suppressed
///
/// The template is deactivated for the duration of the copy so the new
/// object starts inactive, then the template's own state is restored.
pub(crate) fn stamp(
    factory: &dyn ObjectFactory,
    template: &GameObject,
    position: Vec3,
    rotation: Quat,
) -> Option<GameObject> {
    let was_active = template.is_active();

    if was_active {
        template.set_active(false);
    }

    let result = factory.instantiate(template, position, rotation);

    if was_active {
        template.set_active(true);
    }

    result
}

pub struct DefaultPool {
    resources: Arc<dyn ResourceTemplates>,
    factory: Arc<dyn ObjectFactory>,
    cache: Mutex<HashMap<String, GameObject>>,
}

impl DefaultPool {
    pub fn new(resources: Arc<dyn ResourceTemplates>, factory: Arc<dyn ObjectFactory>) -> Self {
        Self {
            resources,
            factory,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn resolve(&self, id: &str) -> Option<GameObject> {
        let mut cache = self.cache.lock();

        if let Some(template) = cache.get(id) {
            return Some(template.clone());
        }

        match self.resources.load(id) {
            Some(template) => {
                cache.insert(id.to_string(), template.clone());
                Some(template)
            }
            None => {
                error!("DefaultPool failed to load \"{}\". Make sure it's in a \"Resources\" folder.", id);
                None
            }
        }
    }
}

impl PrefabPool for DefaultPool {
    fn instantiate(&self, id: &str, position: Option<Vec3>, rotation: Option<Quat>) -> Result<Option<GameObject>> {
        let Some(template) = self.resolve(id) else {
            return Ok(None);
        };

        Ok(stamp(
            self.factory.as_ref(),
            &template,
            position.unwrap_or(Vec3::ZERO),
            rotation.unwrap_or(Quat::IDENTITY),
        ))
    }

    fn destroy(&self, object: GameObject) {
        self.factory.destroy(object);
    }
}
