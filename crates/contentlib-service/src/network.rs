//! Network prefab registration
//!
//! Front door used by the registration modules to make spawn identifiers
//! known to the networking layer, and the installation point of the
//! [`CustomPrefabPool`] as the networking layer's active pool.

use contentlib_core::{ContentError, GameObject, Result};
use glam::{Quat, Vec3};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::host::{PoolHost, PrefabPool};
use crate::pool::CustomPrefabPool;

/// Records identifiers the networking layer should recognize
#[cfg_attr(test, mockall::automock)]
pub trait NetworkTemplates: Send + Sync {
    /// Register a template under a network identifier
    ///
    /// `Ok(false)` means the identifier was already taken.
    fn register_network_template(&self, id: &str, template: &GameObject) -> Result<bool>;
}

pub struct NetworkPrefabs {
    pool: Arc<CustomPrefabPool>,
    installed: Mutex<bool>,
}

impl NetworkPrefabs {
    pub fn new(pool: Arc<CustomPrefabPool>) -> Self {
        Self {
            pool,
            installed: Mutex::new(false),
        }
    }

    pub fn pool(&self) -> &Arc<CustomPrefabPool> {
        &self.pool
    }

    /// Install the custom pool as the host's active pool
    ///
    /// The pool the host had before becomes the wrapped default pool. Later
    /// calls do nothing; returns whether this call installed the pool.
    #[instrument(skip(self, host))]
    pub fn install(&self, host: &dyn PoolHost) -> bool {
        let mut installed = self.installed.lock();

        if *installed {
            return false;
        }

        if let Some(previous) = host.current_pool() {
            self.pool.set_default_pool(previous);
        }

        host.set_pool(self.pool.clone());
        *installed = true;
        info!("Initialized network prefab pool");
        true
    }

    pub fn is_installed(&self) -> bool {
        *self.installed.lock()
    }

    pub fn has_network_prefab(&self, id: &str) -> bool {
        self.pool.has_template(id)
    }

    pub fn get_network_prefab(&self, id: &str) -> Option<GameObject> {
        self.pool.get_template(id)
    }

    /// Spawn a known network prefab
    ///
    /// Unknown identifiers are refused with an error log rather than handed
    /// to the default pool.
    pub fn spawn(&self, id: &str, position: Option<Vec3>, rotation: Option<Quat>) -> Result<Option<GameObject>> {
        if id.trim().is_empty() {
            return Err(ContentError::InvalidArgument(
                "Failed to spawn network prefab. PrefabId is null.".to_string(),
            ));
        }

        if !self.has_network_prefab(id) {
            error!("Failed to spawn network prefab \"{}\". PrefabId is not registered as a network prefab.", id);
            return Ok(None);
        }

        self.pool.instantiate(id, position, rotation)
    }
}

impl NetworkTemplates for NetworkPrefabs {
    fn register_network_template(&self, id: &str, template: &GameObject) -> Result<bool> {
        self.pool.register_template(id, template)
    }
}
