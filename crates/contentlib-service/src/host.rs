//! Host collaborator interfaces
//!
//! The game owns its item catalog, enemy difficulty tables, template store,
//! object instantiation and the networking layer's active spawn pool. The
//! registration pipeline only calls into these through the traits below.

use contentlib_core::{EnemySetup, GameObject, Item, Result};
use glam::{Quat, Vec3};
use std::sync::Arc;

/// The host's built-in template set
#[cfg_attr(test, mockall::automock)]
pub trait ResourceTemplates: Send + Sync {
    /// True if a built-in template exists under this identifier (case-insensitive)
    fn has_template(&self, id: &str) -> bool;

    /// True if this exact object is one of the built-in templates
    fn has_template_object(&self, template: &GameObject) -> bool;

    /// Load a built-in template by identifier
    fn load(&self, id: &str) -> Option<GameObject>;
}

/// The host's item catalog
#[cfg_attr(test, mockall::automock)]
pub trait ItemCatalog: Send + Sync {
    /// False while the catalog singleton does not exist yet
    fn is_ready(&self) -> bool {
        true
    }

    /// Add an item to the catalog; false if the catalog refused it
    fn add_item(&self, item: &Item) -> bool;
}

/// The host's enemy difficulty tables
#[cfg_attr(test, mockall::automock)]
pub trait EnemyDirector: Send + Sync {
    /// Add an enemy setup to its difficulty table; false if refused
    fn add_enemy(&self, enemy: &EnemySetup) -> bool;
}

/// The platform's instantiate/destroy primitives
#[cfg_attr(test, mockall::automock)]
pub trait ObjectFactory: Send + Sync {
    /// Copy a template into a new live object
    fn instantiate(&self, template: &GameObject, position: Vec3, rotation: Quat) -> Option<GameObject>;

    fn destroy(&self, object: GameObject);
}

/// A spawn resolver the networking layer instantiates through
pub trait PrefabPool: Send + Sync {
    /// Instantiate the template registered under `id`
    ///
    /// A missing pose is a data error and is replaced with the identity pose.
    /// `Ok(None)` means the spawn failed; the caller must cope with the
    /// absence. Errors are reserved for caller bugs such as a blank id.
    fn instantiate(&self, id: &str, position: Option<Vec3>, rotation: Option<Quat>) -> Result<Option<GameObject>>;

    fn destroy(&self, object: GameObject);
}

/// The networking layer's "instantiate by identifier" hook
pub trait PoolHost: Send + Sync {
    /// Pool currently installed, if any
    fn current_pool(&self) -> Option<Arc<dyn PrefabPool>>;

    fn set_pool(&self, pool: Arc<dyn PrefabPool>);
}

/// Post-processing applied to item templates before they reach the catalog
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFixup: Send + Sync {
    /// False until the host system the fix-up depends on exists
    fn is_ready(&self) -> bool;

    fn fix(&self, template: &GameObject);
}

/// Fix-up that leaves templates untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFixup;

impl TemplateFixup for NoopFixup {
    fn is_ready(&self) -> bool {
        true
    }

    fn fix(&self, _template: &GameObject) {}
}
