//! Game object templates
//!
//! A [`GameObject`] is a cheap handle onto a host object. Templates (prefabs)
//! and the copies stamped from them share this type; each live object has its
//! own [`InstanceId`], which is what equality compares.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::types::{Difficulty, InstanceId};

/// Marker carried by the root object of an enemy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyParent {
    /// Display name of the enemy
    pub enemy_name: String,

    /// Difficulty tier the enemy belongs to
    #[serde(default)]
    pub difficulty: Difficulty,
}

/// Components attached to a game object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    /// Enemy root marker
    EnemyParent(EnemyParent),
    /// Audio emitter routed through a mixer group
    AudioSource {
        #[serde(default)]
        mixer_group: Option<String>,
    },
    /// Any component the core does not inspect
    Other { name: String },
}

#[derive(Debug)]
struct GameObjectInner {
    id: InstanceId,
    name: String,
    active: AtomicBool,
    position: Vec3,
    rotation: Quat,
    components: Vec<Component>,
}

/// Handle onto a live game object
#[derive(Clone)]
pub struct GameObject {
    inner: Arc<GameObjectInner>,
}

impl GameObject {
    /// Create an active object with no components at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_parts(name.into(), true, Vec3::ZERO, Quat::IDENTITY, Vec::new())
    }

    fn from_parts(
        name: String,
        active: bool,
        position: Vec3,
        rotation: Quat,
        components: Vec<Component>,
    ) -> Self {
        Self {
            inner: Arc::new(GameObjectInner {
                id: InstanceId::new(),
                name,
                active: AtomicBool::new(active),
                position,
                rotation,
                components,
            }),
        }
    }

    /// Attach a component (builder style, only before the object is shared)
    pub fn with_component(self, component: Component) -> Self {
        let mut components = self.inner.components.clone();
        components.push(component);
        Self::from_parts(
            self.inner.name.clone(),
            self.is_active(),
            self.inner.position,
            self.inner.rotation,
            components,
        )
    }

    /// Set the initial active state (builder style)
    pub fn with_active(self, active: bool) -> Self {
        self.set_active(active);
        self
    }

    pub fn id(&self) -> InstanceId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Acquire)
    }

    pub fn set_active(&self, active: bool) {
        self.inner.active.store(active, Ordering::Release);
    }

    pub fn position(&self) -> Vec3 {
        self.inner.position
    }

    pub fn rotation(&self) -> Quat {
        self.inner.rotation
    }

    pub fn components(&self) -> &[Component] {
        &self.inner.components
    }

    /// Get the enemy root marker, if this object carries one
    pub fn enemy_parent(&self) -> Option<&EnemyParent> {
        self.inner.components.iter().find_map(|c| match c {
            Component::EnemyParent(parent) => Some(parent),
            _ => None,
        })
    }

    /// Stamp a fresh copy of this object
    ///
    /// The copy gets a new identity and a `(Clone)` suffix, inherits the
    /// current active state and components, and is placed at the given pose.
    pub fn instantiate_copy(&self, position: Vec3, rotation: Quat) -> GameObject {
        Self::from_parts(
            format!("{}(Clone)", self.inner.name),
            self.is_active(),
            position,
            rotation,
            self.inner.components.clone(),
        )
    }

    /// True if both handles point at the same live object
    pub fn same_instance(&self, other: &GameObject) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for GameObject {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for GameObject {}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("active", &self.is_active())
            .finish()
    }
}

impl fmt::Display for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}
