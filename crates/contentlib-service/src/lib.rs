//! Registration services for contentlib
//!
//! This crate sits between package loading and the host game. It validates
//! content, registers spawn identifiers with the networking layer, records
//! attribution in the [`ContentRegistry`], and announces content to the
//! host's item catalog and enemy difficulty tables.
//!
//! # Architecture
//!
//! - **Items**: deduplicating item registration, announced on every catalog rebuild
//! - **Enemies**: phase-gated enemy registration, announced exactly once
//! - **NetworkPrefabs**: spawn identifier registration and pool installation
//! - **CustomPrefabPool**: case-insensitive spawn resolver wrapping the default pool
//!
//! # Example
//!
//! ```rust,no_run
//! use contentlib_service::memory::{CloneFactory, MemoryCatalog, MemoryDirector, MemoryResources};
//! use contentlib_service::{HostServices, ServiceRegistry};
//! use std::sync::Arc;
//!
//! let services = ServiceRegistry::new(HostServices {
//!     resources: Arc::new(MemoryResources::new()),
//!     catalog: Arc::new(MemoryCatalog::new()),
//!     director: Arc::new(MemoryDirector::new()),
//!     factory: Arc::new(CloneFactory::new()),
//! });
//!
//! // Fired once by the host early in startup
//! services.enemies.register_enemies();
//! // Fired by the host on every catalog rebuild
//! services.items.register_items();
//! ```

pub mod default_pool;
pub mod enemies;
pub mod fixup;
pub mod host;
pub mod items;
pub mod memory;
pub mod network;
pub mod outcome;
pub mod pool;

// Re-export main types for convenience
pub use default_pool::DefaultPool;
pub use enemies::{Enemies, EnemyPhase};
pub use fixup::TemplateFixups;
pub use host::{
    EnemyDirector, ItemCatalog, NoopFixup, ObjectFactory, PoolHost, PrefabPool, ResourceTemplates,
    TemplateFixup,
};
pub use items::{CatalogPhase, Items};
pub use network::{NetworkPrefabs, NetworkTemplates};
pub use outcome::{FlushSummary, Registration, RejectReason};
pub use pool::CustomPrefabPool;

use contentlib_core::ContentRegistry;
use std::sync::Arc;

/// Host systems the services call into
#[derive(Clone)]
pub struct HostServices {
    pub resources: Arc<dyn ResourceTemplates>,
    pub catalog: Arc<dyn ItemCatalog>,
    pub director: Arc<dyn EnemyDirector>,
    pub factory: Arc<dyn ObjectFactory>,
}

/// Service registry that holds all service instances
///
/// Constructed once at startup and passed to whatever needs it; tests build
/// a fresh one per test.
#[derive(Clone)]
pub struct ServiceRegistry {
    /// Source-attributed content index
    pub registry: Arc<ContentRegistry>,
    /// Spawn identifier registration
    pub network: Arc<NetworkPrefabs>,
    /// Item registration
    pub items: Arc<Items>,
    /// Enemy registration
    pub enemies: Arc<Enemies>,
    /// Item template fix-ups
    pub fixups: Arc<TemplateFixups>,
}

impl ServiceRegistry {
    /// Create a service registry with default implementations
    pub fn new(host: HostServices) -> Self {
        ServiceRegistryBuilder::new(host).build()
    }

    pub fn registry(&self) -> &Arc<ContentRegistry> {
        &self.registry
    }

    pub fn network(&self) -> &Arc<NetworkPrefabs> {
        &self.network
    }

    pub fn items(&self) -> &Arc<Items> {
        &self.items
    }

    pub fn enemies(&self) -> &Arc<Enemies> {
        &self.enemies
    }
}

/// Builder for ServiceRegistry with custom collaborators
pub struct ServiceRegistryBuilder {
    host: HostServices,
    registry: Option<Arc<ContentRegistry>>,
    fixup: Option<Arc<dyn TemplateFixup>>,
}

impl ServiceRegistryBuilder {
    pub fn new(host: HostServices) -> Self {
        Self {
            host,
            registry: None,
            fixup: None,
        }
    }

    /// Share an existing content registry
    pub fn registry(mut self, registry: Arc<ContentRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the item template fix-up collaborator
    pub fn fixup(mut self, fixup: Arc<dyn TemplateFixup>) -> Self {
        self.fixup = Some(fixup);
        self
    }

    pub fn build(self) -> ServiceRegistry {
        let host = self.host;
        let registry = self.registry.unwrap_or_default();

        let pool = Arc::new(CustomPrefabPool::new(host.resources.clone(), host.factory.clone()));
        let network = Arc::new(NetworkPrefabs::new(pool));
        let templates: Arc<dyn NetworkTemplates> = network.clone();

        let fixups = Arc::new(TemplateFixups::new(
            self.fixup.unwrap_or_else(|| Arc::new(NoopFixup) as Arc<dyn TemplateFixup>),
        ));

        let items = Arc::new(Items::new(
            registry.clone(),
            host.resources.clone(),
            templates.clone(),
            host.catalog.clone(),
            fixups.clone(),
        ));

        let enemies = Arc::new(Enemies::new(
            registry.clone(),
            host.resources.clone(),
            templates,
            host.director.clone(),
        ));

        ServiceRegistry {
            registry,
            network,
            items,
            enemies,
            fixups,
        }
    }
}
