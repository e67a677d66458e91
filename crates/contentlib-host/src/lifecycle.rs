//! Simulated game startup
//!
//! Drives the registration services through the same events the game fires:
//! run manager awake (pool installation and package loading), the one-shot
//! enemy director start, and repeated item catalog rebuilds. The template
//! fix-up collaborator only turns ready after the first rebuild, so item
//! templates announced before then are queued and fixed late.

use contentlib_core::Difficulty;
use contentlib_loader::PackageLoader;
use contentlib_service::memory::{
    CloneFactory, MemoryCatalog, MemoryDirector, MemoryFixup, MemoryPoolHost, MemoryResources,
};
use contentlib_service::{DefaultPool, HostServices, PoolHost, ServiceRegistry, ServiceRegistryBuilder};
use glam::{Quat, Vec3};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{HostConfig, NativeContentConfig};
use crate::report::{HostReport, SourceSummary};

/// In-memory game systems
#[derive(Clone)]
pub struct MemoryHost {
    pub resources: Arc<MemoryResources>,
    pub catalog: Arc<MemoryCatalog>,
    pub director: Arc<MemoryDirector>,
    pub factory: Arc<CloneFactory>,
    pub pool_host: Arc<MemoryPoolHost>,
    pub fixup: Arc<MemoryFixup>,
}

impl MemoryHost {
    /// Build the game systems with their built-in content
    ///
    /// The pool host starts out with the game's own resource pool installed.
    pub fn new(native: &NativeContentConfig) -> Self {
        let resources = Arc::new(MemoryResources::with_ids(native.template_ids()));
        let factory = Arc::new(CloneFactory::new());
        let pool_host = Arc::new(MemoryPoolHost::new());

        pool_host.set_pool(Arc::new(DefaultPool::new(resources.clone(), factory.clone())));

        Self {
            resources,
            catalog: Arc::new(MemoryCatalog::new()),
            director: Arc::new(MemoryDirector::new()),
            factory,
            pool_host,
            fixup: Arc::new(MemoryFixup::new(false)),
        }
    }

    pub fn services(&self) -> HostServices {
        HostServices {
            resources: self.resources.clone(),
            catalog: self.catalog.clone(),
            director: self.director.clone(),
            factory: self.factory.clone(),
        }
    }
}

/// Fires lifecycle events in order, at most once
pub struct LifecycleDriver {
    config: HostConfig,
    host: MemoryHost,
    loader: PackageLoader,
    awake: bool,
}

impl LifecycleDriver {
    pub fn new(config: HostConfig) -> Self {
        let host = MemoryHost::new(&config.host);
        let services = ServiceRegistryBuilder::new(host.services())
            .fixup(host.fixup.clone())
            .build();
        let loader = PackageLoader::new(services);

        Self {
            config,
            host,
            loader,
            awake: false,
        }
    }

    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    pub fn services(&self) -> &ServiceRegistry {
        self.loader.services()
    }

    /// Run the startup sequence
    ///
    /// Returns `None` when the sequence already ran.
    pub fn awake(&mut self) -> Option<HostReport> {
        if self.awake {
            debug!("Ignoring repeated awake");
            return None;
        }
        self.awake = true;

        let services = self.loader.services().clone();
        let mut report = HostReport::default();

        services.network.install(self.host.pool_host.as_ref());

        let packages = &self.config.packages;
        if packages.root.is_dir() {
            let load = self.loader.load_all(&packages.root, &packages.extension);
            report.record_load(&load);
        } else {
            warn!("Package directory {} does not exist", packages.root.display());
        }

        report.enemy_flush = services.enemies.register_enemies().into();

        for rebuild in 0..self.config.lifecycle.catalog_rebuilds {
            self.host.catalog.rebuild();
            report.rebuilds.push(services.items.register_items().into());

            if rebuild == 0 {
                self.fixup_ready(&services);
            }
        }
        report.templates_fixed = services.fixups.fixed_len();

        if self.config.host.developer_mode {
            report.spawned = self.spawn_all(&services);
        }

        report.catalog_items = self.host.catalog.item_names();
        report.difficulty_tables = [Difficulty::Difficulty1, Difficulty::Difficulty2, Difficulty::Difficulty3]
            .into_iter()
            .map(|d| (d, self.host.director.enemies_in(d)))
            .filter(|(_, names)| !names.is_empty())
            .collect();
        report.sources = SourceSummary::collect(&services.registry);

        info!(
            sources = report.sources.len(),
            catalog = report.catalog_items.len(),
            "Startup sequence complete"
        );

        Some(report)
    }

    /// The fix-up collaborator came up; fix whatever queued before it did
    fn fixup_ready(&self, services: &ServiceRegistry) {
        self.host.fixup.set_ready(true);
        let fixed = services.fixups.flush_pending();
        debug!("Template fix-up ready, fixed {} queued templates", fixed);
    }

    fn spawn_all(&self, services: &ServiceRegistry) -> usize {
        let mut spawned = 0;

        for id in services.network.pool().template_ids() {
            match self.host.pool_host.instantiate(&id, Vec3::ZERO, Quat::IDENTITY) {
                Ok(Some(object)) => {
                    debug!("Spawned {} as {}", id, object);
                    spawned += 1;
                }
                Ok(None) => warn!("Spawning {} produced nothing", id),
                Err(e) => warn!("Spawning {} failed: {}", id, e),
            }
        }

        spawned
    }
}
