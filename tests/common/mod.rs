//! Common test utilities and helpers
//!
//! Shared setup for integration tests: an in-memory game host wired to a
//! fresh service registry, plus helpers for writing packages to disk.

#![allow(dead_code)]

use contentlib_core::{ContentSource, SourceMetadata};
use contentlib_loader::PackageLoader;
use contentlib_service::memory::{
    CloneFactory, MemoryCatalog, MemoryDirector, MemoryFixup, MemoryPoolHost, MemoryResources,
};
use contentlib_service::{DefaultPool, HostServices, PoolHost, ServiceRegistry, ServiceRegistryBuilder};
use std::sync::Arc;

pub mod fixtures;

/// In-memory game plus the services registered against it
pub struct TestHost {
    pub resources: Arc<MemoryResources>,
    pub catalog: Arc<MemoryCatalog>,
    pub director: Arc<MemoryDirector>,
    pub factory: Arc<CloneFactory>,
    pub pool_host: Arc<MemoryPoolHost>,
    pub fixup: Arc<MemoryFixup>,
    pub services: ServiceRegistry,
}

impl TestHost {
    /// Create a host with no built-in content
    pub fn new() -> Self {
        Self::with_builtin(Vec::<String>::new())
    }

    /// Create a host whose native template set holds `ids`
    pub fn with_builtin<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resources = Arc::new(MemoryResources::with_ids(ids));
        let catalog = Arc::new(MemoryCatalog::new());
        let director = Arc::new(MemoryDirector::new());
        let factory = Arc::new(CloneFactory::new());
        let pool_host = Arc::new(MemoryPoolHost::new());

        pool_host.set_pool(Arc::new(DefaultPool::new(resources.clone(), factory.clone())));

        let fixup = Arc::new(MemoryFixup::new(true));

        let services = ServiceRegistryBuilder::new(HostServices {
            resources: resources.clone(),
            catalog: catalog.clone(),
            director: director.clone(),
            factory: factory.clone(),
        })
        .fixup(fixup.clone())
        .build();

        Self {
            resources,
            catalog,
            director,
            factory,
            pool_host,
            fixup,
            services,
        }
    }

    pub fn loader(&self) -> PackageLoader {
        PackageLoader::new(self.services.clone())
    }

    /// Plugin source registering content from code
    pub fn plugin_source(&self, guid: &str) -> Arc<ContentSource> {
        self.services
            .registry
            .get_or_create_source(guid, Some(SourceMetadata::plugin(guid, "1.0.0", guid)))
    }

    /// Simulate a catalog rebuild
    pub fn rebuild_catalog(&self) {
        self.catalog.rebuild();
        self.services.items.register_items();
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}
