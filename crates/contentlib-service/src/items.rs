//! Item registration
//!
//! Items are validated and queued as they are registered, and announced to
//! the host's item catalog every time the catalog rebuilds. Once the first
//! rebuild has happened, newly registered items are announced immediately.

use contentlib_core::{
    keys_match, paths, ContentError, ContentObject, ContentRegistry, ContentSource, Item, Result,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::fixup::TemplateFixups;
use crate::host::{ItemCatalog, ResourceTemplates};
use crate::network::NetworkTemplates;
use crate::outcome::{FlushSummary, Registration, RejectReason};

/// Whether the catalog has been populated at least once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogPhase {
    /// No rebuild yet; items wait in the pending queue
    AwaitingInitialRebuild,
    /// The catalog has been built; new items are announced on registration
    Announced,
}

struct ItemQueue {
    pending: Vec<Arc<Item>>,
    announced: Vec<Arc<Item>>,
    phase: CatalogPhase,
}

pub struct Items {
    queue: Mutex<ItemQueue>,
    registry: Arc<ContentRegistry>,
    resources: Arc<dyn ResourceTemplates>,
    network: Arc<dyn NetworkTemplates>,
    catalog: Arc<dyn ItemCatalog>,
    fixups: Arc<TemplateFixups>,
}

impl Items {
    pub fn new(
        registry: Arc<ContentRegistry>,
        resources: Arc<dyn ResourceTemplates>,
        network: Arc<dyn NetworkTemplates>,
        catalog: Arc<dyn ItemCatalog>,
        fixups: Arc<TemplateFixups>,
    ) -> Self {
        Self {
            queue: Mutex::new(ItemQueue {
                pending: Vec::new(),
                announced: Vec::new(),
                phase: CatalogPhase::AwaitingInitialRebuild,
            }),
            registry,
            resources,
            network,
            catalog,
            fixups,
        }
    }

    /// Items the catalog has accepted at least once
    pub fn registered_items(&self) -> Vec<Arc<Item>> {
        self.queue.lock().announced.clone()
    }

    /// Every validated item, announced or not
    pub fn pending_items(&self) -> Vec<Arc<Item>> {
        self.queue.lock().pending.clone()
    }

    pub fn phase(&self) -> CatalogPhase {
        self.queue.lock().phase
    }

    /// Validate and queue an item supplied by `source`
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] for an item without a
    /// prefab. Data problems are logged and returned as a rejection.
    #[instrument(skip(self, item, source), fields(item = %item.item_name, source = %source.guid()))]
    pub fn register(&self, item: Arc<Item>, source: &Arc<ContentSource>) -> Result<Registration> {
        let Some(prefab) = item.prefab.as_ref() else {
            return Err(ContentError::InvalidArgument(format!(
                "Failed to register item \"{}\". Item prefab is null.",
                item.item_name
            )));
        };

        if item.asset_name != prefab.name() {
            return Ok(self.reject(
                &item,
                RejectReason::NameMismatch {
                    declared: item.asset_name.clone(),
                    actual: prefab.name().to_string(),
                },
            ));
        }

        let prefab_id = paths::item_prefab_path(&item).unwrap_or_default();

        if self.resources.has_template(&prefab_id) {
            return Ok(self.reject(&item, RejectReason::ExistsInResources));
        }

        if self
            .queue
            .lock()
            .pending
            .iter()
            .any(|queued| keys_match(&queued.asset_name, &item.asset_name))
        {
            return Ok(self.reject(&item, RejectReason::AlreadyRegistered));
        }

        self.network.register_network_template(&prefab_id, prefab)?;

        let announce_now = {
            let mut queue = self.queue.lock();
            queue.pending.push(item.clone());
            queue.phase == CatalogPhase::Announced
        };

        if announce_now {
            self.announce(&item);
        }

        self.registry.add(ContentObject::Item(item), source);
        Ok(Registration::Registered)
    }

    /// Announce every queued item to the catalog
    ///
    /// Runs on every catalog rebuild. Items already announced are offered
    /// again since a rebuilt catalog starts empty.
    #[instrument(skip(self))]
    pub fn register_items(&self) -> FlushSummary {
        let mut summary = FlushSummary::default();

        if !self.catalog.is_ready() {
            error!("Failed to register items. Item catalog is not available.");
            return summary;
        }

        info!("Adding items.");

        let pending = self.queue.lock().pending.clone();

        for item in &pending {
            if self.announce(item) {
                summary.announced += 1;
            } else {
                summary.refused += 1;
            }
        }

        self.queue.lock().phase = CatalogPhase::Announced;
        summary
    }

    fn announce(&self, item: &Arc<Item>) -> bool {
        if let Some(prefab) = item.prefab.as_ref() {
            self.fixups.fix(prefab);
        }

        if !self.catalog.add_item(item) {
            warn!("Failed to add item \"{}\"", item.item_name);
            return false;
        }

        let mut queue = self.queue.lock();
        if !queue.announced.iter().any(|a| Arc::ptr_eq(a, item)) {
            queue.announced.push(item.clone());
        }
        debug!("Added item \"{}\"", item.item_name);
        true
    }

    fn reject(&self, item: &Item, reason: RejectReason) -> Registration {
        error!("Failed to register item \"{}\". {}", item.item_name, reason);
        Registration::Rejected(reason)
    }
}
