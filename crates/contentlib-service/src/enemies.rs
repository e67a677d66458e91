//! Enemy registration
//!
//! Enemies may only be registered while the enemy phase is open. The phase
//! closes on the first flush to the host's difficulty tables and can never
//! reopen; anything still pending at that point is discarded.

use contentlib_core::{
    keys_match, paths, ContentError, ContentObject, ContentRegistry, ContentSource, EnemySetup, Result,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use crate::host::{EnemyDirector, ResourceTemplates};
use crate::network::NetworkTemplates;
use crate::outcome::{FlushSummary, Registration, RejectReason};

/// Enemy registration window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyPhase {
    Open,
    Closed,
}

impl EnemyPhase {
    /// Close the window; returns false if it was already closed
    fn close(&mut self) -> bool {
        match self {
            Self::Open => {
                *self = Self::Closed;
                true
            }
            Self::Closed => false,
        }
    }
}

struct EnemyQueue {
    pending: Vec<Arc<EnemySetup>>,
    announced: Vec<Arc<EnemySetup>>,
    phase: EnemyPhase,
}

pub struct Enemies {
    queue: Mutex<EnemyQueue>,
    registry: Arc<ContentRegistry>,
    resources: Arc<dyn ResourceTemplates>,
    network: Arc<dyn NetworkTemplates>,
    director: Arc<dyn EnemyDirector>,
}

impl Enemies {
    pub fn new(
        registry: Arc<ContentRegistry>,
        resources: Arc<dyn ResourceTemplates>,
        network: Arc<dyn NetworkTemplates>,
        director: Arc<dyn EnemyDirector>,
    ) -> Self {
        Self {
            queue: Mutex::new(EnemyQueue {
                pending: Vec::new(),
                announced: Vec::new(),
                phase: EnemyPhase::Open,
            }),
            registry,
            resources,
            network,
            director,
        }
    }

    /// Enemies the difficulty tables accepted
    pub fn registered_enemies(&self) -> Vec<Arc<EnemySetup>> {
        self.queue.lock().announced.clone()
    }

    pub fn pending_enemies(&self) -> Vec<Arc<EnemySetup>> {
        self.queue.lock().pending.clone()
    }

    pub fn phase(&self) -> EnemyPhase {
        self.queue.lock().phase
    }

    /// Validate and queue an enemy setup supplied by `source`
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidArgument`] for a setup with no spawn
    /// objects. Data problems are logged and returned as a rejection.
    #[instrument(skip(self, enemy, source), fields(enemy = %enemy.name, source = %source.guid()))]
    pub fn register(&self, enemy: Arc<EnemySetup>, source: &Arc<ContentSource>) -> Result<Registration> {
        if enemy.is_degenerate() {
            return Err(ContentError::InvalidArgument(format!(
                "Failed to register enemy \"{}\". EnemySetup or spawnObjects list is empty.",
                enemy.name
            )));
        }

        if enemy.find_parent().is_none() {
            return Ok(self.reject(&enemy, RejectReason::MissingEnemyParent));
        }

        if self.queue.lock().phase == EnemyPhase::Closed {
            return Ok(self.reject(&enemy, RejectReason::PhaseClosed));
        }

        let spawn_ids: Vec<_> = enemy
            .spawn_objects
            .iter()
            .flatten()
            .map(paths::enemy_prefab_path)
            .collect();

        if spawn_ids.iter().any(|id| self.resources.has_template(id)) {
            return Ok(self.reject(&enemy, RejectReason::ExistsInResources));
        }

        if self
            .queue
            .lock()
            .pending
            .iter()
            .any(|queued| keys_match(&queued.name, &enemy.name))
        {
            return Ok(self.reject(&enemy, RejectReason::AlreadyRegistered));
        }

        for spawn_object in &enemy.spawn_objects {
            let Some(spawn_object) = spawn_object else {
                warn!("Enemy \"{}\" has a null entry in the spawnObjects list.", enemy.display_name());
                continue;
            };

            self.network
                .register_network_template(&paths::enemy_prefab_path(spawn_object), spawn_object)?;
        }

        self.queue.lock().pending.push(enemy.clone());
        self.registry.add(ContentObject::Enemy(enemy), source);
        Ok(Registration::Registered)
    }

    /// Add every pending enemy to the difficulty tables and close the phase
    ///
    /// Only the first call does anything. Enemies the director refuses are
    /// not retried. Each accepted enemy is confirmed at `debug`, the level
    /// the host's extended logging switch enables; refusals log at `warn`.
    #[instrument(skip(self))]
    pub fn register_enemies(&self) -> FlushSummary {
        let mut summary = FlushSummary::default();

        let pending = {
            let mut queue = self.queue.lock();
            if !queue.phase.close() {
                return summary;
            }
            std::mem::take(&mut queue.pending)
        };

        for enemy in pending {
            if self.is_announced(&enemy) {
                summary.skipped += 1;
                continue;
            }

            let Some((_, parent)) = enemy.find_parent() else {
                summary.skipped += 1;
                continue;
            };

            if self.director.add_enemy(&enemy) {
                debug!("Added enemy \"{}\" to difficulty {}", enemy.display_name(), parent.difficulty);
                self.queue.lock().announced.push(enemy.clone());
                summary.announced += 1;
            } else {
                warn!("Failed to add enemy \"{}\" to difficulty {}", enemy.display_name(), parent.difficulty);
                summary.refused += 1;
            }
        }

        summary
    }

    fn is_announced(&self, enemy: &Arc<EnemySetup>) -> bool {
        self.queue
            .lock()
            .announced
            .iter()
            .any(|a| keys_match(&a.name, &enemy.name))
    }

    fn reject(&self, enemy: &EnemySetup, reason: RejectReason) -> Registration {
        error!("Failed to register enemy \"{}\". {}", enemy.display_name(), reason);
        Registration::Rejected(reason)
    }
}
