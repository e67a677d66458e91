//! Template fix-up tracking
//!
//! Wraps a [`TemplateFixup`] collaborator so each template is processed at
//! most once. Templates offered before the collaborator is ready are queued
//! and processed by [`TemplateFixups::flush_pending`] or by the next
//! [`TemplateFixups::fix`] after it turns ready.

use contentlib_core::{GameObject, InstanceId};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::host::{NoopFixup, TemplateFixup};

#[derive(Default)]
struct FixupState {
    pending: Vec<GameObject>,
    fixed: HashSet<InstanceId>,
}

pub struct TemplateFixups {
    hook: Arc<dyn TemplateFixup>,
    state: Mutex<FixupState>,
}

impl TemplateFixups {
    pub fn new(hook: Arc<dyn TemplateFixup>) -> Self {
        Self {
            hook,
            state: Mutex::new(FixupState::default()),
        }
    }

    /// Fix a template now, or queue it if the collaborator is not ready
    ///
    /// Once the collaborator reports ready, anything still queued is fixed
    /// first.
    pub fn fix(&self, template: &GameObject) {
        let mut state = self.state.lock();

        if !self.hook.is_ready() {
            if !state.fixed.contains(&template.id()) && !state.pending.contains(template) {
                debug!("Queueing template fix-up for \"{}\"", template.name());
                state.pending.push(template.clone());
            }
            return;
        }

        self.drain(&mut state);

        if state.fixed.insert(template.id()) {
            self.hook.fix(template);
        }
    }

    /// Process every queued template; returns how many were fixed
    ///
    /// Does nothing while the collaborator is not ready.
    pub fn flush_pending(&self) -> usize {
        if !self.hook.is_ready() {
            return 0;
        }
        self.drain(&mut self.state.lock())
    }

    fn drain(&self, state: &mut FixupState) -> usize {
        let pending = std::mem::take(&mut state.pending);
        let mut count = 0;

        for template in pending {
            if state.fixed.insert(template.id()) {
                self.hook.fix(&template);
                count += 1;
            }
        }

        if count > 0 {
            debug!("Fixed {} queued template(s)", count);
        }
        count
    }

    /// Templates fixed so far
    pub fn fixed_len(&self) -> usize {
        self.state.lock().fixed.len()
    }

    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }
}

impl Default for TemplateFixups {
    fn default() -> Self {
        Self::new(Arc::new(NoopFixup))
    }
}
