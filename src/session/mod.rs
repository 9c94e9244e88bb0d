use crate::core::StepId;
use crate::state::flow::StepFlow;
use crate::state::store::{FormPatch, FormStore};
use crate::state::validation::ValidationRegistry;
use crate::step::descriptor::StepDescriptor;
use crate::step::host::{StepHost, StepScope};
use crate::terminal::KeyEvent;
use crate::ui::span::SpanLine;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing,
    /// A submission is in flight. Every command arriving in this phase is
    /// dropped, not queued.
    Submitting,
    Done,
    Cancelled,
}

/// Presentation knobs. These change what the shell renders and which
/// bindings get installed, never what the state machine permits.
#[derive(Debug, Clone)]
pub struct WizardOptions {
    pub submit_label: String,
    pub show_step_numbers: bool,
    pub allow_step_navigation: bool,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            submit_label: "Submit".to_string(),
            show_step_numbers: true,
            allow_step_navigation: true,
        }
    }
}

/// A wizard run: the shared form value, per-step validation results,
/// position and completion, the step hosts, and the submission phase.
///
/// The session is single threaded. The submit handler is the only thing
/// that leaves this thread, and it only ever gets an owned snapshot.
pub struct WizardSession<T> {
    store: FormStore<T>,
    registry: ValidationRegistry,
    flow: StepFlow,
    hosts: Vec<StepHost<T>>,
    ids: Vec<StepId>,
    phase: WizardPhase,
    submit_error: Option<String>,
    options: WizardOptions,
}

impl<T> WizardSession<T> {
    pub fn new(initial: T, hosts: Vec<StepHost<T>>) -> Self {
        Self::with_options(initial, hosts, WizardOptions::default())
    }

    pub fn with_options(initial: T, hosts: Vec<StepHost<T>>, options: WizardOptions) -> Self {
        let ids: Vec<StepId> = hosts
            .iter()
            .enumerate()
            .map(|(index, host)| {
                host.descriptor()
                    .id()
                    .cloned()
                    .unwrap_or_else(|| StepId::positional(index))
            })
            .collect();

        let mut seen = HashSet::new();
        for id in &ids {
            if !seen.insert(id.as_str()) {
                warn!(step_id = %id, "duplicate step id; validation entries will collide");
            }
        }

        let mut session = Self {
            store: FormStore::new(initial),
            registry: ValidationRegistry::new(),
            flow: StepFlow::new(hosts.len()),
            hosts,
            ids,
            phase: WizardPhase::Editing,
            submit_error: None,
            options,
        };

        if session.hosts.is_empty() {
            warn!("wizard constructed without steps");
            session.phase = WizardPhase::Cancelled;
        } else {
            session.activate_current();
        }
        session
    }

    pub fn data(&self) -> &T {
        self.store.data()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn options(&self) -> &WizardOptions {
        &self.options
    }

    pub fn step_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn current_index(&self) -> usize {
        self.flow.current_index()
    }

    pub fn flow(&self) -> &StepFlow {
        &self.flow
    }

    pub fn registry(&self) -> &ValidationRegistry {
        &self.registry
    }

    pub fn step_id_at(&self, index: usize) -> Option<&StepId> {
        self.ids.get(index)
    }

    pub fn current_step_id(&self) -> Option<&StepId> {
        self.ids.get(self.flow.current_index())
    }

    pub fn descriptor_at(&self, index: usize) -> Option<&StepDescriptor> {
        self.hosts.get(index).map(StepHost::descriptor)
    }

    pub fn current_descriptor(&self) -> Option<&StepDescriptor> {
        self.descriptor_at(self.flow.current_index())
    }

    pub fn current_errors(&self) -> Option<&IndexMap<String, String>> {
        let id = self.current_step_id()?;
        self.registry.errors(id.as_str())
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Applies a shallow-merge patch, then re-validates the active step
    /// against the new data. Dropped outside the editing phase.
    pub fn update(&mut self, patch: impl FormPatch<T>) {
        if self.phase != WizardPhase::Editing {
            debug!("form update dropped outside editing phase");
            return;
        }
        self.store.update(patch);
        self.revalidate_active();
    }

    /// Replaces the whole form value (draft hydration). Same gating and
    /// re-validation as `update`.
    pub fn replace(&mut self, data: T) {
        if self.phase != WizardPhase::Editing {
            debug!("form replace dropped outside editing phase");
            return;
        }
        self.store.replace(data);
        self.revalidate_active();
    }

    /// Offers a key to the active step's handler. Returns whether the step
    /// consumed it; unconsumed keys fall through to the global bindings.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.phase != WizardPhase::Editing {
            return false;
        }
        let idx = self.flow.current_index();
        let Some(host) = self.hosts.get_mut(idx) else {
            return false;
        };
        let Some(id) = self.ids.get(idx) else {
            return false;
        };

        let revision_before = self.store.revision();
        let mut scope = StepScope::new(id, &mut self.store, &mut self.registry);
        let handled = host.handle_key(key, &mut scope);
        if handled && self.store.revision() != revision_before {
            self.revalidate_active();
        }
        handled
    }

    /// Body lines of the active step. Only this host's render closure ever
    /// runs; inactive steps are not constructed.
    pub fn active_body(&self) -> Vec<SpanLine> {
        match self.hosts.get(self.flow.current_index()) {
            Some(host) => host.body(self.store.data()),
            None => Vec::new(),
        }
    }

    pub(crate) fn activate_current(&mut self) {
        let idx = self.flow.current_index();
        if let Some(host) = self.hosts.get_mut(idx) {
            host.fire_enter(self.store.data());
        }
        self.revalidate_active();
    }

    pub(crate) fn deactivate_current(&mut self) {
        let idx = self.flow.current_index();
        if let Some(host) = self.hosts.get_mut(idx) {
            host.fire_exit(self.store.data());
        }
    }

    pub(crate) fn revalidate_active(&mut self) {
        let idx = self.flow.current_index();
        let Some(host) = self.hosts.get(idx) else {
            return;
        };
        let Some(id) = self.ids.get(idx) else {
            return;
        };
        let outcome = host.run_validation(self.store.data());
        let id = id.clone();
        self.registry.record(id, outcome);
    }
}

mod navigation;
mod submission;
