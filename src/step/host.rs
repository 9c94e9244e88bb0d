use crate::core::StepId;
use crate::state::store::{FormPatch, FormStore};
use crate::state::validation::ValidationRegistry;
use crate::step::descriptor::StepDescriptor;
use crate::step::outcome::StepOutcome;
use crate::terminal::KeyEvent;
use crate::ui::span::SpanLine;
use indexmap::IndexMap;

pub type StepValidatorFn<T> = Box<dyn Fn(&T) -> StepOutcome + Send + Sync>;
pub type StepRenderFn<T> = Box<dyn Fn(&T) -> Vec<SpanLine> + Send + Sync>;
pub type StepHookFn<T> = Box<dyn FnMut(&T) + Send>;
pub type StepKeyFn<T> = Box<dyn FnMut(KeyEvent, &mut StepScope<'_, T>) -> bool + Send>;

/// One step of a wizard: descriptor plus behavior, registered together.
/// Only the active host is ever asked to render or handle keys; inactive
/// steps stay cold until navigation reaches them.
pub struct StepHost<T> {
    descriptor: StepDescriptor,
    validator: Option<StepValidatorFn<T>>,
    render: Option<StepRenderFn<T>>,
    on_key: Option<StepKeyFn<T>>,
    on_enter: Option<StepHookFn<T>>,
    on_exit: Option<StepHookFn<T>>,
}

impl<T> StepHost<T> {
    pub fn new(descriptor: StepDescriptor) -> Self {
        Self {
            descriptor,
            validator: None,
            render: None,
            on_key: None,
            on_enter: None,
            on_exit: None,
        }
    }

    /// Validation against the whole form value. Steps without one always
    /// count as valid.
    pub fn validate(mut self, f: impl Fn(&T) -> StepOutcome + Send + Sync + 'static) -> Self {
        self.validator = Some(Box::new(f));
        self
    }

    pub fn render(mut self, f: impl Fn(&T) -> Vec<SpanLine> + Send + Sync + 'static) -> Self {
        self.render = Some(Box::new(f));
        self
    }

    /// Raw key handler, offered the key before the global bindings. Gets a
    /// scope over the shared store and the step's validation slot; return
    /// `true` to consume the key.
    pub fn on_key(
        mut self,
        f: impl FnMut(KeyEvent, &mut StepScope<'_, T>) -> bool + Send + 'static,
    ) -> Self {
        self.on_key = Some(Box::new(f));
        self
    }

    /// Runs each time the step becomes active, before validation. The place
    /// to reset step-local volatile state (focus position, scratch input).
    pub fn on_enter(mut self, f: impl FnMut(&T) + Send + 'static) -> Self {
        self.on_enter = Some(Box::new(f));
        self
    }

    pub fn on_exit(mut self, f: impl FnMut(&T) + Send + 'static) -> Self {
        self.on_exit = Some(Box::new(f));
        self
    }

    pub fn descriptor(&self) -> &StepDescriptor {
        &self.descriptor
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    pub fn body(&self, data: &T) -> Vec<SpanLine> {
        match &self.render {
            Some(render) => render(data),
            None => Vec::new(),
        }
    }

    pub(crate) fn run_validation(&self, data: &T) -> StepOutcome {
        match &self.validator {
            Some(validator) => validator(data),
            None => StepOutcome::valid(),
        }
    }

    pub(crate) fn fire_enter(&mut self, data: &T) {
        if let Some(hook) = &mut self.on_enter {
            hook(data);
        }
    }

    pub(crate) fn fire_exit(&mut self, data: &T) {
        if let Some(hook) = &mut self.on_exit {
            hook(data);
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, scope: &mut StepScope<'_, T>) -> bool {
        match &mut self.on_key {
            Some(handler) => handler(key, scope),
            None => false,
        }
    }
}

/// The handle a step's key handler works through: the shared form value
/// plus this step's validation slot, nothing else. Handed in per call so
/// steps never hold a reference to wizard internals.
pub struct StepScope<'a, T> {
    step_id: &'a StepId,
    store: &'a mut FormStore<T>,
    registry: &'a mut ValidationRegistry,
}

impl<'a, T> StepScope<'a, T> {
    pub(crate) fn new(
        step_id: &'a StepId,
        store: &'a mut FormStore<T>,
        registry: &'a mut ValidationRegistry,
    ) -> Self {
        Self {
            step_id,
            store,
            registry,
        }
    }

    pub fn step_id(&self) -> &StepId {
        self.step_id
    }

    pub fn data(&self) -> &T {
        self.store.data()
    }

    pub fn update(&mut self, patch: impl FormPatch<T>) {
        self.store.update(patch);
    }

    pub fn set_validation(&mut self, outcome: StepOutcome) {
        self.registry.record(self.step_id.clone(), outcome);
    }

    pub fn is_valid(&self) -> bool {
        self.registry.is_valid(self.step_id.as_str())
    }

    pub fn errors(&self) -> Option<&IndexMap<String, String>> {
        self.registry.errors(self.step_id.as_str())
    }
}
