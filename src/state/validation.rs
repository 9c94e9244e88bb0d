use crate::core::StepId;
use crate::step::outcome::StepOutcome;
use indexmap::IndexMap;

/// Last reported validation result for one step.
#[derive(Debug, Clone)]
pub struct StepValidation {
    pub step_id: StepId,
    pub is_valid: bool,
    pub errors: IndexMap<String, String>,
}

/// Per-step validation results, keyed by step id. Entries are overwritten
/// in place and never removed while the wizard lives; a step that was once
/// reported stays recorded even after it stops being active.
#[derive(Debug, Default, Clone)]
pub struct ValidationRegistry {
    entries: IndexMap<StepId, StepValidation>,
}

impl ValidationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, step_id: impl Into<StepId>, outcome: StepOutcome) {
        let step_id = step_id.into();
        let (is_valid, errors) = outcome.into_parts();
        self.set_validation(step_id, is_valid, errors);
    }

    pub fn set_validation(
        &mut self,
        step_id: impl Into<StepId>,
        is_valid: bool,
        errors: IndexMap<String, String>,
    ) {
        let step_id = step_id.into();
        let entry = StepValidation {
            step_id: step_id.clone(),
            is_valid,
            errors,
        };
        self.entries.insert(step_id, entry);
    }

    /// Whether a step may be left in the forward direction.
    ///
    /// A step that never reported counts as valid. That default is load
    /// bearing: steps without a validator must not block navigation, so
    /// absence of an entry means "no objection", not "unknown".
    pub fn is_valid(&self, step_id: &str) -> bool {
        self.entries
            .get(step_id)
            .map(|entry| entry.is_valid)
            .unwrap_or(true)
    }

    /// True only when the step has explicitly reported invalid. Used for
    /// error markers; unlike `is_valid` this does not treat silence as a
    /// verdict.
    pub fn is_marked_invalid(&self, step_id: &str) -> bool {
        self.entries
            .get(step_id)
            .is_some_and(|entry| !entry.is_valid)
    }

    pub fn entry(&self, step_id: &str) -> Option<&StepValidation> {
        self.entries.get(step_id)
    }

    pub fn errors(&self, step_id: &str) -> Option<&IndexMap<String, String>> {
        self.entries.get(step_id).map(|entry| &entry.errors)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreported_steps_count_as_valid() {
        let registry = ValidationRegistry::new();
        assert!(registry.is_valid("never-seen"));
        assert!(!registry.is_marked_invalid("never-seen"));
    }

    #[test]
    fn record_overwrites_in_place() {
        let mut registry = ValidationRegistry::new();
        registry.record("basics", StepOutcome::field_error("name", "required"));
        assert!(!registry.is_valid("basics"));
        assert!(registry.is_marked_invalid("basics"));

        registry.record("basics", StepOutcome::valid());
        assert!(registry.is_valid("basics"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn entries_survive_revalidation_to_valid() {
        let mut registry = ValidationRegistry::new();
        registry.record("basics", StepOutcome::field_error("name", "required"));
        registry.record("basics", StepOutcome::valid());
        let entry = registry.entry("basics").expect("entry kept");
        assert!(entry.is_valid);
        assert!(entry.errors.is_empty());
    }

    #[test]
    fn error_order_is_preserved() {
        let mut registry = ValidationRegistry::new();
        let outcome = StepOutcome::invalid()
            .with_field_error("name", "required")
            .with_field_error("author", "required");
        registry.record("basics", outcome);
        let errors = registry.errors("basics").expect("errors");
        let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["name", "author"]);
    }
}
