use indexmap::IndexMap;

/// Result of validating one step against the current form data.
///
/// Errors are keyed by field name and keep insertion order so they render
/// in the order the validator reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    is_valid: bool,
    errors: IndexMap<String, String>,
}

impl StepOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: IndexMap::new(),
        }
    }

    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            errors: IndexMap::new(),
        }
    }

    pub fn field_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::invalid().with_field_error(field, message)
    }

    pub fn with_field_error(
        mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.is_valid = false;
        self.errors.insert(field.into(), message.into());
        self
    }

    pub fn with_errors(errors: IndexMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    pub fn into_parts(self) -> (bool, IndexMap<String, String>) {
        (self.is_valid, self.errors)
    }
}
