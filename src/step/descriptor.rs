use crate::core::StepId;

/// Authoring-time metadata for one step. The id is optional; steps
/// registered without one get a positional id when the wizard is built.
#[derive(Debug, Clone)]
pub struct StepDescriptor {
    id: Option<StepId>,
    title: String,
    description: Option<String>,
    icon: Option<String>,
    fields: Vec<String>,
}

impl StepDescriptor {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            icon: None,
            fields: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<StepId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Names of the form fields this step owns. Informational; shown in
    /// summaries, never enforced.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> Option<&StepId> {
        self.id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}
