pub mod catalog;
pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod runtime;
pub mod session;
pub mod state;
pub mod step;
pub mod terminal;
pub mod ui;

pub use crate::catalog::{CatalogClient, Difficulty, SearchFilters, TemplateDraft};
pub use crate::config::Settings;
pub use crate::core::StepId;
pub use crate::error::{CatalogError, ConfigError, SubmitError};
pub use crate::runtime::{
    Command, KeyBindings, SubmitExecutor, SubmitHandler, WizardOutcome, WizardRunner,
};
pub use crate::session::{WizardOptions, WizardPhase, WizardSession};
pub use crate::state::{
    CompletionSet, FormPatch, FormStore, StepFlow, StepStatus, ValidationRegistry,
};
pub use crate::step::{StepDescriptor, StepHost, StepOutcome, StepScope};
pub use crate::terminal::Terminal;
pub use crate::ui::{RenderFrame, Renderer, Theme};
