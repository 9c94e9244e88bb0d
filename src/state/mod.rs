pub mod flow;
pub mod progress;
pub mod store;
pub mod validation;

pub use flow::{StepFlow, StepStatus};
pub use progress::CompletionSet;
pub use store::{FormPatch, FormStore};
pub use validation::{StepValidation, ValidationRegistry};
