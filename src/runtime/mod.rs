pub mod command;
pub mod key_bindings;
pub mod runner;
pub mod submit;

pub use command::Command;
pub use key_bindings::{KeyBinding, KeyBindings};
pub use runner::{WizardOutcome, WizardRunner};
pub use submit::{SubmitExecutor, SubmitHandler};
