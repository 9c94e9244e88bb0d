pub mod descriptor;
pub mod host;
pub mod outcome;

pub use descriptor::StepDescriptor;
pub use host::{StepHost, StepScope};
pub use outcome::StepOutcome;
