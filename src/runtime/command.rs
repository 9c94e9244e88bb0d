/// Wizard-level commands produced by the key bindings. Keys the active
/// step consumes never get here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Next step, or submit when already on the last one.
    Advance,
    Back,
    /// Jump to a step by zero-based index, subject to the session's
    /// accessibility rule.
    Jump(usize),
    Submit,
    Cancel,
}
