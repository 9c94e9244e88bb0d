use super::{WizardPhase, WizardSession};
use crate::error::SubmitError;
use tracing::{debug, warn};

impl<T> WizardSession<T> {
    /// Submit is only reachable from the last step, with that step valid,
    /// while editing.
    pub fn can_submit(&self) -> bool {
        self.phase == WizardPhase::Editing
            && self.flow.is_last()
            && match self.current_step_id() {
                Some(id) => self.registry.is_valid(id.as_str()),
                None => false,
            }
    }

    /// Starts a submission: clears any previous submission error, flips to
    /// the submitting phase and hands back an owned snapshot for the
    /// handler. Returns `None` when submit is not available, including
    /// while a submission is already in flight (second submits are
    /// dropped, not queued).
    pub fn begin_submit(&mut self) -> Option<T>
    where
        T: Clone,
    {
        if !self.can_submit() {
            if self.phase == WizardPhase::Submitting {
                debug!("submit dropped; one is already in flight");
            }
            return None;
        }
        self.submit_error = None;
        self.phase = WizardPhase::Submitting;
        Some(self.store.data().clone())
    }

    /// Completes the in-flight submission. Success finishes the wizard;
    /// failure surfaces the error and returns to editing on the last step
    /// with the form data intact, ready for a retry.
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) {
        if self.phase != WizardPhase::Submitting {
            warn!("submit completion arrived outside the submitting phase; ignored");
            return;
        }
        match result {
            Ok(()) => {
                self.phase = WizardPhase::Done;
            }
            Err(err) => {
                warn!(error = %err, "submission failed");
                self.submit_error = Some(err.to_string());
                self.phase = WizardPhase::Editing;
            }
        }
    }

    /// Abandons the wizard. Dropped while a submission is in flight and in
    /// terminal phases.
    pub fn cancel(&mut self) -> bool {
        match self.phase {
            WizardPhase::Editing => {
                self.deactivate_current();
                self.phase = WizardPhase::Cancelled;
                true
            }
            WizardPhase::Submitting => {
                debug!("cancel dropped while submitting");
                false
            }
            WizardPhase::Done | WizardPhase::Cancelled => false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == WizardPhase::Submitting
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, WizardPhase::Done | WizardPhase::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::SubmitError;
    use crate::session::{WizardPhase, WizardSession};
    use crate::step::descriptor::StepDescriptor;
    use crate::step::host::StepHost;
    use crate::step::outcome::StepOutcome;

    #[derive(Debug, Default, Clone)]
    struct Form {
        name: String,
    }

    fn two_step_session() -> WizardSession<Form> {
        let first = StepHost::new(StepDescriptor::new("Basics").with_id("basics"));
        let last =
            StepHost::new(StepDescriptor::new("Review").with_id("review")).validate(
                |form: &Form| {
                    if form.name.is_empty() {
                        StepOutcome::field_error("name", "Name is required")
                    } else {
                        StepOutcome::valid()
                    }
                },
            );
        WizardSession::new(Form::default(), vec![first, last])
    }

    #[test]
    fn submit_is_gated_to_the_valid_last_step() {
        let mut session = two_step_session();
        assert!(!session.can_submit());
        assert!(session.begin_submit().is_none());

        session.next();
        assert!(!session.can_submit());

        session.update(|form: &mut Form| form.name = "pkg".into());
        assert!(session.can_submit());
    }

    #[test]
    fn successful_submission_reaches_done() {
        let mut session = two_step_session();
        session.next();
        session.update(|form: &mut Form| form.name = "pkg".into());

        let snapshot = session.begin_submit().expect("snapshot");
        assert_eq!(snapshot.name, "pkg");
        assert!(session.is_submitting());

        session.finish_submit(Ok(()));
        assert_eq!(session.phase(), WizardPhase::Done);
        assert!(session.is_finished());
    }

    #[test]
    fn second_submit_while_in_flight_is_dropped() {
        let mut session = two_step_session();
        session.next();
        session.update(|form: &mut Form| form.name = "pkg".into());

        assert!(session.begin_submit().is_some());
        assert!(session.begin_submit().is_none());
        assert!(session.is_submitting());
    }

    #[test]
    fn failure_returns_to_editing_with_data_intact() {
        let mut session = two_step_session();
        session.next();
        session.update(|form: &mut Form| form.name = "pkg".into());

        session.begin_submit().expect("snapshot");
        session.finish_submit(Err(SubmitError::new("service unavailable")));

        assert_eq!(session.phase(), WizardPhase::Editing);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.data().name, "pkg");
        assert_eq!(session.submit_error(), Some("service unavailable"));

        // retry succeeds and clears the surfaced error
        session.begin_submit().expect("snapshot");
        assert!(session.submit_error().is_none());
        session.finish_submit(Ok(()));
        assert_eq!(session.phase(), WizardPhase::Done);
    }

    #[test]
    fn commands_are_dropped_while_submitting() {
        let mut session = two_step_session();
        session.next();
        session.update(|form: &mut Form| form.name = "pkg".into());
        session.begin_submit().expect("snapshot");

        assert!(!session.prev());
        assert!(!session.go_to(0));
        assert!(!session.cancel());
        session.update(|form: &mut Form| form.name = "changed".into());
        assert_eq!(session.data().name, "pkg");
    }

    #[test]
    fn late_completion_in_a_wrong_phase_is_ignored() {
        let mut session = two_step_session();
        session.finish_submit(Ok(()));
        assert_eq!(session.phase(), WizardPhase::Editing);
    }

    #[test]
    fn cancel_finishes_the_wizard_from_editing() {
        let mut session = two_step_session();
        assert!(session.cancel());
        assert_eq!(session.phase(), WizardPhase::Cancelled);
        assert!(!session.cancel());
    }

    #[test]
    fn empty_wizard_degrades_to_cancelled() {
        let session: WizardSession<Form> = WizardSession::new(Form::default(), Vec::new());
        assert_eq!(session.phase(), WizardPhase::Cancelled);
        assert!(session.is_finished());
    }
}
