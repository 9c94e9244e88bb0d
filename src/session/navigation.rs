use super::{WizardPhase, WizardSession};
use crate::state::flow::StepStatus;
use tracing::warn;

impl<T> WizardSession<T> {
    /// Forward is open when there is a next step and the current one has
    /// not reported invalid. A step that never reported counts as valid.
    pub fn can_go_forward(&self) -> bool {
        self.phase == WizardPhase::Editing && self.flow.has_next() && self.current_step_valid()
    }

    /// Backward is open from everywhere but the first step. Validity never
    /// blocks going back.
    pub fn can_go_backward(&self) -> bool {
        self.phase == WizardPhase::Editing && self.flow.has_prev()
    }

    /// Moves forward one step. The departed step is marked completed
    /// before the move and is not re-validated on the way out.
    pub fn next(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.deactivate_current();
        self.flow.advance();
        self.activate_current();
        true
    }

    /// Moves back one step. Completion of the departed step is untouched.
    pub fn prev(&mut self) -> bool {
        if !self.can_go_backward() {
            return false;
        }
        self.deactivate_current();
        self.flow.retreat();
        self.activate_current();
        true
    }

    /// Jumps to `index` if it is the first step, the current step, or the
    /// direct successor of a completed one. Jumping never marks anything
    /// completed, in either direction.
    pub fn go_to(&mut self, index: usize) -> bool {
        if self.phase != WizardPhase::Editing {
            return false;
        }
        if index >= self.flow.len() {
            warn!(index, total = self.flow.len(), "step jump out of range");
            return false;
        }
        if index == self.flow.current_index() {
            return true;
        }
        if !self.flow.is_accessible(index) {
            return false;
        }
        self.deactivate_current();
        self.flow.jump(index);
        self.activate_current();
        true
    }

    pub fn step_status(&self, index: usize) -> StepStatus {
        self.flow.status_at(index)
    }

    fn current_step_valid(&self) -> bool {
        match self.current_step_id() {
            Some(id) => self.registry.is_valid(id.as_str()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::session::WizardSession;
    use crate::step::descriptor::StepDescriptor;
    use crate::step::host::StepHost;
    use crate::step::outcome::StepOutcome;

    #[derive(Debug, Default, Clone)]
    struct Form {
        name: String,
        body: String,
    }

    fn name_required() -> StepHost<Form> {
        StepHost::new(StepDescriptor::new("Basics").with_id("basics")).validate(|form: &Form| {
            if form.name.is_empty() {
                StepOutcome::field_error("name", "Name is required")
            } else {
                StepOutcome::valid()
            }
        })
    }

    fn body_required() -> StepHost<Form> {
        StepHost::new(StepDescriptor::new("Content").with_id("content")).validate(|form: &Form| {
            if form.body.is_empty() {
                StepOutcome::field_error("body", "Content is required")
            } else {
                StepOutcome::valid()
            }
        })
    }

    fn open_step(title: &str) -> StepHost<Form> {
        StepHost::new(StepDescriptor::new(title))
    }

    fn three_step_session() -> WizardSession<Form> {
        WizardSession::new(
            Form::default(),
            vec![name_required(), body_required(), open_step("Review")],
        )
    }

    #[test]
    fn forward_needs_a_valid_current_step() {
        let mut session = three_step_session();
        assert!(!session.can_go_forward());
        assert!(!session.next());
        assert_eq!(session.current_index(), 0);

        session.update(|form: &mut Form| form.name = "pkg".into());
        assert!(session.can_go_forward());
        assert!(session.next());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn leaving_forward_marks_the_step_completed() {
        let mut session = three_step_session();
        session.update(|form: &mut Form| form.name = "pkg".into());
        session.next();
        assert!(session.flow().is_completed(0));
        assert!(!session.flow().is_completed(1));
    }

    #[test]
    fn backward_is_always_open_off_the_first_step() {
        let mut session = three_step_session();
        session.update(|form: &mut Form| form.name = "pkg".into());
        session.next();
        // current step is invalid, back still works
        assert!(!session.can_go_forward());
        assert!(session.can_go_backward());
        assert!(session.prev());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn going_back_keeps_completion() {
        let mut session = three_step_session();
        session.update(|form: &mut Form| form.name = "pkg".into());
        session.next();
        session.prev();
        assert!(session.flow().is_completed(0));
        // forward again is instant because step 0 is still valid
        assert!(session.next());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn completion_survives_later_invalidation() {
        let mut session = three_step_session();
        session.update(|form: &mut Form| form.name = "pkg".into());
        session.next();
        session.prev();
        // empty the name again: step 0 becomes invalid but stays completed
        session.update(|form: &mut Form| form.name.clear());
        assert!(!session.can_go_forward());
        assert!(session.flow().is_completed(0));
        assert!(session.registry().is_marked_invalid("basics"));
    }

    #[test]
    fn jump_follows_the_predecessor_rule() {
        let mut session = three_step_session();
        assert!(!session.go_to(2));
        assert!(session.go_to(0));

        session.update(|form: &mut Form| form.name = "pkg".into());
        session.next();
        // completed {0}; step 1 reachable, step 2 not
        assert!(session.go_to(0));
        assert_eq!(session.current_index(), 0);
        assert!(session.go_to(1));
        assert!(!session.go_to(2));
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn jump_out_of_range_is_refused() {
        let mut session = three_step_session();
        assert!(!session.go_to(99));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn jumping_back_does_not_complete_the_departed_step() {
        let mut session = three_step_session();
        session.update(|form: &mut Form| form.name = "pkg".into());
        session.next();
        assert!(session.go_to(0));
        assert!(!session.flow().is_completed(1));
    }

    #[test]
    fn steps_without_validators_never_block() {
        let mut session = WizardSession::new(
            Form::default(),
            vec![open_step("One"), open_step("Two"), open_step("Three")],
        );
        assert!(session.next());
        assert!(session.next());
        assert!(!session.next());
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn enter_and_exit_hooks_fire_in_order() {
        use std::sync::{Arc, Mutex};

        let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let mk = |name: &str| {
            let enter_log = Arc::clone(&log);
            let exit_log = Arc::clone(&log);
            let enter_name = format!("enter {name}");
            let exit_name = format!("exit {name}");
            StepHost::new(StepDescriptor::new(name))
                .on_enter(move |_: &Form| enter_log.lock().expect("lock").push(enter_name.clone()))
                .on_exit(move |_: &Form| exit_log.lock().expect("lock").push(exit_name.clone()))
        };

        let mut session = WizardSession::new(Form::default(), vec![mk("a"), mk("b")]);
        session.next();
        session.prev();
        let entries = log.lock().expect("lock").clone();
        assert_eq!(
            entries,
            vec!["enter a", "exit a", "enter b", "exit b", "enter a"]
        );
    }

    #[test]
    fn only_the_active_step_renders() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let first_calls = Arc::new(AtomicUsize::new(0));
        let second_calls = Arc::new(AtomicUsize::new(0));
        let first_counter = Arc::clone(&first_calls);
        let second_counter = Arc::clone(&second_calls);

        let session = WizardSession::new(
            Form::default(),
            vec![
                StepHost::new(StepDescriptor::new("One")).render(move |_: &Form| {
                    first_counter.fetch_add(1, Ordering::SeqCst);
                    Vec::new()
                }),
                StepHost::new(StepDescriptor::new("Two")).render(move |_: &Form| {
                    second_counter.fetch_add(1, Ordering::SeqCst);
                    Vec::new()
                }),
            ],
        );

        session.active_body();
        session.active_body();
        assert_eq!(first_calls.load(Ordering::SeqCst), 2);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn positional_ids_fill_missing_ones() {
        let session = WizardSession::new(Form::default(), vec![open_step("One"), name_required()]);
        assert_eq!(session.step_id_at(0).map(|id| id.as_str()), Some("step-0"));
        assert_eq!(session.step_id_at(1).map(|id| id.as_str()), Some("basics"));
    }
}
