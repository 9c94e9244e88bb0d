// End-to-end runs of the publish wizard through the public API: filling the
// four demo steps, submitting on a worker thread and recovering from a
// failed submission. No terminal is opened; the session, executor and
// renderer are exercised directly.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use formflow::catalog::TemplateDraft;
use formflow::demo::{self, TemplateDraftPatch};
use formflow::error::SubmitError;
use formflow::runtime::{SubmitExecutor, SubmitHandler};
use formflow::session::{WizardPhase, WizardSession};
use formflow::state::StepStatus;
use formflow::step::{StepDescriptor, StepHost, StepOutcome};
use formflow::terminal::{KeyCode, KeyEvent, TerminalSize};
use formflow::ui::{Renderer, Spinner};

fn type_text(session: &mut WizardSession<TemplateDraft>, text: &str) {
    for ch in text.chars() {
        session.handle_key(KeyEvent::plain(KeyCode::Char(ch)));
    }
}

/// Fills the first three steps with a valid draft and advances to the
/// tags step, leaving the tag list empty.
fn walk_to_tags(session: &mut WizardSession<TemplateDraft>) {
    session.update(TemplateDraftPatch {
        name: Some("commit-helper".into()),
        author: Some("ada".into()),
        description: Some("Writes tidy commit messages".into()),
        ..TemplateDraftPatch::default()
    });
    assert!(session.next(), "basic info should unlock the next step");

    session.update(TemplateDraftPatch {
        content: Some("You are a careful release engineer assistant.".into()),
        ..TemplateDraftPatch::default()
    });
    assert!(session.next(), "content should unlock the next step");

    session.update(TemplateDraftPatch {
        category: Some("Documentation".into()),
        ..TemplateDraftPatch::default()
    });
    assert!(session.next(), "configuration should unlock the final step");
}

fn filled_session() -> WizardSession<TemplateDraft> {
    let mut session = demo::build_submission_wizard();
    walk_to_tags(&mut session);
    session.update(TemplateDraftPatch {
        tags: Some(vec!["rust".into(), "git".into()]),
        ..TemplateDraftPatch::default()
    });
    session
}

fn drain_one(executor: &SubmitExecutor) -> Result<(), SubmitError> {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(result) = executor.drain_ready().pop() {
            return result;
        }
        assert!(Instant::now() < deadline, "no submit completion within 5s");
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn the_demo_wizard_publishes_through_the_executor() {
    let mut session = filled_session();
    assert!(session.can_submit());

    let published: Arc<Mutex<Option<TemplateDraft>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&published);
    let handler: SubmitHandler<TemplateDraft> = Arc::new(move |draft| {
        *sink.lock().expect("publish sink") = Some(draft);
        Ok(())
    });

    let executor = SubmitExecutor::new();
    let snapshot = session.begin_submit().expect("submit snapshot");
    assert!(session.is_submitting());
    executor.spawn(handler, snapshot);

    session.finish_submit(drain_one(&executor));
    assert_eq!(session.phase(), WizardPhase::Done);

    let draft = published
        .lock()
        .expect("publish sink")
        .take()
        .expect("handler saw the draft");
    assert_eq!(draft.name, "commit-helper");
    assert_eq!(draft.license, "MIT");
    assert_eq!(draft.tags, vec!["rust".to_string(), "git".to_string()]);
}

#[test]
fn a_failed_submission_keeps_the_draft_for_a_retry() {
    let mut session = filled_session();
    let executor = SubmitExecutor::new();

    let failing: SubmitHandler<TemplateDraft> =
        Arc::new(|_| Err(SubmitError::new("catalog rejected the draft")));
    let snapshot = session.begin_submit().expect("submit snapshot");
    executor.spawn(failing, snapshot);
    session.finish_submit(drain_one(&executor));

    assert_eq!(session.phase(), WizardPhase::Editing);
    assert_eq!(session.current_index(), 3, "retries stay on the last step");
    assert_eq!(session.submit_error(), Some("catalog rejected the draft"));
    assert_eq!(session.data().name, "commit-helper");

    let succeeding: SubmitHandler<TemplateDraft> = Arc::new(|_| Ok(()));
    let snapshot = session.begin_submit().expect("retry snapshot");
    assert!(session.submit_error().is_none(), "retry clears the banner");
    executor.spawn(succeeding, snapshot);
    session.finish_submit(drain_one(&executor));
    assert_eq!(session.phase(), WizardPhase::Done);
}

#[test]
fn completed_steps_stay_reachable_for_jumps() {
    let mut session = filled_session();
    assert_eq!(session.step_status(0), StepStatus::Completed);
    assert_eq!(session.step_status(3), StepStatus::Active);

    assert!(session.go_to(0), "the first step is always reachable");
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.step_status(3), StepStatus::Unlocked);

    assert!(session.go_to(3), "its predecessor was completed earlier");
    assert!(session.go_to(1));
    assert!(!session.go_to(9), "out-of-range jumps are dropped");
    assert_eq!(session.current_index(), 1);
}

#[test]
fn tags_typed_at_the_keyboard_commit_on_space() {
    let mut session = demo::build_submission_wizard();
    walk_to_tags(&mut session);
    assert!(!session.can_submit(), "at least one tag is required");

    type_text(&mut session, "rust workflow ");
    assert_eq!(
        session.data().tags,
        vec!["rust".to_string(), "workflow".to_string()]
    );
    assert!(session.can_submit());
}

#[test]
fn the_chrome_renders_without_a_terminal() {
    let session = filled_session();
    let frame = Renderer::default().render(
        &session,
        &Spinner::new(),
        TerminalSize {
            width: 80,
            height: 24,
        },
    );

    let text: String = frame
        .lines
        .iter()
        .flat_map(|line| line.iter().map(|span| span.text.as_str()))
        .collect();
    assert!(text.contains("Tags & Review"));
    assert!(text.contains("Create Package"));
}

#[test]
fn the_engine_hosts_other_form_types_unchanged() {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Signup {
        email: String,
        accepted_terms: bool,
    }

    let steps = vec![
        StepHost::new(StepDescriptor::new("Account").with_id("account")).validate(
            |form: &Signup| {
                if form.email.contains('@') {
                    StepOutcome::valid()
                } else {
                    StepOutcome::field_error("email", "Enter a valid email address")
                }
            },
        ),
        StepHost::new(StepDescriptor::new("Terms").with_id("terms")).validate(|form: &Signup| {
            if form.accepted_terms {
                StepOutcome::valid()
            } else {
                StepOutcome::field_error("terms", "You must accept the terms")
            }
        }),
    ];
    let mut session = WizardSession::new(Signup::default(), steps);

    assert!(!session.can_go_forward());
    session.update(|form: &mut Signup| form.email = "ada@example.com".into());
    assert!(session.next());

    assert!(!session.can_submit());
    session.update(|form: &mut Signup| form.accepted_terms = true);
    assert!(session.can_submit());

    let snapshot = session.begin_submit().expect("submit snapshot");
    assert_eq!(snapshot.email, "ada@example.com");
    session.finish_submit(Ok(()));
    assert!(session.is_finished());
}
