use crate::runtime::command::Command;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::submit::{SubmitExecutor, SubmitHandler};
use crate::session::{WizardPhase, WizardSession};
use crate::terminal::{KeyEvent, Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use crate::ui::spinner::Spinner;
use std::io;
use std::sync::Arc;
use std::time::Duration;

const POLL_TIMEOUT: Duration = Duration::from_millis(120);

/// How a finished wizard run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    Submitted,
    Cancelled,
}

/// Owns the terminal for the lifetime of one wizard run and shuttles events
/// between it and the session. Keys go to the active step first; only keys
/// the step leaves alone fall through to the global bindings.
pub struct WizardRunner<T> {
    session: WizardSession<T>,
    terminal: Terminal,
    renderer: Renderer,
    key_bindings: KeyBindings,
    executor: SubmitExecutor,
    spinner: Spinner,
    on_submit: SubmitHandler<T>,
}

impl<T: Clone + Send + 'static> WizardRunner<T> {
    pub fn new(session: WizardSession<T>, terminal: Terminal, on_submit: SubmitHandler<T>) -> Self {
        let mut key_bindings = KeyBindings::new();
        if !session.options().allow_step_navigation {
            key_bindings.remove_jump_bindings();
        }
        Self {
            session,
            terminal,
            renderer: Renderer::default(),
            key_bindings,
            executor: SubmitExecutor::new(),
            spinner: Spinner::new(),
            on_submit,
        }
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    pub fn session(&self) -> &WizardSession<T> {
        &self.session
    }

    pub fn into_session(self) -> WizardSession<T> {
        self.session
    }

    pub fn run(&mut self) -> io::Result<WizardOutcome> {
        self.terminal.enter()?;

        let run_result = self.run_loop();

        // Restore the terminal even when the loop failed; the loop error
        // wins if both went wrong.
        let exit_result = self.terminal.exit();
        let outcome = run_result?;
        exit_result?;
        Ok(outcome)
    }

    fn run_loop(&mut self) -> io::Result<WizardOutcome> {
        self.render()?;

        loop {
            if let Some(outcome) = self.finished_outcome() {
                return Ok(outcome);
            }

            if self.drain_completions() {
                self.render()?;
                continue;
            }

            match self.terminal.poll_event(POLL_TIMEOUT)? {
                TerminalEvent::Key(key) => {
                    if self.dispatch_key(key) {
                        self.render()?;
                    }
                }
                TerminalEvent::Resize(size) => {
                    self.terminal.set_size(size);
                    self.render()?;
                }
                TerminalEvent::Tick => {
                    if self.session.is_submitting() {
                        self.spinner.tick();
                        self.render()?;
                    }
                }
            }
        }
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> bool {
        if self.session.handle_key(key) {
            return true;
        }
        match self.key_bindings.resolve(key) {
            Some(command) => self.process_command(command),
            None => false,
        }
    }

    fn process_command(&mut self, command: Command) -> bool {
        match command {
            Command::Advance => {
                if self.session.flow().is_last() {
                    self.try_submit()
                } else {
                    self.session.next()
                }
            }
            Command::Back => self.session.prev(),
            Command::Jump(index) => self.session.go_to(index),
            Command::Submit => self.try_submit(),
            Command::Cancel => self.session.cancel(),
        }
    }

    fn try_submit(&mut self) -> bool {
        let Some(snapshot) = self.session.begin_submit() else {
            return false;
        };
        self.executor.spawn(Arc::clone(&self.on_submit), snapshot);
        true
    }

    fn drain_completions(&mut self) -> bool {
        let mut delivered = false;
        for result in self.executor.drain_ready() {
            self.session.finish_submit(result);
            delivered = true;
        }
        delivered
    }

    fn finished_outcome(&self) -> Option<WizardOutcome> {
        match self.session.phase() {
            WizardPhase::Done => Some(WizardOutcome::Submitted),
            WizardPhase::Cancelled => Some(WizardOutcome::Cancelled),
            WizardPhase::Editing | WizardPhase::Submitting => None,
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self
            .renderer
            .render(&self.session, &self.spinner, self.terminal.size());
        self.terminal.render_frame(&frame)
    }
}
