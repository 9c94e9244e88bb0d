use crate::session::{WizardPhase, WizardSession};
use crate::state::flow::StepStatus;
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::layout::Layout;
use crate::ui::span::{Span, SpanLine};
use crate::ui::spinner::Spinner;
use crate::ui::theme::Theme;

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

/// Draws the wizard chrome around the active step's body: tab bar, header,
/// field errors, submission banner, controls and hints. Reads session state
/// only; nothing here mutates.
pub struct Renderer {
    theme: Theme,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default_theme())
    }
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render<T>(
        &self,
        session: &WizardSession<T>,
        spinner: &Spinner,
        size: TerminalSize,
    ) -> RenderFrame {
        let mut lines: Vec<SpanLine> = Vec::new();

        lines.push(self.tab_line(session));
        lines.push(Vec::new());

        if let Some(descriptor) = session.current_descriptor() {
            lines.push(vec![Span::styled(
                descriptor.title().to_string(),
                self.theme.title,
            )]);
            if let Some(description) = descriptor.description() {
                lines.push(vec![Span::styled(
                    description.to_string(),
                    self.theme.description,
                )]);
            }
            lines.push(Vec::new());
        }

        lines.extend(session.active_body());

        if let Some(errors) = session.current_errors()
            && !errors.is_empty()
        {
            lines.push(Vec::new());
            for message in errors.values() {
                lines.push(vec![Span::styled(
                    format!("  ! {}", message),
                    self.theme.error,
                )]);
            }
        }

        if let Some(error) = session.submit_error() {
            lines.push(Vec::new());
            lines.push(vec![Span::styled(
                format!("✗ {}", error),
                self.theme.banner,
            )]);
        }

        lines.push(Vec::new());
        lines.push(self.controls_line(session, spinner));
        lines.push(vec![Span::styled(hint_text(session), self.theme.hint).no_wrap()]);

        RenderFrame {
            lines: Layout::compose(&lines, size.width),
            cursor: None,
        }
    }

    fn tab_line<T>(&self, session: &WizardSession<T>) -> SpanLine {
        let mut line = SpanLine::new();
        for index in 0..session.step_count() {
            if index > 0 {
                line.push(Span::new("  ").no_wrap());
            }

            let status = session.step_status(index);
            let marked_invalid = session
                .step_id_at(index)
                .is_some_and(|id| session.registry().is_marked_invalid(id.as_str()));

            let style = match status {
                StepStatus::Active => self.theme.tab_active,
                _ if marked_invalid => self.theme.tab_error,
                StepStatus::Completed => self.theme.tab_completed,
                StepStatus::Unlocked => self.theme.tab_unlocked,
                StepStatus::Locked => self.theme.tab_locked,
            };

            let glyph = self.tab_glyph(session, index, status);
            let title = session
                .descriptor_at(index)
                .map(|d| d.title().to_string())
                .unwrap_or_default();
            line.push(Span::styled(format!("{} {}", glyph, title), style).no_wrap());
        }
        line
    }

    fn tab_glyph<T>(
        &self,
        session: &WizardSession<T>,
        index: usize,
        status: StepStatus,
    ) -> String {
        if status == StepStatus::Completed {
            return "✓".to_string();
        }
        if let Some(icon) = session.descriptor_at(index).and_then(|d| d.icon()) {
            return icon.to_string();
        }
        if session.options().show_step_numbers {
            format!("{}", index + 1)
        } else {
            "•".to_string()
        }
    }

    fn controls_line<T>(&self, session: &WizardSession<T>, spinner: &Spinner) -> SpanLine {
        let mut line = SpanLine::new();

        let prev_style = if session.can_go_backward() {
            self.theme.controls
        } else {
            self.theme.controls_disabled
        };
        line.push(Span::styled("← Previous", prev_style).no_wrap());
        line.push(Span::new("   ").no_wrap());

        line.push(
            Span::styled(
                format!(
                    "Step {} of {}",
                    session.current_index() + 1,
                    session.step_count()
                ),
                self.theme.controls,
            )
            .no_wrap(),
        );
        line.push(Span::new("   ").no_wrap());

        if session.phase() == WizardPhase::Submitting {
            line.push(spinner.span(self.theme.accent));
            line.push(Span::styled(" Submitting…", self.theme.accent).no_wrap());
        } else if session.flow().is_last() {
            let style = if session.can_submit() {
                self.theme.controls
            } else {
                self.theme.controls_disabled
            };
            line.push(Span::styled(session.options().submit_label.clone(), style).no_wrap());
        } else {
            let style = if session.can_go_forward() {
                self.theme.controls
            } else {
                self.theme.controls_disabled
            };
            line.push(Span::styled("Next →", style).no_wrap());
        }

        line
    }
}

fn hint_text<T>(session: &WizardSession<T>) -> String {
    let mut parts = vec![if session.flow().is_last() {
        "Enter submit"
    } else {
        "Enter next"
    }];
    parts.push("Alt+←/→ move");
    if session.options().allow_step_navigation {
        parts.push("Alt+1..9 jump");
    }
    parts.push("Esc cancel");
    parts.join(" · ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::descriptor::StepDescriptor;
    use crate::step::host::StepHost;
    use crate::step::outcome::StepOutcome;

    #[derive(Debug, Default, Clone)]
    struct Form {
        name: String,
    }

    fn frame_text(frame: &RenderFrame) -> String {
        frame
            .lines
            .iter()
            .map(|line| {
                line.iter()
                    .map(|span| span.text.as_str())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn session() -> WizardSession<Form> {
        WizardSession::new(
            Form::default(),
            vec![
                StepHost::new(
                    StepDescriptor::new("Basics")
                        .with_id("basics")
                        .with_description("Name the package"),
                )
                .validate(|form: &Form| {
                    if form.name.is_empty() {
                        StepOutcome::field_error("name", "Name is required")
                    } else {
                        StepOutcome::valid()
                    }
                })
                .render(|form: &Form| vec![vec![Span::new(format!("Name: {}", form.name))]]),
                StepHost::new(StepDescriptor::new("Review").with_id("review")),
            ],
        )
    }

    fn wide() -> TerminalSize {
        TerminalSize {
            width: 120,
            height: 40,
        }
    }

    #[test]
    fn frame_shows_tabs_header_body_and_errors() {
        let session = session();
        let renderer = Renderer::default();
        let text = frame_text(&renderer.render(&session, &Spinner::new(), wide()));

        assert!(text.contains("1 Basics"));
        assert!(text.contains("2 Review"));
        assert!(text.contains("Name the package"));
        assert!(text.contains("Name: "));
        assert!(text.contains("! Name is required"));
        assert!(text.contains("Step 1 of 2"));
        assert!(text.contains("Next →"));
    }

    #[test]
    fn completed_steps_show_a_check() {
        let mut session = session();
        session.update(|form: &mut Form| form.name = "pkg".into());
        session.next();
        let renderer = Renderer::default();
        let text = frame_text(&renderer.render(&session, &Spinner::new(), wide()));
        assert!(text.contains("✓ Basics"));
        assert!(text.contains("Submit"));
        assert!(text.contains("Enter submit"));
    }

    #[test]
    fn submitting_shows_the_spinner_state() {
        let mut session = session();
        session.update(|form: &mut Form| form.name = "pkg".into());
        session.next();
        session.begin_submit().expect("submit");
        let renderer = Renderer::default();
        let text = frame_text(&renderer.render(&session, &Spinner::new(), wide()));
        assert!(text.contains("Submitting…"));
    }

    #[test]
    fn submit_failure_banner_is_rendered() {
        let mut session = session();
        session.update(|form: &mut Form| form.name = "pkg".into());
        session.next();
        session.begin_submit().expect("submit");
        session.finish_submit(Err(crate::error::SubmitError::new("boom")));
        let renderer = Renderer::default();
        let text = frame_text(&renderer.render(&session, &Spinner::new(), wide()));
        assert!(text.contains("✗ boom"));
    }

    #[test]
    fn icons_and_plain_bullets_replace_numbers_when_disabled() {
        use crate::session::WizardOptions;

        let session = WizardSession::with_options(
            Form::default(),
            vec![
                StepHost::new(StepDescriptor::new("Basics").with_icon("◆")),
                StepHost::new(StepDescriptor::new("Review")),
            ],
            WizardOptions {
                show_step_numbers: false,
                ..Default::default()
            },
        );
        let renderer = Renderer::default();
        let text = frame_text(&renderer.render(&session, &Spinner::new(), wide()));
        assert!(text.contains("◆ Basics"));
        assert!(text.contains("• Review"));
    }
}
