//! The publish wizard: four steps that collect a [`TemplateDraft`] and hand
//! it to a submit handler. Doubles as the reference wiring for the session
//! and step APIs.

use crate::catalog::{Difficulty, TemplateDraft};
use crate::session::{WizardOptions, WizardSession};
use crate::state::store::FormPatch;
use crate::step::descriptor::StepDescriptor;
use crate::step::host::{StepHost, StepScope};
use crate::step::outcome::StepOutcome;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const NAME_PATTERN: &str = r"^[a-z0-9]([a-z0-9\-._])*[a-z0-9]$";
const TAG_PATTERN: &str = r"^[a-z0-9][a-z0-9-]*$";
const MIN_CONTENT_CHARS: usize = 20;
const MAX_TAGS: usize = 10;

pub const LICENSES: [&str; 7] = [
    "MIT",
    "Apache-2.0",
    "GPL-3.0",
    "BSD-3-Clause",
    "ISC",
    "CC0-1.0",
    "Unlicense",
];

pub const CATEGORY_OPTIONS: [&str; 13] = [
    "Code Generation",
    "Code Review",
    "Documentation",
    "Testing",
    "Debugging",
    "Refactoring",
    "Architecture",
    "Data Analysis",
    "DevOps",
    "Security",
    "UI/UX",
    "General",
    "Other",
];

// First entry is "not set"; the field is optional.
pub const LANGUAGE_OPTIONS: [&str; 10] = [
    "",
    "TypeScript",
    "JavaScript",
    "Python",
    "Rust",
    "Go",
    "Java",
    "C#",
    "Ruby",
    "Shell",
];

/// Field-level update for a draft. Unset fields leave the draft alone, so
/// concurrent steps can each patch their own slice of the form.
#[derive(Debug, Clone, Default)]
pub struct TemplateDraftPatch {
    pub name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub language: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl FormPatch<TemplateDraft> for TemplateDraftPatch {
    fn apply_to(self, data: &mut TemplateDraft) {
        if let Some(name) = self.name {
            data.name = name;
        }
        if let Some(author) = self.author {
            data.author = author;
        }
        if let Some(description) = self.description {
            data.description = description;
        }
        if let Some(license) = self.license {
            data.license = license;
        }
        if let Some(content) = self.content {
            data.content = content;
        }
        if let Some(category) = self.category {
            data.category = category;
        }
        if let Some(difficulty) = self.difficulty {
            data.difficulty = difficulty;
        }
        if let Some(language) = self.language {
            data.language = language;
        }
        if let Some(tags) = self.tags {
            data.tags = tags;
        }
    }
}

/// Builds the four-step publish wizard with a fresh draft (license
/// prefilled to MIT, everything else empty).
pub fn build_submission_wizard() -> WizardSession<TemplateDraft> {
    let initial = TemplateDraft {
        license: "MIT".to_string(),
        ..TemplateDraft::default()
    };
    let options = WizardOptions {
        submit_label: "Create Package".to_string(),
        show_step_numbers: false,
        allow_step_navigation: true,
    };
    WizardSession::with_options(
        initial,
        vec![
            basic_info_step(),
            content_step(),
            configuration_step(),
            tags_review_step(),
        ],
        options,
    )
}

fn basic_info_step() -> StepHost<TemplateDraft> {
    let focus = Arc::new(Mutex::new(0usize));
    let focus_enter = Arc::clone(&focus);
    let focus_keys = Arc::clone(&focus);
    let focus_render = Arc::clone(&focus);
    let name_pattern = Regex::new(NAME_PATTERN).expect("valid name pattern");

    StepHost::new(
        StepDescriptor::new("Basic Info")
            .with_id("basic")
            .with_description("Package name, author, and description")
            .with_icon("▤")
            .with_fields(["name", "author", "description", "license"]),
    )
    .on_enter(move |_: &TemplateDraft| {
        *lock(&focus_enter) = 0;
    })
    .on_key(move |key: KeyEvent, scope: &mut StepScope<'_, TemplateDraft>| {
        if has_command_modifiers(key) {
            return false;
        }
        let mut focus = lock(&focus_keys);
        match key.code {
            KeyCode::Tab => {
                *focus = (*focus + 1) % 4;
                true
            }
            KeyCode::BackTab => {
                *focus = (*focus + 3) % 4;
                true
            }
            KeyCode::Up | KeyCode::Down if *focus == 3 => {
                let next = cycle_option(&LICENSES, &scope.data().license, key.code == KeyCode::Up);
                scope.update(TemplateDraftPatch {
                    license: Some(next),
                    ..TemplateDraftPatch::default()
                });
                true
            }
            KeyCode::Char(ch) if *focus < 3 => {
                let field = *focus;
                scope.update(move |draft: &mut TemplateDraft| match field {
                    0 => draft.name.push(ch),
                    1 => draft.author.push(ch),
                    _ => draft.description.push(ch),
                });
                true
            }
            KeyCode::Backspace if *focus < 3 => {
                let field = *focus;
                scope.update(move |draft: &mut TemplateDraft| {
                    match field {
                        0 => draft.name.pop(),
                        1 => draft.author.pop(),
                        _ => draft.description.pop(),
                    };
                });
                true
            }
            _ => false,
        }
    })
    .render(move |draft: &TemplateDraft| {
        let focus = *lock(&focus_render);
        vec![
            field_line("Package name", &draft.name, focus == 0),
            field_line("Author", &draft.author, focus == 1),
            field_line("Description", &draft.description, focus == 2),
            field_line("License", &draft.license, focus == 3),
            Vec::new(),
            hint_line("Tab moves between fields · ↑/↓ picks a license"),
        ]
    })
    .validate(move |draft: &TemplateDraft| {
        let mut errors = IndexMap::new();
        let name = draft.name.trim();
        if name.is_empty() {
            errors.insert("name".to_string(), "Package name is required".to_string());
        } else if !name_pattern.is_match(name) {
            errors.insert(
                "name".to_string(),
                "Package name must contain only lowercase letters, numbers, hyphens, dots, and underscores"
                    .to_string(),
            );
        }
        if draft.author.trim().is_empty() {
            errors.insert("author".to_string(), "Author is required".to_string());
        }
        if draft.description.trim().is_empty() {
            errors.insert("description".to_string(), "Description is required".to_string());
        }
        StepOutcome::with_errors(errors)
    })
}

fn content_step() -> StepHost<TemplateDraft> {
    StepHost::new(
        StepDescriptor::new("Content")
            .with_id("content")
            .with_description("Write the template body")
            .with_icon("✎")
            .with_fields(["content"]),
    )
    .on_key(
        move |key: KeyEvent, scope: &mut StepScope<'_, TemplateDraft>| {
            if has_command_modifiers(key) {
                return false;
            }
            match key.code {
                KeyCode::Char(ch) => {
                    scope.update(move |draft: &mut TemplateDraft| draft.content.push(ch));
                    true
                }
                KeyCode::Backspace => {
                    scope.update(|draft: &mut TemplateDraft| {
                        draft.content.pop();
                    });
                    true
                }
                _ => false,
            }
        },
    )
    .render(|draft: &TemplateDraft| {
        let mut lines: Vec<SpanLine> = Vec::new();
        if draft.content.is_empty() {
            lines.push(vec![Span::styled(
                "  Start typing the template body…",
                Style::new().color(Color::DarkGrey).dim(),
            )]);
        } else {
            for row in draft.content.split('\n') {
                lines.push(vec![Span::new(format!("  {row}"))]);
            }
        }
        lines.push(Vec::new());
        lines.push(vec![Span::styled(
            format!("  {} characters", draft.content.chars().count()),
            Style::new().color(Color::DarkGrey),
        )]);
        lines
    })
    .validate(|draft: &TemplateDraft| {
        let content = draft.content.trim();
        if content.is_empty() {
            StepOutcome::field_error("content", "Template content is required")
        } else if content.chars().count() < MIN_CONTENT_CHARS {
            StepOutcome::field_error(
                "content",
                format!("Template content must be at least {MIN_CONTENT_CHARS} characters"),
            )
        } else {
            StepOutcome::valid()
        }
    })
}

fn configuration_step() -> StepHost<TemplateDraft> {
    let focus = Arc::new(Mutex::new(0usize));
    let focus_enter = Arc::clone(&focus);
    let focus_keys = Arc::clone(&focus);
    let focus_render = Arc::clone(&focus);

    StepHost::new(
        StepDescriptor::new("Configuration")
            .with_id("configuration")
            .with_description("Category, difficulty, and technical details")
            .with_icon("⚙")
            .with_fields(["category", "difficulty", "language"]),
    )
    .on_enter(move |_: &TemplateDraft| {
        *lock(&focus_enter) = 0;
    })
    .on_key(move |key: KeyEvent, scope: &mut StepScope<'_, TemplateDraft>| {
        if has_command_modifiers(key) {
            return false;
        }
        let mut focus = lock(&focus_keys);
        match key.code {
            KeyCode::Tab => {
                *focus = (*focus + 1) % 3;
                true
            }
            KeyCode::BackTab => {
                *focus = (*focus + 2) % 3;
                true
            }
            KeyCode::Up | KeyCode::Down => {
                let up = key.code == KeyCode::Up;
                let patch = match *focus {
                    0 => TemplateDraftPatch {
                        category: Some(cycle_option(
                            &CATEGORY_OPTIONS,
                            &scope.data().category,
                            up,
                        )),
                        ..TemplateDraftPatch::default()
                    },
                    1 => {
                        let current = scope.data().difficulty;
                        // Three variants: two forward hops equal one back.
                        let next = if up {
                            current.cycle().cycle()
                        } else {
                            current.cycle()
                        };
                        TemplateDraftPatch {
                            difficulty: Some(next),
                            ..TemplateDraftPatch::default()
                        }
                    }
                    _ => TemplateDraftPatch {
                        language: Some(cycle_option(
                            &LANGUAGE_OPTIONS,
                            &scope.data().language,
                            up,
                        )),
                        ..TemplateDraftPatch::default()
                    },
                };
                scope.update(patch);
                true
            }
            _ => false,
        }
    })
    .render(move |draft: &TemplateDraft| {
        let focus = *lock(&focus_render);
        let category = if draft.category.is_empty() {
            "(select with ↑/↓)"
        } else {
            &draft.category
        };
        let language = if draft.language.is_empty() {
            "(none)"
        } else {
            &draft.language
        };
        vec![
            field_line("Category", category, focus == 0),
            field_line("Difficulty", draft.difficulty.label(), focus == 1),
            field_line("Language", language, focus == 2),
            Vec::new(),
            hint_line("Tab moves between fields · ↑/↓ cycles the value"),
        ]
    })
    .validate(|draft: &TemplateDraft| {
        if draft.category.trim().is_empty() {
            StepOutcome::field_error("category", "Category is required")
        } else {
            StepOutcome::valid()
        }
    })
}

fn tags_review_step() -> StepHost<TemplateDraft> {
    let pending = Arc::new(Mutex::new(String::new()));
    let pending_enter = Arc::clone(&pending);
    let pending_keys = Arc::clone(&pending);
    let pending_render = Arc::clone(&pending);
    let tag_pattern = Regex::new(TAG_PATTERN).expect("valid tag pattern");

    StepHost::new(
        StepDescriptor::new("Tags & Review")
            .with_id("tags")
            .with_description("Add tags and review before publishing")
            .with_icon("#")
            .with_fields(["tags"]),
    )
    .on_enter(move |_: &TemplateDraft| {
        lock(&pending_enter).clear();
    })
    .on_key(move |key: KeyEvent, scope: &mut StepScope<'_, TemplateDraft>| {
        if has_command_modifiers(key) {
            return false;
        }
        match key.code {
            KeyCode::Char(' ') => {
                let mut pending = lock(&pending_keys);
                let tag = pending.trim().to_string();
                pending.clear();
                drop(pending);
                if !tag.is_empty() {
                    scope.update(move |draft: &mut TemplateDraft| {
                        if !draft.tags.contains(&tag) {
                            draft.tags.push(tag);
                        }
                    });
                }
                true
            }
            KeyCode::Char(ch) => {
                lock(&pending_keys).push(ch);
                true
            }
            KeyCode::Backspace => {
                let mut pending = lock(&pending_keys);
                if pending.pop().is_none() {
                    drop(pending);
                    scope.update(|draft: &mut TemplateDraft| {
                        draft.tags.pop();
                    });
                }
                true
            }
            _ => false,
        }
    })
    .render(move |draft: &TemplateDraft| {
        let pending = lock(&pending_render).clone();
        let mut lines: Vec<SpanLine> = Vec::new();

        if draft.tags.is_empty() {
            lines.push(vec![
                Span::styled("  Tags  ", Style::new().color(Color::DarkGrey)).no_wrap(),
                Span::styled("(no tags yet)", Style::new().color(Color::DarkGrey).dim()),
            ]);
        } else {
            lines.push(vec![
                Span::styled("  Tags  ", Style::new().color(Color::DarkGrey)).no_wrap(),
                Span::new(draft.tags.join(", ")),
            ]);
        }
        lines.push(vec![
            Span::styled("  New tag  ", Style::new().color(Color::Cyan)).no_wrap(),
            Span::new(pending),
            Span::styled("▏", Style::new().color(Color::Cyan)).no_wrap(),
        ]);
        lines.push(hint_line("space adds the tag · backspace removes"));
        lines.push(Vec::new());

        lines.push(vec![Span::styled("  Review", Style::new().bold())]);
        lines.push(review_line("Name", &draft.name));
        lines.push(review_line("Author", &draft.author));
        lines.push(review_line("License", &draft.license));
        let category = format!("{} ({})", draft.category, draft.difficulty.label());
        lines.push(review_line("Category", &category));
        if !draft.language.is_empty() {
            lines.push(review_line("Language", &draft.language));
        }
        let content = format!("{} characters", draft.content.chars().count());
        lines.push(review_line("Content", &content));
        lines
    })
    .validate(move |draft: &TemplateDraft| {
        let mut errors = IndexMap::new();
        if draft.tags.is_empty() {
            errors.insert("tags".to_string(), "At least one tag is required".to_string());
        } else if draft.tags.len() > MAX_TAGS {
            errors.insert("tags".to_string(), format!("No more than {MAX_TAGS} tags"));
        } else if let Some(bad) = draft.tags.iter().find(|tag| !tag_pattern.is_match(tag)) {
            errors.insert(
                "tags".to_string(),
                format!("Tag '{bad}' must be lowercase letters, numbers, or hyphens"),
            );
        }
        StepOutcome::with_errors(errors)
    })
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn has_command_modifiers(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
}

/// Moves through `options` relative to `current`. Unknown values land on
/// the first option, which covers fields that start out unset.
fn cycle_option(options: &[&str], current: &str, up: bool) -> String {
    let position = options.iter().position(|option| *option == current);
    let next = match (position, up) {
        (Some(index), false) => (index + 1) % options.len(),
        (Some(index), true) => (index + options.len() - 1) % options.len(),
        (None, _) => 0,
    };
    options[next].to_string()
}

fn field_line(label: &str, value: &str, focused: bool) -> SpanLine {
    let marker = if focused { "▸" } else { " " };
    let label_style = if focused {
        Style::new().color(Color::Cyan).bold()
    } else {
        Style::new().color(Color::DarkGrey)
    };
    vec![
        Span::styled(format!("  {marker} {label:<13}"), label_style).no_wrap(),
        Span::new(value.to_string()),
    ]
}

fn review_line(label: &str, value: &str) -> SpanLine {
    vec![
        Span::styled(format!("    {label:<11}"), Style::new().color(Color::DarkGrey)).no_wrap(),
        Span::new(value.to_string()),
    ]
}

fn hint_line(text: &str) -> SpanLine {
    vec![Span::styled(
        format!("  {text}"),
        Style::new().color(Color::DarkGrey).dim(),
    )]
}
