use crate::ui::style::{Color, Style};

/// Styles for the wizard chrome. Step bodies pick their own styles; the
/// renderer only applies these to the frame it owns.
#[derive(Debug, Clone)]
pub struct Theme {
    pub tab_active: Style,
    pub tab_completed: Style,
    pub tab_unlocked: Style,
    pub tab_locked: Style,
    pub tab_error: Style,
    pub title: Style,
    pub description: Style,
    pub error: Style,
    pub banner: Style,
    pub controls: Style,
    pub controls_disabled: Style,
    pub hint: Style,
    pub accent: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            tab_active: Style::new().color(Color::Cyan).bold(),
            tab_completed: Style::new().color(Color::Green),
            tab_unlocked: Style::new(),
            tab_locked: Style::new().color(Color::DarkGrey).dim(),
            tab_error: Style::new().color(Color::Red),
            title: Style::new().bold(),
            description: Style::new().color(Color::DarkGrey),
            error: Style::new().color(Color::Red),
            banner: Style::new().color(Color::Red).bold(),
            controls: Style::new(),
            controls_disabled: Style::new().color(Color::DarkGrey).dim(),
            hint: Style::new().color(Color::DarkGrey),
            accent: Style::new().color(Color::Cyan),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
