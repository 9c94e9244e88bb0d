use crate::ui::span::Span;
use crate::ui::style::Style;

const FRAMES: &[char] = &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

/// In-flight indicator for the submitting state. Advanced once per loop
/// tick while a submission is running.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: u8,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len() as u8;
    }

    pub fn glyph(&self) -> char {
        FRAMES[self.frame as usize % FRAMES.len()]
    }

    pub fn span(&self, style: Style) -> Span {
        Span::styled(self.glyph().to_string(), style).no_wrap()
    }
}
