use crate::ui::style::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    Wrap,
    NoWrap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
    pub wrap_mode: WrapMode,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
            wrap_mode: WrapMode::Wrap,
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            wrap_mode: WrapMode::Wrap,
        }
    }

    pub fn no_wrap(mut self) -> Self {
        self.wrap_mode = WrapMode::NoWrap;
        self
    }

    pub fn width(&self) -> usize {
        self.text.as_str().width()
    }

    /// Splits so the head fits in `max` columns. Wide glyphs never straddle
    /// the boundary.
    pub fn split_at_width(&self, max: usize) -> (Span, Option<Span>) {
        if max == 0 {
            return (self.with_text(""), Some(self.clone()));
        }
        if self.width() <= max {
            return (self.clone(), None);
        }

        let mut used = 0;
        let mut split_idx = 0;
        for (idx, ch) in self.text.char_indices() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > max {
                break;
            }
            used += ch_width;
            split_idx = idx + ch.len_utf8();
        }

        let (head, tail) = self.text.split_at(split_idx);
        let rest = if tail.is_empty() {
            None
        } else {
            Some(self.with_text(tail))
        };
        (self.with_text(head), rest)
    }

    fn with_text(&self, text: &str) -> Span {
        Span {
            text: text.to_string(),
            style: self.style,
            wrap_mode: self.wrap_mode,
        }
    }
}

pub type SpanLine = Vec<Span>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_full_span_when_it_fits() {
        let span = Span::new("abc");
        let (head, tail) = span.split_at_width(5);
        assert_eq!(head.text, "abc");
        assert!(tail.is_none());
    }

    #[test]
    fn split_respects_wide_glyph_boundaries() {
        let span = Span::new("a漢b");
        let (head, tail) = span.split_at_width(2);
        assert_eq!(head.text, "a");
        assert_eq!(tail.expect("tail").text, "漢b");
    }

    #[test]
    fn split_at_zero_yields_empty_head() {
        let span = Span::new("xy");
        let (head, tail) = span.split_at_width(0);
        assert!(head.text.is_empty());
        assert_eq!(tail.expect("tail").text, "xy");
    }
}
