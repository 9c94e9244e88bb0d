use crate::ui::span::{Span, SpanLine, WrapMode};

/// Re-flows logical lines to the terminal width. `Wrap` spans break across
/// rows at glyph boundaries; `NoWrap` spans are clipped to what fits.
pub struct Layout;

impl Layout {
    pub fn compose(lines: &[SpanLine], width: u16) -> Vec<SpanLine> {
        let width = width as usize;
        if width == 0 {
            return lines.to_vec();
        }

        let mut ctx = ComposeContext::new(width);
        for line in lines {
            ctx.place_line(line);
        }
        ctx.finish()
    }
}

struct ComposeContext {
    out: Vec<SpanLine>,
    width: usize,
    current: SpanLine,
    current_width: usize,
}

impl ComposeContext {
    fn new(width: usize) -> Self {
        Self {
            out: Vec::new(),
            width,
            current: SpanLine::new(),
            current_width: 0,
        }
    }

    fn place_line(&mut self, line: &SpanLine) {
        for span in line {
            if span.width() == 0 {
                continue;
            }
            match span.wrap_mode {
                WrapMode::NoWrap => self.place_no_wrap(span),
                WrapMode::Wrap => self.place_wrap(span.clone()),
            }
        }
        self.new_row();
    }

    fn place_no_wrap(&mut self, span: &Span) {
        let span_width = span.width();
        if self.current_width > 0 && span_width > self.available() {
            self.new_row();
        }

        let (head, _) = if span_width > self.width {
            span.split_at_width(self.width)
        } else {
            (span.clone(), None)
        };
        self.push(head);
    }

    fn place_wrap(&mut self, mut span: Span) {
        while span.width() > 0 {
            if self.current_width >= self.width {
                self.new_row();
            }

            let available = self.available();
            if span.width() <= available {
                self.push(span);
                return;
            }

            let (head, tail) = span.split_at_width(available);
            if head.width() > 0 {
                self.push(head);
            }
            self.new_row();

            match tail {
                Some(rest) => span = rest,
                None => return,
            }
        }
    }

    fn push(&mut self, span: Span) {
        self.current_width += span.width();
        self.current.push(span);
    }

    fn new_row(&mut self) {
        self.out.push(std::mem::take(&mut self.current));
        self.current_width = 0;
    }

    fn available(&self) -> usize {
        self.width.saturating_sub(self.current_width)
    }

    fn finish(mut self) -> Vec<SpanLine> {
        if !self.current.is_empty() {
            self.out.push(self.current);
        }
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &SpanLine) -> String {
        line.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn short_lines_pass_through() {
        let lines = vec![vec![Span::new("hello")], vec![]];
        let out = Layout::compose(&lines, 10);
        assert_eq!(out.len(), 2);
        assert_eq!(text_of(&out[0]), "hello");
        assert!(out[1].is_empty());
    }

    #[test]
    fn wrap_spans_break_across_rows() {
        let lines = vec![vec![Span::new("abcdefgh")]];
        let out = Layout::compose(&lines, 3);
        let rows: Vec<String> = out.iter().map(text_of).collect();
        assert_eq!(rows, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn no_wrap_spans_are_clipped() {
        let lines = vec![vec![Span::new("abcdefgh").no_wrap()]];
        let out = Layout::compose(&lines, 4);
        assert_eq!(out.len(), 1);
        assert_eq!(text_of(&out[0]), "abcd");
    }

    #[test]
    fn no_wrap_span_moves_to_next_row_when_crowded() {
        let lines = vec![vec![Span::new("ab"), Span::new("cde").no_wrap()]];
        let out = Layout::compose(&lines, 4);
        let rows: Vec<String> = out.iter().map(text_of).collect();
        assert_eq!(rows, vec!["ab", "cde"]);
    }
}
