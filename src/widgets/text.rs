//! Text widget.

use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::text::wrap_words;

pub struct Text {
    text: String,
    padding_x: usize,
    padding_y: usize,
    cached_text: Option<String>,
    cached_width: Option<usize>,
    cached_lines: Option<Vec<String>>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_padding(text, 0, 0)
    }

    pub fn with_padding(text: impl Into<String>, padding_x: usize, padding_y: usize) -> Self {
        Self {
            text: text.into(),
            padding_x,
            padding_y,
            cached_text: None,
            cached_width: None,
            cached_lines: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.invalidate();
    }

    fn render_lines(&mut self, width: usize) -> Vec<String> {
        if let Some(cached) = self.cached_lines.as_ref() {
            if self.cached_text.as_deref() == Some(&self.text) && self.cached_width == Some(width) {
                return cached.clone();
            }
        }

        let lines = if self.text.trim().is_empty() {
            Vec::new()
        } else {
            let normalized = self.text.replace('\t', "   ");
            let content_width = width.saturating_sub(self.padding_x * 2).max(1);
            let left_margin = " ".repeat(self.padding_x);

            let mut result = vec![String::new(); self.padding_y];
            result.extend(
                wrap_words(&normalized, content_width)
                    .into_iter()
                    .map(|line| format!("{left_margin}{line}")),
            );
            result.extend(std::iter::repeat(String::new()).take(self.padding_y));
            result
        };

        self.cached_text = Some(self.text.clone());
        self.cached_width = Some(width);
        self.cached_lines = Some(lines.clone());
        lines
    }
}

impl Component for Text {
    fn render(&mut self, _scope: &Scope, width: usize) -> Vec<String> {
        self.render_lines(width)
    }

    fn invalidate(&mut self) {
        self.cached_text = None;
        self.cached_width = None;
        self.cached_lines = None;
    }
}
