//! Bordered panel with a title row.

use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::text::{pad_to_width, truncate_to_width, visible_width};

/// Draws `lines` inside a single-line border titled `title`.
///
/// Panels are layout only: they do not own children, the caller renders content first
/// and hands the lines over. Empty content still draws the frame.
pub struct Panel {
    title: String,
    lines: Vec<String>,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    fn top_border(&self, width: usize) -> String {
        let inner = width.saturating_sub(2);
        let title = truncate_to_width(&format!(" {} ", self.title), inner, "…");
        let fill = inner.saturating_sub(visible_width(&title));
        format!("┌{title}{}┐", "─".repeat(fill))
    }
}

impl Component for Panel {
    fn render(&mut self, _scope: &Scope, width: usize) -> Vec<String> {
        if width < 4 {
            return self.lines.clone();
        }
        let inner = width - 4;
        let mut out = Vec::with_capacity(self.lines.len() + 2);
        out.push(self.top_border(width));
        for line in &self.lines {
            out.push(format!("│ {} │", pad_to_width(line, inner)));
        }
        out.push(format!("└{}┘", "─".repeat(width - 2)));
        out
    }
}
