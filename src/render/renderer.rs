//! Diff renderer.
//!
//! Full-screen: row `i` of the frame is drawn on terminal row `i`. Lines beyond the
//! terminal height are cut. The first frame and any size change redraw everything;
//! after that only rows whose text changed are rewritten.

use crate::core::output::TerminalCmd;
use crate::core::text::truncate_to_width;
use crate::logging::log_debug_redraw;

#[derive(Debug, Default)]
pub struct DiffRenderer {
    previous_lines: Vec<String>,
    previous_size: Option<(usize, usize)>,
    full_redraws: usize,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of full redraws performed so far.
    pub fn full_redraws(&self) -> usize {
        self.full_redraws
    }

    /// Forget the previous frame so the next render redraws everything.
    pub fn reset(&mut self) {
        self.previous_lines.clear();
        self.previous_size = None;
    }

    pub fn render(&mut self, lines: &[String], width: usize, height: usize) -> Vec<TerminalCmd> {
        let visible: Vec<String> = lines
            .iter()
            .take(height)
            .map(|line| truncate_to_width(line, width, ""))
            .collect();

        let mut cmds = Vec::new();
        match self.previous_size {
            Some(size) if size == (width, height) => {
                let rows = visible.len().max(self.previous_lines.len());
                for row in 0..rows {
                    let next = visible.get(row);
                    if next == self.previous_lines.get(row) {
                        continue;
                    }
                    cmds.push(TerminalCmd::MoveTo { row });
                    if let Some(line) = next {
                        cmds.push(TerminalCmd::bytes(line.clone()));
                    }
                    cmds.push(TerminalCmd::ClearLine);
                }
                if !cmds.is_empty() {
                    cmds.insert(0, TerminalCmd::SyncStart);
                    cmds.push(TerminalCmd::SyncEnd);
                }
            }
            previous => {
                let reason = if previous.is_none() {
                    "first render"
                } else {
                    "terminal size changed"
                };
                log_debug_redraw(reason, self.previous_lines.len(), visible.len(), height);
                self.full_redraws += 1;
                cmds.push(TerminalCmd::SyncStart);
                cmds.push(TerminalCmd::ClearScreen);
                for (row, line) in visible.iter().enumerate() {
                    cmds.push(TerminalCmd::MoveTo { row });
                    cmds.push(TerminalCmd::bytes(line.clone()));
                }
                cmds.push(TerminalCmd::SyncEnd);
            }
        }

        self.previous_lines = visible;
        self.previous_size = Some((width, height));
        cmds
    }
}
