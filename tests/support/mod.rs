#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use portal_drawer::Terminal;

#[derive(Default)]
struct TerminalState {
    writes: String,
    columns: u16,
    rows: u16,
    screen: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    on_input: Option<Box<dyn FnMut(String) + Send>>,
    on_resize: Option<Box<dyn FnMut() + Send>>,
}

impl TerminalState {
    fn row_mut(&mut self, row: usize) -> &mut String {
        if self.screen.len() <= row {
            self.screen.resize(row + 1, String::new());
        }
        &mut self.screen[row]
    }

    fn put_text(&mut self, text: &str) {
        let col = self.cursor_col;
        let row = self.cursor_row;
        let line = self.row_mut(row);
        let mut kept: String = line.chars().take(col).collect();
        while kept.chars().count() < col {
            kept.push(' ');
        }
        let rest: String = line.chars().skip(col + text.chars().count()).collect();
        *line = format!("{kept}{text}{rest}");
        self.cursor_col += text.chars().count();
    }

    fn clear_line(&mut self) {
        let col = self.cursor_col;
        let row = self.cursor_row;
        let line = self.row_mut(row);
        *line = line.chars().take(col).collect();
    }

    /// Apply the subset of escape sequences the runtime emits.
    fn apply(&mut self, data: &str) {
        let mut rest = data;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix("\x1b[") {
                let end = after
                    .char_indices()
                    .find(|(_, ch)| ('\x40'..='\x7e').contains(ch))
                    .map(|(idx, _)| idx)
                    .unwrap_or(after.len() - 1);
                let params = &after[..end];
                let final_char = after[end..].chars().next().unwrap_or(' ');
                match (final_char, params) {
                    ('J', "2") => {
                        self.screen.clear();
                    }
                    ('H', "") => {
                        self.cursor_row = 0;
                        self.cursor_col = 0;
                    }
                    ('H', params) => {
                        let row = params
                            .split(';')
                            .next()
                            .and_then(|value| value.parse::<usize>().ok())
                            .unwrap_or(1);
                        self.cursor_row = row.saturating_sub(1);
                        self.cursor_col = 0;
                    }
                    ('K', _) => self.clear_line(),
                    _ => {}
                }
                rest = &after[end + final_char.len_utf8()..];
                continue;
            }
            let next_escape = rest.find('\x1b').unwrap_or(rest.len());
            let next_escape = if next_escape == 0 { rest.len() } else { next_escape };
            let (text, tail) = rest.split_at(next_escape);
            self.put_text(text);
            rest = tail;
        }
    }
}

/// In-memory terminal that keeps a screen model of everything written to it.
#[derive(Clone)]
pub struct HarnessTerminal {
    state: Arc<Mutex<TerminalState>>,
}

impl HarnessTerminal {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            state: Arc::new(Mutex::new(TerminalState {
                columns,
                rows,
                ..TerminalState::default()
            })),
        }
    }

    pub fn take_writes(&self) -> String {
        let mut state = self.state.lock().expect("lock terminal state for writes");
        std::mem::take(&mut state.writes)
    }

    /// Current screen rows with trailing whitespace trimmed.
    pub fn screen(&self) -> Vec<String> {
        let state = self.state.lock().expect("lock terminal state for screen");
        state
            .screen
            .iter()
            .map(|row| row.trim_end().to_string())
            .collect()
    }

    pub fn screen_text(&self) -> String {
        self.screen().join("\n")
    }

    pub fn set_size(&self, columns: u16, rows: u16) {
        let mut state = self.state.lock().expect("lock terminal state for resize");
        state.columns = columns;
        state.rows = rows;
    }

    pub fn emit_resize(&self) {
        let mut state = self
            .state
            .lock()
            .expect("lock terminal state for resize callback");
        if let Some(callback) = state.on_resize.as_mut() {
            callback();
        }
    }

    pub fn emit_input(&self, data: &str) {
        let mut state = self
            .state
            .lock()
            .expect("lock terminal state for input callback");
        if let Some(callback) = state.on_input.as_mut() {
            callback(data.to_string());
        }
    }
}

impl Terminal for HarnessTerminal {
    fn start(
        &mut self,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()> {
        let mut state = self.state.lock().expect("lock terminal state for start");
        state.on_input = Some(on_input);
        state.on_resize = Some(on_resize);
        Ok(())
    }

    fn stop(&mut self) -> std::io::Result<()> {
        let mut state = self.state.lock().expect("lock terminal state for stop");
        state.on_input = None;
        state.on_resize = None;
        Ok(())
    }

    fn write(&mut self, data: &str) {
        let mut state = self.state.lock().expect("lock terminal state for write");
        state.writes.push_str(data);
        state.apply(data);
    }

    fn columns(&self) -> u16 {
        self.state.lock().expect("lock terminal state for columns").columns
    }

    fn rows(&self) -> u16 {
        self.state.lock().expect("lock terminal state for rows").rows
    }
}

/// Lines of the mount region titled `#{id} ...`, without the border.
pub fn region(screen: &[String], id: &str) -> Vec<String> {
    let title = format!("┌ #{id} ");
    let Some(start) = screen.iter().position(|line| line.starts_with(&title)) else {
        return Vec::new();
    };
    screen[start + 1..]
        .iter()
        .take_while(|line| !line.starts_with('└'))
        .map(|line| {
            line.trim_start_matches('│')
                .trim_end_matches('│')
                .trim()
                .to_string()
        })
        .collect()
}
