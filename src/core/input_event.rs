//! Structured input events produced by the runtime.

/// Input event delivered to components.
///
/// `key_id` is a normalized identifier for matching (`"enter"`, `"escape"`, `"ctrl+c"`,
/// `"s"`, ...). `raw` is the exact byte sequence received from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key { raw: String, key_id: String },
    Resize { columns: u16, rows: u16 },
    UnknownRaw { raw: String },
}

impl InputEvent {
    /// Convenience constructor for synthetic key presses.
    pub fn key(key_id: impl Into<String>) -> Self {
        let key_id = key_id.into();
        Self::Key {
            raw: key_id.clone(),
            key_id,
        }
    }

    /// Whether this is a key event matching `key_id`.
    pub fn is_key(&self, key_id: &str) -> bool {
        matches!(self, Self::Key { key_id: id, .. } if id == key_id)
    }
}

fn key_id_for_char(ch: char) -> Option<String> {
    let id = match ch {
        '\r' | '\n' => "enter".to_string(),
        '\x1b' => "escape".to_string(),
        '\t' => "tab".to_string(),
        ' ' => "space".to_string(),
        '\x7f' | '\x08' => "backspace".to_string(),
        '\x01'..='\x1a' => {
            let letter = (b'a' + (ch as u8 - 1)) as char;
            format!("ctrl+{letter}")
        }
        ch if !ch.is_control() => ch.to_lowercase().collect(),
        _ => return None,
    };
    Some(id)
}

/// Split a chunk of terminal input into events.
///
/// CSI sequences other than arrow keys are reported as [`InputEvent::UnknownRaw`].
pub fn parse_input_events(data: &str) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut chars = data.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch == '\x1b' {
            if let Some(&(_, '[')) = chars.peek() {
                chars.next();
                let mut end = data.len();
                while let Some((idx, next)) = chars.next() {
                    if ('\x40'..='\x7e').contains(&next) {
                        end = idx + next.len_utf8();
                        break;
                    }
                }
                let raw = &data[start..end];
                let key_id = match raw {
                    "\x1b[A" => Some("up"),
                    "\x1b[B" => Some("down"),
                    "\x1b[C" => Some("right"),
                    "\x1b[D" => Some("left"),
                    _ => None,
                };
                events.push(match key_id {
                    Some(key_id) => InputEvent::Key {
                        raw: raw.to_string(),
                        key_id: key_id.to_string(),
                    },
                    None => InputEvent::UnknownRaw {
                        raw: raw.to_string(),
                    },
                });
                continue;
            }
        }

        let raw = &data[start..start + ch.len_utf8()];
        events.push(match key_id_for_char(ch) {
            Some(key_id) => InputEvent::Key {
                raw: raw.to_string(),
                key_id,
            },
            None => InputEvent::UnknownRaw {
                raw: raw.to_string(),
            },
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::{parse_input_events, InputEvent};

    fn key_ids(data: &str) -> Vec<String> {
        parse_input_events(data)
            .into_iter()
            .map(|event| match event {
                InputEvent::Key { key_id, .. } => key_id,
                InputEvent::UnknownRaw { raw } => format!("raw:{raw:?}"),
                InputEvent::Resize { .. } => "resize".to_string(),
            })
            .collect()
    }

    #[test]
    fn printable_and_control_keys() {
        assert_eq!(key_ids("sQ \r"), vec!["s", "q", "space", "enter"]);
        assert_eq!(key_ids("\x03"), vec!["ctrl+c"]);
        assert_eq!(key_ids("\x1b"), vec!["escape"]);
    }

    #[test]
    fn arrow_sequences_are_keys_other_csi_is_raw() {
        assert_eq!(key_ids("\x1b[A\x1b[D"), vec!["up", "left"]);
        assert_eq!(key_ids("\x1b[200~"), vec!["raw:\"\\u{1b}[200~\""]);
    }

    #[test]
    fn synthetic_key_matches() {
        let event = InputEvent::key("enter");
        assert!(event.is_key("enter"));
        assert!(!event.is_key("s"));
    }
}
