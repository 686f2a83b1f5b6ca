//! Button widget.

use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::input_event::InputEvent;
use crate::core::text::truncate_to_width;

const ACTIVATION_KEYS: [&str; 2] = ["enter", "space"];

/// A one-line `[ label ]` control.
///
/// The button is stateless: activation is reported to the owner, which decides what to do.
#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    hotkey: Option<String>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hotkey: None,
        }
    }

    /// Additional key that activates the button.
    pub fn with_hotkey(mut self, key_id: impl Into<String>) -> Self {
        self.hotkey = Some(key_id.into());
        self
    }

    pub fn is_activation(&self, event: &InputEvent) -> bool {
        let InputEvent::Key { key_id, .. } = event else {
            return false;
        };
        ACTIVATION_KEYS.contains(&key_id.as_str()) || self.hotkey.as_deref() == Some(key_id.as_str())
    }
}

impl Component for Button {
    fn render(&mut self, _scope: &Scope, width: usize) -> Vec<String> {
        let label = match self.hotkey.as_deref() {
            Some(key) => format!("[ {} ] ({key})", self.label),
            None => format!("[ {} ]", self.label),
        };
        vec![truncate_to_width(&label, width, "…")]
    }
}
