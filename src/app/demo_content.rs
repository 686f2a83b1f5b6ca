//! Drawer content that reads ambient app data.

use crate::app::app_data::AppData;
use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::element::Element;
use crate::core::text::wrap_words;

pub const APP_DATA_MISSING: &str = "Failed to get app data";

/// Shows the ambient timezone and counter, optionally under a message line.
///
/// Rendered outside an [`AppDataProvider`](crate::app::AppDataProvider) it shows
/// [`APP_DATA_MISSING`] instead.
#[derive(Debug, Clone, Default)]
pub struct DemoContent {
    message: Option<String>,
}

impl DemoContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Element creating a fresh copy of this content per mount.
    pub fn element(self) -> Element {
        Element::new("demo-content", move || self.clone())
    }
}

impl Component for DemoContent {
    fn render(&mut self, scope: &Scope, width: usize) -> Vec<String> {
        let Some(data) = scope.use_context::<AppData>() else {
            return wrap_words(APP_DATA_MISSING, width);
        };
        let mut lines = Vec::new();
        if let Some(message) = self.message.as_deref() {
            lines.extend(wrap_words(message, width));
        }
        lines.extend(wrap_words(
            &format!(
                "App Data: Timezone is {}, Counter is {}",
                data.timezone, data.counter
            ),
            width,
        ));
        lines
    }
}
