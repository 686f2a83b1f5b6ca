//! The control that opens the drawer, plus the drawer's projection value.

use std::rc::Rc;

use crate::app::demo_content::DemoContent;
use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::element::Element;
use crate::core::input_event::InputEvent;
use crate::drawer::{Drawer, DrawerData};
use crate::mount::MountRegistry;
use crate::widgets::{Button, Container, Text};

const PROMPT: &str = "Click this to render the drawer content";

/// Prompt, "Show Dialog" button and the drawer's projection.
///
/// The projection is rendered last, under this component's scope, which is what keeps
/// the portal's content subscribed to the ambient app data.
pub struct DrawerTrigger {
    header: Container,
    button: Button,
    drawer: Drawer,
    content: Element,
}

impl DrawerTrigger {
    pub fn new(registry: Rc<MountRegistry>) -> Self {
        Self::with_content(registry, DemoContent::new().element())
    }

    /// Trigger that shows `content` instead of the default [`DemoContent`].
    pub fn with_content(registry: Rc<MountRegistry>, content: Element) -> Self {
        let button = Button::new("Show Dialog").with_hotkey("s");
        let mut header = Container::new();
        header.add_child(Box::new(Text::new(PROMPT)));
        header.add_child(Box::new(button.clone()));
        Self {
            header,
            button,
            drawer: Drawer::new(registry),
            content,
        }
    }

    pub fn drawer(&self) -> &Drawer {
        &self.drawer
    }

    /// What the button does.
    pub fn activate(&mut self) {
        self.drawer.show(DrawerData::new(self.content.clone()));
    }
}

impl Component for DrawerTrigger {
    fn render(&mut self, scope: &Scope, width: usize) -> Vec<String> {
        self.drawer.sync(width);

        let mut lines = self.header.render(scope, width);
        lines.extend(self.drawer.portal_elem().render(scope, width));
        lines
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        if self.button.is_activation(event) {
            self.activate();
            return true;
        }
        if event.is_key("c") || event.is_key("escape") {
            if self.drawer.is_open() {
                self.drawer.close();
                return true;
            }
            return false;
        }
        self.drawer.portal_elem().handle_event(event)
    }
}
