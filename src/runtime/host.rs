//! Host document: the app root region followed by the foreign mount regions.

use std::rc::Rc;
use std::time::Instant;

use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::input_event::InputEvent;
use crate::mount::MountRegistry;
use crate::widgets::Panel;

pub const APP_ROOT_ID: &str = "app";

/// Composes the terminal frame.
///
/// The app is rendered first; portals write their mount points during that pass, so the
/// mount regions drawn afterwards reflect the same frame. Detached mount points are
/// not drawn.
pub struct HostDocument {
    app: Box<dyn Component>,
    registry: Rc<MountRegistry>,
}

impl HostDocument {
    pub fn new(app: Box<dyn Component>, registry: Rc<MountRegistry>) -> Self {
        Self { app, registry }
    }

    pub fn registry(&self) -> &Rc<MountRegistry> {
        &self.registry
    }
}

impl Component for HostDocument {
    fn render(&mut self, scope: &Scope, width: usize) -> Vec<String> {
        let inner = width.saturating_sub(4).max(1);

        let mut app_panel = Panel::new(format!("#{APP_ROOT_ID}"));
        app_panel.set_lines(self.app.render(scope, inner));
        let mut lines = app_panel.render(scope, width);

        for (label, point) in self.registry.attached_points() {
            let mut panel = Panel::new(format!("#{} ({label})", point.id()));
            panel.set_lines(point.lines());
            lines.extend(panel.render(scope, width));
        }
        lines
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.app.handle_event(event)
    }

    fn invalidate(&mut self) {
        self.app.invalidate();
    }

    fn set_active(&mut self, active: bool) {
        self.app.set_active(active);
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.app.next_deadline()
    }

    fn poll_timers(&mut self, now: Instant) -> bool {
        self.app.poll_timers(now)
    }
}
