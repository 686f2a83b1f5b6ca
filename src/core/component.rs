//! Component trait.

use std::time::Instant;

use crate::core::context::Scope;
use crate::core::input_event::InputEvent;

/// Renderable component interface.
pub trait Component {
    /// Render to a list of lines at the given width.
    ///
    /// `scope` carries the ambient context visible at this component's position in the
    /// logical tree. Containers pass it (or a scope derived from it) to their children.
    fn render(&mut self, scope: &Scope, width: usize) -> Vec<String>;

    /// Handle input events. Returns whether the event changed anything worth a render.
    fn handle_event(&mut self, _event: &InputEvent) -> bool {
        false
    }

    /// Invalidate any cached state.
    fn invalidate(&mut self) {}

    /// Called by the runtime when the component becomes (in)active.
    ///
    /// Components that own timers create them on activation and drop them on deactivation.
    fn set_active(&mut self, _active: bool) {}

    /// Earliest instant at which [`Component::poll_timers`] has work to do.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }

    /// Fire elapsed timers. Returns whether state changed.
    fn poll_timers(&mut self, _now: Instant) -> bool {
        false
    }
}
