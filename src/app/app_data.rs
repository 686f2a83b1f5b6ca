//! Ambient application data and its provider.

use std::time::Instant;

use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::input_event::InputEvent;

/// Snapshot of app-wide values, fixed for the duration of one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppData {
    pub timezone: String,
    pub counter: u64,
}

/// Renders its child with [`AppData`] provided in scope.
pub struct AppDataProvider {
    value: AppData,
    child: Box<dyn Component>,
}

impl AppDataProvider {
    pub fn new(value: AppData, child: Box<dyn Component>) -> Self {
        Self { value, child }
    }

    pub fn set_value(&mut self, value: AppData) {
        self.value = value;
    }

    pub fn value(&self) -> &AppData {
        &self.value
    }
}

impl Component for AppDataProvider {
    fn render(&mut self, scope: &Scope, width: usize) -> Vec<String> {
        let scope = scope.provide(self.value.clone());
        self.child.render(&scope, width)
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.child.handle_event(event)
    }

    fn invalidate(&mut self) {
        self.child.invalidate();
    }

    fn set_active(&mut self, active: bool) {
        self.child.set_active(active);
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.child.next_deadline()
    }

    fn poll_timers(&mut self, now: Instant) -> bool {
        self.child.poll_timers(now)
    }
}
