//! Simple container widget.

use std::time::Instant;

use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::input_event::InputEvent;

/// Vertical stack of children sharing the container's scope.
#[derive(Default)]
pub struct Container {
    children: Vec<Box<dyn Component>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_child(&mut self, component: Box<dyn Component>) {
        self.children.push(component);
    }

    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn Component>> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Component for Container {
    fn render(&mut self, scope: &Scope, width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        for child in self.children.iter_mut() {
            lines.extend(child.render(scope, width));
        }
        lines
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        let mut changed = false;
        for child in self.children.iter_mut() {
            changed |= child.handle_event(event);
        }
        changed
    }

    fn invalidate(&mut self) {
        for child in self.children.iter_mut() {
            child.invalidate();
        }
    }

    fn set_active(&mut self, active: bool) {
        for child in self.children.iter_mut() {
            child.set_active(active);
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.children
            .iter()
            .filter_map(|child| child.next_deadline())
            .min()
    }

    fn poll_timers(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for child in self.children.iter_mut() {
            changed |= child.poll_timers(now);
        }
        changed
    }
}
