//! Top-level demo screen.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::app::app_data::{AppData, AppDataProvider};
use crate::app::trigger::DrawerTrigger;
use crate::config::EnvConfig;
use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::input_event::InputEvent;
use crate::logging::log_debug;
use crate::mount::{MountRegistry, DRAWER_PORTAL_ID, DRAWER_ROOT_ID};
use crate::runtime::timer::Interval;
use crate::widgets::Text;

const HELP: &str =
    "s/enter: show   c/esc: close   r: toggle root mount   p: toggle portal mount   q: quit";

/// Owns the counter and its timer, and provides [`AppData`] to the trigger.
///
/// The timer exists only while the screen is active.
pub struct DemoScreen {
    timezone: String,
    counter: u64,
    tick_interval: Duration,
    interval: Option<Interval>,
    registry: Rc<MountRegistry>,
    help: Text,
    provider: AppDataProvider,
}

impl DemoScreen {
    pub fn new(registry: Rc<MountRegistry>, config: &EnvConfig) -> Self {
        Self::with_trigger(
            DrawerTrigger::new(Rc::clone(&registry)),
            registry,
            config,
        )
    }

    pub fn with_trigger(
        trigger: DrawerTrigger,
        registry: Rc<MountRegistry>,
        config: &EnvConfig,
    ) -> Self {
        let value = AppData {
            timezone: config.timezone.clone(),
            counter: 0,
        };
        Self {
            timezone: config.timezone.clone(),
            counter: 0,
            tick_interval: config.tick_interval,
            interval: None,
            registry,
            help: Text::new(HELP),
            provider: AppDataProvider::new(value, Box::new(trigger)),
        }
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Activate at an explicit instant; [`Component::set_active`] uses `Instant::now()`.
    pub fn activate_at(&mut self, now: Instant) {
        if self.interval.is_none() {
            self.interval = Some(Interval::new(self.tick_interval, now));
        }
    }

    fn toggle_mount(&mut self, id: &str) -> bool {
        match self.registry.toggle(id) {
            Some(attached) => {
                log_debug("screen", format!("{id} attached={attached}"));
                true
            }
            None => false,
        }
    }
}

impl Component for DemoScreen {
    fn render(&mut self, scope: &Scope, width: usize) -> Vec<String> {
        self.provider.set_value(AppData {
            timezone: self.timezone.clone(),
            counter: self.counter,
        });
        let mut lines = self.provider.render(scope, width);
        lines.push(String::new());
        lines.extend(self.help.render(scope, width));
        lines
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        if event.is_key("r") {
            return self.toggle_mount(DRAWER_ROOT_ID);
        }
        if event.is_key("p") {
            return self.toggle_mount(DRAWER_PORTAL_ID);
        }
        self.provider.handle_event(event)
    }

    fn set_active(&mut self, active: bool) {
        if active {
            self.activate_at(Instant::now());
        } else {
            self.interval = None;
        }
        self.provider.set_active(active);
    }

    fn next_deadline(&self) -> Option<Instant> {
        let own = self.interval.as_ref().map(Interval::next_due);
        match (own, self.provider.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn poll_timers(&mut self, now: Instant) -> bool {
        let mut changed = self.provider.poll_timers(now);
        if let Some(interval) = self.interval.as_mut() {
            let fired = interval.poll(now);
            if fired > 0 {
                self.counter = self.counter.saturating_add(fired);
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use super::DemoScreen;
    use crate::config::EnvConfig;
    use crate::core::component::Component;
    use crate::core::context::Scope;
    use crate::core::input_event::InputEvent;
    use crate::mount::{MountRegistry, DRAWER_PORTAL_ID, DRAWER_ROOT_ID};

    fn screen() -> (DemoScreen, Rc<MountRegistry>) {
        let registry = Rc::new(MountRegistry::with_drawer_mounts());
        let config = EnvConfig::default();
        (DemoScreen::new(Rc::clone(&registry), &config), registry)
    }

    #[test]
    fn counter_advances_only_while_active() {
        let (mut screen, _registry) = screen();
        let start = Instant::now();
        assert!(!screen.poll_timers(start + Duration::from_secs(5)));
        assert_eq!(screen.next_deadline(), None);

        screen.activate_at(start);
        assert!(screen.is_active());
        assert_eq!(screen.next_deadline(), Some(start + Duration::from_secs(1)));
        assert!(screen.poll_timers(start + Duration::from_millis(2500)));
        assert_eq!(screen.counter(), 2);

        screen.set_active(false);
        assert!(!screen.is_active());
        assert!(!screen.poll_timers(start + Duration::from_secs(10)));
        assert_eq!(screen.counter(), 2);
    }

    #[test]
    fn mount_toggles_are_handled_by_the_screen() {
        let (mut screen, registry) = screen();
        assert!(screen.handle_event(&InputEvent::key("p")));
        assert!(!registry.is_attached(DRAWER_PORTAL_ID));
        assert!(screen.handle_event(&InputEvent::key("r")));
        assert!(!registry.is_attached(DRAWER_ROOT_ID));
        assert!(screen.handle_event(&InputEvent::key("p")));
        assert!(registry.is_attached(DRAWER_PORTAL_ID));
    }

    #[test]
    fn render_includes_help_line() {
        let (mut screen, _registry) = screen();
        let lines = screen.render(&Scope::root(), 200);
        assert_eq!(lines[0], "Click this to render the drawer content");
        assert!(lines.last().unwrap().starts_with("s/enter: show"));
    }
}
