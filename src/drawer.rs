//! The drawer: requested content mirrored into two mount points.
//!
//! Every change of the requested content (including the initial "nothing shown") runs
//! one effect that re-resolves both mount points and re-attaches the content:
//! - `drawer-root-id` through an [`IsolatedRoot`], rendered immediately, no scope;
//! - `drawer-portal-id` through a [`Portal`], returned as the projection value which the
//!   owner renders in its own tree position, under its own scope.
//!
//! A missing portal mount point turns the projection into a visible notice. A missing
//! root mount point is skipped without a notice.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::element::Element;
use crate::core::input_event::InputEvent;
use crate::logging::log_debug;
use crate::mount::{
    attach, IsolatedRoot, MountRegistry, MountStrategy, Portal, DRAWER_PORTAL_ID, DRAWER_ROOT_ID,
};
use crate::widgets::Text;

pub const PORTAL_MOUNT_MISSING: &str = "Failed to find portal mount point";

/// Content requested through [`Drawer::show`].
#[derive(Clone, Debug)]
pub struct DrawerData {
    pub content: Element,
}

impl DrawerData {
    pub fn new(content: Element) -> Self {
        Self { content }
    }
}

/// Wrapper every attachment renders: the requested content, or nothing.
pub struct ContentWrapper {
    child: Option<Box<dyn Component>>,
}

impl ContentWrapper {
    pub fn element(content: Option<Element>) -> Element {
        Element::new("drawer-content", move || ContentWrapper {
            child: content.as_ref().map(Element::instantiate),
        })
    }
}

impl Component for ContentWrapper {
    fn render(&mut self, scope: &Scope, width: usize) -> Vec<String> {
        match self.child.as_mut() {
            Some(child) => child.render(scope, width),
            None => Vec::new(),
        }
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.child
            .as_mut()
            .is_some_and(|child| child.handle_event(event))
    }
}

/// The projection value handed back to the drawer's owner.
pub enum Projection {
    /// The effect has not run yet.
    Pending,
    Portal(Portal),
    /// Portal mount point could not be resolved.
    Fallback(Text),
}

impl Projection {
    pub fn is_portal(&self) -> bool {
        matches!(self, Self::Portal(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

impl Component for Projection {
    fn render(&mut self, scope: &Scope, width: usize) -> Vec<String> {
        match self {
            Self::Pending => Vec::new(),
            Self::Portal(portal) => portal.render(scope, width),
            Self::Fallback(notice) => notice.render(scope, width),
        }
    }

    fn handle_event(&mut self, event: &InputEvent) -> bool {
        match self {
            Self::Portal(portal) => portal.handle_event(event),
            Self::Pending | Self::Fallback(_) => false,
        }
    }
}

struct DrawerState {
    requested: Option<DrawerData>,
    version: u64,
    applied_version: Option<u64>,
    effect_runs: u64,
}

impl DrawerState {
    fn set_requested(&mut self, requested: Option<DrawerData>) {
        self.requested = requested;
        self.version = self.version.wrapping_add(1);
    }
}

/// Cloneable `show` / `close` for code that doesn't own the [`Drawer`].
///
/// Handles are tied to the UI thread and become inert once the drawer is dropped.
/// They only record the request: nothing is drawn until the drawer's owner renders
/// again, so callers outside input handling must also ask the runtime for a render.
#[derive(Clone)]
pub struct DrawerHandle {
    state: Weak<RefCell<DrawerState>>,
}

impl DrawerHandle {
    /// Replace the requested content. Returns `false` when the drawer is gone.
    pub fn show(&self, data: DrawerData) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };
        state.borrow_mut().set_requested(Some(data));
        true
    }

    /// Clear the requested content. Returns `false` when the drawer is gone.
    pub fn close(&self) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };
        state.borrow_mut().set_requested(None);
        true
    }
}

pub struct Drawer {
    state: Rc<RefCell<DrawerState>>,
    registry: Rc<MountRegistry>,
    root_id: String,
    portal_id: String,
    isolated: Option<IsolatedRoot>,
    projection: Projection,
}

impl Drawer {
    /// Drawer targeting the default `drawer-root-id` / `drawer-portal-id` mount points.
    pub fn new(registry: Rc<MountRegistry>) -> Self {
        Self::with_mount_ids(registry, DRAWER_ROOT_ID, DRAWER_PORTAL_ID)
    }

    pub fn with_mount_ids(
        registry: Rc<MountRegistry>,
        root_id: impl Into<String>,
        portal_id: impl Into<String>,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(DrawerState {
                requested: None,
                version: 0,
                applied_version: None,
                effect_runs: 0,
            })),
            registry,
            root_id: root_id.into(),
            portal_id: portal_id.into(),
            isolated: None,
            projection: Projection::Pending,
        }
    }

    pub fn handle(&self) -> DrawerHandle {
        DrawerHandle {
            state: Rc::downgrade(&self.state),
        }
    }

    /// Request `data` be shown, replacing any previous request.
    pub fn show(&mut self, data: DrawerData) {
        self.state.borrow_mut().set_requested(Some(data));
    }

    pub fn close(&mut self) {
        self.state.borrow_mut().set_requested(None);
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().requested.is_some()
    }

    /// Label of the currently requested content, if any.
    pub fn requested_label(&self) -> Option<&'static str> {
        self.state
            .borrow()
            .requested
            .as_ref()
            .map(|data| data.content.label())
    }

    /// Whether the requested content changed since the last effect.
    pub fn is_dirty(&self) -> bool {
        let state = self.state.borrow();
        state.applied_version != Some(state.version)
    }

    /// How many times the effect has run.
    pub fn effect_runs(&self) -> u64 {
        self.state.borrow().effect_runs
    }

    /// Run the effect if the requested content changed. Returns whether it ran.
    ///
    /// Both mount points are updated within this call.
    pub fn sync(&mut self, width: usize) -> bool {
        let (requested, version) = {
            let state = self.state.borrow();
            if state.applied_version == Some(state.version) {
                return false;
            }
            (state.requested.clone(), state.version)
        };

        let content = ContentWrapper::element(requested.map(|data| data.content));

        match self.registry.resolve(&self.root_id) {
            Ok(point) => {
                if let Some(mut previous) = self.isolated.take() {
                    previous.unmount();
                }
                self.isolated = attach(&point, &content, MountStrategy::Isolated, width).into_root();
            }
            Err(err) => {
                // The old root's slot may come back; it must not resurface stale content.
                if let Some(mut previous) = self.isolated.take() {
                    previous.unmount();
                }
                log_debug("drawer", format!("isolated mount skipped: {err}"));
            }
        }

        self.projection = match self.registry.resolve(&self.portal_id) {
            Ok(point) => attach(&point, &content, MountStrategy::Projected, width)
                .into_portal()
                .map_or(Projection::Pending, Projection::Portal),
            Err(err) => {
                log_debug("drawer", format!("portal fallback: {err}"));
                Projection::Fallback(Text::new(PORTAL_MOUNT_MISSING))
            }
        };

        let mut state = self.state.borrow_mut();
        state.applied_version = Some(version);
        state.effect_runs += 1;
        true
    }

    /// The projection value. Render it inside the owning tree to keep the portal live.
    pub fn portal_elem(&mut self) -> &mut Projection {
        &mut self.projection
    }

    pub fn isolated_root(&self) -> Option<&IsolatedRoot> {
        self.isolated.as_ref()
    }
}

impl Drop for Drawer {
    fn drop(&mut self) {
        if let Some(mut root) = self.isolated.take() {
            root.unmount();
        }
    }
}
