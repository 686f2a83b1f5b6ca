//! Isolated render roots versus projected portals, shown side by side in a terminal.
//!
//! A [`DemoScreen`] provides ambient [`AppData`] (a fixed timezone plus a counter that
//! ticks once per interval) to a [`DrawerTrigger`]. Showing the drawer attaches the same
//! content to two foreign mount points of the [`HostDocument`]:
//! - `drawer-root-id` through [`create_root`]: a new render tree, so the content cannot
//!   see `AppData` and renders [`APP_DATA_MISSING`];
//! - `drawer-portal-id` through [`create_portal`]: the portal is rendered inside the
//!   trigger, so its content reads `AppData` and follows the counter.
//!
//! # Public API Overview
//! - Context: [`Scope`] carries typed ambient values down the render call chain.
//! - Mounting: [`MountRegistry`], [`MountPoint`], [`attach`] with [`MountStrategy`].
//! - Coordination: [`Drawer`], [`DrawerHandle`], [`Projection`].
//! - Running: [`DemoRuntime`] over any [`Terminal`].
//!
//! Invariant: single output gate: only `core::output::OutputGate::flush(..)` writes to the
//! terminal.

pub mod config;
pub mod logging;

pub mod app;
pub mod core;
pub mod drawer;
pub mod mount;
pub mod platform;
pub mod render;
pub mod runtime;
pub mod widgets;

/// Demo screen building blocks.
pub use crate::app::{
    AppData, AppDataProvider, DemoContent, DemoScreen, DrawerTrigger, APP_DATA_MISSING,
};
/// Environment configuration.
pub use crate::config::EnvConfig;
/// Component trait and ambient context.
pub use crate::core::component::Component;
pub use crate::core::context::Scope;
pub use crate::core::element::Element;
pub use crate::core::input_event::{parse_input_events, InputEvent};
/// Terminal interface.
pub use crate::core::terminal::Terminal;
/// Drawer coordination.
pub use crate::drawer::{
    ContentWrapper, Drawer, DrawerData, DrawerHandle, Projection, PORTAL_MOUNT_MISSING,
};
/// Mount points and strategies.
pub use crate::mount::{
    attach, create_portal, create_root, Attachment, IsolatedRoot, MountError, MountPoint,
    MountRegistry, MountStrategy, Portal, DRAWER_PORTAL_ID, DRAWER_ROOT_ID,
};
/// Process-backed terminal.
#[cfg(unix)]
pub use crate::platform::ProcessTerminal;
/// Runtime.
pub use crate::runtime::{DemoRuntime, HostDocument, Interval, RenderHandle};
/// Visible width helper that ignores ANSI control sequences.
pub use crate::core::text::visible_width;

/// Build the demo's host document (screen plus both mount regions) from `config`.
pub fn build_demo(config: &EnvConfig) -> HostDocument {
    let registry = std::rc::Rc::new(MountRegistry::with_drawer_mounts());
    if !config.root_mount_enabled {
        registry.set_attached(DRAWER_ROOT_ID, false);
    }
    if !config.portal_mount_enabled {
        registry.set_attached(DRAWER_PORTAL_ID, false);
    }
    let screen = DemoScreen::new(std::rc::Rc::clone(&registry), config);
    HostDocument::new(Box::new(screen), registry)
}
