//! Runtime orchestration.

pub mod host;
pub mod timer;
pub mod tui;

pub use host::{HostDocument, APP_ROOT_ID};
pub use timer::Interval;
pub use tui::{DemoRuntime, RenderHandle};
