//! Widgets used by the demo screen and the host document.

pub mod button;
pub mod container;
pub mod panel;
pub mod text;

pub use button::Button;
pub use container::Container;
pub use panel::Panel;
pub use text::Text;
