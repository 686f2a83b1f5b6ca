//! The demo screen: ambient app data, the drawer trigger and the content it shows.

pub mod app_data;
pub mod demo_content;
pub mod screen;
pub mod trigger;

pub use app_data::{AppData, AppDataProvider};
pub use demo_content::{DemoContent, APP_DATA_MISSING};
pub use screen::DemoScreen;
pub use trigger::DrawerTrigger;
