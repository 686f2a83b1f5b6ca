//! Text measurement helpers.

pub mod width;

pub use width::{pad_to_width, truncate_to_width, visible_width, wrap_words};
