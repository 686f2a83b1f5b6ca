//! Core traits and primitives shared by widgets, mounts and the runtime.

pub mod component;
pub mod context;
pub mod element;
pub mod input_event;
pub mod output;
pub mod terminal;
pub mod text;
