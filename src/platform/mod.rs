//! Platform-specific terminal integrations.

#[cfg(unix)]
pub mod process_terminal;

#[cfg(unix)]
pub use process_terminal::{install_signal_handlers, ProcessTerminal, SignalHookGuard};
