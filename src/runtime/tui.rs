//! Demo runtime.
//!
//! One thread owns the component tree. Terminal callbacks (stdin reader, resize
//! listener) and [`RenderHandle`]s only enqueue work into a shared wake object; the
//! runtime thread drains it, applies input, fires due timers and renders.

use std::io;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Instant;

use crate::core::component::Component;
use crate::core::context::Scope;
use crate::core::input_event::{parse_input_events, InputEvent};
use crate::core::output::{OutputGate, TerminalCmd};
use crate::core::terminal::Terminal;
use crate::logging::log_debug;
use crate::render::DiffRenderer;

const QUIT_KEYS: [&str; 2] = ["q", "ctrl+c"];

#[derive(Default)]
struct RuntimeWakeState {
    pending_inputs: Vec<String>,
    pending_resize: bool,
    render_requested: bool,
    stop_requested: bool,
}

#[derive(Default)]
struct RuntimeWake {
    state: Mutex<RuntimeWakeState>,
    cvar: Condvar,
}

impl RuntimeWake {
    fn lock(&self) -> MutexGuard<'_, RuntimeWakeState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn has_work(state: &RuntimeWakeState) -> bool {
        state.stop_requested
            || !state.pending_inputs.is_empty()
            || state.pending_resize
            || state.render_requested
    }

    /// Block until work arrives or `deadline` passes. Returns `false` once stop is requested.
    fn wait_until(&self, deadline: Option<Instant>) -> bool {
        let mut state = self.lock();
        while !Self::has_work(&state) {
            match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    state = match self.cvar.wait_timeout(state, deadline - now) {
                        Ok((state, _)) => state,
                        Err(poisoned) => poisoned.into_inner().0,
                    };
                }
                None => {
                    state = self
                        .cvar
                        .wait(state)
                        .unwrap_or_else(|poisoned| poisoned.into_inner());
                }
            }
        }
        !state.stop_requested
    }

    fn enqueue_input(&self, data: String) {
        let mut state = self.lock();
        state.pending_inputs.push(data);
        self.cvar.notify_one();
    }

    fn signal_resize(&self) {
        let mut state = self.lock();
        state.pending_resize = true;
        self.cvar.notify_one();
    }

    fn request_render(&self) {
        let mut state = self.lock();
        state.render_requested = true;
        self.cvar.notify_one();
    }

    fn request_stop(&self) {
        let mut state = self.lock();
        state.stop_requested = true;
        self.cvar.notify_one();
    }

    fn reset_for_start(&self) {
        let mut state = self.lock();
        *state = RuntimeWakeState::default();
    }

    fn drain_inputs(&self) -> Vec<String> {
        std::mem::take(&mut self.lock().pending_inputs)
    }

    fn take_pending_resize(&self) -> bool {
        std::mem::take(&mut self.lock().pending_resize)
    }

    fn take_render_requested(&self) -> bool {
        std::mem::take(&mut self.lock().render_requested)
    }

    fn stop_requested(&self) -> bool {
        self.lock().stop_requested
    }
}

/// Thread-safe handle for waking the runtime from other threads.
#[derive(Clone)]
pub struct RenderHandle {
    wake: Arc<RuntimeWake>,
}

impl RenderHandle {
    pub fn request_render(&self) {
        self.wake.request_render();
    }

    pub fn request_stop(&self) {
        self.wake.request_stop();
    }
}

pub struct DemoRuntime<T: Terminal> {
    terminal: T,
    output: OutputGate,
    root: Box<dyn Component>,
    renderer: DiffRenderer,
    wake: Arc<RuntimeWake>,
    stopped: bool,
}

impl<T: Terminal> DemoRuntime<T> {
    pub fn new(terminal: T, root: Box<dyn Component>) -> Self {
        Self {
            terminal,
            output: OutputGate::new(),
            root,
            renderer: DiffRenderer::new(),
            wake: Arc::new(RuntimeWake::default()),
            stopped: true,
        }
    }

    pub fn render_handle(&self) -> RenderHandle {
        RenderHandle {
            wake: Arc::clone(&self.wake),
        }
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn start(&mut self) -> io::Result<()> {
        self.output.clear();
        self.wake.reset_for_start();
        self.stopped = false;

        let wake_input = Arc::clone(&self.wake);
        let wake_resize = Arc::clone(&self.wake);
        if let Err(err) = self.terminal.start(
            Box::new(move |data| {
                wake_input.enqueue_input(data);
            }),
            Box::new(move || {
                wake_resize.signal_resize();
            }),
        ) {
            self.stopped = true;
            return Err(err);
        }

        self.output.push(TerminalCmd::AltScreenEnter);
        self.output.push(TerminalCmd::HideCursor);
        self.flush_output();
        self.renderer.reset();
        self.root.set_active(true);
        log_debug("runtime", "started");
        self.request_render();
        Ok(())
    }

    pub fn stop(&mut self) -> io::Result<()> {
        if self.stopped {
            return Ok(());
        }
        self.wake.request_stop();
        self.root.set_active(false);
        self.output.push(TerminalCmd::ShowCursor);
        self.output.push(TerminalCmd::AltScreenLeave);
        self.flush_output();
        self.stopped = true;
        log_debug("runtime", "stopped");
        self.terminal.stop()
    }

    /// Run until a stop is requested (quit key, [`RenderHandle::request_stop`]).
    pub fn run(&mut self) {
        while !self.stopped && self.run_blocking_once() {}
    }

    /// Wait for input, a render request or the next timer deadline, then process
    /// everything pending and render once. Returns `false` once stop was requested.
    pub fn run_blocking_once(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        let deadline = self.root.next_deadline();
        if !self.wake.wait_until(deadline) {
            return false;
        }
        self.run_once_at(Instant::now());
        !self.wake.stop_requested()
    }

    /// Process pending work as of `now` without blocking.
    pub fn run_once_at(&mut self, now: Instant) {
        if self.stopped {
            return;
        }

        if self.wake.take_pending_resize() {
            let event = InputEvent::Resize {
                columns: self.terminal.columns(),
                rows: self.terminal.rows(),
            };
            self.root.handle_event(&event);
            self.root.invalidate();
            self.request_render();
        }

        for data in self.wake.drain_inputs() {
            self.handle_input(&data);
        }

        if self.root.poll_timers(now) {
            self.request_render();
        }

        if self.wake.take_render_requested() {
            self.do_render();
        }
        self.flush_output();
    }

    pub fn handle_input(&mut self, data: &str) {
        let mut handled = false;
        for event in parse_input_events(data) {
            if QUIT_KEYS.iter().any(|key| event.is_key(key)) {
                self.wake.request_stop();
                return;
            }
            handled |= self.root.handle_event(&event);
        }
        if handled {
            self.request_render();
        }
    }

    pub fn request_render(&mut self) {
        self.wake.request_render();
    }

    fn do_render(&mut self) {
        let width = usize::from(self.terminal.columns());
        let height = usize::from(self.terminal.rows());
        let lines = self.root.render(&Scope::root(), width);
        let cmds = self.renderer.render(&lines, width, height);
        self.output.extend(cmds);
    }

    fn flush_output(&mut self) {
        self.output.flush(&mut self.terminal);
    }
}

impl<T: Terminal> Drop for DemoRuntime<T> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
