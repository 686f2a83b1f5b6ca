//! Process-based terminal implementation (unix).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::thread::{self, JoinHandle};

use libc::{self, c_int};
use signal_hook::iterator::Signals;

use crate::core::terminal::Terminal;
use crate::logging::log_debug;

const INPUT_POLL_MS: i32 = 50;
const FALLBACK_COLUMNS: u16 = 80;
const FALLBACK_ROWS: u16 = 24;

type InputHandler = Arc<Mutex<Option<Box<dyn FnMut(String) + Send>>>>;
type ResizeHandler = Arc<Mutex<Option<Box<dyn FnMut() + Send>>>>;

fn write_fd(fd: c_int, data: &str) -> std::io::Result<()> {
    let bytes = data.as_bytes();
    let mut written = 0;
    while written < bytes.len() {
        let remaining = &bytes[written..];
        let result =
            unsafe { libc::write(fd, remaining.as_ptr() as *const libc::c_void, remaining.len()) };
        if result < 0 {
            let err = std::io::Error::last_os_error();
            if err.kind() == std::io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }
        if result == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "write returned 0",
            ));
        }
        written += result as usize;
    }
    Ok(())
}

fn read_winsize(fd: c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

fn poll_readable(fd: c_int, timeout_ms: i32) -> bool {
    let mut fds = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = unsafe { libc::poll(&mut fds, 1, timeout_ms) };
    result > 0 && (fds.revents & libc::POLLIN) != 0
}

fn get_termios(fd: c_int) -> std::io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: c_int, termios: &libc::termios) -> std::io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

/// Terminal backed by the process's stdin/stdout.
///
/// `start` switches stdin to raw mode and spawns two helper threads: one polls stdin and
/// forwards raw chunks to the input handler, the other listens for SIGWINCH. Neither
/// touches UI state.
pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
    input_handler: InputHandler,
    resize_handler: ResizeHandler,
    input_thread: Option<JoinHandle<()>>,
    stop_flag: Arc<AtomicBool>,
    write_log_path: Option<PathBuf>,
    write_log_failed: bool,
    resize_signal_handle: Option<signal_hook::iterator::Handle>,
    resize_thread: Option<JoinHandle<()>>,
}

impl ProcessTerminal {
    /// `write_log` mirrors every write to the given file.
    pub fn new(write_log: Option<String>) -> Self {
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd: libc::STDOUT_FILENO,
            original_termios: None,
            input_handler: Arc::new(Mutex::new(None)),
            resize_handler: Arc::new(Mutex::new(None)),
            input_thread: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            write_log_path: write_log.map(PathBuf::from),
            write_log_failed: false,
            resize_signal_handle: None,
            resize_thread: None,
        }
    }

    fn enable_raw_mode(&mut self) -> std::io::Result<()> {
        let original = match self.original_termios {
            Some(original) => original,
            None => {
                let original = get_termios(self.stdin_fd)?;
                self.original_termios = Some(original);
                original
            }
        };
        let mut raw = original;
        unsafe {
            libc::cfmakeraw(&mut raw);
        }
        set_termios(self.stdin_fd, &raw)
    }

    fn restore_raw_mode(&mut self) -> std::io::Result<()> {
        if let Some(original) = self.original_termios.as_ref() {
            set_termios(self.stdin_fd, original)?;
        }
        Ok(())
    }

    fn start_input_thread(&mut self) {
        let stdin_fd = self.stdin_fd;
        let input_handler = Arc::clone(&self.input_handler);
        let stop_flag = Arc::clone(&self.stop_flag);

        self.input_thread = Some(thread::spawn(move || {
            let mut buffer = [0u8; 4096];
            while !stop_flag.load(Ordering::SeqCst) {
                if !poll_readable(stdin_fd, INPUT_POLL_MS) {
                    continue;
                }
                let read_len =
                    unsafe { libc::read(stdin_fd, buffer.as_mut_ptr() as *mut _, buffer.len()) };
                if read_len <= 0 {
                    continue;
                }
                let chunk = String::from_utf8_lossy(&buffer[..read_len as usize]).into_owned();
                let mut handler = input_handler
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                if let Some(handler) = handler.as_mut() {
                    handler(chunk);
                }
            }
        }));
    }

    fn stop_input_thread(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.input_thread.take() {
            let _ = handle.join();
        }
    }

    fn start_resize_thread(&mut self) -> std::io::Result<()> {
        let mut signals = Signals::new([libc::SIGWINCH])?;
        let handle = signals.handle();
        let resize_handler = Arc::clone(&self.resize_handler);

        let thread = thread::spawn(move || {
            for _ in signals.forever() {
                let mut handler = resize_handler
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                if let Some(handler) = handler.as_mut() {
                    handler();
                }
            }
        });

        self.resize_signal_handle = Some(handle);
        self.resize_thread = Some(thread);
        Ok(())
    }

    fn stop_resize_thread(&mut self) {
        if let Some(handle) = self.resize_signal_handle.take() {
            handle.close();
        }
        if let Some(thread) = self.resize_thread.take() {
            let _ = thread.join();
        }
    }

    fn clear_handlers(&self) {
        *self
            .input_handler
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        *self
            .resize_handler
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    fn log_write(&mut self, data: &str) {
        if self.write_log_failed {
            return;
        }
        let Some(path) = self.write_log_path.as_ref() else {
            return;
        };
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(data.as_bytes()));
        if result.is_err() {
            self.write_log_failed = true;
        }
    }
}

impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Terminal for ProcessTerminal {
    fn start(
        &mut self,
        on_input: Box<dyn FnMut(String) + Send>,
        on_resize: Box<dyn FnMut() + Send>,
    ) -> std::io::Result<()> {
        *self
            .input_handler
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(on_input);
        *self
            .resize_handler
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(on_resize);
        self.stop_flag.store(false, Ordering::SeqCst);

        if let Err(err) = self.enable_raw_mode() {
            self.clear_handlers();
            return Err(err);
        }
        if let Err(err) = self.start_resize_thread() {
            let _ = self.restore_raw_mode();
            self.clear_handlers();
            return Err(err);
        }
        self.start_input_thread();
        Ok(())
    }

    fn stop(&mut self) -> std::io::Result<()> {
        self.stop_input_thread();
        self.stop_resize_thread();
        self.clear_handlers();

        // Flush input before leaving raw mode so buffered bytes don't leak to the shell.
        let _ = unsafe { libc::tcflush(self.stdin_fd, libc::TCIFLUSH) };
        self.restore_raw_mode()
    }

    fn write(&mut self, data: &str) {
        if data.is_empty() {
            return;
        }
        self.log_write(data);
        if let Err(err) = write_fd(self.stdout_fd, data) {
            log_debug("terminal", format!("write failed: {err}"));
        }
    }

    fn columns(&self) -> u16 {
        read_winsize(self.stdout_fd).map_or(FALLBACK_COLUMNS, |(columns, _)| columns)
    }

    fn rows(&self) -> u16 {
        read_winsize(self.stdout_fd).map_or(FALLBACK_ROWS, |(_, rows)| rows)
    }
}

impl Drop for ProcessTerminal {
    fn drop(&mut self) {
        self.stop_input_thread();
        self.stop_resize_thread();
        let _ = self.restore_raw_mode();
    }
}

/// Keeps the SIGINT/SIGTERM listener alive; dropping it unregisters the listener.
pub struct SignalHookGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<JoinHandle<()>>,
}

impl Drop for SignalHookGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Run `on_signal` on a helper thread for every SIGINT/SIGTERM received.
pub fn install_signal_handlers<F>(on_signal: F) -> std::io::Result<SignalHookGuard>
where
    F: Fn() + Send + 'static,
{
    let mut signals = Signals::new([libc::SIGINT, libc::SIGTERM])?;
    let handle = signals.handle();
    let thread = thread::spawn(move || {
        for _ in signals.forever() {
            on_signal();
        }
    });
    Ok(SignalHookGuard {
        handle,
        thread: Some(thread),
    })
}

#[cfg(test)]
mod tests {
    use super::{install_signal_handlers, ProcessTerminal};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    #[test]
    fn write_log_mirrors_output() {
        let path = std::env::temp_dir().join(format!(
            "portal_drawer-write-log-{}.txt",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let mut terminal = ProcessTerminal::new(Some(path.to_string_lossy().into_owned()));
        terminal.log_write("abc");
        terminal.log_write("def");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abcdef");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn signal_guard_delivers_and_unregisters() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let guard = install_signal_handlers(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        signal_hook::low_level::raise(libc::SIGTERM).unwrap();
        let deadline = Instant::now() + Duration::from_secs(2);
        while hits.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        drop(guard);
    }
}
