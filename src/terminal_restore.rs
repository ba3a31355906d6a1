//! Terminal-state guard so a quit, error, or panic always hands back a usable shell.

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Write},
    panic,
    sync::{
        atomic::{AtomicU8, Ordering},
        OnceLock,
    },
};

const RAW_MODE: u8 = 1 << 0;
const ALT_SCREEN: u8 = 1 << 1;
const MOUSE_CAPTURE: u8 = 1 << 2;
const CURSOR_HIDDEN: u8 = 1 << 3;

/// Terminal modes we switched on and still owe a restore for.
static ACTIVE_MODES: AtomicU8 = AtomicU8::new(0);
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

fn mark(mode: u8) {
    ACTIVE_MODES.fetch_or(mode, Ordering::SeqCst);
}

fn take_modes() -> u8 {
    ACTIVE_MODES.swap(0, Ordering::SeqCst)
}

/// RAII guard: every mode enabled through it is undone on drop or panic.
#[derive(Debug)]
pub struct TerminalGuard;

impl TerminalGuard {
    /// Create a guard and install the shared panic hook (once).
    #[must_use]
    pub fn new() -> Self {
        install_terminal_panic_hook();
        TerminalGuard
    }

    /// # Errors
    ///
    /// Returns an error if the terminal cannot enter raw mode.
    pub fn enable_raw_mode(&self) -> io::Result<()> {
        enable_raw_mode()?;
        mark(RAW_MODE);
        Ok(())
    }

    /// Switch to the alternate screen and hide the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the escape sequences fails.
    pub fn enter_alt_screen(&self, out: &mut impl Write) -> io::Result<()> {
        execute!(out, EnterAlternateScreen)?;
        mark(ALT_SCREEN);
        execute!(out, Hide)?;
        mark(CURSOR_HIDDEN);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if mouse capture cannot be enabled.
    pub fn enable_mouse_capture(&self, out: &mut impl Write) -> io::Result<()> {
        execute!(out, EnableMouseCapture)?;
        mark(MOUSE_CAPTURE);
        Ok(())
    }

    pub fn restore(&self) {
        restore_terminal();
    }
}

impl Default for TerminalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Undo every mode still marked active. Safe to call repeatedly.
pub fn restore_terminal() {
    let modes = take_modes();
    if modes == 0 {
        return;
    }
    if modes & RAW_MODE != 0 {
        let _ = disable_raw_mode();
    }
    let mut stdout = io::stdout();
    if modes & MOUSE_CAPTURE != 0 {
        let _ = execute!(stdout, DisableMouseCapture);
    }
    if modes & ALT_SCREEN != 0 {
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
    if modes & CURSOR_HIDDEN != 0 {
        let _ = execute!(stdout, Show);
    }
    let _ = stdout.flush();
}

/// Restore the terminal before the default panic output is printed.
pub fn install_terminal_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            tracing::error!(%location, "panic: {info}");
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("intentional write failure"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("intentional flush failure"))
        }
    }

    fn test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn restore_terminal_clears_all_marks() {
        let _guard = test_lock().lock().expect("test lock");
        mark(ALT_SCREEN | MOUSE_CAPTURE);
        restore_terminal();
        assert_eq!(ACTIVE_MODES.load(Ordering::SeqCst), 0);
        restore_terminal();
        assert_eq!(ACTIVE_MODES.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn guard_drop_restores_terminal_state() {
        let _guard = test_lock().lock().expect("test lock");
        mark(CURSOR_HIDDEN);
        {
            let _terminal = TerminalGuard::new();
        }
        assert_eq!(ACTIVE_MODES.load(Ordering::SeqCst), 0);
        assert!(PANIC_HOOK_INSTALLED.get().is_some());
    }

    #[test]
    fn enter_alt_screen_propagates_writer_errors_without_marking() {
        let _guard = test_lock().lock().expect("test lock");
        take_modes();
        let terminal = TerminalGuard::new();
        let err = terminal
            .enter_alt_screen(&mut FailingWriter)
            .expect_err("write error should bubble up");
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(ACTIVE_MODES.load(Ordering::SeqCst) & ALT_SCREEN, 0);
    }

    #[test]
    fn enable_mouse_capture_propagates_writer_errors_without_marking() {
        let _guard = test_lock().lock().expect("test lock");
        take_modes();
        let terminal = TerminalGuard::new();
        let err = terminal
            .enable_mouse_capture(&mut FailingWriter)
            .expect_err("write error should bubble up");
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(ACTIVE_MODES.load(Ordering::SeqCst) & MOUSE_CAPTURE, 0);
    }
}
