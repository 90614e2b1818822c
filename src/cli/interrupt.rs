//! Ctrl-C at the prompt
//!
//! The prompt reads keys in raw mode and turns `^C` into a SIGINT raised on
//! the process. The handler puts the terminal back the way it was found,
//! prints the farewell line and exits with status 0.

use std::io;

/// What the handler writes before exiting; matches `shell::farewell`
pub const FAREWELL_LINE: &[u8] = b"\nThanks for using kshell, bye.\n";

#[cfg(unix)]
static SAVED_TERMIOS: std::sync::OnceLock<libc::termios> = std::sync::OnceLock::new();

/// Install the SIGINT handler, remembering the current terminal settings
#[cfg(unix)]
pub fn install() -> io::Result<()> {
    unsafe {
        let mut term: libc::termios = std::mem::zeroed();
        if libc::isatty(libc::STDIN_FILENO) == 1
            && libc::tcgetattr(libc::STDIN_FILENO, &mut term) == 0
        {
            let _ = SAVED_TERMIOS.set(term);
        }

        let handler = on_interrupt as extern "C" fn(libc::c_int);
        if libc::signal(libc::SIGINT, handler as libc::sighandler_t) == libc::SIG_ERR {
            return Err(io::Error::last_os_error());
        }
    }
    tracing::debug!("interrupt handler installed");
    Ok(())
}

#[cfg(not(unix))]
pub fn install() -> io::Result<()> {
    Ok(())
}

#[cfg(unix)]
extern "C" fn on_interrupt(_signal: libc::c_int) {
    // Async-signal-safe calls only
    unsafe {
        if let Some(term) = SAVED_TERMIOS.get() {
            libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, term);
        }
        libc::write(
            libc::STDOUT_FILENO,
            FAREWELL_LINE.as_ptr().cast(),
            FAREWELL_LINE.len(),
        );
        libc::_exit(0);
    }
}
