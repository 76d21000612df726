use std::io::{self, IsTerminal};
use std::os::fd::AsFd;

use log::debug;
use nix::sys::termios::{self, SetArg, Termios};

/// Keeps stdin in raw mode for as long as it is alive and puts the saved
/// settings back on drop, whichever way the reader returns.
pub struct RawMode {
    original: Termios,
}

impl RawMode {
    /// Returns `None` when stdin is not a terminal; there is nothing to switch.
    pub fn enter() -> io::Result<Option<RawMode>> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return Ok(None);
        }

        let original = termios::tcgetattr(stdin.as_fd())?;
        let mut raw = original.clone();
        termios::cfmakeraw(&mut raw);
        termios::tcsetattr(stdin.as_fd(), SetArg::TCSANOW, &raw)?;
        debug!("terminal switched to raw mode");

        Ok(Some(RawMode { original }))
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let stdin = io::stdin();
        if let Err(e) = termios::tcsetattr(stdin.as_fd(), SetArg::TCSANOW, &self.original) {
            log::warn!("failed to restore terminal mode: {}", e);
        }
    }
}
