// SPDX-License-Identifier: MIT
//
// Terminal raw mode — scoped, always restored.
//
// Safety: this module uses `unsafe` for termios (tcgetattr, tcsetattr) and
// isatty. These are the POSIX interfaces for terminal control and have no
// safe alternative. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// Raw mode lives exactly as long as one key read. `RawMode::enter` saves
// the current attributes and switches to a cfmakeraw-equivalent; the
// saved attributes go back on `restore()` or, if the caller never gets
// that far (early return, panic), on drop.
//
// Entering uses TCSANOW rather than TCSAFLUSH: keys typed between two
// reads are still queued when the next read starts and must not be
// discarded. Restoring uses TCSADRAIN so pending output is written with
// the raw settings it was produced under.

use std::io;
use std::os::unix::io::RawFd;

use tracing::{debug, warn};

use kp_keys::Result;

/// Whether `fd` refers to a terminal.
#[must_use]
pub fn is_tty(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) != 0 }
}

/// Read the current terminal attributes of `fd`.
///
/// # Errors
///
/// Returns the OS error if `fd` is not a terminal or the query fails.
pub fn attributes(fd: RawFd) -> io::Result<libc::termios> {
    unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &raw mut termios) != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(termios)
    }
}

/// Raw-mode guard for one terminal file descriptor.
///
/// While alive, the terminal delivers every byte immediately, without
/// echo, line editing, signal keys, or CR/NL translation.
#[derive(Debug)]
pub struct RawMode {
    fd: RawFd,
    /// Attributes to put back. `None` once restored.
    original: Option<libc::termios>,
}

impl RawMode {
    /// Save the attributes of `fd` and switch it to raw mode.
    ///
    /// # Errors
    ///
    /// Returns the OS error if `fd` is not a terminal or either termios
    /// call fails. Nothing has changed on the terminal in that case.
    pub fn enter(fd: RawFd) -> io::Result<Self> {
        let original = attributes(fd)?;
        let mut raw = original;
        make_raw(&mut raw);

        unsafe {
            if libc::tcsetattr(fd, libc::TCSANOW, &raw const raw) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        debug!(fd, "raw mode entered");
        Ok(Self {
            fd,
            original: Some(original),
        })
    }

    /// Put the saved attributes back.
    ///
    /// # Errors
    ///
    /// Returns the OS error if `tcsetattr` fails.
    pub fn restore(mut self) -> io::Result<()> {
        self.restore_saved()
    }

    fn restore_saved(&mut self) -> io::Result<()> {
        let Some(original) = self.original.take() else {
            return Ok(());
        };
        unsafe {
            if libc::tcsetattr(self.fd, libc::TCSADRAIN, &raw const original) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        debug!(fd = self.fd, "terminal attributes restored");
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = self.restore_saved() {
            warn!(fd = self.fd, error = %e, "failed to restore terminal attributes");
        }
    }
}

/// cfmakeraw equivalent: disable all input and output processing.
fn make_raw(termios: &mut libc::termios) {
    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    // VMIN=1, VTIME=0: read() blocks until at least one byte arrives.
    termios.c_cc[libc::VMIN] = 1;
    termios.c_cc[libc::VTIME] = 0;
}

/// Run `f` with `fd` in raw mode, restoring the previous attributes on
/// every exit path.
///
/// If `f` fails, its error is returned even when the restore also fails
/// (the restore failure is logged). If only the restore fails, that
/// failure is returned as [`KeyError::TerminalIo`](kp_keys::KeyError::TerminalIo).
///
/// # Errors
///
/// Propagates `f`'s error, or a termios failure while entering or
/// restoring raw mode.
pub fn with_raw_mode<T>(fd: RawFd, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let guard = RawMode::enter(fd)?;
    let result = f();
    let restored = guard.restore();

    match (result, restored) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(restore_err)) => {
            warn!(error = %restore_err, "restore failed after read error");
            Err(e)
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
