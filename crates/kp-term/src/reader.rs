// SPDX-License-Identifier: MIT
//
// Key reader — capture + decode, one keypress per call.
//
// `KeyReader` holds the platform `KeyTable` and nothing else. Each call
// captures the codes of a single keypress and decodes them; on POSIX the
// terminal is in raw mode only for the duration of that call. Reads block
// with no timeout. Two threads reading the same terminal at once is not
// supported; callers serialize.

use kp_keys::{KeyEvent, KeyTable, Result, decode};

use crate::input::{RawInput, capture_codes};

/// Reads and decodes single keypresses.
#[derive(Debug, Clone, Copy)]
pub struct KeyReader {
    table: &'static KeyTable,
}

impl KeyReader {
    /// Reader decoding with an explicit table.
    #[must_use]
    pub const fn new(table: &'static KeyTable) -> Self {
        Self { table }
    }

    /// Reader for the running platform.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnsupportedPlatform`](kp_keys::KeyError::UnsupportedPlatform)
    /// outside the POSIX and Windows families.
    pub fn detect() -> Result<Self> {
        KeyTable::detect().map(Self::new)
    }

    /// The table this reader decodes with.
    #[must_use]
    pub const fn table(&self) -> &'static KeyTable {
        self.table
    }

    /// Read one keypress from an already-prepared source.
    ///
    /// The terminal mode is left alone; use this with pipes, test
    /// fixtures, or a terminal the caller has put in raw mode itself.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::TerminalIo`](kp_keys::KeyError::TerminalIo) if
    /// the source fails.
    pub fn read_key_from(&self, input: &mut impl RawInput) -> Result<KeyEvent> {
        let codes = capture_codes(self.table.platform, input)?;
        decode(self.table, &codes)
    }

    /// Read one keypress from terminal `fd`, in raw mode for the call.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::TerminalIo`](kp_keys::KeyError::TerminalIo) if
    /// `fd` is not a terminal, raw mode cannot be set or restored, or the
    /// read fails. The previous attributes are restored in every case
    /// where they were changed.
    #[cfg(unix)]
    pub fn read_key_from_fd(&self, fd: std::os::unix::io::RawFd) -> Result<KeyEvent> {
        crate::terminal::with_raw_mode(fd, || {
            self.read_key_from(&mut crate::input::FdInput::new(fd))
        })
    }

    /// Read one keypress from the controlling terminal.
    ///
    /// # Errors
    ///
    /// See [`read_key_from_fd`](Self::read_key_from_fd).
    #[cfg(unix)]
    pub fn read_key(&self) -> Result<KeyEvent> {
        self.read_key_from_fd(libc::STDIN_FILENO)
    }

    /// Read one keypress from the console.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::TerminalIo`](kp_keys::KeyError::TerminalIo) if
    /// the console read fails.
    #[cfg(windows)]
    pub fn read_key(&self) -> Result<KeyEvent> {
        self.read_key_from(&mut crate::input::ConsoleInput)
    }

    /// No terminal backend outside POSIX and Windows.
    ///
    /// # Errors
    ///
    /// Always [`KeyError::UnsupportedPlatform`](kp_keys::KeyError::UnsupportedPlatform).
    #[cfg(not(any(unix, windows)))]
    pub fn read_key(&self) -> Result<KeyEvent> {
        Err(kp_keys::KeyError::UnsupportedPlatform(
            std::env::consts::OS.to_owned(),
        ))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
