// SPDX-License-Identifier: MIT
//
// kp-term — raw terminal key capture for keypress.
//
// Reads exactly one keypress from the terminal and hands the captured
// codes to `kp-keys` for decoding. On POSIX the terminal is switched to
// raw mode through termios for the span of one read and restored on every
// exit path; on Windows the CRT's `_getch` is already unbuffered per key.
//
// No event loop, no background thread, no timeouts: one call, one key.

pub mod input;
pub mod reader;
#[cfg(unix)]
pub mod terminal;

pub use input::{RawInput, ReadInput, capture_codes};
pub use reader::KeyReader;

use kp_keys::{KeyEvent, Result};

/// Read one keypress from the terminal, decoded with the running
/// platform's table.
///
/// Blocks until a key arrives.
///
/// # Errors
///
/// - [`KeyError::UnsupportedPlatform`](kp_keys::KeyError::UnsupportedPlatform)
///   outside the POSIX and Windows families.
/// - [`KeyError::TerminalIo`](kp_keys::KeyError::TerminalIo) if the
///   terminal cannot be put in raw mode, restored, or read.
pub fn read_key() -> Result<KeyEvent> {
    KeyReader::detect()?.read_key()
}
