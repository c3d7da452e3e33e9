// SPDX-License-Identifier: MIT
//
// Raw key units and keypress capture.
//
// A "unit" is what the platform's lowest-level read hands back for one
// step of a keypress: a byte from a POSIX terminal, or a `_getch` value
// from the Windows console. `capture_codes` pulls just enough units to
// cover one keypress:
//
// - POSIX: one byte; if it is ESC, exactly two more. This lookahead is
//   blind. A lone ESC press blocks until two further bytes arrive and
//   swallows them, and a longer sequence such as Delete (`ESC [ 3 ~`)
//   leaves its tail for the next read.
// - Windows: one unit; if it is an extended-key prefix (0 or 224),
//   exactly one more.
#![allow(unsafe_code)]

use std::io::{self, Read};

use tracing::debug;

use kp_keys::table::ESC_BYTE;
use kp_keys::{Platform, Result};

/// Bytes read after an ESC on POSIX.
pub const ESC_LOOKAHEAD: usize = 2;

/// First units that announce a two-unit extended key on Windows.
pub const WINDOWS_EXTENDED_PREFIXES: [u32; 2] = [0, 224];

/// A source of raw key units.
pub trait RawInput {
    /// Block until the next unit is available and return it.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; end of input is
    /// [`io::ErrorKind::UnexpectedEof`].
    fn next_unit(&mut self) -> io::Result<u32>;
}

impl<T: RawInput + ?Sized> RawInput for &mut T {
    fn next_unit(&mut self) -> io::Result<u32> {
        (**self).next_unit()
    }
}

/// Read exactly one keypress worth of units from `input`.
///
/// # Errors
///
/// Returns [`KeyError::TerminalIo`](kp_keys::KeyError::TerminalIo) if any
/// read fails, including end of input in the middle of a sequence. No
/// partial sequence is returned.
pub fn capture_codes(platform: Platform, input: &mut impl RawInput) -> Result<Vec<u32>> {
    let first = input.next_unit()?;
    let mut codes = vec![first];

    let extra = match platform {
        Platform::Posix if first == ESC_BYTE => ESC_LOOKAHEAD,
        Platform::Windows if WINDOWS_EXTENDED_PREFIXES.contains(&first) => 1,
        _ => 0,
    };
    for _ in 0..extra {
        codes.push(input.next_unit()?);
    }

    debug!(%platform, ?codes, "captured keypress");
    Ok(codes)
}

// ─── ReadInput ──────────────────────────────────────────────────────────────

/// Units from any [`Read`] implementation, one byte each.
///
/// Handy for pipes, files, and byte slices in tests.
#[derive(Debug)]
pub struct ReadInput<R> {
    inner: R,
}

impl<R: Read> ReadInput<R> {
    /// Wrap a reader.
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwrap the reader, e.g. to inspect what was not consumed.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> RawInput for ReadInput<R> {
    fn next_unit(&mut self) -> io::Result<u32> {
        let mut byte = [0u8; 1];
        self.inner.read_exact(&mut byte)?;
        Ok(u32::from(byte[0]))
    }
}

// ─── FdInput (POSIX) ────────────────────────────────────────────────────────

/// Unbuffered byte reads straight from a file descriptor.
///
/// Bypasses `std::io::Stdin`'s internal buffer, so bytes the terminal
/// delivers beyond the current keypress stay in the kernel queue for the
/// next read instead of a user-space buffer.
#[cfg(unix)]
#[derive(Debug, Clone, Copy)]
pub struct FdInput {
    fd: std::os::unix::io::RawFd,
}

#[cfg(unix)]
impl FdInput {
    /// Read from `fd`. The descriptor is borrowed, not closed.
    #[must_use]
    pub const fn new(fd: std::os::unix::io::RawFd) -> Self {
        Self { fd }
    }

    /// Read from standard input.
    #[must_use]
    pub const fn stdin() -> Self {
        Self::new(libc::STDIN_FILENO)
    }
}

#[cfg(unix)]
impl RawInput for FdInput {
    fn next_unit(&mut self) -> io::Result<u32> {
        let mut byte = 0u8;
        let n = unsafe { libc::read(self.fd, (&raw mut byte).cast(), 1) };
        match n {
            1 => Ok(u32::from(byte)),
            0 => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "end of input while reading a key",
            )),
            _ => Err(io::Error::last_os_error()),
        }
    }
}

// ─── ConsoleInput (Windows) ─────────────────────────────────────────────────

#[cfg(windows)]
unsafe extern "C" {
    /// CRT console read: one key unit, no echo, no line buffering.
    fn _getch() -> std::ffi::c_int;
}

/// Key units from the Windows console via the CRT's `_getch`.
///
/// `_getch` is unbuffered and unechoed per call, so no console mode needs
/// saving or restoring.
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleInput;

#[cfg(windows)]
impl RawInput for ConsoleInput {
    fn next_unit(&mut self) -> io::Result<u32> {
        let unit = unsafe { _getch() };
        u32::try_from(unit).map_err(|_| io::Error::other(format!("_getch returned {unit}")))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use kp_keys::KeyError;
    use pretty_assertions::assert_eq;

    fn capture(platform: Platform, bytes: &[u8]) -> Result<Vec<u32>> {
        capture_codes(platform, &mut ReadInput::new(bytes))
    }

    // ── POSIX ───────────────────────────────────────────────────────────

    #[test]
    fn posix_plain_byte() {
        assert_eq!(capture(Platform::Posix, b"a").unwrap(), vec![97]);
    }

    #[test]
    fn posix_escape_reads_two_more() {
        assert_eq!(capture(Platform::Posix, b"\x1b[A").unwrap(), vec![27, 91, 65]);
    }

    #[test]
    fn posix_lookahead_is_fixed() {
        // Delete is four bytes; the fourth stays behind for the next read.
        let mut input = ReadInput::new(&b"\x1b[3~"[..]);
        assert_eq!(capture_codes(Platform::Posix, &mut input).unwrap(), vec![27, 91, 51]);
        assert_eq!(capture_codes(Platform::Posix, &mut input).unwrap(), vec![126]);
    }

    #[test]
    fn posix_lone_escape_swallows_following_keys() {
        assert_eq!(capture(Platform::Posix, b"\x1bxy").unwrap(), vec![27, 120, 121]);
    }

    #[test]
    fn posix_truncated_sequence_is_an_error() {
        let err = capture(Platform::Posix, b"\x1b[").unwrap_err();
        match err {
            KeyError::TerminalIo(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected TerminalIo, got {other:?}"),
        }
    }

    #[test]
    fn posix_extended_prefix_is_single() {
        assert_eq!(capture(Platform::Posix, b"\xe0H").unwrap(), vec![224]);
    }

    // ── Windows ─────────────────────────────────────────────────────────

    #[test]
    fn windows_plain_unit() {
        assert_eq!(capture(Platform::Windows, b"q").unwrap(), vec![113]);
    }

    #[test]
    fn windows_extended_prefixes() {
        assert_eq!(capture(Platform::Windows, b"\xe0H").unwrap(), vec![224, 72]);
        assert_eq!(capture(Platform::Windows, b"\x00H").unwrap(), vec![0, 72]);
    }

    #[test]
    fn windows_escape_has_no_lookahead() {
        assert_eq!(capture(Platform::Windows, b"\x1b[A").unwrap(), vec![27]);
    }

    // ── Sources ─────────────────────────────────────────────────────────

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            capture(Platform::Posix, b""),
            Err(KeyError::TerminalIo(_))
        ));
    }

    #[test]
    fn read_input_into_inner_keeps_remainder() {
        let mut input = ReadInput::new(&b"ab"[..]);
        assert_eq!(input.next_unit().unwrap(), 97);
        assert_eq!(input.into_inner(), b"b");
    }

    #[cfg(unix)]
    #[test]
    fn fd_input_reads_pipe_bytes() {
        use std::io::Write;
        use std::os::unix::io::{AsRawFd, FromRawFd};

        let mut fds = [0; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        let reader = unsafe { std::fs::File::from_raw_fd(fds[0]) };
        let mut writer = unsafe { std::fs::File::from_raw_fd(fds[1]) };
        writer.write_all(b"\x1b[B").unwrap();
        drop(writer);

        let mut input = FdInput::new(reader.as_raw_fd());
        assert_eq!(capture_codes(Platform::Posix, &mut input).unwrap(), vec![27, 91, 66]);
        assert_eq!(
            input.next_unit().unwrap_err().kind(),
            io::ErrorKind::UnexpectedEof
        );
    }
}
