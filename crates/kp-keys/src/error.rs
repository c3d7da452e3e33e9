// SPDX-License-Identifier: MIT
//
// Error taxonomy shared by the decoder and the raw reader.
//
// Everything surfaces synchronously to the immediate caller. Nothing is
// retried here: a transient terminal failure is the caller's to retry.

use std::io;

/// Everything that can go wrong while selecting a table, reading a key,
/// building a [`KeyEvent`](crate::KeyEvent), or comparing one.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// The running OS belongs to neither the POSIX nor the Windows family.
    #[error("platform `{0}` is not supported")]
    UnsupportedPlatform(String),

    /// Querying, setting, or restoring terminal attributes failed, or the
    /// byte read itself failed.
    #[error("terminal I/O failed: {0}")]
    TerminalIo(#[from] io::Error),

    /// A key was compared against a value that is neither a key, text,
    /// nor a code sequence.
    #[error("cannot compare a key with `{type_name}`; expected a key, text, or code sequence")]
    ComparisonType {
        /// Name of the offending type.
        type_name: &'static str,
    },

    /// A key event needs at least one code.
    #[error("a key event needs at least one code")]
    EmptyCodes,

    /// Only single-code keys can be printable.
    #[error("a printable key must consist of exactly one code")]
    PrintableMultiCode,

    /// The code has no character reinterpretation (surrogate or out of range).
    #[error("code {0} is not a valid character")]
    InvalidCode(u32),
}

/// Convenience alias used across both crates.
pub type Result<T, E = KeyError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts_to_terminal_io() {
        let err: KeyError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, KeyError::TerminalIo(_)));
        assert_eq!(err.to_string(), "terminal I/O failed: eof");
    }

    #[test]
    fn unsupported_platform_names_the_os() {
        let err = KeyError::UnsupportedPlatform("haiku".into());
        assert_eq!(err.to_string(), "platform `haiku` is not supported");
    }

    #[test]
    fn comparison_type_names_the_type() {
        let err = KeyError::ComparisonType { type_name: "f64" };
        assert!(err.to_string().contains("`f64`"));
    }
}
