// SPDX-License-Identifier: MIT
//
// kp-keys — key code tables and decoder for keypress.
//
// Turns a captured sequence of raw key codes into a `KeyEvent`: the text
// the codes spell, whether it is a single printable character, and a
// label such as "Ctrl + A" or "Up Arrow". Capturing the codes from a
// terminal is `kp-term`'s job; this crate never touches the terminal.
//
// The platform-specific half of the mapping (arrows, Home/End, Delete,
// Backspace) lives in a `KeyTable` chosen once per process and passed in
// explicitly, so either platform's behavior can be exercised anywhere.

pub mod decode;
pub mod error;
pub mod event;
pub mod table;

pub use decode::{decode, describe};
pub use error::{KeyError, Result};
pub use event::KeyEvent;
pub use table::{KeyTable, NamedKey, Platform};
