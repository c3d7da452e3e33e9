// SPDX-License-Identifier: MIT
//
// Key code tables — the fixed mapping between raw codes and key identities.
//
// Two kinds of data live here:
//
// - Platform-independent tables: control letters, alphabet, digits,
//   punctuation, the function-key placeholders, and the four named keys
//   that every terminal encodes the same way (Enter, Tab, Esc, Space).
// - Platform-dependent sequences: Backspace, Delete, Home, End, arrows,
//   numpad arrows, Ctrl/Option+Enter. POSIX terminals send VT100-style
//   `ESC [` sequences; the Windows console sends a `0x00` / `0xE0` prefix
//   followed by a scan code.
//
// The platform-dependent half is a `KeyTable` value, picked once and
// handed to whoever needs it. Nothing here is mutable.

use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{KeyError, Result};

// ─── Platform ───────────────────────────────────────────────────────────────

/// Supported platform families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Linux, macOS and the BSDs: termios + VT100 escape sequences.
    Posix,
    /// Windows console: `_getch` with `0x00` / `0xE0` extended-key prefixes.
    Windows,
}

impl Platform {
    /// Detect the platform family of the running process.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnsupportedPlatform`] on any OS outside the two
    /// supported families. There is no fallback table.
    pub fn detect() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name (as in [`std::env::consts::OS`]) to its family.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnsupportedPlatform`] for unknown names.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" | "macos" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Ok(Self::Posix),
            "windows" => Ok(Self::Windows),
            other => Err(KeyError::UnsupportedPlatform(other.to_owned())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posix => f.write_str("posix"),
            Self::Windows => f.write_str("windows"),
        }
    }
}

// ─── Platform-independent tables ────────────────────────────────────────────

/// `Enter` / carriage return.
pub const ENTER: &[u32] = &[13];
/// Horizontal tab.
pub const TAB: &[u32] = &[9];
/// A lone escape byte.
pub const ESC: &[u32] = &[27];
/// The space bar.
pub const SPACEBAR: &[u32] = &[32];

/// The escape byte that opens every POSIX multi-byte sequence.
pub const ESC_BYTE: u32 = 27;

/// Codes produced by Ctrl + A through Ctrl + Z.
pub const CTRL_LETTER_CODES: RangeInclusive<u32> = 1..=26;

/// Printable ASCII range used as the last resort in [`KeyTable::resolve_name`].
pub const PRINTABLE_ASCII: RangeInclusive<u32> = 32..=126;

/// Base for the function-key placeholders: `F<n>` maps to `111 + n`.
const FUNCTION_KEY_BASE: u32 = 111;

/// ASCII punctuation and symbols (33–126, alphanumerics excluded).
#[rustfmt::skip]
pub const SPECIAL_CHARACTERS: [(u32, char); 32] = [
    (33, '!'), (34, '"'), (35, '#'), (36, '$'), (37, '%'), (38, '&'),
    (39, '\''), (40, '('), (41, ')'), (42, '*'), (43, '+'), (44, ','),
    (45, '-'), (46, '.'), (47, '/'),
    (58, ':'), (59, ';'), (60, '<'), (61, '='), (62, '>'), (63, '?'),
    (64, '@'),
    (91, '['), (92, '\\'), (93, ']'), (94, '^'), (95, '_'), (96, '`'),
    (123, '{'), (124, '|'), (125, '}'), (126, '~'),
];

/// Control code for Ctrl + `letter` (`'a'` → 1 … `'z'` → 26).
///
/// Only lowercase ASCII letters have an entry.
#[must_use]
pub const fn ctrl_letter_code(letter: char) -> Option<u32> {
    if letter.is_ascii_lowercase() {
        Some(letter as u32 - 96)
    } else {
        None
    }
}

/// Uppercase letter named by a control code (1 → `'A'` … 26 → `'Z'`).
#[must_use]
pub fn ctrl_letter_for_code(code: u32) -> Option<char> {
    if CTRL_LETTER_CODES.contains(&code) {
        char::from_u32(code + 64)
    } else {
        None
    }
}

/// All 26 control-letter pairs, `('a', 1)` through `('z', 26)`.
pub fn ctrl_letters() -> impl Iterator<Item = (char, u32)> {
    ('a'..='z').zip(CTRL_LETTER_CODES)
}

/// ASCII code of an `A`-`Z` / `a`-`z` letter.
#[must_use]
pub const fn alphabet_code(letter: char) -> Option<u32> {
    if letter.is_ascii_alphabetic() {
        Some(letter as u32)
    } else {
        None
    }
}

/// ASCII code of a `0`-`9` digit (48–57).
#[must_use]
pub const fn digit_code(digit: char) -> Option<u32> {
    if digit.is_ascii_digit() {
        Some(digit as u32)
    } else {
        None
    }
}

/// Placeholder code for `"F1"` … `"F12"` (112–123).
///
/// These are not scan codes any terminal actually sends. They are kept as
/// reference data and never consulted while decoding.
#[must_use]
pub fn function_key_code(name: &str) -> Option<u32> {
    let n: u32 = name.strip_prefix('F')?.parse().ok()?;
    (1..=12).contains(&n).then_some(FUNCTION_KEY_BASE + n)
}

/// All twelve function-key placeholders, `("F1", 112)` through `("F12", 123)`.
pub fn function_keys() -> impl Iterator<Item = (String, u32)> {
    (1..=12).map(|n| (format!("F{n}"), FUNCTION_KEY_BASE + n))
}

/// Literal punctuation character for a code, if it is one.
#[must_use]
pub fn special_character(code: u32) -> Option<char> {
    SPECIAL_CHARACTERS
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, ch)| ch)
}

// ─── Named keys ─────────────────────────────────────────────────────────────

/// Non-printable keys with a fixed name.
///
/// Variant order is match priority: the decoder and [`KeyTable::resolve_name`]
/// walk [`NamedKey::ALL`] front to back and stop at the first hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Tab,
    Esc,
    Spacebar,
    Backspace,
    Delete,
    Home,
    End,
    UpArrow,
    DownArrow,
    RightArrow,
    LeftArrow,
}

impl NamedKey {
    /// Every named key, in match priority order.
    pub const ALL: [Self; 12] = [
        Self::Enter,
        Self::Tab,
        Self::Esc,
        Self::Spacebar,
        Self::Backspace,
        Self::Delete,
        Self::Home,
        Self::End,
        Self::UpArrow,
        Self::DownArrow,
        Self::RightArrow,
        Self::LeftArrow,
    ];

    /// Human-readable label used in key descriptions ("Up Arrow").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Enter => "Enter",
            Self::Tab => "Tab",
            Self::Esc => "Esc",
            Self::Spacebar => "Spacebar",
            Self::Backspace => "Backspace",
            Self::Delete => "Delete",
            Self::Home => "Home",
            Self::End => "End",
            Self::UpArrow => "Up Arrow",
            Self::DownArrow => "Down Arrow",
            Self::RightArrow => "Right Arrow",
            Self::LeftArrow => "Left Arrow",
        }
    }

    /// Table constant name ("`UP_ARROW`"), as returned by
    /// [`KeyTable::resolve_name`].
    #[must_use]
    pub const fn constant_name(self) -> &'static str {
        match self {
            Self::Enter => "ENTER",
            Self::Tab => "TAB",
            Self::Esc => "ESC",
            Self::Spacebar => "SPACEBAR",
            Self::Backspace => "BACKSPACE",
            Self::Delete => "DELETE",
            Self::Home => "HOME",
            Self::End => "END",
            Self::UpArrow => "UP_ARROW",
            Self::DownArrow => "DOWN_ARROW",
            Self::RightArrow => "RIGHT_ARROW",
            Self::LeftArrow => "LEFT_ARROW",
        }
    }
}

impl fmt::Display for NamedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── KeyTable ───────────────────────────────────────────────────────────────

/// Platform-dependent key sequences.
///
/// Obtain one with [`KeyTable::detect`] or [`KeyTable::for_platform`] and
/// pass it to the decoder and reader. Both tables are `'static`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTable {
    /// Which family these sequences belong to.
    pub platform: Platform,
    pub backspace: &'static [u32],
    pub delete: &'static [u32],
    pub home: &'static [u32],
    pub end: &'static [u32],
    pub up_arrow: &'static [u32],
    pub down_arrow: &'static [u32],
    pub right_arrow: &'static [u32],
    pub left_arrow: &'static [u32],
    /// Numpad arrows. Same as the arrow keys on POSIX.
    pub numpad_up_arrow: &'static [u32],
    pub numpad_down_arrow: &'static [u32],
    pub numpad_right_arrow: &'static [u32],
    pub numpad_left_arrow: &'static [u32],
    pub ctrl_enter: &'static [u32],
    /// Alias of `ctrl_enter` on both families.
    pub option_enter: &'static [u32],
}

/// VT100-style sequences sent by POSIX terminals.
pub static POSIX: KeyTable = KeyTable {
    platform: Platform::Posix,
    backspace: &[127],
    delete: &[27, 91, 51, 126],
    home: &[27, 91, 72],
    end: &[27, 91, 70],
    up_arrow: &[27, 91, 65],
    down_arrow: &[27, 91, 66],
    right_arrow: &[27, 91, 67],
    left_arrow: &[27, 91, 68],
    numpad_up_arrow: &[27, 91, 65],
    numpad_down_arrow: &[27, 91, 66],
    numpad_right_arrow: &[27, 91, 67],
    numpad_left_arrow: &[27, 91, 68],
    ctrl_enter: &[27, 13],
    option_enter: &[27, 13],
};

/// `_getch` sequences from the Windows console.
pub static WINDOWS: KeyTable = KeyTable {
    platform: Platform::Windows,
    backspace: &[8],
    delete: &[224, 83],
    home: &[224, 71],
    end: &[224, 79],
    up_arrow: &[224, 72],
    down_arrow: &[224, 80],
    right_arrow: &[224, 77],
    left_arrow: &[224, 75],
    numpad_up_arrow: &[0, 72],
    numpad_down_arrow: &[0, 80],
    numpad_right_arrow: &[0, 77],
    numpad_left_arrow: &[0, 75],
    ctrl_enter: &[10],
    option_enter: &[10],
};

impl KeyTable {
    /// Table for the running platform.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnsupportedPlatform`] outside the two families.
    pub fn detect() -> Result<&'static Self> {
        Platform::detect().map(Self::for_platform)
    }

    /// Table for an explicit platform family.
    #[must_use]
    pub fn for_platform(platform: Platform) -> &'static Self {
        match platform {
            Platform::Posix => &POSIX,
            Platform::Windows => &WINDOWS,
        }
    }

    /// The code sequence of a named key on this platform.
    #[must_use]
    pub const fn sequence(&self, key: NamedKey) -> &'static [u32] {
        match key {
            NamedKey::Enter => ENTER,
            NamedKey::Tab => TAB,
            NamedKey::Esc => ESC,
            NamedKey::Spacebar => SPACEBAR,
            NamedKey::Backspace => self.backspace,
            NamedKey::Delete => self.delete,
            NamedKey::Home => self.home,
            NamedKey::End => self.end,
            NamedKey::UpArrow => self.up_arrow,
            NamedKey::DownArrow => self.down_arrow,
            NamedKey::RightArrow => self.right_arrow,
            NamedKey::LeftArrow => self.left_arrow,
        }
    }

    /// First named key whose sequence equals `codes` exactly.
    #[must_use]
    pub fn named_key(&self, codes: &[u32]) -> Option<NamedKey> {
        NamedKey::ALL
            .into_iter()
            .find(|&key| self.sequence(key) == codes)
    }

    /// Best-effort name for a single code.
    ///
    /// Punctuation first, then the first named key whose sequence *starts*
    /// with `code` (so 27 is `ESC`, never `UP_ARROW`), then printable ASCII,
    /// else `Unknown(<code>)`.
    #[must_use]
    pub fn resolve_name(&self, code: u32) -> String {
        if let Some(ch) = special_character(code) {
            return ch.to_string();
        }
        if let Some(key) = NamedKey::ALL
            .into_iter()
            .find(|&key| self.sequence(key).first() == Some(&code))
        {
            return key.constant_name().to_owned();
        }
        if PRINTABLE_ASCII.contains(&code) {
            if let Some(ch) = char::from_u32(code) {
                return ch.to_string();
            }
        }
        format!("Unknown({code})")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
