// SPDX-License-Identifier: MIT
//
// The decoded result of one keypress.
//
// A `KeyEvent` is built once, validated at construction, and never
// changes afterwards. Its identity is the code sequence; the text and
// printability flag are derived from it, and the description is a label
// for humans that plays no part in equality.

use std::any::{Any, type_name};
use std::fmt;

use crate::error::{KeyError, Result};

/// One decoded keypress.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    text: String,
    codes: Vec<u32>,
    printable: bool,
    description: String,
}

impl KeyEvent {
    /// Build a key event from its parts.
    ///
    /// # Errors
    ///
    /// - [`KeyError::EmptyCodes`] if `codes` is empty.
    /// - [`KeyError::PrintableMultiCode`] if `printable` is set on a
    ///   sequence longer than one code.
    pub fn new(
        text: impl Into<String>,
        codes: impl Into<Vec<u32>>,
        printable: bool,
        description: impl Into<String>,
    ) -> Result<Self> {
        let codes = codes.into();
        if codes.is_empty() {
            return Err(KeyError::EmptyCodes);
        }
        if printable && codes.len() != 1 {
            return Err(KeyError::PrintableMultiCode);
        }
        Ok(Self {
            text: text.into(),
            codes,
            printable,
            description: description.into(),
        })
    }

    /// The codes reinterpreted as characters and concatenated.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Raw codes in arrival order. Never empty.
    #[must_use]
    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    /// Whether this is a single printable character.
    #[must_use]
    pub const fn is_printable(&self) -> bool {
        self.printable
    }

    /// Human-readable label ("Ctrl + A", "Up Arrow", "x").
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    // ── Comparisons ─────────────────────────────────────────────────────

    /// Same text, codes, and printability. The description is ignored.
    #[must_use]
    pub fn equals_event(&self, other: &Self) -> bool {
        self.text == other.text && self.codes == other.codes && self.printable == other.printable
    }

    /// Same code sequence.
    #[must_use]
    pub fn equals_codes(&self, codes: &[u32]) -> bool {
        self.codes == codes
    }

    /// Same text.
    #[must_use]
    pub fn equals_text(&self, text: &str) -> bool {
        self.text == text
    }

    /// Compare against a value whose type is only known at runtime.
    ///
    /// Accepts another [`KeyEvent`], a `String` or `&'static str` (text
    /// comparison), or a `Vec<u32>` (code comparison).
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::ComparisonType`] for any other type.
    pub fn try_eq<T: Any>(&self, other: &T) -> Result<bool> {
        let other: &dyn Any = other;
        if let Some(event) = other.downcast_ref::<Self>() {
            Ok(self.equals_event(event))
        } else if let Some(text) = other.downcast_ref::<String>() {
            Ok(self.equals_text(text))
        } else if let Some(text) = other.downcast_ref::<&'static str>() {
            Ok(self.equals_text(text))
        } else if let Some(codes) = other.downcast_ref::<Vec<u32>>() {
            Ok(self.equals_codes(codes))
        } else {
            Err(KeyError::ComparisonType {
                type_name: type_name::<T>(),
            })
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for KeyEvent {
    fn eq(&self, other: &Self) -> bool {
        self.equals_event(other)
    }
}

impl Eq for KeyEvent {}

impl PartialEq<str> for KeyEvent {
    fn eq(&self, other: &str) -> bool {
        self.equals_text(other)
    }
}

impl PartialEq<&str> for KeyEvent {
    fn eq(&self, other: &&str) -> bool {
        self.equals_text(other)
    }
}

impl PartialEq<String> for KeyEvent {
    fn eq(&self, other: &String) -> bool {
        self.equals_text(other)
    }
}

impl PartialEq<[u32]> for KeyEvent {
    fn eq(&self, other: &[u32]) -> bool {
        self.equals_codes(other)
    }
}

impl PartialEq<&[u32]> for KeyEvent {
    fn eq(&self, other: &&[u32]) -> bool {
        self.equals_codes(other)
    }
}

impl PartialEq<Vec<u32>> for KeyEvent {
    fn eq(&self, other: &Vec<u32>) -> bool {
        self.equals_codes(other)
    }
}

impl<const N: usize> PartialEq<[u32; N]> for KeyEvent {
    fn eq(&self, other: &[u32; N]) -> bool {
        self.equals_codes(other)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
