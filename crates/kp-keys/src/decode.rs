// SPDX-License-Identifier: MIT
//
// Decoder — captured codes in, `KeyEvent` out.
//
// Pure and stateless: the only input besides the codes is the platform
// `KeyTable`. Description rules, first match wins:
//
//   1. single code 1–26          → "Ctrl + <LETTER>"  (even 9 and 13)
//   2. not printable             → named key label, else "Special (<tuple>)"
//   3. single punctuation code   → the literal
//   4. anything else             → the character itself

use std::fmt::Write as _;

use tracing::trace;

use crate::error::{KeyError, Result};
use crate::event::KeyEvent;
use crate::table::{self, KeyTable};

/// Decode a captured code sequence into a [`KeyEvent`].
///
/// # Errors
///
/// - [`KeyError::EmptyCodes`] if `codes` is empty.
/// - [`KeyError::InvalidCode`] if a code has no character reinterpretation.
pub fn decode(table: &KeyTable, codes: &[u32]) -> Result<KeyEvent> {
    let text = codes_to_text(codes)?;
    let printable = is_printable_sequence(codes);
    let description = describe(table, codes, printable);
    trace!(?codes, printable, %description, "decoded key");
    KeyEvent::new(text, codes, printable, description)
}

/// Describe a code sequence given an explicit printability flag.
///
/// `decode` computes the flag itself; this entry point lets callers ask how
/// a sequence would be labelled either way (e.g. `(33,)` marked
/// non-printable reads `Special ((33,))`).
#[must_use]
pub fn describe(table: &KeyTable, codes: &[u32], printable: bool) -> String {
    if let [code] = codes {
        if let Some(letter) = table::ctrl_letter_for_code(*code) {
            return format!("Ctrl + {letter}");
        }
    }

    if !printable {
        return table.named_key(codes).map_or_else(
            || format!("Special ({})", tuple_literal(codes)),
            |key| key.label().to_owned(),
        );
    }

    let Some(&first) = codes.first() else {
        return format!("Special ({})", tuple_literal(codes));
    };
    if let Some(ch) = table::special_character(first) {
        return ch.to_string();
    }
    char::from_u32(first).map_or_else(|| format!("Unknown({first})"), String::from)
}

/// Whether `codes` is exactly one printable character.
#[must_use]
pub fn is_printable_sequence(codes: &[u32]) -> bool {
    match codes {
        [code] => char::from_u32(*code).is_some_and(is_printable_char),
        _ => false,
    }
}

/// Printable: letters, digits, punctuation, symbols, and the plain space.
///
/// Control characters, every other kind of whitespace (tab, newline,
/// no-break space), and the invisible soft hyphen are not.
#[must_use]
pub fn is_printable_char(ch: char) -> bool {
    ch == ' ' || !(ch.is_control() || ch.is_whitespace() || ch == '\u{ad}')
}

/// Reinterpret each code as a character and concatenate.
fn codes_to_text(codes: &[u32]) -> Result<String> {
    if codes.is_empty() {
        return Err(KeyError::EmptyCodes);
    }
    codes
        .iter()
        .map(|&code| char::from_u32(code).ok_or(KeyError::InvalidCode(code)))
        .collect()
}

/// Render codes the way a tuple literal reads: `(33,)`, `(27, 91, 99)`.
fn tuple_literal(codes: &[u32]) -> String {
    let mut out = String::from("(");
    for (i, code) in codes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{code}");
    }
    if codes.len() == 1 {
        out.push(',');
    }
    out.push(')');
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{NamedKey, POSIX, WINDOWS};
    use pretty_assertions::assert_eq;

    // ── Printable ───────────────────────────────────────────────────────

    #[test]
    fn printable_ascii_decodes_to_itself() {
        for code in 32..=126u32 {
            let key = decode(&POSIX, &[code]).unwrap();
            let ch = char::from_u32(code).unwrap();
            assert!(key.is_printable(), "{code}");
            assert_eq!(key.text(), ch.to_string());
            // Space too: it is printable, so it never reaches "Spacebar".
            assert_eq!(key.description(), ch.to_string(), "{code}");
        }
    }

    #[test]
    fn capital_a() {
        let key = decode(&POSIX, &[65]).unwrap();
        assert_eq!(key.text(), "A");
        assert!(key.is_printable());
        assert_eq!(key.description(), "A");
    }

    #[test]
    fn latin1_letter_is_printable() {
        let key = decode(&WINDOWS, &[233]).unwrap();
        assert!(key.is_printable());
        assert_eq!(key.description(), "é");
    }

    #[test]
    fn printable_char_rules() {
        assert!(is_printable_char('a'));
        assert!(is_printable_char(' '));
        assert!(is_printable_char('~'));
        assert!(!is_printable_char('\t'));
        assert!(!is_printable_char('\x7f'));
        assert!(!is_printable_char('\u{85}'));
        assert!(!is_printable_char('\u{a0}'));
        assert!(!is_printable_char('\u{ad}'));
    }

    // ── Control letters ─────────────────────────────────────────────────

    #[test]
    fn control_letters() {
        for (letter, code) in table::ctrl_letters() {
            let key = decode(&POSIX, &[code]).unwrap();
            assert!(!key.is_printable());
            assert_eq!(
                key.description(),
                format!("Ctrl + {}", letter.to_ascii_uppercase())
            );
        }
    }

    #[test]
    fn control_letter_beats_enter_and_tab() {
        assert_eq!(decode(&POSIX, &[13]).unwrap().description(), "Ctrl + M");
        assert_eq!(decode(&POSIX, &[9]).unwrap().description(), "Ctrl + I");
        assert_eq!(decode(&WINDOWS, &[8]).unwrap().description(), "Ctrl + H");
        assert_eq!(describe(&POSIX, &[13], false), "Ctrl + M");
    }

    // ── Named keys ──────────────────────────────────────────────────────

    #[test]
    fn posix_named_keys() {
        let cases: [(&[u32], &str); 8] = [
            (&[27], "Esc"),
            (&[127], "Backspace"),
            (&[27, 91, 51, 126], "Delete"),
            (&[27, 91, 72], "Home"),
            (&[27, 91, 70], "End"),
            (&[27, 91, 65], "Up Arrow"),
            (&[27, 91, 66], "Down Arrow"),
            (&[27, 91, 68], "Left Arrow"),
        ];
        for (codes, label) in cases {
            let key = decode(&POSIX, codes).unwrap();
            assert!(!key.is_printable());
            assert_eq!(key.description(), label);
        }
        assert_eq!(decode(&POSIX, &[27, 91, 67]).unwrap().description(), "Right Arrow");
    }

    #[test]
    fn windows_named_keys() {
        let cases: [(&[u32], &str); 7] = [
            (&[224, 83], "Delete"),
            (&[224, 71], "Home"),
            (&[224, 79], "End"),
            (&[224, 72], "Up Arrow"),
            (&[224, 80], "Down Arrow"),
            (&[224, 77], "Right Arrow"),
            (&[224, 75], "Left Arrow"),
        ];
        for (codes, label) in cases {
            assert_eq!(decode(&WINDOWS, codes).unwrap().description(), label);
        }
    }

    #[test]
    fn every_named_sequence_round_trips_on_posix() {
        // ENTER and TAB collide with Ctrl+M / Ctrl+I and SPACEBAR is
        // printable; all other keys must resolve to their own label.
        for key in NamedKey::ALL {
            let codes = POSIX.sequence(key);
            let decoded = decode(&POSIX, codes).unwrap();
            match key {
                NamedKey::Enter | NamedKey::Tab | NamedKey::Spacebar => {}
                _ => assert_eq!(decoded.description(), key.label()),
            }
        }
    }

    #[test]
    fn named_labels_when_forced_non_printable() {
        assert_eq!(describe(&POSIX, &[32], false), "Spacebar");
        assert_eq!(describe(&POSIX, &[27], false), "Esc");
    }

    #[test]
    fn windows_numpad_arrow_is_special() {
        assert_eq!(
            decode(&WINDOWS, &[0, 72]).unwrap().description(),
            "Special ((0, 72))"
        );
    }

    // ── Special ─────────────────────────────────────────────────────────

    #[test]
    fn unknown_escape_sequence() {
        let key = decode(&POSIX, &[27, 91, 99]).unwrap();
        assert!(!key.is_printable());
        assert_eq!(key.description(), "Special ((27, 91, 99))");
    }

    #[test]
    fn punctuation_forced_non_printable() {
        assert_eq!(describe(&POSIX, &[33], false), "Special ((33,))");
    }

    #[test]
    fn printable_punctuation_is_literal() {
        assert_eq!(describe(&POSIX, &[33], true), "!");
    }

    #[test]
    fn nul_and_del_are_special_or_named() {
        assert_eq!(decode(&POSIX, &[0]).unwrap().description(), "Special ((0,))");
        assert_eq!(decode(&WINDOWS, &[127]).unwrap().description(), "Special ((127,))");
    }

    #[test]
    fn tuple_literal_formats() {
        assert_eq!(tuple_literal(&[33]), "(33,)");
        assert_eq!(tuple_literal(&[27, 91, 99]), "(27, 91, 99)");
    }

    // ── Errors and text ─────────────────────────────────────────────────

    #[test]
    fn empty_codes_error() {
        assert!(matches!(decode(&POSIX, &[]), Err(KeyError::EmptyCodes)));
    }

    #[test]
    fn surrogate_code_error() {
        assert!(matches!(
            decode(&POSIX, &[0xD800]),
            Err(KeyError::InvalidCode(0xD800))
        ));
    }

    #[test]
    fn escape_sequence_text() {
        let key = decode(&POSIX, &[27, 91, 65]).unwrap();
        assert_eq!(key.text(), "\x1b[A");
        assert_eq!(key.codes(), &[27, 91, 65]);
    }

    #[test]
    fn windows_extended_prefix_text() {
        let key = decode(&WINDOWS, &[224, 72]).unwrap();
        assert_eq!(key.text(), "\u{e0}H");
        assert!(!key.is_printable());
    }
}
