//! Byte-at-a-time UTF-8 validation for string bodies.
//!
//! The validator keeps only the number of continuation bytes still owed and
//! the range the next one must fall in, so a multi-byte sequence may be split
//! across any number of chunks.

use crate::error::LexicalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Utf8Validator {
    remaining: u8,
    lower: u8,
    upper: u8,
}

impl Default for Utf8Validator {
    fn default() -> Self {
        Self {
            remaining: 0,
            lower: 0x80,
            upper: 0xBF,
        }
    }
}

impl Utf8Validator {
    /// Whether a multi-byte sequence is in progress.
    #[inline]
    pub(crate) fn is_pending(&self) -> bool {
        self.remaining > 0
    }

    /// Feed one non-ASCII byte, or any byte while a sequence is pending.
    pub(crate) fn feed(&mut self, byte: u8) -> Result<(), LexicalError> {
        if self.remaining > 0 {
            if !(self.lower..=self.upper).contains(&byte) {
                return Err(LexicalError::InvalidUtf8);
            }
            self.remaining -= 1;
            self.lower = 0x80;
            self.upper = 0xBF;
            return Ok(());
        }
        let (remaining, lower, upper) = match byte {
            0x00..=0x7F => (0, 0x80, 0xBF),
            0xC2..=0xDF => (1, 0x80, 0xBF),
            0xE0 => (2, 0xA0, 0xBF),
            0xE1..=0xEC | 0xEE..=0xEF => (2, 0x80, 0xBF),
            0xED => (2, 0x80, 0x9F),
            0xF0 => (3, 0x90, 0xBF),
            0xF1..=0xF3 => (3, 0x80, 0xBF),
            0xF4 => (3, 0x80, 0x8F),
            _ => return Err(LexicalError::InvalidUtf8),
        };
        *self = Self {
            remaining,
            lower,
            upper,
        };
        Ok(())
    }
}
