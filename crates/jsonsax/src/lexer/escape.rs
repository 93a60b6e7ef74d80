//! Decoding of four-digit `\uXXXX` escapes without buffering bytes.
//!
//! [`UnicodeEscape`] accumulates exactly four ASCII hexadecimal digits into a
//! UTF-16 code unit as they arrive, so an escape split across chunks resumes
//! where it stopped. Pairing surrogates is left to the lexer.

use crate::error::LexicalError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct UnicodeEscape {
    acc: u16,
    len: u8,
}

impl UnicodeEscape {
    /// Convert a single ASCII hex digit into its 0..=15 value.
    #[inline]
    fn hex_val(byte: u8) -> Option<u16> {
        match byte {
            b'0'..=b'9' => Some(u16::from(byte - b'0')),
            b'a'..=b'f' => Some(u16::from(byte - b'a' + 10)),
            b'A'..=b'F' => Some(u16::from(byte - b'A' + 10)),
            _ => None,
        }
    }

    /// Feed one digit. Returns the code unit once the fourth digit arrives,
    /// and resets for the next escape.
    pub(crate) fn feed(&mut self, byte: u8) -> Result<Option<u16>, LexicalError> {
        let digit = Self::hex_val(byte).ok_or(LexicalError::InvalidUnicodeEscapeChar(byte))?;
        self.acc = (self.acc << 4) | digit;
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }
        let unit = self.acc;
        *self = Self::default();
        Ok(Some(unit))
    }
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Combine a high and a low surrogate into the code point they encode.
pub(crate) fn combine_surrogates(high: u16, low: u16) -> Option<char> {
    let high = u32::from(high) - 0xD800;
    let low = u32::from(low) - 0xDC00;
    char::from_u32(0x1_0000 + (high << 10) + low)
}
