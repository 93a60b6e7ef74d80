//! Byte cursor over the chunk handed to a single `feed` call, plus the
//! absolute position bookkeeping that survives across calls.
//!
//! The cursor is rebuilt for every chunk. Its [`Position`] is seeded from the
//! parser's stored position and written back once the chunk has been
//! processed, so offsets, lines and columns are continuous over the whole
//! stream no matter how the input was split.
#![expect(clippy::inline_always)]

use core::fmt;

/// A location in the input stream.
///
/// `offset` counts bytes from the start of the stream (0-based). `line` and
/// `column` are 1-based; columns are counted in bytes, not characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Absolute byte offset from the start of the input.
    pub offset: usize,
    /// Line number, starting at 1.
    pub line: usize,
    /// Byte column within the line, starting at 1.
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    #[inline(always)]
    fn advance_byte(&mut self, byte: u8) {
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Advance over `n` bytes known not to contain a line feed.
    #[inline(always)]
    fn advance_inline(&mut self, n: usize) {
        self.offset += n;
        self.column += n;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "byte {} (line {}, column {})",
            self.offset, self.line, self.column
        )
    }
}

/// A read-only view over the current chunk with a read index into it.
#[derive(Debug)]
pub(crate) struct ByteCursor<'a> {
    bytes: &'a [u8],
    index: usize,
    position: Position,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(bytes: &'a [u8], position: Position) -> Self {
        Self {
            bytes,
            index: 0,
            position,
        }
    }

    #[inline(always)]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.index).copied()
    }

    /// Consume one byte. Does nothing when the chunk is exhausted.
    #[inline(always)]
    pub(crate) fn bump(&mut self) {
        if let Some(&byte) = self.bytes.get(self.index) {
            self.index += 1;
            self.position.advance_byte(byte);
        }
    }

    /// Consume bytes while `predicate` holds. The predicate must reject
    /// `b'\n'`; use [`ByteCursor::bump`] for input that may span lines.
    #[inline]
    pub(crate) fn advance_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let rest = &self.bytes[self.index..];
        let run = rest.iter().take_while(|&&b| predicate(b)).count();
        debug_assert!(!rest[..run].contains(&b'\n'));
        self.index += run;
        self.position.advance_inline(run);
        run
    }

    /// Skip the four JSON whitespace bytes.
    #[inline]
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(byte @ (b' ' | b'\t' | b'\n' | b'\r')) = self.peek() {
            self.index += 1;
            self.position.advance_byte(byte);
        }
    }

    /// Consume the remainder of the chunk.
    pub(crate) fn skip_rest(&mut self) {
        while self.peek().is_some() {
            self.bump();
        }
    }

    #[inline(always)]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    pub(crate) fn position(&self) -> Position {
        self.position
    }

    /// Bytes in `[from, to)` of the current chunk.
    #[inline(always)]
    pub(crate) fn slice(&self, from: usize, to: usize) -> &'a [u8] {
        &self.bytes[from..to]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_lines_and_columns() {
        let mut cursor = ByteCursor::new(b" \n\t{", Position::default());
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), Some(b'{'));
        assert_eq!(
            cursor.position(),
            Position {
                offset: 3,
                line: 2,
                column: 2
            }
        );
    }

    #[test]
    fn position_continues_across_chunks() {
        let mut first = ByteCursor::new(b"ab\n", Position::default());
        first.skip_rest();
        let mut second = ByteCursor::new(b"cd", first.position());
        second.bump();
        assert_eq!(
            second.position(),
            Position {
                offset: 4,
                line: 2,
                column: 2
            }
        );
    }

    #[test]
    fn advance_while_stops_at_predicate() {
        let mut cursor = ByteCursor::new(b"1234,", Position::default());
        assert_eq!(cursor.advance_while(|b| b.is_ascii_digit()), 4);
        assert_eq!(cursor.peek(), Some(b','));
        assert_eq!(cursor.slice(0, cursor.index()), b"1234");
        assert_eq!(cursor.position().column, 5);
    }

    #[test]
    fn bump_past_end_is_noop() {
        let mut cursor = ByteCursor::new(b"", Position::default());
        cursor.bump();
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.len(), 0);
    }
}
