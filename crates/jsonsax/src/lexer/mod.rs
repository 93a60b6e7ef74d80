//! Incremental tokenizer.
//!
//! The lexer is a byte-driven state machine that can stop at any byte when a
//! chunk runs out and resume at the next byte of the following chunk. A
//! literal that lies entirely inside one chunk and needs no decoding is
//! handed out as a borrowed slice of that chunk. Anything else is copied
//! into the scratch buffer as it is scanned:
//!
//! - the part of the literal seen before a chunk ended,
//! - the part before an escape sequence, plus the decoded escape.
//!
//! `run_start` marks the first byte of the current chunk that belongs to the
//! literal and has not been copied yet.

mod escape;
mod literal;
mod token;
mod utf8;

use alloc::borrow::Cow;
use core::mem;

use bstr::ByteSlice;

use self::{
    escape::{UnicodeEscape, combine_surrogates, is_high_surrogate, is_low_surrogate},
    literal::{ExpectedLiteral, Step},
    utf8::Utf8Validator,
};
pub(crate) use self::token::Token;
pub use self::token::TokenKind;
use crate::{
    Position,
    cursor::ByteCursor,
    error::{LexicalError, ParserError},
    number,
    options::{IntegerOverflow, ParserOptions},
    scratch::ScratchBuffer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Between,
    Keyword(ExpectedLiteral),
    Number(NumberPhase),
    String(StringPhase),
    Comment(CommentPhase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberPhase {
    /// After `-`.
    Sign,
    /// After a leading `0`.
    Zero,
    Integer,
    /// After `.`.
    Point,
    Fraction,
    /// After `e` or `E`.
    Exponent,
    /// After the exponent's `+` or `-`.
    ExponentSign,
    ExponentDigits,
}

impl NumberPhase {
    /// Whether the literal scanned so far is a complete number.
    fn is_complete(self) -> bool {
        matches!(
            self,
            NumberPhase::Zero
                | NumberPhase::Integer
                | NumberPhase::Fraction
                | NumberPhase::ExponentDigits
        )
    }

    fn is_integral(self) -> bool {
        matches!(self, NumberPhase::Zero | NumberPhase::Integer)
    }

    fn consumes_digit_runs(self) -> bool {
        matches!(
            self,
            NumberPhase::Integer | NumberPhase::Fraction | NumberPhase::ExponentDigits
        )
    }

    /// What an incomplete literal is waiting for digits after.
    fn after(self) -> &'static str {
        match self {
            NumberPhase::Sign => "'-'",
            NumberPhase::Point => "'.'",
            NumberPhase::Exponent | NumberPhase::ExponentSign => "exponent",
            _ => "number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringPhase {
    Body,
    /// After a backslash.
    Escape,
    /// Inside `\uXXXX`. `high` is set when this escape must be the low half
    /// of a surrogate pair.
    Unicode {
        high: Option<u16>,
        escape: UnicodeEscape,
    },
    /// A high surrogate was decoded; a `\` must follow.
    LowBackslash { high: u16 },
    /// A high surrogate and `\` were seen; a `u` must follow.
    LowU { high: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentPhase {
    /// After the first `/`.
    Slash,
    Line,
    Block,
    /// After a `*` inside a block comment.
    BlockStar,
}

/// A completed token whose text, if any, has not been materialized yet.
/// It holds no borrow, so the scan loop can keep `self` mutable.
#[derive(Debug)]
enum Emit {
    Token(Token<'static>),
    String { end: usize },
    Number { end: usize, integral: bool },
}

#[derive(Debug)]
pub(crate) struct Lexer {
    options: ParserOptions,
    state: State,
    scratch: ScratchBuffer,
    utf8: Utf8Validator,
    run_start: usize,
    token_start: Position,
}

impl Lexer {
    pub(crate) fn new(options: ParserOptions) -> Self {
        Self {
            options,
            state: State::Between,
            scratch: ScratchBuffer::new(),
            utf8: Utf8Validator::default(),
            run_start: 0,
            token_start: Position::default(),
        }
    }

    /// Must be called before scanning each new chunk.
    pub(crate) fn begin_chunk(&mut self) {
        self.run_start = 0;
    }

    /// Scan the next complete token from `cursor`, together with the
    /// position of its first byte.
    ///
    /// Returns `Ok(None)` once the chunk is exhausted, whether or not a
    /// literal is in progress. Feeding the next chunk resumes it.
    pub(crate) fn next_token<'s, 'a: 's>(
        &'s mut self,
        cursor: &mut ByteCursor<'a>,
    ) -> Result<Option<(Token<'s>, Position)>, ParserError> {
        if self.state == State::Between {
            self.scratch.clear();
        }
        let emit = loop {
            if self.state == State::Between {
                cursor.skip_whitespace();
            }
            let Some(byte) = cursor.peek() else {
                self.suspend(cursor);
                return Ok(None);
            };
            let at = cursor.position();
            let step = match self.state {
                State::Between => self.between(byte, cursor),
                State::Keyword(literal) => self.keyword(literal, byte, cursor),
                State::Number(phase) => self.number(phase, byte, cursor),
                State::String(phase) => self.string(phase, byte, cursor),
                State::Comment(phase) => self.comment(phase, byte, cursor),
            }
            .map_err(|err| ParserError::new(err, at))?;
            if let Some(emit) = step {
                break emit;
            }
        };

        let start = self.token_start;
        let token = match emit {
            Emit::Token(token) => token,
            Emit::String { end } => {
                let lossy = self.options.allow_invalid_utf8;
                string_token(self.literal(cursor, end), lossy, start)?
            }
            Emit::Number { end, integral } => {
                let policy = self.options.integer_overflow;
                number_token(self.literal(cursor, end), integral, policy, start)?
            }
        };
        Ok(Some((token, start)))
    }

    /// Flush the literal in progress at end of input.
    ///
    /// A complete pending number becomes a token. Any other unfinished
    /// literal is an error at `at`, unless partial values are allowed.
    pub(crate) fn finish(
        &mut self,
        at: Position,
    ) -> Result<Option<(Token<'_>, Position)>, ParserError> {
        let error = match mem::replace(&mut self.state, State::Between) {
            State::Between | State::Comment(CommentPhase::Line) => return Ok(None),
            State::Number(phase) if phase.is_complete() => {
                let start = self.token_start;
                let policy = self.options.integer_overflow;
                let token =
                    number_token(self.scratch.as_bytes(), phase.is_integral(), policy, start)?;
                return Ok(Some((token, start)));
            }
            State::Number(phase) => LexicalError::ExpectedDigit(phase.after()),
            State::Keyword(literal) => LexicalError::UnterminatedLiteral(literal.keyword().text()),
            State::String(_) => LexicalError::UnterminatedString,
            State::Comment(_) => LexicalError::UnterminatedComment,
        };
        if self.options.allow_partial_values {
            Ok(None)
        } else {
            Err(ParserError::new(error, at))
        }
    }

    /// Copy the uncopied part of the literal in progress before the chunk
    /// goes away.
    fn suspend(&mut self, cursor: &ByteCursor<'_>) {
        if matches!(
            self.state,
            State::Number(_) | State::String(StringPhase::Body)
        ) {
            self.flush(cursor, cursor.len());
        }
    }

    fn flush(&mut self, cursor: &ByteCursor<'_>, end: usize) {
        self.scratch.extend(cursor.slice(self.run_start, end));
        self.run_start = end;
    }

    /// The bytes of the literal ending at `end`: borrowed from the chunk if
    /// nothing was copied yet, otherwise completed in the scratch buffer.
    fn literal<'s, 'a: 's>(&'s mut self, cursor: &ByteCursor<'a>, end: usize) -> &'s [u8] {
        if self.scratch.in_use() {
            self.flush(cursor, end);
            self.scratch.as_bytes()
        } else {
            cursor.slice(self.run_start, end)
        }
    }

    fn between(
        &mut self,
        byte: u8,
        cursor: &mut ByteCursor<'_>,
    ) -> Result<Option<Emit>, LexicalError> {
        self.token_start = cursor.position();
        let token = match byte {
            b'{' => Token::BeginObject,
            b'}' => Token::EndObject,
            b'[' => Token::BeginArray,
            b']' => Token::EndArray,
            b':' => Token::Colon,
            b',' => Token::Comma,
            b'"' => {
                cursor.bump();
                self.run_start = cursor.index();
                self.utf8 = Utf8Validator::default();
                self.state = State::String(StringPhase::Body);
                return Ok(None);
            }
            b'-' | b'0'..=b'9' => {
                let phase = match byte {
                    b'-' => NumberPhase::Sign,
                    b'0' => NumberPhase::Zero,
                    _ => NumberPhase::Integer,
                };
                self.run_start = cursor.index();
                cursor.bump();
                self.state = State::Number(phase);
                return Ok(None);
            }
            b't' | b'f' | b'n' => {
                let literal = ExpectedLiteral::new(byte).ok_or(LexicalError::InvalidByte(byte))?;
                cursor.bump();
                self.state = State::Keyword(literal);
                return Ok(None);
            }
            b'/' if self.options.allow_comments => {
                cursor.bump();
                self.state = State::Comment(CommentPhase::Slash);
                return Ok(None);
            }
            _ => return Err(LexicalError::InvalidByte(byte)),
        };
        cursor.bump();
        Ok(Some(Emit::Token(token)))
    }

    fn keyword(
        &mut self,
        mut literal: ExpectedLiteral,
        byte: u8,
        cursor: &mut ByteCursor<'_>,
    ) -> Result<Option<Emit>, LexicalError> {
        match literal.step(byte) {
            Step::NeedMore => {
                cursor.bump();
                self.state = State::Keyword(literal);
                Ok(None)
            }
            Step::Done(keyword) => {
                cursor.bump();
                self.state = State::Between;
                Ok(Some(Emit::Token(keyword.token())))
            }
            Step::Reject => Err(LexicalError::InvalidLiteral {
                expected: literal.keyword().text(),
                found: byte,
            }),
        }
    }

    fn number(
        &mut self,
        phase: NumberPhase,
        byte: u8,
        cursor: &mut ByteCursor<'_>,
    ) -> Result<Option<Emit>, LexicalError> {
        let next = match (phase, byte) {
            (NumberPhase::Sign, b'0') => NumberPhase::Zero,
            (NumberPhase::Sign, b'1'..=b'9') | (NumberPhase::Integer, b'0'..=b'9') => {
                NumberPhase::Integer
            }
            (NumberPhase::Zero, b'0'..=b'9') => return Err(LexicalError::LeadingZero),
            (NumberPhase::Zero | NumberPhase::Integer, b'.') => NumberPhase::Point,
            (NumberPhase::Zero | NumberPhase::Integer | NumberPhase::Fraction, b'e' | b'E') => {
                NumberPhase::Exponent
            }
            (NumberPhase::Point | NumberPhase::Fraction, b'0'..=b'9') => NumberPhase::Fraction,
            (NumberPhase::Exponent, b'+' | b'-') => NumberPhase::ExponentSign,
            (
                NumberPhase::Exponent | NumberPhase::ExponentSign | NumberPhase::ExponentDigits,
                b'0'..=b'9',
            ) => NumberPhase::ExponentDigits,
            (phase, _) if phase.is_complete() => {
                // The terminating byte belongs to the next token.
                self.state = State::Between;
                return Ok(Some(Emit::Number {
                    end: cursor.index(),
                    integral: phase.is_integral(),
                }));
            }
            (phase, _) => return Err(LexicalError::ExpectedDigit(phase.after())),
        };
        if next.consumes_digit_runs() {
            cursor.advance_while(|b| b.is_ascii_digit());
        } else {
            cursor.bump();
        }
        self.state = State::Number(next);
        Ok(None)
    }

    fn string(
        &mut self,
        phase: StringPhase,
        byte: u8,
        cursor: &mut ByteCursor<'_>,
    ) -> Result<Option<Emit>, LexicalError> {
        match phase {
            StringPhase::Body => return self.string_body(byte, cursor),
            StringPhase::Escape => {
                let decoded = match byte {
                    b'"' | b'\\' | b'/' => byte,
                    b'b' => 0x08,
                    b'f' => 0x0C,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'u' => {
                        cursor.bump();
                        self.state = State::String(StringPhase::Unicode {
                            high: None,
                            escape: UnicodeEscape::default(),
                        });
                        return Ok(None);
                    }
                    _ => return Err(LexicalError::InvalidEscape(byte)),
                };
                self.scratch.extend(&[decoded]);
                cursor.bump();
                self.resume_body(cursor);
            }
            StringPhase::Unicode { high, mut escape } => {
                let unit = escape.feed(byte)?;
                cursor.bump();
                match unit {
                    None => self.state = State::String(StringPhase::Unicode { high, escape }),
                    Some(unit) => self.decode_unit(high, unit, cursor)?,
                }
            }
            StringPhase::LowBackslash { high } => {
                if byte != b'\\' {
                    return Err(LexicalError::UnpairedSurrogate(high));
                }
                cursor.bump();
                self.state = State::String(StringPhase::LowU { high });
            }
            StringPhase::LowU { high } => {
                if byte != b'u' {
                    return Err(LexicalError::UnpairedSurrogate(high));
                }
                cursor.bump();
                self.state = State::String(StringPhase::Unicode {
                    high: Some(high),
                    escape: UnicodeEscape::default(),
                });
            }
        }
        Ok(None)
    }

    fn string_body(
        &mut self,
        byte: u8,
        cursor: &mut ByteCursor<'_>,
    ) -> Result<Option<Emit>, LexicalError> {
        if self.utf8.is_pending() {
            self.utf8.feed(byte)?;
            cursor.bump();
            return Ok(None);
        }
        match byte {
            b'"' => {
                let end = cursor.index();
                cursor.bump();
                self.state = State::Between;
                return Ok(Some(Emit::String { end }));
            }
            b'\\' => {
                self.flush(cursor, cursor.index());
                cursor.bump();
                self.state = State::String(StringPhase::Escape);
            }
            0x00..=0x1F => return Err(LexicalError::ControlCharacter(byte)),
            0x20..=0x7F => {
                cursor.advance_while(|b| matches!(b, 0x20..=0x7F) && b != b'"' && b != b'\\');
            }
            _ => {
                if !self.options.allow_invalid_utf8 {
                    self.utf8.feed(byte)?;
                }
                cursor.bump();
            }
        }
        Ok(None)
    }

    /// Append the code point for a completed `\uXXXX` escape, pairing
    /// surrogates.
    fn decode_unit(
        &mut self,
        high: Option<u16>,
        unit: u16,
        cursor: &ByteCursor<'_>,
    ) -> Result<(), LexicalError> {
        let ch = match high {
            Some(high) if is_low_surrogate(unit) => {
                combine_surrogates(high, unit).ok_or(LexicalError::UnpairedSurrogate(high))?
            }
            Some(high) => return Err(LexicalError::UnpairedSurrogate(high)),
            None if is_high_surrogate(unit) => {
                self.state = State::String(StringPhase::LowBackslash { high: unit });
                return Ok(());
            }
            None => char::from_u32(u32::from(unit)).ok_or(LexicalError::UnpairedSurrogate(unit))?,
        };
        self.scratch.push_char(ch);
        self.resume_body(cursor);
        Ok(())
    }

    fn resume_body(&mut self, cursor: &ByteCursor<'_>) {
        self.run_start = cursor.index();
        self.state = State::String(StringPhase::Body);
    }

    fn comment(
        &mut self,
        phase: CommentPhase,
        byte: u8,
        cursor: &mut ByteCursor<'_>,
    ) -> Result<Option<Emit>, LexicalError> {
        let next = match (phase, byte) {
            (CommentPhase::Slash, b'/') => State::Comment(CommentPhase::Line),
            (CommentPhase::Slash, b'*') => State::Comment(CommentPhase::Block),
            (CommentPhase::Slash, _) => return Err(LexicalError::InvalidByte(byte)),
            (CommentPhase::Line, b'\n') | (CommentPhase::BlockStar, b'/') => State::Between,
            (CommentPhase::Line, _) => {
                cursor.advance_while(|b| b != b'\n');
                return Ok(None);
            }
            (CommentPhase::Block | CommentPhase::BlockStar, b'*') => {
                State::Comment(CommentPhase::BlockStar)
            }
            (CommentPhase::Block, b'\n') | (CommentPhase::BlockStar, _) => {
                State::Comment(CommentPhase::Block)
            }
            (CommentPhase::Block, _) => {
                cursor.advance_while(|b| b != b'*' && b != b'\n');
                return Ok(None);
            }
        };
        cursor.bump();
        self.state = next;
        Ok(None)
    }
}

fn string_token(bytes: &[u8], lossy: bool, start: Position) -> Result<Token<'_>, ParserError> {
    let text = if lossy {
        bytes.to_str_lossy()
    } else {
        // Already validated byte by byte; this only recovers the `&str`.
        core::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|_| ParserError::new(LexicalError::InvalidUtf8, start))?
    };
    Ok(Token::String(text))
}

fn number_token(
    bytes: &[u8],
    integral: bool,
    policy: IntegerOverflow,
    start: Position,
) -> Result<Token<'_>, ParserError> {
    let raw = core::str::from_utf8(bytes)
        .map_err(|_| ParserError::new(LexicalError::InvalidUtf8, start))?;
    number::evaluate(raw, integral, policy, start).map(Token::Number)
}
