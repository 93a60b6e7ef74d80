//! Error types.
//!
//! Every failure of a parse session is a [`ParserError`]: the underlying
//! [`ErrorSource`] plus the [`Position`] at which it was detected.
//! Configuration mistakes are reported separately as [`ConfigError`] when a
//! handler is registered, before any input is seen.

use alloc::string::String;

use thiserror::Error;

use crate::{Position, Status, handler::HandlerError, handler::HandlerKind, lexer::TokenKind};

/// Broad category of a [`ParserError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A malformed literal: bad escape, bad number shape, invalid byte.
    Lexical,
    /// A grammar violation: unexpected token, unmatched close, trailing data,
    /// unclosed container at end of input.
    Structural,
    /// An integer literal outside the signed 64-bit range.
    Overflow,
    /// A handler reported a failure.
    Handler,
    /// The parser was called in a state that does not accept the call.
    Usage,
}

/// An error raised while feeding or finishing a parse session.
#[derive(Error, Debug)]
#[error("{source} at {position}")]
pub struct ParserError {
    pub(crate) source: ErrorSource,
    /// Where the problem was detected.
    pub position: Position,
}

impl ParserError {
    pub(crate) fn new(source: impl Into<ErrorSource>, position: Position) -> Self {
        Self {
            source: source.into(),
            position,
        }
    }

    /// The category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.source {
            ErrorSource::Lexical(_) => ErrorKind::Lexical,
            ErrorSource::Structural(_) => ErrorKind::Structural,
            ErrorSource::IntegerOverflow(_) => ErrorKind::Overflow,
            ErrorSource::Handler(_) => ErrorKind::Handler,
            ErrorSource::Usage(_) => ErrorKind::Usage,
        }
    }

    /// The detailed cause.
    #[must_use]
    pub fn error_source(&self) -> &ErrorSource {
        &self.source
    }

    /// Where the problem was detected.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Absolute byte offset at which the problem was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.position.offset
    }
}

/// The detailed cause of a [`ParserError`].
#[derive(Error, Debug)]
pub enum ErrorSource {
    /// See [`LexicalError`].
    #[error("lexical error: {0}")]
    Lexical(#[from] LexicalError),
    /// See [`StructuralError`].
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),
    /// The raw text of an integer literal that does not fit in an `i64`.
    #[error("integer literal {0} is out of the 64-bit signed range")]
    IntegerOverflow(String),
    /// A handler failed.
    #[error("handler failed: {0}")]
    Handler(HandlerError),
    /// `feed` or `finish` was called on a parser in this state.
    #[error("parser is already {0}")]
    Usage(Status),
}

impl From<HandlerError> for ErrorSource {
    fn from(err: HandlerError) -> Self {
        ErrorSource::Handler(err)
    }
}

/// A malformed literal or an unexpected byte.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    /// A byte that cannot start or continue any token here.
    #[error("invalid character '{}'", .0.escape_ascii())]
    InvalidByte(u8),
    /// A keyword (`true`, `false`, `null`) broken by the given byte.
    #[error("invalid character '{}' in literal `{expected}`", .found.escape_ascii())]
    InvalidLiteral {
        /// The keyword being matched.
        expected: &'static str,
        /// The byte that broke it.
        found: u8,
    },
    /// A number with a leading zero followed by another digit.
    #[error("leading zeros are not allowed")]
    LeadingZero,
    /// A number missing its digits after `-`, `.` or the exponent marker.
    #[error("expected digit after {0}")]
    ExpectedDigit(&'static str),
    /// An unknown escape sequence.
    #[error("invalid escape sequence '\\{}'", .0.escape_ascii())]
    InvalidEscape(u8),
    /// A non-hex byte inside `\uXXXX`.
    #[error("invalid character '{}' in unicode escape", .0.escape_ascii())]
    InvalidUnicodeEscapeChar(u8),
    /// A surrogate escape that is not part of a high/low pair.
    #[error("unpaired surrogate \\u{0:04X}")]
    UnpairedSurrogate(u16),
    /// A raw control byte inside a string.
    #[error("unescaped control character 0x{0:02X} in string")]
    ControlCharacter(u8),
    /// A byte sequence that is not valid UTF-8 inside a string.
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    /// End of input inside a string.
    #[error("unterminated string")]
    UnterminatedString,
    /// End of input inside a keyword.
    #[error("unterminated literal `{0}`")]
    UnterminatedLiteral(&'static str),
    /// End of input inside a block comment.
    #[error("unterminated comment")]
    UnterminatedComment,
}

/// A grammar violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// A token that is not legal in the current phase.
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken {
        /// What arrived.
        found: TokenKind,
        /// What the current phase accepts.
        expected: &'static str,
    },
    /// A token after the complete top-level value.
    #[error("trailing data after top-level value: {0}")]
    TrailingData(TokenKind),
    /// End of input with open containers.
    #[error("unexpected end of input: {0} unclosed container(s)")]
    UnclosedContainers(usize),
    /// End of input before any value.
    #[error("unexpected end of input: no value")]
    EmptyDocument,
}

/// A handler registration that can never be valid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Two mutually exclusive handler slots were filled.
    #[error("parser cannot have {first} and {second} handlers simultaneously")]
    ConflictingHandlers {
        /// The slot already registered.
        first: HandlerKind,
        /// The slot being registered.
        second: HandlerKind,
    },
    /// An adapter that declares no handler capabilities.
    #[error("adapter does not implement any handler")]
    EmptyAdapter,
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_includes_position() {
        let err = ParserError::new(
            LexicalError::InvalidByte(b'x'),
            Position {
                offset: 4,
                line: 2,
                column: 3,
            },
        );
        assert_eq!(
            err.to_string(),
            "lexical error: invalid character 'x' at byte 4 (line 2, column 3)"
        );
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn non_printable_bytes_are_escaped() {
        assert_eq!(
            LexicalError::InvalidByte(0xFF).to_string(),
            "invalid character '\\xff'"
        );
        assert_eq!(
            LexicalError::ControlCharacter(0x0A).to_string(),
            "unescaped control character 0x0A in string"
        );
    }

    #[test]
    fn usage_error_names_status() {
        let err = ParserError::new(ErrorSource::Usage(Status::Stopped), Position::default());
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.to_string().starts_with("parser is already stopped"));
    }

    #[test]
    fn conflict_message() {
        let err = ConfigError::ConflictingHandlers {
            first: HandlerKind::Number,
            second: HandlerKind::Integer,
        };
        assert_eq!(
            err.to_string(),
            "parser cannot have number and integer handlers simultaneously"
        );
    }
}
