use alloc::borrow::Cow;
use core::fmt;

use crate::number::JsonNumber;

/// A complete lexical token.
///
/// String tokens borrow from the current chunk when the literal lies inside
/// it without escapes, and from the lexer's scratch buffer otherwise.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'t> {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    Colon,
    Comma,
    String(Cow<'t, str>),
    Number(JsonNumber<'t>),
    Boolean(bool),
    Null,
}

impl Token<'_> {
    pub(crate) fn kind(&self) -> TokenKind {
        match self {
            Token::BeginObject => TokenKind::BeginObject,
            Token::EndObject => TokenKind::EndObject,
            Token::BeginArray => TokenKind::BeginArray,
            Token::EndArray => TokenKind::EndArray,
            Token::Colon => TokenKind::Colon,
            Token::Comma => TokenKind::Comma,
            Token::String(_) => TokenKind::String,
            Token::Number(_) => TokenKind::Number,
            Token::Boolean(true) => TokenKind::True,
            Token::Boolean(false) => TokenKind::False,
            Token::Null => TokenKind::Null,
        }
    }

    /// Whether this token can begin a value.
    pub(crate) fn starts_value(&self) -> bool {
        !matches!(
            self,
            Token::EndObject | Token::EndArray | Token::Colon | Token::Comma
        )
    }
}

/// The tag of a token, as reported in structural errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// A string literal.
    String,
    /// A number literal.
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::BeginObject => "'{'",
            TokenKind::EndObject => "'}'",
            TokenKind::BeginArray => "'['",
            TokenKind::EndArray => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
        })
    }
}
