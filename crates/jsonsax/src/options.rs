#![expect(clippy::struct_excessive_bools)]

/// Configuration options for a parse session.
///
/// The options are frozen into the [`Parser`](crate::Parser) when it is built.
/// Each flag relaxes one rule of strict RFC 8259 parsing.
///
/// # Examples
///
/// ```rust
/// use jsonsax::{Parser, ParserOptions};
///
/// let parser = Parser::builder()
///     .options(ParserOptions {
///         allow_comments: true,
///         allow_multiple_values: true,
///         ..Default::default()
///     })
///     .build();
/// ```
///
/// # Default
///
/// All flags default to `false`; integer overflow defaults to
/// [`IntegerOverflow::Error`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether `// line` and `/* block */` comments may appear wherever
    /// whitespace may.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_comments: bool,

    /// Whether input after a complete top-level value is ignored.
    ///
    /// When `false`, any token after the top-level value is a structural
    /// error. When `true`, the parser stops lexing once the value is closed
    /// and discards everything that follows, whether or not it is valid JSON.
    ///
    /// [`allow_multiple_values`](Self::allow_multiple_values) takes
    /// precedence.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_garbage: bool,

    /// Whether to parse multiple whitespace-separated top-level values from
    /// a single stream.
    ///
    /// This supports formats such as JSON Lines (JSONL) and newline-delimited
    /// JSON (ND-JSON), and arbitrary concatenation of JSON values. An empty
    /// stream is legal in this mode.
    ///
    /// # Examples
    ///
    /// ```json
    /// {}{}{}
    /// ```
    ///
    /// ```json
    /// 123 45 678 9
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_values: bool,

    /// Whether [`Parser::finish`](crate::Parser::finish) accepts an
    /// incomplete document.
    ///
    /// Unclosed containers and an unterminated string, keyword or comment are
    /// then silently dropped. A number that is complete at end of input is
    /// still delivered.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_partial_values: bool,

    /// Whether string content is exempt from UTF-8 validation.
    ///
    /// When `true`, invalid byte sequences inside strings and keys are
    /// replaced with U+FFFD before delivery instead of raising a lexical
    /// error.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_invalid_utf8: bool,

    /// What to do with an integer literal that does not fit in an `i64`.
    ///
    /// # Default
    ///
    /// [`IntegerOverflow::Error`]
    pub integer_overflow: IntegerOverflow,
}

/// Policy for integer literals outside the signed 64-bit range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntegerOverflow {
    /// Fail the session with an overflow error positioned at the literal.
    #[default]
    Error,
    /// Deliver the literal as
    /// [`NumberValue::BigInteger`](crate::NumberValue::BigInteger), routed to
    /// the floating handler when split numeric handlers are registered.
    Floating,
}
