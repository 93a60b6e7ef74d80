//! The incremental entry point.
//!
//! A [`Parser`] owns the lexer, the grammar and the handler set of one
//! session. Each call to [`Parser::feed`] runs tokens through the grammar
//! and dispatches the resulting events until the chunk is exhausted, a
//! handler stops the session, or an error occurs. Chunk boundaries carry no
//! meaning: a literal may be split anywhere, and many values may arrive in
//! one chunk.
//!
//! # Examples
//!
//! ```rust
//! use jsonsax::{Flow, Parser, Status};
//!
//! let mut total = 0;
//! let mut parser = Parser::builder()
//!     .on_integer(|n| {
//!         total += n;
//!         Ok(Flow::Continue)
//!     })
//!     .unwrap()
//!     .build();
//!
//! let chunks: [&[u8]; 3] = [b"[1, 2", b"0, 3", b"00]"];
//! for chunk in chunks {
//!     assert_eq!(parser.feed(chunk).unwrap(), Status::Ready);
//! }
//! assert_eq!(parser.finish().unwrap(), Status::Finished);
//! drop(parser);
//! assert_eq!(total, 321);
//! ```

use core::fmt;

use log::{debug, trace};

use crate::{
    Position,
    builder::ParserBuilder,
    cursor::ByteCursor,
    error::{ErrorSource, ParserError},
    grammar::Grammar,
    handler::{Flow, Handlers},
    lexer::{Lexer, Token},
    options::ParserOptions,
};

/// Where a parse session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// More input may be fed.
    Ready,
    /// A handler asked to stop. This is a successful outcome.
    Stopped,
    /// End of input was accepted.
    Finished,
    /// An error occurred. The session cannot be resumed.
    Failed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Ready => "ready",
            Status::Stopped => "stopped",
            Status::Finished => "finished",
            Status::Failed => "failed",
        })
    }
}

/// An incremental, event-driven JSON parser.
///
/// Create one with [`Parser::builder`].
#[derive(Debug)]
pub struct Parser<'h> {
    options: ParserOptions,
    handlers: Handlers<'h>,
    lexer: Lexer,
    grammar: Grammar,
    position: Position,
    status: Status,
}

impl<'h> Parser<'h> {
    /// Start configuring a parser.
    pub fn builder() -> ParserBuilder<'h> {
        ParserBuilder::new()
    }

    pub(crate) fn new(options: ParserOptions, handlers: Handlers<'h>) -> Self {
        Self {
            options,
            handlers,
            lexer: Lexer::new(options),
            grammar: Grammar::new(options.allow_multiple_values),
            position: Position::default(),
            status: Status::Ready,
        }
    }

    /// Feed the next chunk of input.
    ///
    /// Returns [`Status::Ready`] when the whole chunk was consumed, and
    /// [`Status::Stopped`] when a handler stopped the session; the rest of
    /// the chunk is then left unread.
    ///
    /// # Errors
    ///
    /// Any lexical, structural, overflow or handler error, after which the
    /// parser is [`Status::Failed`]. Feeding a parser that is not
    /// [`Status::Ready`] is a usage error.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Status, ParserError> {
        if self.status != Status::Ready {
            return Err(self.usage_error());
        }
        trace!("feeding {} bytes at {}", chunk.len(), self.position);
        let mut cursor = ByteCursor::new(chunk, self.position);
        self.lexer.begin_chunk();
        let result = self.drive(&mut cursor);
        self.position = cursor.position();
        trace!(
            "consumed {} bytes, depth {}",
            cursor.index(),
            self.grammar.depth()
        );
        self.settle(result)
    }

    /// Signal end of input.
    ///
    /// Flushes a number still pending at the end of the last chunk, then
    /// checks that the document is complete. On a stopped parser this does
    /// nothing and returns [`Status::Stopped`].
    ///
    /// # Errors
    ///
    /// An unterminated literal or unclosed container, unless partial values
    /// are allowed; an empty document, unless multiple values are allowed;
    /// any error raised while delivering the pending number. Finishing a
    /// parser that is already finished or failed is a usage error.
    pub fn finish(&mut self) -> Result<Status, ParserError> {
        match self.status {
            Status::Ready => {}
            Status::Stopped => return Ok(Status::Stopped),
            Status::Finished | Status::Failed => return Err(self.usage_error()),
        }
        let result = self.finish_input();
        self.settle(result)
    }

    /// Feed a complete document and finish, unless a handler stops first.
    ///
    /// # Errors
    ///
    /// As for [`feed`](Self::feed) and [`finish`](Self::finish).
    pub fn parse(&mut self, input: &[u8]) -> Result<Status, ParserError> {
        match self.feed(input)? {
            Status::Stopped => Ok(Status::Stopped),
            _ => self.finish(),
        }
    }

    /// The current status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Where the next byte will be read.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Total number of bytes consumed. After an early stop, this points just
    /// past the token that triggered it.
    #[must_use]
    pub fn bytes_consumed(&self) -> usize {
        self.position.offset
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.grammar.depth()
    }

    /// The options this parser was built with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn drive(&mut self, cursor: &mut ByteCursor<'_>) -> Result<Status, ParserError> {
        loop {
            if self.discards_rest() {
                cursor.skip_rest();
                return Ok(Status::Ready);
            }
            let Some((token, start)) = self.lexer.next_token(cursor)? else {
                return Ok(Status::Ready);
            };
            if deliver(&mut self.grammar, &mut self.handlers, &token, start)? == Flow::Stop {
                return Ok(Status::Stopped);
            }
        }
    }

    fn finish_input(&mut self) -> Result<Status, ParserError> {
        let at = self.position;
        if let Some((token, start)) = self.lexer.finish(at)? {
            if deliver(&mut self.grammar, &mut self.handlers, &token, start)? == Flow::Stop {
                return Ok(Status::Stopped);
            }
        }
        self.grammar
            .finish(self.options.allow_partial_values)
            .map_err(|err| ParserError::new(err, at))?;
        Ok(Status::Finished)
    }

    /// Whether input after the completed top-level value is ignored.
    fn discards_rest(&self) -> bool {
        self.options.allow_trailing_garbage
            && !self.options.allow_multiple_values
            && self.grammar.is_complete()
    }

    fn settle(&mut self, result: Result<Status, ParserError>) -> Result<Status, ParserError> {
        match result {
            Ok(status) => {
                if status != self.status {
                    debug!("parser {status} at {}", self.position);
                }
                self.status = status;
                Ok(status)
            }
            Err(err) => {
                debug!("parser failed: {err}");
                self.status = Status::Failed;
                Err(err)
            }
        }
    }

    fn usage_error(&self) -> ParserError {
        ParserError::new(ErrorSource::Usage(self.status), self.position)
    }
}

/// Run one token through the grammar and hand the resulting event to its
/// handler. Errors are positioned at the token's first byte.
fn deliver(
    grammar: &mut Grammar,
    handlers: &mut Handlers<'_>,
    token: &Token<'_>,
    start: Position,
) -> Result<Flow, ParserError> {
    let Some(event) = grammar
        .accept(token)
        .map_err(|err| ParserError::new(err, start))?
    else {
        return Ok(Flow::Continue);
    };
    handlers
        .dispatch(&event)
        .map_err(|err| ParserError::new(err, start))
}
