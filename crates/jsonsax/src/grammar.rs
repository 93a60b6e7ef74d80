//! The push-down automaton that validates token order.
//!
//! Nesting lives in an explicit, heap-allocated frame stack, so depth is
//! bounded by memory rather than by the call stack.

use alloc::vec::Vec;

use crate::{error::StructuralError, event::Event, lexer::Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    /// No top-level value has started yet.
    ExpectValue,
    /// A top-level value has started; it is complete once the frame stack
    /// is empty again.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayPhase {
    FirstValueOrClose,
    Value,
    CommaOrClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectPhase {
    FirstKeyOrClose,
    Key,
    Colon,
    Value,
    CommaOrClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Array(ArrayPhase),
    Object(ObjectPhase),
}

#[derive(Debug)]
pub(crate) struct Grammar {
    root: Root,
    frames: Vec<Frame>,
    multiple_values: bool,
}

impl Grammar {
    pub(crate) fn new(multiple_values: bool) -> Self {
        Self {
            root: Root::ExpectValue,
            frames: Vec::with_capacity(16),
            multiple_values,
        }
    }

    /// Current nesting depth.
    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether a complete top-level value has been accepted and nothing is
    /// open.
    pub(crate) fn is_complete(&self) -> bool {
        self.root == Root::Done && self.frames.is_empty()
    }

    /// Consume one token, returning the event it produces, if any.
    pub(crate) fn accept<'t>(
        &mut self,
        token: &'t Token<'_>,
    ) -> Result<Option<Event<'t>>, StructuralError> {
        match self.frames.last().copied() {
            None => self.accept_top_level(token),
            Some(Frame::Array(phase)) => self.accept_in_array(phase, token),
            Some(Frame::Object(phase)) => self.accept_in_object(phase, token),
        }
    }

    /// Check that end of input is legal here.
    pub(crate) fn finish(&self, allow_partial: bool) -> Result<(), StructuralError> {
        if allow_partial {
            return Ok(());
        }
        if !self.frames.is_empty() {
            return Err(StructuralError::UnclosedContainers(self.frames.len()));
        }
        if self.root == Root::ExpectValue && !self.multiple_values {
            return Err(StructuralError::EmptyDocument);
        }
        Ok(())
    }

    fn accept_top_level<'t>(
        &mut self,
        token: &'t Token<'_>,
    ) -> Result<Option<Event<'t>>, StructuralError> {
        if self.root == Root::Done && !self.multiple_values {
            return Err(StructuralError::TrailingData(token.kind()));
        }
        if !token.starts_value() {
            return Err(unexpected(token, "value"));
        }
        self.root = Root::Done;
        Ok(Some(self.open_value(token)))
    }

    fn accept_in_array<'t>(
        &mut self,
        phase: ArrayPhase,
        token: &'t Token<'_>,
    ) -> Result<Option<Event<'t>>, StructuralError> {
        match (phase, token) {
            (ArrayPhase::FirstValueOrClose | ArrayPhase::CommaOrClose, Token::EndArray) => {
                self.frames.pop();
                Ok(Some(Event::ArrayEnd))
            }
            (ArrayPhase::CommaOrClose, Token::Comma) => {
                self.set_top(Frame::Array(ArrayPhase::Value));
                Ok(None)
            }
            (ArrayPhase::FirstValueOrClose | ArrayPhase::Value, token) if token.starts_value() => {
                self.set_top(Frame::Array(ArrayPhase::CommaOrClose));
                Ok(Some(self.open_value(token)))
            }
            (ArrayPhase::FirstValueOrClose, _) => Err(unexpected(token, "value or ']'")),
            (ArrayPhase::Value, _) => Err(unexpected(token, "value")),
            (ArrayPhase::CommaOrClose, _) => Err(unexpected(token, "',' or ']'")),
        }
    }

    fn accept_in_object<'t>(
        &mut self,
        phase: ObjectPhase,
        token: &'t Token<'_>,
    ) -> Result<Option<Event<'t>>, StructuralError> {
        match (phase, token) {
            (ObjectPhase::FirstKeyOrClose | ObjectPhase::CommaOrClose, Token::EndObject) => {
                self.frames.pop();
                Ok(Some(Event::ObjectEnd))
            }
            (ObjectPhase::FirstKeyOrClose | ObjectPhase::Key, Token::String(key)) => {
                self.set_top(Frame::Object(ObjectPhase::Colon));
                Ok(Some(Event::Key(key)))
            }
            (ObjectPhase::Colon, Token::Colon) => {
                self.set_top(Frame::Object(ObjectPhase::Value));
                Ok(None)
            }
            (ObjectPhase::Value, token) if token.starts_value() => {
                self.set_top(Frame::Object(ObjectPhase::CommaOrClose));
                Ok(Some(self.open_value(token)))
            }
            (ObjectPhase::CommaOrClose, Token::Comma) => {
                self.set_top(Frame::Object(ObjectPhase::Key));
                Ok(None)
            }
            (ObjectPhase::FirstKeyOrClose, _) => Err(unexpected(token, "string or '}'")),
            (ObjectPhase::Key, _) => Err(unexpected(token, "string")),
            (ObjectPhase::Colon, _) => Err(unexpected(token, "':'")),
            (ObjectPhase::Value, _) => Err(unexpected(token, "value")),
            (ObjectPhase::CommaOrClose, _) => Err(unexpected(token, "',' or '}'")),
        }
    }

    /// Start a value. Containers push a frame; scalars are complete at once.
    /// `token` must satisfy [`Token::starts_value`].
    fn open_value<'t>(&mut self, token: &'t Token<'_>) -> Event<'t> {
        match token {
            Token::BeginObject => {
                self.frames.push(Frame::Object(ObjectPhase::FirstKeyOrClose));
                Event::ObjectStart
            }
            Token::BeginArray => {
                self.frames.push(Frame::Array(ArrayPhase::FirstValueOrClose));
                Event::ArrayStart
            }
            Token::String(s) => Event::String(s),
            Token::Number(n) => Event::Number(*n),
            Token::Boolean(b) => Event::Boolean(*b),
            Token::Null => Event::Null,
            Token::EndObject | Token::EndArray | Token::Colon | Token::Comma => {
                unreachable!("checked by starts_value")
            }
        }
    }

    fn set_top(&mut self, frame: Frame) {
        if let Some(top) = self.frames.last_mut() {
            *top = frame;
        }
    }
}

fn unexpected(token: &Token<'_>, expected: &'static str) -> StructuralError {
    StructuralError::UnexpectedToken {
        found: token.kind(),
        expected,
    }
}
