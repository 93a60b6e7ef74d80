//! Handler slots and event dispatch.
//!
//! A [`Handlers`] set holds at most one callback per event kind. Events with
//! no registered callback are dropped. Every callback answers with a
//! [`HandlerResult`]: `Ok(Flow::Continue)` to keep going, `Ok(Flow::Stop)` to
//! end the session successfully right now, or `Err(_)` to abort it.

use alloc::{
    boxed::Box,
    string::{String, ToString},
};
use core::fmt;

use thiserror::Error;

use crate::{
    error::ConfigError,
    event::Event,
    number::{JsonNumber, NumberValue},
};

/// What a handler wants the parser to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep parsing.
    Continue,
    /// Stop parsing now. This is a successful early termination.
    Stop,
}

impl From<bool> for Flow {
    /// `true` continues, `false` stops.
    fn from(keep_going: bool) -> Self {
        if keep_going { Flow::Continue } else { Flow::Stop }
    }
}

/// The outcome of one handler invocation.
pub type HandlerResult = Result<Flow, HandlerError>;

/// A failure raised by a handler. It aborts the session and is reported as
/// [`ErrorKind::Handler`](crate::ErrorKind::Handler).
///
/// Any error type converts into it with `?`.
#[derive(Debug)]
pub struct HandlerError(Box<dyn core::error::Error + Send + Sync + 'static>);

#[derive(Error, Debug)]
#[error("{0}")]
struct Message(String);

impl HandlerError {
    /// A handler error carrying only a message.
    pub fn msg(message: impl fmt::Display) -> Self {
        HandlerError(Box::new(Message(message.to_string())))
    }

    /// The wrapped error.
    #[must_use]
    pub fn get_ref(&self) -> &(dyn core::error::Error + Send + Sync + 'static) {
        &*self.0
    }
}

impl<E> From<E> for HandlerError
where
    E: core::error::Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        HandlerError(Box::new(err))
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Names one handler slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// An object member name.
    ObjectKey,
    /// `true` and `false`.
    Boolean,
    /// `null`
    Null,
    /// A string value.
    String,
    /// Every number, with its raw text and classification.
    Number,
    /// [`NumberValue::Integer`] numbers only.
    Integer,
    /// [`NumberValue::Floating`] and [`NumberValue::BigInteger`] numbers.
    Floating,
}

impl HandlerKind {
    /// Every slot, in declaration order.
    pub const ALL: &'static [HandlerKind] = &[
        HandlerKind::ObjectStart,
        HandlerKind::ObjectEnd,
        HandlerKind::ArrayStart,
        HandlerKind::ArrayEnd,
        HandlerKind::ObjectKey,
        HandlerKind::Boolean,
        HandlerKind::Null,
        HandlerKind::String,
        HandlerKind::Number,
        HandlerKind::Integer,
        HandlerKind::Floating,
    ];
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandlerKind::ObjectStart => "object start",
            HandlerKind::ObjectEnd => "object end",
            HandlerKind::ArrayStart => "array start",
            HandlerKind::ArrayEnd => "array end",
            HandlerKind::ObjectKey => "object key",
            HandlerKind::Boolean => "boolean",
            HandlerKind::Null => "null",
            HandlerKind::String => "string",
            HandlerKind::Number => "number",
            HandlerKind::Integer => "integer",
            HandlerKind::Floating => "floating",
        })
    }
}

/// An object that fills some subset of the handler slots at once.
///
/// Implementors list the slots they serve in [`HANDLES`](Self::HANDLES) and
/// override the matching methods; the rest keep their no-op defaults. Apply
/// one with [`ParserBuilder::apply_adapter`](crate::ParserBuilder::apply_adapter).
///
/// # Examples
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use jsonsax::{Flow, HandlerKind, HandlerResult, JsonHandler, Parser};
///
/// #[derive(Default)]
/// struct CountNulls(usize);
///
/// impl JsonHandler for CountNulls {
///     const HANDLES: &'static [HandlerKind] = &[HandlerKind::Null];
///
///     fn on_null(&mut self) -> HandlerResult {
///         self.0 += 1;
///         Ok(Flow::Continue)
///     }
/// }
///
/// let counter = Rc::new(RefCell::new(CountNulls::default()));
/// let mut parser = Parser::builder()
///     .apply_adapter(Rc::clone(&counter))
///     .unwrap()
///     .build();
/// parser.parse(b"[null, 1, null]").unwrap();
/// assert_eq!(counter.borrow().0, 2);
/// ```
#[allow(unused_variables)]
pub trait JsonHandler {
    /// The slots this adapter fills. Must not be empty.
    const HANDLES: &'static [HandlerKind];

    /// See [`HandlerKind::ObjectStart`].
    fn on_object_start(&mut self) -> HandlerResult {
        Ok(Flow::Continue)
    }
    /// See [`HandlerKind::ObjectEnd`].
    fn on_object_end(&mut self) -> HandlerResult {
        Ok(Flow::Continue)
    }
    /// See [`HandlerKind::ArrayStart`].
    fn on_array_start(&mut self) -> HandlerResult {
        Ok(Flow::Continue)
    }
    /// See [`HandlerKind::ArrayEnd`].
    fn on_array_end(&mut self) -> HandlerResult {
        Ok(Flow::Continue)
    }
    /// See [`HandlerKind::ObjectKey`].
    fn on_object_key(&mut self, key: &str) -> HandlerResult {
        Ok(Flow::Continue)
    }
    /// See [`HandlerKind::Boolean`].
    fn on_boolean(&mut self, value: bool) -> HandlerResult {
        Ok(Flow::Continue)
    }
    /// See [`HandlerKind::Null`].
    fn on_null(&mut self) -> HandlerResult {
        Ok(Flow::Continue)
    }
    /// See [`HandlerKind::String`].
    fn on_string(&mut self, value: &str) -> HandlerResult {
        Ok(Flow::Continue)
    }
    /// See [`HandlerKind::Number`].
    fn on_number(&mut self, number: JsonNumber<'_>) -> HandlerResult {
        Ok(Flow::Continue)
    }
    /// See [`HandlerKind::Integer`].
    fn on_integer(&mut self, value: i64) -> HandlerResult {
        Ok(Flow::Continue)
    }
    /// See [`HandlerKind::Floating`].
    fn on_floating(&mut self, value: f64) -> HandlerResult {
        Ok(Flow::Continue)
    }
}

pub(crate) type UnitHandler<'h> = Box<dyn FnMut() -> HandlerResult + 'h>;
pub(crate) type BoolHandler<'h> = Box<dyn FnMut(bool) -> HandlerResult + 'h>;
pub(crate) type StrHandler<'h> = Box<dyn FnMut(&str) -> HandlerResult + 'h>;
pub(crate) type NumberHandler<'h> = Box<dyn FnMut(JsonNumber<'_>) -> HandlerResult + 'h>;
pub(crate) type IntegerHandler<'h> = Box<dyn FnMut(i64) -> HandlerResult + 'h>;
pub(crate) type FloatingHandler<'h> = Box<dyn FnMut(f64) -> HandlerResult + 'h>;

/// The set of registered callbacks, one optional slot per event kind.
///
/// Invariant: `number` is never set together with `integer` or `floating`.
#[derive(Default)]
pub(crate) struct Handlers<'h> {
    pub(crate) object_start: Option<UnitHandler<'h>>,
    pub(crate) object_end: Option<UnitHandler<'h>>,
    pub(crate) array_start: Option<UnitHandler<'h>>,
    pub(crate) array_end: Option<UnitHandler<'h>>,
    pub(crate) object_key: Option<StrHandler<'h>>,
    pub(crate) boolean: Option<BoolHandler<'h>>,
    pub(crate) null: Option<UnitHandler<'h>>,
    pub(crate) string: Option<StrHandler<'h>>,
    number: Option<NumberHandler<'h>>,
    integer: Option<IntegerHandler<'h>>,
    floating: Option<FloatingHandler<'h>>,
}

impl fmt::Debug for Handlers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_set();
        for kind in HandlerKind::ALL {
            if self.is_registered(*kind) {
                list.entry(kind);
            }
        }
        list.finish()
    }
}

impl<'h> Handlers<'h> {
    pub(crate) fn is_registered(&self, kind: HandlerKind) -> bool {
        match kind {
            HandlerKind::ObjectStart => self.object_start.is_some(),
            HandlerKind::ObjectEnd => self.object_end.is_some(),
            HandlerKind::ArrayStart => self.array_start.is_some(),
            HandlerKind::ArrayEnd => self.array_end.is_some(),
            HandlerKind::ObjectKey => self.object_key.is_some(),
            HandlerKind::Boolean => self.boolean.is_some(),
            HandlerKind::Null => self.null.is_some(),
            HandlerKind::String => self.string.is_some(),
            HandlerKind::Number => self.number.is_some(),
            HandlerKind::Integer => self.integer.is_some(),
            HandlerKind::Floating => self.floating.is_some(),
        }
    }

    fn check_no_conflict(&self, existing: HandlerKind, new: HandlerKind) -> Result<(), ConfigError> {
        if self.is_registered(existing) {
            return Err(ConfigError::ConflictingHandlers {
                first: existing,
                second: new,
            });
        }
        Ok(())
    }

    pub(crate) fn set_number(&mut self, handler: NumberHandler<'h>) -> Result<(), ConfigError> {
        self.check_no_conflict(HandlerKind::Integer, HandlerKind::Number)?;
        self.check_no_conflict(HandlerKind::Floating, HandlerKind::Number)?;
        self.number = Some(handler);
        Ok(())
    }

    pub(crate) fn set_integer(&mut self, handler: IntegerHandler<'h>) -> Result<(), ConfigError> {
        self.check_no_conflict(HandlerKind::Number, HandlerKind::Integer)?;
        self.integer = Some(handler);
        Ok(())
    }

    pub(crate) fn set_floating(&mut self, handler: FloatingHandler<'h>) -> Result<(), ConfigError> {
        self.check_no_conflict(HandlerKind::Number, HandlerKind::Floating)?;
        self.floating = Some(handler);
        Ok(())
    }

    /// Route one event to its handler, if any.
    pub(crate) fn dispatch(&mut self, event: &Event<'_>) -> HandlerResult {
        match *event {
            Event::ObjectStart => call(&mut self.object_start),
            Event::ObjectEnd => call(&mut self.object_end),
            Event::ArrayStart => call(&mut self.array_start),
            Event::ArrayEnd => call(&mut self.array_end),
            Event::Null => call(&mut self.null),
            Event::Boolean(value) => self.boolean.as_mut().map_or(CONTINUE, |h| h(value)),
            Event::Key(key) => self.object_key.as_mut().map_or(CONTINUE, |h| h(key)),
            Event::String(value) => self.string.as_mut().map_or(CONTINUE, |h| h(value)),
            Event::Number(number) => self.dispatch_number(number),
        }
    }

    fn dispatch_number(&mut self, number: JsonNumber<'_>) -> HandlerResult {
        if let Some(handler) = self.number.as_mut() {
            return handler(number);
        }
        match number.value() {
            NumberValue::Integer(n) => self.integer.as_mut().map_or(CONTINUE, |h| h(n)),
            NumberValue::BigInteger(f) | NumberValue::Floating(f) => {
                self.floating.as_mut().map_or(CONTINUE, |h| h(f))
            }
        }
    }
}

const CONTINUE: HandlerResult = Ok(Flow::Continue);

fn call(slot: &mut Option<UnitHandler<'_>>) -> HandlerResult {
    slot.as_mut().map_or(CONTINUE, |h| h())
}
