use alloc::{boxed::Box, rc::Rc};
use core::cell::RefCell;

use crate::{
    Parser,
    error::ConfigError,
    handler::{Handlers, HandlerKind, HandlerResult, JsonHandler},
    number::JsonNumber,
    options::ParserOptions,
};

/// Assembles the options and handlers of a [`Parser`].
///
/// Registration of mutually exclusive numeric handlers fails here, before
/// any input is seen. Registering the same slot twice replaces the earlier
/// handler.
///
/// # Examples
///
/// ```rust
/// use jsonsax::{Flow, Parser};
///
/// let mut keys = Vec::new();
/// let mut parser = Parser::builder()
///     .on_object_key(|key| {
///         keys.push(key.to_owned());
///         Ok(Flow::Continue)
///     })
///     .build();
/// parser.parse(br#"{"a": 1, "b": {"c": null}}"#).unwrap();
/// drop(parser);
/// assert_eq!(keys, ["a", "b", "c"]);
/// ```
#[derive(Debug, Default)]
#[must_use]
pub struct ParserBuilder<'h> {
    options: ParserOptions,
    handlers: Handlers<'h>,
}

impl<'h> ParserBuilder<'h> {
    /// A builder with default options and no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the options.
    pub fn options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Called for `{`.
    pub fn on_object_start(mut self, handler: impl FnMut() -> HandlerResult + 'h) -> Self {
        self.handlers.object_start = Some(Box::new(handler));
        self
    }

    /// Called for `}`.
    pub fn on_object_end(mut self, handler: impl FnMut() -> HandlerResult + 'h) -> Self {
        self.handlers.object_end = Some(Box::new(handler));
        self
    }

    /// Called for `[`.
    pub fn on_array_start(mut self, handler: impl FnMut() -> HandlerResult + 'h) -> Self {
        self.handlers.array_start = Some(Box::new(handler));
        self
    }

    /// Called for `]`.
    pub fn on_array_end(mut self, handler: impl FnMut() -> HandlerResult + 'h) -> Self {
        self.handlers.array_end = Some(Box::new(handler));
        self
    }

    /// Called with each decoded object member name.
    pub fn on_object_key(mut self, handler: impl FnMut(&str) -> HandlerResult + 'h) -> Self {
        self.handlers.object_key = Some(Box::new(handler));
        self
    }

    /// Called for `true` and `false`.
    pub fn on_boolean(mut self, handler: impl FnMut(bool) -> HandlerResult + 'h) -> Self {
        self.handlers.boolean = Some(Box::new(handler));
        self
    }

    /// Called for `null`.
    pub fn on_null(mut self, handler: impl FnMut() -> HandlerResult + 'h) -> Self {
        self.handlers.null = Some(Box::new(handler));
        self
    }

    /// Called with each decoded string value.
    pub fn on_string(mut self, handler: impl FnMut(&str) -> HandlerResult + 'h) -> Self {
        self.handlers.string = Some(Box::new(handler));
        self
    }

    /// Called for every number with its raw text and classification.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConflictingHandlers`] if an integer or floating
    /// handler is already registered.
    pub fn on_number(
        mut self,
        handler: impl FnMut(JsonNumber<'_>) -> HandlerResult + 'h,
    ) -> Result<Self, ConfigError> {
        self.handlers.set_number(Box::new(handler))?;
        Ok(self)
    }

    /// Called for integral numbers in the `i64` range.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConflictingHandlers`] if a number handler is already
    /// registered.
    pub fn on_integer(
        mut self,
        handler: impl FnMut(i64) -> HandlerResult + 'h,
    ) -> Result<Self, ConfigError> {
        self.handlers.set_integer(Box::new(handler))?;
        Ok(self)
    }

    /// Called for numbers with a fraction or exponent, and for integers
    /// outside the `i64` range under
    /// [`IntegerOverflow::Floating`](crate::IntegerOverflow::Floating).
    ///
    /// # Errors
    ///
    /// [`ConfigError::ConflictingHandlers`] if a number handler is already
    /// registered.
    pub fn on_floating(
        mut self,
        handler: impl FnMut(f64) -> HandlerResult + 'h,
    ) -> Result<Self, ConfigError> {
        self.handlers.set_floating(Box::new(handler))?;
        Ok(self)
    }

    /// Register one forwarding handler for every slot listed in
    /// [`A::HANDLES`](JsonHandler::HANDLES). Keep a clone of `adapter` to
    /// read its state back after parsing.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyAdapter`] if the adapter lists no slots, and
    /// [`ConfigError::ConflictingHandlers`] as for the numeric handlers.
    pub fn apply_adapter<A>(mut self, adapter: Rc<RefCell<A>>) -> Result<Self, ConfigError>
    where
        A: JsonHandler + 'h,
    {
        if A::HANDLES.is_empty() {
            return Err(ConfigError::EmptyAdapter);
        }
        for &kind in A::HANDLES {
            let a = Rc::clone(&adapter);
            self = match kind {
                HandlerKind::ObjectStart => {
                    self.on_object_start(move || a.borrow_mut().on_object_start())
                }
                HandlerKind::ObjectEnd => self.on_object_end(move || a.borrow_mut().on_object_end()),
                HandlerKind::ArrayStart => {
                    self.on_array_start(move || a.borrow_mut().on_array_start())
                }
                HandlerKind::ArrayEnd => self.on_array_end(move || a.borrow_mut().on_array_end()),
                HandlerKind::ObjectKey => {
                    self.on_object_key(move |key| a.borrow_mut().on_object_key(key))
                }
                HandlerKind::Boolean => self.on_boolean(move |b| a.borrow_mut().on_boolean(b)),
                HandlerKind::Null => self.on_null(move || a.borrow_mut().on_null()),
                HandlerKind::String => self.on_string(move |s| a.borrow_mut().on_string(s)),
                HandlerKind::Number => self.on_number(move |n| a.borrow_mut().on_number(n))?,
                HandlerKind::Integer => self.on_integer(move |n| a.borrow_mut().on_integer(n))?,
                HandlerKind::Floating => {
                    self.on_floating(move |f| a.borrow_mut().on_floating(f))?
                }
            };
        }
        Ok(self)
    }

    /// Freeze the configuration into a parser ready for its first `feed`.
    pub fn build(self) -> Parser<'h> {
        Parser::new(self.options, self.handlers)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use super::*;
    use crate::{Flow, Status, handler::HandlerError};

    #[test]
    fn numeric_conflicts_fail_at_registration() {
        let err = ParserBuilder::new()
            .on_number(|_| Ok(Flow::Continue))
            .unwrap()
            .on_integer(|_| Ok(Flow::Continue))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ConflictingHandlers {
                first: HandlerKind::Number,
                second: HandlerKind::Integer,
            }
        );

        let err = ParserBuilder::new()
            .on_floating(|_| Ok(Flow::Continue))
            .unwrap()
            .on_number(|_| Ok(Flow::Continue))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ConflictingHandlers {
                first: HandlerKind::Floating,
                second: HandlerKind::Number,
            }
        );
    }

    #[test]
    fn split_pair_is_allowed() {
        assert!(
            ParserBuilder::new()
                .on_integer(|_| Ok(Flow::Continue))
                .and_then(|b| b.on_floating(|_| Ok(Flow::Continue)))
                .is_ok()
        );
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut seen = Vec::new();
        let mut parser = ParserBuilder::new()
            .on_string(|_| Err(HandlerError::msg("replaced handler ran")))
            .on_string(|s| {
                seen.push(String::from(s));
                Ok(Flow::Continue)
            })
            .build();
        assert_eq!(parser.parse(br#"["x"]"#).unwrap(), Status::Finished);
        drop(parser);
        assert_eq!(seen, ["x"]);
    }

    struct Nothing;

    impl JsonHandler for Nothing {
        const HANDLES: &'static [HandlerKind] = &[];
    }

    #[test]
    fn empty_adapter_is_rejected() {
        let err = ParserBuilder::new()
            .apply_adapter(Rc::new(RefCell::new(Nothing)))
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyAdapter);
    }

    #[derive(Default)]
    struct Numbers(Vec<f64>);

    impl JsonHandler for Numbers {
        const HANDLES: &'static [HandlerKind] = &[HandlerKind::Number];

        fn on_number(&mut self, number: JsonNumber<'_>) -> HandlerResult {
            self.0.push(number.as_f64());
            Ok(Flow::Continue)
        }
    }

    #[test]
    fn adapter_conflicts_with_registered_slots() {
        let err = ParserBuilder::new()
            .on_integer(|_| Ok(Flow::Continue))
            .unwrap()
            .apply_adapter(Rc::new(RefCell::new(Numbers::default())))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingHandlers { .. }));
    }

    #[test]
    fn adapter_fills_declared_slots() {
        let numbers = Rc::new(RefCell::new(Numbers::default()));
        let mut parser = ParserBuilder::new()
            .apply_adapter(Rc::clone(&numbers))
            .unwrap()
            .build();
        parser.parse(b"[1, 2.5, -3e1]").unwrap();
        assert_eq!(numbers.borrow().0, [1.0, 2.5, -30.0]);
    }
}
