//! Numeric literals: classification and evaluation.

use alloc::string::ToString;
use core::num::IntErrorKind;

use crate::{
    Position,
    error::{ErrorSource, ParserError},
    options::IntegerOverflow,
};

/// The evaluated value of a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    /// A literal without fraction or exponent that fits in an `i64`.
    Integer(i64),
    /// A literal without fraction or exponent outside the `i64` range,
    /// delivered as the nearest `f64`. Only produced under
    /// [`IntegerOverflow::Floating`].
    BigInteger(f64),
    /// A literal with a fraction and/or exponent.
    Floating(f64),
}

/// A numeric literal as seen by handlers: its raw text and its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsonNumber<'a> {
    raw: &'a str,
    value: NumberValue,
}

impl<'a> JsonNumber<'a> {
    /// The literal exactly as it appeared in the input.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// The evaluated value.
    #[must_use]
    pub fn value(&self) -> NumberValue {
        self.value
    }

    /// Whether the literal is integral (no fraction, no exponent), including
    /// integers that overflowed `i64`.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(
            self.value,
            NumberValue::Integer(_) | NumberValue::BigInteger(_)
        )
    }

    /// The value as an `i64`, if it is an in-range integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self.value {
            NumberValue::Integer(n) => Some(n),
            NumberValue::BigInteger(_) | NumberValue::Floating(_) => None,
        }
    }

    /// The value as an `f64`. In-range integers are converted and may lose
    /// precision above 2^53.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match self.value {
            NumberValue::Integer(n) => n as f64,
            NumberValue::BigInteger(f) | NumberValue::Floating(f) => f,
        }
    }
}

/// Evaluate a lexically valid literal. `integral` is set when the literal
/// had neither fraction nor exponent. `start` is the literal's position,
/// used for the overflow error.
pub(crate) fn evaluate(
    raw: &str,
    integral: bool,
    policy: IntegerOverflow,
    start: Position,
) -> Result<JsonNumber<'_>, ParserError> {
    let value = if integral {
        match raw.parse::<i64>() {
            Ok(n) => NumberValue::Integer(n),
            Err(err)
                if matches!(
                    err.kind(),
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                ) =>
            {
                match policy {
                    IntegerOverflow::Error => {
                        return Err(ParserError::new(
                            ErrorSource::IntegerOverflow(raw.to_string()),
                            start,
                        ));
                    }
                    IntegerOverflow::Floating => NumberValue::BigInteger(parse_f64(raw)),
                }
            }
            Err(_) => NumberValue::Floating(parse_f64(raw)),
        }
    } else {
        NumberValue::Floating(parse_f64(raw))
    };
    Ok(JsonNumber { raw, value })
}

/// The JSON number grammar is a subset of what `f64::from_str` accepts, so
/// this cannot fail on a literal the lexer let through.
fn parse_f64(raw: &str) -> f64 {
    raw.parse::<f64>().unwrap_or(f64::NAN)
}
