//! Semantic events produced by the grammar and routed to handlers.

use crate::number::JsonNumber;

/// One validated JSON grammar element, in document order.
///
/// Strings and keys borrow either from the chunk passed to `feed` or from the
/// parser's scratch buffer; they are only valid for the duration of the
/// handler call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Event<'a> {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// An object member name.
    Key(&'a str),
    /// A string value.
    String(&'a str),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`
    Null,
    /// A numeric value.
    Number(JsonNumber<'a>),
}
