//! A handler adapter that writes events back out as compact JSON.

use alloc::{string::String, vec::Vec};
use core::fmt::Write;

use crate::{
    handler::{Flow, HandlerKind, HandlerResult, JsonHandler},
    number::JsonNumber,
};

/// Re-serializes events into compact JSON text.
///
/// Numbers are written exactly as they appeared in the input. Strings are
/// re-escaped, so the output of a document that used different escapes is
/// semantically, not byte-for-byte, equal to the input. Successive top-level
/// values are separated by a newline.
///
/// # Examples
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use jsonsax::{JsonWriter, Parser};
///
/// let writer = Rc::new(RefCell::new(JsonWriter::new()));
/// let mut parser = Parser::builder()
///     .apply_adapter(Rc::clone(&writer))
///     .unwrap()
///     .build();
/// parser.parse(b"{ \"a\" : [ 1 , 2.50 , \"\\u0041\" ] }").unwrap();
/// assert_eq!(writer.borrow().as_str(), r#"{"a":[1,2.50,"A"]}"#);
/// ```
#[derive(Debug, Default)]
pub struct JsonWriter {
    out: String,
    /// One entry per open container: whether a member was already written.
    needs_comma: Vec<bool>,
    after_key: bool,
    roots: usize,
}

impl JsonWriter {
    /// An empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consume the writer, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }

    /// Write the separator that precedes a value or key.
    fn begin(&mut self) {
        if self.after_key {
            self.after_key = false;
            return;
        }
        match self.needs_comma.last_mut() {
            Some(needs_comma) => {
                if *needs_comma {
                    self.out.push(',');
                }
                *needs_comma = true;
            }
            None => {
                if self.roots > 0 {
                    self.out.push('\n');
                }
                self.roots += 1;
            }
        }
    }

    fn open(&mut self, bracket: char) -> HandlerResult {
        self.begin();
        self.out.push(bracket);
        self.needs_comma.push(false);
        Ok(Flow::Continue)
    }

    fn close(&mut self, bracket: char) -> HandlerResult {
        self.needs_comma.pop();
        self.out.push(bracket);
        Ok(Flow::Continue)
    }

    fn scalar(&mut self, text: &str) -> HandlerResult {
        self.begin();
        self.out.push_str(text);
        Ok(Flow::Continue)
    }

    fn string(&mut self, value: &str) -> core::fmt::Result {
        self.out.push('"');
        write_escaped_string(value, &mut self.out)?;
        self.out.push('"');
        Ok(())
    }
}

impl JsonHandler for JsonWriter {
    const HANDLES: &'static [HandlerKind] = &[
        HandlerKind::ObjectStart,
        HandlerKind::ObjectEnd,
        HandlerKind::ArrayStart,
        HandlerKind::ArrayEnd,
        HandlerKind::ObjectKey,
        HandlerKind::Boolean,
        HandlerKind::Null,
        HandlerKind::String,
        HandlerKind::Number,
    ];

    fn on_object_start(&mut self) -> HandlerResult {
        self.open('{')
    }

    fn on_object_end(&mut self) -> HandlerResult {
        self.close('}')
    }

    fn on_array_start(&mut self) -> HandlerResult {
        self.open('[')
    }

    fn on_array_end(&mut self) -> HandlerResult {
        self.close(']')
    }

    fn on_object_key(&mut self, key: &str) -> HandlerResult {
        self.begin();
        self.string(key)?;
        self.out.push(':');
        self.after_key = true;
        Ok(Flow::Continue)
    }

    fn on_boolean(&mut self, value: bool) -> HandlerResult {
        self.scalar(if value { "true" } else { "false" })
    }

    fn on_null(&mut self) -> HandlerResult {
        self.scalar("null")
    }

    fn on_string(&mut self, value: &str) -> HandlerResult {
        self.begin();
        self.string(value)?;
        Ok(Flow::Continue)
    }

    fn on_number(&mut self, number: JsonNumber<'_>) -> HandlerResult {
        self.scalar(number.as_str())
    }
}

/// Write `src` with `"`, `\` and control characters replaced by their JSON
/// escape sequences.
pub(crate) fn write_escaped_string<W: Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            // Pre-2019 JSON parsers reject raw line separators
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", u32::from(c))?,
            c if c.is_control() => write!(f, "\\u{:04X}", u32::from(c))?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}
