//! Shared test helpers and cross-module test suites.

mod parse_bad;
mod property_multivalue;

use alloc::{
    format,
    rc::Rc,
    string::{String, ToString},
    vec::Vec,
};
use core::cell::RefCell;

use crate::{
    Flow, HandlerKind, HandlerResult, JsonHandler, JsonNumber, JsonWriter, Parser, ParserError,
    ParserOptions, Status,
};

/// Records every event as a short string.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) events: Vec<String>,
}

impl Recorder {
    fn push(&mut self, event: impl Into<String>) -> HandlerResult {
        self.events.push(event.into());
        Ok(Flow::Continue)
    }
}

impl JsonHandler for Recorder {
    const HANDLES: &'static [HandlerKind] = <JsonWriter as JsonHandler>::HANDLES;

    fn on_object_start(&mut self) -> HandlerResult {
        self.push("{")
    }
    fn on_object_end(&mut self) -> HandlerResult {
        self.push("}")
    }
    fn on_array_start(&mut self) -> HandlerResult {
        self.push("[")
    }
    fn on_array_end(&mut self) -> HandlerResult {
        self.push("]")
    }
    fn on_object_key(&mut self, key: &str) -> HandlerResult {
        self.push(format!("key:{key}"))
    }
    fn on_boolean(&mut self, value: bool) -> HandlerResult {
        self.push(format!("bool:{value}"))
    }
    fn on_null(&mut self) -> HandlerResult {
        self.push("null")
    }
    fn on_string(&mut self, value: &str) -> HandlerResult {
        self.push(format!("str:{value}"))
    }
    fn on_number(&mut self, number: JsonNumber<'_>) -> HandlerResult {
        self.push(format!("num:{}", number.as_str()))
    }
}

/// Parse `chunks` in order and return the recorded events.
pub(crate) fn record_chunks(
    chunks: &[&[u8]],
    options: ParserOptions,
) -> Result<Vec<String>, ParserError> {
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut parser = Parser::builder()
        .options(options)
        .apply_adapter(Rc::clone(&recorder))
        .unwrap()
        .build();
    for chunk in chunks {
        if parser.feed(chunk)? == Status::Stopped {
            break;
        }
    }
    parser.finish()?;
    drop(parser);
    Ok(recorder.take().events)
}

pub(crate) fn record(input: &[u8], options: ParserOptions) -> Result<Vec<String>, ParserError> {
    record_chunks(&[input], options)
}

/// Split `input` into consecutive non-empty chunks whose sizes are derived
/// from `splits`.
pub(crate) fn split_by<'a>(input: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = input;
    for s in splits {
        if rest.is_empty() {
            break;
        }
        let (chunk, tail) = rest.split_at(1 + s % rest.len());
        chunks.push(chunk);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

/// Parse with a [`JsonWriter`] attached and return its output.
pub(crate) fn rewrite_chunks(
    chunks: &[&[u8]],
    options: ParserOptions,
) -> Result<String, ParserError> {
    let writer = Rc::new(RefCell::new(JsonWriter::new()));
    let mut parser = Parser::builder()
        .options(options)
        .apply_adapter(Rc::clone(&writer))
        .unwrap()
        .build();
    for chunk in chunks {
        parser.feed(chunk)?;
    }
    parser.finish()?;
    drop(parser);
    Ok(writer.borrow().as_str().to_string())
}
