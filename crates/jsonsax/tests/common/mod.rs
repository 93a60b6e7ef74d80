#![allow(missing_docs, dead_code)]

use std::{cell::RefCell, rc::Rc};

use jsonsax::{
    Flow, HandlerKind, HandlerResult, JsonHandler, JsonNumber, Parser, ParserError,
    ParserOptions, Status,
};
use serde_json::{Map, Value};

pub const DOCUMENT: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": null
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": 2,
            "features": ["serde", "tokio"],
            "ratio": 0.125
        }
    },
    "snippets": ["fn main() {}", "println!(\"hi\")", "tab\there", "é😀"],
    "matrix": [[1, -2], [3e2, -4.5E-1], []],
    "mixed": ["s", {"k": "v"}, true, [false], null, {}],
    "limits": [9223372036854775807, -9223372036854775808]
}
"#;

/// Rebuilds a `serde_json::Value` from events.
#[derive(Debug, Default)]
pub struct ValueBuilder {
    stack: Vec<Value>,
    keys: Vec<String>,
    pub roots: Vec<Value>,
}

impl ValueBuilder {
    fn insert(&mut self, value: Value) -> HandlerResult {
        match self.stack.last_mut() {
            Some(Value::Array(items)) => items.push(value),
            Some(Value::Object(members)) => {
                let key = self.keys.pop().unwrap_or_default();
                members.insert(key, value);
            }
            Some(_) => unreachable!("only containers are stacked"),
            None => self.roots.push(value),
        }
        Ok(Flow::Continue)
    }

    fn close(&mut self) -> HandlerResult {
        let container = self.stack.pop().expect("close without open");
        self.insert(container)
    }
}

impl JsonHandler for ValueBuilder {
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
        self.stack.push(Value::Object(Map::new()));
        Ok(Flow::Continue)
    }

    fn on_object_end(&mut self) -> HandlerResult {
        self.close()
    }

    fn on_array_start(&mut self) -> HandlerResult {
        self.stack.push(Value::Array(Vec::new()));
        Ok(Flow::Continue)
    }

    fn on_array_end(&mut self) -> HandlerResult {
        self.close()
    }

    fn on_object_key(&mut self, key: &str) -> HandlerResult {
        self.keys.push(key.to_owned());
        Ok(Flow::Continue)
    }

    fn on_boolean(&mut self, value: bool) -> HandlerResult {
        self.insert(Value::Bool(value))
    }

    fn on_null(&mut self) -> HandlerResult {
        self.insert(Value::Null)
    }

    fn on_string(&mut self, value: &str) -> HandlerResult {
        self.insert(Value::String(value.to_owned()))
    }

    fn on_number(&mut self, number: JsonNumber<'_>) -> HandlerResult {
        let number = number.as_str().parse().expect("serde_json accepts JSON numbers");
        self.insert(Value::Number(number))
    }
}

/// Feed `chunks` in order, finish, and return every top-level value.
pub fn build_values(chunks: &[&[u8]], options: ParserOptions) -> Result<Vec<Value>, ParserError> {
    let builder = Rc::new(RefCell::new(ValueBuilder::default()));
    let mut parser = Parser::builder()
        .options(options)
        .apply_adapter(Rc::clone(&builder))
        .expect("builder declares handlers")
        .build();
    for chunk in chunks {
        if parser.feed(chunk)? == Status::Stopped {
            break;
        }
    }
    parser.finish()?;
    drop(parser);
    Ok(builder.take().roots)
}

/// Split `input` into chunks of `size` bytes, ignoring UTF-8 boundaries.
pub fn chunked(input: &[u8], size: usize) -> Vec<&[u8]> {
    input.chunks(size).collect()
}
