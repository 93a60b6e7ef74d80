#![no_main]
//! Chunk invariance: feeding the same bytes whole or split at arbitrary
//! points must yield the same events and the same error.
use std::cell::RefCell;
use std::rc::Rc;

use jsonsax::{
    Flow, HandlerKind, HandlerResult, IntegerOverflow, JsonHandler, JsonNumber, Parser,
    ParserOptions, Status,
};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag byte + 4-byte split seed

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static SEPARATORS: &[&[u8]] = &[b" ", b"\n", b"\t ", b"/* c */", b"// c\n"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// A random document, at most `depth` containers deep.
fn random_value(rng: &mut SmallRng, depth: u32) -> Value {
    let kinds = if depth == 0 { 5 } else { 7 };
    match rng.random_range(0..kinds) {
        0 => Value::Null,
        1 => Value::Bool(rng.random()),
        2 => Value::from(rng.random::<i64>()),
        3 => serde_json::Number::from_f64(rng.random::<f64>() * 1e6)
            .map_or(Value::Null, Value::Number),
        4 => Value::String(
            (0..rng.random_range(0..12))
                .map(|_| match rng.random_range(0..4) {
                    0 => char::from(rng.random_range(0u8..0x20)),
                    1 => rng.random_range('\u{80}'..='\u{10FFFF}'),
                    _ => char::from(rng.random_range(b' '..=b'~')),
                })
                .collect(),
        ),
        5 => Value::Array(
            (0..rng.random_range(0..4))
                .map(|_| random_value(rng, depth - 1))
                .collect(),
        ),
        _ => Value::Object(
            (0..rng.random_range(0..4))
                .map(|i| (format!("k{i}"), random_value(rng, depth - 1)))
                .collect::<Map<_, _>>(),
        ),
    }
}

/// Mostly emit a header plus a run of well-formed documents, so the fuzzer
/// spends its time past the first byte; otherwise mutate bytes.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size >= HEADER && !seed.is_multiple_of(10) {
        return fuzzer_mutate(data, size, max_size);
    }
    let mut out = with_rng(|rng| {
        let mut out = vec![rng.random::<u8>() & 0x3F];
        out.extend_from_slice(&rng.next_u32().to_le_bytes());
        for _ in 0..rng.random_range(1..4) {
            out.extend_from_slice(SEPARATORS[rng.random_range(0..SEPARATORS.len())]);
            let value = random_value(rng, 4);
            out.extend_from_slice(&serde_json::to_vec(&value).unwrap_or_default());
        }
        out
    });
    out.truncate(max_size);
    data[..out.len()].copy_from_slice(&out);
    out.len()
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug, Default)]
struct Trace(Vec<String>);

impl Trace {
    fn push(&mut self, event: String) -> HandlerResult {
        self.0.push(event);
        Ok(Flow::Continue)
    }
}

impl JsonHandler for Trace {
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
        self.push("{".into())
    }
    fn on_object_end(&mut self) -> HandlerResult {
        self.push("}".into())
    }
    fn on_array_start(&mut self) -> HandlerResult {
        self.push("[".into())
    }
    fn on_array_end(&mut self) -> HandlerResult {
        self.push("]".into())
    }
    fn on_object_key(&mut self, key: &str) -> HandlerResult {
        self.push(format!("k{key:?}"))
    }
    fn on_boolean(&mut self, value: bool) -> HandlerResult {
        self.push(value.to_string())
    }
    fn on_null(&mut self) -> HandlerResult {
        self.push("null".into())
    }
    fn on_string(&mut self, value: &str) -> HandlerResult {
        self.push(format!("{value:?}"))
    }
    fn on_number(&mut self, number: JsonNumber<'_>) -> HandlerResult {
        self.push(format!("{}={:?}", number.as_str(), number.value()))
    }
}

fn run(chunks: &[&[u8]], options: ParserOptions) -> (Vec<String>, Result<Status, String>) {
    let trace = Rc::new(RefCell::new(Trace::default()));
    let mut parser = Parser::builder()
        .options(options)
        .apply_adapter(Rc::clone(&trace))
        .expect("trace declares handlers")
        .build();
    let mut result = Ok(Status::Ready);
    for chunk in chunks {
        result = parser.feed(chunk);
        if result.is_err() {
            break;
        }
    }
    if result.is_ok() {
        result = parser.finish();
    }
    drop(parser);
    (trace.take().0, result.map_err(|e| e.to_string()))
}

/// Split `data` at byte offsets derived from `seed`, ignoring UTF-8
/// boundaries. Each chunk is at least one byte.
fn split(data: &[u8], seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    let mut state = seed | 1;
    while !rest.is_empty() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let (chunk, tail) = rest.split_at(1 + (state as usize % rest.len()));
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

fn parser(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let flags = data[0];
    let seed = u64::from(u32::from_le_bytes([data[1], data[2], data[3], data[4]]));
    let data = &data[HEADER..];

    let options = ParserOptions {
        allow_comments: flags & 1 != 0,
        allow_trailing_garbage: flags & 2 != 0,
        allow_multiple_values: flags & 4 != 0,
        allow_partial_values: flags & 8 != 0,
        allow_invalid_utf8: flags & 16 != 0,
        integer_overflow: if flags & 32 != 0 {
            IntegerOverflow::Floating
        } else {
            IntegerOverflow::Error
        },
    };

    let whole = run(&[data], options);
    let bytewise: Vec<&[u8]> = data.chunks(1).collect();
    assert_eq!(whole, run(&bytewise, options), "bytewise feeding diverged");
    assert_eq!(whole, run(&split(data, seed), options), "split feeding diverged");
}

fuzz_target!(|data: &[u8]| parser(data));
