use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use quickcheck::QuickCheck;

use super::{arbitrary::Value, rewrite_chunks, split_by};
use crate::ParserOptions;

/// Property: a whitespace-separated stream of values is parsed value by
/// value, whatever the chunking.
#[test]
fn multivalue_stream_roundtrip() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(values: Vec<Value>, splits: Vec<usize>) -> bool {
        let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
        let src = rendered.join(" \n\t");
        let options = ParserOptions {
            allow_multiple_values: true,
            ..Default::default()
        };
        let chunks = split_by(src.as_bytes(), &splits);
        rewrite_chunks(&chunks, options).ok() == Some(rendered.join("\n"))
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 2_000 } else { 200 };
    #[cfg(miri)]
    let tests = 5;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Vec<Value>, Vec<usize>) -> bool);
}
