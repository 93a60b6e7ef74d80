use alloc::{string::ToString, vec::Vec};

use rstest::rstest;

use super::record_chunks;
use crate::{ErrorKind, ParserError, ParserOptions};

/// Parse `input` whole and byte by byte; both must fail the same way.
fn failure(input: &[u8], options: ParserOptions) -> ParserError {
    let whole = record_chunks(&[input], options).unwrap_err();
    let bytewise: Vec<&[u8]> = input.chunks(1).collect();
    let split = record_chunks(&bytewise, options).unwrap_err();
    assert_eq!(whole.to_string(), split.to_string());
    whole
}

#[rstest]
#[case::unclosed_nested(b"[[], [[[]]", ErrorKind::Structural, 10)]
#[case::unclosed_object(br#"{"a": {"b": 1}"#, ErrorKind::Structural, 14)]
#[case::trailing_comma_array(b"[1,]", ErrorKind::Structural, 3)]
#[case::trailing_comma_object(br#"{"a": 1,}"#, ErrorKind::Structural, 8)]
#[case::missing_colon(br#"{"a" 1}"#, ErrorKind::Structural, 5)]
#[case::non_string_key(b"{1: 2}", ErrorKind::Structural, 1)]
#[case::missing_comma(b"[1 2]", ErrorKind::Structural, 3)]
#[case::mismatched_close(b"[1}", ErrorKind::Structural, 2)]
#[case::stray_close(b"]", ErrorKind::Structural, 0)]
#[case::stray_colon(b"[:]", ErrorKind::Structural, 1)]
#[case::trailing_data(b"{} []", ErrorKind::Structural, 3)]
#[case::empty(b" \n ", ErrorKind::Structural, 3)]
#[case::leading_zero(b"[01]", ErrorKind::Lexical, 2)]
#[case::bare_fraction(b"[1.]", ErrorKind::Lexical, 3)]
#[case::bare_minus(b"[-]", ErrorKind::Lexical, 2)]
#[case::leading_plus(b"[+1]", ErrorKind::Lexical, 1)]
#[case::leading_point(b"[.5]", ErrorKind::Lexical, 1)]
#[case::bad_escape(br#"["\x"]"#, ErrorKind::Lexical, 3)]
#[case::bad_unicode_escape(br#"["\u12G4"]"#, ErrorKind::Lexical, 6)]
#[case::lone_high_surrogate(br#"["\ud800x"]"#, ErrorKind::Lexical, 8)]
#[case::lone_low_surrogate(br#"["\udc00"]"#, ErrorKind::Lexical, 7)]
#[case::raw_control(b"[\"\t\"]", ErrorKind::Lexical, 2)]
#[case::invalid_utf8(b"[\"\xc0\xaf\"]", ErrorKind::Lexical, 2)]
#[case::unterminated_string(b"[\"abc", ErrorKind::Lexical, 5)]
#[case::misspelled_keyword(b"[trux]", ErrorKind::Lexical, 4)]
#[case::truncated_keyword(b"[nul", ErrorKind::Lexical, 4)]
#[case::single_quotes(b"['a']", ErrorKind::Lexical, 1)]
#[case::comment_not_allowed(b"[1] // c", ErrorKind::Lexical, 4)]
#[case::positive_overflow(b"9223372036854775808", ErrorKind::Overflow, 0)]
#[case::negative_overflow(b"[-9223372036854775809]", ErrorKind::Overflow, 1)]
fn rejects_malformed_documents(
    #[case] input: &[u8],
    #[case] kind: ErrorKind,
    #[case] offset: usize,
) {
    let err = failure(input, ParserOptions::default());
    assert_eq!(err.kind(), kind, "{err}");
    assert_eq!(err.offset(), offset, "{err}");
}

#[rstest]
#[case::unterminated_comment(b"[1] /* open", 11)]
#[case::lone_slash(b"[1, /]", 5)]
fn comment_errors(#[case] input: &[u8], #[case] offset: usize) {
    let options = ParserOptions {
        allow_comments: true,
        ..Default::default()
    };
    let err = failure(input, options);
    assert_eq!(err.kind(), ErrorKind::Lexical, "{err}");
    assert_eq!(err.offset(), offset, "{err}");
}

#[test]
fn error_message_names_the_position() {
    let err = failure(b"{\n  \"a\": tru\n}", ParserOptions::default());
    assert_eq!(
        err.to_string(),
        "lexical error: invalid character '\\n' in literal `true` at byte 12 (line 2, column 11)"
    );
}
