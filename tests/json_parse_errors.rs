//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used by runtime parse diagnostics.
//! Invariants: Category mapping remains deterministic for representative messages.
//! Invariants: Tests avoid payload leakage; assertions target category/hint text only.
//! Notes: Uses source include to exercise internal helper logic without widening API surface.

#[path = "../src/json/parse.rs"]
mod parse;

use parse::ParseFailureCategory;
use serde_json::Value;

#[test]
fn syntax_failures_are_rejected() {
    let err = parse::from_str::<Value>(r#"{"a":}"#).unwrap_err();
    let _ = parse::categorize_error(&err);

    assert!(parse::from_str::<Value>("").is_err());
    assert!(parse::from_str::<Value>(r#"{"unterminated": "#).is_err());
}

#[test]
fn category_mapping_handles_representative_messages() {
    let cases = [
        ("invalid UTF-8 sequence", ParseFailureCategory::Utf8),
        ("invalid number", ParseFailureCategory::NumericRange),
        ("exponent out of range", ParseFailureCategory::NumericRange),
        ("recursion limit exceeded while parsing", ParseFailureCategory::DepthLimit),
        ("maximum depth reached", ParseFailureCategory::DepthLimit),
        ("expected value", ParseFailureCategory::Syntax),
    ];

    for (message, expected) in cases {
        assert_eq!(parse::categorize_message(message), expected, "{message}");
    }
}

#[test]
fn hint_contains_category_and_context() {
    let err = parse::from_str::<Value>(r#"{"a":}"#).unwrap_err();
    let hint = parse::hint_for_error(&err, "test.context");
    assert!(hint.starts_with("test.context: "));
    assert!(hint.contains("parse failure"));
}

#[test]
fn buffered_documents_match_the_generic_entrypoint() {
    let payload = r#"{"channelId":"msteams","type":"message","text":"hi"}"#;
    let buffered = parse::buffer(payload).expect("buffer");
    let generic: Value = parse::from_str(payload).expect("from_str");
    assert_eq!(buffered, generic);
}
