//! Purpose: Provide the internal runtime JSON decode entrypoints.
//! Exports: `from_str`, `buffer`, `ParseFailureCategory`, `categorize_error`, `hint_for_error`.
//! Role: Parser boundary that centralizes simd-json usage details.
//! Invariants: Runtime decoding uses simd-json; buffered documents are `serde_json::Value`.
//! Invariants: Input buffers are copied once to satisfy simd-json's mutable-slice API.
//! Invariants: Category mapping is deterministic for a given failure message.
//! Notes: Error mapping to crate errors is done by callsites so domain context stays explicit.

use serde::de::DeserializeOwned;
use serde_json::Value;

pub(crate) fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, simd_json::Error> {
    let mut bytes = input.as_bytes().to_vec();
    simd_json::serde::from_slice(&mut bytes)
}

/// Parses one payload into an addressable document for codecs that need to
/// probe properties before committing to a shape.
pub(crate) fn buffer(input: &str) -> Result<Value, simd_json::Error> {
    from_str(input)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    NumericRange,
    Utf8,
    DepthLimit,
}

pub(crate) fn categorize_error(err: &simd_json::Error) -> ParseFailureCategory {
    categorize_message(&err.to_string())
}

pub(crate) fn categorize_message(message: &str) -> ParseFailureCategory {
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("utf-8") || lowered.contains("utf8") {
        ParseFailureCategory::Utf8
    } else if lowered.contains("number") || lowered.contains("exponent") {
        ParseFailureCategory::NumericRange
    } else if lowered.contains("depth") || lowered.contains("recursion") {
        ParseFailureCategory::DepthLimit
    } else {
        ParseFailureCategory::Syntax
    }
}

/// A one-line diagnostic suitable for attaching to a crate `Parse` error.
pub(crate) fn hint_for_error(err: &simd_json::Error, context: &str) -> String {
    let category = categorize_error(err);
    format!("{context}: {category:?} parse failure: {err}")
}
