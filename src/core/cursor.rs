// Cursor helpers over the host serializer: property probing, value skipping,
// and mapping of host decode failures onto the crate error taxonomy.
use std::borrow::Cow;
use std::cell::Cell;
use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde_json::Value;
use serde_json::error::Category;

use crate::core::error::{Error, ErrorKind};

/// Typed side channel for decode failures the host serializer can only
/// report as rendered text.
///
/// The host's error type is opaque, so a converter that detects a specific
/// shape failure records the kind here before raising the host error; the
/// driver that owns the decode reads it back when mapping the failure. One
/// trace is created per decode call and threaded through the seeds, so the
/// channel is local to that call.
#[derive(Debug, Default)]
pub(crate) struct ShapeTrace {
    kind: Cell<Option<ErrorKind>>,
}

impl ShapeTrace {
    pub(crate) fn record(&self, kind: ErrorKind) {
        self.kind.set(Some(kind));
    }

    pub(crate) fn take(&self) -> Option<ErrorKind> {
        self.kind.take()
    }
}

/// A property name read from the current cursor position.
///
/// Borrows the source span when the host serializer can lend it, so probing a
/// name against a candidate does not allocate in the common case.
pub(crate) struct PropertyName<'de>(Cow<'de, str>);

impl PropertyName<'_> {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    /// Tests the current property name against a candidate.
    pub(crate) fn is(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl<'de> de::Deserialize<'de> for PropertyName<'de> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NameVisitor;

        impl<'de> Visitor<'de> for NameVisitor {
            type Value = PropertyName<'de>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a property name")
            }

            fn visit_borrowed_str<E>(self, value: &'de str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PropertyName(Cow::Borrowed(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PropertyName(Cow::Owned(value.to_owned())))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PropertyName(Cow::Owned(value)))
            }
        }

        deserializer.deserialize_str(NameVisitor)
    }
}

/// Advances the cursor past the value of the current property without
/// materializing it.
pub(crate) fn skip_value<'de, A>(map: &mut A) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
{
    map.next_value::<IgnoredAny>().map(|_| ())
}

/// Advances the cursor past every remaining property of the current object.
pub(crate) fn skip_remaining<'de, A>(map: &mut A) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
{
    while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
    Ok(())
}

/// Seed adapter that tolerates `null` around an inner seeded decode.
pub(crate) struct OptionalSeed<S>(pub(crate) S);

impl<'de, S> DeserializeSeed<'de> for OptionalSeed<S>
where
    S: DeserializeSeed<'de>,
{
    type Value = Option<S::Value>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OptionalVisitor<S>(S);

        impl<'de, S> Visitor<'de> for OptionalVisitor<S>
        where
            S: DeserializeSeed<'de>,
        {
            type Value = Option<S::Value>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an optional value")
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                self.0.deserialize(deserializer).map(Some)
            }
        }

        deserializer.deserialize_option(OptionalVisitor(self.0))
    }
}

/// Lexical kind of a buffered value, for cursor-position diagnostics.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Wraps a host decode failure for the named field or document region.
///
/// This is the single seam where host-serializer errors become crate errors;
/// callsites supply the domain context (error mapping stays explicit at the
/// boundary that knows what was being decoded). A kind recorded on the
/// trace outranks the generic classification.
pub(crate) fn decode_error(what: &str, err: serde_json::Error, trace: Option<&ShapeTrace>) -> Error {
    let kind = trace
        .and_then(ShapeTrace::take)
        .unwrap_or_else(|| shape_kind(&err));
    Error::new(kind).with_property(what).with_source(err)
}

/// Classifies a host decode failure: syntax-level failures are `Parse`,
/// semantic mismatches are shape errors. Finer-grained kinds come from the
/// `ShapeTrace` recorded by the converter that detected the condition.
pub(crate) fn shape_kind(err: &serde_json::Error) -> ErrorKind {
    match err.classify() {
        Category::Data => ErrorKind::UnsupportedShape,
        _ => ErrorKind::Parse,
    }
}
