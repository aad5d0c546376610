//! Purpose: Dual-shape codec for identifier values that may arrive bare or enveloped.
//! Exports: `Identifier`, `IdentifierSeed`.
//! Role: Accepts both wire shapes on decode; encode always emits the canonical bare form.
//! Invariants: An `Identifier<K>` is interchangeable with a bare `K` in Rust code.
//! Invariants: Envelope decode scans forward once; unmatched properties are skipped.
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use serde::de::value::{BorrowedStrDeserializer, SeqAccessDeserializer};
use serde::de::{
    self, DeserializeSeed, Deserializer, IntoDeserializer, MapAccess, SeqAccess, Unexpected,
    Visitor,
};
use serde::ser::{Serialize, Serializer};

use crate::core::cursor::{self, PropertyName, ShapeTrace};
use crate::core::error::ErrorKind;

/// Wire property holding the key inside the envelope shape.
const ID_PROPERTY: &str = "id";

/// An immutable wrapper around exactly one key value.
///
/// On the wire an identifier is either the bare key or an object carrying an
/// `id` property; in Rust code it behaves like the key itself.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Identifier<K>(K);

impl<K> Identifier<K> {
    pub fn new(key: K) -> Self {
        Self(key)
    }

    pub fn into_inner(self) -> K {
        self.0
    }

    pub fn get(&self) -> &K {
        &self.0
    }
}

impl<K> Deref for Identifier<K> {
    type Target = K;

    fn deref(&self) -> &K {
        &self.0
    }
}

impl<K> From<K> for Identifier<K> {
    fn from(key: K) -> Self {
        Self(key)
    }
}

impl<K: PartialEq> PartialEq<K> for Identifier<K> {
    fn eq(&self, other: &K) -> bool {
        self.0 == *other
    }
}

impl<K: fmt::Display> fmt::Display for Identifier<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Encode is shape-normalizing: always the bare key, never the envelope.
impl<K: Serialize> Serialize for Identifier<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, K: de::Deserialize<'de>> de::Deserialize<'de> for Identifier<K> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IdentifierSeed(PhantomData::<K>).deserialize(deserializer)
    }
}

/// Dual-shape identifier decode around any inner key seed.
///
/// The inner seed receives the key token wherever it appears: directly for
/// the bare shape, or from the `id` property of the envelope shape. Passing
/// an interning seed makes the decoded key canonical.
pub struct IdentifierSeed<S>(pub S);

impl<'de, S> DeserializeSeed<'de> for IdentifierSeed<S>
where
    S: DeserializeSeed<'de>,
{
    type Value = Identifier<S::Value>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IdentifierVisitor {
            seed: self.0,
            trace: None,
        })
    }
}

/// Identifier seed that also records shape failures on a typed side channel,
/// for drivers that map host errors back into crate errors.
pub(crate) struct TracedIdentifier<'t, S> {
    pub(crate) seed: S,
    pub(crate) trace: &'t ShapeTrace,
}

impl<'de, 't, S> DeserializeSeed<'de> for TracedIdentifier<'t, S>
where
    S: DeserializeSeed<'de>,
{
    type Value = Identifier<S::Value>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IdentifierVisitor {
            seed: self.seed,
            trace: Some(self.trace),
        })
    }
}

struct IdentifierVisitor<'t, S> {
    seed: S,
    trace: Option<&'t ShapeTrace>,
}

impl<'de, 't, S> Visitor<'de> for IdentifierVisitor<'t, S>
where
    S: DeserializeSeed<'de>,
{
    type Value = Identifier<S::Value>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a bare identifier value or an object with an `id` property")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.seed.deserialize(value.into_deserializer()).map(Identifier)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.seed.deserialize(value.into_deserializer()).map(Identifier)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.seed.deserialize(value.into_deserializer()).map(Identifier)
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.seed.deserialize(value.into_deserializer()).map(Identifier)
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.seed.deserialize(value.into_deserializer()).map(Identifier)
    }

    fn visit_borrowed_str<E>(self, value: &'de str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.seed
            .deserialize(BorrowedStrDeserializer::new(value))
            .map(Identifier)
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.seed.deserialize(value.into_deserializer()).map(Identifier)
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        self.seed
            .deserialize(SeqAccessDeserializer::new(seq))
            .map(Identifier)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(de::Error::invalid_type(Unexpected::Unit, &self))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(de::Error::invalid_type(Unexpected::Option, &self))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seed = Some(self.seed);
        while let Some(name) = map.next_key::<PropertyName>()? {
            if name.is(ID_PROPERTY) {
                // First `id` wins.
                if let Some(inner) = seed.take() {
                    let key = map.next_value_seed(inner)?;
                    cursor::skip_remaining(&mut map)?;
                    return Ok(Identifier(key));
                }
            }
            cursor::skip_value(&mut map)?;
        }
        if let Some(trace) = self.trace {
            trace.record(ErrorKind::MissingIdentifier);
        }
        Err(de::Error::missing_field(ID_PROPERTY))
    }
}
