//! Purpose: Project fixed-arity positional values onto named JSON object properties.
//! Exports: `FieldMap`, `Projected`, `Single`, `Slot`, `SkipPolicy`, writer/seed adapters.
//! Role: Configurable tuple-to-object codec shared by channel metadata decoders.
//! Invariants: Property names are bound once, eagerly validated, and never change.
//! Invariants: Decode matches by name (ordinal, case-sensitive); source order is irrelevant.
//! Invariants: Unset slots keep their element default; unknown properties are skipped.
//! Invariants: Encode walks slots in declared order and honors the bound skip policy.
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, DeserializeSeed, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

use crate::core::cursor::{self, PropertyName};
use crate::core::error::{Error, ErrorKind};

/// Encode-side suppression policy for projected slots.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SkipPolicy {
    /// Write every slot, including nulls.
    Never,
    /// Suppress slots whose value would encode as null.
    #[default]
    Nulls,
    /// Suppress slots still holding their element default.
    Defaults,
}

/// A value that can occupy one projected slot.
pub trait Slot: Default + Serialize + DeserializeOwned {
    /// Whether the slot should be suppressed on encode under `policy`.
    fn skip_when(&self, policy: SkipPolicy) -> bool;
}

macro_rules! scalar_slot {
    ($($ty:ty),+ $(,)?) => {
        $(impl Slot for $ty {
            fn skip_when(&self, policy: SkipPolicy) -> bool {
                matches!(policy, SkipPolicy::Defaults) && *self == <$ty>::default()
            }
        })+
    };
}

scalar_slot!(String, bool, i32, i64, u32, u64, f64);

impl<T> Slot for Option<T>
where
    T: Serialize + DeserializeOwned,
{
    fn skip_when(&self, policy: SkipPolicy) -> bool {
        !matches!(policy, SkipPolicy::Never) && self.is_none()
    }
}

impl<T> Slot for Vec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn skip_when(&self, policy: SkipPolicy) -> bool {
        matches!(policy, SkipPolicy::Defaults) && self.is_empty()
    }
}

impl Slot for Value {
    fn skip_when(&self, policy: SkipPolicy) -> bool {
        !matches!(policy, SkipPolicy::Never) && self.is_null()
    }
}

/// A positional shape whose slots can be read and written individually.
///
/// Implemented for tuples of arity 1 through 7 (one macro keeps the seven
/// paths in lockstep) and for [`Single`], the arity-1 binding for values
/// that are not tuples.
pub trait Projected: Default {
    const ARITY: usize;

    fn read_slot<'de, A>(&mut self, slot: usize, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>;

    fn write_slot<M>(
        &self,
        slot: usize,
        name: &str,
        policy: SkipPolicy,
        map: &mut M,
    ) -> Result<(), M::Error>
    where
        M: SerializeMap;
}

/// Arity-1 projection of a value that is not itself a tuple.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Single<T>(pub T);

impl<T: Slot> Projected for Single<T> {
    const ARITY: usize = 1;

    fn read_slot<'de, A>(&mut self, slot: usize, map: &mut A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        match slot {
            0 => self.0 = map.next_value()?,
            _ => return Err(de::Error::custom("projection slot out of range")),
        }
        Ok(())
    }

    fn write_slot<M>(
        &self,
        slot: usize,
        name: &str,
        policy: SkipPolicy,
        map: &mut M,
    ) -> Result<(), M::Error>
    where
        M: SerializeMap,
    {
        if slot == 0 && !self.0.skip_when(policy) {
            map.serialize_entry(name, &self.0)?;
        }
        Ok(())
    }
}

macro_rules! tuple_projected {
    ($arity:literal => $(($idx:tt, $elem:ident)),+) => {
        impl<$($elem: Slot),+> Projected for ($($elem,)+) {
            const ARITY: usize = $arity;

            fn read_slot<'de, __Map>(&mut self, slot: usize, map: &mut __Map) -> Result<(), __Map::Error>
            where
                __Map: MapAccess<'de>,
            {
                match slot {
                    $($idx => self.$idx = map.next_value()?,)+
                    _ => return Err(de::Error::custom("projection slot out of range")),
                }
                Ok(())
            }

            fn write_slot<M>(
                &self,
                slot: usize,
                name: &str,
                policy: SkipPolicy,
                map: &mut M,
            ) -> Result<(), M::Error>
            where
                M: SerializeMap,
            {
                match slot {
                    $($idx => {
                        if !self.$idx.skip_when(policy) {
                            map.serialize_entry(name, &self.$idx)?;
                        }
                    })+
                    _ => {}
                }
                Ok(())
            }
        }
    };
}

tuple_projected!(1 => (0, A));
tuple_projected!(2 => (0, A), (1, B));
tuple_projected!(3 => (0, A), (1, B), (2, C));
tuple_projected!(4 => (0, A), (1, B), (2, C), (3, D));
tuple_projected!(5 => (0, A), (1, B), (2, C), (3, D), (4, E));
tuple_projected!(6 => (0, A), (1, B), (2, C), (3, D), (4, E), (5, F));
tuple_projected!(7 => (0, A), (1, B), (2, C), (3, D), (4, E), (5, F), (6, G));

/// Binding of an ordered property-name list to the slots of a [`Projected`]
/// shape. Constructed once at setup; binding failures are configuration
/// errors and never surface during decode.
pub struct FieldMap<T> {
    names: Box<[Box<str>]>,
    policy: SkipPolicy,
    _shape: PhantomData<fn() -> T>,
}

impl<T: Projected> FieldMap<T> {
    /// Binds `names` to the slots of `T`, in declaration order.
    pub fn bind<I, N>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = N>,
        N: Into<Box<str>>,
    {
        let names: Box<[Box<str>]> = names.into_iter().map(Into::into).collect();
        if names.len() != T::ARITY {
            return Err(Error::new(ErrorKind::IncompatibleProjection).with_message(format!(
                "{} property names bound to a shape with {} slots",
                names.len(),
                T::ARITY
            )));
        }
        for (index, name) in names.iter().enumerate() {
            if names[..index].contains(name) {
                return Err(Error::new(ErrorKind::IncompatibleProjection)
                    .with_message("duplicate property name in binding")
                    .with_property(name.to_string()));
            }
        }
        Ok(Self {
            names,
            policy: SkipPolicy::default(),
            _shape: PhantomData,
        })
    }

    pub fn with_policy(mut self, policy: SkipPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> SkipPolicy {
        self.policy
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(AsRef::as_ref)
    }

    fn slot_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|bound| bound.as_ref() == name)
    }

    /// Decodes a buffered object through this binding.
    pub fn read_value(&self, value: &Value) -> Result<T, Error> {
        if !value.is_object() {
            return Err(Error::new(ErrorKind::CursorPosition).with_message(format!(
                "projection expects an object, found {}",
                cursor::value_kind(value)
            )));
        }
        self.deserialize(value)
            .map_err(|err| cursor::decode_error("projection", err, None))
    }

    /// Encode adapter for one value.
    pub fn writer<'a>(&'a self, value: &'a T) -> ProjectionWriter<'a, T> {
        ProjectionWriter {
            fields: self,
            value,
        }
    }

    /// Encode adapter for a sequence of values.
    pub fn rows_writer<'a>(&'a self, rows: &'a [T]) -> RowsWriter<'a, T> {
        RowsWriter { fields: self, rows }
    }
}

impl<T> fmt::Debug for FieldMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMap")
            .field("names", &self.names)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<'de, 'a, T: Projected> DeserializeSeed<'de> for &'a FieldMap<T> {
    type Value = T;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ProjectionVisitor { fields: self })
    }
}

struct ProjectionVisitor<'a, T> {
    fields: &'a FieldMap<T>,
}

impl<'de, T: Projected> Visitor<'de> for ProjectionVisitor<'_, T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "an object with up to {} bound properties", T::ARITY)
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut out = T::default();
        while let Some(name) = map.next_key::<PropertyName>()? {
            match self.fields.slot_of(name.as_str()) {
                Some(slot) => out.read_slot(slot, &mut map)?,
                None => cursor::skip_value(&mut map)?,
            }
        }
        Ok(out)
    }
}

/// Serializes one projected value as an object, slots in declared order.
pub struct ProjectionWriter<'a, T> {
    fields: &'a FieldMap<T>,
    value: &'a T,
}

impl<T: Projected> Serialize for ProjectionWriter<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (slot, name) in self.fields.names.iter().enumerate() {
            self.value.write_slot(slot, name, self.fields.policy, &mut map)?;
        }
        map.end()
    }
}

/// Serializes a slice of projected values as an array of objects.
pub struct RowsWriter<'a, T> {
    fields: &'a FieldMap<T>,
    rows: &'a [T],
}

impl<T: Projected> Serialize for RowsWriter<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows {
            seq.serialize_element(&self.fields.writer(row))?;
        }
        seq.end()
    }
}

/// Seed that decodes an array of objects through one binding.
pub struct ProjectedRows<'a, T>(pub &'a FieldMap<T>);

impl<'de, T: Projected> DeserializeSeed<'de> for ProjectedRows<'_, T> {
    type Value = Vec<T>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowsVisitor<'a, T>(&'a FieldMap<T>);

        impl<'de, T: Projected> Visitor<'de> for RowsVisitor<'_, T> {
            type Value = Vec<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("an array of projected objects")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut rows = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(row) = seq.next_element_seed(self.0)? {
                    rows.push(row);
                }
                Ok(rows)
            }
        }

        deserializer.deserialize_seq(RowsVisitor(self.0))
    }
}
