//! Purpose: Process-lifetime interning of small immutable values decoded from text.
//! Exports: `Interner`, `Internable`, `Interned`.
//! Role: Shared cache injected into codecs so repeated wire text maps to one instance.
//! Invariants: The cache never evicts; callers opt in knowing growth is unbounded.
//! Invariants: Eligible types are closed over a sealed trait; no runtime registration.
//! Invariants: Concurrent misses may build duplicate candidates; exactly one survives.
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde::de::{self, DeserializeSeed, Deserializer, Visitor};
use url::Url;

use crate::core::error::{Error, ErrorKind};

mod sealed {
    pub trait Sealed {}

    impl Sealed for url::Url {}
    impl Sealed for String {}
}

/// Types with a stable text encoding that may be interned.
///
/// The trait is sealed: only values whose identity is fully determined by
/// their source text are eligible, so an ineligible type is rejected at
/// compile time rather than at decode time.
pub trait Internable: sealed::Sealed + Send + Sync + Sized + 'static {
    fn from_text(text: &str) -> Result<Self, Error>;
}

impl Internable for Url {
    fn from_text(text: &str) -> Result<Self, Error> {
        Url::parse(text).map_err(|err| {
            Error::new(ErrorKind::UnsupportedShape)
                .with_message(format!("invalid url `{text}`"))
                .with_source(err)
        })
    }
}

impl Internable for String {
    fn from_text(text: &str) -> Result<Self, Error> {
        Ok(text.to_owned())
    }
}

/// Keyed cache mapping decoded text to one canonical instance per distinct
/// value, shared for the lifetime of the owning codec.
///
/// Not a global: construct one and pass it to whichever component owns the
/// interning decision, so tests can substitute a fresh instance.
pub struct Interner<T> {
    entries: DashMap<Box<str>, Arc<T>>,
}

impl<T: Internable> Interner<T> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Returns the canonical instance for `text`, constructing it through
    /// `factory` on a miss.
    ///
    /// Concurrent misses on the same key may each run the factory; the losing
    /// candidate is discarded and every caller observes the surviving
    /// instance. Callers must therefore treat the factory as pure and only
    /// rely on identity of the returned value.
    pub fn get_or_create<F, E>(&self, text: &str, factory: F) -> Result<Arc<T>, E>
    where
        F: FnOnce(&str) -> Result<T, E>,
    {
        if let Some(existing) = self.entries.get(text) {
            return Ok(Arc::clone(existing.value()));
        }
        let candidate = Arc::new(factory(text)?);
        let surviving = self.entries.entry(Box::from(text)).or_insert(candidate);
        Ok(Arc::clone(surviving.value()))
    }

    /// `get_or_create` with the type's own text constructor as the factory.
    pub fn resolve(&self, text: &str) -> Result<Arc<T>, Error> {
        self.get_or_create(text, T::from_text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Internable> Default for Interner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Interner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Seed that reads a string token and resolves it through an interner.
pub struct Interned<'a, T>(pub &'a Interner<T>);

impl<'de, T: Internable> DeserializeSeed<'de> for Interned<'_, T> {
    type Value = Arc<T>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(self)
    }
}

impl<'de, T: Internable> Visitor<'de> for Interned<'_, T> {
    type Value = Arc<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string with a stable text encoding")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.0.resolve(value).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::de::DeserializeSeed;
    use serde_json::json;
    use url::Url;

    use super::{Interned, Interner};
    use crate::core::error::ErrorKind;

    #[test]
    fn equal_text_yields_the_identical_instance() {
        let interner = Interner::<Url>::new();
        let first = interner.resolve("https://x/").expect("resolve");
        let second = interner.resolve("https://x/").expect("resolve");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn distinct_text_yields_distinct_instances() {
        let interner = Interner::<Url>::new();
        let first = interner.resolve("https://x/").expect("resolve");
        let second = interner.resolve("https://y/").expect("resolve");
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn factory_runs_only_on_miss() {
        let interner = Interner::<String>::new();
        let mut calls = 0usize;
        for _ in 0..3 {
            let _ = interner
                .get_or_create::<_, std::convert::Infallible>("team-general", |text| {
                    calls += 1;
                    Ok(text.to_owned())
                })
                .expect("intern");
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn factory_failure_caches_nothing() {
        let interner = Interner::<Url>::new();
        let err = interner.resolve("not a url").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedShape);
        assert!(interner.is_empty());
    }

    #[test]
    fn interned_seed_reads_a_string_token() {
        let interner = Interner::<Url>::new();
        let value = json!("https://svc.example/");
        let via_seed = Interned(&interner).deserialize(&value).expect("decode");
        let direct = interner.resolve("https://svc.example/").expect("resolve");
        assert!(Arc::ptr_eq(&via_seed, &direct));
    }

    #[test]
    fn interned_seed_rejects_non_string_tokens() {
        let interner = Interner::<Url>::new();
        assert!(Interned(&interner).deserialize(&json!(17)).is_err());
    }
}
