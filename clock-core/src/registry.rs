//! Cyclic catalog of buildable variants.
//!
//! The catalog is a static `key -> builder` table. A [`Registry`] copies it
//! once, optionally shuffles the copy with an injected [`Xor128`], and from
//! then on only its cursor moves.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use crate::error::RegistryError;
use crate::rng::Xor128;

pub struct CatalogEntry<T> {
    pub key: &'static str,
    pub build: fn() -> T,
}

impl<T> CatalogEntry<T> {
    pub const fn new(key: &'static str, build: fn() -> T) -> Self {
        Self { key, build }
    }
}

// Manual impls: `fn() -> T` is Copy for every T, derive would demand `T: Copy`.
impl<T> Clone for CatalogEntry<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CatalogEntry<T> {}

impl<T> fmt::Debug for CatalogEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry").field("key", &self.key).finish()
    }
}

/// Point-in-time view of a registry, for manifests and logs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegistrySnapshot {
    pub keys: Vec<&'static str>,
    pub cursor: usize,
    pub shuffled: bool,
    pub order_fingerprint: u64,
}

#[derive(Debug)]
pub struct Registry<T> {
    entries: Vec<CatalogEntry<T>>,
    cursor: usize,
    shuffled: bool,
}

impl<T> Registry<T> {
    /// Copies `catalog`. When `shuffle` is set and a generator is supplied the
    /// copy is permuted once; without a generator the declared order is kept.
    pub fn new(
        catalog: &[CatalogEntry<T>],
        generator: Option<&mut Xor128>,
        shuffle: bool,
    ) -> Result<Self, RegistryError> {
        if catalog.is_empty() {
            return Err(RegistryError::EmptyCatalog);
        }

        let mut entries = catalog.to_vec();
        let shuffled = match generator {
            Some(rng) if shuffle => {
                rng.shuffle_in_place(&mut entries);
                true
            }
            _ => false,
        };

        Ok(Self {
            entries,
            cursor: 0,
            shuffled,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn current_key(&self) -> &'static str {
        self.entries[self.cursor].key
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.key).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    /// Build the entry under the cursor, then step forward with wraparound.
    pub fn create_next(&mut self) -> T {
        let built = (self.entries[self.cursor].build)();
        self.cursor = (self.cursor + 1) % self.entries.len();
        built
    }

    /// Build the entry under the cursor, then step back with wraparound.
    pub fn create_previous(&mut self) -> T {
        let built = (self.entries[self.cursor].build)();
        self.cursor = if self.cursor == 0 {
            self.entries.len() - 1
        } else {
            self.cursor - 1
        };
        built
    }

    /// Lookup by key. Never moves the cursor.
    pub fn create_by_key(&self, key: &str) -> Result<T, RegistryError> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| (entry.build)())
            .ok_or_else(|| RegistryError::UnknownKey {
                key: key.to_string(),
            })
    }

    /// FNV-1a over the current key order; equal fingerprints mean equal order.
    pub fn order_fingerprint(&self) -> u64 {
        let mut hash = 0xCBF2_9CE4_8422_2325u64;
        for entry in &self.entries {
            for byte in entry.key.bytes().chain(core::iter::once(0)) {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(0x0000_0100_0000_01B3);
            }
        }
        hash
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            keys: self.keys(),
            cursor: self.cursor,
            shuffled: self.shuffled,
            order_fingerprint: self.order_fingerprint(),
        }
    }
}
