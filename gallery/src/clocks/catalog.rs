use super::faces::{self, face};
use super::scrambled::{OnlyOneRightClock, ShuffledClock, Xor128Clock};
use super::{Clock, ClockManifestEntry};
use clock_core::{CatalogEntry, Registry, RegistryError, Xor128};

pub type ClockRegistry = Registry<Box<dyn Clock>>;

fn boxed<C: Clock + Default + 'static>() -> Box<dyn Clock> {
    Box::new(C::default())
}

// Declared order; a registry may shuffle its own copy.
pub static CATALOG: [CatalogEntry<Box<dyn Clock>>; 21] = [
    CatalogEntry::new("angle", || face(&faces::ANGLE)),
    CatalogEntry::new("bar", || face(&faces::BAR)),
    CatalogEntry::new("binary", || face(&faces::BINARY)),
    CatalogEntry::new("circle", || face(&faces::CIRCLE)),
    CatalogEntry::new("frequency-sine", || face(&faces::FREQUENCY_SINE)),
    CatalogEntry::new("gear", || face(&faces::GEAR)),
    CatalogEntry::new("lines-binary", || face(&faces::LINES_BINARY)),
    CatalogEntry::new("lines", || face(&faces::LINES)),
    CatalogEntry::new("modulated-sine", || face(&faces::MODULATED_SINE)),
    CatalogEntry::new("multiple-circles", || face(&faces::MULTIPLE_CIRCLES)),
    CatalogEntry::new("only-one-right", boxed::<OnlyOneRightClock>),
    CatalogEntry::new("polygon", || face(&faces::POLYGON)),
    CatalogEntry::new("shuffled", boxed::<ShuffledClock>),
    CatalogEntry::new("sine", || face(&faces::SINE)),
    CatalogEntry::new("small-circles", || face(&faces::SMALL_CIRCLES)),
    CatalogEntry::new("small-lines", || face(&faces::SMALL_LINES)),
    CatalogEntry::new("small-squares", || face(&faces::SMALL_SQUARES)),
    CatalogEntry::new("star", || face(&faces::STAR)),
    CatalogEntry::new("squares", || face(&faces::SQUARES)),
    CatalogEntry::new("triangle", || face(&faces::TRIANGLE)),
    CatalogEntry::new("xor128", boxed::<Xor128Clock>),
];

const RANDOMIZED: [&str; 3] = ["only-one-right", "shuffled", "xor128"];

pub fn clock_registry(
    generator: Option<&mut Xor128>,
    shuffle: bool,
) -> Result<ClockRegistry, RegistryError> {
    Registry::new(&CATALOG, generator, shuffle)
}

pub fn clock_ids() -> Vec<&'static str> {
    CATALOG.iter().map(|entry| entry.key).collect()
}

/// `(id, title, description)` in declared order.
pub fn describe_clocks() -> Vec<(&'static str, &'static str, &'static str)> {
    CATALOG
        .iter()
        .map(|entry| {
            let clock = (entry.build)();
            (entry.key, clock.title(), clock.description())
        })
        .collect()
}

pub fn create_clock(id: &str) -> Option<Box<dyn Clock>> {
    CATALOG
        .iter()
        .find(|entry| entry.key == id)
        .map(|entry| (entry.build)())
}

/// Manifest rows in the registry's current order.
pub fn clock_manifest_entries(registry: &ClockRegistry) -> Vec<ClockManifestEntry> {
    registry
        .keys()
        .into_iter()
        .enumerate()
        .filter_map(|(position, key)| {
            let clock = registry.create_by_key(key).ok()?;
            Some(ClockManifestEntry {
                id: key.to_string(),
                title: clock.title().to_string(),
                description: clock.description().to_string(),
                position,
                randomized: RANDOMIZED.contains(&key),
            })
        })
        .collect()
}
