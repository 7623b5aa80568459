use crate::time::ClockTime;
use clock_core::Xor128;
use serde::Serialize;

mod catalog;
mod faces;
mod scrambled;

pub use catalog::{
    clock_ids, clock_manifest_entries, clock_registry, create_clock, describe_clocks,
    ClockRegistry, CATALOG,
};

pub trait Clock {
    fn id(&self) -> &'static str;
    fn title(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Hands the clock its own generator on activation. Deterministic faces ignore it.
    fn reset(&mut self, _rng: Xor128) {}
    fn readout(&mut self, time: &ClockTime) -> String;
}

#[derive(Clone, Debug, Serialize)]
pub struct ClockManifestEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub position: usize,
    pub randomized: bool,
}

/// `width` cells, the first `fraction * width` of them filled.
pub(crate) fn meter(fraction: f64, width: usize, fill: char, empty: char) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat(fill).take(filled));
    out.extend(std::iter::repeat(empty).take(width - filled));
    out
}

/// Glyph for a turn fraction, `glyphs` spread evenly around the circle.
pub(crate) fn turn_glyph(fraction: f64, glyphs: &[char]) -> char {
    let slots = glyphs.len();
    let index = ((fraction.rem_euclid(1.0) * slots as f64).round() as usize) % slots;
    glyphs[index]
}
