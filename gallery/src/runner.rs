use crate::clocks::{clock_manifest_entries, clock_registry, Clock, ClockManifestEntry, ClockRegistry};
use crate::config::{Direction, GalleryConfig};
use crate::time::ClockTime;
use crate::util::{seed_to_hex, time_seed};
use anyhow::{anyhow, Result};
use clock_core::registry::RegistrySnapshot;
use clock_core::Xor128;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct FrameRecord {
    pub frame: u32,
    pub epoch_ms: u64,
    pub clock_id: &'static str,
    pub readout: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub seed_hex: String,
    pub direction: Direction,
    pub registry: RegistrySnapshot,
    pub activations: u32,
    pub final_cursor: usize,
    pub frames: Vec<FrameRecord>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GalleryManifest {
    pub seed: Option<String>,
    pub registry: RegistrySnapshot,
    pub clocks: Vec<ClockManifestEntry>,
}

/// Builds the registry the way a run would, without activating anything.
pub fn build_manifest(seed: Option<u64>, shuffle: bool) -> Result<GalleryManifest> {
    let mut generator = seed.map(Xor128::new);
    let registry = clock_registry(generator.as_mut(), shuffle)
        .map_err(|err| anyhow!("failed to build clock registry: {err}"))?;
    Ok(GalleryManifest {
        seed: seed.map(seed_to_hex),
        registry: registry.snapshot(),
        clocks: clock_manifest_entries(&registry),
    })
}

pub fn run_gallery(config: &GalleryConfig) -> Result<RunSummary> {
    if config.frames == 0 {
        return Err(anyhow!("frames must be > 0"));
    }
    if config.frames_per_clock == 0 {
        return Err(anyhow!("frames_per_clock must be > 0"));
    }

    let seed = config.seed.unwrap_or_else(time_seed);
    let mut generator = Xor128::new(seed);
    let mut registry = clock_registry(Some(&mut generator), config.shuffle)
        .map_err(|err| anyhow!("failed to build clock registry: {err}"))?;
    let order = registry.snapshot();

    tracing::info!(
        "starting gallery: seed={} shuffle={} clocks={} frames={} frames_per_clock={} direction={:?} order_fingerprint={:#018x}",
        seed_to_hex(seed),
        order.shuffled,
        order.keys.len(),
        config.frames,
        config.frames_per_clock,
        config.direction,
        order.order_fingerprint
    );

    let start_ms = config
        .start_ms
        .unwrap_or_else(|| ClockTime::now().epoch_ms);
    let mut clock = activate(&mut registry, &mut generator, config.direction);
    let mut activations = 1u32;
    let mut frames = Vec::with_capacity(config.frames as usize);

    for frame in 0..config.frames {
        if frame > 0 && frame % config.frames_per_clock == 0 {
            clock = activate(&mut registry, &mut generator, config.direction);
            activations += 1;
        }

        let epoch_ms = start_ms.saturating_add((frame as u64).saturating_mul(config.frame_ms));
        let time = ClockTime::from_epoch_ms(epoch_ms);
        let readout = clock.readout(&time);
        tracing::debug!("frame={} clock={} epoch_ms={}", frame, clock.id(), epoch_ms);

        frames.push(FrameRecord {
            frame,
            epoch_ms,
            clock_id: clock.id(),
            readout,
        });
    }

    tracing::info!(
        "gallery finished: frames={} activations={} cursor={}",
        frames.len(),
        activations,
        registry.cursor()
    );

    Ok(RunSummary {
        seed,
        seed_hex: seed_to_hex(seed),
        direction: config.direction,
        registry: order,
        activations,
        final_cursor: registry.cursor(),
        frames,
    })
}

/// Pull the next clock in `direction` and hand it a generator forked from the session one.
fn activate(
    registry: &mut ClockRegistry,
    generator: &mut Xor128,
    direction: Direction,
) -> Box<dyn Clock> {
    let mut clock = match direction {
        Direction::Forward => registry.create_next(),
        Direction::Backward => registry.create_previous(),
    };
    clock.reset(generator.fork());
    tracing::info!("activated clock={} title={:?}", clock.id(), clock.title());
    clock
}
