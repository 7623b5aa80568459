use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use clock_core::Xor128;
use clock_gallery::clocks::{clock_ids, clock_manifest_entries, clock_registry, create_clock};
use clock_gallery::config::{Direction, GalleryConfig};
use clock_gallery::runner::{build_manifest, run_gallery};
use clock_gallery::stats::{audit_seeds, AuditConfig};
use clock_gallery::time::ClockTime;
use clock_gallery::util::{
    parse_seed, parse_seed_csv, parse_seed_file, seed_to_hex, time_seed, write_json,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "clock-gallery")]
#[command(about = "Gallery of deliberately unreadable clocks, cycled by a seeded registry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List clocks in registry order
    ListClocks {
        #[arg(long)]
        seed: Option<String>,
        /// Shuffle the catalog with the seeded generator (default: GALLERY_SHUFFLE or true)
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        shuffle: Option<bool>,
    },
    /// Export the catalog manifest (order, fingerprint, titles) as JSON
    Manifest {
        #[arg(long)]
        seed: Option<String>,
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        shuffle: Option<bool>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a single clock readout
    Show {
        #[arg(long)]
        clock: String,
        /// Milliseconds since the Unix epoch (default: now)
        #[arg(long)]
        at_ms: Option<u64>,
        /// Seed for randomized clocks
        #[arg(long)]
        seed: Option<String>,
    },
    /// Run the gallery loop: cycle through clocks over simulated frames
    Cycle {
        #[arg(long)]
        seed: Option<String>,
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        shuffle: Option<bool>,
        #[arg(long)]
        frames: Option<u32>,
        #[arg(long)]
        frames_per_clock: Option<u32>,
        #[arg(long)]
        frame_ms: Option<u64>,
        #[arg(long)]
        start_ms: Option<u64>,
        /// Walk the catalog backwards (default: GALLERY_REVERSE or false)
        #[arg(long, default_value_t = false)]
        reverse: bool,
        /// Write the full run summary as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check shuffle uniformity across seeds
    Audit {
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_file: Option<PathBuf>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 8)]
        seed_count: u32,
        #[arg(long, default_value_t = 10)]
        len: usize,
        #[arg(long, default_value_t = 100_000)]
        shuffles: u32,
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let Cli { command } = Cli::parse();
    let env_config = GalleryConfig::from_env();

    match command {
        Commands::ListClocks { seed, shuffle } => {
            let seed = resolve_seed(seed.as_deref(), env_config.seed)?;
            let mut generator = seed.map(Xor128::new);
            let registry =
                clock_registry(generator.as_mut(), shuffle.unwrap_or(env_config.shuffle))?;
            if let Some(seed) = seed {
                println!("seed={}", seed_to_hex(seed));
            }
            for entry in clock_manifest_entries(&registry) {
                println!("{:2} {:18} {}", entry.position, entry.id, entry.title);
            }
        }
        Commands::Manifest {
            seed,
            shuffle,
            output,
        } => {
            let seed = resolve_seed(seed.as_deref(), env_config.seed)?;
            let manifest = build_manifest(seed, shuffle.unwrap_or(env_config.shuffle))?;
            if let Some(path) = output {
                write_json(&path, &manifest)?;
                println!("wrote={}", path.display());
                println!("clocks={}", manifest.clocks.len());
                println!(
                    "order_fingerprint={:#018x}",
                    manifest.registry.order_fingerprint
                );
            } else {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            }
        }
        Commands::Show { clock, at_ms, seed } => {
            let mut instance = create_clock(&clock).ok_or_else(|| {
                let available = clock_ids().join(", ");
                anyhow!("unknown clock '{clock}'. available: {available}")
            })?;
            let seed = resolve_seed(seed.as_deref(), env_config.seed)?
                .unwrap_or_else(time_seed);
            instance.reset(Xor128::new(seed));

            let time = at_ms
                .map(ClockTime::from_epoch_ms)
                .unwrap_or_else(ClockTime::now);
            println!("clock={}", instance.id());
            println!("title={}", instance.title());
            println!("time={}", time.iso_stamp());
            println!("{}", instance.readout(&time));
        }
        Commands::Cycle {
            seed,
            shuffle,
            frames,
            frames_per_clock,
            frame_ms,
            start_ms,
            reverse,
            output,
        } => {
            let config = GalleryConfig {
                seed: resolve_seed(seed.as_deref(), env_config.seed)?,
                shuffle: shuffle.unwrap_or(env_config.shuffle),
                frames: frames.unwrap_or(env_config.frames),
                frame_ms: frame_ms.unwrap_or(env_config.frame_ms),
                frames_per_clock: frames_per_clock.unwrap_or(env_config.frames_per_clock),
                start_ms: start_ms.or(env_config.start_ms),
                direction: if reverse {
                    Direction::Backward
                } else {
                    env_config.direction
                },
            };
            let summary = run_gallery(&config)?;

            println!("seed={}", summary.seed_hex);
            println!("order_fingerprint={:#018x}", summary.registry.order_fingerprint);
            let mut current = "";
            for frame in &summary.frames {
                if frame.clock_id != current {
                    current = frame.clock_id;
                    println!("--- {current}");
                }
                println!("[{}] {}", frame.frame, frame.readout.replace('\n', " / "));
            }

            if let Some(path) = output {
                write_json(&path, &summary)?;
                println!("output={}", path.display());
            }
        }
        Commands::Audit {
            seeds,
            seed_file,
            seed_start,
            seed_count,
            len,
            shuffles,
            jobs,
            output,
        } => {
            let seeds = resolve_seeds(
                seeds.as_deref(),
                seed_file.as_deref(),
                seed_start.as_deref(),
                seed_count,
            )?;
            let report = audit_seeds(&AuditConfig {
                seeds,
                len,
                shuffles,
                jobs,
            })?;

            println!("len={} shuffles={}", report.len, report.shuffles);
            println!(
                "jobs={}",
                report
                    .jobs
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            for audit in &report.seeds {
                println!(
                    "  {} chi_square={:.2} (df={}) max_deviation={:.2}%",
                    audit.seed_hex,
                    audit.chi_square,
                    audit.degrees_of_freedom,
                    audit.max_relative_deviation * 100.0
                );
            }
            println!("worst_chi_square={:.2}", report.worst_chi_square);

            if let Some(path) = output {
                write_json(&path, &report)?;
                println!("output={}", path.display());
            }
        }
    }

    Ok(())
}

fn resolve_seed(cli: Option<&str>, env_seed: Option<u64>) -> Result<Option<u64>> {
    match cli {
        Some(raw) => parse_seed(raw).map(Some),
        None => Ok(env_seed),
    }
}

fn resolve_seeds(
    seeds: Option<&str>,
    seed_file: Option<&Path>,
    seed_start: Option<&str>,
    seed_count: u32,
) -> Result<Vec<u64>> {
    if let Some(path) = seed_file {
        return parse_seed_file(path);
    }

    if let Some(csv) = seeds {
        return parse_seed_csv(csv);
    }

    let start = if let Some(start) = seed_start {
        parse_seed(start)?
    } else {
        0xC10C_0001
    };

    let mut out = Vec::with_capacity(seed_count as usize);
    let mut cur = start;
    for _ in 0..seed_count {
        out.push(cur);
        cur = cur
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
    }
    Ok(out)
}
