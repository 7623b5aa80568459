//! Shuffle uniformity audit: how often each element lands at each position.

use crate::util::seed_to_hex;
use anyhow::{anyhow, Context, Result};
use clock_core::Xor128;
use rayon::prelude::*;
use serde::Serialize;

/// Largest permutation length `audit_seeds` accepts; the count table is `len * len`.
pub const MAX_AUDIT_LEN: usize = 1_024;

#[derive(Clone, Debug)]
pub struct AuditConfig {
    pub seeds: Vec<u64>,
    pub len: usize,
    pub shuffles: u32,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SeedAudit {
    pub seed: u64,
    pub seed_hex: String,
    pub chi_square: f64,
    pub degrees_of_freedom: usize,
    pub max_relative_deviation: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct AuditReport {
    pub len: usize,
    pub shuffles: u32,
    pub jobs: Option<usize>,
    pub worst_chi_square: f64,
    pub worst_relative_deviation: f64,
    pub seeds: Vec<SeedAudit>,
}

/// `counts[element][position]` over `shuffles` independent shuffles of `0..len`.
pub fn position_counts(seed: u64, len: usize, shuffles: u32) -> Vec<Vec<u64>> {
    let mut rng = Xor128::new(seed);
    let mut counts = vec![vec![0u64; len]; len];
    let mut items: Vec<usize> = (0..len).collect();
    for _ in 0..shuffles {
        for (i, item) in items.iter_mut().enumerate() {
            *item = i;
        }
        rng.shuffle_in_place(&mut items);
        for (position, &element) in items.iter().enumerate() {
            counts[element][position] += 1;
        }
    }
    counts
}

fn expected_per_cell(counts: &[Vec<u64>]) -> f64 {
    let total: u64 = counts.first().map(|row| row.iter().sum()).unwrap_or(0);
    total as f64 / counts.len().max(1) as f64
}

pub fn chi_square(counts: &[Vec<u64>]) -> f64 {
    let expected = expected_per_cell(counts);
    if expected == 0.0 {
        return 0.0;
    }
    counts
        .iter()
        .flatten()
        .map(|&observed| (observed as f64 - expected).powi(2) / expected)
        .sum()
}

pub fn max_relative_deviation(counts: &[Vec<u64>]) -> f64 {
    let expected = expected_per_cell(counts);
    if expected == 0.0 {
        return 0.0;
    }
    counts
        .iter()
        .flatten()
        .map(|&observed| (observed as f64 - expected).abs() / expected)
        .fold(0.0, f64::max)
}

fn audit_one(seed: u64, len: usize, shuffles: u32) -> SeedAudit {
    let counts = position_counts(seed, len, shuffles);
    SeedAudit {
        seed,
        seed_hex: seed_to_hex(seed),
        chi_square: chi_square(&counts),
        degrees_of_freedom: (len - 1) * (len - 1),
        max_relative_deviation: max_relative_deviation(&counts),
    }
}

pub fn audit_seeds(config: &AuditConfig) -> Result<AuditReport> {
    if config.len < 2 {
        return Err(anyhow!("len must be >= 2"));
    }
    if config.len > MAX_AUDIT_LEN {
        return Err(anyhow!("len must be <= {MAX_AUDIT_LEN}"));
    }
    if config.shuffles == 0 {
        return Err(anyhow!("shuffles must be > 0"));
    }
    if config.seeds.is_empty() {
        return Err(anyhow!("no seeds to audit"));
    }

    let run_one = |seed: &u64| audit_one(*seed, config.len, config.shuffles);
    let seeds: Vec<SeedAudit> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| config.seeds.par_iter().map(run_one).collect())
    } else {
        config.seeds.par_iter().map(run_one).collect()
    };

    let worst_chi_square = seeds.iter().map(|s| s.chi_square).fold(0.0, f64::max);
    let worst_relative_deviation = seeds
        .iter()
        .map(|s| s.max_relative_deviation)
        .fold(0.0, f64::max);

    tracing::info!(
        "shuffle audit: seeds={} len={} shuffles={} worst_chi_square={:.2} worst_deviation={:.4}",
        seeds.len(),
        config.len,
        config.shuffles,
        worst_chi_square,
        worst_relative_deviation
    );

    Ok(AuditReport {
        len: config.len,
        shuffles: config.shuffles,
        jobs: config.jobs,
        worst_chi_square,
        worst_relative_deviation,
        seeds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_shuffles() {
        let counts = position_counts(1, 4, 1_000);
        for row in &counts {
            assert_eq!(row.iter().sum::<u64>(), 1_000);
        }
        for position in 0..4 {
            assert_eq!(counts.iter().map(|row| row[position]).sum::<u64>(), 1_000);
        }
    }

    #[test]
    fn test_chi_square_of_perfect_table_is_zero() {
        let counts = vec![vec![5u64; 3]; 3];
        assert_eq!(chi_square(&counts), 0.0);
        assert_eq!(max_relative_deviation(&counts), 0.0);
    }

    #[test]
    fn test_identity_table_is_far_from_uniform() {
        let counts = vec![vec![9, 0, 0], vec![0, 9, 0], vec![0, 0, 9]];
        assert!((max_relative_deviation(&counts) - 2.0).abs() < 1e-12);
        assert!((chi_square(&counts) - 54.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_audit_matches_serial() {
        let config = AuditConfig {
            seeds: vec![1, 2, 3],
            len: 5,
            shuffles: 2_000,
            jobs: Some(2),
        };
        let report = audit_seeds(&config).expect("audit");
        assert_eq!(report.seeds.len(), 3);
        for (audit, seed) in report.seeds.iter().zip([1u64, 2, 3]) {
            assert_eq!(audit.seed, seed);
            let serial = position_counts(seed, 5, 2_000);
            assert_eq!(audit.chi_square, chi_square(&serial));
            assert_eq!(audit.degrees_of_freedom, 16);
        }
    }

    #[test]
    fn test_audit_rejects_degenerate_input() {
        let config = AuditConfig {
            seeds: vec![1],
            len: 1,
            shuffles: 10,
            jobs: None,
        };
        assert!(audit_seeds(&config).is_err());
    }

    #[test]
    fn test_audit_rejects_oversized_len() {
        let config = AuditConfig {
            seeds: vec![1],
            len: 100_000,
            shuffles: 10,
            jobs: None,
        };
        let err = audit_seeds(&config).expect_err("oversized len");
        assert!(err.to_string().contains("len must be <="));

        let at_ceiling = AuditConfig {
            len: MAX_AUDIT_LEN,
            shuffles: 1,
            ..config
        };
        assert_eq!(audit_seeds(&at_ceiling).expect("audit").len, MAX_AUDIT_LEN);
    }
}
