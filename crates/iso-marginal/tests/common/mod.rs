#![allow(dead_code)]

use std::collections::BTreeSet;

use iso_core::Distribution;
use iso_marginal::MarginalTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Every vector of `isotopes` non-negative counts summing to `atoms`.
pub fn all_confs(atoms: u32, isotopes: usize) -> Vec<Vec<u32>> {
    let mut out = Vec::new();
    let mut current = vec![0u32; isotopes];
    fill(atoms, 0, &mut current, &mut out);
    out
}

fn fill(remaining: u32, position: usize, current: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
    if position + 1 == current.len() {
        current[position] = remaining;
        out.push(current.clone());
        return;
    }
    for count in 0..=remaining {
        current[position] = count;
        fill(remaining - count, position + 1, current, out);
    }
}

/// Configurations of the whole space at or above `threshold`.
pub fn brute_force_set(dist: &Distribution, threshold: f64) -> BTreeSet<Vec<u32>> {
    all_confs(dist.atom_count(), dist.isotope_count())
        .into_iter()
        .filter(|conf| dist.log_prob(conf) >= threshold)
        .collect()
}

/// Materialized rows of a table as a set, asserting there are no repeats.
pub fn conf_set<T: MarginalTable + ?Sized>(table: &T) -> BTreeSet<Vec<u32>> {
    let set: BTreeSet<Vec<u32>> = (0..table.len()).map(|idx| table.conf(idx).to_vec()).collect();
    assert_eq!(set.len(), table.len(), "configuration materialized twice");
    set
}

pub fn is_non_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] >= pair[1])
}

pub fn binomial(n: u64, k: u64) -> u64 {
    (1..=k).fold(1, |acc, i| acc * (n + 1 - i) / i)
}

pub fn toy() -> Distribution {
    Distribution::new(&[12.0, 13.0], &[0.9, 0.1], 2).unwrap()
}

pub fn carbon(atoms: u32) -> Distribution {
    Distribution::new(&[12.0, 13.003_354_835_07], &[0.9893, 0.0107], atoms).unwrap()
}

pub fn oxygen(atoms: u32) -> Distribution {
    Distribution::new(
        &[15.994_914_619_57, 16.999_131_756_50, 17.999_161_0],
        &[0.99757, 0.00038, 0.00205],
        atoms,
    )
    .unwrap()
}

pub fn sulfur(atoms: u32) -> Distribution {
    Distribution::new(
        &[31.972_071_174_4, 32.971_458_909_8, 33.967_867_004, 35.967_080_71],
        &[0.9499, 0.0075, 0.0425, 0.0001],
        atoms,
    )
    .unwrap()
}

/// Reproducible element with `isotopes` random abundances.
pub fn seeded(seed: u64, isotopes: usize, atoms: u32) -> Distribution {
    let mut rng = StdRng::seed_from_u64(seed);
    let weights: Vec<f64> = (0..isotopes).map(|_| rng.gen_range(0.05..1.0)).collect();
    let total: f64 = weights.iter().sum();
    let probs: Vec<f64> = weights.iter().map(|w| (w / total).min(1.0)).collect();
    let masses: Vec<f64> = (0..isotopes)
        .map(|i| 20.0 + i as f64 + rng.gen_range(-0.01..0.01))
        .collect();
    Distribution::new(&masses, &probs, atoms).unwrap()
}
