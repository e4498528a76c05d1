mod common;

use common::{binomial, conf_set, is_non_increasing, oxygen, sulfur, toy};
use iso_marginal::{LazyTopKSearch, MarginalTable};

#[test]
fn toy_emits_in_probability_order() {
    let mut search = LazyTopKSearch::new(toy());
    assert!(search.is_empty());
    assert_eq!(search.frontier_len(), 1);

    while search.advance() {}
    assert_eq!(search.len(), 3);
    assert_eq!(search.conf(0), &[2, 0]);
    assert_eq!(search.conf(1), &[1, 1]);
    assert_eq!(search.conf(2), &[0, 2]);
    assert!((search.prob(0) - 0.81).abs() < 1e-12);
    assert!((search.prob(1) - 0.18).abs() < 1e-12);
    assert!((search.prob(2) - 0.01).abs() < 1e-12);
    assert_eq!(search.mass(0), 24.0);
    assert_eq!(search.mass(1), 25.0);
    assert_eq!(search.mass(2), 26.0);
    assert!(!search.advance());
    assert_eq!(search.frontier_len(), 0);
}

#[test]
fn exhausts_the_whole_space_exactly_once() {
    for (dist, isotopes) in [(oxygen(12), 3u64), (sulfur(7), 4)] {
        let atoms = u64::from(dist.atom_count());
        let mut search = LazyTopKSearch::new(dist);
        while search.advance() {}
        assert_eq!(search.len() as u64, binomial(atoms + isotopes - 1, isotopes - 1));
        assert_eq!(conf_set(&search).len(), search.len());
        assert!(is_non_increasing(search.table().lprobs()));
        assert!((search.total_probability() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn first_row_is_the_mode() {
    let dist = sulfur(40);
    let mode = dist.mode_conf().to_vec();
    let mode_lprob = dist.mode_lprob();
    let mut search = LazyTopKSearch::new(dist);
    assert!(search.advance());
    assert_eq!(search.conf(0), mode.as_slice());
    assert_eq!(search.lprob(0), mode_lprob);
    assert_eq!(search.mode_lprob(), mode_lprob);
}

#[test]
fn probe_index_materializes_on_demand() {
    let mut search = LazyTopKSearch::new(toy());
    assert!(search.probe_index(1));
    assert_eq!(search.len(), 2);
    assert!(search.probe_index(0));
    assert_eq!(search.len(), 2);
    assert!(search.probe_index(2));
    assert!(!search.probe_index(3));
    assert_eq!(search.len(), 3);
}

#[test]
fn process_until_cutoff_returns_the_covering_prefix() {
    let mut search = LazyTopKSearch::new(toy());
    assert_eq!(search.process_until_cutoff(0.9), 2);
    assert_eq!(search.len(), 2);
    assert_eq!(search.process_until_cutoff(0.5), 1);
    assert_eq!(search.len(), 2);
    assert_eq!(search.process_until_cutoff(2.0), 3);
    assert!(search.total_probability() < 2.0);
}

#[test]
fn cumulative_target_on_a_large_element() {
    let mut search = LazyTopKSearch::new(oxygen(300));
    let prefix = search.process_until_cutoff(0.9999);
    let covered: f64 = search.table().probs()[..prefix].iter().sum();
    assert!(covered >= 0.9999);
    let short: f64 = search.table().probs()[..prefix - 1].iter().sum();
    assert!(short < 0.9999);
    assert!(is_non_increasing(search.table().lprobs()));
}

#[test]
fn guards_surround_emitted_rows() {
    let mut search = LazyTopKSearch::new(toy());
    assert_eq!(search.table().guarded_lprob(-1), f64::INFINITY);
    assert_eq!(search.table().guarded_lprob(0), f64::NEG_INFINITY);
    search.advance();
    assert_eq!(search.table().guarded_lprob(0), search.lprob(0));
    assert_eq!(search.table().guarded_lprob(1), f64::NEG_INFINITY);
    assert_eq!(search.table().guarded_lprobs().len(), 3);
}

#[test]
fn stored_masses_equal_recomputed_masses() {
    let mut search = LazyTopKSearch::new(sulfur(60));
    search.process_until_cutoff(0.999);
    for idx in 0..search.len() {
        let recomputed = search.distribution().conf_mass(search.conf(idx));
        assert_eq!(search.mass(idx).to_bits(), recomputed.to_bits());
    }
}
