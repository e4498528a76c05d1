use iso_core::Distribution;
use iso_marginal::{
    canonical_hash, ConfArena, CutoffSearch, LayeredSearch, LazyTopKSearch, MarginalSnapshot,
    MarginalTable, ResultTable,
};

struct Hand {
    distribution: Distribution,
    arena: ConfArena,
    table: ResultTable,
}

impl MarginalTable for Hand {
    fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    fn arena(&self) -> &ConfArena {
        &self.arena
    }

    fn table(&self) -> &ResultTable {
        &self.table
    }
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn strategies_are_send_and_sync() {
    assert_send_sync::<Distribution>();
    assert_send_sync::<LazyTopKSearch>();
    assert_send_sync::<CutoffSearch>();
    assert_send_sync::<LayeredSearch>();
}

#[test]
fn hand_built_tables_get_the_default_accessors() {
    let distribution = Distribution::new(&[1.0, 2.0], &[0.75, 0.25], 1).unwrap();
    let mut arena = ConfArena::new(2, 8);
    let mut table = ResultTable::new();
    for conf in [[1u32, 0], [0, 1]] {
        let lprob = distribution.log_prob(&conf);
        let mass = distribution.conf_mass(&conf);
        let id = arena.alloc(&conf);
        table.push(id, lprob, mass);
    }
    let hand = Hand {
        distribution,
        arena,
        table,
    };

    assert_eq!(hand.len(), 2);
    assert_eq!(hand.conf(1), &[0, 1]);
    assert!((hand.prob(0) - 0.75).abs() < 1e-12);
    assert_eq!(hand.mass(1), 2.0);
    assert!((hand.total_probability() - 1.0).abs() < 1e-12);
    assert_eq!(hand.mode_lprob(), hand.lprob(0));

    let cutoff = CutoffSearch::new(hand.distribution.clone(), f64::NEG_INFINITY);
    assert_eq!(canonical_hash(&hand), canonical_hash(&cutoff));
    assert_eq!(MarginalSnapshot::capture(&hand).entries.len(), 2);
}
