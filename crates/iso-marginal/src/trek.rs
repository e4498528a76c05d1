use std::cmp::Ordering;
use std::collections::BinaryHeap;

use iso_core::{moves, Distribution, Summator};
use tracing::{debug, trace};

use crate::arena::{ConfArena, ConfId};
use crate::config::SearchConfig;
use crate::keying::VisitedSet;
use crate::table::{MarginalTable, ResultTable};

/// Frontier entry: higher log-probability first, earlier allocation first on ties.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    lprob: f64,
    id: ConfId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lprob
            .total_cmp(&other.lprob)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Emits configurations one at a time in non-increasing probability order.
///
/// Every configuration other than the mode has a strictly more probable
/// neighbor, so by the time a configuration is popped all better ones have
/// already been emitted and offered it to the frontier.
#[derive(Debug)]
pub struct LazyTopKSearch {
    distribution: Distribution,
    arena: ConfArena,
    visited: VisitedSet,
    frontier: BinaryHeap<FrontierEntry>,
    table: ResultTable,
    scratch: Vec<u32>,
}

impl LazyTopKSearch {
    /// Starts a search with default storage sizing.
    pub fn new(distribution: Distribution) -> Self {
        Self::with_config(distribution, &SearchConfig::default())
    }

    /// Starts a search; only the mode is on the frontier and nothing is
    /// emitted yet.
    pub fn with_config(distribution: Distribution, config: &SearchConfig) -> Self {
        let dim = distribution.isotope_count();
        let mut arena = ConfArena::new(dim, config.arena_page_confs);
        let mut visited = VisitedSet::with_capacity(config.visited_capacity);

        let mode = arena.alloc(distribution.mode_conf());
        visited.insert(&arena, mode);
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            lprob: distribution.mode_lprob(),
            id: mode,
        });

        Self {
            distribution,
            arena,
            visited,
            frontier,
            table: ResultTable::new(),
            scratch: vec![0; dim],
        }
    }

    /// Emits the next most probable configuration.
    ///
    /// Returns `false` once the whole configuration space has been emitted.
    pub fn advance(&mut self) -> bool {
        let Some(top) = self.frontier.pop() else {
            debug!(emitted = self.table.len(), "configuration space exhausted");
            return false;
        };

        self.scratch.copy_from_slice(self.arena.get(top.id));
        let mass = self.distribution.conf_mass(&self.scratch);
        self.table.push(top.id, top.lprob, mass);
        trace!(
            index = self.table.len() - 1,
            lprob = top.lprob,
            mass,
            "configuration emitted"
        );

        for mv in moves(self.scratch.len()) {
            if !mv.try_apply(&mut self.scratch) {
                continue;
            }
            if !self.visited.contains(&self.arena, &self.scratch) {
                let lprob = self.distribution.log_prob(&self.scratch);
                let id = self.arena.alloc(&self.scratch);
                self.visited.insert(&self.arena, id);
                self.frontier.push(FrontierEntry { lprob, id });
            }
            mv.revert(&mut self.scratch);
        }
        true
    }

    /// Makes sure the `idx`-th most probable configuration is materialized.
    ///
    /// Returns `false` if the space holds at most `idx` configurations.
    pub fn probe_index(&mut self, idx: usize) -> bool {
        while self.table.len() <= idx {
            if !self.advance() {
                return false;
            }
        }
        true
    }

    /// Returns the length of the shortest prefix whose probabilities sum to at
    /// least `target`, emitting more configurations if needed.
    ///
    /// When the space runs out first, the full emitted count is returned and
    /// [`MarginalTable::total_probability`] stays below `target`.
    pub fn process_until_cutoff(&mut self, target: f64) -> usize {
        let mut prefix = Summator::new();
        for (idx, &prob) in self.table.probs().iter().enumerate() {
            prefix.add(prob);
            if prefix.get() >= target {
                return idx + 1;
            }
        }

        while self.table.total_probability() < target && self.advance() {}
        self.table.len()
    }

    /// Number of discovered configurations still waiting on the frontier.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}

impl MarginalTable for LazyTopKSearch {
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
