use iso_core::{is_uphill, moves, Distribution};
use tracing::debug;

use crate::arena::{ConfArena, ConfId};
use crate::config::SearchConfig;
use crate::keying::VisitedSet;
use crate::table::{MarginalTable, ResultTable};

/// Resumable cutoff search: each [`LayeredSearch::extend`] lowers the
/// threshold and materializes only the new layer.
///
/// Configurations seen below the current threshold are parked on the fringe
/// and picked up by later calls instead of restarting from the mode. Within
/// a layer a configuration is only claimed by a neighbor it is downhill of
/// under [`is_uphill`], which together with the per-call visited set keeps
/// every configuration to a single row.
#[derive(Debug)]
pub struct LayeredSearch {
    distribution: Distribution,
    arena: ConfArena,
    current_threshold: f64,
    fringe: Vec<(ConfId, f64)>,
    table: ResultTable,
    visited_capacity: usize,
    sort: bool,
}

impl LayeredSearch {
    /// Creates a search with nothing materialized and the mode on the fringe.
    pub fn new(distribution: Distribution) -> Self {
        Self::with_config(distribution, &SearchConfig::default())
    }

    /// Like [`LayeredSearch::new`], sizing storage from `config`; `config.sort`
    /// becomes the ordering used by [`LayeredSearch::extend`].
    pub fn with_config(distribution: Distribution, config: &SearchConfig) -> Self {
        let mut arena = ConfArena::new(distribution.isotope_count(), config.arena_page_confs);
        let mode = arena.alloc(distribution.mode_conf());
        let fringe = vec![(mode, distribution.mode_lprob())];
        Self {
            distribution,
            arena,
            current_threshold: f64::INFINITY,
            fringe,
            table: ResultTable::new(),
            visited_capacity: config.visited_capacity,
            sort: config.sort,
        }
    }

    /// Materializes every configuration with `log_prob >= new_threshold`.
    ///
    /// Returns `false` when the fringe is empty, meaning no threshold can
    /// add anything anymore.
    pub fn extend(&mut self, new_threshold: f64) -> bool {
        self.extend_with(new_threshold, self.sort)
    }

    /// [`LayeredSearch::extend`] with explicit control over sorting the new
    /// layer by descending probability.
    pub fn extend_with(&mut self, new_threshold: f64, sort: bool) -> bool {
        if self.fringe.is_empty() {
            debug!(
                threshold = new_threshold,
                configurations = self.table.len(),
                "layered marginal exhausted"
            );
            return false;
        }

        let dim = self.distribution.isotope_count();
        let mut visited = VisitedSet::with_capacity(self.visited_capacity.max(self.fringe.len()));
        for &(id, _) in &self.fringe {
            visited.insert(&self.arena, id);
        }

        let mut new_fringe: Vec<(ConfId, f64)> = Vec::new();
        let mut layer: Vec<(ConfId, f64)> = Vec::new();
        let mut current = vec![0u32; dim];

        while let Some((id, opc)) = self.fringe.pop() {
            if opc < new_threshold {
                new_fringe.push((id, opc));
                continue;
            }
            layer.push((id, opc));
            current.copy_from_slice(self.arena.get(id));
            for mv in moves(dim) {
                if !mv.try_apply(&mut current) {
                    continue;
                }
                let lpc = self.distribution.log_prob(&current);
                if lpc < self.current_threshold
                    && is_uphill(lpc, opc, mv.reversed())
                    && !visited.contains(&self.arena, &current)
                {
                    let neighbor = self.arena.alloc(&current);
                    visited.insert(&self.arena, neighbor);
                    if lpc >= new_threshold {
                        self.fringe.push((neighbor, lpc));
                    } else {
                        new_fringe.push((neighbor, lpc));
                    }
                }
                mv.revert(&mut current);
            }
        }

        self.current_threshold = new_threshold;
        self.fringe = new_fringe;

        if sort {
            layer.sort_by(|a, b| b.1.total_cmp(&a.1));
        }
        self.table.reserve(layer.len());
        let added = layer.len();
        for (id, lprob) in layer {
            let mass = self.distribution.conf_mass(self.arena.get(id));
            self.table.push(id, lprob, mass);
        }

        debug!(
            threshold = new_threshold,
            added,
            configurations = self.table.len(),
            fringe = self.fringe.len(),
            "layered marginal extended"
        );
        true
    }

    /// Log-probability at a logical index in `-1..=len`; `-1` reads `+∞` and
    /// `len` reads `-∞`.
    pub fn guarded_lprob(&self, idx: isize) -> f64 {
        self.table.guarded_lprob(idx)
    }

    /// Smallest mass among materialized configurations, `+∞` when none.
    pub fn min_mass(&self) -> f64 {
        self.table.min_mass()
    }

    /// Largest mass among materialized configurations, `-∞` when none.
    pub fn max_mass(&self) -> f64 {
        self.table.max_mass()
    }

    /// Threshold reached by the last successful extend, `+∞` before the first.
    pub fn current_threshold(&self) -> f64 {
        self.current_threshold
    }

    /// Number of configurations parked below the current threshold.
    pub fn fringe_len(&self) -> usize {
        self.fringe.len()
    }
}

impl MarginalTable for LayeredSearch {
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
