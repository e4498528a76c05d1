use iso_core::{moves, Distribution};
use tracing::debug;

use crate::arena::{ConfArena, ConfId};
use crate::config::SearchConfig;
use crate::keying::VisitedSet;
use crate::table::{MarginalTable, ResultTable};

/// Every configuration whose log-probability is at least a fixed cutoff,
/// computed once by flood fill from the mode.
///
/// The set is closed under "has a more probable neighbor", so a fill that
/// never steps below the cutoff still reaches all of it.
#[derive(Debug)]
pub struct CutoffSearch {
    distribution: Distribution,
    arena: ConfArena,
    table: ResultTable,
    lcutoff: f64,
}

impl CutoffSearch {
    /// Collects all configurations with `log_prob >= lcutoff`, sorted by
    /// descending probability.
    pub fn new(distribution: Distribution, lcutoff: f64) -> Self {
        Self::with_config(distribution, lcutoff, &SearchConfig::default())
    }

    /// Collects all configurations with `log_prob >= lcutoff`; sorting follows
    /// `config.sort`.
    pub fn with_config(distribution: Distribution, lcutoff: f64, config: &SearchConfig) -> Self {
        let dim = distribution.isotope_count();
        let mut arena = ConfArena::new(dim, config.arena_page_confs);
        let mut visited = VisitedSet::with_capacity(config.visited_capacity);
        let mut accepted: Vec<(ConfId, f64)> = Vec::new();

        let mode_lprob = distribution.mode_lprob();
        if mode_lprob >= lcutoff {
            let mode = arena.alloc(distribution.mode_conf());
            visited.insert(&arena, mode);
            accepted.push((mode, mode_lprob));
        }

        let mut current = vec![0u32; dim];
        let mut cursor = 0;
        while cursor < accepted.len() {
            current.copy_from_slice(arena.get(accepted[cursor].0));
            cursor += 1;
            for mv in moves(dim) {
                if !mv.try_apply(&mut current) {
                    continue;
                }
                if !visited.contains(&arena, &current) {
                    let lprob = distribution.log_prob(&current);
                    if lprob >= lcutoff {
                        let id = arena.alloc(&current);
                        visited.insert(&arena, id);
                        accepted.push((id, lprob));
                    }
                }
                mv.revert(&mut current);
            }
        }

        if config.sort {
            accepted.sort_by(|a, b| b.1.total_cmp(&a.1));
        }

        let mut table = ResultTable::new();
        table.reserve(accepted.len());
        for (id, lprob) in accepted {
            let mass = distribution.conf_mass(arena.get(id));
            table.push(id, lprob, mass);
        }

        debug!(
            lcutoff,
            configurations = table.len(),
            total_probability = table.total_probability(),
            "cutoff marginal precalculated"
        );

        Self {
            distribution,
            arena,
            table,
            lcutoff,
        }
    }

    /// Returns whether `idx` addresses a precalculated configuration.
    pub fn in_range(&self, idx: usize) -> bool {
        idx < self.table.len()
    }

    /// Log-probability at `idx`, reading `-∞` one past the end.
    pub fn guarded_lprob(&self, idx: isize) -> f64 {
        self.table.guarded_lprob(idx)
    }

    /// The cutoff the table was built with.
    pub fn lcutoff(&self) -> f64 {
        self.lcutoff
    }
}

impl MarginalTable for CutoffSearch {
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
