use iso_core::{Distribution, Summator};

use crate::arena::{ConfArena, ConfId};

/// Index-aligned, append-only result columns shared by every search strategy.
///
/// Log-probabilities are stored with guards: logical index `-1` reads `+∞`
/// and logical index `len` reads `-∞`, so range scans never special-case
/// the ends.
#[derive(Debug, Clone)]
pub struct ResultTable {
    confs: Vec<ConfId>,
    guarded_lprobs: Vec<f64>,
    probs: Vec<f64>,
    masses: Vec<f64>,
    total: Summator,
}

impl Default for ResultTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultTable {
    /// Creates an empty table holding only the two guards.
    pub fn new() -> Self {
        Self {
            confs: Vec::new(),
            guarded_lprobs: vec![f64::INFINITY, f64::NEG_INFINITY],
            probs: Vec::new(),
            masses: Vec::new(),
            total: Summator::new(),
        }
    }

    /// Reserves room for `additional` more rows.
    pub fn reserve(&mut self, additional: usize) {
        self.confs.reserve(additional);
        self.guarded_lprobs.reserve(additional);
        self.probs.reserve(additional);
        self.masses.reserve(additional);
    }

    /// Appends a row and folds its probability into the running total.
    pub fn push(&mut self, id: ConfId, lprob: f64, mass: f64) {
        let tail = self.guarded_lprobs.len() - 1;
        self.guarded_lprobs[tail] = lprob;
        self.guarded_lprobs.push(f64::NEG_INFINITY);

        let prob = lprob.exp();
        self.total.add(prob);
        self.confs.push(id);
        self.probs.push(prob);
        self.masses.push(mass);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.confs.len()
    }

    /// Returns whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.confs.is_empty()
    }

    /// Arena handle of row `idx`.
    pub fn conf_id(&self, idx: usize) -> ConfId {
        self.confs[idx]
    }

    /// Arena handles of all rows.
    pub fn conf_ids(&self) -> &[ConfId] {
        &self.confs
    }

    /// Log-probability of row `idx`.
    #[inline]
    pub fn lprob(&self, idx: usize) -> f64 {
        self.guarded_lprobs[idx + 1]
    }

    /// Log-probability at a logical index in `-1..=len`, guards included.
    #[inline]
    pub fn guarded_lprob(&self, idx: isize) -> f64 {
        self.guarded_lprobs[(idx + 1) as usize]
    }

    /// Log-probabilities of all rows, without guards.
    pub fn lprobs(&self) -> &[f64] {
        &self.guarded_lprobs[1..self.guarded_lprobs.len() - 1]
    }

    /// Log-probabilities with the leading `+∞` and trailing `-∞` guards.
    pub fn guarded_lprobs(&self) -> &[f64] {
        &self.guarded_lprobs
    }

    /// Probability of row `idx`.
    pub fn prob(&self, idx: usize) -> f64 {
        self.probs[idx]
    }

    /// Probabilities of all rows.
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Mass of row `idx`.
    pub fn mass(&self, idx: usize) -> f64 {
        self.masses[idx]
    }

    /// Masses of all rows.
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Compensated sum of all row probabilities.
    pub fn total_probability(&self) -> f64 {
        self.total.get()
    }

    /// Smallest stored mass, `+∞` when empty.
    pub fn min_mass(&self) -> f64 {
        self.masses.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest stored mass, `-∞` when empty.
    pub fn max_mass(&self) -> f64 {
        self.masses.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Read-only view of the configurations a search strategy has materialized.
///
/// This is the surface consumed when marginals of several elements are
/// combined into a molecule envelope.
pub trait MarginalTable {
    /// Distribution the table was enumerated from.
    fn distribution(&self) -> &Distribution;

    /// Arena owning every configuration referenced by the table.
    fn arena(&self) -> &ConfArena;

    /// Materialized rows.
    fn table(&self) -> &ResultTable;

    /// Number of materialized configurations.
    fn len(&self) -> usize {
        self.table().len()
    }

    /// Returns whether nothing has been materialized.
    fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// Isotope counts of configuration `idx`.
    fn conf(&self, idx: usize) -> &[u32] {
        self.arena().get(self.table().conf_id(idx))
    }

    /// Log-probability of configuration `idx`.
    fn lprob(&self, idx: usize) -> f64 {
        self.table().lprob(idx)
    }

    /// Probability of configuration `idx`.
    fn prob(&self, idx: usize) -> f64 {
        self.table().prob(idx)
    }

    /// Mass of configuration `idx`.
    fn mass(&self, idx: usize) -> f64 {
        self.table().mass(idx)
    }

    /// Compensated sum of the materialized probabilities.
    fn total_probability(&self) -> f64 {
        self.table().total_probability()
    }

    /// Log-probability of the distribution's mode.
    fn mode_lprob(&self) -> f64 {
        self.distribution().mode_lprob()
    }
}
