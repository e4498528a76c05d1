use std::f64::consts::PI;
use std::sync::OnceLock;

use tracing::debug;

use crate::errors::{ErrorInfo, IsoError};
use crate::factorial::LogFactorialTable;
use crate::moves::{is_uphill, moves};
use crate::rounding::{lgamma_up, ln_up};

/// Log-probabilities and masses of the stable isotopes of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeSet {
    log_probs: Box<[f64]>,
    masses: Box<[f64]>,
}

impl IsotopeSet {
    /// Validates the isotope table and stores upward-rounded log-probabilities.
    pub fn new(masses: &[f64], probabilities: &[f64]) -> Result<Self, IsoError> {
        if probabilities.is_empty() {
            return Err(IsoError::Domain(ErrorInfo::new(
                "no-isotopes",
                "an element needs at least one isotope",
            )));
        }
        if masses.len() != probabilities.len() {
            return Err(IsoError::Domain(
                ErrorInfo::new(
                    "isotope-length-mismatch",
                    "mass and probability tables must have the same length",
                )
                .with_context("masses", masses.len().to_string())
                .with_context("probabilities", probabilities.len().to_string()),
            ));
        }
        for (index, &p) in probabilities.iter().enumerate() {
            // Written positively so that NaN is rejected as well.
            if !(p > 0.0 && p <= 1.0) {
                return Err(IsoError::Domain(
                    ErrorInfo::new(
                        "probability-out-of-range",
                        "all isotope probabilities p must fulfil 0.0 < p <= 1.0",
                    )
                    .with_context("isotope", index.to_string())
                    .with_context("probability", p.to_string()),
                ));
            }
        }
        Ok(Self {
            log_probs: probabilities.iter().map(|&p| ln_up(p)).collect(),
            masses: masses.into(),
        })
    }

    /// Number of isotopes.
    pub fn len(&self) -> usize {
        self.log_probs.len()
    }

    /// Always `false`: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.log_probs.is_empty()
    }

    /// Upward-rounded natural logarithms of the isotope probabilities.
    pub fn log_probs(&self) -> &[f64] {
        &self.log_probs
    }

    /// Isotope masses, index-aligned with [`IsotopeSet::log_probs`].
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }
}

#[derive(Debug, Clone)]
struct Mode {
    conf: Box<[u32]>,
    lprob: f64,
}

/// Multinomial distribution of isotope counts for a fixed number of atoms of
/// a single element.
///
/// The value is immutable apart from the lazily memoized mode. Search
/// strategies take it by value.
#[derive(Debug, Clone)]
pub struct Distribution {
    isotopes: IsotopeSet,
    atom_count: u32,
    log_factorials: LogFactorialTable,
    loggamma_nominator: f64,
    mode: OnceLock<Mode>,
}

impl Distribution {
    /// Builds the distribution from index-aligned mass and probability tables.
    pub fn new(masses: &[f64], probabilities: &[f64], atom_count: u32) -> Result<Self, IsoError> {
        let isotopes = IsotopeSet::new(masses, probabilities)?;
        let log_factorials = LogFactorialTable::new(atom_count)?;
        Ok(Self {
            isotopes,
            atom_count,
            log_factorials,
            loggamma_nominator: lgamma_up(f64::from(atom_count) + 1.0),
            mode: OnceLock::new(),
        })
    }

    /// Builds the distribution from `(probability, mass)` pairs.
    pub fn from_pairs(isotopes: &[(f64, f64)], atom_count: u32) -> Result<Self, IsoError> {
        let probabilities: Vec<f64> = isotopes.iter().map(|&(p, _)| p).collect();
        let masses: Vec<f64> = isotopes.iter().map(|&(_, m)| m).collect();
        Self::new(&masses, &probabilities, atom_count)
    }

    /// Number of isotopes of the element.
    pub fn isotope_count(&self) -> usize {
        self.isotopes.len()
    }

    /// Number of atoms of the element.
    pub fn atom_count(&self) -> u32 {
        self.atom_count
    }

    /// The underlying isotope table.
    pub fn isotopes(&self) -> &IsotopeSet {
        &self.isotopes
    }

    /// Isotope log-probabilities.
    pub fn log_probs(&self) -> &[f64] {
        self.isotopes.log_probs()
    }

    /// Isotope masses.
    pub fn masses(&self) -> &[f64] {
        self.isotopes.masses()
    }

    /// `ln Γ(atom_count + 1)`, rounded upward.
    pub fn loggamma_nominator(&self) -> f64 {
        self.loggamma_nominator
    }

    /// Log-probability without the multinomial constant.
    #[inline]
    pub fn unnormalized_log_prob(&self, conf: &[u32]) -> f64 {
        debug_assert_eq!(conf.len(), self.isotope_count());
        conf.iter()
            .zip(self.isotopes.log_probs.iter())
            .map(|(&count, &lp)| {
                self.log_factorials.minus_log_factorial(count) + f64::from(count) * lp
            })
            .sum()
    }

    /// Log-probability of a configuration.
    #[inline]
    pub fn log_prob(&self, conf: &[u32]) -> f64 {
        self.loggamma_nominator + self.unnormalized_log_prob(conf)
    }

    /// Probability of a configuration.
    pub fn prob(&self, conf: &[u32]) -> f64 {
        self.log_prob(conf).exp()
    }

    /// Exact mass of a configuration.
    #[inline]
    pub fn conf_mass(&self, conf: &[u32]) -> f64 {
        conf.iter()
            .zip(self.isotopes.masses.iter())
            .map(|(&count, &mass)| f64::from(count) * mass)
            .sum()
    }

    /// Computes a fresh copy of the mode configuration without memoizing it.
    ///
    /// Starts next to the multinomial mean and hill-climbs to a local optimum.
    /// For multimodal inputs the optimum nearest the seed is returned.
    pub fn compute_mode_conf(&self) -> Box<[u32]> {
        let n = f64::from(self.atom_count);
        let mut seed: Vec<i64> = self
            .isotopes
            .log_probs
            .iter()
            .map(|lp| (n * lp.exp()).round() as i64 + 1)
            .collect();

        let assigned: i64 = seed.iter().sum();
        let diff = i64::from(self.atom_count) - assigned;
        if diff > 0 {
            seed[0] += diff;
        } else {
            let mut surplus = -diff;
            for count in seed.iter_mut() {
                if surplus == 0 {
                    break;
                }
                let take = (*count).min(surplus);
                *count -= take;
                surplus -= take;
            }
        }

        let mut conf: Vec<u32> = seed.into_iter().map(|count| count as u32).collect();
        let sweeps = self.climb(&mut conf);
        debug!(
            isotopes = self.isotope_count(),
            atoms = self.atom_count,
            sweeps,
            "mode configuration found"
        );
        conf.into_boxed_slice()
    }

    fn climb(&self, conf: &mut [u32]) -> usize {
        let mut lp = self.unnormalized_log_prob(conf);
        let mut sweeps = 0;
        loop {
            sweeps += 1;
            let mut modified = false;
            for mv in moves(conf.len()) {
                if !mv.try_apply(conf) {
                    continue;
                }
                let candidate = self.unnormalized_log_prob(conf);
                if is_uphill(lp, candidate, mv) {
                    lp = candidate;
                    modified = true;
                } else {
                    mv.revert(conf);
                }
            }
            if !modified {
                return sweeps;
            }
        }
    }

    fn mode(&self) -> &Mode {
        self.mode.get_or_init(|| {
            let conf = self.compute_mode_conf();
            let lprob = self.log_prob(&conf);
            Mode { conf, lprob }
        })
    }

    /// The (memoized) mode configuration.
    pub fn mode_conf(&self) -> &[u32] {
        &self.mode().conf
    }

    /// Log-probability of the mode configuration.
    pub fn mode_lprob(&self) -> f64 {
        self.mode().lprob
    }

    /// Mass of the mode configuration.
    pub fn mode_mass(&self) -> f64 {
        self.conf_mass(self.mode_conf())
    }

    /// Mass when every atom is the lightest isotope.
    pub fn lightest_conf_mass(&self) -> f64 {
        let lightest = self
            .masses()
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        lightest * f64::from(self.atom_count)
    }

    /// Mass when every atom is the heaviest isotope.
    pub fn heaviest_conf_mass(&self) -> f64 {
        let heaviest = self
            .masses()
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        heaviest * f64::from(self.atom_count)
    }

    /// Mass when every atom is the most abundant isotope.
    ///
    /// Often, but not always, equal to [`Distribution::lightest_conf_mass`].
    pub fn monoisotopic_conf_mass(&self) -> f64 {
        let mut best_lp = f64::NEG_INFINITY;
        let mut best_mass = 0.0;
        for (&lp, &mass) in self.log_probs().iter().zip(self.masses()) {
            if lp > best_lp {
                best_lp = lp;
                best_mass = mass;
            }
        }
        best_mass * f64::from(self.atom_count)
    }

    /// Expected mass of a single atom.
    pub fn atom_average_mass(&self) -> f64 {
        self.log_probs()
            .iter()
            .zip(self.masses())
            .map(|(lp, mass)| lp.exp() * mass)
            .sum()
    }

    /// Expected mass of all `atom_count` atoms.
    pub fn theoretical_average_mass(&self) -> f64 {
        self.atom_average_mass() * f64::from(self.atom_count)
    }

    /// Variance of the configuration mass.
    pub fn variance(&self) -> f64 {
        let mean = self.atom_average_mass();
        let per_atom: f64 = self
            .log_probs()
            .iter()
            .zip(self.masses())
            .map(|(lp, mass)| {
                let delta = mass - mean;
                lp.exp() * delta * delta
            })
            .sum();
        per_atom * f64::from(self.atom_count)
    }

    /// Smallest non-zero log-probability of any configuration.
    pub fn smallest_lprob(&self) -> f64 {
        let smallest = self
            .log_probs()
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        smallest * f64::from(self.atom_count)
    }

    /// Estimated log of the number of configurations inside the probability
    /// ellipsoid of the given log-radius.
    ///
    /// Compares the ellipsoid volume against the simplex volume and scales by
    /// the simplex lattice point count. Single-isotope elements have no
    /// spread and yield `-∞`; a zero atom count holds exactly one
    /// configuration and yields `0`.
    pub fn log_size_estimate(&self, log_ellipsoid_radius: f64) -> f64 {
        if self.isotope_count() <= 1 {
            return f64::NEG_INFINITY;
        }
        if self.atom_count == 0 {
            return 0.0;
        }

        let i = self.isotope_count() as f64;
        let k = i - 1.0;
        let n = f64::from(self.atom_count);
        let sum_lprobs: f64 = self.log_probs().iter().sum();

        let log_v_simplex = k * n.ln() - libm::lgamma(i);
        let log_n_simplex = libm::lgamma(n + i) - libm::lgamma(n + 1.0) - libm::lgamma(i);
        let log_v_ellipsoid = (k * (n.ln() + PI.ln() + log_ellipsoid_radius) + sum_lprobs) * 0.5
            - libm::lgamma((i + 1.0) * 0.5);

        log_n_simplex + log_v_ellipsoid - log_v_simplex
    }
}
