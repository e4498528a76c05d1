//! Bounded table of negated log-factorials.

use std::fmt;

use crate::errors::{ErrorInfo, IsoError};

/// Number of entries the log-factorial table may hold.
pub const LOG_FACTORIAL_TABLE_SIZE: usize = 10 * 1024 * 1024;

/// Largest atom count a single distribution may carry.
pub const MAX_ATOM_COUNT: u32 = (LOG_FACTORIAL_TABLE_SIZE - 2) as u32;

/// Checks that `atom_count` fits inside the log-factorial table.
pub fn verify_atom_count(atom_count: u32) -> Result<u32, IsoError> {
    if atom_count > MAX_ATOM_COUNT {
        return Err(IsoError::Capacity(
            ErrorInfo::new(
                "atom-count-exceeds-table",
                "subisotopologue too large for the log-factorial table",
            )
            .with_context("atom_count", atom_count.to_string())
            .with_context("max_atom_count", MAX_ATOM_COUNT.to_string())
            .with_hint("split the element into smaller chunks"),
        ));
    }
    Ok(atom_count)
}

/// Values of `-ln(n!)` for `n` in `0..=atom_count`.
///
/// Each distribution owns its table, sized to its own atom count, so no
/// state is shared between independently running searches.
#[derive(Clone)]
pub struct LogFactorialTable {
    minus_log_factorials: Box<[f64]>,
}

impl LogFactorialTable {
    /// Builds the table for counts up to and including `atom_count`.
    pub fn new(atom_count: u32) -> Result<Self, IsoError> {
        let atom_count = verify_atom_count(atom_count)?;
        let minus_log_factorials = (0..=atom_count)
            .map(|n| -libm::lgamma(f64::from(n) + 1.0))
            .collect();
        Ok(Self {
            minus_log_factorials,
        })
    }

    /// Returns `-ln(n!)`.
    ///
    /// Panics when `n` exceeds the atom count the table was built for; a
    /// configuration can never hold more atoms than that.
    #[inline]
    pub fn minus_log_factorial(&self, n: u32) -> f64 {
        self.minus_log_factorials[n as usize]
    }

    /// Largest `n` covered by the table.
    pub fn max_n(&self) -> u32 {
        (self.minus_log_factorials.len() - 1) as u32
    }
}

impl fmt::Debug for LogFactorialTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFactorialTable")
            .field("max_n", &self.max_n())
            .finish_non_exhaustive()
    }
}
