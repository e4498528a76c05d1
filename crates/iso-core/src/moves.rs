//! Adjacency between configurations: one atom moves between two isotopes.

/// A single-unit transfer from `donor` to `receiver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Isotope index gaining one atom.
    pub receiver: usize,
    /// Isotope index losing one atom.
    pub donor: usize,
}

impl Move {
    /// Applies the move in place when the donor has an atom to give.
    ///
    /// Returns `false`, leaving `conf` untouched, when `conf[donor] == 0`.
    #[inline]
    pub fn try_apply(self, conf: &mut [u32]) -> bool {
        if conf[self.donor] == 0 {
            return false;
        }
        conf[self.donor] -= 1;
        conf[self.receiver] += 1;
        true
    }

    /// Undoes a previously applied move.
    #[inline]
    pub fn revert(self, conf: &mut [u32]) {
        conf[self.receiver] -= 1;
        conf[self.donor] += 1;
    }

    /// The move that undoes this one.
    pub fn reversed(self) -> Self {
        Self {
            receiver: self.donor,
            donor: self.receiver,
        }
    }
}

/// Enumerates every ordered `(receiver, donor)` pair with `receiver != donor`,
/// receiver-major.
pub fn moves(isotope_count: usize) -> impl Iterator<Item = Move> {
    (0..isotope_count).flat_map(move |receiver| {
        (0..isotope_count)
            .filter(move |&donor| donor != receiver)
            .map(move |donor| Move { receiver, donor })
    })
}

/// Total order used both for hill climbing and for claiming neighbors.
///
/// Moving from a configuration with log-probability `from_lp` to one with
/// `to_lp` via `mv` goes uphill when the log-probability strictly increases,
/// or stays exactly equal while the atom moves to a lower isotope index.
#[inline]
pub fn is_uphill(from_lp: f64, to_lp: f64, mv: Move) -> bool {
    to_lp > from_lp || (to_lp == from_lp && mv.donor > mv.receiver)
}
