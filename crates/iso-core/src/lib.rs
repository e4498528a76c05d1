#![deny(missing_docs)]
#![doc = include_str!("../docs/core-api.md")]

/// Isotope tables and the per-element multinomial distribution.
pub mod distribution;
/// Structured error types.
pub mod errors;
/// Bounded negated log-factorial table.
pub mod factorial;
/// The neighbor rule and the climbing order.
pub mod moves;
/// Upward-rounded logarithms.
pub mod rounding;
mod summator;

pub use distribution::{Distribution, IsotopeSet};
pub use errors::{ErrorInfo, IsoError};
pub use factorial::{LogFactorialTable, LOG_FACTORIAL_TABLE_SIZE, MAX_ATOM_COUNT};
pub use moves::{is_uphill, moves, Move};
pub use summator::Summator;
