use sha2::{Digest, Sha256};

use crate::table::MarginalTable;

/// SHA-256 over the element shape and every materialized row (counts and
/// log-probability bits) in row order.
///
/// Two tables hash equal exactly when they hold the same configurations in
/// the same order with bit-identical log-probabilities.
pub fn canonical_hash<T: MarginalTable + ?Sized>(marginal: &T) -> String {
    let mut hasher = Sha256::new();
    let distribution = marginal.distribution();
    hasher.update((distribution.isotope_count() as u64).to_le_bytes());
    hasher.update(distribution.atom_count().to_le_bytes());
    hasher.update((marginal.len() as u64).to_le_bytes());
    for idx in 0..marginal.len() {
        for count in marginal.conf(idx) {
            hasher.update(count.to_le_bytes());
        }
        hasher.update(marginal.lprob(idx).to_bits().to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}
