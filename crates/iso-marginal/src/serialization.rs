use iso_core::errors::{ErrorInfo, IsoError};
use serde::{Deserialize, Serialize};

use crate::table::MarginalTable;

/// Schema version written into every snapshot.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// One materialized configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Isotope counts.
    pub conf: Vec<u32>,
    /// Log-probability.
    pub lprob: f64,
    /// Probability.
    pub prob: f64,
    /// Exact mass.
    pub mass: f64,
}

/// Owned, serializable copy of a marginal table, in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginalSnapshot {
    /// Snapshot schema version.
    pub schema_version: u32,
    /// Number of isotopes of the element.
    pub isotope_count: usize,
    /// Number of atoms of the element.
    pub atom_count: u32,
    /// Log-probability of the mode.
    pub mode_lprob: f64,
    /// Compensated sum of the row probabilities.
    pub total_probability: f64,
    /// Materialized rows.
    pub entries: Vec<SnapshotEntry>,
}

impl MarginalSnapshot {
    /// Copies every materialized row out of `marginal`.
    pub fn capture<T: MarginalTable + ?Sized>(marginal: &T) -> Self {
        let entries = (0..marginal.len())
            .map(|idx| SnapshotEntry {
                conf: marginal.conf(idx).to_vec(),
                lprob: marginal.lprob(idx),
                prob: marginal.prob(idx),
                mass: marginal.mass(idx),
            })
            .collect();
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            isotope_count: marginal.distribution().isotope_count(),
            atom_count: marginal.distribution().atom_count(),
            mode_lprob: marginal.mode_lprob(),
            total_probability: marginal.total_probability(),
            entries,
        }
    }

    /// Serializes the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, IsoError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| IsoError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
    }

    /// Restores a snapshot, rejecting unknown schema versions and rows whose
    /// width disagrees with the isotope count.
    pub fn from_json(json: &str) -> Result<Self, IsoError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|err| IsoError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
        if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(IsoError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported snapshot schema version")
                    .with_context("found", snapshot.schema_version.to_string())
                    .with_context("expected", SNAPSHOT_SCHEMA_VERSION.to_string()),
            ));
        }
        if let Some(row) = snapshot
            .entries
            .iter()
            .position(|entry| entry.conf.len() != snapshot.isotope_count)
        {
            return Err(IsoError::Serde(
                ErrorInfo::new(
                    "conf-width-mismatch",
                    "configuration width differs from isotope count",
                )
                .with_context("row", row.to_string())
                .with_context("isotope_count", snapshot.isotope_count.to_string()),
            ));
        }
        Ok(snapshot)
    }
}
