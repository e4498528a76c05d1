#![deny(missing_docs)]
#![doc = include_str!("../docs/marginal-api.md")]

mod arena;
mod config;
mod hash;
mod keying;
mod layered;
mod precalculated;
mod serialization;
mod table;
mod trek;

pub use arena::{ConfArena, ConfId};
pub use config::SearchConfig;
pub use hash::canonical_hash;
pub use keying::{hash_conf, VisitedSet};
pub use layered::LayeredSearch;
pub use precalculated::CutoffSearch;
pub use serialization::{MarginalSnapshot, SnapshotEntry, SNAPSHOT_SCHEMA_VERSION};
pub use table::{MarginalTable, ResultTable};
pub use trek::LazyTopKSearch;
