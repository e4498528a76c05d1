use iso_core::errors::{ErrorInfo, IsoError};
use serde::{Deserialize, Serialize};

/// Tuning knobs shared by the search strategies.
///
/// None of these change which configurations are produced; they only size
/// the internal storage, except `sort`, which controls result ordering for
/// the cutoff and layered searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Configurations per arena page.
    #[serde(default = "default_arena_page_confs")]
    pub arena_page_confs: usize,
    /// Initial capacity of the visited sets.
    #[serde(default = "default_visited_capacity")]
    pub visited_capacity: usize,
    /// Whether cutoff and layered results are sorted by descending probability.
    #[serde(default = "default_sort")]
    pub sort: bool,
}

fn default_arena_page_confs() -> usize {
    1000
}

fn default_visited_capacity() -> usize {
    1000
}

fn default_sort() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            arena_page_confs: default_arena_page_confs(),
            visited_capacity: default_visited_capacity(),
            sort: default_sort(),
        }
    }
}

impl SearchConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, IsoError> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|err| IsoError::Config(ErrorInfo::new("parse-yaml", err.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, IsoError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| IsoError::Config(ErrorInfo::new("parse-json", err.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String, IsoError> {
        serde_yaml::to_string(self)
            .map_err(|err| IsoError::Serde(ErrorInfo::new("serialize-yaml", err.to_string())))
    }

    /// Rejects settings no search can run with.
    pub fn validate(&self) -> Result<(), IsoError> {
        if self.arena_page_confs == 0 {
            return Err(IsoError::Config(
                ErrorInfo::new(
                    "zero-arena-page",
                    "arena pages must hold at least one configuration",
                )
                .with_context("arena_page_confs", "0"),
            ));
        }
        Ok(())
    }
}
