use std::path::PathBuf;
use thiserror::Error;

/// Faults raised while loading the Foundation Foods corpus. All of them are
/// fatal to startup: the engine never serves a partially loaded corpus.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Foundation Foods data file not found at: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to read Foundation Foods data file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse Foundation Foods JSON data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate FDC ID {0} in Foundation Foods data")]
    DuplicateFdcId(i64),
}

/// Errors reported to callers of the query engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Foundation Foods data not loaded")]
    NotLoaded,

    #[error("Foundation Foods data is empty")]
    EmptyCorpus,

    #[error("food with FDC ID {0} not found")]
    NotFound(i64),
}

impl QueryError {
    /// True for the operational faults (`NotLoaded`, `EmptyCorpus`), as opposed
    /// to a lookup miss.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, QueryError::NotLoaded | QueryError::EmptyCorpus)
    }
}
