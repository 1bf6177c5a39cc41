use thiserror::Error as TError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by the table translation layer.
///
/// None of these are retried here; the caller decides what to show and
/// whether to try again.
#[derive(Debug, TError)]
pub enum Error {
    /// The control plane could not be reached or refused the credentials.
    #[error("ConnectionError: {0:#}")]
    Connection(anyhow::Error),

    /// The control plane answered, but resource metadata could not be listed.
    #[error("DiscoveryError: {0:#}")]
    Discovery(anyhow::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, TError)]
pub enum DecodeError {
    #[error("DecodeError: row {row} has no object attached")]
    MissingObject { row: usize },

    #[error("DecodeError: row {row}: {source}")]
    Object {
        row: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("DecodeError: row {row} has {actual} cells, expected {expected}")]
    CellCount {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("DecodeError: namespaced table must start with the NAMESPACE column")]
    NamespaceColumn,

    #[error("DecodeError: row {row} does not lead with its namespace")]
    Namespace { row: usize },
}
