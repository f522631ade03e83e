use thiserror::Error;

/// Errors raised while generating benchmark graphs.
///
/// Every variant aborts the current generation request. There is no retry
/// and no partial recovery, a failed sweep iteration propagates instead of
/// silently skipping to the next one.
#[derive(Debug, Error)]
pub enum GenError {
    /// The requested degree range cannot form a probability distribution.
    #[error("invalid degree range [{min}, {max}] with exponent {exponent}: {reason}")]
    InvalidRange {
        min: u32,
        max: u32,
        exponent: f64,
        reason: String,
    },

    /// The blockmodel contains an entry unusable as an edge propensity.
    #[error("invalid blockmodel entry at ({row}, {col}): {value}")]
    InvalidModel { row: usize, col: usize, value: f64 },

    /// Every degree propensity is zero, edge placement would be degenerate.
    #[error("degree propensity vector sums to zero")]
    InvalidDegreeSequence,

    /// The partition no longer matches the vertex set. This indicates a bug
    /// in the generator itself and is never recovered from.
    #[error("partition holds {partition_len} labels but the graph has {vertex_count} vertices")]
    PartitionInvariant {
        partition_len: usize,
        vertex_count: usize,
    },

    /// Surfaced unchanged from the storage collaborator.
    #[error("storage failure on {name}")]
    Storage {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenError>;
