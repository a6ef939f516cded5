//! Error types for store, aggregation, and session operations.

use thiserror::Error;

use crate::types::{GroupId, PartitionId};

/// Alias for results produced by store and session operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by store mutations and the aggregator.
///
/// Every variant is recoverable: an operation that returns one has not
/// modified any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The addressed series is not in the claimed partition.
    #[error("no series {label:?} in partition {partition}")]
    NotFound {
        label: String,
        partition: PartitionId,
    },

    /// A series label that matches nothing in the store.
    #[error("unknown series {label:?}")]
    UnknownSeries { label: String },

    /// A new group's normalized name collides with an existing partition.
    #[error("partition name {name:?} is already taken")]
    DuplicatePartitionName { name: String },

    /// A group name that normalizes to the empty string.
    #[error("partition name {name:?} is blank")]
    InvalidPartitionName { name: String },

    /// A seeded series' label collides with one already in the store.
    #[error("series label {label:?} is already taken")]
    DuplicateSeriesLabel { label: String },

    /// A group id that does not, or no longer does, identify a group.
    #[error("unknown group {id}")]
    UnknownGroup { id: GroupId },

    /// A merge was requested over zero input series.
    #[error("cannot merge an empty set of series")]
    EmptyMergeInput,

    /// Sample counts disagree where they must match.
    #[error("series {label:?} has {actual} samples where {expected} are required")]
    LengthMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = StoreError::NotFound {
            label: "#3".into(),
            partition: PartitionId::Individual,
        };
        assert_eq!(err.to_string(), "no series \"#3\" in partition individual");

        let err = StoreError::LengthMismatch {
            label: "#1".into(),
            expected: 10,
            actual: 7,
        };
        assert_eq!(
            err.to_string(),
            "series \"#1\" has 7 samples where 10 are required"
        );

        let err = StoreError::UnknownGroup {
            id: GroupId::from_index(2),
        };
        assert_eq!(err.to_string(), "unknown group 2");
    }
}
