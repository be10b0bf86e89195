use std::collections::TryReserveError;

use thiserror::Error;

use crate::builder::BuilderInvalidReason;

/// Memory for a new path node could not be reserved.
///
/// This is the only fatal outcome of drawing; the session that hit it should end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not allocate a path node: {0}")]
pub struct AllocationFailure(#[from] pub TryReserveError);

/// Reasons a level pack could not be loaded.
///
/// Loading is all-or-nothing: whenever one of these is returned, no level from the pack is kept.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The text does not follow the level grammar.
    #[error("record {record}, byte {offset}: {reason}")]
    Malformed {
        /// 1-based number of the record being read.
        record: usize,
        /// Byte offset into the source at which reading stopped.
        offset: usize,
        /// What was expected there.
        reason: String,
    },
    /// A record parsed but describes an impossible board.
    #[error("record {record}: invalid level {reasons:?}")]
    Invalid {
        /// 1-based number of the offending record.
        record: usize,
        /// Everything the builder objected to.
        reasons: Vec<BuilderInvalidReason>,
    },
    /// The source held no level record at all.
    #[error("no level records found")]
    Empty,
    /// The source exists but could not be read.
    #[error("could not read level pack: {0}")]
    Io(#[from] std::io::Error),
}
