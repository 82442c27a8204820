//! Snapshot loading port trait.

use crate::domain::error::ThemarankError;
use crate::domain::snapshot::Snapshot;

/// Source of fully materialized snapshots.
///
/// A load either produces a complete snapshot or fails as a whole; the
/// engine never computes over a partial one.
pub trait DataPort {
    fn load_snapshot(&self) -> Result<Snapshot, ThemarankError>;
}
