//! Versioned aggregate roots and optimistic concurrency.

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};

/// An entity whose stored state carries a monotonically increasing version.
///
/// The version is bumped by the owner of the record every time a new value is
/// persisted, so a writer can detect that it edited a stale copy.
pub trait AggregateRoot: Entity {
    /// Number of persisted changes applied to this record.
    fn version(&self) -> u64;
}

/// Optimistic concurrency expectation for an aggregate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking.
    Any,
    /// Require the aggregate to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> DomainResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(DomainError::conflict(format!(
                "stale record (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}
