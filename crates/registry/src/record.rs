use serde::{Deserialize, Serialize};

use franchise_core::{AggregateRoot, Entity};

/// A stored record together with its version.
///
/// Version 1 is the first stored value; every replacement adds one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    version: u64,
    record: T,
}

impl<T> Versioned<T> {
    pub(crate) fn first(record: T) -> Self {
        Self { version: 1, record }
    }

    pub(crate) fn at(version: u64, record: T) -> Self {
        Self { version, record }
    }

    pub(crate) fn next(&self, record: T) -> Self {
        Self {
            version: self.version + 1,
            record,
        }
    }

    pub fn record(&self) -> &T {
        &self.record
    }

    pub fn into_record(self) -> T {
        self.record
    }
}

impl<T: Entity> Entity for Versioned<T> {
    type Id = T::Id;

    fn id(&self) -> &Self::Id {
        self.record.id()
    }
}

impl<T: Entity> AggregateRoot for Versioned<T> {
    fn version(&self) -> u64 {
        self.version
    }
}
