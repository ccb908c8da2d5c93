//! JSON export/import of the whole registry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use franchise_config::GlobalConfig;
use franchise_core::DomainError;
use franchise_licensees::Licensee;
use franchise_payments::Payment;
use franchise_schools::School;

use crate::record::Versioned;
use crate::registry::Registry;

/// Everything the registry holds, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: GlobalConfig,
    pub licensees: Vec<Licensee>,
    pub schools: Vec<Versioned<School>>,
    pub payments: Vec<Payment>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("inconsistent snapshot: {0}")]
    Invalid(#[from] DomainError),
}

impl Registry {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            config: self.config().clone(),
            licensees: self.licensees(),
            schools: self.stored_schools(),
            payments: self.payments(),
        }
    }

    /// Rebuild a registry, checking references and recomputing every school.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, SnapshotError> {
        let registry = Registry::restore(
            snapshot.config,
            snapshot.licensees,
            snapshot.schools,
            snapshot.payments,
        )?;
        Ok(registry)
    }

    pub fn export_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn import_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }
}
