//! Reference Data Seeding

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::records::{FuelGrade, Vehicle};
use crate::StorageError;

/// Administrative seed file: `{"vehicles": [...], "fuel_grades": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceSeed {
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub fuel_grades: Vec<FuelGrade>,
}

/// Read and parse a seed file
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<ReferenceSeed, StorageError> {
    let path = path.as_ref();
    info!("Loading reference seed from {}", path.display());

    let raw = std::fs::read_to_string(path).map_err(|e| {
        StorageError::SerializationError(format!("{}: {}", path.display(), e))
    })?;

    serde_json::from_str(&raw)
        .map_err(|e| StorageError::SerializationError(format!("{}: {}", path.display(), e)))
}
