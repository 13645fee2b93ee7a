//! Run fingerprints
//!
//! A fingerprint identifies the inputs of a run (scenario plus server
//! configuration) so reports produced from identical inputs can be matched
//! up. Identical inputs always produce identical results.

use crate::orchestrator::SimulationError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA256 hex digest of any serializable input
///
/// The input goes through `serde_json::Value` first. Its object map keeps
/// keys sorted, so field order in the source file does not change the hash.
///
/// # Example
/// ```
/// use checkout_simulator_core_rs::orchestrator::{compute_config_hash, SimulatorConfig};
///
/// let config = SimulatorConfig::default();
/// let hash = compute_config_hash(&config).unwrap();
/// assert_eq!(hash.len(), 64);
/// assert_eq!(hash, compute_config_hash(&config.clone()).unwrap());
/// ```
pub fn compute_config_hash<T: Serialize + ?Sized>(input: &T) -> Result<String, SimulationError> {
    let canonical = serde_json::to_value(input)
        .and_then(|value| serde_json::to_vec(&value))
        .map_err(|e| SimulationError::SerializationError(format!("fingerprint input: {}", e)))?;

    let digest = Sha256::digest(&canonical);
    Ok(digest.iter().map(|byte| format!("{:02x}", byte)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hash_ignores_key_order() {
        let a = json!({"servers": [{"name": "A"}], "overtime_seconds": 900});
        let b = json!({"overtime_seconds": 900, "servers": [{"name": "A"}]});
        assert_eq!(compute_config_hash(&a).unwrap(), compute_config_hash(&b).unwrap());
    }

    #[test]
    fn test_hash_changes_with_content() {
        let a = json!({"overtime_seconds": 900});
        let b = json!({"overtime_seconds": 600});
        assert_ne!(compute_config_hash(&a).unwrap(), compute_config_hash(&b).unwrap());
    }
}
