//! Fleet manifest: the list of satellites a registry is seeded from.
//!
//! ```toml
//! [[satellites]]
//! id = 10001
//! alt = "MI208"
//! inclin = "I48"
//! state = "DEORBITED"   # optional, defaults to ACTIVE
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use satnet_common::Satellite;

use crate::registry::SatNet;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetManifest {
    #[serde(default)]
    pub satellites: Vec<Satellite>,
}

impl FleetManifest {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fleet manifest {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse fleet manifest {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let manifest: FleetManifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Build a registry from the manifest.
    ///
    /// Returns the registry and the number of entries skipped as duplicate ids
    /// (the first entry for an id wins).
    pub fn build_registry(&self) -> (SatNet, usize) {
        let mut net = SatNet::new();
        let mut duplicates = 0;

        for sat in &self.satellites {
            if !sat.in_id_window() {
                tracing::warn!(
                    "Satellite {} is outside the {}..={} id window",
                    sat.id(),
                    satnet_common::MIN_ID,
                    satnet_common::MAX_ID
                );
            }
            if !net.insert(sat.clone()) {
                tracing::warn!("Duplicate satellite id {} in manifest, keeping first entry", sat.id());
                duplicates += 1;
            }
        }

        tracing::info!(
            "Loaded {} satellites ({} duplicates skipped), tree height {}",
            net.len(),
            duplicates,
            net.height()
        );
        (net, duplicates)
    }
}
