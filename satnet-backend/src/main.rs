use satnet_backend::config;
use satnet_backend::fleet::FleetManifest;
use satnet_backend::logging;

use anyhow::{Context, Result};
use satnet_common::InclinationBand;

fn main() -> Result<()> {
    // Load configuration
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let found = config::read_config(&config_path)?;
    let config = config::CONFIG.get().context("Configuration not loaded")?;

    // Initialize logging
    let _logging_guard = logging::init_logging(&config.log_dir, "satnet", &config.log_level)?;

    tracing::info!("SatNet starting...");
    if !found {
        tracing::warn!("Config file {} not found, using defaults", config_path);
    }

    let manifest = FleetManifest::from_file(&config.fleet_path)?;
    let (mut net, _) = manifest.build_registry();

    for band in InclinationBand::ALL {
        tracing::info!("Inclination {}: {} satellites", band, net.count_satellites(band));
    }

    if config.purge_deorbited {
        let removed = net.remove_deorbited();
        tracing::info!("Purged {} deorbited satellites", removed);
    }

    net.validate().context("Registry failed its structural check")?;
    tracing::info!("Registry healthy: {} satellites, height {}", net.len(), net.height());

    for entry in net.list_satellites() {
        tracing::debug!("{}", entry);
    }
    let listing = serde_json::to_string(&net.list_satellites())?;
    tracing::info!("Listing: {}", listing);

    Ok(())
}
