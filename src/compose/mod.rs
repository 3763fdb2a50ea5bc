//! # Compose File Module
//!
//! Data structures for the multi-container orchestration file generated from
//! a system configuration, and helpers to render it as YAML.
//!
//! ## Example Generated Structure
//!
//! ```yaml
//! version: "3.8"
//! services:
//!   my-robot:
//!     container_name: lab-1-my-robot
//!     image: ot2-firmware-remote:latest
//!     build:
//!       context: docker
//!       target: ot2-firmware-remote
//!       args:
//!         OPENTRONS_SOURCE_DOWNLOAD_LOCATION: https://github.com/Opentrons/opentrons/archive/refs/heads/edge.zip
//!     ports:
//!       - "31950:31950"
//!     tty: true
//! ```

pub mod types;

pub use types::{BuildItem, ComposeFile, ComposeService, COMPOSE_VERSION};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs;
use std::path::Path;

/// Render a compose file as YAML
pub fn to_yaml_string(compose: &ComposeFile) -> Result<String> {
    serde_yaml::to_string(compose).wrap_err("Failed to serialize compose file")
}

/// Write a compose file as YAML to `path`
pub fn write_compose_file(compose: &ComposeFile, path: &Path) -> Result<()> {
    let yaml = to_yaml_string(compose)?;
    fs::write(path, yaml)
        .wrap_err_with(|| format!("Failed to write compose file '{}'", path.display()))?;
    info!("Wrote compose file with {} service(s) to {:?}", compose.services.len(), path);
    Ok(())
}
