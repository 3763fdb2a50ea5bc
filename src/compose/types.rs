//! Compose file type definitions.
//!
//! Only the subset of the compose specification the generator emits is
//! modelled here. Optional fields are skipped when empty so the rendered YAML
//! stays minimal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Compose file format version emitted by the generator
pub const COMPOSE_VERSION: &str = "3.8";

/// Build section of a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildItem {
    /// Directory containing the Dockerfile
    pub context: String,
    /// Dockerfile stage to build
    pub target: String,
    /// Build arguments passed to the Dockerfile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<BTreeMap<String, String>>,
}

/// One service of the compose file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeService {
    pub container_name: String,
    pub image: String,
    pub build: BuildItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<String>>,
    pub tty: bool,
}

/// Root of the compose file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeFile {
    pub version: String,
    pub services: BTreeMap<String, ComposeService>,
}

impl Default for ComposeFile {
    fn default() -> Self {
        Self {
            version: COMPOSE_VERSION.to_string(),
            services: BTreeMap::new(),
        }
    }
}
