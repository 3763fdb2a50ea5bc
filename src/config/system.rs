//! System configuration model.
//!
//! A system configuration describes every container of one emulated system:
//! at most one robot and any number of modules. Construction validates the
//! whole document up front and either yields a fully valid configuration or a
//! single [`ConfigError`] describing the violation; there is no partially
//! valid state.
//!
//! ## Document format
//!
//! ```json
//! {
//!   "system-unique-id": "lab-1",
//!   "robot": {
//!     "my-robot": {
//!       "hardware": "ot2",
//!       "emulation-level": "firmware",
//!       "source-type": "remote",
//!       "source-location": "latest"
//!     }
//!   },
//!   "modules": {
//!     "my-heater-shaker": {
//!       "hardware": "heater-shaker-module",
//!       "emulation-level": "hardware",
//!       "source-type": "remote",
//!       "source-location": "latest",
//!       "hardware-specific-attributes": {"mode": "stdin"}
//!     }
//!   }
//! }
//! ```
//!
//! ## Validation order
//!
//! 1. Every entry is decoded field by field (type and enum checks)
//! 2. Every id must be lowercase alphanumerics and hyphens
//! 3. At most one robot may be defined
//! 4. No id may be used by both the robot and a module; all shared ids are
//!    reported together, sorted

use super::containers::{ContainerDefinition, ModuleDefinition, RobotDefinition};
use super::error::{value_kind, ConfigError};
use crate::utils::validation::{find_shared_ids, is_valid_container_id};
use log::{debug, info};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const ROBOT_KEY: &str = "robot";
pub const MODULES_KEY: &str = "modules";
pub const SYSTEM_UNIQUE_ID_KEY: &str = "system-unique-id";

/// Validated description of every container in an emulated system
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfiguration {
    system_unique_id: Option<String>,
    robot: BTreeMap<String, RobotDefinition>,
    modules: BTreeMap<String, ModuleDefinition>,
    containers: BTreeMap<String, ContainerDefinition>,
}

impl SystemConfiguration {
    /// Build a configuration from an in-memory document
    pub fn from_value(raw: &Value) -> Result<Self, ConfigError> {
        let document = raw
            .as_object()
            .ok_or_else(|| ConfigError::NotAnObject { found: value_kind(raw) })?;

        let robot = parse_section(document, ROBOT_KEY, RobotDefinition::from_entry)?;
        let modules = parse_section(document, MODULES_KEY, ModuleDefinition::from_entry)?;
        let system_unique_id = parse_system_unique_id(document)?;

        if let Some(id) = robot.keys().chain(modules.keys()).find(|id| !is_valid_container_id(id)) {
            return Err(ConfigError::InvalidId { id: id.clone() });
        }
        if let Some(id) = &system_unique_id {
            if !is_valid_container_id(id) {
                return Err(ConfigError::InvalidSystemUniqueId { id: id.clone() });
            }
        }

        if robot.len() > 1 {
            return Err(ConfigError::MultipleRobots {
                ids: robot.keys().cloned().collect(),
            });
        }

        let duplicates = find_shared_ids(
            robot.keys().map(String::as_str),
            modules.keys().map(String::as_str),
        );
        if !duplicates.is_empty() {
            return Err(ConfigError::DuplicateIds { ids: duplicates });
        }

        let containers: BTreeMap<String, ContainerDefinition> = robot
            .iter()
            .map(|(id, robot)| (id.clone(), ContainerDefinition::from(robot.clone())))
            .chain(
                modules
                    .iter()
                    .map(|(id, module)| (id.clone(), ContainerDefinition::from(module.clone()))),
            )
            .collect();

        debug!(
            "Validated system configuration: {} robot(s), {} module(s)",
            robot.len(),
            modules.len()
        );

        Ok(Self {
            system_unique_id,
            robot,
            modules,
            containers,
        })
    }

    /// Read and decode `path`, then build a configuration from its content
    ///
    /// Files ending in `.yaml` or `.yml` are decoded as YAML, everything else
    /// as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading system configuration from: {:?}", path);

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: Value = if is_yaml(path) {
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?
        };

        Self::from_value(&raw)
    }

    /// Look up a container by id
    pub fn get_by_id(&self, id: &str) -> Result<&ContainerDefinition, ConfigError> {
        self.containers
            .get(id)
            .ok_or_else(|| ConfigError::NotFound { id: id.to_string() })
    }

    /// Every container, keyed and ordered by id
    pub fn containers(&self) -> &BTreeMap<String, ContainerDefinition> {
        &self.containers
    }

    pub fn robot(&self) -> &BTreeMap<String, RobotDefinition> {
        &self.robot
    }

    pub fn modules(&self) -> &BTreeMap<String, ModuleDefinition> {
        &self.modules
    }

    pub fn system_unique_id(&self) -> Option<&str> {
        self.system_unique_id.as_deref()
    }

    pub fn modules_exist(&self) -> bool {
        !self.modules.is_empty()
    }

    pub fn robot_exists(&self) -> bool {
        !self.robot.is_empty()
    }
}

impl TryFrom<Value> for SystemConfiguration {
    type Error = ConfigError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        Self::from_value(&raw)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext == "yaml" || ext == "yml")
}

/// Decode every entry of an optional `id -> entry` section
fn parse_section<T>(
    document: &Map<String, Value>,
    key: &str,
    parse: impl Fn(&str, &Value) -> Result<T, ConfigError>,
) -> Result<BTreeMap<String, T>, ConfigError> {
    let entries = match document.get(key) {
        None | Some(Value::Null) => return Ok(BTreeMap::new()),
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(ConfigError::InvalidSection {
                section: key.to_string(),
                message: format!("expected an object of containers, found {}", value_kind(other)),
            })
        }
    };

    entries
        .iter()
        .map(|(id, entry)| parse(id, entry).map(|definition| (id.clone(), definition)))
        .collect()
}

fn parse_system_unique_id(document: &Map<String, Value>) -> Result<Option<String>, ConfigError> {
    match document.get(SYSTEM_UNIQUE_ID_KEY) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id.clone())),
        Some(other) => Err(ConfigError::InvalidSection {
            section: SYSTEM_UNIQUE_ID_KEY.to_string(),
            message: format!("expected a string, found {}", value_kind(other)),
        }),
    }
}
