//! Bind mounts declared on containers.

use crate::utils::validation::is_valid_mount_name;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Kind of filesystem object a mount points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountType {
    File,
    Directory,
}

/// A host path bound into a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Mount {
    pub name: String,
    #[serde(rename = "type")]
    pub mount_type: MountType,
    pub source_path: PathBuf,
    pub mount_path: String,
}

impl Mount {
    /// Compose short-syntax volume string, `source:target`
    pub fn bind_mount_string(&self) -> String {
        format!("{}:{}", self.source_path.display(), self.mount_path)
    }
}

/// Check the extra mounts of a single container
///
/// Names must be unique and uppercase, mount paths absolute.
pub fn validate_mounts(mounts: &[Mount]) -> Result<(), String> {
    let mut names = HashSet::new();
    for mount in mounts {
        if !is_valid_mount_name(&mount.name) {
            return Err(format!(
                "mount name '{}' must contain only uppercase alphanumerics and underscores",
                mount.name
            ));
        }
        if !names.insert(mount.name.as_str()) {
            return Err(format!("mount name '{}' is used more than once", mount.name));
        }
        if !mount.mount_path.starts_with('/') {
            return Err(format!(
                "mount path '{}' of mount '{}' must be absolute",
                mount.mount_path, mount.name
            ));
        }
        if mount.source_path.as_os_str().is_empty() {
            return Err(format!("mount '{}' has an empty source path", mount.name));
        }
    }
    Ok(())
}
