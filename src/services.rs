//! Functions shared by every service generator.

use crate::compose::BuildItem;
use crate::config::{Container, Mount, MountType, OpentronsRepository, SystemConfiguration, LATEST_SOURCE_LOCATION};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Directory holding the emulator Dockerfile
pub const DOCKERFILE_DIR_LOCATION: &str = "docker";

/// Entrypoint script bound into every container that has other mounts
pub const ENTRYPOINT_FILE_LOCATION: &str = "docker/entrypoint.sh";

pub const ENTRYPOINT_MOUNT_NAME: &str = "ENTRYPOINT";

/// Placeholder replaced by the source location in commit format strings
pub const COMMIT_SHA_PLACEHOLDER: &str = "{{commit-sha}}";

/// Prefix the system unique id to a container id, if one is configured
pub fn generate_container_name(container_id: &str, system: &SystemConfiguration) -> String {
    match system.system_unique_id() {
        Some(prefix) => format!("{}-{}", prefix, container_id),
        None => container_id.to_string(),
    }
}

pub fn get_service_build(image_name: &str, build_args: Option<BTreeMap<String, String>>) -> BuildItem {
    BuildItem {
        context: DOCKERFILE_DIR_LOCATION.to_string(),
        target: image_name.to_string(),
        args: build_args,
    }
}

pub fn get_service_image(image_name: &str) -> String {
    format!("{}:latest", image_name)
}

/// Mount strings declared by the container plus the entrypoint mount
///
/// Returns `None` when the container declares no mounts; the entrypoint
/// mount is only added alongside other mounts.
pub fn get_mount_strings(container: &impl Container) -> Option<Vec<String>> {
    let mut mount_strings = container.mount_strings();
    if mount_strings.is_empty() {
        return None;
    }
    mount_strings.push(get_entrypoint_mount_string());
    Some(mount_strings)
}

/// Bind mount string for the entrypoint script
pub fn get_entrypoint_mount_string() -> String {
    Mount {
        name: ENTRYPOINT_MOUNT_NAME.to_string(),
        mount_type: MountType::File,
        source_path: PathBuf::from(ENTRYPOINT_FILE_LOCATION),
        mount_path: "/entrypoint.sh".to_string(),
    }
    .bind_mount_string()
}

/// Build arguments telling the Dockerfile where to download `source_repo`
///
/// `latest` resolves to `head`; anything else is substituted into
/// `format_string`.
pub fn get_build_args(
    source_repo: OpentronsRepository,
    source_location: &str,
    format_string: &str,
    head: &str,
) -> BTreeMap<String, String> {
    let value = if source_location == LATEST_SOURCE_LOCATION {
        head.to_string()
    } else {
        format_string.replace(COMMIT_SHA_PLACEHOLDER, source_location)
    };
    BTreeMap::from([(source_repo.build_arg_name().to_string(), value)])
}
