//! Compose file orchestrator.
//!
//! This module coordinates the overall generation process, turning a
//! validated system configuration and the loaded settings into a compose
//! file with one service per container.

use crate::compose::{ComposeFile, ComposeService};
use crate::config::{Container, ContainerDefinition, SourceType, SystemConfiguration, LATEST_SOURCE_LOCATION};
use crate::services::{
    generate_container_name, get_build_args, get_mount_strings, get_service_build, get_service_image,
};
use crate::settings::Settings;
use log::{debug, info};
use std::collections::BTreeMap;

/// Generate the compose file for every container of `system`
pub fn generate_compose_file(system: &SystemConfiguration, settings: &Settings) -> ComposeFile {
    info!(
        "Generating compose file for {} container(s)",
        system.containers().len()
    );

    let services = system
        .containers()
        .iter()
        .map(|(id, container)| (id.clone(), generate_service(id, container, system, settings)))
        .collect();

    ComposeFile {
        services,
        ..ComposeFile::default()
    }
}

fn generate_service(
    id: &str,
    container: &ContainerDefinition,
    system: &SystemConfiguration,
    settings: &Settings,
) -> ComposeService {
    let container = with_default_source_paths(container, settings);
    let image_name = container.image_name();
    let build_args = build_args(&container, settings);
    let volumes = get_mount_strings(&container);
    let ports = container
        .as_robot()
        .map(|robot| vec![robot.robot_server().port_mapping()]);

    debug!(
        "Service {}: image {}, {} build arg(s), {} volume(s)",
        id,
        image_name,
        build_args.as_ref().map_or(0, BTreeMap::len),
        volumes.as_ref().map_or(0, Vec::len)
    );

    ComposeService {
        container_name: generate_container_name(id, system),
        image: get_service_image(&image_name),
        build: get_service_build(&image_name, build_args),
        volumes,
        ports,
        tty: true,
    }
}

/// Local sources given as `latest` point at the default checkout of their
/// repository
fn with_default_source_paths(container: &ContainerDefinition, settings: &Settings) -> ContainerDefinition {
    let repo = container.source_repo();
    let mut resolved = container.clone();

    let common = resolved.common_mut();
    if common.source_type == SourceType::Local && common.source_location == LATEST_SOURCE_LOCATION {
        common.source_location = settings.default_folder_path(repo).to_string();
    }

    if let Some(server) = resolved.robot_server_mut() {
        if server.source_type == SourceType::Local && server.source_location == LATEST_SOURCE_LOCATION {
            server.source_location = settings.default_folder_path(server.source_repo()).to_string();
        }
    }

    resolved
}

/// Build arguments for every remote source of the container
///
/// The container's own source takes precedence when the robot server is
/// built from the same repository.
fn build_args(container: &ContainerDefinition, settings: &Settings) -> Option<BTreeMap<String, String>> {
    let mut args = BTreeMap::new();

    if container.source_type() == SourceType::Remote {
        let repo = container.source_repo();
        args.extend(get_build_args(
            repo,
            container.source_location(),
            settings.commit_format(repo),
            settings.head(repo),
        ));
    }

    if let Some(robot) = container.as_robot() {
        let server = robot.robot_server();
        if server.source_type == SourceType::Remote {
            let repo = server.source_repo();
            for (key, value) in get_build_args(
                repo,
                &server.source_location,
                settings.commit_format(repo),
                settings.head(repo),
            ) {
                args.entry(key).or_insert(value);
            }
        }
    }

    if args.is_empty() {
        None
    } else {
        Some(args)
    }
}
