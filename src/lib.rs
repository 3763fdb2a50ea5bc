//! # Emulation System - Configuration engine for emulated robot and module containers
//!
//! This library reads a declarative file describing the containers of an
//! emulated system (at most one robot and any number of modules), validates
//! it, and derives the per-service parameters needed to assemble a compose
//! file: container names, image tags, build arguments and bind mounts.
//!
//! ## Architecture
//!
//! - `config`: typed container definitions and the validated [`SystemConfiguration`]
//! - `settings`: settings file loading (download locations, default source folders)
//! - `services`: derivation functions shared by every service
//! - `compose`: compose file data structures and YAML output
//! - `orchestrator`: builds the compose file from a configuration and settings
//! - `utils`: identifier validation helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use emulation_system::{compose, orchestrator, Settings, SystemConfiguration};
//! use std::path::Path;
//!
//! let settings = Settings::load(None)?;
//! let system = SystemConfiguration::from_file("system.json")?;
//!
//! let compose_file = orchestrator::generate_compose_file(&system, &settings);
//! compose::write_compose_file(&compose_file, Path::new("docker-compose.yaml"))?;
//! # Ok::<(), color_eyre::Report>(())
//! ```
//!
//! ## Error Handling
//!
//! Loading and validation return typed errors ([`ConfigError`],
//! [`SettingsError`]) built with `thiserror`. Output helpers and the binary
//! use `color_eyre` for reporting with context.

pub mod compose;
pub mod config;
pub mod orchestrator;
pub mod services;
pub mod settings;
pub mod utils;

pub use config::{ConfigError, Container, ContainerDefinition, SystemConfiguration};
pub use settings::{Settings, SettingsError};
