//! # System configuration
//!
//! Typed model of the configuration file describing which robot and modules
//! make up an emulated system.
//!
//! - `hardware`: hardware kinds, emulation levels, source types, repositories
//! - `mounts`: extra bind mounts declared on containers
//! - `containers`: per-hardware container definitions and the [`Container`] trait
//! - `system`: [`SystemConfiguration`], validation and the flattened registry
//! - `error`: [`ConfigError`]

pub mod containers;
pub mod error;
pub mod hardware;
pub mod mounts;
pub mod system;

pub use containers::{
    CommonAttributes, Container, ContainerDefinition, HeaterShakerDefinition, HeaterShakerMode,
    MagneticModuleDefinition, ModuleDefinition, Ot2Definition, Ot3Definition, RobotDefinition,
    RobotServer, TemperatureModuleDefinition, ThermocyclerDefinition,
};
pub use error::ConfigError;
pub use hardware::{EmulationLevel, Hardware, OpentronsRepository, SourceType, LATEST_SOURCE_LOCATION};
pub use mounts::{Mount, MountType};
pub use system::SystemConfiguration;
