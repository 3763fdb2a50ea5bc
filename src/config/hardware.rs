//! Hardware kinds, emulation levels and source repositories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location value meaning "build from the head of the default branch".
pub const LATEST_SOURCE_LOCATION: &str = "latest";

/// Every hardware kind that can be emulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hardware {
    Ot2,
    Ot3,
    HeaterShakerModule,
    ThermocyclerModule,
    TemperatureModule,
    MagneticModule,
}

impl Hardware {
    /// Name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Hardware::Ot2 => "ot2",
            Hardware::Ot3 => "ot3",
            Hardware::HeaterShakerModule => "heater-shaker-module",
            Hardware::ThermocyclerModule => "thermocycler-module",
            Hardware::TemperatureModule => "temperature-module",
            Hardware::MagneticModule => "magnetic-module",
        }
    }

    /// Prefix of every docker image built for this hardware
    pub fn image_prefix(&self) -> &'static str {
        match self {
            Hardware::Ot2 => "ot2",
            Hardware::Ot3 => "ot3",
            Hardware::HeaterShakerModule => "heater-shaker",
            Hardware::ThermocyclerModule => "thermocycler",
            Hardware::TemperatureModule => "tempdeck",
            Hardware::MagneticModule => "magdeck",
        }
    }

    /// Emulation levels that have an emulator implementation.
    ///
    /// The OT-2 only ships a firmware (smoothie) emulator while the OT-3 is
    /// emulated by running its real firmware against simulated hardware.
    /// Temperature and magnetic modules only exist as firmware emulators.
    pub fn supported_emulation_levels(&self) -> &'static [EmulationLevel] {
        match self {
            Hardware::Ot2 | Hardware::TemperatureModule | Hardware::MagneticModule => {
                &[EmulationLevel::Firmware]
            }
            Hardware::Ot3 => &[EmulationLevel::Hardware],
            Hardware::HeaterShakerModule | Hardware::ThermocyclerModule => {
                &[EmulationLevel::Firmware, EmulationLevel::Hardware]
            }
        }
    }

    /// Repository the emulator for this hardware is built from
    pub fn source_repo(&self, level: EmulationLevel) -> OpentronsRepository {
        match (self, level) {
            (Hardware::Ot3, _) => OpentronsRepository::Ot3Firmware,
            (Hardware::HeaterShakerModule | Hardware::ThermocyclerModule, EmulationLevel::Hardware) => {
                OpentronsRepository::OpentronsModules
            }
            _ => OpentronsRepository::Opentrons,
        }
    }
}

impl fmt::Display for Hardware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level at which a container emulates its hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmulationLevel {
    Firmware,
    Hardware,
}

impl fmt::Display for EmulationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmulationLevel::Firmware => f.write_str("firmware"),
            EmulationLevel::Hardware => f.write_str("hardware"),
        }
    }
}

/// Where the software for a container comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Remote,
    Local,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Remote => f.write_str("remote"),
            SourceType::Local => f.write_str("local"),
        }
    }
}

/// Source repositories emulators are built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpentronsRepository {
    Opentrons,
    Ot3Firmware,
    OpentronsModules,
}

impl OpentronsRepository {
    /// Build argument that carries the download location of this repository
    pub fn build_arg_name(&self) -> &'static str {
        match self {
            OpentronsRepository::Opentrons => "OPENTRONS_SOURCE_DOWNLOAD_LOCATION",
            OpentronsRepository::Ot3Firmware => "FIRMWARE_SOURCE_DOWNLOAD_LOCATION",
            OpentronsRepository::OpentronsModules => "MODULE_SOURCE_DOWNLOAD_LOCATION",
        }
    }

    /// Path local sources of this repository are mounted at inside a container
    pub fn mount_path(&self) -> &'static str {
        match self {
            OpentronsRepository::Opentrons => "/opentrons",
            OpentronsRepository::Ot3Firmware => "/ot3-firmware",
            OpentronsRepository::OpentronsModules => "/opentrons-modules",
        }
    }
}

impl fmt::Display for OpentronsRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpentronsRepository::Opentrons => f.write_str("opentrons"),
            OpentronsRepository::Ot3Firmware => f.write_str("ot3-firmware"),
            OpentronsRepository::OpentronsModules => f.write_str("opentrons-modules"),
        }
    }
}
