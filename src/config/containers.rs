//! Typed container definitions.
//!
//! Each hardware kind has its own definition type carrying the attributes
//! shared by every container plus whatever is specific to that hardware.
//! Robots and modules are grouped in [`RobotDefinition`] and
//! [`ModuleDefinition`], and both fold into [`ContainerDefinition`] once a
//! system configuration is flattened.
//!
//! Entries are decoded field by field from a raw JSON value so that every
//! failure names the container and the field that caused it.

use super::error::{value_kind, ConfigError};
use super::hardware::{EmulationLevel, Hardware, OpentronsRepository, SourceType, LATEST_SOURCE_LOCATION};
use super::mounts::{validate_mounts, Mount};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const HARDWARE: &str = "hardware";
pub const EMULATION_LEVEL: &str = "emulation-level";
pub const SOURCE_TYPE: &str = "source-type";
pub const SOURCE_LOCATION: &str = "source-location";
pub const EXTRA_MOUNTS: &str = "extra-mounts";
pub const HARDWARE_SPECIFIC_ATTRIBUTES: &str = "hardware-specific-attributes";
pub const ROBOT_SERVER_SOURCE_TYPE: &str = "robot-server-source-type";
pub const ROBOT_SERVER_SOURCE_LOCATION: &str = "robot-server-source-location";
pub const EXPOSED_PORT: &str = "exposed-port";
pub const BOUND_PORT: &str = "bound-port";

/// Keys every container entry may carry
const CONTAINER_FIELDS: &[&str] = &[
    HARDWARE,
    EMULATION_LEVEL,
    SOURCE_TYPE,
    SOURCE_LOCATION,
    EXTRA_MOUNTS,
    HARDWARE_SPECIFIC_ATTRIBUTES,
];

/// Additional keys accepted on robot entries
const ROBOT_SERVER_FIELDS: &[&str] = &[
    ROBOT_SERVER_SOURCE_TYPE,
    ROBOT_SERVER_SOURCE_LOCATION,
    EXPOSED_PORT,
    BOUND_PORT,
];

/// Port the robot server listens on
pub const DEFAULT_ROBOT_SERVER_PORT: u16 = 31950;

/// Capabilities every container definition provides
pub trait Container {
    fn attributes(&self) -> &CommonAttributes;

    fn hardware(&self) -> Hardware;

    fn id(&self) -> &str {
        &self.attributes().id
    }

    fn emulation_level(&self) -> EmulationLevel {
        self.attributes().emulation_level
    }

    fn source_type(&self) -> SourceType {
        self.attributes().source_type
    }

    fn source_location(&self) -> &str {
        &self.attributes().source_location
    }

    /// Repository the emulator is built from
    fn source_repo(&self) -> OpentronsRepository {
        self.hardware().source_repo(self.emulation_level())
    }

    /// Docker build target, e.g. `heater-shaker-hardware-remote`
    fn image_name(&self) -> String {
        format!(
            "{}-{}-{}",
            self.hardware().image_prefix(),
            self.emulation_level(),
            self.source_type()
        )
    }

    /// Bind mounts the container needs, not including the entrypoint
    fn mount_strings(&self) -> Vec<String> {
        self.attributes().mount_strings(self.source_repo())
    }
}

/// Attributes shared by every container
#[derive(Debug, Clone, PartialEq)]
pub struct CommonAttributes {
    pub id: String,
    pub emulation_level: EmulationLevel,
    pub source_type: SourceType,
    pub source_location: String,
    pub extra_mounts: Vec<Mount>,
}

impl CommonAttributes {
    /// Local source mount (if any) followed by the extra mounts
    pub fn mount_strings(&self, repo: OpentronsRepository) -> Vec<String> {
        let mut mounts = Vec::new();
        if self.source_type == SourceType::Local {
            mounts.push(format!("{}:{}", self.source_location, repo.mount_path()));
        }
        mounts.extend(self.extra_mounts.iter().map(Mount::bind_mount_string));
        mounts
    }
}

/// Where the robot server of a robot comes from and how it is exposed
#[derive(Debug, Clone, PartialEq)]
pub struct RobotServer {
    pub source_type: SourceType,
    pub source_location: String,
    pub exposed_port: u16,
    pub bound_port: u16,
}

impl RobotServer {
    /// Robot server is always built from the opentrons repository
    pub fn source_repo(&self) -> OpentronsRepository {
        OpentronsRepository::Opentrons
    }

    fn mount_string(&self) -> Option<String> {
        match self.source_type {
            SourceType::Local => Some(format!(
                "{}:{}",
                self.source_location,
                self.source_repo().mount_path()
            )),
            SourceType::Remote => None,
        }
    }

    /// Compose port mapping, `host:container`
    pub fn port_mapping(&self) -> String {
        format!("{}:{}", self.bound_port, self.exposed_port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Pipette {
    pub model: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Ot2Attributes {
    #[serde(default)]
    pub left_pipette: Option<Pipette>,
    #[serde(default)]
    pub right_pipette: Option<Pipette>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ot2Definition {
    pub common: CommonAttributes,
    pub robot_server: RobotServer,
    pub hardware_specific_attributes: Ot2Attributes,
}

impl Container for Ot2Definition {
    fn attributes(&self) -> &CommonAttributes {
        &self.common
    }

    fn hardware(&self) -> Hardware {
        Hardware::Ot2
    }

    fn mount_strings(&self) -> Vec<String> {
        robot_mount_strings(self, &self.robot_server)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ot3Definition {
    pub common: CommonAttributes,
    pub robot_server: RobotServer,
}

impl Container for Ot3Definition {
    fn attributes(&self) -> &CommonAttributes {
        &self.common
    }

    fn hardware(&self) -> Hardware {
        Hardware::Ot3
    }

    fn mount_strings(&self) -> Vec<String> {
        robot_mount_strings(self, &self.robot_server)
    }
}

/// Robot server mount first, then the container's own mounts. The OT-2
/// emulator and robot server share a repository, so repeated strings are
/// only mounted once.
fn robot_mount_strings(robot: &impl Container, robot_server: &RobotServer) -> Vec<String> {
    let mut mounts: Vec<String> = robot_server.mount_string().into_iter().collect();
    for mount in robot.attributes().mount_strings(robot.source_repo()) {
        if !mounts.contains(&mount) {
            mounts.push(mount);
        }
    }
    mounts
}

/// Serial interface the heater-shaker emulator listens on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaterShakerMode {
    #[default]
    Socket,
    Stdin,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HeaterShakerAttributes {
    #[serde(default)]
    pub mode: HeaterShakerMode,
}

/// Simulated temperature ramp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TemperatureModel {
    #[serde(default = "default_starting_temperature")]
    pub starting: f64,
    #[serde(default = "default_degrees_per_tick")]
    pub degrees_per_tick: f64,
}

fn default_starting_temperature() -> f64 {
    23.0
}

fn default_degrees_per_tick() -> f64 {
    2.0
}

impl Default for TemperatureModel {
    fn default() -> Self {
        Self {
            starting: default_starting_temperature(),
            degrees_per_tick: default_degrees_per_tick(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ThermocyclerAttributes {
    #[serde(default)]
    pub lid_temperature: TemperatureModel,
    #[serde(default)]
    pub plate_temperature: TemperatureModel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TemperatureModuleAttributes {
    #[serde(default)]
    pub temperature: TemperatureModel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MagneticModuleAttributes {}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaterShakerDefinition {
    pub common: CommonAttributes,
    pub hardware_specific_attributes: HeaterShakerAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThermocyclerDefinition {
    pub common: CommonAttributes,
    pub hardware_specific_attributes: ThermocyclerAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureModuleDefinition {
    pub common: CommonAttributes,
    pub hardware_specific_attributes: TemperatureModuleAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MagneticModuleDefinition {
    pub common: CommonAttributes,
    pub hardware_specific_attributes: MagneticModuleAttributes,
}

impl Container for HeaterShakerDefinition {
    fn attributes(&self) -> &CommonAttributes {
        &self.common
    }

    fn hardware(&self) -> Hardware {
        Hardware::HeaterShakerModule
    }
}

impl Container for ThermocyclerDefinition {
    fn attributes(&self) -> &CommonAttributes {
        &self.common
    }

    fn hardware(&self) -> Hardware {
        Hardware::ThermocyclerModule
    }
}

impl Container for TemperatureModuleDefinition {
    fn attributes(&self) -> &CommonAttributes {
        &self.common
    }

    fn hardware(&self) -> Hardware {
        Hardware::TemperatureModule
    }
}

impl Container for MagneticModuleDefinition {
    fn attributes(&self) -> &CommonAttributes {
        &self.common
    }

    fn hardware(&self) -> Hardware {
        Hardware::MagneticModule
    }
}

/// A robot entry of the `robot` section
#[derive(Debug, Clone, PartialEq)]
pub enum RobotDefinition {
    Ot2(Ot2Definition),
    Ot3(Ot3Definition),
}

impl RobotDefinition {
    /// Decode the robot entry stored under `id`
    pub fn from_entry(id: &str, entry: &Value) -> Result<Self, ConfigError> {
        let reader = EntryReader::new(id, entry)?;
        let hardware = reader.hardware()?;
        let common = reader.common(hardware)?;
        let robot_server = reader.robot_server()?;
        let robot = match hardware {
            Hardware::Ot2 => {
                let hardware_specific_attributes = reader.hardware_specific_attributes()?;
                if common.source_type == SourceType::Local
                    && robot_server.source_type == SourceType::Local
                    && common.source_location != robot_server.source_location
                {
                    return Err(reader.invalid(
                        ROBOT_SERVER_SOURCE_LOCATION,
                        "must match source-location when both sources are local",
                    ));
                }
                RobotDefinition::Ot2(Ot2Definition {
                    common,
                    robot_server,
                    hardware_specific_attributes,
                })
            }
            Hardware::Ot3 => RobotDefinition::Ot3(Ot3Definition { common, robot_server }),
            module => {
                return Err(reader.invalid(
                    HARDWARE,
                    format!("{} is a module and must be defined under \"modules\"", module),
                ))
            }
        };
        reader.reject_unknown_fields(&[CONTAINER_FIELDS, ROBOT_SERVER_FIELDS])?;
        Ok(robot)
    }

    pub fn robot_server(&self) -> &RobotServer {
        match self {
            RobotDefinition::Ot2(ot2) => &ot2.robot_server,
            RobotDefinition::Ot3(ot3) => &ot3.robot_server,
        }
    }

    fn as_container(&self) -> &dyn Container {
        match self {
            RobotDefinition::Ot2(ot2) => ot2,
            RobotDefinition::Ot3(ot3) => ot3,
        }
    }
}

impl Container for RobotDefinition {
    fn attributes(&self) -> &CommonAttributes {
        self.as_container().attributes()
    }

    fn hardware(&self) -> Hardware {
        self.as_container().hardware()
    }

    fn mount_strings(&self) -> Vec<String> {
        self.as_container().mount_strings()
    }
}

/// A module entry of the `modules` section
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleDefinition {
    HeaterShaker(HeaterShakerDefinition),
    Thermocycler(ThermocyclerDefinition),
    Temperature(TemperatureModuleDefinition),
    Magnetic(MagneticModuleDefinition),
}

impl ModuleDefinition {
    /// Decode the module entry stored under `id`
    pub fn from_entry(id: &str, entry: &Value) -> Result<Self, ConfigError> {
        let reader = EntryReader::new(id, entry)?;
        let hardware = reader.hardware()?;
        let common = reader.common(hardware)?;
        let module = match hardware {
            Hardware::HeaterShakerModule => ModuleDefinition::HeaterShaker(HeaterShakerDefinition {
                common,
                hardware_specific_attributes: reader.hardware_specific_attributes()?,
            }),
            Hardware::ThermocyclerModule => ModuleDefinition::Thermocycler(ThermocyclerDefinition {
                common,
                hardware_specific_attributes: reader.hardware_specific_attributes()?,
            }),
            Hardware::TemperatureModule => ModuleDefinition::Temperature(TemperatureModuleDefinition {
                common,
                hardware_specific_attributes: reader.hardware_specific_attributes()?,
            }),
            Hardware::MagneticModule => ModuleDefinition::Magnetic(MagneticModuleDefinition {
                common,
                hardware_specific_attributes: reader.hardware_specific_attributes()?,
            }),
            robot => {
                return Err(reader.invalid(
                    HARDWARE,
                    format!("{} is a robot and must be defined under \"robot\"", robot),
                ))
            }
        };
        reader.reject_unknown_fields(&[CONTAINER_FIELDS])?;
        Ok(module)
    }

    fn as_container(&self) -> &dyn Container {
        match self {
            ModuleDefinition::HeaterShaker(module) => module,
            ModuleDefinition::Thermocycler(module) => module,
            ModuleDefinition::Temperature(module) => module,
            ModuleDefinition::Magnetic(module) => module,
        }
    }
}

impl Container for ModuleDefinition {
    fn attributes(&self) -> &CommonAttributes {
        self.as_container().attributes()
    }

    fn hardware(&self) -> Hardware {
        self.as_container().hardware()
    }

    fn mount_strings(&self) -> Vec<String> {
        self.as_container().mount_strings()
    }
}

/// Any container of a system, robot or module
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerDefinition {
    Robot(RobotDefinition),
    Module(ModuleDefinition),
}

impl ContainerDefinition {
    pub fn as_robot(&self) -> Option<&RobotDefinition> {
        match self {
            ContainerDefinition::Robot(robot) => Some(robot),
            ContainerDefinition::Module(_) => None,
        }
    }

    /// Mutable access to the shared attributes, for deriving resolved copies
    pub fn common_mut(&mut self) -> &mut CommonAttributes {
        match self {
            ContainerDefinition::Robot(RobotDefinition::Ot2(ot2)) => &mut ot2.common,
            ContainerDefinition::Robot(RobotDefinition::Ot3(ot3)) => &mut ot3.common,
            ContainerDefinition::Module(ModuleDefinition::HeaterShaker(module)) => &mut module.common,
            ContainerDefinition::Module(ModuleDefinition::Thermocycler(module)) => &mut module.common,
            ContainerDefinition::Module(ModuleDefinition::Temperature(module)) => &mut module.common,
            ContainerDefinition::Module(ModuleDefinition::Magnetic(module)) => &mut module.common,
        }
    }

    pub fn robot_server_mut(&mut self) -> Option<&mut RobotServer> {
        match self {
            ContainerDefinition::Robot(RobotDefinition::Ot2(ot2)) => Some(&mut ot2.robot_server),
            ContainerDefinition::Robot(RobotDefinition::Ot3(ot3)) => Some(&mut ot3.robot_server),
            ContainerDefinition::Module(_) => None,
        }
    }

    fn as_container(&self) -> &dyn Container {
        match self {
            ContainerDefinition::Robot(robot) => robot,
            ContainerDefinition::Module(module) => module,
        }
    }
}

impl Container for ContainerDefinition {
    fn attributes(&self) -> &CommonAttributes {
        self.as_container().attributes()
    }

    fn hardware(&self) -> Hardware {
        self.as_container().hardware()
    }

    fn mount_strings(&self) -> Vec<String> {
        self.as_container().mount_strings()
    }
}

impl From<RobotDefinition> for ContainerDefinition {
    fn from(robot: RobotDefinition) -> Self {
        ContainerDefinition::Robot(robot)
    }
}

impl From<ModuleDefinition> for ContainerDefinition {
    fn from(module: ModuleDefinition) -> Self {
        ContainerDefinition::Module(module)
    }
}

/// Field-by-field decoder for one raw container entry
struct EntryReader<'a> {
    id: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> EntryReader<'a> {
    fn new(id: &'a str, entry: &'a Value) -> Result<Self, ConfigError> {
        let fields = entry.as_object().ok_or_else(|| ConfigError::InvalidEntry {
            id: id.to_string(),
            found: value_kind(entry),
        })?;
        Ok(Self { id, fields })
    }

    fn invalid(&self, field: &str, message: impl Into<String>) -> ConfigError {
        ConfigError::invalid_field(self.id, field, message)
    }

    fn decode<T: DeserializeOwned>(&self, field: &str, value: &Value) -> Result<T, ConfigError> {
        T::deserialize(value).map_err(|e| self.invalid(field, e.to_string()))
    }

    fn required<T: DeserializeOwned>(&self, field: &str) -> Result<T, ConfigError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Err(self.invalid(field, "field is required")),
            Some(value) => self.decode(field, value),
        }
    }

    fn optional<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>, ConfigError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self.decode(field, value).map(Some),
        }
    }

    fn source_location(&self, field: &str) -> Result<String, ConfigError> {
        let location: String = self.required(field)?;
        if location.trim().is_empty() {
            return Err(self.invalid(field, "must not be empty"));
        }
        Ok(location)
    }

    fn hardware(&self) -> Result<Hardware, ConfigError> {
        self.required(HARDWARE)
    }

    fn common(&self, hardware: Hardware) -> Result<CommonAttributes, ConfigError> {
        let emulation_level: EmulationLevel = self.required(EMULATION_LEVEL)?;
        if !hardware.supported_emulation_levels().contains(&emulation_level) {
            return Err(self.invalid(
                EMULATION_LEVEL,
                format!("{} does not support {} level emulation", hardware, emulation_level),
            ));
        }
        let source_type = self.required(SOURCE_TYPE)?;
        let source_location = self.source_location(SOURCE_LOCATION)?;
        let extra_mounts: Vec<Mount> = self.optional(EXTRA_MOUNTS)?.unwrap_or_default();
        validate_mounts(&extra_mounts).map_err(|message| self.invalid(EXTRA_MOUNTS, message))?;

        Ok(CommonAttributes {
            id: self.id.to_string(),
            emulation_level,
            source_type,
            source_location,
            extra_mounts,
        })
    }

    fn robot_server(&self) -> Result<RobotServer, ConfigError> {
        let source_type = self
            .optional(ROBOT_SERVER_SOURCE_TYPE)?
            .unwrap_or(SourceType::Remote);
        let source_location = match self.fields.get(ROBOT_SERVER_SOURCE_LOCATION) {
            None | Some(Value::Null) => LATEST_SOURCE_LOCATION.to_string(),
            Some(_) => self.source_location(ROBOT_SERVER_SOURCE_LOCATION)?,
        };
        Ok(RobotServer {
            source_type,
            source_location,
            exposed_port: self.optional(EXPOSED_PORT)?.unwrap_or(DEFAULT_ROBOT_SERVER_PORT),
            bound_port: self.optional(BOUND_PORT)?.unwrap_or(DEFAULT_ROBOT_SERVER_PORT),
        })
    }

    /// Fails on the first key outside `allowed`
    fn reject_unknown_fields(&self, allowed: &[&[&str]]) -> Result<(), ConfigError> {
        match self
            .fields
            .keys()
            .find(|key| !allowed.iter().any(|fields| fields.contains(&key.as_str())))
        {
            Some(key) => Err(self.invalid(key, "unknown field")),
            None => Ok(()),
        }
    }

    fn hardware_specific_attributes<T: DeserializeOwned + Default>(&self) -> Result<T, ConfigError> {
        Ok(self.optional(HARDWARE_SPECIFIC_ATTRIBUTES)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ot2_entry() -> Value {
        json!({
            "hardware": "ot2",
            "emulation-level": "firmware",
            "source-type": "remote",
            "source-location": "latest"
        })
    }

    fn heater_shaker_entry() -> Value {
        json!({
            "hardware": "heater-shaker-module",
            "emulation-level": "hardware",
            "source-type": "remote",
            "source-location": "latest",
            "hardware-specific-attributes": {"mode": "stdin"}
        })
    }

    fn field_of(err: ConfigError) -> (String, String) {
        match err {
            ConfigError::InvalidField { id, field, .. } => (id, field),
            other => panic!("expected field error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_ot2_with_defaults() {
        let robot = RobotDefinition::from_entry("my-robot", &ot2_entry()).unwrap();
        let RobotDefinition::Ot2(ot2) = &robot else {
            panic!("expected ot2, got {:?}", robot);
        };
        assert_eq!(ot2.common.id, "my-robot");
        assert_eq!(ot2.robot_server.source_type, SourceType::Remote);
        assert_eq!(ot2.robot_server.source_location, LATEST_SOURCE_LOCATION);
        assert_eq!(ot2.robot_server.port_mapping(), "31950:31950");
        assert_eq!(ot2.hardware_specific_attributes, Ot2Attributes::default());
        assert_eq!(robot.image_name(), "ot2-firmware-remote");
        assert!(robot.mount_strings().is_empty());
    }

    #[test]
    fn test_parse_heater_shaker() {
        let module = ModuleDefinition::from_entry("hs", &heater_shaker_entry()).unwrap();
        let ModuleDefinition::HeaterShaker(hs) = &module else {
            panic!("expected heater-shaker, got {:?}", module);
        };
        assert_eq!(hs.hardware_specific_attributes.mode, HeaterShakerMode::Stdin);
        assert_eq!(module.hardware(), Hardware::HeaterShakerModule);
        assert_eq!(module.source_repo(), OpentronsRepository::OpentronsModules);
        assert_eq!(module.image_name(), "heater-shaker-hardware-remote");
    }

    #[test]
    fn test_thermocycler_attribute_defaults() {
        let entry = json!({
            "hardware": "thermocycler-module",
            "emulation-level": "firmware",
            "source-type": "remote",
            "source-location": "latest",
            "hardware-specific-attributes": {
                "lid-temperature": {"starting": 50.0}
            }
        });
        let module = ModuleDefinition::from_entry("tc", &entry).unwrap();
        let ModuleDefinition::Thermocycler(tc) = module else {
            panic!("expected thermocycler");
        };
        let attrs = tc.hardware_specific_attributes;
        assert_eq!(attrs.lid_temperature.starting, 50.0);
        assert_eq!(attrs.lid_temperature.degrees_per_tick, 2.0);
        assert_eq!(attrs.plate_temperature, TemperatureModel::default());
    }

    #[test]
    fn test_missing_field_names_id_and_field() {
        let mut entry = heater_shaker_entry();
        entry.as_object_mut().unwrap().remove(SOURCE_LOCATION);
        let err = ModuleDefinition::from_entry("hs", &entry).unwrap_err();
        assert!(err.to_string().contains("\"hs\""));
        assert_eq!(field_of(err), ("hs".to_string(), SOURCE_LOCATION.to_string()));
    }

    #[test]
    fn test_unknown_hardware() {
        let mut entry = heater_shaker_entry();
        entry[HARDWARE] = json!("flux-capacitor");
        let err = ModuleDefinition::from_entry("hs", &entry).unwrap_err();
        assert!(err.to_string().contains("flux-capacitor"));
        assert_eq!(field_of(err).1, HARDWARE);
    }

    #[test]
    fn test_wrong_type_and_bad_enum() {
        let mut entry = ot2_entry();
        entry[SOURCE_LOCATION] = json!(42);
        assert_eq!(field_of(RobotDefinition::from_entry("r", &entry).unwrap_err()).1, SOURCE_LOCATION);

        let mut entry = ot2_entry();
        entry[SOURCE_TYPE] = json!("cloud");
        assert_eq!(field_of(RobotDefinition::from_entry("r", &entry).unwrap_err()).1, SOURCE_TYPE);

        let mut entry = ot2_entry();
        entry[EXPOSED_PORT] = json!(70000);
        assert_eq!(field_of(RobotDefinition::from_entry("r", &entry).unwrap_err()).1, EXPOSED_PORT);
    }

    #[test]
    fn test_unsupported_emulation_level() {
        let mut entry = ot2_entry();
        entry[EMULATION_LEVEL] = json!("hardware");
        let err = RobotDefinition::from_entry("r", &entry).unwrap_err();
        assert!(err.to_string().contains("does not support hardware level emulation"));
    }

    #[test]
    fn test_robot_and_module_sections_not_interchangeable() {
        let err = RobotDefinition::from_entry("hs", &heater_shaker_entry()).unwrap_err();
        assert_eq!(field_of(err).1, HARDWARE);
        let err = ModuleDefinition::from_entry("r", &ot2_entry()).unwrap_err();
        assert_eq!(field_of(err).1, HARDWARE);
    }

    #[test]
    fn test_unknown_hardware_specific_attribute() {
        let mut entry = heater_shaker_entry();
        entry[HARDWARE_SPECIFIC_ATTRIBUTES] = json!({"speed": 10});
        let err = ModuleDefinition::from_entry("hs", &entry).unwrap_err();
        assert_eq!(field_of(err).1, HARDWARE_SPECIFIC_ATTRIBUTES);
    }

    #[test]
    fn test_unknown_entry_key_rejected() {
        let mut entry = ot2_entry();
        entry["robot-server-source-typ"] = json!("local");
        let err = RobotDefinition::from_entry("r", &entry).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
        assert_eq!(field_of(err), ("r".to_string(), "robot-server-source-typ".to_string()));

        let mut entry = heater_shaker_entry();
        entry[BOUND_PORT] = json!(5000);
        let err = ModuleDefinition::from_entry("hs", &entry).unwrap_err();
        assert_eq!(field_of(err).1, BOUND_PORT);
    }

    #[test]
    fn test_entry_must_be_object() {
        let err = ModuleDefinition::from_entry("hs", &json!("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEntry { .. }));
    }

    #[test]
    fn test_local_mount_strings() {
        let mut entry = heater_shaker_entry();
        entry[SOURCE_TYPE] = json!("local");
        entry[SOURCE_LOCATION] = json!("/home/user/opentrons-modules");
        entry[EXTRA_MOUNTS] = json!([{
            "name": "LOGS",
            "type": "directory",
            "source-path": "/tmp/logs",
            "mount-path": "/logs"
        }]);
        let module = ModuleDefinition::from_entry("hs", &entry).unwrap();
        assert_eq!(
            module.mount_strings(),
            vec![
                "/home/user/opentrons-modules:/opentrons-modules".to_string(),
                "/tmp/logs:/logs".to_string(),
            ]
        );
    }

    #[test]
    fn test_ot2_local_sources_share_mount() {
        let mut entry = ot2_entry();
        entry[SOURCE_TYPE] = json!("local");
        entry[SOURCE_LOCATION] = json!("/src/opentrons");
        entry[ROBOT_SERVER_SOURCE_TYPE] = json!("local");
        entry[ROBOT_SERVER_SOURCE_LOCATION] = json!("/src/opentrons");
        let robot = RobotDefinition::from_entry("r", &entry).unwrap();
        assert_eq!(robot.mount_strings(), vec!["/src/opentrons:/opentrons".to_string()]);

        entry[ROBOT_SERVER_SOURCE_LOCATION] = json!("/elsewhere/opentrons");
        let err = RobotDefinition::from_entry("r", &entry).unwrap_err();
        assert_eq!(field_of(err).1, ROBOT_SERVER_SOURCE_LOCATION);
    }

    #[test]
    fn test_ot3_mounts_firmware_and_robot_server() {
        let entry = json!({
            "hardware": "ot3",
            "emulation-level": "hardware",
            "source-type": "local",
            "source-location": "/src/ot3-firmware",
            "robot-server-source-type": "local",
            "robot-server-source-location": "/src/opentrons",
            "bound-port": 5000
        });
        let robot = RobotDefinition::from_entry("ot3", &entry).unwrap();
        assert_eq!(
            robot.mount_strings(),
            vec![
                "/src/opentrons:/opentrons".to_string(),
                "/src/ot3-firmware:/ot3-firmware".to_string(),
            ]
        );
        assert_eq!(robot.robot_server().port_mapping(), "5000:31950");
    }
}
