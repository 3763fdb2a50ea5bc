#[cfg(test)]
mod system_configuration_tests {
    use serde_json::{json, Value};
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    use emulation_system::config::{
        ConfigError, Container, ContainerDefinition, Hardware, ModuleDefinition, RobotDefinition,
        SystemConfiguration,
    };
    use emulation_system::{compose, orchestrator, services, Settings};

    fn ot2() -> Value {
        json!({
            "hardware": "ot2",
            "emulation-level": "firmware",
            "source-type": "remote",
            "source-location": "latest"
        })
    }

    fn heater_shaker() -> Value {
        json!({
            "hardware": "heater-shaker-module",
            "emulation-level": "hardware",
            "source-type": "remote",
            "source-location": "latest",
            "hardware-specific-attributes": {"mode": "stdin"}
        })
    }

    fn robot_and_modules() -> Value {
        json!({
            "robot": {"my-robot": ot2()},
            "modules": {
                "my-heater-shaker": heater_shaker(),
                "my-heater-shaker-2": heater_shaker()
            }
        })
    }

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    /// End-to-end: robot plus two heater-shakers
    #[test]
    fn test_robot_and_modules_registry() {
        let config = SystemConfiguration::from_value(&robot_and_modules()).unwrap();

        let mut ids: Vec<&str> = config.containers().keys().map(String::as_str).collect();
        ids.sort();
        assert_eq!(ids, vec!["my-heater-shaker", "my-heater-shaker-2", "my-robot"]);
        assert!(config.robot_exists());
        assert!(config.modules_exist());

        assert!(matches!(
            config.get_by_id("my-robot").unwrap(),
            ContainerDefinition::Robot(RobotDefinition::Ot2(_))
        ));
        for id in ["my-heater-shaker", "my-heater-shaker-2"] {
            assert!(matches!(
                config.get_by_id(id).unwrap(),
                ContainerDefinition::Module(ModuleDefinition::HeaterShaker(_))
            ));
        }
    }

    #[test]
    fn test_shared_id_reported() {
        // Cardinality is checked first, so at most one robot id can be shared.
        let raw = json!({
            "robot": {"shared-b": ot2()},
            "modules": {"shared-b": heater_shaker(), "unique": heater_shaker()}
        });
        let err = SystemConfiguration::from_value(&raw).unwrap_err();
        match &err {
            ConfigError::DuplicateIds { ids } => assert_eq!(ids, &vec!["shared-b".to_string()]),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
        assert!(err.to_string().ends_with(": shared-b"));
    }

    #[test]
    fn test_duplicate_message_lists_sorted_ids() {
        let err = ConfigError::DuplicateIds {
            ids: vec!["alpha".to_string(), "beta".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "The following container names are duplicated in the configuration file: alpha, beta"
        );
    }

    #[test]
    fn test_invalid_ids_rejected() {
        for bad in ["invalid name with spaces", "Upper", "snake_case", "semi;colon"] {
            let raw = json!({"modules": {(bad): heater_shaker()}});
            let err = SystemConfiguration::from_value(&raw).unwrap_err();
            assert!(err.to_string().contains(bad), "{} not named in: {}", bad, err);
        }
    }

    #[test]
    fn test_invalid_robot_id_rejected() {
        let raw = json!({"robot": {"My Robot": ot2()}});
        let err = SystemConfiguration::from_value(&raw).unwrap_err();
        match &err {
            ConfigError::InvalidId { id } => assert_eq!(id, "My Robot"),
            other => panic!("expected invalid id error, got {:?}", other),
        }
        assert!(err.to_string().contains("\"My Robot\""));
    }

    #[test]
    fn test_hyphen_placement_not_restricted() {
        for id in ["my--hs", "-hs", "hs-", "-"] {
            let raw = json!({"modules": {(id): heater_shaker()}});
            let config = SystemConfiguration::from_value(&raw).unwrap();
            assert!(config.get_by_id(id).is_ok(), "{} should be accepted", id);
        }
    }

    #[test]
    fn test_multiple_robots_rejected() {
        let raw = json!({"robot": {"robot-1": ot2(), "robot-2": ot2(), "robot-3": ot2()}});
        let err = SystemConfiguration::from_value(&raw).unwrap_err();
        assert!(matches!(err, ConfigError::MultipleRobots { .. }));
        assert!(err.to_string().contains("You can only define 1 robot"));
    }

    /// Constructing from a file yields the same registry as from a value
    #[test]
    fn test_from_json_file_matches_value() {
        let raw = robot_and_modules();
        let file = write_temp(".json", &serde_json::to_string_pretty(&raw).unwrap());

        let from_file = SystemConfiguration::from_file(file.path()).unwrap();
        let from_value = SystemConfiguration::from_value(&raw).unwrap();
        assert_eq!(from_file.containers(), from_value.containers());
        assert_eq!(from_file, from_value);
    }

    #[test]
    fn test_from_yaml_file() {
        let yaml = r#"
robot:
  my-robot:
    hardware: ot2
    emulation-level: firmware
    source-type: remote
    source-location: latest
modules:
  my-heater-shaker:
    hardware: heater-shaker-module
    emulation-level: hardware
    source-type: remote
    source-location: latest
    hardware-specific-attributes:
      mode: stdin
"#;
        let file = write_temp(".yaml", yaml);
        let config = SystemConfiguration::from_file(file.path()).unwrap();
        assert_eq!(config.get_by_id("my-heater-shaker").unwrap().hardware(), Hardware::HeaterShakerModule);
        assert!(config.robot_exists());
    }

    #[test]
    fn test_decode_errors() {
        let err = SystemConfiguration::from_file("/no/such/system.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let file = write_temp(".json", "{\"robot\": ");
        let err = SystemConfiguration::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));

        let file = write_temp(".yml", "robot: [unclosed");
        let err = SystemConfiguration::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn test_file_validation_errors_match_value_errors() {
        let raw = json!({"modules": {"invalid name with spaces": heater_shaker()}});
        let file = write_temp(".json", &raw.to_string());
        let err = SystemConfiguration::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidId { .. }));
    }

    #[test]
    fn test_compose_generation_end_to_end() {
        let dir = TempDir::new().unwrap();
        let settings_path = dir.path().join("settings.json");
        fs::write(
            &settings_path,
            json!({
                "global-settings": {
                    "default-folder-paths": {
                        "opentrons": "/src/opentrons",
                        "ot3-firmware": "/src/ot3-firmware",
                        "modules": "/src/opentrons-modules"
                    }
                },
                "emulation-settings": {
                    "source-download-locations": {
                        "heads": {
                            "opentrons": "opentrons-head",
                            "ot3-firmware": "ot3-firmware-head",
                            "modules": "modules-head"
                        },
                        "commits": {
                            "opentrons": "opentrons-{{commit-sha}}",
                            "ot3-firmware": "ot3-firmware-{{commit-sha}}",
                            "modules": "modules-{{commit-sha}}"
                        }
                    }
                }
            })
            .to_string(),
        )
        .unwrap();
        let settings = Settings::load(Some(settings_path.as_path())).unwrap();

        let mut raw = robot_and_modules();
        raw["system-unique-id"] = json!("lab");
        raw["modules"]["my-heater-shaker-2"]["source-location"] = json!("deadbeef");
        let config = SystemConfiguration::from_value(&raw).unwrap();

        let compose_file = orchestrator::generate_compose_file(&config, &settings);
        assert_eq!(compose_file.services.len(), 3);

        let robot = &compose_file.services["my-robot"];
        assert_eq!(robot.container_name, services::generate_container_name("my-robot", &config));
        assert_eq!(robot.container_name, "lab-my-robot");
        assert_eq!(robot.ports, Some(vec!["31950:31950".to_string()]));
        assert_eq!(
            robot.build.args.as_ref().unwrap()["OPENTRONS_SOURCE_DOWNLOAD_LOCATION"],
            "opentrons-head"
        );

        let hs2 = &compose_file.services["my-heater-shaker-2"];
        assert_eq!(
            hs2.build.args.as_ref().unwrap()["MODULE_SOURCE_DOWNLOAD_LOCATION"],
            "modules-deadbeef"
        );
        assert_eq!(hs2.volumes, None);

        let output = dir.path().join("docker-compose.yaml");
        compose::write_compose_file(&compose_file, &output).unwrap();
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("lab-my-heater-shaker"));
        assert!(written.contains("heater-shaker-hardware-remote:latest"));
    }
}
