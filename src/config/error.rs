use std::path::PathBuf;

/// Errors raised while loading or validating a system configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode JSON configuration file '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to decode YAML configuration file '{}': {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Configuration document must be an object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("Invalid \"{section}\" section: {message}")]
    InvalidSection { section: String, message: String },
    #[error("Container \"{id}\" must be an object, found {found}")]
    InvalidEntry { id: String, found: &'static str },
    #[error("Invalid value for field \"{field}\" on container \"{id}\": {message}")]
    InvalidField {
        id: String,
        field: String,
        message: String,
    },
    #[error("Container name \"{id}\" is invalid: must contain only lowercase alphanumerics and hyphens")]
    InvalidId { id: String },
    #[error("System unique id \"{id}\" is invalid: must contain only lowercase alphanumerics and hyphens")]
    InvalidSystemUniqueId { id: String },
    #[error("You can only define 1 robot, found {}: {}", .ids.len(), .ids.join(", "))]
    MultipleRobots { ids: Vec<String> },
    #[error("The following container names are duplicated in the configuration file: {}", .ids.join(", "))]
    DuplicateIds { ids: Vec<String> },
    #[error("No container with id \"{id}\" is defined")]
    NotFound { id: String },
}

impl ConfigError {
    pub(crate) fn invalid_field(id: &str, field: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidField {
            id: id.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Name of the JSON type of `value`, used in error messages
pub(crate) fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
