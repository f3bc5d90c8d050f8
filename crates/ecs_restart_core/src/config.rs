use serde_json::Value;

pub const ECS_CLUSTER_VAR: &str = "ECS_CLUSTER";
pub const ECS_SERVICES_VAR: &str = "ECS_SERVICES";

/// Validated restart configuration for one invocation.
///
/// Resolved from the raw environment values each time the function runs;
/// nothing is cached across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartConfig {
    pub cluster: String,
    pub services: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

impl RestartConfig {
    /// Validates the raw `ECS_CLUSTER` / `ECS_SERVICES` values.
    ///
    /// Both values must be present and non-empty, and the services value must
    /// parse as a JSON list of non-empty strings with at least one entry.
    pub fn resolve(
        cluster: Option<&str>,
        services_json: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let cluster = match cluster {
            Some(value) if !value.is_empty() => value,
            _ => return Err(missing_required()),
        };
        let services_json = match services_json {
            Some(value) if !value.is_empty() => value,
            _ => return Err(missing_required()),
        };

        let parsed: Value = serde_json::from_str(services_json).map_err(|error| {
            ConfigError::new(format!("{ECS_SERVICES_VAR} is not valid JSON: {error}"))
        })?;
        let Value::Array(entries) = parsed else {
            return Err(ConfigError::new(format!(
                "{ECS_SERVICES_VAR} must be a JSON list"
            )));
        };
        if entries.is_empty() {
            return Err(ConfigError::new(format!(
                "{ECS_SERVICES_VAR} must list at least one service"
            )));
        }

        let mut services = Vec::with_capacity(entries.len());
        for entry in entries {
            let Value::String(service) = entry else {
                return Err(ConfigError::new(format!(
                    "{ECS_SERVICES_VAR} must be a JSON list of strings"
                )));
            };
            if service.is_empty() {
                return Err(ConfigError::new(format!(
                    "{ECS_SERVICES_VAR} entries must be non-empty service identifiers"
                )));
            }
            services.push(service);
        }

        Ok(Self {
            cluster: cluster.to_string(),
            services,
        })
    }
}

fn missing_required() -> ConfigError {
    ConfigError::new(format!("Missing {ECS_CLUSTER_VAR} or {ECS_SERVICES_VAR}"))
}
