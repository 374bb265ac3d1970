//! Logic for loading configuration in to an object model
use std::fs;
use std::path::Path;
use std::str::FromStr;

use displaydoc::Display;
use schemars::JsonSchema;
use schemars::r#gen::SchemaSettings;
use schemars::schema::RootSchema;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::util::TimestampPrecision;

/// Configuration error.
#[derive(Debug, Error, Display)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// could not read configuration file '{path}': {error}
    CannotReadFile {
        path: String,
        error: std::io::Error,
    },
    /// {message}: {error}
    InvalidConfiguration {
        message: &'static str,
        error: String,
    },
}

/// The configuration for the resolver.
///
/// Can be created through `serde::Deserialize` from various formats,
/// or inline in Rust code with `serde_json::json!` and `serde_json::from_value`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, default)]
pub struct Configuration {
    /// Configuration for the `createEvent` mutation resolver.
    pub create_event: CreateEventConfig,
}

/// Configuration for the `createEvent` mutation resolver.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, default)]
pub struct CreateEventConfig {
    /// Fractional second digits of the generated `createdAt` timestamp.
    pub timestamp_precision: TimestampPrecision,

    /// Only write the event if no item with the same key exists yet.
    pub prevent_overwrite: bool,
}

impl Configuration {
    /// Read configuration from a YAML file. An empty file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let raw = fs::read_to_string(path).map_err(|error| ConfigurationError::CannotReadFile {
            path: path.display().to_string(),
            error,
        })?;
        let configuration = raw.parse()?;
        tracing::debug!(path = %path.display(), ?configuration, "loaded configuration");
        Ok(configuration)
    }
}

/// Parse configuration from a string in YAML syntax
impl FromStr for Configuration {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Configuration::default());
        }
        serde_yaml::from_str(s).map_err(|e| ConfigurationError::InvalidConfiguration {
            message: "failed to parse yaml",
            error: e.to_string(),
        })
    }
}

/// The JSON schema of [`Configuration`], for editor support.
pub fn generate_config_schema() -> RootSchema {
    let settings = SchemaSettings::draft07().with(|s| {
        s.option_nullable = true;
        s.option_add_null_type = false;
        s.inline_subschemas = true;
    });

    settings
        .into_generator()
        .into_root_schema_for::<Configuration>()
}
